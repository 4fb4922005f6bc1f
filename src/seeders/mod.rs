use async_trait::async_trait;

use crate::{error::Result, factory::UserFactory, repository::Repository};

mod admin;
pub use admin::AdminSeeder;

/// Number of synthetic users every `DatabaseSeeder` run adds.
pub const SEEDED_USER_COUNT: usize = 10;

/// SeedReport
///
/// What a seeding run wrote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeedReport {
    pub admin_created: bool,
    // Factory users only; the admin account is reported by `admin_created`.
    pub users_created: usize,
}

impl SeedReport {
    fn merge(self, other: SeedReport) -> SeedReport {
        SeedReport {
            admin_created: self.admin_created || other.admin_created,
            users_created: self.users_created + other.users_created,
        }
    }
}

/// Seeder
///
/// A batch that populates the store. Failures propagate to the caller.
#[async_trait]
pub trait Seeder: Send + Sync {
    async fn run(&self, repo: &dyn Repository) -> Result<SeedReport>;
}

/// DatabaseSeeder
///
/// Root seeder: runs the admin seeder, then adds `SEEDED_USER_COUNT` factory
/// users. Not idempotent; every run adds another batch of users.
pub struct DatabaseSeeder {
    admin: AdminSeeder,
}

impl DatabaseSeeder {
    pub fn new(admin: AdminSeeder) -> Self {
        Self { admin }
    }
}

#[async_trait]
impl Seeder for DatabaseSeeder {
    async fn run(&self, repo: &dyn Repository) -> Result<SeedReport> {
        let admin = self.admin.run(repo).await?;

        let users = UserFactory::new()
            .count(SEEDED_USER_COUNT)
            .create(repo)
            .await?;

        let report = admin.merge(SeedReport {
            admin_created: false,
            users_created: users.len(),
        });
        tracing::info!(
            admin_created = report.admin_created,
            users_created = report.users_created,
            "database seeded"
        );
        Ok(report)
    }
}
