use async_trait::async_trait;
use chrono::Utc;

use super::{SeedReport, Seeder};
use crate::{
    config::AppConfig,
    error::Result,
    models::{NewUser, ROLE_ADMIN},
    repository::Repository,
};

/// AdminSeeder
///
/// Ensures the configured administrator account exists. An existing account
/// with the same email is left untouched, so re-running never duplicates it.
#[derive(Debug, Clone)]
pub struct AdminSeeder {
    pub name: String,
    pub email: String,
}

impl AdminSeeder {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            name: config.admin_name.clone(),
            email: config.admin_email.clone(),
        }
    }
}

#[async_trait]
impl Seeder for AdminSeeder {
    async fn run(&self, repo: &dyn Repository) -> Result<SeedReport> {
        if repo.find_user_by_email(&self.email).await?.is_some() {
            tracing::debug!(email = %self.email, "admin already present");
            return Ok(SeedReport::default());
        }

        let admin = repo
            .create_user(NewUser {
                name: self.name.clone(),
                email: self.email.clone(),
                role: ROLE_ADMIN.to_string(),
                email_verified_at: Some(Utc::now()),
            })
            .await?;
        tracing::info!(id = %admin.id, email = %admin.email, "admin user created");

        Ok(SeedReport {
            admin_created: true,
            users_created: 0,
        })
    }
}
