use crate::{
    error::{Error, Result},
    models::{NewUser, User},
};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Repository Trait
///
/// Abstract contract for the persistence operations the request layer and the
/// seeders need. Handlers and seeders only ever see `dyn Repository`, so the
/// Postgres store and the in-memory store are interchangeable.
///
/// **Send + Sync + async_trait** make the trait object (`Arc<dyn Repository>`)
/// shareable across Axum's task boundaries.
#[async_trait]
pub trait Repository: Send + Sync {
    // Lookup used by the auth extractor. Storage failures are logged and read as "no user".
    async fn get_user(&self, id: Uuid) -> Option<User>;
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // Fails with `Error::DuplicateEmail` when the email is already taken.
    async fn create_user(&self, user: NewUser) -> Result<User>;
    async fn count_users(&self) -> Result<i64>;
}

/// RepositoryState
///
/// The concrete type used to share the persistence layer across the application state.
pub type RepositoryState = Arc<dyn Repository>;

const USER_COLUMNS: &str = "id, name, email, role, email_verified_at, created_at, updated_at";

/// PostgresRepository
///
/// The concrete implementation of the `Repository` trait, backed by PostgreSQL.
pub struct PostgresRepository {
    pool: PgPool,
}

impl PostgresRepository {
    /// Creates a new repository instance using the initialized connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Applies the embedded migrations under `migrations/`.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl Repository for PostgresRepository {
    async fn get_user(&self, id: Uuid) -> Option<User> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .unwrap_or_else(|e| {
                tracing::error!("get_user error: {:?}", e);
                None
            })
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");
        let user = sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    /// create_user
    ///
    /// Inserts a single row. The unique index on `email` is translated into
    /// `Error::DuplicateEmail` so callers can tell a clash from a broken connection.
    async fn create_user(&self, user: NewUser) -> Result<User> {
        let query = format!(
            "INSERT INTO users (id, name, email, role, email_verified_at) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {USER_COLUMNS}"
        );
        let inserted = sqlx::query_as::<_, User>(&query)
            .bind(Uuid::new_v4())
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.role)
            .bind(user.email_verified_at)
            .fetch_one(&self.pool)
            .await;

        match inserted {
            Ok(row) => Ok(row),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(Error::DuplicateEmail(user.email))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn count_users(&self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

/// MemoryRepository
///
/// In-process implementation of the `Repository` trait. Used by the test suites
/// and for running the router without a database.
#[derive(Default)]
pub struct MemoryRepository {
    users: RwLock<Vec<User>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every stored row, in insertion order.
    pub async fn all_users(&self) -> Vec<User> {
        self.users.read().await.clone()
    }
}

#[async_trait]
impl Repository for MemoryRepository {
    async fn get_user(&self, id: Uuid) -> Option<User> {
        self.users.read().await.iter().find(|u| u.id == id).cloned()
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self
            .users
            .read()
            .await
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn create_user(&self, user: NewUser) -> Result<User> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.email == user.email) {
            return Err(Error::DuplicateEmail(user.email));
        }

        let now = Utc::now();
        let row = User {
            id: Uuid::new_v4(),
            name: user.name,
            email: user.email,
            role: user.role,
            email_verified_at: user.email_verified_at,
            created_at: now,
            updated_at: now,
        };
        users.push(row.clone());
        Ok(row)
    }

    async fn count_users(&self) -> Result<i64> {
        Ok(self.users.read().await.len() as i64)
    }
}
