use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;
use utoipa::ToSchema;
use uuid::Uuid;

/// Role given to the account created by the admin seeder.
pub const ROLE_ADMIN: &str = "admin";
/// Role given to every other account.
pub const ROLE_MEMBER: &str = "member";

// --- Core Application Schemas (Mapped to Database) ---

/// User
///
/// A row of the `users` table. Also the shape of the `auth.user` page prop,
/// so it is exported to the front-end as a TypeScript binding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    // Unique across the table.
    pub email: String,
    // 'admin' or 'member'.
    pub role: String,
    // Set once the address has been confirmed; gates the `verified` middleware.
    #[ts(type = "string | null")]
    pub email_verified_at: Option<DateTime<Utc>>,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn is_verified(&self) -> bool {
        self.email_verified_at.is_some()
    }
}

/// NewUser
///
/// Insert payload for the `users` table. The store assigns the id and timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub role: String,
    pub email_verified_at: Option<DateTime<Utc>>,
}

// --- Page-render bridge ---

/// Page
///
/// The page object handed to the client-side renderer: which component to mount,
/// the props to mount it with, the URL it answers for and the asset version
/// the server is running.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct Page {
    #[schema(example = "Dashboard")]
    pub component: String,
    #[schema(value_type = Object)]
    #[ts(type = "Record<string, unknown>")]
    pub props: serde_json::Value,
    #[schema(example = "/dashboard")]
    pub url: String,
    pub version: String,
}
