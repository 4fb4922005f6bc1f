use thiserror::Error;

/// Failures raised by persistence writes and the seeders.
#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Database(#[from] sqlx::Error),
    #[error("{0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("a user with email {0} already exists")]
    DuplicateEmail(String),
}

pub type Result<T> = core::result::Result<T, Error>;
