use chrono::Utc;
use rand::{Rng, seq::SliceRandom};
use uuid::Uuid;

use crate::{
    error::{Error, Result},
    models::{NewUser, ROLE_MEMBER, User},
    repository::Repository,
};

const FIRST_NAMES: &[&str] = &[
    "Ada", "Alan", "Amara", "Bram", "Chloe", "Dmitri", "Elif", "Femi", "Grace", "Hugo", "Ines",
    "Jonas", "Keiko", "Lars", "Maya", "Noor", "Oskar", "Priya", "Quinn", "Rosa", "Sven", "Tariq",
    "Uma", "Viktor", "Wen", "Yara", "Zoe",
];

const LAST_NAMES: &[&str] = &[
    "Andersen", "Bakker", "Castillo", "Dubois", "Eriksen", "Fischer", "Garcia", "Hoffman",
    "Ibrahim", "Jansen", "Kowalski", "Lindqvist", "Moreau", "Nakamura", "Okafor", "Peeters",
    "Rossi", "Silva", "Tanaka", "Visser", "Wagner", "Yilmaz",
];

// Reserved for documentation, never deliverable.
const EMAIL_DOMAINS: &[&str] = &["example.com", "example.org", "example.net"];

// A fresh address is drawn when the store reports a clash.
const MAX_EMAIL_ATTEMPTS: usize = 3;

/// UserFactory
///
/// Builds synthetic `users` rows for seeding and tests. Users are verified
/// members unless configured otherwise.
#[derive(Debug, Clone)]
pub struct UserFactory {
    count: usize,
    verified: bool,
}

impl Default for UserFactory {
    fn default() -> Self {
        Self {
            count: 1,
            verified: true,
        }
    }
}

impl UserFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of users produced by `make` and `create`.
    pub fn count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    /// Leave `email_verified_at` unset.
    pub fn unverified(mut self) -> Self {
        self.verified = false;
        self
    }

    /// Builds the users without persisting them.
    pub fn make(&self) -> Vec<NewUser> {
        let mut rng = rand::thread_rng();
        (0..self.count).map(|_| self.definition(&mut rng)).collect()
    }

    /// create
    ///
    /// Persists `count` users and returns the stored rows. Any storage failure
    /// other than an email clash aborts the batch.
    pub async fn create(&self, repo: &dyn Repository) -> Result<Vec<User>> {
        let mut created = Vec::with_capacity(self.count);
        for _ in 0..self.count {
            created.push(self.create_one(repo).await?);
        }
        tracing::debug!(count = created.len(), "factory users created");
        Ok(created)
    }

    async fn create_one(&self, repo: &dyn Repository) -> Result<User> {
        let mut attempt = 1;
        loop {
            let user = self.definition(&mut rand::thread_rng());
            match repo.create_user(user).await {
                Err(Error::DuplicateEmail(email)) if attempt < MAX_EMAIL_ATTEMPTS => {
                    tracing::warn!(%email, "generated email already taken, retrying");
                    attempt += 1;
                }
                result => return result,
            }
        }
    }

    fn definition<R: Rng>(&self, rng: &mut R) -> NewUser {
        let first = FIRST_NAMES.choose(rng).copied().unwrap_or("Alex");
        let last = LAST_NAMES.choose(rng).copied().unwrap_or("Doe");
        let domain = EMAIL_DOMAINS.choose(rng).copied().unwrap_or("example.com");
        let suffix = Uuid::new_v4().simple().to_string();

        NewUser {
            name: format!("{first} {last}"),
            email: format!(
                "{}.{}.{}@{}",
                first.to_lowercase(),
                last.to_lowercase(),
                &suffix[..8],
                domain
            ),
            role: ROLE_MEMBER.to_string(),
            email_verified_at: self.verified.then(Utc::now),
        }
    }
}
