use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;

impl StorageError {
    pub fn is_unique_violation(&self) -> bool {
        self.has_sqlstate("23505")
    }

    pub fn is_check_violation(&self) -> bool {
        self.has_sqlstate("23514")
    }

    fn has_sqlstate(&self, state: &str) -> bool {
        matches!(
            self,
            StorageError::Database(sqlx::Error::Database(e))
                if e.code().as_deref() == Some(state)
        )
    }

    /// Turns constraint failures reported by Postgres into `ConstraintViolation`
    /// so the web layer can answer with a conflict instead of a 500.
    pub fn classify(self) -> Self {
        if self.is_check_violation() || self.is_unique_violation() {
            let message = match &self {
                StorageError::Database(sqlx::Error::Database(e)) => e
                    .constraint()
                    .map(|c| format!("{} violated", c))
                    .unwrap_or_else(|| e.message().to_string()),
                other => other.to_string(),
            };
            return StorageError::ConstraintViolation(message);
        }
        self
    }
}
