use thiserror::Error;

const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";

#[derive(Error, Debug)]
pub enum Error {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("environment error: {0}")]
    Env(#[from] envy::Error),
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    fn sqlstate(&self) -> Option<String> {
        match self {
            Error::Database(sqlx::Error::Database(db)) => db.code().map(|code| code.into_owned()),
            _ => None,
        }
    }

    /// Name of the violated constraint, when the server reported one
    pub fn constraint(&self) -> Option<&str> {
        match self {
            Error::Database(sqlx::Error::Database(db)) => db.constraint(),
            _ => None,
        }
    }

    /// Duplicate email or phone number
    pub fn is_unique_violation(&self) -> bool {
        self.sqlstate().as_deref() == Some(UNIQUE_VIOLATION)
    }

    /// Phone row pointing at a client that does not exist
    pub fn is_foreign_key_violation(&self) -> bool {
        self.sqlstate().as_deref() == Some(FOREIGN_KEY_VIOLATION)
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_database_errors_are_not_classified() {
        let err = Error::Config("missing user".to_string());
        assert!(!err.is_unique_violation());
        assert!(!err.is_foreign_key_violation());
        assert!(err.constraint().is_none());

        let err = Error::from(sqlx::Error::RowNotFound);
        assert!(!err.is_unique_violation());
        assert!(err.constraint().is_none());
    }

    #[test]
    fn display_keeps_driver_message() {
        let err = Error::from(sqlx::Error::RowNotFound);
        assert!(err.to_string().starts_with("database error: "));
        assert!(err.to_string().contains(&sqlx::Error::RowNotFound.to_string()));
    }
}
