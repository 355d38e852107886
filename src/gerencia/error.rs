use thiserror::Error;

#[derive(Error, Debug)]
pub enum GerenciaError {
    #[error("{collection} entry not found: {id}")]
    NotFound { collection: &'static str, id: String },

    #[error("Email already registered: {0}")]
    DuplicateEmail(String),

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Invalid field: {0}")]
    InvalidField(String),

    #[error("Not logged in (run `gerencia login` first)")]
    NotLoggedIn,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl GerenciaError {
    pub fn not_found(collection: &'static str, id: impl Into<String>) -> Self {
        GerenciaError::NotFound {
            collection,
            id: id.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, GerenciaError>;
