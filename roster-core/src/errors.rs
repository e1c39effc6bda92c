use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RosterError {
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Missing fields")]
    MissingFields,
}

pub type RosterResult<T> = Result<T, RosterError>;

impl From<serde_json::Error> for RosterError {
    fn from(err: serde_json::Error) -> Self {
        RosterError::InvalidBody(err.to_string())
    }
}
