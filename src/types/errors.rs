use crate::services::crush::CrushError;
use crate::services::interest::InterestError;
use crate::services::matching::MatchingError;
use crate::services::message::MessageError;
use crate::services::survey::SurveyError;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Database error: {0}")]
    Database(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("{0}")]
    Precondition(String),
    #[error("Access denied: {0}")]
    Forbidden(String),
    #[error("{0}")]
    Busy(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sqlx::Error> for CommandError {
    fn from(error: sqlx::Error) -> Self {
        CommandError::Database(error.to_string())
    }
}

impl From<MatchingError> for CommandError {
    fn from(error: MatchingError) -> Self {
        match error {
            MatchingError::Scoring(_) => CommandError::Internal(error.to_string()),
            _ => CommandError::Database(error.to_string()),
        }
    }
}

impl From<CrushError> for CommandError {
    fn from(error: CrushError) -> Self {
        match error {
            CrushError::TooMany { .. } => CommandError::Validation(error.to_string()),
            CrushError::UserNotFound(id) => CommandError::NotFound(format!("user {id}")),
            CrushError::Database(e) => e.into(),
        }
    }
}

impl From<SurveyError> for CommandError {
    fn from(error: SurveyError) -> Self {
        match error {
            SurveyError::QuestionNotFound(id) => CommandError::NotFound(format!("question {id}")),
            SurveyError::UserNotFound(id) => CommandError::NotFound(format!("user {id}")),
            SurveyError::Incomplete { .. } => CommandError::Precondition(error.to_string()),
            SurveyError::Database(e) => e.into(),
        }
    }
}

impl From<InterestError> for CommandError {
    fn from(error: InterestError) -> Self {
        match error {
            InterestError::NotFound(id) => CommandError::NotFound(format!("match {id}")),
            InterestError::Forbidden { .. } => CommandError::Forbidden(error.to_string()),
            InterestError::Database(e) => e.into(),
        }
    }
}

impl From<MessageError> for CommandError {
    fn from(error: MessageError) -> Self {
        match error {
            MessageError::NotFound(id) => CommandError::NotFound(format!("match {id}")),
            MessageError::Forbidden { .. } => CommandError::Forbidden(error.to_string()),
            MessageError::Locked(_) => CommandError::Precondition(error.to_string()),
            MessageError::EmptyContent => CommandError::Validation(error.to_string()),
            MessageError::Database(e) => e.into(),
        }
    }
}

impl Serialize for CommandError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.to_string().as_ref())
    }
}

pub type CommandResult<T> = Result<T, CommandError>;

#[cfg(test)]
#[path = "tests/errors_tests.rs"]
mod tests;
