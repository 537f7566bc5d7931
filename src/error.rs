use std::path::PathBuf;

use crate::secret::CODE_LENGTH;

/// Reasons a candidate guess is rejected before it reaches the session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GuessError {
    #[error("guess must be exactly {expected} digits, got {found} characters", expected = CODE_LENGTH)]
    Length { found: usize },

    #[error("guess may only contain digits 0-9, found '{0}'")]
    NonDigit(char),
}

/// Errors raised when parsing a secret from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SecretError {
    #[error("secret must be exactly {expected} digits, got {found} characters", expected = CODE_LENGTH)]
    Length { found: usize },

    #[error("secret may only contain digits 0-9, found '{0}'")]
    NonDigit(char),

    #[error("secret digits must be unique, '{0}' appears more than once")]
    RepeatedDigit(char),
}

/// Rejections returned by `GameController::submit_guess`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    #[error(transparent)]
    Malformed(#[from] GuessError),

    #[error("this game is already over, start a new one")]
    GameOver,
}

/// Errors from persisting the best score.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to write best score to {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}
