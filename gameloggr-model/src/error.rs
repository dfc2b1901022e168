use thiserror::Error;

/// Collection rule violations.
#[derive(Debug, Error, PartialEq)]
pub enum ModelError {
    #[error(
        "Not enough storage on '{hardware}': {required_gb:.2} GB needed, {available_gb:.2} GB available"
    )]
    InsufficientStorage {
        hardware: String,
        required_gb: f64,
        available_gb: f64,
    },

    #[error(
        "'{hardware}' holds {used_gb:.2} GB of installed games; {capacity_gb:.2} GB is too small"
    )]
    StorageOverCommitted {
        hardware: String,
        used_gb: f64,
        capacity_gb: f64,
    },

    #[error("Cannot complete collection '{title}': {remaining} sub-game(s) not completed")]
    IncompleteCollection { title: String, remaining: usize },

    #[error("A game cannot be a sub-game of itself")]
    SelfParent,

    #[error("Star rating must be between 0 and 5, got {0}")]
    InvalidRating(f64),
}
