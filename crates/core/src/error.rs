use crate::types::DbId;

/// Domain-level failures shared by the store, source and HTTP layers.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("No board found today for difficulty {difficulty}")]
    NoBoardToday { difficulty: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Board not solved")]
    NotSolved,

    #[error("No hint available")]
    NoHintAvailable,

    #[error("Puzzle source unavailable: {0}")]
    SourceUnavailable(String),
}
