use thiserror::Error;

use crate::core::types::{ObjectClass, ObjectId};

#[derive(Error, Debug)]
pub enum KerbsideError {
    #[error("Object not found: {0}")]
    ObjectNotFound(ObjectId),

    #[error("Patch class {patch} does not match object class {actual} for {id}")]
    PatchClassMismatch {
        id: ObjectId,
        actual: ObjectClass,
        patch: ObjectClass,
    },

    #[error("A drawing is already in progress")]
    DrawingInProgress,

    #[error("No drawing in progress")]
    NotDrawing,

    #[error("Rule file parse error: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, KerbsideError>;
