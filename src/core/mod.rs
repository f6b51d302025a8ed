pub mod config;
pub mod error;
pub mod types;

pub use config::ValidatorConfig;
pub use error::{KerbsideError, Result};
