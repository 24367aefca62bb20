//! Pool address processing logic.
//!
//! - [`validate`] - configuration checks, first failure wins
//! - [`derive`] - site hextet embedding and pool subnet formatting

mod derive;
mod validate;

// Re-export public functions
pub use derive::derive;
pub use validate::{
    validate, validate_with, ValidatedConfig, ValidationError, ValidationPolicy, MAX_POOL_NAME_LEN,
    MAX_PREFIX_SIZE, MIN_POOL_SIZE,
};
