use std::fmt::Display;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} {key}")]
    NotFound { entity: &'static str, key: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Build a [`CoreError::NotFound`] for an entity looked up by id or slug.
    pub fn not_found(entity: &'static str, key: impl Display) -> Self {
        Self::NotFound {
            entity,
            key: key.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_formats_key() {
        let err = CoreError::not_found("Blog", "budget-2025");
        assert_eq!(err.to_string(), "Entity not found: Blog budget-2025");
    }

    #[test]
    fn not_found_accepts_numeric_ids() {
        let err = CoreError::not_found("Bill", 42);
        assert!(matches!(err, CoreError::NotFound { key, .. } if key == "42"));
    }
}
