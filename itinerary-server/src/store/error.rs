//! Itinerary store error types.

/// Errors from the itinerary store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed
    #[error("store I/O error: {message}")]
    Io { message: String },

    /// The backing file could not be (de)serialized
    #[error("store JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl StoreError {
    pub(crate) fn io(context: &str, err: std::io::Error) -> Self {
        StoreError::Io {
            message: format!("{context}: {err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = StoreError::io(
            "failed to write store file",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(
            err.to_string(),
            "store I/O error: failed to write store file: denied"
        );
    }
}
