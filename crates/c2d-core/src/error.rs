use thiserror::Error;

pub type Result<T> = std::result::Result<T, C2dError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum C2dError {
    /// A string did not name a member of a closed option set.
    #[error("Invalid {kind} \"{value}\". Expected one of {expected}.")]
    InvalidArgument {
        kind: &'static str,
        value: String,
        expected: &'static str,
    },

    /// Failure reported by the underlying drawing surface.
    #[error("Backend error: {0}")]
    Backend(String),
}

impl C2dError {
    pub(crate) fn invalid(kind: &'static str, value: &str, expected: &'static str) -> Self {
        Self::InvalidArgument {
            kind,
            value: value.to_string(),
            expected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_argument_message_names_value_and_options() {
        let err = C2dError::invalid("text align", "diagonal", r#""left", "right""#);
        let msg = err.to_string();
        assert!(msg.contains("\"diagonal\""), "{msg}");
        assert!(msg.contains(r#""left", "right""#), "{msg}");
    }
}
