use thiserror::Error;

#[derive(Debug, Error)]
#[error(transparent)]
pub struct Error(Box<ErrorKind>);

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        self.0.as_ref()
    }

    pub fn into_kind(self) -> ErrorKind {
        *self.0
    }

    pub fn invalid_arg(name: impl Into<String>, message: impl Into<String>) -> Error {
        Error(
            ErrorKind::InvalidArgument {
                name: name.into(),
                message: message.into(),
            }
            .into(),
        )
    }

    pub fn invalid_key_source(kind: impl Into<String>) -> Error {
        Error(ErrorKind::InvalidKeySource { kind: kind.into() }.into())
    }

    pub fn invalid_descriptor(kind: impl Into<String>, message: impl Into<String>) -> Error {
        Error(
            ErrorKind::InvalidDescriptor {
                kind: kind.into(),
                message: message.into(),
            }
            .into(),
        )
    }

    /// Lookup failure for an index name; `available` lists every valid name.
    pub fn unknown_index<I, S>(name: impl Into<String>, available: I) -> Error
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Error(
            ErrorKind::UnknownIndex {
                name: name.into(),
                available: available.into_iter().map(Into::into).collect(),
            }
            .into(),
        )
    }

    pub fn unknown_function<I, S>(name: impl Into<String>, available: I) -> Error
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Error(
            ErrorKind::UnknownFunction {
                name: name.into(),
                available: available.into_iter().map(Into::into).collect(),
            }
            .into(),
        )
    }
}

#[derive(Debug, Error)]
pub enum ErrorKind {
    #[error("invalid argument {name}: {message}")]
    InvalidArgument { name: String, message: String },

    #[error(
        "index type `{kind}` not supported by multi_bucket - must be a field name or a function"
    )]
    InvalidKeySource { kind: String },

    #[error("invalid index descriptor of type `{kind}`: {message}")]
    InvalidDescriptor { kind: String, message: String },

    #[error(
        "indexed selector `{name}` not found on table. Available indices are [{}]",
        available.join(", ")
    )]
    UnknownIndex { name: String, available: Vec<String> },

    #[error(
        "function `{name}` is not registered. Registered functions are [{}]",
        available.join(", ")
    )]
    UnknownFunction { name: String, available: Vec<String> },
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error(kind.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_index_lists_alternatives() {
        let err = Error::unknown_index("missing", ["by_owner", "by_tag"]);
        let message = err.to_string();
        assert!(message.contains("`missing`"));
        assert!(message.contains("[by_owner, by_tag]"));
        match err.into_kind() {
            ErrorKind::UnknownIndex { name, available } => {
                assert_eq!(name, "missing");
                assert_eq!(available, vec!["by_owner", "by_tag"]);
            }
            other => panic!("unexpected error kind: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_key_source_names_type() {
        let err = Error::invalid_key_source("number");
        assert!(err.to_string().contains("`number`"));
        assert!(matches!(err.kind(), ErrorKind::InvalidKeySource { .. }));
    }
}
