pub type Result<T> = std::result::Result<T, crate::error::Error>;

#[macro_export]
macro_rules! verify_arg {
    ($name:expr, $expr:expr) => {{
        let result = $expr;
        $crate::result::verify_arg(result, stringify!($name), stringify!($expr))?;
    }};
}

#[macro_export]
macro_rules! verify_descriptor {
    ($kind:expr, $expr:expr) => {{
        let result = $expr;
        $crate::result::verify_descriptor(result, $kind, stringify!($expr))?;
    }};
}

#[inline]
pub fn verify_arg(predicate: bool, name: &str, condition: &str) -> Result<()> {
    if predicate {
        Ok(())
    } else {
        invalid_arg(name, condition)
    }
}

#[inline]
pub fn verify_descriptor(predicate: bool, kind: &str, condition: &str) -> Result<()> {
    if predicate {
        Ok(())
    } else {
        invalid_descriptor(kind, condition)
    }
}

#[cold]
pub fn invalid_arg(name: &str, condition: &str) -> Result<()> {
    Err(crate::error::ErrorKind::InvalidArgument {
        name: name.to_string(),
        message: condition.to_string(),
    }
    .into())
}

#[cold]
pub fn invalid_descriptor(kind: &str, condition: &str) -> Result<()> {
    Err(crate::error::ErrorKind::InvalidDescriptor {
        kind: kind.to_string(),
        message: format!("expected {condition}"),
    }
    .into())
}

#[cfg(test)]
mod tests {
    use crate::error::ErrorKind;

    fn check_len(items: &[u32]) -> super::Result<()> {
        verify_arg!(items, !items.is_empty());
        Ok(())
    }

    fn check_field(name: &str) -> super::Result<()> {
        verify_descriptor!("field", !name.is_empty());
        Ok(())
    }

    #[test]
    fn test_verify_arg() {
        assert!(check_len(&[1]).is_ok());
        let err = check_len(&[]).unwrap_err();
        match err.kind() {
            ErrorKind::InvalidArgument { name, message } => {
                assert_eq!(name, "items");
                assert_eq!(message, "!items.is_empty()");
            }
            other => panic!("unexpected error kind: {other:?}"),
        }
    }

    #[test]
    fn test_verify_descriptor() {
        assert!(check_field("owner").is_ok());
        let err = check_field("").unwrap_err();
        assert!(matches!(
            err.kind(),
            ErrorKind::InvalidDescriptor { kind, .. } if kind == "field"
        ));
    }
}
