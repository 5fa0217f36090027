//! Request validation, run before any store operation.

use mediachat_types::error::SessionError;

/// Reject `value` if it is empty or whitespace-only.
///
/// `field` names the offending input in the error message.
pub fn ensure_present(field: &str, value: &str) -> Result<(), SessionError> {
    if value.trim().is_empty() {
        return Err(SessionError::InvalidRequest(format!("{field} is required")));
    }
    Ok(())
}

/// Like [`ensure_present`], returning the trimmed value.
pub fn require_non_empty(field: &str, value: &str) -> Result<String, SessionError> {
    ensure_present(field, value)?;
    Ok(value.trim().to_string())
}

/// Validate the inputs of a session creation: `(title, owner_name)`.
pub fn validate_new_session(
    title: &str,
    owner_name: &str,
) -> Result<(String, String), SessionError> {
    let title = require_non_empty("title", title)?;
    let owner_name = require_non_empty("userName", owner_name)?;
    Ok((title, owner_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_non_empty_trims() {
        assert_eq!(require_non_empty("title", "  Hello ").unwrap(), "Hello");
    }

    #[test]
    fn test_ensure_present_rejects_blank() {
        for value in ["", "   ", "\n\t"] {
            let err = ensure_present("prompt", value).unwrap_err();
            match err {
                SessionError::InvalidRequest(msg) => assert_eq!(msg, "prompt is required"),
                other => panic!("unexpected: {other:?}"),
            }
        }
    }

    #[test]
    fn test_validate_new_session_reports_first_missing_field() {
        let err = validate_new_session("", "").unwrap_err();
        assert!(err.to_string().contains("title"));

        let err = validate_new_session("Hello", " ").unwrap_err();
        assert!(err.to_string().contains("userName"));

        let (title, name) = validate_new_session("Hello", "Ann").unwrap();
        assert_eq!((title.as_str(), name.as_str()), ("Hello", "Ann"));
    }
}
