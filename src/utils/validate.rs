use once_cell::sync::Lazy;
use regex::Regex;

static IDENTIFIER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]{1,64}$").expect("Invalid identifier regex"));

/// 校验项目、学生、评阅人等标识符
pub fn validate_identifier(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{field} is required"));
    }
    // 只能包含字母、数字、下划线或连字符，最长 64 个字符
    if !IDENTIFIER_RE.is_match(value) {
        return Err(format!(
            "{field} must be 1-64 letters, numbers, underscores or hyphens"
        ));
    }
    Ok(())
}

/// 校验必填文本字段
pub fn validate_required_text(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("{field} is required"))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_identifiers() {
        assert!(validate_identifier("projectId", "proj-2026_01").is_ok());
        assert!(validate_identifier("markerId", "a").is_ok());
        assert!(validate_identifier("studentId", &"x".repeat(64)).is_ok());
    }

    #[test]
    fn test_invalid_identifiers() {
        assert!(validate_identifier("projectId", "").is_err());
        assert!(validate_identifier("projectId", "   ").is_err());
        assert!(validate_identifier("projectId", "a/b").is_err());
        assert!(validate_identifier("projectId", &"x".repeat(65)).is_err());
        let err = validate_identifier("markerId", "bad id").unwrap_err();
        assert!(err.contains("markerId"));
    }

    #[test]
    fn test_required_text() {
        assert!(validate_required_text("justification", "fine").is_ok());
        assert!(validate_required_text("justification", " \n").is_err());
    }
}
