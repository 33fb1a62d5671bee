use datecoach_core::CoachError;

const MAX_KEY_LEN: usize = 512;

pub fn validate_key(key: &str) -> Result<&str, CoachError> {
    if key.is_empty() {
        return Err(CoachError::InvalidInput("redis key must not be empty".to_string()));
    }

    if key.len() > MAX_KEY_LEN {
        return Err(CoachError::InvalidInput(format!(
            "redis key longer than {MAX_KEY_LEN} bytes"
        )));
    }

    if key
        .chars()
        .any(|c| matches!(c, '{' | '}' | '*' | '?' | '\n' | '\r'))
    {
        return Err(CoachError::InvalidInput(format!(
            "key contains characters invalid in Redis keys: {key:?}"
        )));
    }

    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::validate_key;

    #[test]
    fn accepts_limiter_and_cache_keys() {
        assert!(validate_key("ratelimit:chatbot:203.0.113.7").is_ok());
        assert!(validate_key("ratelimit:api:2001:db8::1").is_ok());
        assert!(validate_key("ai-cache:0badf00d").is_ok());
    }

    #[test]
    fn rejects_empty_and_glob_characters() {
        assert!(validate_key("").is_err());
        assert!(validate_key("ratelimit:*").is_err());
        assert!(validate_key("a{b}").is_err());
        assert!(validate_key("line\nbreak").is_err());
        assert!(validate_key(&"x".repeat(600)).is_err());
    }
}
