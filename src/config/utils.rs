/// Treat blank values as unset.
///
/// An exported-but-empty variable (`GOOGLE_API_KEY=`) must not shadow a
/// fallback further down the chain.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Read an environment variable, treating blank values as unset.
pub fn env_var(name: &str) -> Option<String> {
    non_blank(std::env::var(name).ok())
}
