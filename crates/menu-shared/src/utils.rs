//! Utility functions

/// Lowercases and trims a locale tag, `" EN "` becomes `"en"`.
pub fn normalize_locale(locale: &str) -> String {
    locale.trim().to_ascii_lowercase()
}

/// Trims whitespace and a trailing slash, keeping a lone `/` intact.
pub fn normalize_uri(uri: &str) -> String {
    let trimmed = uri.trim();
    if trimmed.len() > 1 {
        trimmed.trim_end_matches('/').to_string()
    } else {
        trimmed.to_string()
    }
}
