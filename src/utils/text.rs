pub fn truncate_utf8_prefix(value: &str, max_bytes: usize) -> String {
    if max_bytes == 0 {
        return String::new();
    }
    if value.len() <= max_bytes {
        return value.to_string();
    }
    let mut end = max_bytes;
    while end > 0 && !value.is_char_boundary(end) {
        end -= 1;
    }
    value[..end].to_string()
}

/// Strips one leading expression marker, e.g. `=/v2/self` -> `/v2/self`.
pub fn strip_expression_prefix(value: &str, marker: char) -> &str {
    value.strip_prefix(marker).unwrap_or(value)
}

pub fn has_url_scheme(value: &str) -> bool {
    let Some((scheme, _)) = value.split_once("://") else {
        return false;
    };
    let mut chars = scheme.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

pub fn join_origin(origin: &str, path: &str) -> String {
    let origin = origin.trim_end_matches('/');
    if path.is_empty() {
        return origin.to_string();
    }
    if path.starts_with('/') {
        format!("{}{}", origin, path)
    } else {
        format!("{}/{}", origin, path)
    }
}
