//! Input sanitizing and format checks for public forms
//!
//! Free-text fields are trimmed and HTML-escaped before they are stored,
//! so admin dashboards can render them without further escaping.

/// Trim and HTML-escape free text
pub fn sanitize_text(input: &str) -> String {
    escape_html(input.trim())
}

/// Trim, escape, and drop the value when nothing is left
pub fn sanitize_optional(input: Option<&str>) -> Option<String> {
    input
        .map(sanitize_text)
        .filter(|value| !value.is_empty())
}

/// Escape `& < > " ' /`
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '/' => out.push_str("&#x2F;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Malaysian mobile number: `^(\+?6?01)[0-46-9]-*[0-9]{7,8}$`
///
/// Accepts `012-3456789`, `0123456789`, `+60123456789`, `6011-12345678`.
pub fn is_valid_malaysian_phone(phone: &str) -> bool {
    let rest = phone.strip_prefix('+').unwrap_or(phone);
    let rest = rest.strip_prefix('6').unwrap_or(rest);
    let Some(rest) = rest.strip_prefix("01") else {
        return false;
    };

    let mut chars = rest.chars();
    match chars.next() {
        Some(c) if c.is_ascii_digit() && c != '5' => {}
        _ => return false,
    }

    let digits = chars.as_str().trim_start_matches('-');
    (7..=8).contains(&digits.len()) && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Basic email format check: one `@`, non-empty local part, dotted domain
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || local.len() > 64 || domain.contains('@') {
        return false;
    }

    if local.chars().any(char::is_whitespace) {
        return false;
    }

    if domain.is_empty() || !domain.contains('.') {
        return false;
    }

    if !domain
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
    {
        return false;
    }

    // Domain shouldn't start or end with dot or hyphen
    !(domain.starts_with('.')
        || domain.ends_with('.')
        || domain.starts_with('-')
        || domain.ends_with('-'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_trims_and_escapes() {
        assert_eq!(
            sanitize_text("  <script>alert('x')</script> "),
            "&lt;script&gt;alert(&#x27;x&#x27;)&lt;&#x2F;script&gt;"
        );
        assert_eq!(sanitize_text("Tom & Jerry"), "Tom &amp; Jerry");
        assert_eq!(sanitize_text("Ahmad bin Ali"), "Ahmad bin Ali");
    }

    #[test]
    fn test_sanitize_optional_drops_blank() {
        assert_eq!(sanitize_optional(None), None);
        assert_eq!(sanitize_optional(Some("   ")), None);
        assert_eq!(sanitize_optional(Some(" KL ")), Some("KL".to_string()));
    }

    #[test]
    fn test_valid_phones() {
        assert!(is_valid_malaysian_phone("012-3456789"));
        assert!(is_valid_malaysian_phone("0123456789"));
        assert!(is_valid_malaysian_phone("+60123456789"));
        assert!(is_valid_malaysian_phone("60123456789"));
        assert!(is_valid_malaysian_phone("011-12345678"));
        assert!(is_valid_malaysian_phone("019--1234567"));
    }

    #[test]
    fn test_invalid_phones() {
        assert!(!is_valid_malaysian_phone(""));
        assert!(!is_valid_malaysian_phone("0153456789"));
        assert!(!is_valid_malaysian_phone("012-345678"));
        assert!(!is_valid_malaysian_phone("012-345678901"));
        assert!(!is_valid_malaysian_phone("03-12345678"));
        assert!(!is_valid_malaysian_phone("012-34567a9"));
        assert!(!is_valid_malaysian_phone("+65123456789"));
    }

    #[test]
    fn test_email_format() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("user.name+tag@example.com.my"));
        assert!(!is_valid_email("userexample.com"));
        assert!(!is_valid_email("user@"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("user@@example.com"));
        assert!(!is_valid_email("user@example"));
        assert!(!is_valid_email("user@-example.com"));
    }
}
