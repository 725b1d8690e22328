//! Field-level validators for card and lead input.

/// RFC-lite email check: one `@`, non-empty local part, dotted domain,
/// no whitespace. Deliberately permissive about the local part.
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    if email.is_empty() || email.contains(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }

    // Domain must be dotted with non-empty labels.
    domain.contains('.') && domain.split('.').all(|label| !label.is_empty())
}

/// Hex color string: `#RGB` or `#RRGGBB`.
pub fn is_valid_hex_color(color: &str) -> bool {
    let Some(digits) = color.strip_prefix('#') else {
        return false;
    };

    matches!(digits.len(), 3 | 6) && digits.chars().all(|c| c.is_ascii_hexdigit())
}
