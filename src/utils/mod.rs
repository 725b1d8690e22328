pub mod password;
pub mod url_validator;
pub mod validators;

/// Generate a random alphanumeric slug of the given length.
pub fn generate_slug(length: usize) -> String {
    use std::iter;

    let chars = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

    iter::repeat_with(|| chars[rand::random_range(0..chars.len())] as char)
        .take(length)
        .collect()
}
