use rand::Rng;

const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ\
                         abcdefghijklmnopqrstuvwxyz\
                         0123456789";

/// Generates a random alphanumeric string of the given length.
///
/// Used for refresh token ids and the random suffix of stored file names.
///
/// # Arguments
/// - `length` - Number of characters to generate
///
/// # Returns
/// - `String` - Random string over `[A-Za-z0-9]`
pub fn generate_random_code(length: usize) -> String {
    let mut rng = rand::rng();

    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_requested_length() {
        assert_eq!(generate_random_code(8).len(), 8);
        assert_eq!(generate_random_code(32).len(), 32);
    }

    #[test]
    fn generates_only_alphanumeric_characters() {
        let code = generate_random_code(64);
        assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn generates_different_codes() {
        assert_ne!(generate_random_code(32), generate_random_code(32));
    }
}
