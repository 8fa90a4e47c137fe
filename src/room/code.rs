//! Join codes for private rooms.

use rand::Rng;

/// Join code length.
pub const JOIN_CODE_LENGTH: usize = 6;

/// Join code alphabet: `[A-Za-z0-9]`.
pub const JOIN_CODE_ALPHABET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Generate a join code, each symbol drawn uniformly from the alphabet.
///
/// Uniqueness is not guaranteed here; callers rely on the UNIQUE constraint
/// on `chat_rooms.code`.
pub fn generate_join_code() -> String {
    let mut rng = rand::rng();
    (0..JOIN_CODE_LENGTH)
        .map(|_| {
            let idx = rng.random_range(0..JOIN_CODE_ALPHABET.len());
            JOIN_CODE_ALPHABET[idx] as char
        })
        .collect()
}

/// Check that a string has the shape of a join code.
pub fn is_valid_join_code(code: &str) -> bool {
    code.len() == JOIN_CODE_LENGTH && code.bytes().all(|b| JOIN_CODE_ALPHABET.contains(&b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_alphabet() {
        assert_eq!(JOIN_CODE_ALPHABET.len(), 62);
        let unique: HashSet<_> = JOIN_CODE_ALPHABET.iter().collect();
        assert_eq!(unique.len(), 62);
    }

    #[test]
    fn test_generate_join_code_shape() {
        for _ in 0..100 {
            let code = generate_join_code();
            assert_eq!(code.len(), JOIN_CODE_LENGTH);
            assert!(is_valid_join_code(&code), "{code}");
        }
    }

    #[test]
    fn test_generated_codes_are_distinct() {
        let codes: HashSet<String> = (0..2000).map(|_| generate_join_code()).collect();
        // 62^6 possibilities, so a single collision in 2000 draws is rare
        assert!(codes.len() >= 1999);
    }

    #[test]
    fn test_is_valid_join_code() {
        assert!(is_valid_join_code("aB3xY9"));
        assert!(!is_valid_join_code("aB3xY"));
        assert!(!is_valid_join_code("aB3xY9z"));
        assert!(!is_valid_join_code("aB-xY9"));
        assert!(!is_valid_join_code("ääää"));
    }
}
