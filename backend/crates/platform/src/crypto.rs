//! Cryptographic Utilities

use base64::{Engine, engine::general_purpose};
use rand::{RngCore, rngs::OsRng};

/// Generate a random 32-byte key
pub fn random_key() -> [u8; 32] {
    let mut key = [0u8; 32];
    OsRng.fill_bytes(&mut key);
    key
}

/// Encode bytes as base64
pub fn to_base64(bytes: &[u8]) -> String {
    general_purpose::STANDARD.encode(bytes)
}

/// Decode base64 to bytes
pub fn from_base64(s: &str) -> Result<Vec<u8>, base64::DecodeError> {
    general_purpose::STANDARD.decode(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_key() {
        let key = random_key();
        // Should not be all zeros (statistically)
        assert!(key.iter().any(|&b| b != 0));
        assert_ne!(key, random_key());
    }

    #[test]
    fn test_base64_roundtrip() {
        let data = b"hello world";
        assert_eq!(from_base64(&to_base64(data)).unwrap(), data);
    }
}
