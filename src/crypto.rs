//! Encryption Codec
//!
//! AES-GCM sealing of opaque byte blobs. A sealed envelope is the random
//! nonce followed by the ciphertext and its authentication tag:
//!
//! ```text
//! [NONCE(12)][CIPHERTEXT(N)][TAG(16)]
//! ```
//!
//! Keys of 16, 24 or 32 bytes select AES-128, AES-192 or AES-256. No
//! associated data is authenticated.

use aes_gcm::aead::consts::U12;
use aes_gcm::aead::generic_array::typenum::Unsigned;
use aes_gcm::aead::{Aead, AeadCore, KeyInit, OsRng};
use aes_gcm::aes::Aes192;
use aes_gcm::{Aes128Gcm, Aes256Gcm, AesGcm, Nonce};

use crate::error::{CacheError, Result};

type Aes192Gcm = AesGcm<Aes192, U12>;

/// Nonce length shared by every supported key size.
pub const NONCE_SIZE: usize = <Aes256Gcm as AeadCore>::NonceSize::USIZE;

/// Key lengths accepted by `seal` and `open`.
pub const KEY_SIZES: [usize; 3] = [16, 24, 32];

enum Cipher {
    Aes128(Aes128Gcm),
    Aes192(Aes192Gcm),
    Aes256(Aes256Gcm),
}

impl Cipher {
    fn new(key: &[u8]) -> Result<Self> {
        let cipher = match key.len() {
            16 => Aes128Gcm::new_from_slice(key).map(Cipher::Aes128),
            24 => Aes192Gcm::new_from_slice(key).map(Cipher::Aes192),
            32 => Aes256Gcm::new_from_slice(key).map(Cipher::Aes256),
            len => return Err(invalid_key_length(len)),
        };
        cipher.map_err(|_| invalid_key_length(key.len()))
    }

    fn encrypt(&self, nonce: &Nonce<U12>, plaintext: &[u8]) -> aes_gcm::aead::Result<Vec<u8>> {
        match self {
            Cipher::Aes128(c) => c.encrypt(nonce, plaintext),
            Cipher::Aes192(c) => c.encrypt(nonce, plaintext),
            Cipher::Aes256(c) => c.encrypt(nonce, plaintext),
        }
    }

    fn decrypt(&self, nonce: &Nonce<U12>, ciphertext: &[u8]) -> aes_gcm::aead::Result<Vec<u8>> {
        match self {
            Cipher::Aes128(c) => c.decrypt(nonce, ciphertext),
            Cipher::Aes192(c) => c.decrypt(nonce, ciphertext),
            Cipher::Aes256(c) => c.decrypt(nonce, ciphertext),
        }
    }
}

fn invalid_key_length(len: usize) -> CacheError {
    CacheError::InvalidEncryptionKey(format!(
        "key is {len} bytes, expected one of {KEY_SIZES:?}"
    ))
}

/// Checks that `key` selects a supported cipher.
pub fn validate_key(key: &[u8]) -> Result<()> {
    Cipher::new(key).map(|_| ())
}

// == Seal ==
/// Encrypts `plaintext` under `key` with a fresh random nonce.
///
/// Returns `nonce || ciphertext`.
pub fn seal(key: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
    let cipher = Cipher::new(key)?;
    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
    let ciphertext = cipher
        .encrypt(&nonce, plaintext)
        .map_err(|_| CacheError::Encryption)?;

    let mut sealed = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
    sealed.extend_from_slice(&nonce);
    sealed.extend_from_slice(&ciphertext);
    Ok(sealed)
}

// == Open ==
/// Authenticates and decrypts an envelope produced by `seal`.
///
/// Inputs shorter than one nonce, tampered data and wrong keys all fail
/// with `CacheError::Authentication`.
pub fn open(key: &[u8], sealed: &[u8]) -> Result<Vec<u8>> {
    let cipher = Cipher::new(key)?;
    if sealed.len() < NONCE_SIZE {
        return Err(CacheError::Authentication);
    }
    let (nonce, ciphertext) = sealed.split_at(NONCE_SIZE);
    cipher
        .decrypt(Nonce::from_slice(nonce), ciphertext)
        .map_err(|_| CacheError::Authentication)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_all_key_sizes() {
        for size in KEY_SIZES {
            let key = vec![7u8; size];
            let sealed = seal(&key, b"secret document").unwrap();
            assert_eq!(open(&key, &sealed).unwrap(), b"secret document");
        }
    }

    #[test]
    fn test_envelope_layout() {
        let key = [1u8; 32];
        let sealed = seal(&key, b"abc").unwrap();
        // nonce + plaintext + 16-byte tag
        assert_eq!(sealed.len(), NONCE_SIZE + 3 + 16);
    }

    #[test]
    fn test_fresh_nonce_per_seal() {
        let key = [1u8; 16];
        let first = seal(&key, b"same").unwrap();
        let second = seal(&key, b"same").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_invalid_key_length() {
        let result = seal(&[0u8; 20], b"data");
        assert!(matches!(result, Err(CacheError::InvalidEncryptionKey(_))));
        let result = open(&[0u8; 0], b"data");
        assert!(matches!(result, Err(CacheError::InvalidEncryptionKey(_))));
        assert!(validate_key(&[0u8; 24]).is_ok());
    }

    #[test]
    fn test_short_input_fails_authentication() {
        let result = open(&[0u8; 16], &[0u8; NONCE_SIZE - 1]);
        assert!(matches!(result, Err(CacheError::Authentication)));
    }

    #[test]
    fn test_wrong_key_fails_authentication() {
        let sealed = seal(&[1u8; 32], b"data").unwrap();
        let result = open(&[2u8; 32], &sealed);
        assert!(matches!(result, Err(CacheError::Authentication)));
    }

    #[test]
    fn test_tampering_fails_authentication() {
        let key = [9u8; 24];
        let sealed = seal(&key, b"payload").unwrap();
        for i in 0..sealed.len() {
            let mut tampered = sealed.clone();
            tampered[i] ^= 0x01;
            assert!(matches!(open(&key, &tampered), Err(CacheError::Authentication)));
        }
    }
}
