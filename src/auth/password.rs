//! Credential vault: turns a clear-text password into a storable secret and
//! checks candidate passwords against it.
//!
//! The stored secret is built in three layers:
//! 1. SHA-512 digest of the password, base64-encoded. Normalizes input length
//!    ahead of bcrypt's 72-byte limit.
//! 2. bcrypt over the digest (cost 10), the brute-force deterrent.
//! 3. AES-256-CTR encryption of the bcrypt string under a static server key
//!    with a fresh random 16-byte IV per call.
//!
//! On disk the secret is `<base64 ciphertext>$<base64 IV>`. The IV is not a
//! secret and lives next to the ciphertext.

use aes::cipher::{KeyIvInit, StreamCipher};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha512};

use crate::error::AppError;

type Aes256Ctr = ctr::Ctr128BE<aes::Aes256>;

const BCRYPT_COST: u32 = 10;
const IV_LEN: usize = 16;
const SECRET_DELIMITER: char = '$';

fn sha512_base64(input: &str) -> String {
    let mut hasher = Sha512::new();
    hasher.update(input.as_bytes());
    BASE64.encode(hasher.finalize())
}

/// Password protection engine holding the static AES-256 key.
///
/// Constructed once at startup from configuration and shared across requests;
/// both operations are CPU-bound and deliberately slow, so callers run them on
/// the blocking pool.
#[derive(Clone)]
pub struct PasswordVault {
    key: [u8; 32],
}

impl PasswordVault {
    /// Creates a vault from the configured key material, which must be exactly
    /// 32 bytes (AES-256).
    pub fn new(key: &str) -> Result<Self, AppError> {
        let bytes = key.as_bytes();
        if bytes.len() != 32 {
            return Err(AppError::InternalServerError(format!(
                "password encryption key must be exactly 32 bytes, got {}",
                bytes.len()
            )));
        }
        let mut key = [0u8; 32];
        key.copy_from_slice(bytes);
        Ok(Self { key })
    }

    /// Transforms a clear-text password into a storable secret.
    ///
    /// Two calls on the same password yield different secrets: bcrypt salts
    /// the digest and the CTR layer uses a fresh IV every time.
    pub fn protect(&self, clear_password: &str) -> Result<String, AppError> {
        let digest = sha512_base64(clear_password);
        let hash = bcrypt::hash(digest, BCRYPT_COST)?;
        Ok(self.encrypt(&hash))
    }

    /// Compares a candidate password against a stored secret.
    ///
    /// An absent secret and a structurally broken one (missing delimiter, bad
    /// base64, wrong IV length, ciphertext that does not decrypt to a bcrypt
    /// hash) all verify as `false`; this never distinguishes "no password" from
    /// "wrong password". The final comparison is bcrypt's constant-time check.
    pub fn verify(
        &self,
        clear_password: &str,
        stored_secret: Option<&str>,
    ) -> Result<bool, AppError> {
        let stored = match stored_secret {
            Some(s) => s,
            None => return Ok(false),
        };

        let hash = match self.decrypt(stored) {
            Some(h) => h,
            None => return Ok(false),
        };

        // A wrong key or tampered ciphertext decrypts to garbage rather than
        // a bcrypt hash; treat that as a failed match, not a crash.
        if !hash.starts_with("$2") {
            return Ok(false);
        }

        let digest = sha512_base64(clear_password);
        Ok(bcrypt::verify(digest, &hash)?)
    }

    fn encrypt(&self, plaintext: &str) -> String {
        let mut iv = [0u8; IV_LEN];
        OsRng.fill_bytes(&mut iv);

        let mut buf = plaintext.as_bytes().to_vec();
        let mut cipher = Aes256Ctr::new(&self.key.into(), &iv.into());
        cipher.apply_keystream(&mut buf);

        format!(
            "{}{}{}",
            BASE64.encode(&buf),
            SECRET_DELIMITER,
            BASE64.encode(iv)
        )
    }

    fn decrypt(&self, stored: &str) -> Option<String> {
        let (ciphertext_b64, iv_b64) = stored.split_once(SECRET_DELIMITER)?;

        let mut buf = BASE64.decode(ciphertext_b64).ok()?;
        let iv: [u8; IV_LEN] = BASE64.decode(iv_b64).ok()?.try_into().ok()?;

        let mut cipher = Aes256Ctr::new(&self.key.into(), &iv.into());
        cipher.apply_keystream(&mut buf);

        String::from_utf8(buf).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_KEY: &str = "0123456789abcdef0123456789abcdef";

    fn vault() -> PasswordVault {
        PasswordVault::new(TEST_KEY).unwrap()
    }

    #[test]
    fn test_key_must_be_32_bytes() {
        assert!(PasswordVault::new("too-short").is_err());
        assert!(PasswordVault::new(TEST_KEY).is_ok());
    }

    #[test]
    fn test_protect_and_verify_roundtrip() {
        let vault = vault();
        let secret = vault.protect("123456").unwrap();

        assert!(vault.verify("123456", Some(&secret)).unwrap());
        assert!(!vault.verify("wrong_password", Some(&secret)).unwrap());
    }

    #[test]
    fn test_protect_is_nondeterministic() {
        let vault = vault();
        let first = vault.protect("same password").unwrap();
        let second = vault.protect("same password").unwrap();

        assert_ne!(first, second);
        // Both still verify.
        assert!(vault.verify("same password", Some(&first)).unwrap());
        assert!(vault.verify("same password", Some(&second)).unwrap());
    }

    #[test]
    fn test_stored_secret_format() {
        let vault = vault();
        let secret = vault.protect("hunter2!").unwrap();

        let (ciphertext, iv) = secret.split_once('$').unwrap();
        assert!(BASE64.decode(ciphertext).is_ok());
        assert_eq!(BASE64.decode(iv).unwrap().len(), IV_LEN);
    }

    #[test]
    fn test_verify_with_absent_secret() {
        let vault = vault();
        assert!(!vault.verify("any password", None).unwrap());
    }

    #[test]
    fn test_verify_with_malformed_secrets() {
        let vault = vault();

        // No delimiter, invalid base64, and a truncated IV must all reject
        // without erroring.
        assert!(!vault.verify("pw", Some("no-delimiter-here")).unwrap());
        assert!(!vault.verify("pw", Some("!!!not-base64$also-not")).unwrap());
        let short_iv = format!("{}${}", BASE64.encode(b"data"), BASE64.encode(b"short"));
        assert!(!vault.verify("pw", Some(&short_iv)).unwrap());
    }

    #[test]
    fn test_verify_with_wrong_key_rejects() {
        let secret = vault().protect("123456").unwrap();

        let other = PasswordVault::new("ffffffffffffffffffffffffffffffff").unwrap();
        assert!(!other.verify("123456", Some(&secret)).unwrap());
    }

    #[test]
    fn test_decrypt_recovers_bcrypt_hash() {
        let vault = vault();
        let secret = vault.protect("123456").unwrap();

        let hash = vault.decrypt(&secret).unwrap();
        assert!(hash.starts_with("$2"));
        assert!(bcrypt::verify(sha512_base64("123456"), &hash).unwrap());
    }
}
