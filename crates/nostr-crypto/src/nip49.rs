//! NIP-49: password-encrypted private keys (scrypt + HChaCha20-derived
//! ChaCha20-Poly1305), bech32-wrapped with HRP `ncryptsec` (C12).

use chacha20poly1305::aead::{Aead, KeyInit, Payload};
use chacha20poly1305::{ChaCha20Poly1305, Nonce as Poly1305Nonce};

use nostr_types::codec::bech32;
use nostr_types::SecretKey;

use crate::adapter;
use crate::error::CryptoError;

const VERSION: u8 = 0x02;
const HRP: &str = "ncryptsec";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySecurity {
    Insecure,
    Secure,
    Unknown,
}

impl KeySecurity {
    fn to_byte(self) -> u8 {
        match self {
            KeySecurity::Insecure => 0x00,
            KeySecurity::Secure => 0x01,
            KeySecurity::Unknown => 0x02,
        }
    }

    fn from_byte(b: u8) -> Self {
        match b {
            0x00 => KeySecurity::Insecure,
            0x01 => KeySecurity::Secure,
            _ => KeySecurity::Unknown,
        }
    }
}

/// Encrypts `seckey` under `password`, producing an `ncryptsec1...` string.
pub fn encrypt(
    seckey: &SecretKey,
    password: &str,
    log_n: u8,
    key_security: KeySecurity,
) -> Result<String, CryptoError> {
    if !(1..=22).contains(&log_n) {
        return Err(CryptoError::InvalidLogN);
    }
    let salt = adapter::random_bytes(16);
    let derived = adapter::scrypt_derive(password, &salt, log_n)?;

    let nonce = adapter::random_bytes(24);
    let (prefix, suffix) = nonce.split_at(16);
    let prefix16: [u8; 16] = prefix.try_into().expect("16 bytes");
    let subkey = adapter::hchacha20(&derived, &prefix16);

    let mut poly_nonce = [0u8; 12];
    poly_nonce[4..].copy_from_slice(suffix);

    let aad = [key_security.to_byte()];
    let cipher = ChaCha20Poly1305::new((&subkey).into());
    let ciphertext = cipher
        .encrypt(
            Poly1305Nonce::from_slice(&poly_nonce),
            Payload {
                msg: seckey.as_bytes(),
                aad: &aad,
            },
        )
        .map_err(|_| CryptoError::DecryptionFailed)?;

    let mut payload = Vec::with_capacity(1 + 1 + 16 + 24 + 1 + ciphertext.len());
    payload.push(VERSION);
    payload.push(log_n);
    payload.extend_from_slice(&salt);
    payload.extend_from_slice(&nonce);
    payload.push(aad[0]);
    payload.extend_from_slice(&ciphertext);

    bech32::encode(HRP, &payload).map_err(CryptoError::from)
}

/// Decrypts an `ncryptsec1...` string with `password`. Any failure —
/// malformed payload, wrong password, or tampered ciphertext — yields
/// [`CryptoError::DecryptionFailed`] rather than partial output.
pub fn decrypt(ncryptsec: &str, password: &str) -> Result<SecretKey, CryptoError> {
    let (hrp, payload) = bech32::decode(ncryptsec)?;
    if hrp != HRP {
        return Err(CryptoError::InvalidPayload);
    }
    if payload.len() < 1 + 1 + 16 + 24 + 1 + 32 + 16 {
        return Err(CryptoError::DecodedTooShort);
    }
    if payload[0] != VERSION {
        return Err(CryptoError::UnsupportedVersion);
    }
    let log_n = payload[1];
    if !(1..=22).contains(&log_n) {
        return Err(CryptoError::InvalidLogN);
    }
    let salt = &payload[2..18];
    let nonce = &payload[18..42];
    let key_security_byte = payload[42];
    let ciphertext = &payload[43..];

    let derived = adapter::scrypt_derive(password, salt, log_n)?;

    let (prefix, suffix) = nonce.split_at(16);
    let prefix16: [u8; 16] = prefix.try_into().expect("16 bytes");
    let subkey = adapter::hchacha20(&derived, &prefix16);

    let mut poly_nonce = [0u8; 12];
    poly_nonce[4..].copy_from_slice(suffix);

    let aad = [key_security_byte];
    let cipher = ChaCha20Poly1305::new((&subkey).into());
    let plaintext = cipher
        .decrypt(
            Poly1305Nonce::from_slice(&poly_nonce),
            Payload {
                msg: ciphertext,
                aad: &aad,
            },
        )
        .map_err(|_| CryptoError::DecryptionFailed)?;

    SecretKey::from_slice(&plaintext).map_err(|_| CryptoError::DecryptionFailed)
}

pub fn key_security_of(ncryptsec: &str) -> Result<KeySecurity, CryptoError> {
    let (hrp, payload) = bech32::decode(ncryptsec)?;
    if hrp != HRP || payload.len() < 43 {
        return Err(CryptoError::InvalidPayload);
    }
    Ok(KeySecurity::from_byte(payload[42]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_round_trips() {
        let seckey = SecretKey::from_hex(
            "14c226dbdd865d5e1645e72c7470fd0a17feb42cc87b750bab6538171b3a3f8a",
        )
        .unwrap();
        let wrapped = encrypt(&seckey, "nostr", 4, KeySecurity::Unknown).unwrap();
        assert!(wrapped.starts_with("ncryptsec1"));
        let unwrapped = decrypt(&wrapped, "nostr").unwrap();
        assert_eq!(unwrapped, seckey);
    }

    #[test]
    fn wrong_password_fails() {
        let seckey = SecretKey::from_bytes([0x42; 32]);
        let wrapped = encrypt(&seckey, "nostr", 4, KeySecurity::Secure).unwrap();
        assert_eq!(decrypt(&wrapped, "wrong"), Err(CryptoError::DecryptionFailed));
    }

    #[test]
    fn rejects_log_n_out_of_range() {
        let seckey = SecretKey::from_bytes([0x01; 32]);
        assert_eq!(
            encrypt(&seckey, "pw", 23, KeySecurity::Unknown),
            Err(CryptoError::InvalidLogN)
        );
        assert_eq!(
            encrypt(&seckey, "pw", 0, KeySecurity::Unknown),
            Err(CryptoError::InvalidLogN)
        );
    }
}
