//! NIP-44 v2: conversation-key ECDH+HKDF, padded ChaCha20+HMAC payload (C9).

use nostr_types::codec::{base64_decode, base64_encode};
use nostr_types::{PublicKey, SecretKey};

use crate::adapter;
use crate::error::CryptoError;

const VERSION: u8 = 2;
const MIN_PLAINTEXT_SIZE: usize = 1;
const MAX_PLAINTEXT_SIZE: usize = 65_535;
const MESSAGE_KEYS_SIZE: usize = 76;

const MIN_BASE64_LEN: usize = 132;
const MAX_BASE64_LEN: usize = 87_472;
const MIN_DECODED_LEN: usize = 99;
const MAX_DECODED_LEN: usize = 65_603;

/// Symmetric in sender/recipient: `derive(sk_a, pk_b) == derive(sk_b, pk_a)`.
#[derive(Clone)]
pub struct ConversationKey([u8; 32]);

impl std::fmt::Debug for ConversationKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ConversationKey(<redacted>)")
    }
}

impl ConversationKey {
    pub fn derive(seckey: &SecretKey, peer_pubkey: &PublicKey) -> Result<Self, CryptoError> {
        let shared_x = adapter::ecdh_shared_x(seckey, peer_pubkey)?;
        let prk = adapter::hkdf_extract(b"nip44-v2", &shared_x);
        Ok(ConversationKey(prk))
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

struct MessageKeys {
    chacha_key: [u8; 32],
    chacha_nonce: [u8; 12],
    hmac_key: [u8; 32],
}

impl MessageKeys {
    fn derive(conversation_key: &ConversationKey, nonce: &[u8; 32]) -> Result<Self, CryptoError> {
        let okm = adapter::hkdf_expand(conversation_key.as_bytes(), nonce, MESSAGE_KEYS_SIZE)?;
        let mut chacha_key = [0u8; 32];
        let mut chacha_nonce = [0u8; 12];
        let mut hmac_key = [0u8; 32];
        chacha_key.copy_from_slice(&okm[0..32]);
        chacha_nonce.copy_from_slice(&okm[32..44]);
        hmac_key.copy_from_slice(&okm[44..76]);
        Ok(MessageKeys {
            chacha_key,
            chacha_nonce,
            hmac_key,
        })
    }
}

fn calc_padded_len(unpadded_len: usize) -> usize {
    if unpadded_len <= 32 {
        return 32;
    }
    let next_power = 1usize << (64 - (unpadded_len as u64 - 1).leading_zeros());
    let chunk = if next_power <= 256 { 32 } else { next_power / 8 };
    chunk * ((unpadded_len - 1) / chunk + 1)
}

fn pad(plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let len = plaintext.len();
    if len < MIN_PLAINTEXT_SIZE {
        return Err(CryptoError::PlaintextEmpty);
    }
    if len > MAX_PLAINTEXT_SIZE {
        return Err(CryptoError::PlaintextTooLong);
    }
    let padded_len = calc_padded_len(len);
    let mut out = Vec::with_capacity(2 + padded_len);
    out.extend_from_slice(&(len as u16).to_be_bytes());
    out.extend_from_slice(plaintext);
    out.resize(2 + padded_len, 0);
    Ok(out)
}

fn unpad(padded: &[u8]) -> Result<Vec<u8>, CryptoError> {
    if padded.len() < 2 {
        return Err(CryptoError::InvalidPadding);
    }
    let declared_len = u16::from_be_bytes([padded[0], padded[1]]) as usize;
    if declared_len == 0
        || declared_len > MAX_PLAINTEXT_SIZE
        || padded.len() < 2 + declared_len
    {
        return Err(CryptoError::InvalidPadding);
    }
    let unpadded = &padded[2..2 + declared_len];
    if padded.len() != 2 + calc_padded_len(declared_len) {
        return Err(CryptoError::InvalidPadding);
    }
    Ok(unpadded.to_vec())
}

/// Encrypts `plaintext` for `recipient_pubkey`, authenticated as
/// `sender_seckey`. Returns the base64 wire payload.
pub fn encrypt(
    plaintext: &str,
    sender_seckey: &SecretKey,
    recipient_pubkey: &PublicKey,
) -> Result<String, CryptoError> {
    let conversation_key = ConversationKey::derive(sender_seckey, recipient_pubkey)?;
    let nonce: [u8; 32] = adapter::random_bytes(32).try_into().expect("32 bytes requested");
    encrypt_with_nonce(plaintext, &conversation_key, nonce)
}

fn encrypt_with_nonce(
    plaintext: &str,
    conversation_key: &ConversationKey,
    nonce: [u8; 32],
) -> Result<String, CryptoError> {
    let keys = MessageKeys::derive(conversation_key, &nonce)?;
    let mut padded = pad(plaintext.as_bytes())?;
    adapter::chacha20_apply(&keys.chacha_key, &keys.chacha_nonce, &mut padded);
    let ciphertext = padded;

    let mut mac_input = Vec::with_capacity(32 + ciphertext.len());
    mac_input.extend_from_slice(&nonce);
    mac_input.extend_from_slice(&ciphertext);
    let mac = adapter::hmac_sha256(&keys.hmac_key, &mac_input);

    let mut payload = Vec::with_capacity(1 + 32 + ciphertext.len() + 32);
    payload.push(VERSION);
    payload.extend_from_slice(&nonce);
    payload.extend_from_slice(&ciphertext);
    payload.extend_from_slice(&mac);

    Ok(base64_encode(&payload))
}

/// Decrypts a base64 NIP-44 payload using `recipient_seckey` and the
/// `sender_pubkey` that produced it; `conversation key` reconstruction is
/// symmetric so this works regardless of which side called `encrypt`.
pub fn decrypt(
    payload: &str,
    recipient_seckey: &SecretKey,
    sender_pubkey: &PublicKey,
) -> Result<String, CryptoError> {
    if payload.starts_with('#') {
        return Err(CryptoError::UnsupportedVersion);
    }
    if payload.len() < MIN_BASE64_LEN || payload.len() > MAX_BASE64_LEN {
        return Err(CryptoError::InvalidPayload);
    }
    let conversation_key = ConversationKey::derive(recipient_seckey, sender_pubkey)?;
    let decoded = base64_decode(payload)?;
    decrypt_bytes(&decoded, &conversation_key)
}

fn decrypt_bytes(decoded: &[u8], conversation_key: &ConversationKey) -> Result<String, CryptoError> {
    if decoded.len() < MIN_DECODED_LEN {
        return Err(CryptoError::DecodedTooShort);
    }
    if decoded.len() > MAX_DECODED_LEN {
        return Err(CryptoError::DecodedTooLong);
    }
    if decoded[0] != VERSION {
        return Err(CryptoError::UnsupportedVersion);
    }
    let nonce: [u8; 32] = decoded[1..33].try_into().expect("slice is 32 bytes");
    let mac = &decoded[decoded.len() - 32..];
    let ciphertext = &decoded[33..decoded.len() - 32];

    let keys = MessageKeys::derive(conversation_key, &nonce)?;

    let mut mac_input = Vec::with_capacity(32 + ciphertext.len());
    mac_input.extend_from_slice(&nonce);
    mac_input.extend_from_slice(ciphertext);
    adapter::hmac_verify(&keys.hmac_key, &mac_input, mac)?;

    let mut padded = ciphertext.to_vec();
    adapter::chacha20_apply(&keys.chacha_key, &keys.chacha_nonce, &mut padded);
    let plaintext = unpad(&padded)?;
    String::from_utf8(plaintext).map_err(|_| CryptoError::InvalidPayload)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padded_length_schedule() {
        assert_eq!(calc_padded_len(1), 32);
        assert_eq!(calc_padded_len(32), 32);
        assert_eq!(calc_padded_len(33), 64);
        assert_eq!(calc_padded_len(100), 128);
        assert_eq!(calc_padded_len(256), 256);
        assert_eq!(calc_padded_len(257), 320);
        assert_eq!(calc_padded_len(10_000), 10_240);
    }

    #[test]
    fn pad_unpad_round_trip() {
        let original = b"hello world";
        let padded = pad(original).unwrap();
        assert_eq!(padded.len(), 2 + calc_padded_len(original.len()));
        let unpadded = unpad(&padded).unwrap();
        assert_eq!(unpadded, original);
    }

    #[test]
    fn encrypt_decrypt_symmetry() {
        let sk_a = SecretKey::from_bytes([0x01; 32]);
        let sk_b = SecretKey::from_bytes([0x02; 32]);
        let pk_a = adapter::derive_public_key(&sk_a).unwrap();
        let pk_b = adapter::derive_public_key(&sk_b).unwrap();

        let ciphertext = encrypt("hello", &sk_a, &pk_b).unwrap();
        let plaintext = decrypt(&ciphertext, &sk_b, &pk_a).unwrap();
        assert_eq!(plaintext, "hello");
    }

    #[test]
    fn conversation_key_is_symmetric() {
        let sk_a = SecretKey::from_bytes([0x01; 32]);
        let sk_b = SecretKey::from_bytes([0x02; 32]);
        let pk_a = adapter::derive_public_key(&sk_a).unwrap();
        let pk_b = adapter::derive_public_key(&sk_b).unwrap();

        let key_ab = ConversationKey::derive(&sk_a, &pk_b).unwrap();
        let key_ba = ConversationKey::derive(&sk_b, &pk_a).unwrap();
        assert_eq!(key_ab.as_bytes(), key_ba.as_bytes());
    }

    #[test]
    fn swapped_key_fails_mac() {
        let sk_a = SecretKey::from_bytes([0x01; 32]);
        let sk_b = SecretKey::from_bytes([0x02; 32]);
        let sk_c = SecretKey::from_bytes([0x03; 32]);
        let pk_b = adapter::derive_public_key(&sk_b).unwrap();
        let pk_c = adapter::derive_public_key(&sk_c).unwrap();

        let ciphertext = encrypt("hello", &sk_a, &pk_b).unwrap();
        let result = decrypt(&ciphertext, &sk_b, &pk_c);
        assert_eq!(result, Err(CryptoError::InvalidMac));
    }

    #[test]
    fn flipped_ciphertext_bit_fails_mac() {
        let sk_a = SecretKey::from_bytes([0x01; 32]);
        let sk_b = SecretKey::from_bytes([0x02; 32]);
        let pk_a = adapter::derive_public_key(&sk_a).unwrap();
        let pk_b = adapter::derive_public_key(&sk_b).unwrap();

        let ciphertext = encrypt("hello", &sk_a, &pk_b).unwrap();
        let mut decoded = base64_decode(&ciphertext).unwrap();
        let mid = decoded.len() / 2;
        decoded[mid] ^= 1;
        let tampered = base64_encode(&decoded);
        assert_eq!(decrypt(&tampered, &sk_b, &pk_a), Err(CryptoError::InvalidMac));
    }
}
