//! Crypto adapter (C3): the one place this workspace touches secp256k1,
//! HKDF, ChaCha20, HMAC-SHA256, HChaCha20, and scrypt directly. Every other
//! module calls through here instead of reaching for `k256`/`hmac`/`hkdf`
//! itself.

use hkdf::Hkdf;
use hmac::{Hmac, Mac};
use k256::ecdh::diffie_hellman as k256_diffie_hellman;
use k256::schnorr::signature::hazmat::{PrehashSigner, PrehashVerifier};
use k256::schnorr::{Signature as SchnorrSignature, SigningKey, VerifyingKey};
use k256::{PublicKey as K256PublicKey, SecretKey as K256SecretKey};
use sha2::Sha256;

use nostr_types::{PublicKey, SecretKey, Signature};

use crate::error::CryptoError;

pub fn derive_public_key(seckey: &SecretKey) -> Result<PublicKey, CryptoError> {
    let signing_key =
        SigningKey::from_bytes(seckey.as_bytes()).map_err(|_| CryptoError::InvalidSecretKey)?;
    let verifying_key = signing_key.verifying_key();
    Ok(PublicKey::from_bytes(verifying_key.to_bytes().into()))
}

pub fn schnorr_sign(seckey: &SecretKey, msg_digest: &[u8; 32]) -> Result<Signature, CryptoError> {
    let signing_key =
        SigningKey::from_bytes(seckey.as_bytes()).map_err(|_| CryptoError::InvalidSecretKey)?;
    let sig: SchnorrSignature = signing_key
        .sign_prehash(msg_digest)
        .map_err(|_| CryptoError::InvalidSecretKey)?;
    Ok(Signature::from_bytes(sig.to_bytes()))
}

pub fn schnorr_verify(
    sig: &Signature,
    msg_digest: &[u8; 32],
    pubkey: &PublicKey,
) -> Result<(), CryptoError> {
    let verifying_key =
        VerifyingKey::from_bytes(pubkey.as_bytes()).map_err(|_| CryptoError::InvalidPublicKey)?;
    let schnorr_sig =
        SchnorrSignature::try_from(sig.as_bytes().as_slice()).map_err(|_| CryptoError::InvalidPayload)?;
    verifying_key
        .verify_prehash(msg_digest, &schnorr_sig)
        .map_err(|_| CryptoError::DecryptionFailed)
}

/// Reconstructs the full compressed point for an x-only pubkey by assuming
/// even y-parity (prefix `0x02`), then runs ECDH and returns the raw
/// x-coordinate of the shared point — no hashing, matching NIP-44's
/// conversation-key input.
pub fn ecdh_shared_x(seckey: &SecretKey, peer_pubkey: &PublicKey) -> Result<[u8; 32], CryptoError> {
    let mut compressed = [0u8; 33];
    compressed[0] = 0x02;
    compressed[1..].copy_from_slice(peer_pubkey.as_bytes());
    let peer = K256PublicKey::from_sec1_bytes(&compressed).map_err(|_| CryptoError::InvalidPublicKey)?;
    let our_secret =
        K256SecretKey::from_slice(seckey.as_bytes()).map_err(|_| CryptoError::InvalidSecretKey)?;
    let shared = k256_diffie_hellman(our_secret.to_nonzero_scalar(), peer.as_affine());
    let encoded = shared.raw_secret_bytes();
    let mut out = [0u8; 32];
    out.copy_from_slice(encoded.as_slice());
    Ok(out)
}

pub fn hkdf_extract(salt: &[u8], ikm: &[u8]) -> [u8; 32] {
    let (prk, _) = Hkdf::<Sha256>::extract(Some(salt), ikm);
    prk.into()
}

pub fn hkdf_expand(prk: &[u8; 32], info: &[u8], out_len: usize) -> Result<Vec<u8>, CryptoError> {
    let hk = Hkdf::<Sha256>::from_prk(prk).map_err(|_| CryptoError::InvalidPayload)?;
    let mut okm = vec![0u8; out_len];
    hk.expand(info, &mut okm).map_err(|_| CryptoError::InvalidPayload)?;
    Ok(okm)
}

/// Encrypts or decrypts `data` in place with ChaCha20 under `key` and a
/// 12-byte nonce with the block counter fixed at zero (matches NIP-44's
/// `IV = u32(0) || nonce_12`). The operation is its own inverse.
pub fn chacha20_apply(key: &[u8; 32], nonce12: &[u8; 12], data: &mut [u8]) {
    use chacha20::cipher::{KeyIvInit, StreamCipher};
    use chacha20::ChaCha20;
    let mut cipher = ChaCha20::new(key.into(), nonce12.into());
    cipher.apply_keystream(data);
}

pub fn hmac_sha256(key: &[u8], data: &[u8]) -> [u8; 32] {
    let mut mac = Hmac::<Sha256>::new_from_slice(key).expect("HMAC accepts any key length");
    mac.update(data);
    mac.finalize().into_bytes().into()
}

/// Constant-time MAC check — delegates to `hmac`'s own `verify_slice`
/// instead of hand comparing bytes, which would leak timing.
pub fn hmac_verify(key: &[u8], data: &[u8], tag: &[u8]) -> Result<(), CryptoError> {
    let mut mac = Hmac::<Sha256>::new_from_slice(key).expect("HMAC accepts any key length");
    mac.update(data);
    mac.verify_slice(tag).map_err(|_| CryptoError::InvalidMac)
}

fn quarter_round(state: &mut [u32; 16], a: usize, b: usize, c: usize, d: usize) {
    state[a] = state[a].wrapping_add(state[b]);
    state[d] ^= state[a];
    state[d] = state[d].rotate_left(16);
    state[c] = state[c].wrapping_add(state[d]);
    state[b] ^= state[c];
    state[b] = state[b].rotate_left(12);
    state[a] = state[a].wrapping_add(state[b]);
    state[d] ^= state[a];
    state[d] = state[d].rotate_left(8);
    state[c] = state[c].wrapping_add(state[d]);
    state[b] ^= state[c];
    state[b] = state[b].rotate_left(7);
}

const CHACHA_CONSTANTS: [u32; 4] = [0x6170_7865, 0x3320_646e, 0x7962_2d32, 0x6b20_6574];

/// HChaCha20: derives a 32-byte subkey from a 32-byte key and a 16-byte
/// nonce prefix, used by NIP-49 to turn the stored 16-byte nonce prefix into
/// the ChaCha20-Poly1305 key. 20 rounds, output is words 0-3 and 12-15 of
/// the permuted state with no feed-forward addition (unlike a full block).
pub fn hchacha20(key: &[u8; 32], nonce16: &[u8; 16]) -> [u8; 32] {
    let mut state = [0u32; 16];
    state[0..4].copy_from_slice(&CHACHA_CONSTANTS);
    for i in 0..8 {
        state[4 + i] = u32::from_le_bytes(key[i * 4..i * 4 + 4].try_into().unwrap());
    }
    for i in 0..4 {
        state[12 + i] = u32::from_le_bytes(nonce16[i * 4..i * 4 + 4].try_into().unwrap());
    }
    for _ in 0..10 {
        quarter_round(&mut state, 0, 4, 8, 12);
        quarter_round(&mut state, 1, 5, 9, 13);
        quarter_round(&mut state, 2, 6, 10, 14);
        quarter_round(&mut state, 3, 7, 11, 15);
        quarter_round(&mut state, 0, 5, 10, 15);
        quarter_round(&mut state, 1, 6, 11, 12);
        quarter_round(&mut state, 2, 7, 8, 13);
        quarter_round(&mut state, 3, 4, 9, 14);
    }
    let mut out = [0u8; 32];
    for i in 0..4 {
        out[i * 4..i * 4 + 4].copy_from_slice(&state[i].to_le_bytes());
    }
    for i in 0..4 {
        out[16 + i * 4..16 + i * 4 + 4].copy_from_slice(&state[12 + i].to_le_bytes());
    }
    out
}

/// Derives a 32-byte key from an NFKC-normalized password, per NIP-49.
/// `log_n` outside `1..=22` is rejected before scrypt ever runs.
pub fn scrypt_derive(password: &str, salt: &[u8], log_n: u8) -> Result<[u8; 32], CryptoError> {
    if !(1..=22).contains(&log_n) {
        return Err(CryptoError::InvalidLogN);
    }
    use unicode_normalization::UnicodeNormalization;
    let normalized: String = password.nfkc().collect();
    let params =
        scrypt::Params::new(log_n, 8, 1, 32).map_err(|_| CryptoError::InvalidLogN)?;
    let mut out = [0u8; 32];
    scrypt::scrypt(normalized.as_bytes(), salt, &params, &mut out)
        .map_err(|_| CryptoError::DecryptionFailed)?;
    Ok(out)
}

pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut buf = vec![0u8; len];
    getrandom::getrandom(&mut buf).expect("OS entropy source unavailable");
    buf
}

pub fn random_secret_key() -> SecretKey {
    loop {
        let bytes: [u8; 32] = {
            let mut b = [0u8; 32];
            getrandom::getrandom(&mut b).expect("OS entropy source unavailable");
            b
        };
        if K256SecretKey::from_slice(&bytes).is_ok() {
            return SecretKey::from_bytes(bytes);
        }
    }
}
