use nostr_crypto::adapter::derive_public_key;
use nostr_crypto::nip44::{decrypt, encrypt};
use nostr_types::SecretKey;

#[test]
fn alice_and_bob_exchange_an_encrypted_message() {
    let alice_sk = SecretKey::from_bytes([0xa1; 32]);
    let bob_sk = SecretKey::from_bytes([0xb2; 32]);
    let alice_pk = derive_public_key(&alice_sk).unwrap();
    let bob_pk = derive_public_key(&bob_sk).unwrap();

    let payload = encrypt("gm from Alice", &alice_sk, &bob_pk).unwrap();
    let recovered = decrypt(&payload, &bob_sk, &alice_pk).unwrap();
    assert_eq!(recovered, "gm from Alice");
}

#[test]
fn a_longer_message_still_round_trips_through_padding() {
    let alice_sk = SecretKey::from_bytes([0x01; 32]);
    let bob_sk = SecretKey::from_bytes([0x02; 32]);
    let alice_pk = derive_public_key(&alice_sk).unwrap();
    let bob_pk = derive_public_key(&bob_sk).unwrap();

    let message = "x".repeat(5000);
    let payload = encrypt(&message, &alice_sk, &bob_pk).unwrap();
    let recovered = decrypt(&payload, &bob_sk, &alice_pk).unwrap();
    assert_eq!(recovered, message);
}
