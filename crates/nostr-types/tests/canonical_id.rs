use nostr_types::{compute_id, PublicKey, Timestamp};

/// Fixture pubkey corresponds to seckey `1111...1111` (32 bytes of `0x11`)
/// under x-only secp256k1 derivation.
const FIXTURE_PUBKEY: &str = "4f355bdcb7cc0af728ef3cceb9615d90684bb5b2ca5f859ab0f0b704075871aa";

#[test]
fn canonical_serialization_matches_fixture() {
    let pubkey = PublicKey::from_hex(FIXTURE_PUBKEY).unwrap();
    let created_at = Timestamp(1_704_067_200);
    let bytes = nostr_types::canonical_bytes(&pubkey, created_at, 1, &[], "test");
    let json = String::from_utf8(bytes).unwrap();
    assert_eq!(
        json,
        format!("[0,\"{FIXTURE_PUBKEY}\",1704067200,1,[],\"test\"]")
    );
}

#[test]
fn compute_id_yields_64_char_lowercase_hex() {
    let pubkey = PublicKey::from_hex(FIXTURE_PUBKEY).unwrap();
    let id = compute_id(&pubkey, Timestamp(1_704_067_200), 1, &[], "test");
    let hex = id.to_hex();
    assert_eq!(hex.len(), 64);
    assert!(hex.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
}
