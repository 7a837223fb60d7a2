//! NIP-17 private direct message facade (C11): `PrivateMessage`/`FileMessage`
//! rumors built and unwrapped on top of C10's gift-wrap envelope.

use nostr_types::{PublicKey, Rumor, SecretKey, Tag, Timestamp};

use crate::error::ProtocolError;
use crate::nip59::{self, Unwrapped};

pub const KIND_PRIVATE_MESSAGE: u64 = 14;
pub const KIND_FILE_MESSAGE: u64 = 15;

pub struct PrivateMessage {
    pub content: String,
    pub reply_to: Option<String>,
}

pub struct FileMessage {
    pub url: String,
    pub mime_type: Option<String>,
    pub decryption_key: Option<String>,
    pub decryption_nonce: Option<String>,
}

fn recipient_tags(recipient: &PublicKey, extra: Vec<Tag>) -> Vec<Tag> {
    let mut tags = vec![Tag::new("p", recipient.to_hex())];
    tags.extend(extra);
    tags
}

/// Sends a `PrivateMessage` to `recipients`: returns one gift-wrap per
/// recipient plus one the sender wraps for their own sent folder.
pub fn send_private_message(
    message: &PrivateMessage,
    sender_seckey: &SecretKey,
    sender_pubkey: &PublicKey,
    recipients: &[PublicKey],
) -> Result<Vec<nostr_types::Event>, ProtocolError> {
    let mut tags = Vec::new();
    if let Some(reply_to) = &message.reply_to {
        tags.push(Tag::new("e", reply_to.clone()));
    }
    for recipient in recipients {
        tags.push(Tag::new("p", recipient.to_hex()));
    }
    let rumor = Rumor::new(
        *sender_pubkey,
        Timestamp::now(),
        KIND_PRIVATE_MESSAGE,
        tags,
        message.content.clone(),
    );
    nip59::gift_wrap_for_recipients(&rumor, sender_seckey, recipients)
}

/// Sends a `FileMessage` (kind 15) the same way a `PrivateMessage` is sent —
/// the only difference is the kind and the tag shape describing the file.
pub fn send_file_message(
    file: &FileMessage,
    sender_seckey: &SecretKey,
    sender_pubkey: &PublicKey,
    recipients: &[PublicKey],
) -> Result<Vec<nostr_types::Event>, ProtocolError> {
    let mut extra = Vec::new();
    if let Some(mime) = &file.mime_type {
        extra.push(Tag::new("file-type", mime.clone()));
    }
    if let Some(key) = &file.decryption_key {
        extra.push(Tag::new("decryption-key", key.clone()));
    }
    if let Some(nonce) = &file.decryption_nonce {
        extra.push(Tag::new("decryption-nonce", nonce.clone()));
    }
    let tags = recipient_tags(&recipients[0], extra);
    let rumor = Rumor::new(
        *sender_pubkey,
        Timestamp::now(),
        KIND_FILE_MESSAGE,
        tags,
        file.url.clone(),
    );
    nip59::gift_wrap_for_recipients(&rumor, sender_seckey, recipients)
}

/// Unwraps a received gift-wrap and classifies the inner rumor by kind.
pub enum DirectMessage {
    Private(PrivateMessage, nostr_types::PublicKey),
    File(FileMessage, nostr_types::PublicKey),
}

pub fn receive(gift_wrap: &nostr_types::Event, recipient_seckey: &SecretKey) -> Result<DirectMessage, ProtocolError> {
    let Unwrapped { rumor, sender } = nip59::unwrap_gift_wrap(gift_wrap, recipient_seckey)?;
    match rumor.kind {
        KIND_PRIVATE_MESSAGE => {
            let reply_to = rumor.tags.iter().find(|t| t.is_kind("e")).map(|t| t.value().to_string());
            Ok(DirectMessage::Private(
                PrivateMessage {
                    content: rumor.content,
                    reply_to,
                },
                sender,
            ))
        }
        KIND_FILE_MESSAGE => {
            let mime_type = rumor.tags.iter().find(|t| t.is_kind("file-type")).map(|t| t.value().to_string());
            let decryption_key = rumor.tags.iter().find(|t| t.is_kind("decryption-key")).map(|t| t.value().to_string());
            let decryption_nonce = rumor.tags.iter().find(|t| t.is_kind("decryption-nonce")).map(|t| t.value().to_string());
            Ok(DirectMessage::File(
                FileMessage {
                    url: rumor.content,
                    mime_type,
                    decryption_key,
                    decryption_nonce,
                },
                sender,
            ))
        }
        other => Err(ProtocolError::UnsupportedKind(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nostr_crypto::adapter::derive_public_key;

    #[test]
    fn alice_sends_bob_a_private_message() {
        let alice_sk = SecretKey::from_bytes([0xaa; 32]);
        let bob_sk = SecretKey::from_bytes([0xbb; 32]);
        let alice_pk = derive_public_key(&alice_sk).unwrap();
        let bob_pk = derive_public_key(&bob_sk).unwrap();

        let message = PrivateMessage {
            content: "Hi Bob!".to_string(),
            reply_to: None,
        };
        let wraps = send_private_message(&message, &alice_sk, &alice_pk, &[bob_pk]).unwrap();
        assert_eq!(wraps.len(), 2); // one for Bob, one for Alice's own sent folder

        let bob_wrap = wraps
            .iter()
            .find(|w| w.tags_value("p") == Some(bob_pk.to_hex().as_str()))
            .unwrap();
        match receive(bob_wrap, &bob_sk).unwrap() {
            DirectMessage::Private(pm, sender) => {
                assert_eq!(pm.content, "Hi Bob!");
                assert_eq!(sender, alice_pk);
            }
            DirectMessage::File(..) => panic!("expected a private message"),
        }
    }
}
