use std::fmt;

use serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CodecError;

macro_rules! hex_newtype {
    ($name:ident, $len:expr, $doc:expr, sensitive) => {
        hex_newtype!(@body $name, $len, $doc);

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}(<redacted>)", stringify!($name))
            }
        }
    };
    ($name:ident, $len:expr, $doc:expr) => {
        hex_newtype!(@body $name, $len, $doc);

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.to_hex())
            }
        }
    };
    (@body $name:ident, $len:expr, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name([u8; $len]);

        impl $name {
            pub const LEN: usize = $len;

            pub fn from_bytes(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }

            pub fn from_slice(bytes: &[u8]) -> Result<Self, CodecError> {
                let arr: [u8; $len] = bytes.try_into().map_err(|_| CodecError::InvalidHex)?;
                Ok(Self(arr))
            }

            pub fn from_hex(s: &str) -> Result<Self, CodecError> {
                if s.len() != $len * 2 {
                    return Err(CodecError::InvalidHex);
                }
                let mut out = [0u8; $len];
                hex::decode_to_slice(s, &mut out).map_err(|_| CodecError::InvalidHex)?;
                Ok(Self(out))
            }

            pub fn to_hex(&self) -> String {
                hex::encode(self.0)
            }

            pub fn as_bytes(&self) -> &[u8; $len] {
                &self.0
            }

            pub fn into_bytes(self) -> [u8; $len] {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.to_hex())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.to_hex())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                $name::from_hex(&s).map_err(D::Error::custom)
            }
        }
    };
}

hex_newtype!(EventId, 32, "32-byte SHA-256 event id, lowercase hex on the wire.");
hex_newtype!(PublicKey, 32, "32-byte x-only secp256k1 public key.");
hex_newtype!(SecretKey, 32, "32-byte secp256k1 secret key.", sensitive);
hex_newtype!(Signature, 64, "64-byte Schnorr (BIP-340) signature.");
