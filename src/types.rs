//! Thin newtypes around raw scalars/bytes so the public service API (§6)
//! takes and returns concrete, documented types rather than bare
//! `Vec<u8>`/`Fr` — the same small-wrapper-struct style the teacher uses
//! for `ProofJson`/`VkJson` around serialized proof bytes.

use crate::codec::{from_hex, to_hex};
use crate::error::DidError;
use crate::field::{fr_from_be_bytes_checked, fr_to_be_bytes, Fr, SCALAR_BYTES};
use serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};

/// Shared serde plumbing: every wire-facing newtype here serializes as
/// its lowercase-hex wire form (§4.7), not as a raw byte array, so a host
/// embedding this core gets the same hex it would get from `to_hex`.
fn serialize_hex<S: Serializer>(hex: &str, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(hex)
}

fn deserialize_hex<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
    let s = String::deserialize(deserializer)?;
    from_hex(&s).map_err(D::Error::custom)
}

/// A secret key material scalar, returned once by `CreateDID` and handed
/// back by the caller on every subsequent `AuthenticateDID` call. Never
/// stored by the service.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct SecretScalar(pub Fr);

impl SecretScalar {
    pub fn to_hex(&self) -> String {
        to_hex(&fr_to_be_bytes(&self.0))
    }

    pub fn from_hex(s: &str) -> Result<Self, DidError> {
        let bytes = from_hex(s)?;
        let arr: [u8; SCALAR_BYTES] = bytes
            .try_into()
            .map_err(|_| DidError::invalid("secret scalar must be 32 bytes"))?;
        fr_from_be_bytes_checked(&arr)
            .map(SecretScalar)
            .ok_or_else(|| DidError::invalid("secret scalar out of range"))
    }
}

/// A fresh per-credential blinding scalar. Returned exactly once by
/// `IssueAgeCredential`; losing it renders the credential unprovable.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Salt(pub Fr);

/// Compressed public-key bytes, the form used to derive a DID id and to
/// place a key on the wire.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct PublicKeyBytes(pub [u8; SCALAR_BYTES]);

impl PublicKeyBytes {
    pub fn to_hex(&self) -> String {
        to_hex(&self.0)
    }
}

/// Opaque Groth16 proof bytes (canonical-serialized), bundled with the
/// underlying signature where an operation produces both.
#[derive(Clone, PartialEq, Eq)]
pub struct ProofBytes(pub Vec<u8>);

impl ProofBytes {
    pub fn to_hex(&self) -> String {
        to_hex(&self.0)
    }

    pub fn from_hex(s: &str) -> Result<Self, DidError> {
        from_hex(s).map(ProofBytes)
    }
}

impl Serialize for ProofBytes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_hex(&self.to_hex(), serializer)
    }
}

impl<'de> Deserialize<'de> for ProofBytes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserialize_hex(deserializer).map(ProofBytes)
    }
}

/// The 64-byte `(R, S)` EdDSA signature wire form.
#[derive(Clone, PartialEq, Eq)]
pub struct SignatureBytes(pub Vec<u8>);

impl SignatureBytes {
    pub fn to_hex(&self) -> String {
        to_hex(&self.0)
    }

    pub fn from_hex(s: &str) -> Result<Self, DidError> {
        from_hex(s).map(SignatureBytes)
    }
}

impl Serialize for SignatureBytes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_hex(&self.to_hex(), serializer)
    }
}

impl<'de> Deserialize<'de> for SignatureBytes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserialize_hex(deserializer).map(SignatureBytes)
    }
}

impl Serialize for PublicKeyBytes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_hex(&self.to_hex(), serializer)
    }
}

impl<'de> Deserialize<'de> for PublicKeyBytes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let bytes = deserialize_hex(deserializer)?;
        let arr: [u8; SCALAR_BYTES] = bytes
            .try_into()
            .map_err(|_| D::Error::custom("public key must be 32 bytes"))?;
        Ok(PublicKeyBytes(arr))
    }
}
