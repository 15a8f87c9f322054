//! Wire codecs (C8): hex encoding for proofs, signatures, and keys, and DID
//! id derivation. All transport payloads are lowercase hex with no `0x`
//! prefix, per §4.7.

use crate::error::DidError;

/// Method prefix for every DID this crate mints.
pub const DID_METHOD_PREFIX: &str = "did:example:";

/// Encode bytes as lowercase hex.
pub fn to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Decode lowercase (or mixed-case) hex into bytes, reporting malformed
/// input as `InvalidInput` rather than panicking.
pub fn from_hex(s: &str) -> Result<Vec<u8>, DidError> {
    hex::decode(s).map_err(|e| DidError::invalid(format!("malformed hex: {e}")))
}

/// Build a DID id from a compressed public-key byte string:
/// `"did:example:" || hex(publicKeyBytes)`.
pub fn did_id_from_pubkey_bytes(pubkey_bytes: &[u8]) -> String {
    format!("{DID_METHOD_PREFIX}{}", to_hex(pubkey_bytes))
}
