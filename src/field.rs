//! Field and curve type aliases (component C1 — external library).
//!
//! `F` is BN254's scalar field: every value that crosses an R1CS boundary
//! in this crate — public keys, signatures, commitments, ages — is an
//! element of `F`. `E` is the Baby-Jubjub-style twisted Edwards curve
//! embedded in `F` (its base field equals `F`), giving cheap in-circuit
//! point arithmetic.

use ark_ec::AffineRepr;
use ark_ff::{BigInteger, PrimeField};

/// The scalar field `F` that all in-circuit values live in.
pub type Fr = ark_bn254::Fr;

/// Affine point on the embedded twisted Edwards curve `E`.
pub type EdwardsAffine = ark_ed_on_bn254::EdwardsAffine;

/// Projective point on `E`, used for intermediate arithmetic.
pub type EdwardsProjective = ark_ed_on_bn254::EdwardsProjective;

/// The pairing engine Groth16 runs over.
pub type Curve = ark_bn254::Bn254;

/// Width, in bytes, of the canonical big-endian encoding of an `Fr`.
pub const SCALAR_BYTES: usize = 32;

/// The curve's conventional base point, used for all key derivation and
/// signing. Fixed for the lifetime of the process.
pub fn generator() -> EdwardsAffine {
    EdwardsAffine::generator()
}

/// Encode a scalar as a fixed-width, 32-byte big-endian buffer.
pub fn fr_to_be_bytes(x: &Fr) -> [u8; SCALAR_BYTES] {
    let mut out = [0u8; SCALAR_BYTES];
    let be = x.into_bigint().to_bytes_be();
    // `to_bytes_be` on a fixed-limb BigInteger is already SCALAR_BYTES long,
    // but pad defensively in case the limb width ever changes.
    let start = SCALAR_BYTES.saturating_sub(be.len());
    out[start..].copy_from_slice(&be[be.len().saturating_sub(SCALAR_BYTES)..]);
    out
}

/// Reduce an arbitrary-length big-endian byte string into `F`, per §4.1:
/// inputs smaller than `|F|` decode to their native value; inputs `>= |F|`
/// are reduced modulo `|F|`.
pub fn fr_from_be_bytes_mod_order(bytes: &[u8]) -> Fr {
    Fr::from_be_bytes_mod_order(bytes)
}

/// Parse a big-endian scalar encoding strictly: returns `None` if the value
/// is `>= |F|` (i.e. not a canonical representative), used at the wire
/// boundary where out-of-range scalars must be rejected rather than
/// silently reduced.
pub fn fr_from_be_bytes_checked(bytes: &[u8]) -> Option<Fr> {
    if bytes.len() != SCALAR_BYTES {
        return None;
    }
    let reduced = fr_from_be_bytes_mod_order(bytes);
    if fr_to_be_bytes(&reduced) == bytes {
        Some(reduced)
    } else {
        None
    }
}
