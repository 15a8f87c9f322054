//! EdDSA over the embedded twisted Edwards curve `E`, hashed with MiMC
//! instead of SHA-512 so the native signer and the in-circuit verifier
//! (`eddsa::gadget`, used by `circuits::auth`) agree bit-for-bit (C3).

pub mod gadget;

use crate::field::{fr_to_be_bytes, generator, EdwardsAffine, Fr, SCALAR_BYTES};
use crate::hash::hash_scalars;
use ark_ec::twisted_edwards::TECurveConfig;
use ark_ec::{AffineRepr, CurveGroup};
use ark_ff::{BigInteger, Field, PrimeField};

/// Fixed domain tag folded into the nonce-key derivation, so a signing
/// key's nonce secret is never the raw signing scalar itself.
const NONCE_DOMAIN_TAG: u64 = 0x4e6f_6e63_6554_6167; // "NoncTag"

/// A public key: a point of `E`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublicKey(pub EdwardsAffine);

/// An EdDSA signature `(R, S)`: `R` a point of `E`, `S` a scalar of `F`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Signature {
    pub r: EdwardsAffine,
    pub s: Fr,
}

/// Scalar multiplication `s * P`, valid for any `s: Fr` regardless of the
/// curve's own (smaller) subgroup order — the double-and-add algorithm
/// wraps correctly via the group law.
pub fn scalar_mul(point: EdwardsAffine, s: Fr) -> EdwardsAffine {
    point.into_group().mul_bigint(s.into_bigint()).into_affine()
}

/// Derive the EdDSA keypair's public half from a secret scalar.
pub fn derive_public(secret: Fr) -> PublicKey {
    PublicKey(scalar_mul(generator(), secret))
}

/// Expand a 32-byte big-endian seed into the secret scalar (§4.2): the
/// seed *is* the scalar's big-endian encoding, reduced mod `|F|`.
pub fn secret_from_seed(seed: &[u8; SCALAR_BYTES]) -> Fr {
    crate::field::fr_from_be_bytes_mod_order(seed)
}

fn derive_nonce_key(secret: Fr) -> Fr {
    hash_scalars(&[Fr::from(NONCE_DOMAIN_TAG), secret])
}

fn deterministic_nonce(nonce_key: Fr, message: Fr) -> Fr {
    hash_scalars(&[nonce_key, message])
}

/// Fiat-Shamir challenge `c = H(R.x, R.y, Pk.x, Pk.y, msg)`, binding the
/// public key into the hash (strong Fiat-Shamir).
fn challenge_hash(r: EdwardsAffine, pk: EdwardsAffine, message: Fr) -> Fr {
    hash_scalars(&[r.x, r.y, pk.x, pk.y, message])
}

/// Deterministically sign `message` (already reduced to a field element,
/// see §4.4's message-binding note) with `secret`.
pub fn sign(secret: Fr, message: Fr) -> Signature {
    let public = derive_public(secret).0;
    let nonce_key = derive_nonce_key(secret);
    let r_scalar = deterministic_nonce(nonce_key, message);
    let r_point = scalar_mul(generator(), r_scalar);
    let c = challenge_hash(r_point, public, message);
    let s = r_scalar + c * secret;
    Signature { r: r_point, s }
}

/// Native signature verification: `s*G == R + c*Pk`, cofactor-cleared by
/// multiplying through by the curve's cofactor (8 = 2^3).
pub fn verify(pk: PublicKey, message: Fr, sig: &Signature) -> bool {
    if pk.0.is_zero() || !pk.0.is_on_curve() || !sig.r.is_on_curve() {
        return false;
    }
    let c = challenge_hash(sig.r, pk.0, message);
    let lhs = scalar_mul(generator(), sig.s);
    let rhs = (sig.r.into_group() + scalar_mul(pk.0, c).into_group()).into_affine();
    let mut diff = lhs.into_group() - rhs.into_group();
    diff.double_in_place();
    diff.double_in_place();
    diff.double_in_place();
    diff.is_zero()
}

/// Compress a point to 32 bytes: the `y` coordinate, big-endian, with the
/// sign of `x` folded into the otherwise-unused top bit (`F`'s modulus is
/// ~254 bits, so bit 255 of a canonical encoding is always zero).
pub fn compress_point(p: &EdwardsAffine) -> [u8; SCALAR_BYTES] {
    let mut bytes = fr_to_be_bytes(&p.y);
    if p.x.into_bigint().is_odd() {
        bytes[0] |= 0x80;
    }
    bytes
}

/// Decompress a point, rejecting non-canonical `y` or non-residue `x^2`.
pub fn decompress_point(bytes: &[u8; SCALAR_BYTES]) -> Option<EdwardsAffine> {
    let sign = (bytes[0] & 0x80) != 0;
    let mut unsigned = *bytes;
    unsigned[0] &= 0x7f;
    let y = crate::field::fr_from_be_bytes_checked(&unsigned)?;

    let a = <ark_ed_on_bn254::EdwardsConfig as TECurveConfig>::COEFF_A;
    let d = <ark_ed_on_bn254::EdwardsConfig as TECurveConfig>::COEFF_D;
    let y2 = y * y;
    let numerator = Fr::from(1u64) - y2;
    let denominator = a - d * y2;
    let denom_inv = denominator.inverse()?;
    let x2 = numerator * denom_inv;
    let mut x = x2.sqrt()?;
    if x.into_bigint().is_odd() != sign {
        x = -x;
    }
    let point = EdwardsAffine::new_unchecked(x, y);
    point.is_on_curve().then_some(point)
}

/// Serialize a signature to its 64-byte wire form: compressed `R` then
/// `S` as a raw 32-byte big-endian scalar.
pub fn signature_to_bytes(sig: &Signature) -> [u8; 2 * SCALAR_BYTES] {
    let mut out = [0u8; 2 * SCALAR_BYTES];
    out[..SCALAR_BYTES].copy_from_slice(&compress_point(&sig.r));
    out[SCALAR_BYTES..].copy_from_slice(&fr_to_be_bytes(&sig.s));
    out
}

/// Parse a 64-byte signature, rejecting malformed points or an
/// out-of-range `S`.
pub fn signature_from_bytes(bytes: &[u8]) -> Option<Signature> {
    if bytes.len() != 2 * SCALAR_BYTES {
        return None;
    }
    let r = decompress_point(bytes[..SCALAR_BYTES].try_into().ok()?)?;
    let s = crate::field::fr_from_be_bytes_checked(&bytes[SCALAR_BYTES..])?;
    Some(Signature { r, s })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(byte: u8) -> Fr {
        secret_from_seed(&[byte; SCALAR_BYTES])
    }

    #[test]
    fn sign_and_verify_roundtrip() {
        let secret = seeded(0x11);
        let pk = derive_public(secret);
        let message = Fr::from(42u64);
        let sig = sign(secret, message);
        assert!(verify(pk, message, &sig));
    }

    #[test]
    fn wrong_message_rejected() {
        let secret = seeded(0x22);
        let pk = derive_public(secret);
        let sig = sign(secret, Fr::from(1u64));
        assert!(!verify(pk, Fr::from(2u64), &sig));
    }

    #[test]
    fn wrong_key_rejected() {
        let secret = seeded(0x33);
        let other_secret = seeded(0x44);
        let other_pk = derive_public(other_secret);
        let message = Fr::from(7u64);
        let sig = sign(secret, message);
        assert!(!verify(other_pk, message, &sig));
    }

    #[test]
    fn point_compression_roundtrip() {
        let secret = seeded(0x55);
        let pk = derive_public(secret);
        let bytes = compress_point(&pk.0);
        let decompressed = decompress_point(&bytes).expect("valid point");
        assert_eq!(decompressed, pk.0);
    }

    #[test]
    fn signature_serialization_roundtrip() {
        let secret = seeded(0x66);
        let message = Fr::from(9u64);
        let sig = sign(secret, message);
        let bytes = signature_to_bytes(&sig);
        let parsed = signature_from_bytes(&bytes).expect("valid signature");
        assert_eq!(parsed, sig);
    }
}
