//! In-circuit EdDSA verification (used by `circuits::auth`, C5).
//!
//! Mirrors [`super::verify`] exactly: same challenge hash, same
//! cofactor-clearing trick (triple doubling of both sides rather than of a
//! subtracted difference, which sidesteps needing a `Sub` impl on the curve
//! gadget but is otherwise the identical check).

use crate::field::Fr;
use crate::hash::gadget::hash_vars;
use ark_ed_on_bn254::constraints::EdwardsVar;
use ark_r1cs_std::fields::fp::FpVar;
use ark_r1cs_std::groups::curves::twisted_edwards::AffineVar;
use ark_r1cs_std::prelude::*;
use ark_relations::r1cs::SynthesisError;

/// Enforce that `(r, s)` is a valid signature on `message` under `pk`,
/// returning the boolean result as a constrained variable (the caller
/// decides whether to `enforce_equal` it to `true` or fold it into a
/// larger check).
pub fn verify_in_circuit(
    generator: &EdwardsVar,
    pk: &EdwardsVar,
    r: &EdwardsVar,
    s: &FpVar<Fr>,
    message: &FpVar<Fr>,
) -> Result<Boolean<Fr>, SynthesisError> {
    let challenge = hash_vars(&[
        point_x(r),
        point_y(r),
        point_x(pk),
        point_y(pk),
        message.clone(),
    ])?;

    let s_bits = s.to_bits_le()?;
    let c_bits = challenge.to_bits_le()?;

    let lhs = generator.scalar_mul_le(s_bits.iter())?;
    let c_pk = pk.scalar_mul_le(c_bits.iter())?;
    let rhs = r.clone() + &c_pk;

    let lhs8 = lhs.double()?.double()?.double()?;
    let rhs8 = rhs.double()?.double()?.double()?;
    lhs8.is_eq(&rhs8)
}

fn point_x(p: &AffineVar<ark_ed_on_bn254::EdwardsConfig, FpVar<Fr>>) -> FpVar<Fr> {
    p.x.clone()
}

fn point_y(p: &AffineVar<ark_ed_on_bn254::EdwardsConfig, FpVar<Fr>>) -> FpVar<Fr> {
    p.y.clone()
}
