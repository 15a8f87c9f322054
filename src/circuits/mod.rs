//! The two Groth16 circuits this core compiles once at startup: the
//! authentication circuit (C5, `auth`) and the age-threshold circuit (C6,
//! `age`). Both are plain [`ark_relations::r1cs::ConstraintSynthesizer`]
//! implementations over `F`, built the same way `jeevan4476-zksvm`'s
//! `SquareCircuit` is: an `Option`-valued witness struct, consumed once by
//! `generate_constraints`.

pub mod age;
pub mod auth;

/// Fixed bit width every fixed-width comparison gadget in this crate
/// range-checks its operands to. 32 bits comfortably covers any human age
/// while keeping the comparison gadget cheap.
pub const COMPARISON_BIT_WIDTH: usize = 32;

use crate::field::Fr;
use ark_r1cs_std::fields::fp::FpVar;
use ark_r1cs_std::prelude::*;
use ark_relations::r1cs::SynthesisError;

/// Enforce `lhs <= rhs`, where both operands are asserted to fit in
/// `bits` bits. Subtraction alone is not a safe `<=` check over a prime
/// field — `rhs - lhs` wraps around to a field element near `|F|` when
/// `lhs > rhs`, and a naive range check on the *difference* without first
/// bounding both operands would let the prover choose an out-of-range
/// `lhs`/`rhs` pair that cancels back into range. Bounding all three
/// (`lhs`, `rhs`, and `rhs - lhs`) to `bits` bits closes that gap.
pub(crate) fn enforce_le(
    lhs: &FpVar<Fr>,
    rhs: &FpVar<Fr>,
    bits: usize,
) -> Result<(), SynthesisError> {
    enforce_fits(lhs, bits)?;
    enforce_fits(rhs, bits)?;
    let diff = rhs - lhs;
    enforce_fits(&diff, bits)
}

fn enforce_fits(x: &FpVar<Fr>, bits: usize) -> Result<(), SynthesisError> {
    let decomposed = x.to_bits_le()?;
    for bit in &decomposed[bits..] {
        bit.enforce_equal(&Boolean::FALSE)?;
    }
    Ok(())
}
