//! In-circuit MiMC sponge gadget. Mirrors `hash::permute`/`MimcSponge`
//! field-for-field — this parity is the soundness-critical invariant
//! called out in §4.1.

use super::round_constants;
use crate::field::Fr;
use ark_r1cs_std::fields::{fp::FpVar, FieldVar};
use ark_relations::r1cs::SynthesisError;

fn permute_var(
    mut xl: FpVar<Fr>,
    mut xr: FpVar<Fr>,
    key: &FpVar<Fr>,
) -> Result<(FpVar<Fr>, FpVar<Fr>), SynthesisError> {
    let constants = round_constants();
    let last = constants.len() - 1;
    for (i, c) in constants.iter().enumerate() {
        let c_var = FpVar::constant(*c);
        let t = &xl + key + &c_var;
        let t2 = &t * &t;
        let t4 = &t2 * &t2;
        let t5 = &t4 * &t;
        if i == last {
            xr = &xr + &t5;
        } else {
            let new_xr = xl.clone();
            xl = &xr + &t5;
            xr = new_xr;
        }
    }
    Ok((xl, xr))
}

/// In-circuit counterpart of [`super::MimcSponge`].
pub struct MimcSpongeVar {
    xl: FpVar<Fr>,
    xr: FpVar<Fr>,
}

impl MimcSpongeVar {
    pub fn new() -> Self {
        Self {
            xl: FpVar::constant(Fr::from(0u64)),
            xr: FpVar::constant(Fr::from(0u64)),
        }
    }

    pub fn absorb(&mut self, x: &FpVar<Fr>) -> Result<(), SynthesisError> {
        self.xl = &self.xl + x;
        let zero = FpVar::constant(Fr::from(0u64));
        let (l, r) = permute_var(self.xl.clone(), self.xr.clone(), &zero)?;
        self.xl = l;
        self.xr = r;
        Ok(())
    }

    pub fn squeeze(&self) -> FpVar<Fr> {
        self.xl.clone()
    }
}

impl Default for MimcSpongeVar {
    fn default() -> Self {
        Self::new()
    }
}

/// Hash a sequence of allocated field elements inside the circuit.
pub fn hash_vars(inputs: &[FpVar<Fr>]) -> Result<FpVar<Fr>, SynthesisError> {
    let mut sponge = MimcSpongeVar::new();
    for x in inputs {
        sponge.absorb(x)?;
    }
    Ok(sponge.squeeze())
}
