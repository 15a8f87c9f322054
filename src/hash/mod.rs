//! MiMC sponge hash (C2) — a permutation-based algebraic hash over `F`,
//! used both natively (this module) and inside circuits (`hash::gadget`).
//! The two must compute bit-identical results; any drift between them
//! destroys the soundness of every circuit built on top of this hash.

pub mod gadget;

use crate::field::{fr_from_be_bytes_mod_order, fr_to_be_bytes, Fr};
use ark_ff::UniformRand;
use std::sync::OnceLock;

/// MiMC-Feistel round count. For a ~254-bit field with the `x^5` round
/// function, `ceil(log_5(p)) ≈ 110` rounds are needed before a degree-5
/// algebraic attack covers the full field; this matches the usual MiMC
/// parameterization for BN254-sized fields.
pub const ROUNDS: usize = 110;

const CONSTANTS_SEED: u64 = 0x4d694d43_5370_6e67; // "MiMCSpng" tag, arbitrary but fixed

/// Round constants, generated once from a fixed seed so that the native
/// hash and the in-circuit gadget (`hash::gadget`) always agree.
pub(crate) fn round_constants() -> &'static [Fr] {
    static CONSTANTS: OnceLock<Vec<Fr>> = OnceLock::new();
    CONSTANTS.get_or_init(|| {
        use ark_std::rand::{rngs::StdRng, SeedableRng};
        let mut rng = StdRng::seed_from_u64(CONSTANTS_SEED);
        (0..ROUNDS).map(|_| Fr::rand(&mut rng)).collect()
    })
}

/// One MiMC-Feistel permutation round: `x^5` nonlinearity, Feistel swap on
/// every round but the last (the circomlib-style MiMC sponge structure).
fn permute(mut xl: Fr, mut xr: Fr, key: Fr) -> (Fr, Fr) {
    let constants = round_constants();
    let last = constants.len() - 1;
    for (i, c) in constants.iter().enumerate() {
        let t = xl + key + *c;
        let t2 = t * t;
        let t4 = t2 * t2;
        let t5 = t4 * t;
        if i == last {
            xr += t5;
        } else {
            let new_xr = xl;
            xl = xr + t5;
            xr = new_xr;
        }
    }
    (xl, xr)
}

/// A MiMC sponge with capacity element `xr` and rate element `xl`. Each
/// `absorb` folds one field element into the rate and re-permutes; `sum`
/// squeezes the rate as the digest.
#[derive(Clone, Debug, Default)]
pub struct MimcSponge {
    xl: Fr,
    xr: Fr,
}

impl MimcSponge {
    pub fn new() -> Self {
        Self {
            xl: Fr::from(0u64),
            xr: Fr::from(0u64),
        }
    }

    /// Absorb a single field element.
    pub fn absorb_scalar(&mut self, x: Fr) {
        self.xl += x;
        let (l, r) = permute(self.xl, self.xr, Fr::from(0u64));
        self.xl = l;
        self.xr = r;
    }

    /// Absorb a big-endian byte string, reduced mod `|F|` per §4.1.
    pub fn absorb_bytes(&mut self, bytes: &[u8]) {
        self.absorb_scalar(fr_from_be_bytes_mod_order(bytes));
    }

    /// Squeeze the current digest without consuming the sponge.
    pub fn squeeze(&self) -> Fr {
        self.xl
    }

    /// Squeeze the digest as a 32-byte big-endian scalar encoding.
    pub fn sum(&self) -> [u8; 32] {
        fr_to_be_bytes(&self.squeeze())
    }
}

/// Hash a sequence of field elements, absorbed left-to-right.
pub fn hash_scalars(inputs: &[Fr]) -> Fr {
    let mut sponge = MimcSponge::new();
    for x in inputs {
        sponge.absorb_scalar(*x);
    }
    sponge.squeeze()
}

/// Hash a sequence of big-endian byte strings, each absorbed as one
/// reduced field element, left-to-right.
pub fn hash_be_parts(parts: &[&[u8]]) -> Fr {
    let mut sponge = MimcSponge::new();
    for p in parts {
        sponge.absorb_bytes(p);
    }
    sponge.squeeze()
}

/// Trim a `u64` to its minimal big-endian encoding (no leading zero bytes,
/// at least one byte), as used for the age/salt commitment in §4.6.
pub fn minimal_be_bytes(n: u64) -> Vec<u8> {
    let full = n.to_be_bytes();
    let first_nonzero = full.iter().position(|&b| b != 0).unwrap_or(full.len() - 1);
    full[first_nonzero..].to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic() {
        let a = hash_scalars(&[Fr::from(1u64), Fr::from(2u64)]);
        let b = hash_scalars(&[Fr::from(1u64), Fr::from(2u64)]);
        assert_eq!(a, b);
    }

    #[test]
    fn sensitive_to_input_order() {
        let a = hash_scalars(&[Fr::from(1u64), Fr::from(2u64)]);
        let b = hash_scalars(&[Fr::from(2u64), Fr::from(1u64)]);
        assert_ne!(a, b);
    }

    #[test]
    fn minimal_be_bytes_strips_leading_zeros() {
        assert_eq!(minimal_be_bytes(0), vec![0]);
        assert_eq!(minimal_be_bytes(25), vec![25]);
        assert_eq!(minimal_be_bytes(256), vec![1, 0]);
    }

    #[test]
    fn commitment_hiding_statistical() {
        // Same age, independent salts: collisions should be negligible
        // over a large sample (§8 "Commitment hiding test").
        use ark_std::rand::{rngs::StdRng, SeedableRng};
        let mut rng = StdRng::seed_from_u64(7);
        let age = minimal_be_bytes(25);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..1000 {
            let salt = Fr::rand(&mut rng);
            let salt_bytes = fr_to_be_bytes(&salt);
            let c = hash_be_parts(&[&age, &salt_bytes]);
            assert!(seen.insert(fr_to_be_bytes(&c)), "unexpected commitment collision");
        }
    }
}
