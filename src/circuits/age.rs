//! Age-threshold circuit (C6): asserts `threshold <= actualAge` and that
//! `actualAge`/`salt` open a previously-issued MiMC commitment, without
//! revealing either private value.

use super::{enforce_le, COMPARISON_BIT_WIDTH};
use crate::field::Fr;
use crate::hash::gadget::hash_vars;
use ark_r1cs_std::eq::EqGadget;
use ark_r1cs_std::fields::fp::FpVar;
use ark_relations::r1cs::{ConstraintSynthesizer, ConstraintSystemRef, SynthesisError};

/// Witness for the age-threshold circuit.
///
/// Allocation order fixes the public-input vector's layout:
/// `[threshold, commitment]`.
#[derive(Clone, Default)]
pub struct AgeThresholdCircuit {
    pub threshold: Option<Fr>,
    pub commitment: Option<Fr>,
    pub actual_age: Option<Fr>,
    pub salt: Option<Fr>,
}

impl AgeThresholdCircuit {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_witness(threshold: Fr, commitment: Fr, actual_age: Fr, salt: Fr) -> Self {
        Self {
            threshold: Some(threshold),
            commitment: Some(commitment),
            actual_age: Some(actual_age),
            salt: Some(salt),
        }
    }
}

impl ConstraintSynthesizer<Fr> for AgeThresholdCircuit {
    fn generate_constraints(self, cs: ConstraintSystemRef<Fr>) -> Result<(), SynthesisError> {
        let threshold_var = FpVar::new_input(cs.clone(), || {
            self.threshold.ok_or(SynthesisError::AssignmentMissing)
        })?;
        let commitment_var = FpVar::new_input(cs.clone(), || {
            self.commitment.ok_or(SynthesisError::AssignmentMissing)
        })?;
        let actual_age_var = FpVar::new_witness(cs.clone(), || {
            self.actual_age.ok_or(SynthesisError::AssignmentMissing)
        })?;
        let salt_var = FpVar::new_witness(cs, || {
            self.salt.ok_or(SynthesisError::AssignmentMissing)
        })?;

        enforce_le(&threshold_var, &actual_age_var, COMPARISON_BIT_WIDTH)?;

        // Equal by construction to `hash_be_parts(&[minimal_be_bytes(age),
        // fr_to_be_bytes(&salt)])` (the native formula in `service`):
        // absorbing a minimal-or-padded big-endian encoding of a value
        // already `< |F|` reduces to that same value, so the two-scalar
        // and two-bytestring forms of the commitment agree bit-for-bit.
        let computed = hash_vars(&[actual_age_var, salt_var])?;
        computed.enforce_equal(&commitment_var)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::{hash_be_parts, minimal_be_bytes};
    use ark_ff::UniformRand;
    use ark_groth16::Groth16;
    use ark_relations::r1cs::ConstraintSystem;
    use ark_snark::SNARK;
    use ark_std::rand::{rngs::StdRng, SeedableRng};

    fn commitment(age: u64, salt: Fr) -> Fr {
        hash_be_parts(&[&minimal_be_bytes(age), &crate::field::fr_to_be_bytes(&salt)])
    }

    #[test]
    fn satisfiable_when_age_meets_threshold() {
        let salt = Fr::from(0xabcdu64);
        let age = Fr::from(25u64);
        let commitment = commitment(25, salt);

        let cs = ConstraintSystem::<Fr>::new_ref();
        let circuit = AgeThresholdCircuit::with_witness(Fr::from(18u64), commitment, age, salt);
        circuit.generate_constraints(cs.clone()).unwrap();
        assert!(cs.is_satisfied().unwrap());
    }

    #[test]
    fn unsatisfiable_when_age_below_threshold() {
        let salt = Fr::from(0xabcdu64);
        let age = Fr::from(17u64);
        let commitment = commitment(17, salt);

        let cs = ConstraintSystem::<Fr>::new_ref();
        let circuit = AgeThresholdCircuit::with_witness(Fr::from(18u64), commitment, age, salt);
        circuit.generate_constraints(cs.clone()).unwrap();
        assert!(!cs.is_satisfied().unwrap());
    }

    #[test]
    fn unsatisfiable_on_commitment_mismatch() {
        let salt = Fr::from(0xabcdu64);
        let age = Fr::from(25u64);
        let wrong_commitment = commitment(26, salt);

        let cs = ConstraintSystem::<Fr>::new_ref();
        let circuit =
            AgeThresholdCircuit::with_witness(Fr::from(18u64), wrong_commitment, age, salt);
        circuit.generate_constraints(cs.clone()).unwrap();
        assert!(!cs.is_satisfied().unwrap());
    }

    #[test]
    fn end_to_end_groth16_roundtrip() {
        let mut rng = StdRng::seed_from_u64(99);
        let salt = Fr::rand(&mut rng);
        let age = Fr::from(25u64);
        let commitment = commitment(25, salt);
        let threshold = Fr::from(18u64);

        let (pk, vk) = Groth16::<crate::field::Curve>::circuit_specific_setup(
            AgeThresholdCircuit::empty(),
            &mut rng,
        )
        .unwrap();

        let circuit = AgeThresholdCircuit::with_witness(threshold, commitment, age, salt);
        let proof = Groth16::<crate::field::Curve>::prove(&pk, circuit, &mut rng).unwrap();

        let public_inputs = vec![threshold, commitment];
        assert!(
            Groth16::<crate::field::Curve>::verify(&vk, &public_inputs, &proof).unwrap()
        );

        let raised_threshold = Fr::from(30u64);
        let tampered_inputs = vec![raised_threshold, commitment];
        assert!(
            !Groth16::<crate::field::Curve>::verify(&vk, &tampered_inputs, &proof).unwrap()
        );
    }
}
