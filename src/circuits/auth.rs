//! Authentication circuit (C5): asserts `EdDSAVerify(pk, R, S, message) = 1`
//! in-circuit, over the same twisted-Edwards curve and MiMC hash the
//! native signer (`eddsa`) uses.
//!
//! §9 / OQ-1: the source this spec was distilled from leaves the
//! challenge out of the auth circuit's public inputs, so a single proof
//! can be replayed against any challenge once a verifier accepts it for
//! one. This circuit closes that gap by making `message` (the challenge,
//! reduced to one field element) a public input alongside `pk` and the
//! signature, so `VerifyAuthentication` is binding the proof to a
//! specific challenge, not merely to a key.

use crate::eddsa::gadget::verify_in_circuit;
use crate::field::{generator, EdwardsAffine, Fr};
use ark_ed_on_bn254::constraints::EdwardsVar;
use ark_r1cs_std::fields::fp::FpVar;
use ark_r1cs_std::prelude::*;
use ark_relations::r1cs::{ConstraintSynthesizer, ConstraintSystemRef, SynthesisError};

/// Witness for the authentication circuit.
///
/// Allocation order fixes the public-input vector's layout:
/// `[pk.x, pk.y, r.x, r.y, s, message]`. Callers building a public witness
/// for `Groth16::verify` must reproduce this order exactly.
#[derive(Clone, Default)]
pub struct AuthCircuit {
    pub pk: Option<EdwardsAffine>,
    pub r: Option<EdwardsAffine>,
    pub s: Option<Fr>,
    pub message: Option<Fr>,
}

impl AuthCircuit {
    /// A witness-free circuit, usable only to compile the constraint
    /// system shape for `circuit_specific_setup` — Groth16 setup never
    /// reads `Option` contents, only the constraint topology they produce.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_witness(
        pk: EdwardsAffine,
        r: EdwardsAffine,
        s: Fr,
        message: Fr,
    ) -> Self {
        Self {
            pk: Some(pk),
            r: Some(r),
            s: Some(s),
            message: Some(message),
        }
    }
}

impl ConstraintSynthesizer<Fr> for AuthCircuit {
    fn generate_constraints(self, cs: ConstraintSystemRef<Fr>) -> Result<(), SynthesisError> {
        let pk_var = EdwardsVar::new_input(cs.clone(), || {
            self.pk.ok_or(SynthesisError::AssignmentMissing)
        })?;
        let r_var = EdwardsVar::new_input(cs.clone(), || {
            self.r.ok_or(SynthesisError::AssignmentMissing)
        })?;
        let s_var = FpVar::new_input(cs.clone(), || {
            self.s.ok_or(SynthesisError::AssignmentMissing)
        })?;
        let message_var = FpVar::new_input(cs.clone(), || {
            self.message.ok_or(SynthesisError::AssignmentMissing)
        })?;
        let generator_var = EdwardsVar::new_constant(cs, generator())?;

        let ok = verify_in_circuit(&generator_var, &pk_var, &r_var, &s_var, &message_var)?;
        ok.enforce_equal(&Boolean::TRUE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eddsa;
    use ark_groth16::Groth16;
    use ark_relations::r1cs::{ConstraintSystem, OptimizationGoal};
    use ark_snark::SNARK;
    use ark_std::rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn satisfiable_on_valid_signature() {
        let secret = eddsa::secret_from_seed(&[0x7a; 32]);
        let pk = eddsa::derive_public(secret);
        let message = Fr::from(99u64);
        let sig = eddsa::sign(secret, message);

        let cs = ConstraintSystem::<Fr>::new_ref();
        cs.set_optimization_goal(OptimizationGoal::Constraints);
        let circuit = AuthCircuit::with_witness(pk.0, sig.r, sig.s, message);
        circuit.generate_constraints(cs.clone()).unwrap();
        assert!(cs.is_satisfied().unwrap());
    }

    #[test]
    fn unsatisfiable_on_wrong_message() {
        let secret = eddsa::secret_from_seed(&[0x7b; 32]);
        let pk = eddsa::derive_public(secret);
        let sig = eddsa::sign(secret, Fr::from(1u64));

        let cs = ConstraintSystem::<Fr>::new_ref();
        let circuit = AuthCircuit::with_witness(pk.0, sig.r, sig.s, Fr::from(2u64));
        circuit.generate_constraints(cs.clone()).unwrap();
        assert!(!cs.is_satisfied().unwrap());
    }

    #[test]
    fn end_to_end_groth16_roundtrip() {
        let mut rng = StdRng::seed_from_u64(1234);
        let secret = eddsa::secret_from_seed(&[0x01; 32]);
        let pk = eddsa::derive_public(secret);
        let message = Fr::from(7u64);
        let sig = eddsa::sign(secret, message);

        let (pk_params, vk_params) =
            Groth16::<crate::field::Curve>::circuit_specific_setup(AuthCircuit::empty(), &mut rng)
                .unwrap();

        let circuit = AuthCircuit::with_witness(pk.0, sig.r, sig.s, message);
        let proof =
            Groth16::<crate::field::Curve>::prove(&pk_params, circuit, &mut rng).unwrap();

        let public_inputs = vec![pk.0.x, pk.0.y, sig.r.x, sig.r.y, sig.s, message];
        let valid =
            Groth16::<crate::field::Curve>::verify(&vk_params, &public_inputs, &proof).unwrap();
        assert!(valid);

        let wrong_message = Fr::from(8u64);
        let tampered_inputs = vec![pk.0.x, pk.0.y, sig.r.x, sig.r.y, sig.s, wrong_message];
        let invalid =
            Groth16::<crate::field::Curve>::verify(&vk_params, &tampered_inputs, &proof).unwrap();
        assert!(!invalid);
    }
}
