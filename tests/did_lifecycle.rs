//! Black-box integration test driving the full DID lifecycle through the
//! public service API (§8's testable properties), the way
//! `icn-identity`'s `tests/groth16.rs` exercises its Groth16 credential
//! path end to end rather than poking at circuit internals directly.

use ark_std::rand::{rngs::StdRng, SeedableRng};
use did_zk_core::DidService;

#[test]
fn create_issue_authenticate_and_prove_age() {
    let mut rng = StdRng::seed_from_u64(42);
    let service = DidService::new(&mut rng).expect("setup");

    let (did, secret) = service.create_did(&mut rng).expect("create did");
    assert!(did.id.starts_with("did:example:"));

    let (credential, salt) = service
        .issue_age_credential(&mut rng, &did.id, 25)
        .expect("issue credential");
    assert_eq!(
        credential.claims,
        vec![("ageCommitment".to_string(), credential.commitment_id.clone())]
    );
    assert_eq!(credential.proof.verification_method, format!("{}#keys-1", did.id));

    let challenge = b"hello-world";
    let (proof, signature) = service
        .authenticate_did(&mut rng, &did.id, secret, challenge)
        .expect("authenticate");

    assert!(service
        .verify_authentication(&did.id, &proof, &signature, challenge)
        .expect("verify authentication"));

    // Wrong-key rejection: a signature produced under a different DID's
    // secret must not verify against this one's registered key.
    let (_other_did, other_secret) = service.create_did(&mut rng).expect("create other did");
    let (_other_proof, other_signature) = service
        .authenticate_did(&mut rng, &did.id, other_secret, challenge)
        .expect("sign with wrong key (service doesn't check key ownership)");
    assert!(!service
        .verify_authentication(&did.id, &proof, &other_signature, challenge)
        .expect("verify mismatched signature"));

    // Challenge binding (§9 open question, closed): the same proof must
    // not verify under a different challenge.
    assert!(!service
        .verify_authentication(&did.id, &proof, &signature, b"different-challenge")
        .expect("verify under wrong challenge"));

    let age_proof = service
        .create_age_proof(&mut rng, &did.id, &credential.id, 18, 25, salt)
        .expect("create age proof");
    assert!(service
        .verify_age_proof(&did.id, &credential.id, 18, &age_proof)
        .expect("verify age proof at threshold 18"));
    assert!(!service
        .verify_age_proof(&did.id, &credential.id, 30, &age_proof)
        .expect("verify age proof at threshold 30"));
}

#[test]
fn age_proof_below_threshold_fails_to_construct() {
    let mut rng = StdRng::seed_from_u64(7);
    let service = DidService::new(&mut rng).expect("setup");
    let (did, _secret) = service.create_did(&mut rng).expect("create did");
    let (credential, salt) = service
        .issue_age_credential(&mut rng, &did.id, 17)
        .expect("issue credential");

    let result = service.create_age_proof(&mut rng, &did.id, &credential.id, 18, 17, salt);
    assert!(matches!(result, Err(did_zk_core::DidError::CircuitFailed(_))));
}

#[test]
fn unknown_did_reports_not_found() {
    let mut rng = StdRng::seed_from_u64(13);
    let service = DidService::new(&mut rng).expect("setup");
    let secret = {
        let (_did, secret) = service.create_did(&mut rng).expect("create did");
        secret
    };

    let result = service.authenticate_did(&mut rng, "did:example:deadbeef", secret, b"challenge");
    assert!(matches!(result, Err(did_zk_core::DidError::NotFound(_))));
}

#[test]
fn setup_is_deterministic_under_a_fixed_seed() {
    let mut rng_a = StdRng::seed_from_u64(2024);
    let mut rng_b = StdRng::seed_from_u64(2024);

    let service_a = DidService::new(&mut rng_a).expect("setup a");
    let service_b = DidService::new(&mut rng_b).expect("setup b");

    // Two independently-constructed services from the same seed accept
    // and reject proofs identically; this is the externally-observable
    // form of "produces identical vks" (§8) without exposing the raw
    // verifying-key bytes through the public API.
    let (did_a, secret_a) = service_a.create_did(&mut rng_a).expect("create did a");
    let (did_b, secret_b) = service_b.create_did(&mut rng_b).expect("create did b");
    assert_eq!(did_a.id, did_b.id);
    assert_eq!(secret_a.to_hex(), secret_b.to_hex());
}
