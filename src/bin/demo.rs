//! End-to-end walkthrough of the DID lifecycle: create a DID, issue an
//! age credential, authenticate, and produce/verify both proof kinds.
//! Mirrors the shape of the teacher's `snarkjs` demo binary, but logs
//! through `log`/`env_logger` instead of emoji `println!`s.

use did_zk_core::{DidService, ProofBytes};
use log::info;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut rng = ark_std::test_rng();

    info!("compiling circuits and running Groth16 setup (unsafe, single-party)");
    let service = DidService::new(&mut rng)?;

    let (did, secret) = service.create_did(&mut rng)?;
    info!("created DID {}", did.id);

    let (credential, salt) = service.issue_age_credential(&mut rng, &did.id, 25)?;
    info!("issued age credential {}", credential.id);

    let challenge = b"example-challenge";
    let (auth_proof, signature) =
        service.authenticate_did(&mut rng, &did.id, secret, challenge)?;
    info!(
        "authenticated: proof={}B signature={}B",
        auth_proof.0.len(),
        signature.0.len()
    );

    let authenticated = service.verify_authentication(&did.id, &auth_proof, &signature, challenge)?;
    info!("authentication verifies: {authenticated}");

    let tampered: ProofBytes = ProofBytes(auth_proof.0.clone());
    let wrong_challenge = b"different-challenge";
    let replay_rejected =
        !service.verify_authentication(&did.id, &tampered, &signature, wrong_challenge)?;
    info!("proof replay under a different challenge rejected: {replay_rejected}");

    let age_proof = service.create_age_proof(&mut rng, &did.id, &credential.id, 18, 25, salt)?;
    let age_ok = service.verify_age_proof(&did.id, &credential.id, 18, &age_proof)?;
    info!("age >= 18 proof verifies: {age_ok}");

    let age_proof_strict =
        service.create_age_proof(&mut rng, &did.id, &credential.id, 30, 25, salt)?;
    let age_fails_higher_bar =
        !service.verify_age_proof(&did.id, &credential.id, 30, &age_proof_strict)?;
    info!("same subject against threshold 30 fails: {age_fails_higher_bar}");

    Ok(())
}
