//! A decentralized-identity core built around a pair of Groth16 circuits:
//! one that verifies an EdDSA signature entirely inside a constraint
//! system (proof of key possession), and one that proves a committed age
//! meets a public threshold without revealing the age.
//!
//! # Unsafe setup
//!
//! [`DidService::new`]/[`DidService::new_insecure`] run Groth16's
//! circuit-specific setup in-process, in a single party. That produces a
//! proving key derived from "toxic waste" this process never destroys
//! securely — anyone who recovers it can forge proofs. A production
//! deployment needs a multi-party trusted setup ceremony; this crate
//! exposes the unsafe single-party setup as an explicit configuration
//! point and does not attempt to fix it (see `DESIGN.md`).
//!
//! # Layout
//!
//! - [`field`] — the scalar field and embedded twisted Edwards curve (C1).
//! - [`hash`] — the MiMC sponge, native and in-circuit (C2).
//! - [`eddsa`] — key generation, signing, native verification, and the
//!   in-circuit verifier (C3).
//! - [`circuits`] — the authentication and age-threshold circuits (C5, C6).
//! - [`service`] — [`DidService`], the registry, and the eight external
//!   operations (C7).
//! - [`codec`] — hex/DID-id wire encoding (C8).
//! - [`types`] — newtypes wrapping raw scalars/bytes at the service API.
//! - [`error`] — the crate-wide error enum.

pub mod circuits;
pub mod codec;
pub mod eddsa;
pub mod error;
pub mod field;
pub mod hash;
pub mod service;
pub mod types;

pub use error::{DidError, DidResult};
pub use service::{
    AuthenticationMethod, CredentialProof, Did, DidDocument, DidService, VerifiableCredential,
};
pub use types::{PublicKeyBytes, ProofBytes, Salt, SecretScalar, SignatureBytes};

/// The crate version, exposed the way a host embedding this core might
/// want to report it in a diagnostics endpoint.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
