//! ECDSA recovered-key verification library
//!
//! This library checks whether a candidate private key is consistent with
//! known (hash, signature) pairs by reconstructing the ephemeral nonce and
//! validating the ECDSA signing identity modulo the group order.

pub mod error;
pub mod math;
pub mod provider;
pub mod signature;
pub mod verify;

pub use error::MathError;
pub use signature::{Signature, SignatureInput};
