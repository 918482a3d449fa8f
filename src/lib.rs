//! A zero-knowledge proof of knowledge over a group of unknown order:
//! prove possession of a committed factoring witness without revealing
//! it, using a Wesolowski-style compressed proof and a Fiat-Shamir
//! transcript built from an HMAC-seeded expandable PRNG.
//!
//! The group in play is `(Z/nZ)* / {±1}` for a public modulus `n` whose
//! factorization is unknown to the verifier. [`group::GroupParams`]
//! holds the modulus, the two public generators, and the precomputed
//! exponentiation tables every other module leans on. [`signature`]
//! ties the pieces together into `sign`/`verify`.

pub mod bigint;
pub mod challenge;
pub mod error;
pub mod group;
pub mod moduli;
pub mod params;
pub mod signature;
pub mod transcript;

pub use bigint::{Int, SignedInt};
pub use error::{Error, Result};
pub use group::GroupParams;
pub use signature::{sign, verify, Signature};
