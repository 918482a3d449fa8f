//! Error taxonomy for the core library.
//!
//! Every fallible operation returns a [`Result`] over [`Error`]. There are no
//! panics on malformed caller input. The documented taxonomy also lists an
//! allocation-failure code; Rust's global allocator aborts the process
//! rather than returning an error, so there is no reachable constructor for
//! it and it is omitted here rather than kept as dead code.

use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

/// Mirrors the fixed error taxonomy: each variant is a terminal outcome,
/// never retried internally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// `n` outside `[MIN_RSA_BITS, MAX_RSA_BITS]` bits, or `g`, `h` invalid.
    InvalidParam,
    /// A modular inverse was required on a value not coprime to the modulus.
    NotInvertible,
    /// Prime search exhausted its attempt budget.
    NoPrime,
    /// Any verification check failed. Carries no detail: callers must not
    /// be able to distinguish which check failed, to avoid an oracle.
    InvalidSignature,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Error::InvalidParam => "invalid group parameter",
            Error::NotInvertible => "value not invertible modulo n",
            Error::NoPrime => "prime search exhausted its attempt budget",
            Error::InvalidSignature => "signature verification failed",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for Error {}
