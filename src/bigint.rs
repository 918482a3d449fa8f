//! A centralized wrapper for the arbitrary-precision integer dependency.
//!
//! It exists for historical reasons: provide an ergonomic, semantically
//! named API over `libpaillier`'s `unknown_order::BigNumber`, and facilitate
//! an easy swap-out of the big-integer back-end without touching call
//! sites elsewhere in the crate.

use libpaillier::unknown_order::BigNumber;
use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A big integer, always treated as non-negative in the arithmetic exposed
/// here. Callers needing a signed exponent use [`Int::pow_signed`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Int(pub(crate) BigNumber);

impl Int {
    pub fn zero() -> Self {
        Self(BigNumber::zero())
    }

    pub fn one() -> Self {
        Self(BigNumber::one())
    }

    pub fn from_u64(v: u64) -> Self {
        Self(BigNumber::from(v))
    }

    /// Import a big-endian byte string.
    pub fn from_be_bytes(bytes: &[u8]) -> Self {
        Self(BigNumber::from_slice(bytes))
    }

    /// Export as a big-endian byte string, zero-padded on the left to
    /// exactly `len` bytes. Truncates silently from the left if the value
    /// is somehow wider than `len` (callers size `len` from the protocol's
    /// known field widths, so this never happens in practice).
    pub fn to_be_bytes_fixed(&self, len: usize) -> Vec<u8> {
        let raw = self.0.to_bytes();
        if raw.len() >= len {
            return raw[raw.len() - len..].to_vec();
        }
        let mut out = vec![0u8; len - raw.len()];
        out.extend_from_slice(&raw);
        out
    }

    pub fn bit_length(&self) -> usize {
        self.0.bit_length() as usize
    }

    /// Read the `i`-th bit (0 = least significant).
    pub fn bit(&self, i: usize) -> bool {
        (self.0.clone() >> i) % 2u64 == BigNumber::one()
    }

    pub fn is_zero(&self) -> bool {
        self.0 == BigNumber::zero()
    }

    pub fn is_even(&self) -> bool {
        !self.bit(0)
    }

    pub fn shl(&self, bits: usize) -> Self {
        Self(self.0.clone() << bits)
    }

    pub fn shr(&self, bits: usize) -> Self {
        Self(self.0.clone() >> bits)
    }

    pub fn add(&self, other: &Self) -> Self {
        Self(&self.0 + &other.0)
    }

    pub fn sub(&self, other: &Self) -> Self {
        Self(&self.0 - &other.0)
    }

    pub fn mul(&self, other: &Self) -> Self {
        Self(&self.0 * &other.0)
    }

    /// Euclidean division, truncated towards zero (both operands are
    /// non-negative in every call site in this crate).
    pub fn div(&self, other: &Self) -> Self {
        Self(&self.0 / &other.0)
    }

    pub fn rem(&self, other: &Self) -> Self {
        Self(&self.0 % &other.0)
    }

    pub fn divmod(&self, other: &Self) -> (Self, Self) {
        (self.div(other), self.rem(other))
    }

    pub fn addmod(&self, other: &Self, n: &Self) -> Self {
        Self((&self.0 + &other.0) % &n.0)
    }

    pub fn submod(&self, other: &Self, n: &Self) -> Self {
        Self(((&self.0 - &other.0) + &n.0) % &n.0)
    }

    pub fn mulmod(&self, other: &Self, n: &Self) -> Self {
        Self(self.0.modmul(&other.0, &n.0))
    }

    pub fn sqrmod(&self, n: &Self) -> Self {
        Self(self.0.modmul(&self.0, &n.0))
    }

    /// `pow(base, e, n)`. A negative `e` is handled as
    /// `invert(base, n)^(-e) mod n`, treating the group as abelian with
    /// freely available inverses.
    pub fn pow_signed(&self, e: &SignedInt, n: &Self) -> Result<Self> {
        if e.negative {
            let inv = self.invert(n)?;
            Ok(Self(inv.0.modpow(&e.magnitude.0, &n.0)))
        } else {
            Ok(Self(self.0.modpow(&e.magnitude.0, &n.0)))
        }
    }

    /// Non-negative-exponent modular exponentiation, the common case.
    pub fn powm(&self, e: &Self, n: &Self) -> Self {
        Self(self.0.modpow(&e.0, &n.0))
    }

    /// Modular inverse. Fails with [`Error::NotInvertible`] if
    /// `gcd(self, n) != 1`; callers treat this as a protocol-level failure,
    /// never retried.
    pub fn invert(&self, n: &Self) -> Result<Self> {
        self.0
            .invert(&n.0)
            .map(Self)
            .ok_or(Error::NotInvertible)
    }

    pub fn gcd(&self, other: &Self) -> Self {
        Self(self.0.gcd(&other.0))
    }

    pub fn is_one(&self) -> bool {
        self.0.is_one()
    }

    /// Jacobi symbol `(a / n)` for odd `n > 0`, computed via quadratic
    /// reciprocity. `libpaillier`'s backend doesn't expose this directly,
    /// so it's hand-rolled the same way the rest of the pack does for
    /// Legendre symbols over a single prime.
    pub fn jacobi(&self, n: &Self) -> i32 {
        let mut a = self.rem(n).0;
        let mut m = n.0.clone();
        let mut result = 1i32;

        if a == BigNumber::zero() {
            return 0;
        }

        while a != BigNumber::zero() {
            while (&a % 2) == BigNumber::zero() {
                a = &a / 2;
                let r = &m % 8;
                if r == BigNumber::from(3u64) || r == BigNumber::from(5u64) {
                    result = -result;
                }
            }
            std::mem::swap(&mut a, &mut m);
            if (&a % 4) == BigNumber::from(3u64) && (&m % 4) == BigNumber::from(3u64) {
                result = -result;
            }
            a %= &m;
        }

        if m.is_one() {
            result
        } else {
            0
        }
    }

    /// Miller-Rabin primality test with `rounds` independent witnesses
    /// drawn from `rng`.
    pub fn is_probable_prime(&self, rounds: usize, rng: &mut (impl CryptoRng + RngCore)) -> bool {
        if self.0 < BigNumber::from(2u64) {
            return false;
        }
        if self.0 == BigNumber::from(2u64) || self.0 == BigNumber::from(3u64) {
            return true;
        }
        if self.is_even() {
            return false;
        }

        let n_minus_1: BigNumber = &self.0 - 1;
        let mut d = n_minus_1.clone();
        let mut r = 0u32;
        while (&d % 2) == BigNumber::zero() {
            d = &d / 2;
            r += 1;
        }

        'witness: for _ in 0..rounds {
            let a = BigNumber::from_rng(&n_minus_1, rng);
            let a = if a < BigNumber::from(2u64) { BigNumber::from(2u64) } else { a };

            let mut x = a.modpow(&d, &self.0);
            if x.is_one() || x == n_minus_1 {
                continue 'witness;
            }

            for _ in 1..r {
                x = x.modmul(&x, &self.0);
                if x == n_minus_1 {
                    continue 'witness;
                }
            }

            return false;
        }

        true
    }

    pub fn neg(&self) -> Self {
        Self(-&self.0)
    }

    pub fn as_big_number(&self) -> &BigNumber {
        &self.0
    }
}

/// A possibly-negative exponent, used by [`Int::pow_signed`].
#[derive(Debug, Clone)]
pub struct SignedInt {
    pub negative: bool,
    pub magnitude: Int,
}

impl SignedInt {
    pub fn non_negative(magnitude: Int) -> Self {
        Self {
            negative: false,
            magnitude,
        }
    }

    pub fn negative(magnitude: Int) -> Self {
        Self {
            negative: true,
            magnitude,
        }
    }
}

impl From<u64> for Int {
    fn from(v: u64) -> Self {
        Int::from_u64(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_bytes() {
        let x = Int::from_be_bytes(&[0x01, 0x02, 0x03]);
        let bytes = x.to_be_bytes_fixed(8);
        assert_eq!(bytes, vec![0, 0, 0, 0, 0, 0x01, 0x02, 0x03]);
        assert_eq!(Int::from_be_bytes(&bytes), x);
    }

    #[test]
    fn pow_inverse_roundtrip() {
        let n = Int::from_u64(10_000_019 * 10_000_079);
        let base = Int::from_u64(12345);
        let e = Int::from_u64(97);
        let pos = base.pow_signed(&SignedInt::non_negative(e.clone()), &n).unwrap();
        let neg = base.pow_signed(&SignedInt::negative(e), &n).unwrap();
        assert_eq!(pos.mulmod(&neg, &n), Int::one());
    }

    #[test]
    fn jacobi_known_values() {
        let n = Int::from_u64(9);
        assert_eq!(Int::from_u64(5).jacobi(&n), 1);
        assert_eq!(Int::from_u64(1).jacobi(&n), 1);
    }
}
