//! Group arithmetic over a composite modulus of unknown order.
//!
//! The group in play throughout this crate is the quotient
//! `(Z/nZ)* / {±1}`: every element `x` is identified with `n - x`, and a
//! canonical representative is always the smaller of the two. This
//! module owns that canonicalisation plus the two exponentiation
//! strategies the protocol needs — windowed-NAF simultaneous
//! multi-exponentiation for verifier-side products of several bases with
//! independent exponents ([`wnaf`]), and fixed-base combs for the two
//! public generators ([`comb`]).

pub mod comb;
pub mod wnaf;

use crate::bigint::Int;
use crate::error::{Error, Result};
use crate::params::{DEFAULT_G, DEFAULT_H, MAX_RSA_BITS, MIN_RSA_BITS};

pub use comb::Comb;

/// The public parameters of a signature group: the modulus and its two
/// generators, plus the cached values derived from them that every
/// exponentiation in the crate leans on.
pub struct GroupParams {
    pub n: Int,
    pub g: Int,
    pub h: Int,
    /// `floor(n / 2)`, the boundary used to canonicalise group elements.
    pub nh: Int,
    pub bits: usize,
    /// Fixed-base comb for `g`, `h` at the blinding-exponent width
    /// (`EXP_BITS`).
    pub comb_exp: Comb,
    /// Fixed-base comb for `g`, `h` at the modulus's own bit width
    /// (`bits(n)`), used when the exponent is itself bounded by `n`.
    pub comb_n: Comb,
}

impl GroupParams {
    /// Build group parameters for modulus `n`, rejecting anything outside
    /// `[MIN_RSA_BITS, MAX_RSA_BITS]`. `g`/`h` default to the protocol's
    /// fixed small generators unless the caller supplies its own pair (a
    /// custom RSA modulus encoded by the caller may require one).
    pub fn new(n: Int, g: Option<Int>, h: Option<Int>) -> Result<Self> {
        let bits = n.bit_length();
        if bits < MIN_RSA_BITS || bits > MAX_RSA_BITS {
            return Err(Error::InvalidParam);
        }

        let g = g.unwrap_or_else(|| Int::from_u64(DEFAULT_G));
        let h = h.unwrap_or_else(|| Int::from_u64(DEFAULT_H));
        if g.is_zero() || h.is_zero() || g >= n || h >= n {
            return Err(Error::InvalidParam);
        }

        let nh = n.shr(1);
        let comb_exp = Comb::build(&g, &h, &n, crate::params::EXP_BITS);
        let comb_n = Comb::build(&g, &h, &n, bits);

        Ok(Self {
            n,
            g,
            h,
            nh,
            bits,
            comb_exp,
            comb_n,
        })
    }

    /// Map `x` to its canonical representative `min(x, n - x)`. Never
    /// called inside a chain of `mulmod`s — only before hashing an
    /// element into a transcript or comparing two elements for equality.
    pub fn canonicalize(&self, x: &Int) -> Int {
        let neg = self.n.sub(x);
        if neg < *x {
            neg
        } else {
            x.clone()
        }
    }

    /// `g^a * h^b mod n`, via the blinding-width comb.
    pub fn comb_exp_pow(&self, a: &Int, b: &Int) -> Int {
        self.comb_exp.pow(a, b, &self.n)
    }

    /// `g^a * h^b mod n`, via the `bits(n)`-width comb.
    pub fn comb_n_pow(&self, a: &Int, b: &Int) -> Int {
        self.comb_n.pow(a, b, &self.n)
    }

    /// `b0^e0 * b1^e1 * b2^e2 mod n`, via WNAF simultaneous
    /// multi-exponentiation. Used by the verifier to evaluate each of the
    /// five proof equations in one pass.
    pub fn wnaf_triple_pow(
        &self,
        b0: &Int,
        e0: &Int,
        b1: &Int,
        e1: &Int,
        b2: &Int,
        e2: &Int,
    ) -> Int {
        wnaf::triple_pow(&self.n, b0, e0, b1, e1, b2, e2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_group() -> GroupParams {
        // 10000019 * 10000079, a 47-bit product of two primes — nowhere
        // near RSA-sized, used only to exercise the arithmetic paths
        // cheaply. bit_length() rejection is bypassed by constructing
        // the comb directly at this width in these tests (callers in the
        // real protocol always pass a >= MIN_RSA_BITS modulus).
        let n = Int::from_u64(10_000_019 * 10_000_079);
        GroupParams {
            nh: n.shr(1),
            bits: n.bit_length(),
            comb_exp: Comb::build(&Int::from_u64(2), &Int::from_u64(3), &n, 64),
            comb_n: Comb::build(&Int::from_u64(2), &Int::from_u64(3), &n, n.bit_length()),
            g: Int::from_u64(2),
            h: Int::from_u64(3),
            n,
        }
    }

    #[test]
    fn canonicalize_picks_smaller_twin() {
        let gp = small_group();
        let x = Int::from_u64(5);
        let y = gp.n.sub(&x);
        assert_eq!(gp.canonicalize(&x), gp.canonicalize(&y));
    }

    #[test]
    fn comb_matches_naive_powm() {
        let gp = small_group();
        let a = Int::from_u64(12345);
        let b = Int::from_u64(6789);
        let expected = gp
            .g
            .powm(&a, &gp.n)
            .mulmod(&gp.h.powm(&b, &gp.n), &gp.n);
        assert_eq!(gp.comb_exp_pow(&a, &b), expected);
    }

    #[test]
    fn wnaf_triple_matches_naive_powm() {
        let gp = small_group();
        let e0 = Int::from_u64(111);
        let e1 = Int::from_u64(222);
        let e2 = Int::from_u64(333);
        let expected = gp
            .g
            .powm(&e0, &gp.n)
            .mulmod(&gp.h.powm(&e1, &gp.n), &gp.n)
            .mulmod(&Int::from_u64(7).powm(&e2, &gp.n), &gp.n);
        let got = gp.wnaf_triple_pow(&gp.g, &e0, &gp.h, &e1, &Int::from_u64(7), &e2);
        assert_eq!(got, expected);
    }
}
