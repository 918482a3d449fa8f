//! Windowed non-adjacent form (WNAF) simultaneous multi-exponentiation.
//!
//! Each of the three bases gets its own odd-multiple table of `2^(w-2)`
//! entries at window width `w = 6` (`TABLEN = 16`), built once per call
//! from the base and its modular inverse. The three exponents are then
//! scanned together from the least significant digit up, sharing the
//! accumulator and interleaving each base's sparse digits into the same
//! square-and-multiply chain, which is what makes the simultaneous form
//! cheaper than three independent exponentiations.

use crate::bigint::Int;
use crate::params::{TABLEN, WINDOW_SIZE};

/// Table of odd multiples `1*b, 3*b, 5*b, ..., (2*TABLEN-1)*b mod n` used
/// to look up a WNAF digit's multiple in one step.
struct OddTable {
    entries: Vec<Int>,
}

impl OddTable {
    fn build(base: &Int, n: &Int) -> Self {
        let sq = base.sqrmod(n);
        let mut entries = Vec::with_capacity(TABLEN);
        entries.push(base.clone());
        for i in 1..TABLEN {
            let next = entries[i - 1].mulmod(&sq, n);
            entries.push(next);
        }
        Self { entries }
    }

    /// Look up `digit * base mod n` for an odd signed digit in
    /// `[-(2*TABLEN-1), 2*TABLEN-1]`. Negative digits are served by
    /// inverting the corresponding positive-digit entry.
    fn get(&self, digit: i32, inverses: &OddTable) -> Int {
        debug_assert!(digit % 2 != 0);
        let idx = (digit.unsigned_abs() as usize - 1) / 2;
        if digit > 0 {
            self.entries[idx].clone()
        } else {
            inverses.entries[idx].clone()
        }
    }
}

/// Convert `e` into windowed non-adjacent form: signed digits (each odd
/// or zero, magnitude `< 2^w`), least-significant first, such that
/// `e = sum(digit_i * 2^i)`.
fn to_wnaf(e: &Int, w: usize) -> Vec<i32> {
    let modulus = 1i64 << w;
    let half = modulus / 2;
    let mut digits = Vec::new();
    let mut rest = e.clone();

    while !rest.is_zero() {
        let d = if rest.bit(0) {
            let mut window = 0i64;
            for b in 0..w {
                if rest.bit(b) {
                    window |= 1 << b;
                }
            }
            if window >= half {
                window - modulus
            } else {
                window
            }
        } else {
            0
        };

        digits.push(d as i32);
        if d > 0 {
            rest = rest.sub(&Int::from_u64(d as u64));
        } else if d < 0 {
            rest = rest.add(&Int::from_u64((-d) as u64));
        }
        rest = rest.shr(1);
    }

    while digits.last() == Some(&0) {
        digits.pop();
    }
    digits
}

/// `b0^e0 * b1^e1 * b2^e2 mod n`, by WNAF simultaneous
/// multi-exponentiation: one shared squaring per bit position, sparse
/// multiplications driven by each base's own non-adjacent form.
pub fn triple_pow(n: &Int, b0: &Int, e0: &Int, b1: &Int, e1: &Int, b2: &Int, e2: &Int) -> Int {
    let w = WINDOW_SIZE;

    let t0 = OddTable::build(b0, n);
    let t0_inv = OddTable::build(&b0.invert(n).expect("base invertible mod n"), n);
    let t1 = OddTable::build(b1, n);
    let t1_inv = OddTable::build(&b1.invert(n).expect("base invertible mod n"), n);
    let t2 = OddTable::build(b2, n);
    let t2_inv = OddTable::build(&b2.invert(n).expect("base invertible mod n"), n);

    let w0 = to_wnaf(e0, w);
    let w1 = to_wnaf(e1, w);
    let w2 = to_wnaf(e2, w);
    let top = w0.len().max(w1.len()).max(w2.len());

    let mut acc = Int::one();
    for i in (0..top).rev() {
        acc = acc.sqrmod(n);
        if let Some(&d) = w0.get(i) {
            if d != 0 {
                acc = acc.mulmod(&t0.get(d, &t0_inv), n);
            }
        }
        if let Some(&d) = w1.get(i) {
            if d != 0 {
                acc = acc.mulmod(&t1.get(d, &t1_inv), n);
            }
        }
        if let Some(&d) = w2.get(i) {
            if d != 0 {
                acc = acc.mulmod(&t2.get(d, &t2_inv), n);
            }
        }
    }
    acc
}
