//! Fixed-base comb exponentiation for the two public generators.
//!
//! A comb trades memory for multiplications: split the exponent into
//! `shifts` windows of `bits_per_window` bits, further split each window
//! across `adds_per_shift` interleaved streams covering disjoint bit
//! ranges, and precompute one table of `points_per_add` entries per
//! stream per shift. Evaluating `base^e` is then a pure product of table
//! lookups, no squaring required, because each table entry already has
//! its position's power-of-two baked in.
//!
//! Two generators share one comb: `g` and `h` each get their own table
//! built from the same selected `(P, A, S, B)` parameters, and
//! [`Comb::pow`] evaluates `g^a * h^b` by looking up and multiplying both
//! tables' contributions in a single pass.

use crate::bigint::Int;
use crate::params::MAX_COMB_SIZE;

/// A selected comb parameterisation: `points_per_add` (P) precomputed
/// values per stream per shift, `adds_per_shift` (A) interleaved streams,
/// `shifts` (S) windows, each `bits_per_window` (B) bits wide, with
/// `points_per_add = 2^bits_per_window` by construction so that every
/// possible window value has a direct table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CombSpec {
    pub points_per_add: usize,
    pub adds_per_shift: usize,
    pub shifts: usize,
    pub bits_per_window: usize,
    pub size: usize,
}

impl CombSpec {
    /// Select the comb parameters covering an exponent of `bits` width.
    /// Enumerates `(P, A, S, B)` with `A·S·B ≥ bits` and `P·A·S ≤ 512`,
    /// minimising `S` first, then `size`, then lexicographically on
    /// `(P, A, B)`. Deterministic, so two implementations given the same
    /// exponent width always select the same comb shape.
    pub fn select(bits: usize) -> Self {
        let bits = bits.max(1);

        for shifts in 1..=MAX_COMB_SIZE {
            let mut best: Option<CombSpec> = None;

            for bits_per_window in 1..=9usize {
                let points_per_add = 1usize << bits_per_window;
                if points_per_add.saturating_mul(shifts) > MAX_COMB_SIZE {
                    continue;
                }
                let max_adds = MAX_COMB_SIZE / (points_per_add * shifts);
                if max_adds == 0 {
                    continue;
                }
                let coverage_per_add = shifts * bits_per_window;
                let adds_per_shift = (bits + coverage_per_add - 1) / coverage_per_add;
                if adds_per_shift == 0 || adds_per_shift > max_adds {
                    continue;
                }

                let size = points_per_add * adds_per_shift * shifts;
                let candidate = CombSpec {
                    points_per_add,
                    adds_per_shift,
                    shifts,
                    bits_per_window,
                    size,
                };

                best = Some(match best {
                    None => candidate,
                    Some(cur) => {
                        let cur_key = (cur.size, cur.points_per_add, cur.adds_per_shift, cur.bits_per_window);
                        let cand_key = (
                            candidate.size,
                            candidate.points_per_add,
                            candidate.adds_per_shift,
                            candidate.bits_per_window,
                        );
                        if cand_key < cur_key {
                            candidate
                        } else {
                            cur
                        }
                    }
                });
            }

            if let Some(spec) = best {
                return spec;
            }
        }

        unreachable!("a comb covering any practical exponent width fits within the 512-point cap")
    }

    /// Total bits covered by this comb (`adds_per_shift · shifts · bits_per_window`).
    pub fn coverage_bits(&self) -> usize {
        self.adds_per_shift * self.shifts * self.bits_per_window
    }

    fn offset(&self, stream: usize, shift: usize) -> usize {
        stream * (self.shifts * self.bits_per_window) + shift * self.bits_per_window
    }
}

/// Per-base precomputed table: `table[shift][stream][digit] = base^(digit * 2^offset(stream, shift)) mod n`.
struct BaseTable {
    entries: Vec<Vec<Vec<Int>>>,
}

impl BaseTable {
    fn build(base: &Int, n: &Int, spec: &CombSpec) -> Self {
        let mut entries = Vec::with_capacity(spec.shifts);
        for shift in 0..spec.shifts {
            let mut per_shift = Vec::with_capacity(spec.adds_per_shift);
            for stream in 0..spec.adds_per_shift {
                let mut per_stream = Vec::with_capacity(spec.points_per_add);
                let base_at_offset = base.powm(&Int::one().shl(spec.offset(stream, shift)), n);
                let mut acc = Int::one();
                for _ in 0..spec.points_per_add {
                    per_stream.push(acc.clone());
                    acc = acc.mulmod(&base_at_offset, n);
                }
                per_shift.push(per_stream);
            }
            entries.push(per_shift);
        }
        Self { entries }
    }

    fn lookup(&self, shift: usize, stream: usize, digit: usize) -> &Int {
        &self.entries[shift][stream][digit]
    }
}

/// A comb covering a fixed exponent width, holding precomputed tables for
/// both public generators.
pub struct Comb {
    spec: CombSpec,
    g_table: BaseTable,
    h_table: BaseTable,
}

impl Comb {
    pub fn build(g: &Int, h: &Int, n: &Int, exponent_bits: usize) -> Self {
        let spec = CombSpec::select(exponent_bits);
        let g_table = BaseTable::build(g, n, &spec);
        let h_table = BaseTable::build(h, n, &spec);
        Self {
            spec,
            g_table,
            h_table,
        }
    }

    pub fn spec(&self) -> CombSpec {
        self.spec
    }

    /// `g^a * h^b mod n`. Both exponents must fit within this comb's
    /// coverage; wider values are silently truncated to their low
    /// `coverage_bits()` bits by the digit extraction below, so callers
    /// size the comb (`EXP_BITS` or `bits(n)`) to the exponent class they
    /// intend to raise.
    pub fn pow(&self, a: &Int, b: &Int, n: &Int) -> Int {
        let mut acc = Int::one();
        for shift in 0..self.spec.shifts {
            for stream in 0..self.spec.adds_per_shift {
                let offset = self.spec.offset(stream, shift);
                let da = extract_digit(a, offset, self.spec.bits_per_window);
                let db = extract_digit(b, offset, self.spec.bits_per_window);
                if da != 0 {
                    acc = acc.mulmod(self.g_table.lookup(shift, stream, da), n);
                }
                if db != 0 {
                    acc = acc.mulmod(self.h_table.lookup(shift, stream, db), n);
                }
            }
        }
        acc
    }
}

/// Read `bits` bits of `e` starting at bit `offset`, as a plain `usize`.
fn extract_digit(e: &Int, offset: usize, bits: usize) -> usize {
    let mut digit = 0usize;
    for i in 0..bits {
        if e.bit(offset + i) {
            digit |= 1 << i;
        }
    }
    digit
}
