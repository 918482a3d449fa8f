//! The Fiat-Shamir transcript PRNG: a deterministic, domain-separated,
//! expandable byte stream. Used both to derive private blinding
//! randomness during signing and, seeded identically by prover and
//! verifier, to hash commitments into a challenge and a prime.
//!
//! The seeding step follows the same shape as the ephemeral-scalar RNG
//! elsewhere in this crate's history: absorb a domain tag and arbitrary
//! caller bytes into an HMAC-SHA256 instance, then expand the resulting
//! seed with a stream cipher. Unlike that one-shot use, a transcript here
//! is read from repeatedly (`uniform`, `random_int`, `random_prime`), so
//! it carries a bit reservoir across calls instead of emitting a single
//! seed and discarding itself.

use hmac::{Mac, SimpleHmac};
use rand::{CryptoRng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use sha2::Sha256;
use tracing::error;
use zeroize::Zeroize;

use crate::bigint::Int;
use crate::error::{Error, Result};
use crate::params::Tag;

/// Miller-Rabin round count for primes accepted by [`Transcript::random_prime`].
const PRIME_MR_ROUNDS: usize = 24;

/// Attempt budget for [`Transcript::random_prime`] before giving up with
/// [`Error::NoPrime`].
const PRIME_ATTEMPT_BUDGET: usize = 1 << 16;

/// A deterministic, expandable byte stream seeded from a 32-byte domain
/// tag plus caller-supplied transcript bytes. Identical seed material
/// yields an identical output sequence, which is the entire point: the
/// signer and verifier must derive the same challenge and prime from the
/// same public transcript.
pub struct Transcript {
    rng: ChaCha20Rng,
    /// Bits left over from the last byte pulled out of `rng`, used to
    /// hand out exact-width words without wasting entropy at the byte
    /// boundary.
    reservoir: u64,
    reservoir_bits: u32,
    total_bits_consumed: u64,
}

impl Transcript {
    /// Absorb `tag` and `data` into an HMAC-SHA256 instance and seed a
    /// `ChaCha20Rng` from the resulting digest. This is the crate's
    /// stand-in for the HMAC-DRBG `init(seed)` step of §6: a keyed hash
    /// for absorption, a CSPRNG for expansion.
    pub fn new(tag: &Tag, data: &[u8]) -> Self {
        let mut mac = SimpleHmac::<Sha256>::new_from_slice(tag)
            .expect("HMAC accepts keys of any length");
        mac.update(data);
        let mut seed: [u8; 32] = mac.finalize().into_bytes().into();

        let transcript = Self {
            rng: ChaCha20Rng::from_seed(seed),
            reservoir: 0,
            reservoir_bits: 0,
            total_bits_consumed: 0,
        };
        seed.zeroize();
        transcript
    }

    /// Total number of bits handed out so far, for callers that want to
    /// account for the entropy budget they've spent.
    pub fn total_bits_consumed(&self) -> u64 {
        self.total_bits_consumed
    }

    fn refill(&mut self) {
        let word = self.rng.next_u64();
        self.reservoir = (self.reservoir << 32) ^ (word & 0xFFFF_FFFF);
        // Only ever refills from empty or near-empty, so 32 fresh bits at
        // a time keeps the reservoir within a u64 without needing to
        // track more than 64 bits of backlog.
        self.reservoir_bits += 32;
        debug_assert!(self.reservoir_bits <= 64);
    }

    /// Draw `bits` uniformly-distributed bits as a big integer in
    /// `[0, 2^bits)`. Uniformity is exact: only whole machine words are
    /// pulled from the underlying stream cipher, and bits are consumed
    /// from a reservoir rather than re-sampled per call, so no bias is
    /// introduced by truncation.
    pub fn uniform(&mut self, bits: usize) -> Int {
        let mut out = Int::zero();
        let mut remaining = bits;

        while remaining > 0 {
            if self.reservoir_bits == 0 {
                self.refill();
            }
            let take = remaining.min(self.reservoir_bits as usize).min(32);
            let shift = self.reservoir_bits - take as u32;
            let mask = (1u64 << take) - 1;
            let chunk = (self.reservoir >> shift) & mask;
            out = out.shl(take).add(&Int::from_u64(chunk));
            self.reservoir_bits -= take as u32;
            remaining -= take;
        }

        self.total_bits_consumed += bits as u64;
        out
    }

    /// Draw an integer uniformly in `[0, max)` by rejection sampling on
    /// `uniform(bitlen(max))`.
    pub fn random_int(&mut self, max: &Int) -> Int {
        if max.is_zero() {
            return Int::zero();
        }
        let bits = max.bit_length();
        loop {
            let candidate = self.uniform(bits);
            if &candidate < max {
                return candidate;
            }
        }
    }

    /// Rejection-sample odd integers of exactly `bits` bits until
    /// Miller-Rabin accepts. Witness randomness for Miller-Rabin is drawn
    /// from a *separate* transcript seeded with [`crate::params::TAG_PRIMALITY`],
    /// decoupling prime-search randomness from witness randomness so a
    /// biased or adversarial witness choice can't steer which primes get
    /// accepted.
    pub fn random_prime(&mut self, bits: usize) -> Result<Int> {
        let mut witness_source = witness_rng_from(self);

        for _ in 0..PRIME_ATTEMPT_BUDGET {
            let mut candidate = self.uniform(bits);
            // Force the top and bottom bits: exactly `bits` wide, odd.
            candidate = candidate.add(&Int::one().shl(bits - 1));
            if candidate.is_even() {
                candidate = candidate.add(&Int::one());
            }

            if candidate.is_probable_prime(PRIME_MR_ROUNDS, &mut witness_source) {
                return Ok(candidate);
            }
        }

        error!("goo signature: random_prime exhausted its attempt budget at {bits} bits");
        Err(Error::NoPrime)
    }
}

/// Derive a witness-sampling RNG for Miller-Rabin, seeded from the
/// `PRIMALITY` tag plus how many bits this transcript has already
/// produced. Folding in the consumption counter means two different
/// prime searches within the same sign/verify call don't share witness
/// randomness even though they share a domain tag.
fn witness_rng_from(t: &Transcript) -> impl CryptoRng + RngCore {
    let mut mac = SimpleHmac::<Sha256>::new_from_slice(&crate::params::TAG_PRIMALITY)
        .expect("HMAC accepts keys of any length");
    mac.update(&t.total_bits_consumed.to_be_bytes());
    let mut seed: [u8; 32] = mac.finalize().into_bytes().into();
    let rng = ChaCha20Rng::from_seed(seed);
    seed.zeroize();
    rng
}
