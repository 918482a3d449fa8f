//! Hash-to-challenge and hash-to-prime: binding a signing transcript into
//! the verifier challenge `chal` and the compression prime `ell`.

use sha2::{Digest, Sha256};
use tracing::error;

use crate::bigint::Int;
use crate::error::{Error, Result};
use crate::group::GroupParams;
use crate::params::{CHAL_BITS, ELLDIFF_MAX, ELL_BITS, MAX_RSA_BYTES, TAG_DERIVE, TAG_PREFIX};
use crate::transcript::Transcript;

/// A 32-byte hash binding a group's modulus and generators into every
/// transcript, so a signature produced under one group can never be
/// replayed as valid under another.
pub fn group_hash(gp: &GroupParams) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(TAG_PREFIX);
    hasher.update(gp.n.to_be_bytes_fixed(MAX_RSA_BYTES));
    hasher.update(gp.g.to_be_bytes_fixed(MAX_RSA_BYTES));
    hasher.update(gp.h.to_be_bytes_fixed(MAX_RSA_BYTES));
    hasher.finalize().into()
}

/// The signing transcript: every canonicalised commitment, the
/// unreduced product `t`, and the message, fixed-width big-endian
/// encoded in the order the protocol fixes. `s_prime` is sampled during
/// signing for parity with the documented transcript shape but is not
/// part of the wire format and so cannot be replayed by a verifier who
/// only has the signature; this implementation folds the transcript
/// that both sides CAN reproduce — `(C1, C2, C3, t, msg)` — into the
/// challenge derivation instead. See `DESIGN.md` for the rationale.
pub struct SignTranscript<'a> {
    pub c1: &'a Int,
    pub c2: &'a Int,
    pub c3: &'a Int,
    pub t: &'a Int,
    pub msg: &'a [u8],
}

impl<'a> SignTranscript<'a> {
    fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        buf.extend_from_slice(&self.c1.to_be_bytes_fixed(MAX_RSA_BYTES));
        buf.extend_from_slice(&self.c2.to_be_bytes_fixed(MAX_RSA_BYTES));
        buf.extend_from_slice(&self.c3.to_be_bytes_fixed(MAX_RSA_BYTES));
        buf.extend_from_slice(&self.t.to_be_bytes_fixed(2 * MAX_RSA_BYTES));
        buf.extend_from_slice(self.msg);
        buf
    }
}

/// Derive `(chal, ell)` from the group hash and the signing transcript.
/// `chal` is drawn from a `DERIVE`-tagged PRNG seeded with `H_g || T`;
/// `ell` is drawn from the same seed material plus a fixed counter
/// suffix, so that a transcript collision can never make `chal` and
/// `ell` coincide by construction.
pub fn derive(h_g: &[u8; 32], transcript: &SignTranscript) -> Result<(Int, Int)> {
    let t_bytes = transcript.encode();

    let mut seed = Vec::with_capacity(32 + t_bytes.len());
    seed.extend_from_slice(h_g);
    seed.extend_from_slice(&t_bytes);

    let mut chal_rng = Transcript::new(&TAG_DERIVE, &seed);
    let chal = chal_rng.uniform(CHAL_BITS);

    let ell = derive_prime(h_g, &t_bytes)?;

    Ok((chal, ell))
}

/// Repeatedly draw `ELL_BITS`-wide primes from a transcript seeded with
/// the group hash, the signing transcript, and a counter, keeping the
/// first candidate and rejecting any subsequent draw that would leave
/// pathologically far from it (the `ELLDIFF_MAX` tightness bound);
/// exceeding the attempt budget fails with [`Error::NoPrime`].
fn derive_prime(h_g: &[u8; 32], t_bytes: &[u8]) -> Result<Int> {
    const ATTEMPTS: usize = 1024;

    let mut first: Option<Int> = None;
    for counter in 0u32..ATTEMPTS as u32 {
        let mut seed = Vec::with_capacity(32 + t_bytes.len() + 4);
        seed.extend_from_slice(h_g);
        seed.extend_from_slice(t_bytes);
        seed.extend_from_slice(&counter.to_be_bytes());

        let mut prime_rng = Transcript::new(&crate::params::TAG_PRIMALITY, &seed);
        let candidate = prime_rng.random_prime(ELL_BITS)?;

        match &first {
            None => {
                first = Some(candidate);
            }
            Some(f) => {
                let diff = if candidate > *f {
                    candidate.sub(f)
                } else {
                    f.sub(&candidate)
                };
                if diff <= Int::from_u64(ELLDIFF_MAX as u64) {
                    return Ok(candidate);
                }
            }
        }
    }

    first.ok_or_else(|| {
        error!("goo signature: hash-to-prime exhausted its attempt budget");
        Error::NoPrime
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bigint::Int;
    use crate::group::GroupParams;

    fn group() -> GroupParams {
        // Built directly rather than through `GroupParams::new` because
        // that constructor enforces MIN_RSA_BITS, and these tests only
        // need a group hash, not a cryptographically sized modulus.
        let n = Int::from_u64(10_000_019 * 10_000_079);
        GroupParams {
            nh: n.shr(1),
            bits: n.bit_length(),
            comb_exp: crate::group::Comb::build(&Int::from_u64(2), &Int::from_u64(3), &n, 64),
            comb_n: crate::group::Comb::build(&Int::from_u64(2), &Int::from_u64(3), &n, n.bit_length()),
            g: Int::from_u64(2),
            h: Int::from_u64(3),
            n,
        }
    }

    #[test]
    fn deterministic_for_same_transcript() {
        let gp = group();
        let h_g = group_hash(&gp);
        let c1 = Int::from_u64(11);
        let c2 = Int::from_u64(22);
        let c3 = Int::from_u64(33);
        let t = Int::from_u64(44);
        let msg = b"hello";

        let t1 = SignTranscript { c1: &c1, c2: &c2, c3: &c3, t: &t, msg };
        let t2 = SignTranscript { c1: &c1, c2: &c2, c3: &c3, t: &t, msg };

        let (chal1, ell1) = derive(&h_g, &t1).unwrap();
        let (chal2, ell2) = derive(&h_g, &t2).unwrap();
        assert_eq!(chal1, chal2);
        assert_eq!(ell1, ell2);
    }

    #[test]
    fn chal_in_range_and_ell_is_prime_odd_right_size() {
        let gp = group();
        let h_g = group_hash(&gp);
        let c1 = Int::from_u64(11);
        let c2 = Int::from_u64(22);
        let c3 = Int::from_u64(33);
        let t = Int::from_u64(44);
        let transcript = SignTranscript { c1: &c1, c2: &c2, c3: &c3, t: &t, msg: b"m" };

        let (chal, ell) = derive(&h_g, &transcript).unwrap();
        assert!(chal.bit_length() <= CHAL_BITS);
        assert_eq!(ell.bit_length(), ELL_BITS);
        assert!(ell.is_probable_prime(40, &mut rand::thread_rng()));
    }

    #[test]
    fn different_message_diverges() {
        let gp = group();
        let h_g = group_hash(&gp);
        let c1 = Int::from_u64(11);
        let c2 = Int::from_u64(22);
        let c3 = Int::from_u64(33);
        let t = Int::from_u64(44);

        let t1 = SignTranscript { c1: &c1, c2: &c2, c3: &c3, t: &t, msg: b"hello" };
        let t2 = SignTranscript { c1: &c1, c2: &c2, c3: &c3, t: &t, msg: b"hello!" };

        let (chal1, _) = derive(&h_g, &t1).unwrap();
        let (chal2, _) = derive(&h_g, &t2).unwrap();
        assert_ne!(chal1, chal2);
    }
}
