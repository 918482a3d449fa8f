//! End-to-end sign/verify scenarios over the crate's public API.

use goosig::group::GroupParams;
use goosig::moduli;
use goosig::params::TAG_LOCAL;
use goosig::transcript::Transcript;
use goosig::{bigint::Int, signature};

/// Deterministically draw a witness pair `(s, w)` of the group's own bit
/// width from a fixed seed, so these tests don't depend on a system RNG.
fn witness(gp: &GroupParams, seed: &[u8]) -> (Int, Int) {
    let mut t = Transcript::new(&TAG_LOCAL, seed);
    let s = t.uniform(gp.bits);
    let w = t.uniform(gp.bits);
    (s, w)
}

#[test]
fn rsa2048_roundtrip_accepts() {
    let n = moduli::modulus_from_bytes(&moduli::RSA2048);
    let gp = GroupParams::new(n, None, None).unwrap();
    let (s, w) = witness(&gp, b"scenario-s1");
    let c1 = gp.canonicalize(&gp.comb_n_pow(&s, &w));

    let sig = signature::sign(&gp, b"hello", &s, &w).unwrap();
    assert!(signature::verify(&gp, b"hello", &c1, &sig).is_ok());
}

#[test]
fn signing_is_stable_across_runs() {
    let n = moduli::modulus_from_bytes(&moduli::RSA2048);
    let gp = GroupParams::new(n, None, None).unwrap();
    let (s, w) = witness(&gp, b"scenario-s2");

    let sig1 = signature::sign(&gp, b"hello", &s, &w).unwrap();
    let sig2 = signature::sign(&gp, b"hello", &s, &w).unwrap();
    assert_eq!(sig1, sig2);
}

#[test]
fn flipping_message_after_signing_rejects() {
    let n = moduli::modulus_from_bytes(&moduli::RSA2048);
    let gp = GroupParams::new(n, None, None).unwrap();
    let (s, w) = witness(&gp, b"scenario-s3");
    let c1 = gp.canonicalize(&gp.comb_n_pow(&s, &w));

    let sig = signature::sign(&gp, b"hello", &s, &w).unwrap();
    assert!(signature::verify(&gp, b"hello!", &c1, &sig).is_err());
}

#[test]
fn empty_message_over_aol1_accepts() {
    let n = moduli::modulus_from_bytes(&moduli::AOL1);
    let gp = GroupParams::new(n, None, None).unwrap();
    let (s, w) = witness(&gp, b"scenario-s4");
    let c1 = gp.canonicalize(&gp.comb_n_pow(&s, &w));

    let sig = signature::sign(&gp, b"", &s, &w).unwrap();
    assert!(signature::verify(&gp, b"", &c1, &sig).is_ok());
}

#[test]
fn mutated_quotient_over_rsa617_rejects() {
    let n = moduli::modulus_from_bytes(&moduli::RSA617);
    let gp = GroupParams::new(n, None, None).unwrap();
    let (s, w) = witness(&gp, b"scenario-s6");
    let c1 = gp.canonicalize(&gp.comb_n_pow(&s, &w));

    let mut sig = signature::sign(&gp, b"any", &s, &w).unwrap();
    sig.aq = sig.aq.add(&Int::one());
    assert!(signature::verify(&gp, b"any", &c1, &sig).is_err());
}

#[test]
fn wrong_commitment_rejects() {
    let n = moduli::modulus_from_bytes(&moduli::RSA2048);
    let gp = GroupParams::new(n, None, None).unwrap();
    let (s, w) = witness(&gp, b"scenario-wrong-c1");
    let (s_other, w_other) = witness(&gp, b"scenario-wrong-c1-other");
    let wrong_c1 = gp.canonicalize(&gp.comb_n_pow(&s_other, &w_other));

    let sig = signature::sign(&gp, b"hello", &s, &w).unwrap();
    assert!(signature::verify(&gp, b"hello", &wrong_c1, &sig).is_err());
}

/// A 4096-bit group with a long message, as in the larger signing scenario.
/// Runs a comb build at `bits(n) = 4096`, which is noticeably slower than
/// the 2048-bit tests above; kept separate so `cargo test` without
/// `--ignored` stays fast.
#[test]
#[ignore = "exercises a 4096-bit comb build plus a 1 MiB transcript; slow"]
fn aol2_4096_bit_with_long_message_accepts() {
    let n = moduli::modulus_from_bytes(&moduli::AOL2);
    let gp = GroupParams::new(n, None, None).unwrap();
    let (s, w) = witness(&gp, b"scenario-s5");
    let c1 = gp.canonicalize(&gp.comb_n_pow(&s, &w));

    let msg = vec![0x5au8; 1 << 20];
    let sig = signature::sign(&gp, &msg, &s, &w).unwrap();
    assert!(signature::verify(&gp, &msg, &c1, &sig).is_ok());
}
