use criterion::{criterion_group, criterion_main, Criterion};

use goosig::group::GroupParams;
use goosig::moduli;
use goosig::params::TAG_LOCAL;
use goosig::signature;
use goosig::transcript::Transcript;

fn witness(gp: &GroupParams) -> (goosig::bigint::Int, goosig::bigint::Int) {
    let mut t = Transcript::new(&TAG_LOCAL, b"bench-witness");
    (t.uniform(gp.bits), t.uniform(gp.bits))
}

pub fn sign_and_verify(c: &mut Criterion) {
    let n = moduli::modulus_from_bytes(&moduli::RSA2048);
    let gp = GroupParams::new(n, None, None).unwrap();
    let (s, w) = witness(&gp);
    let c1 = gp.canonicalize(&gp.comb_n_pow(&s, &w));

    let mut g = c.benchmark_group("rsa2048");
    g.sample_size(10);
    g.bench_function("sign", |b| b.iter(|| signature::sign(&gp, b"bench", &s, &w).unwrap()));

    let sig = signature::sign(&gp, b"bench", &s, &w).unwrap();
    g.bench_function("verify", |b| b.iter(|| signature::verify(&gp, b"bench", &c1, &sig).unwrap()));
}

pub fn group_construction(c: &mut Criterion) {
    let n = moduli::modulus_from_bytes(&moduli::RSA2048);
    let mut g = c.benchmark_group("rsa2048");
    g.sample_size(10);
    g.bench_function("group params + comb build", |b| {
        b.iter(|| GroupParams::new(n.clone(), None, None).unwrap())
    });
}

criterion_group!(benches, sign_and_verify, group_construction);
criterion_main!(benches);
