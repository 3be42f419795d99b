mod common;

use dleq::{
    prove_batch, prove_batch_with_config, BatchConfig, BatchProof, Commitments, DleqProof, Error,
    Generators, Group, P256, Ristretto255, SecureRng,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn ten_instance_batch<G: Group>() {
    let (g, h, x) = common::batch_inputs::<G>(10);
    let mut rng = SecureRng::new();

    let (proofs, xg, xh) = prove_batch(&mut rng, &g, &h, &x).expect("Batch should be proven");

    assert_eq!(proofs.len(), 10);
    assert_eq!(xg.len(), 10);
    assert_eq!(xh.len(), 10);

    proofs
        .verify_each(&g, &h, &xg, &xh)
        .expect("Every proof should verify");
    proofs
        .verify_binding(&g, &h, &xg, &xh)
        .expect("Batch should be bound together");
}

#[test]
fn ten_instance_batch_ristretto255() {
    common::init_tracing();
    ten_instance_batch::<Ristretto255>();
}

#[test]
fn ten_instance_batch_p256() {
    common::init_tracing();
    ten_instance_batch::<P256>();
}

#[test]
fn missing_secret_is_rejected() {
    let (g, h, mut x) = common::batch_inputs::<Ristretto255>(10);
    x.remove(5);

    let mut rng = SecureRng::new();
    let result = prove_batch(&mut rng, &g, &h, &x);
    assert!(matches!(result, Err(Error::DifferentLengths)));
}

#[test]
fn missing_generator_is_rejected() {
    let (mut g, h, x) = common::batch_inputs::<P256>(4);
    g.truncate(3);

    let mut rng = SecureRng::new();
    assert!(matches!(
        prove_batch(&mut rng, &g, &h, &x),
        Err(Error::DifferentLengths)
    ));
}

#[test]
fn single_instance_batch() {
    let (g, h, x) = common::batch_inputs::<Ristretto255>(1);
    let mut rng = SecureRng::new();

    let (proofs, xg, xh) = prove_batch(&mut rng, &g, &h, &x).unwrap();
    assert_eq!(proofs.len(), 1);
    proofs.verify_binding(&g, &h, &xg, &xh).unwrap();
}

#[test]
fn batch_member_is_not_a_standalone_proof() {
    // The shared challenge is derived from the batch transcript.
    let (g, h, x) = common::batch_inputs::<Ristretto255>(3);
    let mut rng = SecureRng::new();
    let (proofs, xg, xh) = prove_batch(&mut rng, &g, &h, &x).unwrap();

    let generators = Generators::new(g[0].clone(), h[0].clone()).unwrap();
    let commitments = Commitments::new(xg[0].clone(), xh[0].clone());
    assert_eq!(
        proofs.proofs()[0].verify(&generators, &commitments),
        Err(Error::VerificationFailed)
    );
    assert!(proofs.proofs()[0]
        .verify_instance(&g[0], &h[0], &xg[0], &xh[0])
        .is_ok());
}

#[test]
fn tampered_commitment_is_reported_at_its_index() {
    let (g, h, x) = common::batch_inputs::<Ristretto255>(6);
    let mut rng = SecureRng::new();
    let (proofs, xg, mut xh) = prove_batch(&mut rng, &g, &h, &x).unwrap();

    xh[4] = Ristretto255::scalar_mul(&h[4], &Ristretto255::random_scalar(&mut rng));

    assert_eq!(
        proofs.verify_each(&g, &h, &xg, &xh),
        Err(Error::VerificationFailed)
    );
    assert_eq!(
        proofs.verify_binding(&g, &h, &xg, &xh),
        Err(Error::VerificationFailed)
    );

    let results = proofs.verify_individually(&g, &h, &xg, &xh).unwrap();
    for (i, result) in results.iter().enumerate() {
        if i == 4 {
            assert_eq!(result, &Err(Error::VerificationFailed));
        } else {
            assert_eq!(result, &Ok(()));
        }
    }
}

#[test]
fn substituted_proof_is_caught_by_binding_only() {
    let (g, h, x) = common::batch_inputs::<Ristretto255>(4);
    let mut rng = SecureRng::new();
    let (first, xg, xh) = prove_batch(&mut rng, &g, &h, &x).unwrap();
    let (second, _, _) = prove_batch(&mut rng, &g, &h, &x).unwrap();

    let mut proofs = first.into_proofs();
    proofs[2] = second.proofs()[2].clone();
    let mixed = BatchProof::from_proofs(proofs);

    assert!(mixed.verify_each(&g, &h, &xg, &xh).is_ok());
    assert_eq!(
        mixed.verify_binding(&g, &h, &xg, &xh),
        Err(Error::VerificationFailed)
    );
}

#[test]
fn reordered_batch_fails_binding() {
    let (mut g, mut h, x) = common::batch_inputs::<Ristretto255>(4);
    let mut rng = SecureRng::new();
    let (proofs, mut xg, mut xh) = prove_batch(&mut rng, &g, &h, &x).unwrap();

    let mut reordered = proofs.into_proofs();
    reordered.swap(0, 1);
    g.swap(0, 1);
    h.swap(0, 1);
    xg.swap(0, 1);
    xh.swap(0, 1);
    let reordered = BatchProof::from_proofs(reordered);

    assert!(reordered.verify_each(&g, &h, &xg, &xh).is_ok());
    assert_eq!(
        reordered.verify_binding(&g, &h, &xg, &xh),
        Err(Error::VerificationFailed)
    );
}

#[test]
fn encoded_batch_verifies() {
    let (g, h, x) = common::batch_inputs::<P256>(5);
    let mut rng = SecureRng::new();
    let (proofs, xg, xh) = prove_batch(&mut rng, &g, &h, &x).unwrap();

    let bytes = proofs.to_bytes().unwrap();
    assert_eq!(bytes.len(), 5 + 32 + 5 * (32 + 33 + 33));

    let decoded = BatchProof::<P256>::from_bytes(&bytes).unwrap();
    assert_eq!(decoded.proofs(), proofs.proofs());
    decoded.verify_binding(&g, &h, &xg, &xh).unwrap();
}

#[test]
fn scheduling_does_not_change_proofs() {
    let (g, h, x) = common::batch_inputs::<Ristretto255>(16);

    let mut rng = StdRng::seed_from_u64(7);
    let (sequential, xg, xh) =
        prove_batch_with_config(&mut rng, &g, &h, &x, &BatchConfig::sequential()).unwrap();

    let mut rng = StdRng::seed_from_u64(7);
    let (parallel, _, _) =
        prove_batch_with_config(&mut rng, &g, &h, &x, &BatchConfig::new(0)).unwrap();

    assert_eq!(sequential.proofs(), parallel.proofs());
    parallel.verify_binding(&g, &h, &xg, &xh).unwrap();
}

#[test]
fn forged_false_statement_passes_each_but_not_binding() {
    // xG_1 = g_1^a and xH_1 = h_1^b with a != b: no exponent links them.
    let (g, h, x) = common::batch_inputs::<Ristretto255>(3);
    let mut rng = SecureRng::new();
    let (honest, mut xg, mut xh) = prove_batch(&mut rng, &g, &h, &x).unwrap();

    let a = Ristretto255::random_scalar(&mut rng);
    let b = Ristretto255::random_scalar(&mut rng);
    assert_ne!(a, b);
    xg[1] = Ristretto255::scalar_mul(&g[1], &a);
    xh[1] = Ristretto255::scalar_mul(&h[1], &b);

    // Keep the batch challenge so every proof still carries the same c.
    let c = honest.challenge().unwrap().clone();
    let r = Ristretto255::random_scalar(&mut rng);
    let vg = Ristretto255::element_mul(
        &Ristretto255::scalar_mul(&g[1], &r),
        &Ristretto255::scalar_mul(&xg[1], &c),
    );
    let vh = Ristretto255::element_mul(
        &Ristretto255::scalar_mul(&h[1], &r),
        &Ristretto255::scalar_mul(&xh[1], &c),
    );

    let mut proofs = honest.into_proofs();
    proofs[1] = DleqProof::new(c, r, vg, vh);
    let forged = BatchProof::from_proofs(proofs);

    assert!(forged.proofs()[1]
        .verify_instance(&g[1], &h[1], &xg[1], &xh[1])
        .is_ok());
    assert!(forged.verify_each(&g, &h, &xg, &xh).is_ok());
    let results = forged.verify_individually(&g, &h, &xg, &xh).unwrap();
    assert!(results.iter().all(|result| result.is_ok()));

    assert_eq!(
        forged.verify_binding(&g, &h, &xg, &xh),
        Err(Error::VerificationFailed)
    );
}

#[test]
fn verification_scheduling_does_not_change_results() {
    let (g, h, x) = common::batch_inputs::<Ristretto255>(10);
    let mut rng = SecureRng::new();
    let (proofs, xg, mut xh) = prove_batch(&mut rng, &g, &h, &x).unwrap();

    for config in [BatchConfig::sequential(), BatchConfig::new(0)] {
        proofs
            .verify_each_with_config(&g, &h, &xg, &xh, &config)
            .unwrap();
        proofs
            .verify_binding_with_config(&g, &h, &xg, &xh, &config)
            .unwrap();
    }

    xh[7] = Ristretto255::scalar_mul(&h[7], &Ristretto255::random_scalar(&mut rng));

    let sequential = proofs
        .verify_individually_with_config(&g, &h, &xg, &xh, &BatchConfig::sequential())
        .unwrap();
    let parallel = proofs
        .verify_individually_with_config(&g, &h, &xg, &xh, &BatchConfig::new(0))
        .unwrap();
    assert_eq!(sequential, parallel);
    assert_eq!(sequential[7], Err(Error::VerificationFailed));

    for config in [BatchConfig::sequential(), BatchConfig::new(0)] {
        assert_eq!(
            proofs.verify_each_with_config(&g, &h, &xg, &xh, &config),
            Err(Error::VerificationFailed)
        );
        assert_eq!(
            proofs.verify_binding_with_config(&g, &h, &xg, &xh, &config),
            Err(Error::VerificationFailed)
        );
    }
}
