use dleq::{
    prove_batch, BatchProof, Commitments, DleqProof, Generators, Group, Ristretto255, Witness,
};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn batch_inputs(
    rng: &mut StdRng,
    n: usize,
) -> (
    Vec<<Ristretto255 as Group>::Element>,
    Vec<<Ristretto255 as Group>::Element>,
    Vec<Witness<Ristretto255>>,
) {
    let base = Ristretto255::generator_g();
    let g = (0..n)
        .map(|_| Ristretto255::scalar_mul(&base, &Ristretto255::random_scalar(rng)))
        .collect();
    let h = (0..n)
        .map(|_| Ristretto255::scalar_mul(&base, &Ristretto255::random_scalar(rng)))
        .collect();
    let x = (0..n).map(|_| Witness::random(rng)).collect();
    (g, h, x)
}

proptest! {
    #[test]
    fn proof_verifies_for_any_seeded_statement(
        seed in any::<u64>(),
        g_seed in any::<[u8; 16]>(),
        h_seed in any::<[u8; 16]>(),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let generators = Generators::<Ristretto255>::from_seeds(&g_seed, &h_seed).unwrap();

        let witness = Witness::random(&mut rng);
        let (proof, commitments) = DleqProof::prove(&mut rng, &generators, &witness)
            .expect("Proof generation should succeed");

        prop_assert!(proof.verify(&generators, &commitments).is_ok());
    }

    #[test]
    fn proof_fails_for_other_witness(seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let generators = Generators::<Ristretto255>::default();

        let witness = Witness::random(&mut rng);
        let (proof, commitments) = DleqProof::prove(&mut rng, &generators, &witness).unwrap();
        let other = Commitments::from_witness(&generators, &Witness::random(&mut rng));
        prop_assume!(other != commitments);

        prop_assert!(proof.verify(&generators, &other).is_err());
    }

    #[test]
    fn batch_of_any_size_is_bound(seed in any::<u64>(), n in 0usize..12) {
        let mut rng = StdRng::seed_from_u64(seed);
        let (g, h, x) = batch_inputs(&mut rng, n);

        let (proofs, xg, xh) = prove_batch(&mut rng, &g, &h, &x).unwrap();

        prop_assert_eq!(proofs.len(), n);
        prop_assert!(proofs.verify_each(&g, &h, &xg, &xh).is_ok());
        prop_assert!(proofs.verify_binding(&g, &h, &xg, &xh).is_ok());
    }

    #[test]
    fn batch_with_unequal_lengths_is_rejected(
        seed in any::<u64>(),
        n in 1usize..8,
        drop_at in any::<prop::sample::Index>(),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let (g, h, mut x) = batch_inputs(&mut rng, n);
        x.remove(drop_at.index(n));

        let result = prove_batch(&mut rng, &g, &h, &x);
        prop_assert!(matches!(result, Err(dleq::Error::DifferentLengths)));
    }

    #[test]
    fn decoding_arbitrary_bytes_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..400)) {
        let _ = DleqProof::<Ristretto255>::from_bytes(&bytes);
        let _ = BatchProof::<Ristretto255>::from_bytes(&bytes);
    }
}
