//! Proving and verifying a single DLEQ statement.
//!
//! This example demonstrates:
//! - Deriving a generator pair from seeds
//! - Proving that `g^x` and `h^x` share the exponent `x`
//! - Sending the proof as bytes and verifying it

use dleq::{DleqProof, Generators, Group, Ristretto255, SecureRng, Witness};

fn main() {
    println!("DLEQ proof: basic example\n");

    println!("Step 1: Derive generators from seeds");
    let generators = Generators::<Ristretto255>::from_seeds(b"G0", b"H0")
        .expect("Seeded generators should be valid");
    println!("  g = {}", hex::encode(Ristretto255::element_to_bytes(generators.g())));
    println!("  h = {}\n", hex::encode(Ristretto255::element_to_bytes(generators.h())));

    println!("Step 2: Prove knowledge of x with g^x and h^x");
    let mut rng = SecureRng::new();
    let witness = Witness::random(&mut rng);
    let (proof, commitments) = DleqProof::prove(&mut rng, &generators, &witness)
        .expect("Proof generation should succeed");
    println!("  xG = {}", hex::encode(Ristretto255::element_to_bytes(commitments.xg())));
    println!("  xH = {}\n", hex::encode(Ristretto255::element_to_bytes(commitments.xh())));

    println!("Step 3: Serialize proof for transmission");
    let proof_bytes = proof.to_bytes();
    println!("  Proof size: {} bytes\n", proof_bytes.len());

    println!("Step 4: Verify the received proof");
    let received = DleqProof::<Ristretto255>::from_bytes(&proof_bytes)
        .expect("Deserialization should succeed");
    match received.verify(&generators, &commitments) {
        Ok(()) => println!("  Proof is VALID"),
        Err(e) => println!("  Proof is INVALID: {}", e),
    }
}
