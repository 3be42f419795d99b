//! Proving ten DLEQ statements under one shared challenge.

use dleq::{prove_batch, BatchProof, Group, P256, SecureRng, Witness};

fn main() {
    let n = 10;
    let g: Vec<_> = (0..n)
        .map(|i| P256::element_from_seed(format!("G{}", i).as_bytes()))
        .collect::<Result<_, _>>()
        .expect("Seeded generators should be valid");
    let h: Vec<_> = (0..n)
        .map(|i| P256::element_from_seed(format!("H{}", i).as_bytes()))
        .collect::<Result<_, _>>()
        .expect("Seeded generators should be valid");

    let mut rng = SecureRng::new();
    let x: Vec<Witness<P256>> = (0..n).map(|_| Witness::random(&mut rng)).collect();

    let (proofs, xg, xh) = prove_batch(&mut rng, &g, &h, &x).expect("Batch should be proven");
    let bytes = proofs.to_bytes().expect("Batch should encode");
    println!("Proved {} statements in {} bytes", proofs.len(), bytes.len());

    let received = BatchProof::<P256>::from_bytes(&bytes).expect("Batch should decode");
    match received.verify_binding(&g, &h, &xg, &xh) {
        Ok(()) => println!("Batch is VALID"),
        Err(e) => println!("Batch is INVALID: {}", e),
    }

    let mut short = x;
    short.remove(5);
    match prove_batch(&mut rng, &g, &h, &short) {
        Ok(_) => println!("Unexpected: mismatched batch was proven"),
        Err(e) => println!("Mismatched batch rejected: {}", e),
    }
}
