use rand_core::CryptoRngCore;
use zeroize::Zeroize;

use super::{Commitments, DleqProof, Generators, Transcript, Witness};
use crate::{Group, Result};

/// Prover for DLEQ proofs.
///
/// Proves knowledge of `x` such that `xG = g^x` and `xH = h^x` without revealing `x`.
///
/// # Security
///
/// - Always sample nonces from a cryptographically secure RNG such as
///   [`SecureRng`](crate::SecureRng)
/// - Bind proofs to their application context with [`Transcript::append_context`]
/// - The witness and every nonce are zeroized on drop
pub struct Prover<G: Group> {
    generators: Generators<G>,
    witness: Witness<G>,
    commitments: Commitments<G>,
}

impl<G: Group> Prover<G> {
    /// Creates a prover, computing the commitments `xG = g^x` and `xH = h^x`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dleq::{Generators, Prover, Ristretto255, SecureRng, Witness};
    ///
    /// let mut rng = SecureRng::new();
    /// let generators = Generators::<Ristretto255>::default();
    /// let prover = Prover::new(generators, Witness::random(&mut rng));
    /// let proof = prover.prove(&mut rng).unwrap();
    /// ```
    pub fn new(generators: Generators<G>, witness: Witness<G>) -> Self {
        let commitments = Commitments::from_witness(&generators, &witness);
        Self {
            generators,
            witness,
            commitments,
        }
    }

    /// Returns the public commitments.
    pub fn commitments(&self) -> &Commitments<G> {
        &self.commitments
    }

    /// Generates a non-interactive proof using Fiat-Shamir.
    pub fn prove<R: CryptoRngCore>(&self, rng: &mut R) -> Result<DleqProof<G>> {
        let mut transcript = Transcript::new();
        self.prove_with_transcript(rng, &mut transcript)
    }

    /// Generates a proof using a caller-prepared transcript.
    ///
    /// Allows the caller to add context to the transcript; the verifier must add the
    /// same context.
    pub fn prove_with_transcript<R: CryptoRngCore>(
        &self,
        rng: &mut R,
        transcript: &mut Transcript,
    ) -> Result<DleqProof<G>> {
        let nonce = Nonce::<G>::random(rng);
        let vg = G::scalar_mul(self.generators.g(), nonce.v());
        let vh = G::scalar_mul(self.generators.h(), nonce.v());

        transcript.append_group_name(G::name());
        transcript.append_instance::<G>(
            self.generators.g(),
            self.generators.h(),
            self.commitments.xg(),
            self.commitments.xh(),
            &vg,
            &vh,
        );
        let challenge = transcript.challenge_scalar::<G>();

        let response = respond::<G>(&nonce, &challenge, self.witness.secret());
        Ok(DleqProof::new(challenge, response, vg, vh))
    }
}

/// Computes the response `r = v - c·x`.
pub(crate) fn respond<G: Group>(
    nonce: &Nonce<G>,
    challenge: &G::Scalar,
    x: &G::Scalar,
) -> G::Scalar {
    let mut cx = G::scalar_mul_scalar(challenge, x);
    let r = G::scalar_sub(nonce.v(), &cx);
    cx.zeroize();
    r
}

/// Secret per-proof nonce `v`. Zeroized on drop.
#[derive(Debug)]
pub(crate) struct Nonce<G: Group> {
    v: G::Scalar,
}

impl<G: Group> Nonce<G> {
    pub(crate) fn random<R: CryptoRngCore>(rng: &mut R) -> Self {
        Self {
            v: G::random_scalar(rng),
        }
    }

    pub(crate) fn v(&self) -> &G::Scalar {
        &self.v
    }
}

impl<G: Group> Drop for Nonce<G> {
    fn drop(&mut self) {
        self.v.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Ristretto255, SecureRng};

    #[test]
    fn commitments_match_witness() {
        let mut rng = SecureRng::new();
        let generators = Generators::<Ristretto255>::default();
        let x = Ristretto255::random_scalar(&mut rng);

        let prover = Prover::new(generators.clone(), Witness::new(x.clone()));
        assert_eq!(
            prover.commitments().xg(),
            &Ristretto255::scalar_mul(generators.g(), &x)
        );
    }

    #[test]
    fn response_satisfies_validity_identity() {
        let mut rng = SecureRng::new();
        let g = Ristretto255::generator_g();
        let x = Ristretto255::random_scalar(&mut rng);
        let c = Ristretto255::random_scalar(&mut rng);
        let nonce = Nonce::<Ristretto255>::random(&mut rng);

        let r = respond::<Ristretto255>(&nonce, &c, &x);

        // g^r · (g^x)^c = g^v
        let xg = Ristretto255::scalar_mul(&g, &x);
        let lhs = Ristretto255::element_mul(
            &Ristretto255::scalar_mul(&g, &r),
            &Ristretto255::scalar_mul(&xg, &c),
        );
        assert_eq!(lhs, Ristretto255::scalar_mul(&g, nonce.v()));
    }

    #[test]
    fn proofs_are_randomized() {
        let mut rng = SecureRng::new();
        let generators = Generators::<Ristretto255>::default();
        let prover = Prover::new(generators, Witness::random(&mut rng));

        let p1 = prover.prove(&mut rng).unwrap();
        let p2 = prover.prove(&mut rng).unwrap();
        assert_ne!(p1, p2);
    }
}
