use super::{Commitments, DleqProof, Generators, Transcript};
use crate::{Error, Group, Result};

/// Verifier for DLEQ proofs.
pub struct Verifier<G: Group> {
    generators: Generators<G>,
    commitments: Commitments<G>,
}

impl<G: Group> Verifier<G> {
    /// Creates a verifier for the statement `(g, h, xG, xH)`.
    pub fn new(generators: Generators<G>, commitments: Commitments<G>) -> Self {
        Self {
            generators,
            commitments,
        }
    }

    /// Verifies a non-interactive proof.
    ///
    /// Returns `Ok(())` if the proof is valid and [`Error::VerificationFailed`]
    /// otherwise. The result is deterministic.
    pub fn verify(&self, proof: &DleqProof<G>) -> Result<()> {
        let mut transcript = Transcript::new();
        self.verify_with_transcript(proof, &mut transcript)
    }

    /// Verifies a proof using a caller-prepared transcript.
    ///
    /// The transcript must carry the same context the prover used.
    pub fn verify_with_transcript(
        &self,
        proof: &DleqProof<G>,
        transcript: &mut Transcript,
    ) -> Result<()> {
        self.commitments.validate()?;

        transcript.append_group_name(G::name());
        verify_instance(
            transcript,
            self.generators.g(),
            self.generators.h(),
            self.commitments.xg(),
            self.commitments.xh(),
            proof,
        )
    }
}

/// Full check of one proof on a transcript that already carries its preamble:
/// the validity identities, then the re-derived challenge.
pub(crate) fn verify_instance<G: Group>(
    transcript: &mut Transcript,
    g: &G::Element,
    h: &G::Element,
    xg: &G::Element,
    xh: &G::Element,
    proof: &DleqProof<G>,
) -> Result<()> {
    check_ephemeral(g, h, xg, xh, proof)?;

    transcript.append_instance::<G>(g, h, xg, xh, proof.vg(), proof.vh());
    let challenge = transcript.challenge_scalar::<G>();

    if challenge != *proof.challenge() {
        tracing::debug!(group = G::name(), "DLEQ challenge mismatch");
        return Err(Error::VerificationFailed);
    }

    Ok(())
}

/// Checks `g^r · xG^c = vG` and `h^r · xH^c = vH` with the embedded challenge.
pub(crate) fn check_ephemeral<G: Group>(
    g: &G::Element,
    h: &G::Element,
    xg: &G::Element,
    xh: &G::Element,
    proof: &DleqProof<G>,
) -> Result<()> {
    let (vg, vh) =
        ephemeral_commitments::<G>(g, h, xg, xh, proof.challenge(), proof.response());

    if vg != *proof.vg() || vh != *proof.vh() {
        tracing::debug!(group = G::name(), "DLEQ proof rejected");
        return Err(Error::VerificationFailed);
    }

    Ok(())
}

/// Rebuilds `vG = g^r · xG^c` and `vH = h^r · xH^c`.
pub(crate) fn ephemeral_commitments<G: Group>(
    g: &G::Element,
    h: &G::Element,
    xg: &G::Element,
    xh: &G::Element,
    c: &G::Scalar,
    r: &G::Scalar,
) -> (G::Element, G::Element) {
    let vg = G::element_mul(&G::scalar_mul(g, r), &G::scalar_mul(xg, c));
    let vh = G::element_mul(&G::scalar_mul(h, r), &G::scalar_mul(xh, c));
    (vg, vh)
}
