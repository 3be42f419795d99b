use merlin::Transcript as MerlinTranscript;

use crate::crypto::UNIFORM_BYTES;
use crate::Group;

/// Protocol label for transcript initialization.
const PROTOCOL_LABEL: &[u8] = b"DLEQ proof v1";

/// Domain separation tag for single proofs.
const SINGLE_DST: &[u8] = b"dleq-single";

/// Domain separation tag for batch proofs.
const BATCH_DST: &[u8] = b"dleq-batch";

/// Domain separation tag for challenge generation.
const CHALLENGE_DST: &[u8] = b"challenge";

/// Fiat-Shamir transcript.
///
/// Absorbs an ordered sequence of serialized group elements under fixed labels and
/// squeezes the challenge scalar. Prover and verifier must feed identical messages in
/// identical order.
#[derive(Clone)]
pub struct Transcript(MerlinTranscript);

impl Transcript {
    /// Creates a transcript for a single DLEQ proof.
    pub fn new() -> Self {
        Self::with_mode(SINGLE_DST)
    }

    /// Creates a transcript for a batch of `len` proofs sharing one challenge.
    pub fn new_batch(len: usize) -> Self {
        let mut transcript = Self::with_mode(BATCH_DST);
        transcript.0.append_u64(b"batch-len", len as u64);
        transcript
    }

    fn with_mode(mode: &'static [u8]) -> Self {
        let mut transcript = MerlinTranscript::new(PROTOCOL_LABEL);
        transcript.append_message(b"mode", mode);
        Self(transcript)
    }

    /// Appends application-specific context to prevent cross-protocol attacks.
    ///
    /// # Security
    ///
    /// Call this before proving in application-specific contexts (session ID, purpose
    /// string) so proofs from one context cannot be replayed in another. The verifier
    /// must append the same context.
    pub fn append_context(&mut self, context: &[u8]) {
        self.0.append_message(b"context", context);
    }

    /// Appends the group name to the transcript.
    pub fn append_group_name(&mut self, name: &str) {
        self.0.append_message(b"group", name.as_bytes());
    }

    /// Appends one DLEQ instance: generators, public commitments and ephemeral
    /// commitments, in that order.
    pub fn append_instance<G: Group>(
        &mut self,
        g: &G::Element,
        h: &G::Element,
        xg: &G::Element,
        xh: &G::Element,
        vg: &G::Element,
        vh: &G::Element,
    ) {
        self.0.append_message(b"g", &G::element_to_bytes(g));
        self.0.append_message(b"h", &G::element_to_bytes(h));
        self.0.append_message(b"xG", &G::element_to_bytes(xg));
        self.0.append_message(b"xH", &G::element_to_bytes(xh));
        self.0.append_message(b"vG", &G::element_to_bytes(vg));
        self.0.append_message(b"vH", &G::element_to_bytes(vh));
    }

    /// Squeezes the challenge scalar.
    ///
    /// Draws 64 bytes so the reduction into the scalar field is statistically uniform.
    pub fn challenge_scalar<G: Group>(&mut self) -> G::Scalar {
        let mut buf = [0u8; UNIFORM_BYTES];
        self.0.challenge_bytes(CHALLENGE_DST, &mut buf);
        G::scalar_from_uniform_bytes(&buf)
    }
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Ristretto255;

    type Element = <Ristretto255 as Group>::Element;
    type Scalar = <Ristretto255 as Group>::Scalar;

    fn points() -> Vec<Element> {
        (0..6u8)
            .map(|i| Ristretto255::element_from_seed(&[i]).unwrap())
            .collect()
    }

    fn challenge(mut transcript: Transcript, p: &[Element]) -> Scalar {
        transcript.append_group_name(Ristretto255::name());
        transcript.append_instance::<Ristretto255>(&p[0], &p[1], &p[2], &p[3], &p[4], &p[5]);
        transcript.challenge_scalar::<Ristretto255>()
    }

    #[test]
    fn challenge_is_deterministic() {
        let p = points();
        assert_eq!(challenge(Transcript::new(), &p), challenge(Transcript::new(), &p));
    }

    #[test]
    fn challenge_depends_on_order() {
        let p = points();
        let mut swapped = p.clone();
        swapped.swap(4, 5);
        assert_ne!(challenge(Transcript::new(), &p), challenge(Transcript::new(), &swapped));
    }

    #[test]
    fn single_and_batch_are_separated() {
        let p = points();
        assert_ne!(challenge(Transcript::new(), &p), challenge(Transcript::new_batch(1), &p));
        assert_ne!(
            challenge(Transcript::new_batch(1), &p),
            challenge(Transcript::new_batch(2), &p)
        );
    }

    #[test]
    fn context_changes_challenge() {
        let p = points();
        let mut with_context = Transcript::new();
        with_context.append_context(b"session-1");
        assert_ne!(challenge(Transcript::new(), &p), challenge(with_context, &p));
    }
}
