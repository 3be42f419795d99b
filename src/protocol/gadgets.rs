//! Protocol gadgets for DLEQ proofs.
//!
//! The public generator pair, the secret witness, the public commitments and the
//! proof itself.

use core::fmt;

use rand_core::CryptoRngCore;
use zeroize::Zeroize;

use super::verifier::check_ephemeral;
use super::{Prover, Verifier};
use crate::{Error, Group, Result};

/// Proof format version for serialization compatibility.
pub(crate) const PROOF_VERSION: u8 = 1;

/// Generator pair `(g, h)` of a DLEQ statement.
///
/// Built through [`Generators::new`] or [`Generators::from_seeds`], both generators
/// are valid non-identity elements.
#[derive(Clone, Debug)]
pub struct Generators<G: Group> {
    g: G::Element,
    h: G::Element,
}

impl<G: Group> Generators<G> {
    /// Creates a generator pair.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParams`] if either generator is the identity and
    /// propagates the group's validation error for elements outside the group.
    pub fn new(g: G::Element, h: G::Element) -> Result<Self> {
        G::validate_element(&g)?;
        G::validate_element(&h)?;

        if G::is_identity(&g) {
            return Err(Error::InvalidParams("Generator g cannot be identity".to_string()));
        }

        if G::is_identity(&h) {
            return Err(Error::InvalidParams("Generator h cannot be identity".to_string()));
        }

        Ok(Self { g, h })
    }

    /// Derives both generators from seeds through [`Group::element_from_seed`].
    ///
    /// ```rust
    /// use dleq::{Generators, Ristretto255};
    ///
    /// let generators = Generators::<Ristretto255>::from_seeds(b"G0", b"H0").unwrap();
    /// ```
    pub fn from_seeds(g_seed: &[u8], h_seed: &[u8]) -> Result<Self> {
        Self::new(G::element_from_seed(g_seed)?, G::element_from_seed(h_seed)?)
    }

    /// Returns the first generator `g`.
    pub fn g(&self) -> &G::Element {
        &self.g
    }

    /// Returns the second generator `h`.
    pub fn h(&self) -> &G::Element {
        &self.h
    }
}

impl<G: Group> Default for Generators<G> {
    /// The group's standard generator pair.
    fn default() -> Self {
        Self {
            g: G::generator_g(),
            h: G::generator_h(),
        }
    }
}

/// Secret exponent `x`. Zeroized on drop and never serialized.
#[derive(Clone, Debug)]
pub struct Witness<G: Group> {
    x: G::Scalar,
}

impl<G: Group> Witness<G> {
    /// Wraps a secret scalar.
    pub fn new(x: G::Scalar) -> Self {
        Self { x }
    }

    /// Samples a fresh secret.
    pub fn random<R: CryptoRngCore>(rng: &mut R) -> Self {
        Self::new(G::random_scalar(rng))
    }

    pub(crate) fn secret(&self) -> &G::Scalar {
        &self.x
    }
}

impl<G: Group> Drop for Witness<G> {
    fn drop(&mut self) {
        self.x.zeroize();
    }
}

/// Public commitments `xG = g^x` and `xH = h^x`.
#[derive(Clone, Debug)]
pub struct Commitments<G: Group> {
    xg: G::Element,
    xh: G::Element,
}

impl<G: Group> Commitments<G> {
    /// Creates commitments from already computed values.
    pub fn new(xg: G::Element, xh: G::Element) -> Self {
        Self { xg, xh }
    }

    /// Computes `xG = g^x`, `xH = h^x`.
    pub fn from_witness(generators: &Generators<G>, witness: &Witness<G>) -> Self {
        Self {
            xg: G::scalar_mul(generators.g(), witness.secret()),
            xh: G::scalar_mul(generators.h(), witness.secret()),
        }
    }

    /// Returns `xG = g^x`.
    pub fn xg(&self) -> &G::Element {
        &self.xg
    }

    /// Returns `xH = h^x`.
    pub fn xh(&self) -> &G::Element {
        &self.xh
    }

    /// Validates that both elements are in the correct subgroup.
    pub fn validate(&self) -> Result<()> {
        G::validate_element(&self.xg)?;
        G::validate_element(&self.xh)
    }
}

impl<G: Group> PartialEq for Commitments<G> {
    fn eq(&self, other: &Self) -> bool {
        self.xg == other.xg && self.xh == other.xh
    }
}

impl<G: Group> Eq for Commitments<G> {}

/// Non-interactive DLEQ proof.
///
/// Holds the challenge `c`, the response `r = v - c·x` and the ephemeral commitments
/// `vG = g^v`, `vH = h^v`. Given `(g, h, xG, xH)` the verifier checks the validity
/// identities `g^r · xG^c = vG` and `h^r · xH^c = vH`, and for a standalone proof also
/// re-derives `c` from the transcript.
///
/// # Serialization
///
/// `[version: 1 byte][c][r][vG][vH]`, scalars in `G::SCALAR_BYTES` and elements in
/// `G::ELEMENT_BYTES`, both in the group's canonical fixed-width encoding.
#[derive(Clone, Debug)]
pub struct DleqProof<G: Group> {
    challenge: G::Scalar,
    response: G::Scalar,
    vg: G::Element,
    vh: G::Element,
}

impl<G: Group> DleqProof<G> {
    /// Creates a proof from its parts.
    pub fn new(
        challenge: G::Scalar,
        response: G::Scalar,
        vg: G::Element,
        vh: G::Element,
    ) -> Self {
        Self {
            challenge,
            response,
            vg,
            vh,
        }
    }

    /// Proves that `g^x` and `h^x` share the exponent `x`.
    ///
    /// Returns the proof together with the public commitments `(xG, xH)`.
    pub fn prove<R: CryptoRngCore>(
        rng: &mut R,
        generators: &Generators<G>,
        witness: &Witness<G>,
    ) -> Result<(Self, Commitments<G>)> {
        let prover = Prover::new(generators.clone(), witness.clone());
        let proof = prover.prove(rng)?;
        Ok((proof, prover.commitments().clone()))
    }

    /// Verifies a standalone proof against the generators and commitments.
    ///
    /// Members of a [`BatchProof`](crate::BatchProof) carry the batch challenge and
    /// are checked with [`DleqProof::verify_instance`] or the batch methods instead.
    ///
    /// # Errors
    ///
    /// Returns [`Error::VerificationFailed`] if the proof is invalid.
    pub fn verify(&self, generators: &Generators<G>, commitments: &Commitments<G>) -> Result<()> {
        Verifier::new(generators.clone(), commitments.clone()).verify(self)
    }

    /// Checks the validity identities `g^r · xG^c = vG` and `h^r · xH^c = vH` using
    /// the embedded challenge, without re-deriving it.
    ///
    /// This is the per-instance check for batch members. It accepts forged proofs:
    /// since `c` is not re-derived, anyone can pick `c` and `r` and solve for `vG`
    /// and `vH`, for any `(xG, xH)` including commitments with different exponents.
    /// Only rely on it when the challenge is bound elsewhere, as
    /// [`BatchProof::verify_binding`](crate::BatchProof::verify_binding) does.
    pub fn verify_instance(
        &self,
        g: &G::Element,
        h: &G::Element,
        xg: &G::Element,
        xh: &G::Element,
    ) -> Result<()> {
        check_ephemeral(g, h, xg, xh, self)
    }

    /// Returns the challenge `c`.
    pub fn challenge(&self) -> &G::Scalar {
        &self.challenge
    }

    /// Returns the response `r`.
    pub fn response(&self) -> &G::Scalar {
        &self.response
    }

    /// Returns the ephemeral commitment `vG = g^v`.
    pub fn vg(&self) -> &G::Element {
        &self.vg
    }

    /// Returns the ephemeral commitment `vH = h^v`.
    pub fn vh(&self) -> &G::Element {
        &self.vh
    }

    /// Serialized length in bytes.
    pub fn encoded_len() -> usize {
        1 + 2 * G::SCALAR_BYTES + 2 * G::ELEMENT_BYTES
    }

    /// Serializes the proof.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(Self::encoded_len());
        bytes.push(PROOF_VERSION);
        bytes.extend_from_slice(&G::scalar_to_bytes(&self.challenge));
        self.write_instance(&mut bytes);
        bytes
    }

    /// Deserializes a proof.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEncoding`] for a wrong version, length or a zero
    /// response, and the group's scalar or element error for non-canonical values.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != Self::encoded_len() {
            return Err(Error::InvalidEncoding(format!(
                "Expected {} bytes, got {}",
                Self::encoded_len(),
                bytes.len()
            )));
        }

        check_version(bytes[0])?;

        let (c_bytes, rest) = bytes[1..].split_at(G::SCALAR_BYTES);
        let challenge = G::scalar_from_bytes(c_bytes)?;
        Self::read_instance(challenge, rest)
    }

    /// Writes `r || vG || vH`.
    pub(crate) fn write_instance(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&G::scalar_to_bytes(&self.response));
        out.extend_from_slice(&G::element_to_bytes(&self.vg));
        out.extend_from_slice(&G::element_to_bytes(&self.vh));
    }

    /// Length of `r || vG || vH`.
    pub(crate) fn instance_len() -> usize {
        G::SCALAR_BYTES + 2 * G::ELEMENT_BYTES
    }

    /// Reads `r || vG || vH` and attaches the given challenge.
    pub(crate) fn read_instance(challenge: G::Scalar, bytes: &[u8]) -> Result<Self> {
        if bytes.len() != Self::instance_len() {
            return Err(Error::InvalidEncoding(format!(
                "Expected {} instance bytes, got {}",
                Self::instance_len(),
                bytes.len()
            )));
        }

        let (r_bytes, rest) = bytes.split_at(G::SCALAR_BYTES);
        let (vg_bytes, vh_bytes) = rest.split_at(G::ELEMENT_BYTES);

        let response = G::scalar_from_bytes(r_bytes)?;
        if G::scalar_is_zero(&response) {
            return Err(Error::InvalidEncoding("Response scalar is zero".to_string()));
        }

        let vg = G::element_from_bytes(vg_bytes)?;
        let vh = G::element_from_bytes(vh_bytes)?;
        G::validate_element(&vg)?;
        G::validate_element(&vh)?;

        Ok(Self::new(challenge, response, vg, vh))
    }
}

impl<G: Group> PartialEq for DleqProof<G> {
    fn eq(&self, other: &Self) -> bool {
        self.challenge == other.challenge
            && self.response == other.response
            && self.vg == other.vg
            && self.vh == other.vh
    }
}

impl<G: Group> Eq for DleqProof<G> {}

impl<G: Group> fmt::Display for DleqProof<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.to_bytes()))
    }
}

pub(crate) fn check_version(version: u8) -> Result<()> {
    if version != PROOF_VERSION {
        return Err(Error::InvalidEncoding(format!(
            "Unsupported proof version: {}",
            version
        )));
    }
    Ok(())
}
