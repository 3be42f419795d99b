//! Batch DLEQ proofs sharing one challenge.
//!
//! [`prove_batch`] proves `n` independent statements `(g_i, h_i, x_i)` at once and
//! binds them with a single Fiat-Shamir challenge computed over every instance:
//!
//! 1. sample every nonce `v_i`, then compute `vG_i`, `vH_i`, `xG_i`, `xH_i`;
//! 2. derive `c` from the ordered `(g_i, h_i, xG_i, xH_i, vG_i, vH_i)`;
//! 3. compute every response `r_i = v_i - c·x_i`.
//!
//! Steps 1 and 3 have no cross-instance dependencies and run on the rayon pool for
//! large batches; step 2 is the only join point.
//!
//! # Verification
//!
//! [`BatchProof::verify_each`] checks every proof on its own against the embedded
//! challenge. On its own that check proves nothing: the challenge is not re-derived,
//! so anyone can choose `c` and `r` and solve for `vG`, `vH` to pass it, even for a
//! false statement. A proof taken from another batch passes too.
//! [`BatchProof::verify_binding`] also recomputes the batch challenge and rejects
//! both; use it unless the challenge is bound some other way.
//!
//! # Example
//!
//! ```rust
//! use dleq::{prove_batch, Group, Ristretto255, SecureRng, Witness};
//!
//! # fn example() -> dleq::Result<()> {
//! let mut rng = SecureRng::new();
//! let g: Vec<_> = (0..4u8)
//!     .map(|i| Ristretto255::element_from_seed(&[b'G', i]))
//!     .collect::<Result<_, _>>()?;
//! let h: Vec<_> = (0..4u8)
//!     .map(|i| Ristretto255::element_from_seed(&[b'H', i]))
//!     .collect::<Result<_, _>>()?;
//! let x: Vec<_> = (0..4)
//!     .map(|_| Witness::<Ristretto255>::random(&mut rng))
//!     .collect();
//!
//! let (proofs, xg, xh) = prove_batch(&mut rng, &g, &h, &x)?;
//! proofs.verify_binding(&g, &h, &xg, &xh)?;
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

use rand_core::CryptoRngCore;
use rayon::prelude::*;

use super::gadgets::{check_version, PROOF_VERSION};
use super::prover::{respond, Nonce};
use super::{DleqProof, Transcript, Witness};
use crate::{BatchConfig, Error, Group, Result};

/// Encoded batch header: version byte and big-endian `u32` proof count.
const HEADER_BYTES: usize = 5;

/// Proofs and public commitments `(xG_i)`, `(xH_i)` produced by [`prove_batch`].
pub type BatchOutput<G> = (
    BatchProof<G>,
    Vec<<G as Group>::Element>,
    Vec<<G as Group>::Element>,
);

/// Proves `n` DLEQ statements bound by one shared challenge.
///
/// `g`, `h` and `x` are index-aligned; the returned proofs and commitments follow
/// the same order.
///
/// # Errors
///
/// Returns [`Error::DifferentLengths`] if the three inputs differ in length. The
/// check happens before any randomness is drawn or group operation performed.
pub fn prove_batch<G: Group, R: CryptoRngCore>(
    rng: &mut R,
    g: &[G::Element],
    h: &[G::Element],
    x: &[Witness<G>],
) -> Result<BatchOutput<G>> {
    prove_batch_with_config(rng, g, h, x, &BatchConfig::default())
}

/// [`prove_batch`] with explicit scheduling configuration.
pub fn prove_batch_with_config<G: Group, R: CryptoRngCore>(
    rng: &mut R,
    g: &[G::Element],
    h: &[G::Element],
    x: &[Witness<G>],
    config: &BatchConfig,
) -> Result<BatchOutput<G>> {
    check_lengths(&[g.len(), h.len(), x.len()])?;

    let n = x.len();
    let parallel = config.is_parallel(n);
    tracing::debug!(group = G::name(), n, parallel, "proving DLEQ batch");

    let nonces: Vec<Nonce<G>> = (0..n).map(|_| Nonce::random(&mut *rng)).collect();
    let instances = map_indices(n, parallel, |i| {
        let v = nonces[i].v();
        let secret = x[i].secret();
        Instance::<G> {
            xg: G::scalar_mul(&g[i], secret),
            xh: G::scalar_mul(&h[i], secret),
            vg: G::scalar_mul(&g[i], v),
            vh: G::scalar_mul(&h[i], v),
        }
    });
    tracing::trace!(n, "batch commitments computed");

    let entries: Vec<_> = instances
        .iter()
        .enumerate()
        .map(|(i, instance)| Entry::<G> {
            g: &g[i],
            h: &h[i],
            xg: &instance.xg,
            xh: &instance.xh,
            vg: &instance.vg,
            vh: &instance.vh,
        })
        .collect();
    let challenge = batch_challenge(&entries);

    let responses = map_indices(n, parallel, |i| {
        respond::<G>(&nonces[i], &challenge, x[i].secret())
    });
    tracing::trace!(n, "batch responses computed");

    let mut proofs = Vec::with_capacity(n);
    let mut xg = Vec::with_capacity(n);
    let mut xh = Vec::with_capacity(n);
    for (instance, response) in instances.into_iter().zip(responses) {
        proofs.push(DleqProof::new(
            challenge.clone(),
            response,
            instance.vg,
            instance.vh,
        ));
        xg.push(instance.xg);
        xh.push(instance.xh);
    }

    Ok((BatchProof { proofs }, xg, xh))
}

/// Ordered proofs of a batch, all carrying the same challenge.
#[derive(Clone, Debug)]
pub struct BatchProof<G: Group> {
    proofs: Vec<DleqProof<G>>,
}

impl<G: Group> BatchProof<G> {
    /// Wraps proofs received individually.
    ///
    /// Nothing is checked here; [`BatchProof::verify_binding`] rejects proofs that
    /// do not share one batch challenge.
    pub fn from_proofs(proofs: Vec<DleqProof<G>>) -> Self {
        Self { proofs }
    }

    /// Number of proofs in the batch.
    pub fn len(&self) -> usize {
        self.proofs.len()
    }

    /// Returns `true` if the batch holds no proofs.
    pub fn is_empty(&self) -> bool {
        self.proofs.is_empty()
    }

    /// Returns the proofs in input order.
    pub fn proofs(&self) -> &[DleqProof<G>] {
        &self.proofs
    }

    /// Consumes the batch and returns its proofs.
    pub fn into_proofs(self) -> Vec<DleqProof<G>> {
        self.proofs
    }

    /// Returns the challenge of the first proof, `None` for an empty batch.
    pub fn challenge(&self) -> Option<&G::Scalar> {
        self.proofs.first().map(DleqProof::challenge)
    }

    /// Verifies every proof independently against its `(g_i, h_i, xG_i, xH_i)`.
    ///
    /// Only the validity identities are checked, with each proof's embedded
    /// challenge. This accepts forged proofs: anyone can pick `c` and `r` and solve
    /// for `vG`, `vH`, even for commitments with different exponents. Use
    /// [`BatchProof::verify_binding`] unless the challenge is bound some other way.
    ///
    /// Stops at the first invalid proof.
    ///
    /// # Errors
    ///
    /// [`Error::DifferentLengths`] if any input does not match the number of proofs,
    /// [`Error::VerificationFailed`] if a proof is invalid.
    pub fn verify_each(
        &self,
        g: &[G::Element],
        h: &[G::Element],
        xg: &[G::Element],
        xh: &[G::Element],
    ) -> Result<()> {
        self.verify_each_with_config(g, h, xg, xh, &BatchConfig::default())
    }

    /// [`BatchProof::verify_each`] with explicit scheduling configuration.
    pub fn verify_each_with_config(
        &self,
        g: &[G::Element],
        h: &[G::Element],
        xg: &[G::Element],
        xh: &[G::Element],
        config: &BatchConfig,
    ) -> Result<()> {
        self.check_inputs(g, h, xg, xh)?;

        let check = |(i, proof): (usize, &DleqProof<G>)| {
            proof.verify_instance(&g[i], &h[i], &xg[i], &xh[i])
        };
        if config.is_parallel(self.len()) {
            self.proofs.par_iter().enumerate().try_for_each(check)
        } else {
            self.proofs.iter().enumerate().try_for_each(check)
        }
    }

    /// Verifies every proof independently and reports one result per index.
    ///
    /// Same check as [`BatchProof::verify_each`], so an `Ok` entry does not rule out
    /// a forged proof; [`BatchProof::verify_binding`] does.
    ///
    /// # Errors
    ///
    /// [`Error::DifferentLengths`] if any input does not match the number of proofs.
    pub fn verify_individually(
        &self,
        g: &[G::Element],
        h: &[G::Element],
        xg: &[G::Element],
        xh: &[G::Element],
    ) -> Result<Vec<Result<()>>> {
        self.verify_individually_with_config(g, h, xg, xh, &BatchConfig::default())
    }

    /// [`BatchProof::verify_individually`] with explicit scheduling configuration.
    pub fn verify_individually_with_config(
        &self,
        g: &[G::Element],
        h: &[G::Element],
        xg: &[G::Element],
        xh: &[G::Element],
        config: &BatchConfig,
    ) -> Result<Vec<Result<()>>> {
        self.check_inputs(g, h, xg, xh)?;

        Ok(map_indices(self.len(), config.is_parallel(self.len()), |i| {
            self.proofs[i].verify_instance(&g[i], &h[i], &xg[i], &xh[i])
        }))
    }

    /// Verifies every proof and that they form one batch.
    ///
    /// On top of [`BatchProof::verify_each`], checks that all proofs carry the same
    /// challenge and that it equals the challenge recomputed over the full ordered
    /// batch. This is the check that makes batch members sound. An empty batch
    /// verifies.
    ///
    /// # Errors
    ///
    /// [`Error::DifferentLengths`] if any input does not match the number of proofs,
    /// [`Error::VerificationFailed`] otherwise, without saying which check failed.
    pub fn verify_binding(
        &self,
        g: &[G::Element],
        h: &[G::Element],
        xg: &[G::Element],
        xh: &[G::Element],
    ) -> Result<()> {
        self.verify_binding_with_config(g, h, xg, xh, &BatchConfig::default())
    }

    /// [`BatchProof::verify_binding`] with explicit scheduling configuration.
    pub fn verify_binding_with_config(
        &self,
        g: &[G::Element],
        h: &[G::Element],
        xg: &[G::Element],
        xh: &[G::Element],
        config: &BatchConfig,
    ) -> Result<()> {
        self.check_inputs(g, h, xg, xh)?;

        let Some(challenge) = self.challenge() else {
            return Ok(());
        };

        if self.proofs.iter().any(|proof| proof.challenge() != challenge) {
            tracing::debug!(group = G::name(), n = self.len(), "DLEQ batch rejected");
            return Err(Error::VerificationFailed);
        }

        self.verify_each_with_config(g, h, xg, xh, config)?;

        let entries: Vec<_> = self
            .proofs
            .iter()
            .enumerate()
            .map(|(i, proof)| Entry::<G> {
                g: &g[i],
                h: &h[i],
                xg: &xg[i],
                xh: &xh[i],
                vg: proof.vg(),
                vh: proof.vh(),
            })
            .collect();

        if batch_challenge(&entries) != *challenge {
            tracing::debug!(group = G::name(), n = self.len(), "DLEQ batch rejected");
            return Err(Error::VerificationFailed);
        }

        Ok(())
    }

    /// Serializes the batch.
    ///
    /// Format: `[version: 1][n: u32 BE][c]` followed by `[r_i || vG_i || vH_i]` for
    /// every proof. The challenge is written once; an empty batch is the header alone.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidEncoding`] if the proofs do not share one challenge or there
    /// are more than `u32::MAX` of them.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let count = u32::try_from(self.len())
            .map_err(|_| Error::InvalidEncoding(format!("Too many proofs: {}", self.len())))?;

        let mut bytes = Vec::with_capacity(
            HEADER_BYTES + G::SCALAR_BYTES + self.len() * DleqProof::<G>::instance_len(),
        );
        bytes.push(PROOF_VERSION);
        bytes.extend_from_slice(&count.to_be_bytes());

        let Some(challenge) = self.challenge() else {
            return Ok(bytes);
        };
        if self.proofs.iter().any(|proof| proof.challenge() != challenge) {
            return Err(Error::InvalidEncoding(
                "Proofs do not share a challenge".to_string(),
            ));
        }

        bytes.extend_from_slice(&G::scalar_to_bytes(challenge));
        for proof in &self.proofs {
            proof.write_instance(&mut bytes);
        }

        Ok(bytes)
    }

    /// Deserializes a batch, attaching the shared challenge to every proof.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_BYTES {
            return Err(Error::InvalidEncoding(format!(
                "Batch too small: {} bytes",
                bytes.len()
            )));
        }

        check_version(bytes[0])?;
        let count = u32::from_be_bytes([bytes[1], bytes[2], bytes[3], bytes[4]]) as usize;
        let body = &bytes[HEADER_BYTES..];

        if count == 0 {
            if !body.is_empty() {
                return Err(Error::InvalidEncoding(format!(
                    "Empty batch has {} trailing bytes",
                    body.len()
                )));
            }
            return Ok(Self::from_proofs(Vec::new()));
        }

        let instance_len = DleqProof::<G>::instance_len();
        let expected = count
            .checked_mul(instance_len)
            .and_then(|len| len.checked_add(G::SCALAR_BYTES))
            .ok_or_else(|| Error::InvalidEncoding(format!("Invalid proof count: {}", count)))?;

        if body.len() != expected {
            return Err(Error::InvalidEncoding(format!(
                "Expected {} bytes for {} proofs, got {}",
                expected,
                count,
                body.len()
            )));
        }

        let (c_bytes, rest) = body.split_at(G::SCALAR_BYTES);
        let challenge = G::scalar_from_bytes(c_bytes)?;
        let proofs = rest
            .chunks_exact(instance_len)
            .map(|chunk| DleqProof::read_instance(challenge.clone(), chunk))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::from_proofs(proofs))
    }

    fn check_inputs(
        &self,
        g: &[G::Element],
        h: &[G::Element],
        xg: &[G::Element],
        xh: &[G::Element],
    ) -> Result<()> {
        check_lengths(&[self.len(), g.len(), h.len(), xg.len(), xh.len()])
    }
}

/// Public and ephemeral commitments of one batch instance.
struct Instance<G: Group> {
    xg: G::Element,
    xh: G::Element,
    vg: G::Element,
    vh: G::Element,
}

/// One instance as absorbed into the batch transcript.
struct Entry<'a, G: Group> {
    g: &'a G::Element,
    h: &'a G::Element,
    xg: &'a G::Element,
    xh: &'a G::Element,
    vg: &'a G::Element,
    vh: &'a G::Element,
}

fn batch_challenge<G: Group>(entries: &[Entry<'_, G>]) -> G::Scalar {
    let mut transcript = Transcript::new_batch(entries.len());
    transcript.append_group_name(G::name());
    for entry in entries {
        transcript.append_instance::<G>(entry.g, entry.h, entry.xg, entry.xh, entry.vg, entry.vh);
    }
    transcript.challenge_scalar::<G>()
}

fn check_lengths(lengths: &[usize]) -> Result<()> {
    if lengths.windows(2).any(|pair| pair[0] != pair[1]) {
        tracing::debug!(?lengths, "batch length mismatch");
        return Err(Error::DifferentLengths);
    }
    Ok(())
}

fn map_indices<T, F>(n: usize, parallel: bool, f: F) -> Vec<T>
where
    T: Send,
    F: Fn(usize) -> T + Sync + Send,
{
    if parallel {
        (0..n).into_par_iter().map(f).collect()
    } else {
        (0..n).map(f).collect()
    }
}
