use curve25519_dalek::constants::RISTRETTO_BASEPOINT_POINT;
use curve25519_dalek::ristretto::{CompressedRistretto, RistrettoPoint};
use curve25519_dalek::scalar::Scalar as DalekScalar;
use curve25519_dalek::traits::{Identity, IsIdentity};
use rand_core::CryptoRngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha512};
use zeroize::Zeroize;

use crate::crypto::UNIFORM_BYTES;
use crate::{Error, Group, Result};

/// Number of bytes in a Ristretto255 scalar or compressed element.
const RISTRETTO_BYTES: usize = 32;

/// Domain separation tag for seeded element derivation.
const SEED_DST: &[u8] = b"dleq-v1-ristretto255-element-from-seed";

/// Seed of the default second generator `h`.
const GENERATOR_H_SEED: &[u8] = b"generator-h";

/// Ristretto255 prime-order group.
#[derive(Clone, Debug)]
pub struct Ristretto255;

/// Scalar modulo the Ristretto255 group order. Zeroized on drop.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize, Zeroize)]
#[zeroize(drop)]
pub struct Scalar(DalekScalar);

/// Ristretto255 group element.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Element(RistrettoPoint);

impl Scalar {
    /// Wraps a curve25519_dalek scalar.
    pub fn new(value: DalekScalar) -> Self {
        Self(value)
    }

    /// Returns the inner curve25519_dalek scalar.
    pub fn inner(&self) -> &DalekScalar {
        &self.0
    }
}

impl Element {
    /// Wraps a Ristretto point.
    pub fn new(value: RistrettoPoint) -> Self {
        Self(value)
    }

    /// Returns the inner Ristretto point.
    pub fn inner(&self) -> &RistrettoPoint {
        &self.0
    }
}

impl Group for Ristretto255 {
    type Scalar = Scalar;
    type Element = Element;

    const SCALAR_BYTES: usize = RISTRETTO_BYTES;
    const ELEMENT_BYTES: usize = RISTRETTO_BYTES;

    fn name() -> &'static str {
        "Ristretto255"
    }

    fn generator_g() -> Self::Element {
        Element(RISTRETTO_BASEPOINT_POINT)
    }

    fn generator_h() -> Self::Element {
        hash_to_point(GENERATOR_H_SEED)
    }

    fn element_from_seed(seed: &[u8]) -> Result<Self::Element> {
        Ok(hash_to_point(seed))
    }

    fn scalar_from_bytes(bytes: &[u8]) -> Result<Self::Scalar> {
        let arr: [u8; RISTRETTO_BYTES] = bytes.try_into().map_err(|_| {
            Error::InvalidScalar(format!(
                "Expected {} bytes, got {}",
                RISTRETTO_BYTES,
                bytes.len()
            ))
        })?;

        Option::<DalekScalar>::from(DalekScalar::from_canonical_bytes(arr))
            .map(Scalar)
            .ok_or_else(|| {
                Error::InvalidScalar("Bytes do not represent a valid scalar".to_string())
            })
    }

    fn scalar_to_bytes(scalar: &Self::Scalar) -> Vec<u8> {
        scalar.0.to_bytes().to_vec()
    }

    fn scalar_from_uniform_bytes(bytes: &[u8; UNIFORM_BYTES]) -> Self::Scalar {
        Scalar(DalekScalar::from_bytes_mod_order_wide(bytes))
    }

    fn element_from_bytes(bytes: &[u8]) -> Result<Self::Element> {
        let arr: [u8; RISTRETTO_BYTES] = bytes.try_into().map_err(|_| {
            Error::InvalidGroupElement(format!(
                "Expected {} bytes, got {}",
                RISTRETTO_BYTES,
                bytes.len()
            ))
        })?;

        CompressedRistretto(arr).decompress().map(Element).ok_or_else(|| {
            Error::InvalidGroupElement("Bytes do not represent a valid Ristretto point".to_string())
        })
    }

    fn element_to_bytes(element: &Self::Element) -> Vec<u8> {
        element.0.compress().to_bytes().to_vec()
    }

    fn random_scalar<R: CryptoRngCore>(rng: &mut R) -> Self::Scalar {
        let mut bytes = [0u8; UNIFORM_BYTES];
        rng.fill_bytes(&mut bytes);
        let scalar = Self::scalar_from_uniform_bytes(&bytes);
        bytes.zeroize();
        scalar
    }

    fn scalar_mul(element: &Self::Element, scalar: &Self::Scalar) -> Self::Element {
        Element(element.0 * scalar.0)
    }

    fn element_mul(a: &Self::Element, b: &Self::Element) -> Self::Element {
        Element(a.0 + b.0)
    }

    fn identity() -> Self::Element {
        Element(RistrettoPoint::identity())
    }

    fn is_identity(element: &Self::Element) -> bool {
        element.0.is_identity()
    }

    fn validate_element(_element: &Self::Element) -> Result<()> {
        // Every decoded Ristretto point is in the prime-order group.
        Ok(())
    }

    fn scalar_add(a: &Self::Scalar, b: &Self::Scalar) -> Self::Scalar {
        Scalar(a.0 + b.0)
    }

    fn scalar_sub(a: &Self::Scalar, b: &Self::Scalar) -> Self::Scalar {
        Scalar(a.0 - b.0)
    }

    fn scalar_mul_scalar(a: &Self::Scalar, b: &Self::Scalar) -> Self::Scalar {
        Scalar(a.0 * b.0)
    }

    fn scalar_is_zero(scalar: &Self::Scalar) -> bool {
        scalar.0 == DalekScalar::ZERO
    }
}

fn hash_to_point(seed: &[u8]) -> Element {
    let mut hasher = Sha512::new();
    hasher.update(SEED_DST);
    hasher.update(seed);
    Element(RistrettoPoint::from_uniform_bytes(&hasher.finalize().into()))
}
