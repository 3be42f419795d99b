//! NIST P-256 (secp256r1) elliptic curve group implementation.
//!
//! Seeded elements and uniform-byte reduction both go through the RFC 9380
//! `expand_message_xmd` construction with SHA-256, so the derived elements have no
//! known discrete log relative to the base point.

use p256::elliptic_curve::hash2curve::{ExpandMsgXmd, GroupDigest};
use p256::elliptic_curve::sec1::{FromEncodedPoint, ToEncodedPoint};
use p256::elliptic_curve::{Field, PrimeField};
use p256::{AffinePoint, EncodedPoint, NistP256, ProjectivePoint, Scalar as P256Scalar};
use rand_core::CryptoRngCore;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use subtle::{Choice, ConstantTimeEq};
use zeroize::Zeroize;

use crate::crypto::UNIFORM_BYTES;
use crate::{Error, Group, Result};

/// Number of bytes in a P-256 scalar.
const P256_SCALAR_BYTES: usize = 32;

/// Number of bytes in a compressed P-256 point (1 byte prefix + 32 byte x-coordinate).
const P256_COMPRESSED_BYTES: usize = 33;

/// Domain separation tag for seeded element derivation.
const SEED_DST: &[u8] = b"dleq-v1-P256_XMD:SHA-256_SSWU_RO_";

/// Domain separation tag for mapping uniform bytes to scalars.
const SCALAR_DST: &[u8] = b"dleq-v1-P256_XMD:SHA-256_scalar";

/// Seed of the default second generator `h`.
const GENERATOR_H_SEED: &[u8] = b"generator-h";

/// P-256 (secp256r1) elliptic curve group.
#[derive(Clone, Debug)]
pub struct P256;

/// Scalar modulo the P-256 group order. Zeroized on drop.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Scalar(
    #[serde(
        serialize_with = "serialize_scalar",
        deserialize_with = "deserialize_scalar"
    )]
    P256Scalar,
);

/// P-256 group element.
///
/// Stored in projective coordinates, serialized in SEC1 compressed form.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Element(
    #[serde(
        serialize_with = "serialize_element",
        deserialize_with = "deserialize_element"
    )]
    ProjectivePoint,
);

fn serialize_scalar<S>(scalar: &P256Scalar, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_bytes(&scalar.to_bytes())
}

fn deserialize_scalar<'de, D>(deserializer: D) -> std::result::Result<P256Scalar, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let bytes: Vec<u8> = serde::Deserialize::deserialize(deserializer)?;
    decode_scalar(&bytes).map_err(serde::de::Error::custom)
}

fn serialize_element<S>(
    element: &ProjectivePoint,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_bytes(&encode_element(element))
}

fn deserialize_element<'de, D>(deserializer: D) -> std::result::Result<ProjectivePoint, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let bytes: Vec<u8> = serde::Deserialize::deserialize(deserializer)?;
    decode_element(&bytes).map_err(serde::de::Error::custom)
}

fn decode_scalar(bytes: &[u8]) -> Result<P256Scalar> {
    if bytes.len() != P256_SCALAR_BYTES {
        return Err(Error::InvalidScalar(format!(
            "Expected {} bytes, got {}",
            P256_SCALAR_BYTES,
            bytes.len()
        )));
    }

    let mut repr = p256::FieldBytes::default();
    repr.copy_from_slice(bytes);

    Option::<P256Scalar>::from(P256Scalar::from_repr(repr)).ok_or_else(|| {
        Error::InvalidScalar("Bytes do not represent a valid P-256 scalar".to_string())
    })
}

/// SEC1 compressed encoding, with the identity widened to all-zero bytes so every
/// element has the same length.
fn encode_element(element: &ProjectivePoint) -> Vec<u8> {
    let encoded = element.to_affine().to_encoded_point(true);
    if encoded.is_identity() {
        return vec![0u8; P256_COMPRESSED_BYTES];
    }
    encoded.as_bytes().to_vec()
}

fn decode_element(bytes: &[u8]) -> Result<ProjectivePoint> {
    if bytes.len() != P256_COMPRESSED_BYTES {
        return Err(Error::InvalidGroupElement(format!(
            "Expected {} bytes, got {}",
            P256_COMPRESSED_BYTES,
            bytes.len()
        )));
    }

    if bytes.iter().all(|b| *b == 0) {
        return Ok(ProjectivePoint::IDENTITY);
    }

    let encoded = EncodedPoint::from_bytes(bytes)
        .map_err(|_| Error::InvalidGroupElement("Failed to parse encoded point".to_string()))?;

    Option::<AffinePoint>::from(AffinePoint::from_encoded_point(&encoded))
        .map(ProjectivePoint::from)
        .ok_or_else(|| {
            Error::InvalidGroupElement("Bytes do not represent a valid P-256 point".to_string())
        })
}

impl Zeroize for Scalar {
    fn zeroize(&mut self) {
        self.0 = P256Scalar::ZERO;
    }
}

impl Drop for Scalar {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl ConstantTimeEq for Scalar {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0.ct_eq(&other.0)
    }
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for Scalar {}

impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_affine() == other.0.to_affine()
    }
}

impl Eq for Element {}

impl Scalar {
    /// Wraps a p256 scalar.
    pub fn new(value: P256Scalar) -> Self {
        Self(value)
    }

    /// Returns the inner p256 scalar.
    pub fn inner(&self) -> &P256Scalar {
        &self.0
    }
}

impl Element {
    /// Wraps a projective point.
    pub fn new(value: ProjectivePoint) -> Self {
        Self(value)
    }

    /// Returns the inner projective point.
    pub fn inner(&self) -> &ProjectivePoint {
        &self.0
    }
}

impl Group for P256 {
    type Scalar = Scalar;
    type Element = Element;

    const SCALAR_BYTES: usize = P256_SCALAR_BYTES;
    const ELEMENT_BYTES: usize = P256_COMPRESSED_BYTES;

    fn name() -> &'static str {
        "P-256"
    }

    fn generator_g() -> Self::Element {
        Element(ProjectivePoint::GENERATOR)
    }

    fn generator_h() -> Self::Element {
        Self::element_from_seed(GENERATOR_H_SEED)
            .unwrap_or_else(|_| unreachable!("hash-to-curve accepts the fixed DST"))
    }

    fn element_from_seed(seed: &[u8]) -> Result<Self::Element> {
        NistP256::hash_from_bytes::<ExpandMsgXmd<Sha256>>(&[seed], &[SEED_DST])
            .map(Element)
            .map_err(|_| Error::InvalidGroupElement("Hash-to-curve failed".to_string()))
    }

    fn scalar_from_bytes(bytes: &[u8]) -> Result<Self::Scalar> {
        decode_scalar(bytes).map(Scalar)
    }

    fn scalar_to_bytes(scalar: &Self::Scalar) -> Vec<u8> {
        scalar.0.to_bytes().to_vec()
    }

    fn scalar_from_uniform_bytes(bytes: &[u8; UNIFORM_BYTES]) -> Self::Scalar {
        let scalar =
            NistP256::hash_to_scalar::<ExpandMsgXmd<Sha256>>(&[bytes.as_slice()], &[SCALAR_DST])
                .unwrap_or_else(|_| unreachable!("hash-to-scalar accepts the fixed DST"));
        Scalar(scalar)
    }

    fn element_from_bytes(bytes: &[u8]) -> Result<Self::Element> {
        decode_element(bytes).map(Element)
    }

    fn element_to_bytes(element: &Self::Element) -> Vec<u8> {
        encode_element(&element.0)
    }

    fn random_scalar<R: CryptoRngCore>(rng: &mut R) -> Self::Scalar {
        Scalar(P256Scalar::random(rng))
    }

    fn scalar_mul(element: &Self::Element, scalar: &Self::Scalar) -> Self::Element {
        Element(element.0 * scalar.0)
    }

    fn element_mul(a: &Self::Element, b: &Self::Element) -> Self::Element {
        Element(a.0 + b.0)
    }

    fn identity() -> Self::Element {
        Element(ProjectivePoint::IDENTITY)
    }

    fn is_identity(element: &Self::Element) -> bool {
        element.0.to_affine().is_identity().into()
    }

    fn validate_element(element: &Self::Element) -> Result<()> {
        let affine = element.0.to_affine();
        if bool::from(affine.is_identity()) {
            return Ok(());
        }

        let encoded = affine.to_encoded_point(true);
        match Option::<AffinePoint>::from(AffinePoint::from_encoded_point(&encoded)) {
            Some(decoded) if decoded == affine => Ok(()),
            _ => Err(Error::InvalidGroupElement(
                "Element failed recompression validation".to_string(),
            )),
        }
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
        scalar.0.is_zero().into()
    }
}
