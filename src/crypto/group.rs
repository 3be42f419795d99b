use core::fmt::Debug;

use rand_core::CryptoRngCore;
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::Result;

/// Number of uniformly random bytes mapped to a scalar by [`Group::scalar_from_uniform_bytes`].
pub const UNIFORM_BYTES: usize = 64;

/// Trait for prime-order groups used by the DLEQ proof engine.
///
/// Implementations provide group operations (for elements) and field operations
/// (for scalars). Multiplicative notation is used throughout: `scalar_mul(g, x)` is
/// `g^x` and `element_mul(a, b)` is `a · b`, whatever the underlying representation.
pub trait Group: Clone + Debug + Send + Sync + 'static {
    /// Scalar type for this group (exponents/discrete logs).
    ///
    /// Scalars must be zeroizable for security.
    type Scalar: Clone
        + Debug
        + Eq
        + PartialEq
        + Zeroize
        + Serialize
        + for<'de> Deserialize<'de>
        + Send
        + Sync;

    /// Element type for this group (group elements/points).
    type Element: Clone
        + Debug
        + Eq
        + PartialEq
        + Serialize
        + for<'de> Deserialize<'de>
        + Send
        + Sync;

    /// Length of a serialized scalar.
    const SCALAR_BYTES: usize;

    /// Length of a serialized element.
    const ELEMENT_BYTES: usize;

    /// Returns the name of this group implementation.
    fn name() -> &'static str;

    /// Returns the standard base point.
    fn generator_g() -> Self::Element;

    /// Returns a second generator with no known discrete log relative to `g`.
    fn generator_h() -> Self::Element;

    /// Deterministically derives a group element from a seed.
    ///
    /// Different seeds yield independent elements; the same seed always yields the
    /// same element.
    fn element_from_seed(seed: &[u8]) -> Result<Self::Element>;

    /// Deserializes a scalar from its canonical fixed-width encoding.
    fn scalar_from_bytes(b: &[u8]) -> Result<Self::Scalar>;

    /// Serializes a scalar to exactly [`Self::SCALAR_BYTES`] bytes.
    fn scalar_to_bytes(s: &Self::Scalar) -> Vec<u8>;

    /// Maps uniformly random bytes into the scalar field with negligible bias.
    ///
    /// This is the final step of hash-to-scalar; the transcript supplies the bytes.
    fn scalar_from_uniform_bytes(bytes: &[u8; UNIFORM_BYTES]) -> Self::Scalar;

    /// Deserializes a group element from its fixed-width encoding.
    fn element_from_bytes(b: &[u8]) -> Result<Self::Element>;

    /// Serializes a group element to exactly [`Self::ELEMENT_BYTES`] bytes.
    fn element_to_bytes(e: &Self::Element) -> Vec<u8>;

    /// Generates a random scalar using the provided RNG.
    fn random_scalar<R: CryptoRngCore>(rng: &mut R) -> Self::Scalar;

    /// Exponentiation: `e^s`.
    fn scalar_mul(e: &Self::Element, s: &Self::Scalar) -> Self::Element;

    /// Group operation: `a · b`.
    fn element_mul(a: &Self::Element, b: &Self::Element) -> Self::Element;

    /// Returns the identity element of the group.
    fn identity() -> Self::Element;

    /// Checks if an element is the identity.
    fn is_identity(element: &Self::Element) -> bool;

    /// Validates that an element is in the correct subgroup.
    fn validate_element(e: &Self::Element) -> Result<()>;

    /// Adds two scalars: `a + b`.
    fn scalar_add(a: &Self::Scalar, b: &Self::Scalar) -> Self::Scalar;

    /// Subtracts two scalars: `a - b`.
    fn scalar_sub(a: &Self::Scalar, b: &Self::Scalar) -> Self::Scalar;

    /// Multiplies two scalars: `a * b`.
    fn scalar_mul_scalar(a: &Self::Scalar, b: &Self::Scalar) -> Self::Scalar;

    /// Checks if a scalar is zero.
    fn scalar_is_zero(s: &Self::Scalar) -> bool;
}
