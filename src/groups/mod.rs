/// NIST P-256 group implementation.
pub mod p256;
/// Ristretto255 group implementation (fast, modern elliptic curve).
pub mod ristretto;

pub use self::p256::P256;
pub use ristretto::Ristretto255;
