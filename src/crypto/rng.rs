//! Secure randomness for nonces and secrets.

use rand_core::{CryptoRng, OsRng, RngCore};

/// Operating-system backed random number generator.
///
/// Every nonce drawn by the provers comes from a [`rand_core::CryptoRngCore`]; this is
/// the one the crate recommends. A failing OS entropy source panics inside `OsRng`
/// rather than returning predictable bytes.
#[derive(Clone, Copy, Debug, Default)]
pub struct SecureRng(OsRng);

impl SecureRng {
    /// Creates a handle to the operating system RNG.
    pub fn new() -> Self {
        Self(OsRng)
    }
}

impl RngCore for SecureRng {
    fn next_u32(&mut self) -> u32 {
        self.0.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.0.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.0.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        self.0.try_fill_bytes(dest)
    }
}

impl CryptoRng for SecureRng {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Group, Ristretto255};

    #[test]
    fn samples_distinct_scalars() {
        let mut rng = SecureRng::new();
        let a = Ristretto255::random_scalar(&mut rng);
        let b = Ristretto255::random_scalar(&mut rng);
        assert_ne!(a, b);
    }

    #[test]
    fn fills_buffer() {
        let mut rng = SecureRng::default();
        let mut buf = [0u8; 64];
        rng.try_fill_bytes(&mut buf).unwrap();
        assert!(buf.iter().any(|b| *b != 0));
    }
}
