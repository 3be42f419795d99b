/// Group trait and operations.
pub mod group;
/// Cryptographically secure random number generation.
pub mod rng;

pub use group::{Group, UNIFORM_BYTES};
pub use rng::SecureRng;
