#![no_main]

use dleq::{DleqProof, P256, Ristretto255};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let _ = DleqProof::<Ristretto255>::from_bytes(data);
    let _ = DleqProof::<P256>::from_bytes(data);
});
