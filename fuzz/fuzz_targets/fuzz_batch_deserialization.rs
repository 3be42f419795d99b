#![no_main]

use dleq::{BatchProof, Ristretto255};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(batch) = BatchProof::<Ristretto255>::from_bytes(data) {
        let reencoded = batch.to_bytes().expect("decoded batch shares one challenge");
        assert_eq!(reencoded, data);
    }
});
