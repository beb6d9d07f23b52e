#![no_main]

use libfuzzer_sys::fuzz_target;
use std::sync::Arc;

use fibdrv_bignum::{Convolution, Karatsuba, Schoolbook};
use fibdrv_core::{Adding, Calculator, FastDoubling, FibCalculator};

fuzz_target!(|data: &[u8]| {
    if data.len() < 4 {
        return;
    }
    // Use first 4 bytes as k, capped at 5000 for speed (adding is linear)
    let k = u64::from(u32::from_le_bytes([data[0], data[1], data[2], data[3]])) % 5_000;

    let engines: [Arc<dyn Calculator>; 4] = [
        Arc::new(FibCalculator::new(Arc::new(FastDoubling::new(Schoolbook)), k)),
        Arc::new(FibCalculator::new(Arc::new(FastDoubling::new(Karatsuba::default())), k)),
        Arc::new(FibCalculator::new(Arc::new(FastDoubling::new(Convolution)), k)),
        Arc::new(FibCalculator::new(Arc::new(Adding::new()), k)),
    ];

    let expected = engines[3].compute(k).unwrap();
    for engine in &engines[..3] {
        assert_eq!(engine.compute(k).unwrap(), expected, "{} != Adding at k={k}", engine.name());
    }
});
