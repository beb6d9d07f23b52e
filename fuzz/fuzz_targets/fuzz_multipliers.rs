#![no_main]

use libfuzzer_sys::fuzz_target;
use num_bigint::BigUint;

use fibdrv_bignum::{to_decimal, Convolution, Karatsuba, Limb, LimbBuffer, Multiplier, Schoolbook};

fn limbs(bytes: &[u8]) -> Vec<Limb> {
    bytes
        .chunks(4)
        .map(|c| c.iter().rev().fold(0, |acc, &b| (acc << 8) | Limb::from(b)))
        .collect()
}

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }
    // First byte picks the split point and the Karatsuba cutoff
    let split = 1 + usize::from(data[0]) % (data.len() - 1);
    let cutoff = 1 + usize::from(data[0] >> 4);
    let a = limbs(&data[1..split]);
    let b = limbs(&data[split..]);
    if a.is_empty() || b.is_empty() {
        return;
    }

    let x = LimbBuffer::from_limbs(&a).unwrap();
    let y = LimbBuffer::from_limbs(&b).unwrap();
    let expected = BigUint::from_slice(&a) * BigUint::from_slice(&b);

    let strategies: [&dyn Multiplier; 3] = [&Schoolbook, &Karatsuba::new(cutoff), &Convolution];
    for m in strategies {
        let mut dest = LimbBuffer::zeroed(a.len() + b.len()).unwrap();
        m.multiply(&mut dest, &x, &y).unwrap();
        assert_eq!(dest.to_biguint(), expected, "{} product mismatch", m.name());
    }
    assert_eq!(to_decimal(&x).unwrap(), BigUint::from_slice(&a).to_string());
});
