#![no_main]
use std::cell::RefCell;

use arbitrary::Arbitrary;
use libfuzzer_sys::{fuzz_mutator, fuzz_target, fuzzer_mutate};
use rand::rngs::SmallRng; // faster than StdRng
use rand::{Rng, RngCore, SeedableRng};
use serde_json::{Map, Value};

thread_local! {
    // One SmallRng per thread, seeded once from the host OS.
    static RNG: RefCell<SmallRng> = RefCell::new(SmallRng::from_os_rng());
}

fn with_rng<F, R>(f: F) -> R
where
    F: FnOnce(&mut SmallRng) -> R,
{
    RNG.with(|cell| f(&mut cell.borrow_mut()))
}

/// Replaces the corpus entry with a freshly generated, structurally valid
/// JSON document most of the time, falling back to byte-level mutation
/// otherwise, so the corpus keeps exercising both the happy path and the
/// error paths of the parser.
fn mutator(data: &mut [u8], size: usize, max_size: usize, seed: u32) -> usize {
    if seed.is_multiple_of(10) {
        return fuzzer_mutate(data, size, max_size);
    }

    let value = loop {
        let s = with_rng(|rng| rng.random_range(1..=max_size.max(1)));
        let bytes: Vec<u8> = with_rng(|rng| (0..s).map(|_| rng.random::<u8>()).collect());
        match ArbitraryValue::arbitrary(&mut arbitrary::Unstructured::new(&bytes)) {
            Ok(value) => break value,
            Err(_) => continue,
        }
    };

    let serialized = serde_json::to_vec(&value.0).expect("serde_json encodes any Value");
    let len = serialized.len().min(max_size);
    data[..len].copy_from_slice(&serialized[..len]);
    len
}

fuzz_mutator!(|data: &mut [u8], size: usize, max_size: usize, seed: u32| {
    mutator(data, size, max_size, seed)
});

#[derive(Debug)]
struct ArbitraryValue(Value);

impl<'a> Arbitrary<'a> for ArbitraryValue {
    fn arbitrary(u: &mut arbitrary::Unstructured<'_>) -> arbitrary::Result<Self> {
        let node_type = u.choose_index(21)?;
        let value = match node_type {
            0 => Value::Null,
            1 => Value::Bool(u.arbitrary()?),
            2 => {
                let n: f64 = u.arbitrary()?;
                Value::Number(
                    serde_json::Number::from_f64(n).ok_or(arbitrary::Error::IncorrectFormat)?,
                )
            }
            3..=10 => Value::String(u.arbitrary()?),
            11..=15 => {
                let elems: Vec<ArbitraryValue> = u.arbitrary()?;
                Value::Array(elems.into_iter().map(|v| v.0).collect())
            }
            16..=20 => {
                let m: Vec<(String, ArbitraryValue)> = u.arbitrary()?;
                Value::Object(Map::from_iter(m.into_iter().map(|(k, v)| (k, v.0))))
            }
            _ => Err(arbitrary::Error::IncorrectFormat)?,
        };
        Ok(ArbitraryValue(value))
    }
}

/// Decoding must never panic on arbitrary bytes. When it succeeds, the
/// resulting tree must survive an encode/decode round trip unchanged.
fn run(data: &[u8]) {
    let Ok(value) = turbojson::decode(data) else {
        return;
    };
    let Ok(bytes) = turbojson::encode(&value, None, turbojson::Options::default()) else {
        return;
    };
    let value2 = turbojson::decode(&bytes).expect("encoding a decoded value always yields valid JSON");
    assert_eq!(value, value2);
}

fuzz_target!(|data: &[u8]| run(data));
