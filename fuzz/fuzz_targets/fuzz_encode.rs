#![no_main]
use jsonry::{Options, Registry};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(value) = serde_json::from_str::<serde_json::Value>(s) {
            let compact = Registry::new().to_string(&value).unwrap();
            let fast = Registry::with_options(Options::fast()).to_string(&value).unwrap();
            assert_eq!(compact, fast, "fast writer diverged from compact");

            let pretty = Registry::with_options(Options::pretty()).to_string(&value).unwrap();
            for out in [&compact, &pretty] {
                match serde_json::from_str::<serde_json::Value>(out) {
                    Ok(reparsed) => assert_eq!(reparsed, value, "output: {out}"),
                    Err(e) => panic!("output is not JSON!\nInput: {s}\nOutput: {out}\nError: {e}"),
                }
            }
        }
    }
});
