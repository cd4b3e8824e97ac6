#![no_main]
use jsonry::Registry;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let quoted = Registry::new().to_string(&s.to_string()).unwrap();
        match serde_json::from_str::<String>(&quoted) {
            Ok(decoded) => assert_eq!(decoded, s, "escape round trip changed the text"),
            Err(e) => panic!("escaped text is not a JSON string!\nInput: {s:?}\nQuoted: {quoted}\nError: {e}"),
        }
    }
});
