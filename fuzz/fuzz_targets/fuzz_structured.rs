#![no_main]
use arbitrary::Arbitrary;
use jsonry::{JsonWriter, Registry};
use libfuzzer_sys::{arbitrary, fuzz_target};

/// One writer call. Arbitrary sequences exercise the structural checks.
#[derive(Arbitrary, Debug)]
enum Call {
    BeginArray,
    EndArray,
    BeginObject,
    EndObject,
    Property(String),
    ComplexProperty(String),
    Int(i64),
    Float(f64),
    Text(String),
    Null,
}

fn apply(w: &mut dyn JsonWriter, call: &Call) -> jsonry::Result<()> {
    match call {
        Call::BeginArray => w.begin_array(),
        Call::EndArray => w.end_array(),
        Call::BeginObject => w.begin_object(),
        Call::EndObject => w.end_object(),
        Call::Property(name) => w.write_property(name, &1u8),
        Call::ComplexProperty(name) => w.write_complex_property_start(name),
        Call::Int(i) => w.write_value(i),
        Call::Float(f) => w.write_value(f),
        Call::Text(s) => w.write_string(s),
        Call::Null => w.write_null(),
    }
}

fuzz_target!(|calls: Vec<Call>| {
    let registry = Registry::new();
    let mut w = registry.create_writer(Vec::new());
    for call in &calls {
        if apply(&mut w, call).is_err() {
            // A rejected call poisons the writer.
            assert!(w.finish().is_err());
            return;
        }
    }
    if let Ok(bytes) = w.finish() {
        let text = String::from_utf8(bytes).unwrap();
        if text.is_empty() {
            return;
        }
        if let Err(e) = serde_json::from_str::<serde_json::Value>(&text) {
            panic!("accepted call sequence produced invalid JSON!\nCalls: {calls:?}\nOutput: {text}\nError: {e}");
        }
    }
});
