#![cfg(feature = "serde")]

use std::collections::BTreeMap;
use std::error::Error;

use jsonry::{BareNames, Options, Registry, Serde};
use serde::Serialize;

#[derive(Serialize, Clone)]
struct Item {
    sku: String,
    qty: u32,
    price: f64,
    tags: Vec<&'static str>,
    note: Option<String>,
}

#[derive(Serialize, Clone)]
enum Event {
    Ping,
    Moved(i32, i32),
    Renamed { from: String, to: String },
    Wrapped(Box<Item>),
}

#[derive(Serialize, Clone)]
struct Order {
    id: u64,
    items: Vec<Item>,
    events: Vec<Event>,
    totals: BTreeMap<String, f32>,
    flag: (bool, char),
    unit: (),
}

fn sample() -> Order {
    let item = Item {
        sku: "A-1".into(),
        qty: 2,
        price: 19.99,
        tags: vec!["new", "quote\"d"],
        note: None,
    };
    let mut totals = BTreeMap::new();
    totals.insert("net".to_string(), 39.98);
    Order {
        id: 7,
        items: vec![item.clone()],
        events: vec![
            Event::Ping,
            Event::Moved(-1, 2),
            Event::Renamed {
                from: "a".into(),
                to: "b".into(),
            },
            Event::Wrapped(Box::new(item)),
        ],
        totals,
        flag: (true, '\n'),
        unit: (),
    }
}

#[test]
fn output_matches_serde_json() -> Result<(), Box<dyn Error>> {
    let order = sample();
    assert_eq!(jsonry::ser::to_string(&order)?, serde_json::to_string(&order)?);
    Ok(())
}

#[test]
fn serde_values_nest_inside_reflected_data() -> Result<(), Box<dyn Error>> {
    let mut map = BTreeMap::new();
    map.insert("order", Serde(sample()));
    let out = Registry::new().to_string(&map)?;
    let expected = format!(r#"{{"order":{}}}"#, serde_json::to_string(&sample())?);
    assert_eq!(out, expected);

    let list = vec![Serde(Event::Ping), Serde(Event::Moved(0, 0))];
    assert_eq!(Registry::new().to_string(&list)?, r#"["Ping",{"Moved":[0,0]}]"#);
    Ok(())
}

#[test]
fn pretty_serde_output_parses_back() -> Result<(), Box<dyn Error>> {
    let registry = Registry::with_options(Options::pretty());
    let mut out = Vec::new();
    jsonry::ser::to_writer(&registry, &mut out, &sample())?;
    let text = String::from_utf8(out)?;
    assert!(text.contains('\n'));
    let reparsed: serde_json::Value = serde_json::from_str(&text)?;
    let expected: serde_json::Value = serde_json::from_str(&serde_json::to_string(&sample())?)?;
    assert_eq!(reparsed, expected);
    Ok(())
}

#[test]
fn fast_variant_matches_compact() -> Result<(), Box<dyn Error>> {
    let fast = Registry::with_options(Options::fast());
    let mut out = Vec::new();
    jsonry::ser::to_writer(&fast, &mut out, &sample())?;
    assert_eq!(String::from_utf8(out)?, jsonry::ser::to_string(&sample())?);
    Ok(())
}

#[test]
fn struct_fields_use_the_field_name_policy() -> Result<(), Box<dyn Error>> {
    #[derive(Serialize)]
    struct Keys {
        plain: u8,
        #[serde(rename = "two words")]
        spaced: u8,
        r#for: u8,
    }
    let mut registry = Registry::new();
    registry.set_field_name_policy(BareNames);
    let mut out = Vec::new();
    jsonry::ser::to_writer(
        &registry,
        &mut out,
        &Keys {
            plain: 1,
            spaced: 2,
            r#for: 3,
        },
    )?;
    assert_eq!(String::from_utf8(out)?, r#"{plain:1,"two words":2,"for":3}"#);
    Ok(())
}

#[test]
fn non_finite_floats_become_names() -> Result<(), Box<dyn Error>> {
    #[derive(Serialize)]
    struct Floats {
        a: f64,
        b: f32,
        c: f64,
    }
    let out = jsonry::ser::to_string(&Floats {
        a: f64::NAN,
        b: f32::INFINITY,
        c: f64::NEG_INFINITY,
    })?;
    assert_eq!(out, r#"{"a":"NaN","b":"Infinity","c":"-Infinity"}"#);
    Ok(())
}

#[test]
fn integer_map_keys_are_stringified() -> Result<(), Box<dyn Error>> {
    let mut map = BTreeMap::new();
    map.insert(3u8, "c");
    map.insert(1u8, "a");
    assert_eq!(jsonry::ser::to_string(&map)?, r#"{"1":"a","3":"c"}"#);
    Ok(())
}

#[test]
fn compound_map_keys_are_rejected() {
    let mut map = BTreeMap::new();
    map.insert(vec![1], 1);
    let err = jsonry::ser::to_string(&map).unwrap_err();
    assert!(matches!(err, jsonry::Error::Message(_)), "{err}");
}
