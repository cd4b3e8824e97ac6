use std::collections::BTreeMap;

use jsonry::{JsonWriter, Options, Registry};
use proptest::prelude::*;

/// A small document tree driven through the writer call by call.
#[derive(Debug, Clone)]
enum Doc {
    Int(i64),
    Text(String),
    List(Vec<Doc>),
    Object(Vec<(String, Doc)>),
}

fn doc() -> impl Strategy<Value = Doc> {
    let leaf = prop_oneof![
        any::<i64>().prop_map(Doc::Int),
        any::<String>().prop_map(Doc::Text),
    ];
    leaf.prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Doc::List),
            prop::collection::vec(("[a-z]{1,6}", inner), 0..6).prop_map(Doc::Object),
        ]
    })
}

fn write(doc: &Doc, w: &mut dyn JsonWriter) -> jsonry::Result<()> {
    match doc {
        Doc::Int(i) => w.write_value(i),
        Doc::Text(s) => w.write_string(s),
        Doc::List(items) => {
            w.begin_array()?;
            for item in items {
                write(item, w)?;
            }
            w.end_array()
        }
        Doc::Object(props) => {
            w.begin_object()?;
            for (name, value) in props {
                w.write_complex_property_start(name)?;
                write(value, w)?;
            }
            w.end_object()
        }
    }
}

fn render(registry: &Registry, doc: &Doc) -> String {
    let mut w = registry.create_writer(Vec::new());
    write(doc, &mut w).unwrap();
    String::from_utf8(w.finish().unwrap()).unwrap()
}

fn to_json(doc: &Doc) -> serde_json::Value {
    match doc {
        Doc::Int(i) => serde_json::Value::from(*i),
        Doc::Text(s) => serde_json::Value::from(s.clone()),
        Doc::List(items) => serde_json::Value::Array(items.iter().map(to_json).collect()),
        Doc::Object(props) => {
            let mut map = serde_json::Map::new();
            for (name, value) in props {
                map.insert(name.clone(), to_json(value));
            }
            serde_json::Value::Object(map)
        }
    }
}

proptest! {
    #[test]
    fn escaped_text_decodes_to_the_original(s in any::<String>()) {
        let quoted = Registry::new().to_string(&s).unwrap();
        let decoded: String = serde_json::from_str(&quoted).unwrap();
        prop_assert_eq!(decoded, s);
    }

    #[test]
    fn escaped_text_has_no_raw_controls_or_separators(s in any::<String>()) {
        let quoted = Registry::new().to_string(&s).unwrap();
        let raw = quoted.chars().find(|&c| (c as u32) < 0x20 || matches!(c, '\u{2028}' | '\u{2029}'));
        prop_assert_eq!(raw, None, "unescaped character in {:?}", quoted);
    }

    #[test]
    fn compact_output_is_valid_json(d in doc()) {
        let out = render(&Registry::new(), &d);
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        prop_assert_eq!(parsed, to_json(&d));
    }

    #[test]
    fn brackets_balance(d in doc()) {
        let out = render(&Registry::new(), &d);
        let (mut depth, mut in_string, mut escaped) = (0i64, false, false);
        for c in out.chars() {
            match c {
                _ if escaped => escaped = false,
                '\\' if in_string => escaped = true,
                '"' => in_string = !in_string,
                '[' | '{' if !in_string => depth += 1,
                ']' | '}' if !in_string => {
                    depth -= 1;
                    prop_assert!(depth >= 0);
                }
                _ => {}
            }
        }
        prop_assert_eq!(depth, 0);
        prop_assert!(!in_string);
    }

    #[test]
    fn all_variants_agree(d in doc()) {
        let compact = render(&Registry::new(), &d);
        let fast = render(&Registry::with_options(Options::fast()), &d);
        let pretty = render(&Registry::with_options(Options::pretty()), &d);
        prop_assert_eq!(&fast, &compact);
        let a: serde_json::Value = serde_json::from_str(&compact).unwrap();
        let b: serde_json::Value = serde_json::from_str(&pretty).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn string_maps_match_serde_json(map in prop::collection::btree_map("[ -~]{0,8}", any::<i32>(), 0..8)) {
        let ours = Registry::new().to_string(&map).unwrap();
        prop_assert_eq!(ours, serde_json::to_string(&map).unwrap());
    }
}

#[test]
fn empty_map_is_an_empty_object() {
    let map: BTreeMap<String, i32> = BTreeMap::new();
    assert_eq!(Registry::new().to_string(&map).unwrap(), "{}");
}
