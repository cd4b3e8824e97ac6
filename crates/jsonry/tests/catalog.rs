use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};
use std::error::Error;
use std::rc::Rc;

use jsonry::{Lazy, Raw, Registry};

fn compact(value: &dyn jsonry::Reflect) -> Result<String, Box<dyn Error>> {
    Ok(Registry::new().to_string(value)?)
}

#[test]
fn booleans_and_numbers() -> Result<(), Box<dyn Error>> {
    assert_eq!(compact(&true)?, "true");
    assert_eq!(compact(&-7i8)?, "-7");
    assert_eq!(compact(&u64::MAX)?, "18446744073709551615");
    assert_eq!(compact(&i128::MIN)?, "-170141183460469231731687303715884105728");
    assert_eq!(compact(&0.1f32)?, "0.1");
    assert_eq!(compact(&1.5e300)?, "1.5e300");
    assert_eq!(compact(&-0.0f64)?, "-0.0");
    Ok(())
}

#[test]
fn non_finite_floats_are_quoted_names() -> Result<(), Box<dyn Error>> {
    assert_eq!(compact(&f64::NAN)?, r#""NaN""#);
    assert_eq!(compact(&f32::INFINITY)?, r#""Infinity""#);
    assert_eq!(compact(&vec![f64::NEG_INFINITY])?, r#"["-Infinity"]"#);
    Ok(())
}

#[test]
fn scenario_d_quote_and_newline() -> Result<(), Box<dyn Error>> {
    let out = compact(&String::from("\"\n"))?;
    assert_eq!(out, r#""\"\n""#);
    assert_eq!(out.len(), 6);
    Ok(())
}

#[test]
fn text_types_share_one_escaping_table() -> Result<(), Box<dyn Error>> {
    assert_eq!(compact(&"a\u{1}b")?, r#""a\u0001b""#);
    assert_eq!(compact(&'\u{2028}')?, r#""\u2028""#);
    assert_eq!(compact(&'"')?, r#""\"""#);
    assert_eq!(compact(&Rc::<str>::from("\\"))?, r#""\\""#);
    assert_eq!(compact(&Box::<str>::from("héllo ✓"))?, "\"héllo ✓\"");
    assert_eq!(compact(&std::borrow::Cow::Borrowed("\u{8}\u{c}\r"))?, r#""\b\f\r""#);
    Ok(())
}

#[derive(Debug, Clone, Copy)]
enum Color {
    Red,
    DarkBlue,
}
jsonry::impl_reflect_enum!(Color { Red, DarkBlue });

#[test]
fn enumerations_are_quoted_names() -> Result<(), Box<dyn Error>> {
    assert_eq!(compact(&Color::Red)?, r#""Red""#);
    assert_eq!(compact(&vec![Color::DarkBlue, Color::Red])?, r#"["DarkBlue","Red"]"#);
    Ok(())
}

#[test]
fn raw_is_written_verbatim() -> Result<(), Box<dyn Error>> {
    let mut map = BTreeMap::new();
    map.insert("f", Raw::new("function(){return 1}"));
    assert_eq!(compact(&map)?, r#"{"f":function(){return 1}}"#);
    assert_eq!(compact(&vec![Raw::new("1e3")])?, "[1e3]");
    Ok(())
}

#[test]
fn collections_become_arrays() -> Result<(), Box<dyn Error>> {
    let deque: VecDeque<i32> = (1..=3).collect();
    let set: BTreeSet<&str> = ["b", "a"].into_iter().collect();
    assert_eq!(compact(&deque)?, "[1,2,3]");
    assert_eq!(compact(&set)?, r#"["a","b"]"#);
    assert_eq!(compact(&[0u8; 0])?, "[]");
    assert_eq!(compact(&vec![Some(1), None])?, "[1,null]");
    Ok(())
}

#[test]
fn maps_keep_iteration_order_and_stringify_keys() -> Result<(), Box<dyn Error>> {
    let mut map = BTreeMap::new();
    map.insert(10, vec!["x"]);
    map.insert(2, vec![]);
    assert_eq!(compact(&map)?, r#"{"2":[],"10":["x"]}"#);

    let single: HashMap<char, bool> = [('k', false)].into_iter().collect();
    assert_eq!(compact(&single)?, r#"{"k":false}"#);
    Ok(())
}

#[test]
fn lazy_iterators_are_consumed_once() -> Result<(), Box<dyn Error>> {
    let registry = Registry::new();
    let lazy = Lazy::new((1..4).map(|i| i * 10));
    assert!(!lazy.is_consumed());
    assert_eq!(registry.to_string(&lazy)?, "[10,20,30]");
    assert!(lazy.is_consumed());
    assert_eq!(registry.to_string(&lazy)?, "[]");
    Ok(())
}

#[cfg(feature = "chrono")]
mod dates {
    use std::error::Error;
    use std::sync::Arc;
    use std::time::{Duration, UNIX_EPOCH};

    use chrono::{NaiveDate, TimeZone, Utc};
    use jsonry::encode::DateEncoder;
    use jsonry::reflect::Temporal;
    use jsonry::{DateFormat, Registry};

    #[test]
    fn iso_by_default() -> Result<(), Box<dyn Error>> {
        let registry = Registry::new();
        let day = NaiveDate::from_ymd_opt(2024, 5, 1).ok_or("date")?;
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 34, 56).single().ok_or("time")?;
        assert_eq!(registry.to_string(&day)?, r#""2024-05-01""#);
        assert_eq!(registry.to_string(&at)?, r#""2024-05-01T12:34:56""#);
        let precise = day.and_hms_milli_opt(0, 0, 1, 5).ok_or("time")?;
        assert_eq!(registry.to_string(&precise)?, r#""2024-05-01T00:00:01.005""#);
        Ok(())
    }

    #[test]
    fn epoch_millis_from_registry_options() -> Result<(), Box<dyn Error>> {
        let mut registry = Registry::new();
        registry.set_date_format(DateFormat::EpochMillis);
        let at = UNIX_EPOCH + Duration::from_millis(1_714_566_896_007);
        assert_eq!(registry.to_string(&at)?, "1714566896007");
        Ok(())
    }

    #[test]
    fn per_encoder_format_overrides_options() -> Result<(), Box<dyn Error>> {
        let mut registry = Registry::new();
        registry.register::<Temporal>(Arc::new(DateEncoder::epoch_millis()), false);
        let day = NaiveDate::from_ymd_opt(1970, 1, 2).ok_or("date")?;
        assert_eq!(registry.to_string(&day)?, "86400000");
        Ok(())
    }
}

#[cfg(feature = "json")]
mod json_values {
    use std::error::Error;

    use jsonry::{BareNames, Options, Registry};
    use serde_json::json;

    #[test]
    fn value_round_trips_through_serde_json() -> Result<(), Box<dyn Error>> {
        let value = json!({
            "name": "widget",
            "tags": ["a", "b\n"],
            "price": 9.5,
            "count": -3,
            "meta": {"ok": true, "none": null},
            "empty": []
        });
        let out = Registry::new().to_string(&value)?;
        assert_eq!(out, serde_json::to_string(&value)?);
        Ok(())
    }

    #[test]
    fn pretty_value_matches_serde_json_structure() -> Result<(), Box<dyn Error>> {
        let value = json!({"a": [1, {"b": null}], "c": {}});
        let out = Registry::with_options(Options::pretty()).to_string(&value)?;
        assert_eq!(out, "{\n  \"a\":[\n    1,\n    {\n      \"b\":null\n    }\n  ],\n  \"c\":{}\n}");
        Ok(())
    }

    #[test]
    fn object_keys_follow_the_field_name_policy() -> Result<(), Box<dyn Error>> {
        let mut registry = Registry::new();
        registry.set_field_name_policy(BareNames);
        let value = json!({"plain": 1, "with space": 2, "new": 3});
        assert_eq!(registry.to_string(&value)?, r#"{plain:1,"with space":2,"new":3}"#);
        Ok(())
    }
}
