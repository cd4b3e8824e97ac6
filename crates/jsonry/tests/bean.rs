use std::error::Error;
use std::fmt;

use jsonry::encode::BeanSerializer;
use jsonry::reflect::{Accessor, TypeInfo, Typed};
use jsonry::{Options, Registry};

struct Address {
    city: String,
    zip: Option<String>,
}

impl Typed for Address {
    fn type_info() -> TypeInfo {
        TypeInfo::class::<Address>().with_accessors(|| {
            vec![
                Accessor::borrowed("getCity", |a: &Address| &a.city),
                Accessor::borrowed("getZip", |a: &Address| &a.zip),
            ]
        })
    }
}

struct Person {
    name: String,
    age: u8,
    active: bool,
    address: Address,
    nicknames: Vec<String>,
}

impl Person {
    fn sample() -> Self {
        Person {
            name: "Grace".into(),
            age: 85,
            active: false,
            address: Address {
                city: "Arlington".into(),
                zip: None,
            },
            nicknames: vec!["Amazing Grace".into()],
        }
    }
}

impl Typed for Person {
    fn type_info() -> TypeInfo {
        TypeInfo::class::<Person>().with_accessors(|| {
            vec![
                Accessor::borrowed("get_name", |p: &Person| &p.name),
                Accessor::borrowed("get_age", |p: &Person| &p.age),
                Accessor::borrowed("is_active", |p: &Person| &p.active),
                Accessor::borrowed("get_address", |p: &Person| &p.address),
                Accessor::borrowed("get_nicknames", |p: &Person| &p.nicknames),
                Accessor::owned("getInitial", |p: &Person| p.name.chars().next()),
                Accessor::owned("reset", |_: &Person| ()),
                // Shadowed by `get_name` above.
                Accessor::owned("name", |_: &Person| "shadow"),
            ]
        })
    }
}

jsonry::impl_reflect!(Address, Person);

#[test]
fn nested_beans_in_declaration_order() -> Result<(), Box<dyn Error>> {
    let out = Registry::new().to_string(&Person::sample())?;
    assert_eq!(
        out,
        r#"{"name":"Grace","age":85,"active":false,"address":{"city":"Arlington","zip":null},"nicknames":["Amazing Grace"],"initial":"G"}"#
    );
    Ok(())
}

#[test]
fn object_separators_do_not_depend_on_value_shapes() -> Result<(), Box<dyn Error>> {
    let out = Registry::new().to_string(&Person::sample())?;
    let top_level_commas = {
        let mut depth = 0i32;
        let mut in_string = false;
        let mut escaped = false;
        let mut commas = 0;
        for c in out.chars() {
            match c {
                _ if escaped => escaped = false,
                '\\' if in_string => escaped = true,
                '"' => in_string = !in_string,
                '{' | '[' if !in_string => depth += 1,
                '}' | ']' if !in_string => depth -= 1,
                ',' if !in_string && depth == 1 => commas += 1,
                _ => {}
            }
        }
        commas
    };
    assert_eq!(top_level_commas, 5);
    Ok(())
}

#[test]
fn introspection_lists_properties_once() {
    let bean = BeanSerializer::introspect(&Person::type_info());
    let names: Vec<&str> = bean.property_names().collect();
    assert_eq!(names, ["name", "age", "active", "address", "nicknames", "initial"]);
    assert!(bean.type_name().ends_with("Person"));
}

#[test]
fn pretty_nested_bean() -> Result<(), Box<dyn Error>> {
    let registry = Registry::with_options(Options::pretty());
    let address = Address {
        city: "Oslo".into(),
        zip: Some("0150".into()),
    };
    assert_eq!(
        registry.to_string(&vec![address])?,
        "[\n  {\n    \"city\":\"Oslo\",\n    \"zip\":\"0150\"\n  }\n]"
    );
    Ok(())
}

#[derive(Debug)]
struct Unavailable;

impl fmt::Display for Unavailable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("balance service unavailable")
    }
}

struct Account {
    id: u32,
}

impl Typed for Account {
    fn type_info() -> TypeInfo {
        TypeInfo::class::<Account>().with_accessors(|| {
            vec![
                Accessor::borrowed("get_id", |a: &Account| &a.id),
                Accessor::fallible("get_balance", |_: &Account| Err::<i64, _>(Unavailable)),
            ]
        })
    }
}
jsonry::impl_reflect!(Account);

#[test]
fn failing_accessor_aborts_serialization() {
    let err = Registry::new().to_string(&Account { id: 1 }).unwrap_err();
    match err {
        jsonry::Error::Access {
            property, message, ..
        } => {
            assert_eq!(property, "get_balance");
            assert_eq!(message, "balance service unavailable");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn accessor_on_wrong_receiver_is_an_access_error() {
    let accessor = Accessor::borrowed("get_id", |a: &Account| &a.id);
    let result = accessor.get(&5u32);
    assert!(matches!(result, Err(jsonry::Error::Access { .. })));
}

struct Invoice {
    lines: Vec<u32>,
}

impl Typed for Invoice {
    fn type_info() -> TypeInfo {
        TypeInfo::class::<Invoice>().with_accessors(|| {
            vec![
                Accessor::owned("total", |i: &Invoice| i.lines.iter().sum::<u32>()),
                Accessor::owned("is_empty", |i: &Invoice| i.lines.is_empty()),
                Accessor::owned("is_count", |i: &Invoice| i.lines.len()),
                Accessor::owned("URL", |_: &Invoice| "/invoices/1"),
            ]
        })
    }
}
jsonry::impl_reflect!(Invoice);

#[test]
fn every_declared_accessor_is_a_property() -> Result<(), Box<dyn Error>> {
    let out = Registry::new().to_string(&Invoice { lines: vec![2, 3] })?;
    assert_eq!(out, r#"{"total":5,"empty":false,"is_count":2,"URL":"/invoices/1"}"#);
    Ok(())
}
