use core::any::Any;

use serde_json::{Map, Value};

use crate::error::Result;
use crate::number::Number;
use crate::reflect::{Keyed, Mapping, Reflect, ReflectRef, TypeInfo, Typed};

fn number_of(n: &serde_json::Number) -> Number {
    if let Some(u) = n.as_u64() {
        Number::U64(u)
    } else if let Some(i) = n.as_i64() {
        Number::I64(i)
    } else {
        Number::F64(n.as_f64().unwrap_or(f64::NAN))
    }
}

impl Typed for Value {
    fn type_info() -> TypeInfo {
        TypeInfo::class::<Value>()
    }
}

impl Reflect for Value {
    fn reflect_type(&self) -> TypeInfo {
        <Self as Typed>::type_info()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn reflect_ref(&self) -> ReflectRef<'_> {
        match self {
            Value::Null => ReflectRef::Null,
            Value::Bool(b) => ReflectRef::Bool(*b),
            Value::Number(n) => ReflectRef::Number(number_of(n)),
            Value::String(s) => ReflectRef::Text(s),
            Value::Array(items) => ReflectRef::Sequence(items),
            Value::Object(map) => ReflectRef::Map(map),
        }
    }
}

impl Mapping for Map<String, Value> {
    fn for_each_entry(&self, f: &mut dyn FnMut(&str, &dyn Reflect) -> Result<()>) -> Result<()> {
        for (k, v) in self {
            f(k, v)?;
        }
        Ok(())
    }
}

impl Typed for Map<String, Value> {
    fn type_info() -> TypeInfo {
        TypeInfo::class::<Map<String, Value>>().implements(&[Keyed::type_info])
    }
}

impl Reflect for Map<String, Value> {
    fn reflect_type(&self) -> TypeInfo {
        <Self as Typed>::type_info()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Map(self)
    }
}
