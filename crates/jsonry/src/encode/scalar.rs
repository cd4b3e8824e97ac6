use crate::encode::{Encoder, collection, unsupported};
use crate::error::Result;
use crate::number::Number;
use crate::reflect::{Reflect, ReflectRef};
use crate::writer::JsonWriter;

/// `true` / `false`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoolEncoder;

impl Encoder for BoolEncoder {
    fn encode(&self, value: &dyn Reflect, w: &mut dyn JsonWriter) -> Result<()> {
        match value.reflect_ref() {
            ReflectRef::Bool(b) => write_bool(w, b),
            _ => Err(unsupported(self, value)),
        }
    }
}

/// Bare numbers; non-finite floats as quoted names.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberEncoder;

impl Encoder for NumberEncoder {
    fn encode(&self, value: &dyn Reflect, w: &mut dyn JsonWriter) -> Result<()> {
        match value.reflect_ref() {
            ReflectRef::Number(n) => write_number(w, n),
            _ => Err(unsupported(self, value)),
        }
    }
}

/// Quoted, escaped text. Also handles `char`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringEncoder;

impl Encoder for StringEncoder {
    fn encode(&self, value: &dyn Reflect, w: &mut dyn JsonWriter) -> Result<()> {
        match value.reflect_ref() {
            ReflectRef::Text(s) => w.write_quoted(s),
            ReflectRef::Char(c) => write_char(w, c),
            _ => Err(unsupported(self, value)),
        }
    }
}

/// An enumeration constant as its quoted name.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnumEncoder;

impl Encoder for EnumEncoder {
    fn encode(&self, value: &dyn Reflect, w: &mut dyn JsonWriter) -> Result<()> {
        match value.reflect_ref() {
            ReflectRef::Variant(name) => w.write_quoted(name),
            _ => Err(unsupported(self, value)),
        }
    }
}

/// Writes a [`Raw`](crate::Raw) expression verbatim.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawEncoder;

impl Encoder for RawEncoder {
    fn encode(&self, value: &dyn Reflect, w: &mut dyn JsonWriter) -> Result<()> {
        match value.reflect_ref() {
            ReflectRef::Raw(text) => w.write_raw(text),
            _ => Err(unsupported(self, value)),
        }
    }
}

/// Lets a value that implements [`Emit`](crate::reflect::Emit) write itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelfEncoder;

impl Encoder for SelfEncoder {
    fn encode(&self, value: &dyn Reflect, w: &mut dyn JsonWriter) -> Result<()> {
        match value.reflect_ref() {
            ReflectRef::Emit(inner) => inner.emit(w),
            _ => Err(unsupported(self, value)),
        }
    }
}

/// Encodes any value by its shape alone.
///
/// Used for dynamically shaped values such as `serde_json::Value`, where the
/// variant decides the output rather than the type. `Object` shapes carry no
/// accessor table of their own and are rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShapeEncoder;

impl Encoder for ShapeEncoder {
    fn encode(&self, value: &dyn Reflect, w: &mut dyn JsonWriter) -> Result<()> {
        match value.reflect_ref() {
            ReflectRef::Null | ReflectRef::Option(None) => w.write_raw("null"),
            ReflectRef::Option(Some(inner)) => self.encode(inner, w),
            ReflectRef::Bool(b) => write_bool(w, b),
            ReflectRef::Number(n) => write_number(w, n),
            ReflectRef::Char(c) => write_char(w, c),
            ReflectRef::Text(s) | ReflectRef::Variant(s) => w.write_quoted(s),
            #[cfg(feature = "chrono")]
            ReflectRef::Date(at) => {
                let format = w.registry().options().date_format;
                super::date::write_date(w, at, format)
            }
            ReflectRef::Raw(text) => w.write_raw(text),
            ReflectRef::Sequence(items) => collection::write_sequence(items, w),
            ReflectRef::Map(entries) => collection::write_map(entries, w),
            ReflectRef::Emit(inner) => inner.emit(w),
            ReflectRef::Object => Err(unsupported(self, value)),
        }
    }
}

fn write_bool(w: &mut dyn JsonWriter, b: bool) -> Result<()> {
    w.write_raw(if b { "true" } else { "false" })
}

fn write_char(w: &mut dyn JsonWriter, c: char) -> Result<()> {
    let mut buf = [0u8; 4];
    w.write_quoted(c.encode_utf8(&mut buf))
}

pub(crate) fn write_number(w: &mut dyn JsonWriter, n: Number) -> Result<()> {
    match n.non_finite_name() {
        Some(name) => w.write_quoted(name),
        None => w.write_raw(&n.to_string()),
    }
}
