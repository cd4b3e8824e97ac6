//! Bridge from `serde::Serialize` to the writer protocol.
//!
//! [`Serde`] wraps any serializable value so it can sit inside reflected
//! data (a map value, a bean property); the free functions serialize a value
//! directly. Either way the output goes through the same writer, so the
//! field-name policy and writer variant apply.
//!
//! Enum variants use serde's externally tagged layout, as `serde_json` does.
//! Non-finite floats are written as `"NaN"`, `"Infinity"` and `"-Infinity"`.

use core::any::Any;
use core::fmt::Display;

use std::io;

use serde::Serialize;
use serde::ser::{self, Impossible};

use crate::error::{Error, Result};
use crate::number::Number;
use crate::reflect::{Emit, Reflect, ReflectRef, SelfEncoding, TypeInfo, Typed};
use crate::registry::Registry;
use crate::writer::JsonWriter;

/// A `Serialize` value taking part in reflected serialization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Serde<T>(pub T);

impl<T: Serialize + 'static> Typed for Serde<T> {
    fn type_info() -> TypeInfo {
        TypeInfo::class::<Self>().implements(&[SelfEncoding::type_info])
    }
}

impl<T: Serialize + 'static> Reflect for Serde<T> {
    fn reflect_type(&self) -> TypeInfo {
        <Self as Typed>::type_info()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Emit(self)
    }
}

impl<T: Serialize> Emit for Serde<T> {
    fn emit(&self, w: &mut dyn JsonWriter) -> Result<()> {
        serialize_into(w, &self.0)
    }
}

/// Serializes `value` at the writer's current position.
pub fn serialize_into<T: Serialize + ?Sized>(w: &mut dyn JsonWriter, value: &T) -> Result<()> {
    value.serialize(WriterSerializer { w })
}

pub fn to_writer<W, T>(registry: &Registry, sink: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: Serialize + ?Sized,
{
    let mut writer = registry.create_writer(sink);
    serialize_into(&mut writer, value)?;
    writer.finish()?;
    Ok(())
}

/// Serializes with the default registry.
pub fn to_string<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut out = Vec::with_capacity(128);
    to_writer(Registry::global(), &mut out, value)?;
    String::from_utf8(out).map_err(|e| Error::Message(e.to_string()))
}

impl ser::Error for Error {
    fn custom<T: Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

struct WriterSerializer<'a> {
    w: &'a mut dyn JsonWriter,
}

fn write_number(w: &mut dyn JsonWriter, n: Number) -> Result<()> {
    match n.non_finite_name() {
        Some(name) => w.write_string(name),
        None => w.write_literal(&n.to_string()),
    }
}

impl<'a> ser::Serializer for WriterSerializer<'a> {
    type Ok = ();
    type Error = Error;

    type SerializeSeq = Compound<'a>;
    type SerializeTuple = Compound<'a>;
    type SerializeTupleStruct = Compound<'a>;
    type SerializeTupleVariant = Compound<'a>;
    type SerializeMap = Compound<'a>;
    type SerializeStruct = Compound<'a>;
    type SerializeStructVariant = Compound<'a>;

    fn serialize_bool(self, v: bool) -> Result<()> {
        self.w.write_literal(if v { "true" } else { "false" })
    }

    fn serialize_i8(self, v: i8) -> Result<()> {
        write_number(self.w, v.into())
    }

    fn serialize_i16(self, v: i16) -> Result<()> {
        write_number(self.w, v.into())
    }

    fn serialize_i32(self, v: i32) -> Result<()> {
        write_number(self.w, v.into())
    }

    fn serialize_i64(self, v: i64) -> Result<()> {
        write_number(self.w, v.into())
    }

    fn serialize_i128(self, v: i128) -> Result<()> {
        write_number(self.w, v.into())
    }

    fn serialize_u8(self, v: u8) -> Result<()> {
        write_number(self.w, v.into())
    }

    fn serialize_u16(self, v: u16) -> Result<()> {
        write_number(self.w, v.into())
    }

    fn serialize_u32(self, v: u32) -> Result<()> {
        write_number(self.w, v.into())
    }

    fn serialize_u64(self, v: u64) -> Result<()> {
        write_number(self.w, v.into())
    }

    fn serialize_u128(self, v: u128) -> Result<()> {
        write_number(self.w, v.into())
    }

    fn serialize_f32(self, v: f32) -> Result<()> {
        write_number(self.w, v.into())
    }

    fn serialize_f64(self, v: f64) -> Result<()> {
        write_number(self.w, v.into())
    }

    fn serialize_char(self, v: char) -> Result<()> {
        let mut buf = [0u8; 4];
        self.w.write_string(v.encode_utf8(&mut buf))
    }

    fn serialize_str(self, v: &str) -> Result<()> {
        self.w.write_string(v)
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<()> {
        self.w.begin_array()?;
        for b in v {
            write_number(self.w, (*b).into())?;
        }
        self.w.end_array()
    }

    fn serialize_none(self) -> Result<()> {
        self.w.write_null()
    }

    fn serialize_some<T: ?Sized + Serialize>(self, value: &T) -> Result<()> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<()> {
        self.w.write_null()
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<()> {
        self.w.write_null()
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<()> {
        self.w.write_string(variant)
    }

    fn serialize_newtype_struct<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<()> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<()> {
        let w = self.w;
        w.begin_object()?;
        w.write_complex_property_start(variant)?;
        value.serialize(WriterSerializer { w: &mut *w })?;
        w.end_object()
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Compound<'a>> {
        self.w.begin_array()?;
        Ok(Compound::new(self.w, Close::Array))
    }

    fn serialize_tuple(self, len: usize) -> Result<Compound<'a>> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<Compound<'a>> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Compound<'a>> {
        self.w.begin_object()?;
        self.w.write_complex_property_start(variant)?;
        self.w.begin_array()?;
        Ok(Compound::new(self.w, Close::ArrayInVariant))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Compound<'a>> {
        self.w.begin_object()?;
        Ok(Compound::new(self.w, Close::Object))
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<Compound<'a>> {
        self.serialize_map(Some(len))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Compound<'a>> {
        self.w.begin_object()?;
        self.w.write_complex_property_start(variant)?;
        self.w.begin_object()?;
        Ok(Compound::new(self.w, Close::ObjectInVariant))
    }
}

#[derive(Debug, Clone, Copy)]
enum Close {
    Array,
    Object,
    /// `{"Variant":[..]}`
    ArrayInVariant,
    /// `{"Variant":{..}}`
    ObjectInVariant,
}

struct Compound<'a> {
    w: &'a mut dyn JsonWriter,
    close: Close,
}

impl<'a> Compound<'a> {
    fn new(w: &'a mut dyn JsonWriter, close: Close) -> Self {
        Self { w, close }
    }

    fn element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        value.serialize(WriterSerializer { w: &mut *self.w })
    }

    fn field<T: ?Sized + Serialize>(&mut self, key: &str, value: &T) -> Result<()> {
        self.w.write_complex_property_start(key)?;
        self.element(value)
    }

    fn finish(self) -> Result<()> {
        match self.close {
            Close::Array => self.w.end_array(),
            Close::Object => self.w.end_object(),
            Close::ArrayInVariant => {
                self.w.end_array()?;
                self.w.end_object()
            }
            Close::ObjectInVariant => {
                self.w.end_object()?;
                self.w.end_object()
            }
        }
    }
}

impl ser::SerializeSeq for Compound<'_> {
    type Ok = ();
    type Error = Error;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        self.element(value)
    }

    fn end(self) -> Result<()> {
        self.finish()
    }
}

impl ser::SerializeTuple for Compound<'_> {
    type Ok = ();
    type Error = Error;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        self.element(value)
    }

    fn end(self) -> Result<()> {
        self.finish()
    }
}

impl ser::SerializeTupleStruct for Compound<'_> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        self.element(value)
    }

    fn end(self) -> Result<()> {
        self.finish()
    }
}

impl ser::SerializeTupleVariant for Compound<'_> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        self.element(value)
    }

    fn end(self) -> Result<()> {
        self.finish()
    }
}

impl ser::SerializeMap for Compound<'_> {
    type Ok = ();
    type Error = Error;

    fn serialize_key<T: ?Sized + Serialize>(&mut self, key: &T) -> Result<()> {
        let key = key.serialize(KeySerializer)?;
        self.w.write_complex_property_start(&key)
    }

    fn serialize_value<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        self.element(value)
    }

    fn end(self) -> Result<()> {
        self.finish()
    }
}

impl ser::SerializeStruct for Compound<'_> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, key: &'static str, value: &T) -> Result<()> {
        self.field(key, value)
    }

    fn end(self) -> Result<()> {
        self.finish()
    }
}

impl ser::SerializeStructVariant for Compound<'_> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, key: &'static str, value: &T) -> Result<()> {
        self.field(key, value)
    }

    fn end(self) -> Result<()> {
        self.finish()
    }
}

/// Renders a map key to text; only scalar keys are accepted.
struct KeySerializer;

fn key_error() -> Error {
    Error::Message("map key must be a string, number, char or bool".to_string())
}

macro_rules! key_to_string {
    ($($method:ident: $ty:ty),* $(,)?) => {
        $(
            fn $method(self, v: $ty) -> Result<String> {
                Ok(v.to_string())
            }
        )*
    };
}

impl ser::Serializer for KeySerializer {
    type Ok = String;
    type Error = Error;

    type SerializeSeq = Impossible<String, Error>;
    type SerializeTuple = Impossible<String, Error>;
    type SerializeTupleStruct = Impossible<String, Error>;
    type SerializeTupleVariant = Impossible<String, Error>;
    type SerializeMap = Impossible<String, Error>;
    type SerializeStruct = Impossible<String, Error>;
    type SerializeStructVariant = Impossible<String, Error>;

    key_to_string! {
        serialize_bool: bool,
        serialize_i8: i8,
        serialize_i16: i16,
        serialize_i32: i32,
        serialize_i64: i64,
        serialize_i128: i128,
        serialize_u8: u8,
        serialize_u16: u16,
        serialize_u32: u32,
        serialize_u64: u64,
        serialize_u128: u128,
        serialize_f32: f32,
        serialize_f64: f64,
        serialize_char: char,
        serialize_str: &str,
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<String> {
        Err(key_error())
    }

    fn serialize_none(self) -> Result<String> {
        Err(key_error())
    }

    fn serialize_some<T: ?Sized + Serialize>(self, value: &T) -> Result<String> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<String> {
        Err(key_error())
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<String> {
        Err(key_error())
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<String> {
        Ok(variant.to_string())
    }

    fn serialize_newtype_struct<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<String> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<String> {
        Err(key_error())
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        Err(key_error())
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        Err(key_error())
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        Err(key_error())
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(key_error())
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        Err(key_error())
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        Err(key_error())
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(key_error())
    }
}
