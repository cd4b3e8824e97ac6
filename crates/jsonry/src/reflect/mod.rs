//! Runtime type model the registry dispatches on.
//!
//! A value takes part in serialization by implementing [`Reflect`]: it reports
//! its runtime [`TypeInfo`] (identity, declared parent, interfaces, override
//! marker and accessor table) and exposes its shape through [`ReflectRef`].
//! Encoders are chosen by type; they read the value through its shape.

mod accessor;
mod capability;
mod impls;
mod macros;
mod type_info;

#[cfg(feature = "chrono")]
mod dates;
#[cfg(feature = "json")]
mod json;

use core::any::Any;

pub use accessor::{Accessor, Field, Returns};
pub use capability::{CharSequence, Enumeration, Iterable, Keyed, Numeric, SelfEncoding, Temporal};
pub use type_info::{Ancestors, EncoderRef, OverrideMarker, TypeInfo, TypeKind};

use crate::error::Result;
use crate::number::Number;
use crate::writer::JsonWriter;

/// Static descriptor of a type.
pub trait Typed: 'static {
    fn type_info() -> TypeInfo;
}

/// Object-safe runtime view of a value.
pub trait Reflect: Any {
    /// Descriptor of the value's runtime type.
    fn reflect_type(&self) -> TypeInfo;

    fn as_any(&self) -> &dyn Any;

    fn reflect_ref(&self) -> ReflectRef<'_>;
}

/// The shape of a value, as seen by the built-in encoders.
pub enum ReflectRef<'a> {
    Null,
    /// An optional value; `None` encodes as `null`.
    Option(Option<&'a dyn Reflect>),
    Bool(bool),
    Number(Number),
    Char(char),
    Text(&'a str),
    /// An enumeration constant, by name.
    Variant(&'a str),
    #[cfg(feature = "chrono")]
    Date(::chrono::NaiveDateTime),
    /// Pre-rendered JSON, emitted verbatim.
    Raw(&'a str),
    Sequence(&'a dyn Sequence),
    Map(&'a dyn Mapping),
    Emit(&'a dyn Emit),
    /// Anything else; serialized through its accessor table.
    Object,
}

/// Ordered elements, visited once per call.
pub trait Sequence {
    fn for_each(&self, f: &mut dyn FnMut(&dyn Reflect) -> Result<()>) -> Result<()>;
}

/// Key/value entries in iteration order; keys are rendered to text.
pub trait Mapping {
    fn for_each_entry(&self, f: &mut dyn FnMut(&str, &dyn Reflect) -> Result<()>) -> Result<()>;
}

/// A value that writes itself.
pub trait Emit {
    fn emit(&self, w: &mut dyn JsonWriter) -> Result<()>;
}

/// Strips `Option` layers; `None` for null.
pub fn present(mut value: &dyn Reflect) -> Option<&dyn Reflect> {
    loop {
        match value.reflect_ref() {
            ReflectRef::Null | ReflectRef::Option(None) => return None,
            ReflectRef::Option(Some(inner)) => value = inner,
            _ => return Some(value),
        }
    }
}
