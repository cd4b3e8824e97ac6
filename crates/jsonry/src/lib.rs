#![doc = include_str!("../README.md")]

pub mod encode;
pub mod error;
pub mod field_name;
pub mod number;
pub mod options;
pub mod reflect;
pub mod registry;
pub mod value;
pub mod writer;

#[cfg(feature = "serde")]
pub mod ser;

pub use crate::encode::Encoder;
pub use crate::error::{Error, Result};
pub use crate::field_name::{BareNames, FieldNamePolicy, QuotedNames};
pub use crate::number::Number;
pub use crate::options::{DateFormat, FieldNames, Options, WriterVariant};
pub use crate::reflect::{Reflect, Typed};
pub use crate::registry::Registry;
pub use crate::value::{Lazy, Raw};
pub use crate::writer::{JsonWriter, Writer};

#[cfg(feature = "serde")]
pub use crate::ser::Serde;

use std::io::Write;

/// Serializes `value` with the default registry.
pub fn to_string(value: &dyn Reflect) -> Result<String> {
    Registry::global().to_string(value)
}

pub fn to_vec(value: &dyn Reflect) -> Result<Vec<u8>> {
    Registry::global().to_vec(value)
}

pub fn to_writer<W: Write>(writer: W, value: &dyn Reflect) -> Result<()> {
    Registry::global().to_writer(writer, value)
}
