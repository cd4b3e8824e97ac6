//! Encoders and the built-in catalog.
//!
//! An encoder turns one value into writer calls. The registry picks the
//! encoder for a runtime type once and caches it; encoders hold no per-call
//! state and are shared across threads.

mod bean;
mod collection;
#[cfg(feature = "chrono")]
mod date;
pub(crate) mod escape;
mod scalar;

use core::any::type_name;

use std::sync::Arc;

pub use bean::BeanSerializer;
pub use collection::{ArrayEncoder, IterableEncoder, MapEncoder};
#[cfg(feature = "chrono")]
pub use date::DateEncoder;
pub use scalar::{BoolEncoder, EnumEncoder, NumberEncoder, RawEncoder, SelfEncoder, ShapeEncoder, StringEncoder};

use crate::error::{Error, Result};
use crate::reflect::{
    CharSequence, Enumeration, Iterable, Keyed, Numeric, Reflect, SelfEncoding,
};
use crate::registry::Registry;
use crate::value::Raw;
use crate::writer::JsonWriter;

pub trait Encoder: Send + Sync + 'static {
    fn encode(&self, value: &dyn Reflect, w: &mut dyn JsonWriter) -> Result<()>;

    /// Name used in error messages and logs.
    fn name(&self) -> &'static str {
        type_name::<Self>()
    }
}

impl<F> Encoder for F
where
    F: Fn(&dyn Reflect, &mut dyn JsonWriter) -> Result<()> + Send + Sync + 'static,
{
    fn encode(&self, value: &dyn Reflect, w: &mut dyn JsonWriter) -> Result<()> {
        self(value, w)
    }
}

/// Wraps a closure as a shareable encoder.
///
/// ```
/// use jsonry::encode::from_fn;
/// use jsonry::writer::JsonWriter;
///
/// let redacted = from_fn(|_, w| w.write_string("***"));
/// # let _ = redacted;
/// ```
pub fn from_fn<F>(f: F) -> Arc<dyn Encoder>
where
    F: Fn(&dyn Reflect, &mut dyn JsonWriter) -> Result<()> + Send + Sync + 'static,
{
    Arc::new(f)
}

pub(crate) fn unsupported(encoder: &dyn Encoder, value: &dyn Reflect) -> Error {
    Error::Unsupported {
        encoder: encoder.name(),
        type_name: value.reflect_type().name(),
    }
}

macro_rules! exact {
    ($registry:ident, $encoder:ident: $($ty:ty),+ $(,)?) => {
        $( $registry.register::<$ty>($encoder.clone(), false); )+
    };
}

/// Installs the default rules.
///
/// Interface rules are registered in tie-break order: a type satisfying
/// several capabilities gets the first one listed here.
pub(crate) fn install_catalog(registry: &mut Registry) {
    let boolean: Arc<dyn Encoder> = Arc::new(BoolEncoder);
    let number: Arc<dyn Encoder> = Arc::new(NumberEncoder);
    let string: Arc<dyn Encoder> = Arc::new(StringEncoder);

    exact!(registry, boolean: bool);
    exact!(registry, string: char, String);
    exact!(
        registry,
        number: i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64
    );
    registry.register::<Raw>(Arc::new(RawEncoder), false);
    #[cfg(feature = "json")]
    registry.register::<serde_json::Value>(Arc::new(ShapeEncoder), false);

    registry.register::<CharSequence>(string, false);
    registry.register::<Numeric>(number, false);
    registry.register::<Enumeration>(Arc::new(EnumEncoder), false);
    #[cfg(feature = "chrono")]
    registry.register::<crate::reflect::Temporal>(Arc::new(DateEncoder::default()), false);
    registry.register::<SelfEncoding>(Arc::new(SelfEncoder), false);
    registry.register::<Keyed>(Arc::new(MapEncoder), false);
    registry.register::<Iterable>(Arc::new(IterableEncoder), false);
}

