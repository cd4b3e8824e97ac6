//! Streaming writers.
//!
//! A writer enforces the begin/end nesting protocol and hands every non-null
//! value to the encoder its registry resolves for the value's runtime type.
//! Encoders call back into the same writer, so nested structures recurse
//! through one frame stack.

mod checked;
mod fast;
mod format;

pub use checked::{CheckedWriter, CompactWriter, PrettyWriter};
pub use fast::FastWriter;
pub use format::{CompactFormatter, Formatter, PrettyFormatter};

use std::io;

use crate::error::Result;
use crate::reflect::Reflect;
use crate::registry::Registry;

/// The writer protocol shared by all variants.
///
/// The structural calls (`begin_*`, `end_*`, `write_value`, `write_property`,
/// `write_complex_property_start`, `write_null`, `write_literal`,
/// `write_string`) place a complete value or compound at the current
/// position. `write_raw` and `write_quoted` emit text at a position already
/// opened by `write_value`; they are what scalar encoders use.
pub trait JsonWriter {
    fn begin_array(&mut self) -> Result<()>;

    fn end_array(&mut self) -> Result<()>;

    fn begin_object(&mut self) -> Result<()>;

    fn end_object(&mut self) -> Result<()>;

    /// Writes `null`, or delegates to the encoder resolved for the value.
    fn write_value(&mut self, value: &dyn Reflect) -> Result<()>;

    fn write_property(&mut self, name: &str, value: &dyn Reflect) -> Result<()>;

    /// Writes `name` and leaves the property waiting for its value, which
    /// the caller supplies next with any value-producing call.
    fn write_complex_property_start(&mut self, name: &str) -> Result<()>;

    fn write_null(&mut self) -> Result<()>;

    /// A complete value given as JSON text (a number or a literal).
    fn write_literal(&mut self, text: &str) -> Result<()>;

    /// A complete string value.
    fn write_string(&mut self, text: &str) -> Result<()>;

    fn write_raw(&mut self, text: &str) -> Result<()>;

    fn write_quoted(&mut self, text: &str) -> Result<()>;

    fn registry(&self) -> &Registry;

    /// Number of open arrays and objects.
    fn depth(&self) -> usize;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FrameKind {
    Array,
    Object,
    /// An object whose last property name has been written but not its value.
    ObjectAwaitingValue,
}

/// The position handed to an encoder by `write_value`, which takes exactly
/// one value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum Slot {
    /// No delegated write at this level.
    #[default]
    Idle,
    Open,
    Filled,
}

/// One open array or object.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Frame {
    pub(crate) kind: FrameKind,
    pub(crate) items: usize,
    pub(crate) slot: Slot,
}

impl Frame {
    fn new(kind: FrameKind) -> Self {
        Self {
            kind,
            items: 0,
            slot: Slot::Idle,
        }
    }
}

/// A writer created by [`Registry::create_writer`], in the registry's
/// configured variant.
pub enum Writer<'r, W: io::Write> {
    Compact(CompactWriter<'r, W>),
    Pretty(PrettyWriter<'r, W>),
    Fast(FastWriter<'r, W>),
}

macro_rules! dispatch {
    ($self:ident, $w:ident => $body:expr) => {
        match $self {
            Writer::Compact($w) => $body,
            Writer::Pretty($w) => $body,
            Writer::Fast($w) => $body,
        }
    };
}

impl<'r, W: io::Write> Writer<'r, W> {
    /// Checks that every frame was closed and returns the sink.
    pub fn finish(self) -> Result<W> {
        dispatch!(self, w => w.finish())
    }
}

impl<W: io::Write> JsonWriter for Writer<'_, W> {
    fn begin_array(&mut self) -> Result<()> {
        dispatch!(self, w => w.begin_array())
    }

    fn end_array(&mut self) -> Result<()> {
        dispatch!(self, w => w.end_array())
    }

    fn begin_object(&mut self) -> Result<()> {
        dispatch!(self, w => w.begin_object())
    }

    fn end_object(&mut self) -> Result<()> {
        dispatch!(self, w => w.end_object())
    }

    fn write_value(&mut self, value: &dyn Reflect) -> Result<()> {
        dispatch!(self, w => w.write_value(value))
    }

    fn write_property(&mut self, name: &str, value: &dyn Reflect) -> Result<()> {
        dispatch!(self, w => w.write_property(name, value))
    }

    fn write_complex_property_start(&mut self, name: &str) -> Result<()> {
        dispatch!(self, w => w.write_complex_property_start(name))
    }

    fn write_null(&mut self) -> Result<()> {
        dispatch!(self, w => w.write_null())
    }

    fn write_literal(&mut self, text: &str) -> Result<()> {
        dispatch!(self, w => w.write_literal(text))
    }

    fn write_string(&mut self, text: &str) -> Result<()> {
        dispatch!(self, w => w.write_string(text))
    }

    fn write_raw(&mut self, text: &str) -> Result<()> {
        dispatch!(self, w => w.write_raw(text))
    }

    fn write_quoted(&mut self, text: &str) -> Result<()> {
        dispatch!(self, w => w.write_quoted(text))
    }

    fn registry(&self) -> &Registry {
        dispatch!(self, w => w.registry())
    }

    fn depth(&self) -> usize {
        dispatch!(self, w => w.depth())
    }
}
