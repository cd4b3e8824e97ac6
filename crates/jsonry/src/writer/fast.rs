use std::io;

use crate::encode::escape;
use crate::error::{Error, Result};
use crate::reflect::{Reflect, present};
use crate::registry::Registry;
use crate::writer::JsonWriter;

/// Unchecked compact writer.
///
/// Tracks only the depth and whether the current level already has a
/// sibling. Output matches [`CompactWriter`](crate::writer::CompactWriter)
/// for every well-formed call sequence; misuse produces malformed JSON
/// instead of an error.
pub struct FastWriter<'r, W> {
    out: W,
    registry: &'r Registry,
    depth: usize,
    has_sibling: bool,
    /// A property name or a delegated `write_value` already positioned the
    /// next value.
    pending: bool,
}

impl<'r, W: io::Write> FastWriter<'r, W> {
    pub fn new(out: W, registry: &'r Registry) -> Self {
        Self {
            out,
            registry,
            depth: 0,
            has_sibling: false,
            pending: false,
        }
    }

    pub fn finish(self) -> Result<W> {
        if self.depth != 0 {
            return Err(Error::structural(format!(
                "{} unclosed array/object frame(s) at finish",
                self.depth
            )));
        }
        Ok(self.out)
    }

    fn position(&mut self) -> io::Result<()> {
        if self.pending {
            self.pending = false;
            Ok(())
        } else if self.has_sibling {
            self.out.write_all(b",")
        } else {
            Ok(())
        }
    }

    fn literal(&mut self, text: &[u8]) -> Result<()> {
        self.position()?;
        self.out.write_all(text)?;
        self.has_sibling = true;
        Ok(())
    }

    fn open(&mut self, bracket: &[u8]) -> Result<()> {
        self.position()?;
        self.out.write_all(bracket)?;
        self.depth += 1;
        self.has_sibling = false;
        Ok(())
    }

    fn close(&mut self, bracket: &[u8]) -> Result<()> {
        if self.depth == 0 {
            return Err(Error::structural("close with no open array or object"));
        }
        self.out.write_all(bracket)?;
        self.depth -= 1;
        self.has_sibling = true;
        self.pending = false;
        Ok(())
    }

    fn property_start(&mut self, name: &str) -> Result<()> {
        if self.has_sibling {
            self.out.write_all(b",")?;
        }
        self.registry.field_names().write_name(&mut self.out, name)?;
        self.out.write_all(b":")?;
        self.pending = true;
        Ok(())
    }
}

impl<W: io::Write> JsonWriter for FastWriter<'_, W> {
    fn begin_array(&mut self) -> Result<()> {
        self.open(b"[")
    }

    fn end_array(&mut self) -> Result<()> {
        self.close(b"]")
    }

    fn begin_object(&mut self) -> Result<()> {
        self.open(b"{")
    }

    fn end_object(&mut self) -> Result<()> {
        self.close(b"}")
    }

    fn write_value(&mut self, value: &dyn Reflect) -> Result<()> {
        let Some(value) = present(value) else {
            return self.literal(b"null");
        };
        let encoder = self.registry.resolve(&value.reflect_type())?;
        self.position()?;
        self.pending = true;
        encoder.encode(value, self)?;
        self.pending = false;
        self.has_sibling = true;
        Ok(())
    }

    fn write_property(&mut self, name: &str, value: &dyn Reflect) -> Result<()> {
        self.property_start(name)?;
        self.write_value(value)
    }

    fn write_complex_property_start(&mut self, name: &str) -> Result<()> {
        self.property_start(name)
    }

    fn write_null(&mut self) -> Result<()> {
        self.literal(b"null")
    }

    fn write_literal(&mut self, text: &str) -> Result<()> {
        self.literal(text.as_bytes())
    }

    fn write_string(&mut self, text: &str) -> Result<()> {
        self.position()?;
        escape::write_quoted(&mut self.out, text)?;
        self.has_sibling = true;
        Ok(())
    }

    fn write_raw(&mut self, text: &str) -> Result<()> {
        Ok(self.out.write_all(text.as_bytes())?)
    }

    fn write_quoted(&mut self, text: &str) -> Result<()> {
        Ok(escape::write_quoted(&mut self.out, text)?)
    }

    fn registry(&self) -> &Registry {
        self.registry
    }

    fn depth(&self) -> usize {
        self.depth
    }
}
