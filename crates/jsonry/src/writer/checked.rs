use std::io;

use crate::encode::escape;
use crate::error::{Error, Result};
use crate::reflect::{Reflect, present};
use crate::registry::Registry;
use crate::writer::{CompactFormatter, Frame, FrameKind, JsonWriter, PrettyFormatter, Slot, format::Formatter};

pub type CompactWriter<'r, W> = CheckedWriter<'r, W, CompactFormatter>;
pub type PrettyWriter<'r, W> = CheckedWriter<'r, W, PrettyFormatter>;

#[derive(Debug, Default, Clone, Copy)]
struct Root {
    written: bool,
    slot: Slot,
}

/// Writer that validates every call against the frame stack.
///
/// The first error of any kind poisons the writer; later calls fail with a
/// structural error and the sink contents are unspecified.
pub struct CheckedWriter<'r, W, F> {
    out: W,
    registry: &'r Registry,
    formatter: F,
    frames: Vec<Frame>,
    root: Root,
    failed: bool,
}

impl<'r, W: io::Write, F: Formatter> CheckedWriter<'r, W, F> {
    pub fn new(out: W, registry: &'r Registry, formatter: F) -> Self {
        Self {
            out,
            registry,
            formatter,
            frames: Vec::new(),
            root: Root::default(),
            failed: false,
        }
    }

    pub fn finish(self) -> Result<W> {
        if self.failed {
            return Err(poisoned());
        }
        if !self.frames.is_empty() {
            return Err(Error::structural(format!(
                "{} unclosed array/object frame(s) at finish",
                self.frames.len()
            )));
        }
        Ok(self.out)
    }

    fn run<T>(&mut self, op: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        if self.failed {
            return Err(poisoned());
        }
        let result = op(self);
        if result.is_err() {
            self.failed = true;
        }
        result
    }

    /// Positions the writer for a new value: separator, indentation and the
    /// frame's item count.
    fn open_value(&mut self) -> Result<()> {
        if self.fill_slot()? {
            return Ok(());
        }
        let depth = self.frames.len();
        let first = match self.frames.last_mut() {
            None => {
                if self.root.written {
                    return Err(Error::structural("document already has a root value"));
                }
                self.root.written = true;
                return Ok(());
            }
            Some(frame) => match frame.kind {
                FrameKind::Array => {
                    frame.items += 1;
                    frame.items == 1
                }
                FrameKind::ObjectAwaitingValue => return Ok(()),
                FrameKind::Object => {
                    return Err(Error::structural(
                        "value written inside an object without a property name",
                    ));
                }
            },
        };
        self.formatter.before_element(&mut self.out, depth, first)?;
        Ok(())
    }

    /// Places a value into the delegated slot at this level, if one is open.
    /// Returns false when no delegated write is in progress here.
    fn fill_slot(&mut self) -> Result<bool> {
        let slot = self.slot_mut();
        match *slot {
            Slot::Idle => Ok(false),
            Slot::Open => {
                *slot = Slot::Filled;
                Ok(true)
            }
            Slot::Filled => Err(Error::structural("encoder wrote more than one value")),
        }
    }

    fn slot_mut(&mut self) -> &mut Slot {
        match self.frames.last_mut() {
            Some(frame) => &mut frame.slot,
            None => &mut self.root.slot,
        }
    }

    fn set_slot(&mut self, slot: Slot) -> Slot {
        core::mem::replace(self.slot_mut(), slot)
    }

    /// Raw text counts as the slot's value; further raw text continues it.
    fn mark_raw(&mut self) {
        let slot = self.slot_mut();
        if *slot == Slot::Open {
            *slot = Slot::Filled;
        }
    }

    /// A property that was waiting for its value has received it.
    fn close_value(&mut self) {
        if let Some(frame) = self.frames.last_mut() {
            if frame.kind == FrameKind::ObjectAwaitingValue {
                frame.kind = FrameKind::Object;
            }
        }
    }

    fn begin(&mut self, kind: FrameKind, open: &[u8]) -> Result<()> {
        self.open_value()?;
        self.out.write_all(open)?;
        self.frames.push(Frame::new(kind));
        Ok(())
    }

    fn end(&mut self, kind: FrameKind, close: &[u8]) -> Result<()> {
        let closing = match kind {
            FrameKind::Array => "end_array",
            _ => "end_object",
        };
        let frame = match self.frames.last() {
            None => {
                return Err(Error::structural(format!("{closing} with no open array or object")));
            }
            Some(top) if top.kind == kind => *top,
            Some(top) => {
                return Err(Error::structural(match top.kind {
                    FrameKind::ObjectAwaitingValue => {
                        format!("{closing} while an object property has no value")
                    }
                    FrameKind::Array => format!("{closing} while an array is open"),
                    FrameKind::Object => format!("{closing} while an object is open"),
                }));
            }
        };
        self.frames.pop();
        self.formatter
            .before_close(&mut self.out, self.frames.len(), frame.items == 0)?;
        self.out.write_all(close)?;
        self.close_value();
        Ok(())
    }

    fn value(&mut self, value: &dyn Reflect) -> Result<()> {
        let Some(value) = present(value) else {
            return self.literal(b"null");
        };
        let ty = value.reflect_type();
        let encoder = self.registry.resolve(&ty)?;
        self.open_value()?;
        let level = self.frames.len();
        let outer = self.set_slot(Slot::Open);
        encoder.encode(value, self)?;
        if self.frames.len() != level {
            return Err(Error::structural(format!(
                "encoder `{}` left unbalanced frames while writing `{}`",
                encoder.name(),
                ty.name()
            )));
        }
        if self.set_slot(outer) == Slot::Open {
            return Err(Error::structural(format!(
                "encoder `{}` wrote no value for `{}`",
                encoder.name(),
                ty.name()
            )));
        }
        self.close_value();
        Ok(())
    }

    fn literal(&mut self, text: &[u8]) -> Result<()> {
        self.open_value()?;
        self.out.write_all(text)?;
        self.close_value();
        Ok(())
    }

    fn property_start(&mut self, name: &str) -> Result<()> {
        let depth = self.frames.len();
        let first = match self.frames.last_mut() {
            None => return Err(Error::structural("property written outside an object")),
            Some(frame) => match frame.kind {
                FrameKind::Object => {
                    frame.items += 1;
                    frame.kind = FrameKind::ObjectAwaitingValue;
                    frame.items == 1
                }
                FrameKind::Array => {
                    return Err(Error::structural("property written inside an array"));
                }
                FrameKind::ObjectAwaitingValue => {
                    return Err(Error::structural("previous property has no value"));
                }
            },
        };
        self.formatter.before_element(&mut self.out, depth, first)?;
        self.registry.field_names().write_name(&mut self.out, name)?;
        self.out.write_all(b":")?;
        Ok(())
    }
}

fn poisoned() -> Error {
    Error::structural("writer is unusable after an earlier error")
}

impl<W: io::Write, F: Formatter> JsonWriter for CheckedWriter<'_, W, F> {
    fn begin_array(&mut self) -> Result<()> {
        self.run(|w| w.begin(FrameKind::Array, b"["))
    }

    fn end_array(&mut self) -> Result<()> {
        self.run(|w| w.end(FrameKind::Array, b"]"))
    }

    fn begin_object(&mut self) -> Result<()> {
        self.run(|w| w.begin(FrameKind::Object, b"{"))
    }

    fn end_object(&mut self) -> Result<()> {
        self.run(|w| w.end(FrameKind::Object, b"}"))
    }

    fn write_value(&mut self, value: &dyn Reflect) -> Result<()> {
        self.run(|w| w.value(value))
    }

    fn write_property(&mut self, name: &str, value: &dyn Reflect) -> Result<()> {
        self.run(|w| {
            w.property_start(name)?;
            w.value(value)
        })
    }

    fn write_complex_property_start(&mut self, name: &str) -> Result<()> {
        self.run(|w| w.property_start(name))
    }

    fn write_null(&mut self) -> Result<()> {
        self.run(|w| w.literal(b"null"))
    }

    fn write_literal(&mut self, text: &str) -> Result<()> {
        self.run(|w| w.literal(text.as_bytes()))
    }

    fn write_string(&mut self, text: &str) -> Result<()> {
        self.run(|w| {
            w.open_value()?;
            escape::write_quoted(&mut w.out, text)?;
            w.close_value();
            Ok(())
        })
    }

    fn write_raw(&mut self, text: &str) -> Result<()> {
        self.run(|w| {
            w.mark_raw();
            Ok(w.out.write_all(text.as_bytes())?)
        })
    }

    fn write_quoted(&mut self, text: &str) -> Result<()> {
        self.run(|w| {
            w.mark_raw();
            Ok(escape::write_quoted(&mut w.out, text)?)
        })
    }

    fn registry(&self) -> &Registry {
        self.registry
    }

    fn depth(&self) -> usize {
        self.frames.len()
    }
}
