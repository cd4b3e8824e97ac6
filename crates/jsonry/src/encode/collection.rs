use crate::encode::{Encoder, unsupported};
use crate::error::Result;
use crate::reflect::{Mapping, Reflect, ReflectRef, Sequence};
use crate::writer::JsonWriter;

/// Fixed-size arrays. Chosen by kind before any other rule is consulted.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArrayEncoder;

impl Encoder for ArrayEncoder {
    fn encode(&self, value: &dyn Reflect, w: &mut dyn JsonWriter) -> Result<()> {
        match value.reflect_ref() {
            ReflectRef::Sequence(items) => write_sequence(items, w),
            _ => Err(unsupported(self, value)),
        }
    }
}

/// Collections and once-consumable iterators.
#[derive(Debug, Clone, Copy, Default)]
pub struct IterableEncoder;

impl Encoder for IterableEncoder {
    fn encode(&self, value: &dyn Reflect, w: &mut dyn JsonWriter) -> Result<()> {
        match value.reflect_ref() {
            ReflectRef::Sequence(items) => write_sequence(items, w),
            _ => Err(unsupported(self, value)),
        }
    }
}

/// Maps, in iteration order. Keys go through the field-name policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct MapEncoder;

impl Encoder for MapEncoder {
    fn encode(&self, value: &dyn Reflect, w: &mut dyn JsonWriter) -> Result<()> {
        match value.reflect_ref() {
            ReflectRef::Map(entries) => write_map(entries, w),
            _ => Err(unsupported(self, value)),
        }
    }
}

pub(crate) fn write_sequence(items: &dyn Sequence, w: &mut dyn JsonWriter) -> Result<()> {
    w.begin_array()?;
    items.for_each(&mut |item: &dyn Reflect| w.write_value(item))?;
    w.end_array()
}

pub(crate) fn write_map(entries: &dyn Mapping, w: &mut dyn JsonWriter) -> Result<()> {
    w.begin_object()?;
    entries.for_each_entry(&mut |key: &str, value: &dyn Reflect| w.write_property(key, value))?;
    w.end_object()
}
