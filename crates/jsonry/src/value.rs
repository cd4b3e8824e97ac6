use core::any::Any;
use core::cell::RefCell;
use core::fmt;

use std::borrow::Cow;

use crate::error::Result;
use crate::reflect::{Iterable, Reflect, ReflectRef, Sequence, TypeInfo, Typed};

/// A pre-rendered JSON expression, written verbatim and unquoted.
///
/// Nothing checks that the text is valid JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raw(Cow<'static, str>);

impl Raw {
    pub fn new(text: impl Into<Cow<'static, str>>) -> Self {
        Raw(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Raw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Typed for Raw {
    fn type_info() -> TypeInfo {
        TypeInfo::class::<Raw>()
    }
}

impl Reflect for Raw {
    fn reflect_type(&self) -> TypeInfo {
        <Self as Typed>::type_info()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Raw(&self.0)
    }
}

/// An iterator serialized as an array.
///
/// The iterator is consumed by the first serialization; later ones see an
/// exhausted iterator and write `[]`.
pub struct Lazy<I>(RefCell<Option<I>>);

impl<I: Iterator> Lazy<I> {
    pub fn new(iter: impl IntoIterator<IntoIter = I>) -> Self {
        Lazy(RefCell::new(Some(iter.into_iter())))
    }

    pub fn is_consumed(&self) -> bool {
        self.0.borrow().is_none()
    }
}

impl<I> Sequence for Lazy<I>
where
    I: Iterator,
    I::Item: Reflect,
{
    fn for_each(&self, f: &mut dyn FnMut(&dyn Reflect) -> Result<()>) -> Result<()> {
        let taken = self.0.borrow_mut().take();
        if let Some(iter) = taken {
            for item in iter {
                f(&item)?;
            }
        }
        Ok(())
    }
}

impl<I> Typed for Lazy<I>
where
    I: Iterator + 'static,
    I::Item: Reflect,
{
    fn type_info() -> TypeInfo {
        TypeInfo::class::<Lazy<I>>().implements(&[Iterable::type_info])
    }
}

impl<I> Reflect for Lazy<I>
where
    I: Iterator + 'static,
    I::Item: Reflect,
{
    fn reflect_type(&self) -> TypeInfo {
        <Self as Typed>::type_info()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Sequence(self)
    }
}
