use core::any::{TypeId, type_name};
use core::fmt;
use core::ops::Deref;

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::reflect::Reflect;

/// A property value produced by an accessor.
pub enum Field<'a> {
    Borrowed(&'a dyn Reflect),
    Owned(Box<dyn Reflect>),
}

impl Deref for Field<'_> {
    type Target = dyn Reflect;

    fn deref(&self) -> &Self::Target {
        match self {
            Field::Borrowed(v) => *v,
            Field::Owned(v) => v.as_ref(),
        }
    }
}

/// What an accessor hands back, as far as property naming cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Returns {
    Unit,
    Bool,
    Value,
}

impl Returns {
    fn of<R: 'static>() -> Self {
        let id = TypeId::of::<R>();
        if id == TypeId::of::<()>() {
            Returns::Unit
        } else if id == TypeId::of::<bool>() {
            Returns::Bool
        } else {
            Returns::Value
        }
    }
}

type Getter = dyn for<'a> Fn(&'a dyn Reflect) -> Result<Field<'a>> + Send + Sync;

/// A zero-argument accessor declared on a type.
///
/// `method` is the accessor's name as written in the type (`get_name`,
/// `is_active`, `total`). The declared table is the property list: every
/// accessor becomes a property except those returning `()`. Only the name
/// is derived from `method`:
///
/// - `get_x` / `getX` becomes `x`;
/// - `is_x` / `isX` becomes `x` when the accessor returns `bool`, and keeps
///   its name otherwise;
/// - anything else keeps its name;
///
/// and the first letter is lowercased unless the first two are uppercase.
/// Leave an accessor out of the table to keep it out of the output.
#[derive(Clone)]
pub struct Accessor {
    method: &'static str,
    returns: Returns,
    get: Arc<Getter>,
}

fn getter<F>(f: F) -> Arc<Getter>
where
    F: for<'a> Fn(&'a dyn Reflect) -> Result<Field<'a>> + Send + Sync + 'static,
{
    Arc::new(f)
}

fn receiver<'a, T: Reflect>(value: &'a dyn Reflect, method: &'static str) -> Result<&'a T> {
    value
        .as_any()
        .downcast_ref::<T>()
        .ok_or_else(|| Error::Access {
            type_name: type_name::<T>(),
            property: method,
            message: format!("receiver is a `{}`", value.reflect_type().name()),
        })
}

impl Accessor {
    /// An accessor returning a reference into the value.
    pub fn borrowed<T, R, F>(method: &'static str, f: F) -> Self
    where
        T: Reflect,
        R: Reflect,
        F: for<'a> Fn(&'a T) -> &'a R + Send + Sync + 'static,
    {
        Self {
            method,
            returns: Returns::of::<R>(),
            get: getter(move |value| {
                let this = receiver::<T>(value, method)?;
                Ok(Field::Borrowed(f(this)))
            }),
        }
    }

    /// An accessor computing an owned value.
    pub fn owned<T, R, F>(method: &'static str, f: F) -> Self
    where
        T: Reflect,
        R: Reflect,
        F: Fn(&T) -> R + Send + Sync + 'static,
    {
        Self {
            method,
            returns: Returns::of::<R>(),
            get: getter(move |value| {
                let this = receiver::<T>(value, method)?;
                Ok(Field::Owned(Box::new(f(this))))
            }),
        }
    }

    /// An accessor that may fail; a failure aborts the whole serialization.
    pub fn fallible<T, R, E, F>(method: &'static str, f: F) -> Self
    where
        T: Reflect,
        R: Reflect,
        E: fmt::Display,
        F: Fn(&T) -> core::result::Result<R, E> + Send + Sync + 'static,
    {
        Self {
            method,
            returns: Returns::of::<R>(),
            get: getter(move |value| {
                let this = receiver::<T>(value, method)?;
                match f(this) {
                    Ok(v) => Ok(Field::Owned(Box::new(v))),
                    Err(e) => Err(Error::Access {
                        type_name: type_name::<T>(),
                        property: method,
                        message: e.to_string(),
                    }),
                }
            }),
        }
    }

    pub fn method(&self) -> &'static str {
        self.method
    }

    pub fn returns(&self) -> Returns {
        self.returns
    }

    pub fn get<'a>(&self, value: &'a dyn Reflect) -> Result<Field<'a>> {
        (self.get)(value)
    }
}

impl fmt::Debug for Accessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Accessor")
            .field("method", &self.method)
            .field("returns", &self.returns)
            .finish()
    }
}
