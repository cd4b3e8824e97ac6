//! Built-in interfaces the default catalog registers rules for.

use crate::reflect::{TypeInfo, Typed};

macro_rules! capability {
    ($($(#[$meta:meta])* $name:ident),* $(,)?) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Copy)]
            pub struct $name;

            impl Typed for $name {
                fn type_info() -> TypeInfo {
                    TypeInfo::interface::<$name>()
                }
            }
        )*
    };
}

capability! {
    /// Text-like values (`String`, `&'static str`, `Cow<'static, str>`, ...).
    CharSequence,
    /// Integers and floats.
    Numeric,
    /// Unit-variant enumerations, written by variant name.
    Enumeration,
    /// Calendar dates and instants.
    Temporal,
    /// Maps with text-renderable keys.
    Keyed,
    /// Collections and once-consumable iterators.
    Iterable,
    /// Values that write themselves through [`Emit`](crate::reflect::Emit).
    SelfEncoding,
}
