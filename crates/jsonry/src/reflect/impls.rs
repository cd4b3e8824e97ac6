use core::any::Any;
use core::fmt::Display;
use core::hash::BuildHasher;

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::rc::Rc;
use std::sync::Arc;

use crate::error::Result;
use crate::number::Number;
use crate::reflect::{
    CharSequence, Iterable, Keyed, Mapping, Numeric, Reflect, ReflectRef, Sequence, TypeInfo,
    Typed,
};

macro_rules! reflect_scalar {
    ($($ty:ty => |$v:ident| $shape:expr, [$($iface:ty),*]);* $(;)?) => {
        $(
            impl Typed for $ty {
                fn type_info() -> TypeInfo {
                    TypeInfo::class::<$ty>().implements(&[$(<$iface as Typed>::type_info),*])
                }
            }

            impl Reflect for $ty {
                fn reflect_type(&self) -> TypeInfo {
                    <$ty as Typed>::type_info()
                }

                fn as_any(&self) -> &dyn Any {
                    self
                }

                fn reflect_ref(&self) -> ReflectRef<'_> {
                    let $v = self;
                    $shape
                }
            }
        )*
    };
}

reflect_scalar! {
    () => |_v| ReflectRef::Null, [];
    bool => |v| ReflectRef::Bool(*v), [];
    char => |v| ReflectRef::Char(*v), [];
    i8 => |v| ReflectRef::Number(Number::from(*v)), [Numeric];
    i16 => |v| ReflectRef::Number(Number::from(*v)), [Numeric];
    i32 => |v| ReflectRef::Number(Number::from(*v)), [Numeric];
    i64 => |v| ReflectRef::Number(Number::from(*v)), [Numeric];
    i128 => |v| ReflectRef::Number(Number::from(*v)), [Numeric];
    isize => |v| ReflectRef::Number(Number::from(*v)), [Numeric];
    u8 => |v| ReflectRef::Number(Number::from(*v)), [Numeric];
    u16 => |v| ReflectRef::Number(Number::from(*v)), [Numeric];
    u32 => |v| ReflectRef::Number(Number::from(*v)), [Numeric];
    u64 => |v| ReflectRef::Number(Number::from(*v)), [Numeric];
    u128 => |v| ReflectRef::Number(Number::from(*v)), [Numeric];
    usize => |v| ReflectRef::Number(Number::from(*v)), [Numeric];
    f32 => |v| ReflectRef::Number(Number::from(*v)), [Numeric];
    f64 => |v| ReflectRef::Number(Number::from(*v)), [Numeric];
    String => |v| ReflectRef::Text(v.as_str()), [CharSequence];
    &'static str => |v| ReflectRef::Text(v), [CharSequence];
    Cow<'static, str> => |v| ReflectRef::Text(v.as_ref()), [CharSequence];
    Box<str> => |v| ReflectRef::Text(v), [CharSequence];
    Rc<str> => |v| ReflectRef::Text(v), [CharSequence];
    Arc<str> => |v| ReflectRef::Text(v), [CharSequence];
}

// Pointers are transparent: they report the pointee's type and shape.
macro_rules! reflect_pointer {
    ($($ptr:ident),*) => {
        $(
            impl<T: Reflect + ?Sized> Reflect for $ptr<T> {
                fn reflect_type(&self) -> TypeInfo {
                    (**self).reflect_type()
                }

                fn as_any(&self) -> &dyn Any {
                    (**self).as_any()
                }

                fn reflect_ref(&self) -> ReflectRef<'_> {
                    (**self).reflect_ref()
                }
            }
        )*
    };
}

reflect_pointer!(Box, Rc, Arc);

impl<T: Reflect + ?Sized> Reflect for &'static T {
    fn reflect_type(&self) -> TypeInfo {
        (**self).reflect_type()
    }

    fn as_any(&self) -> &dyn Any {
        (**self).as_any()
    }

    fn reflect_ref(&self) -> ReflectRef<'_> {
        (**self).reflect_ref()
    }
}

impl<T: Reflect> Typed for Option<T> {
    fn type_info() -> TypeInfo {
        TypeInfo::class::<Option<T>>()
    }
}

impl<T: Reflect> Reflect for Option<T> {
    fn reflect_type(&self) -> TypeInfo {
        <Self as Typed>::type_info()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Option(self.as_ref().map(|v| v as &dyn Reflect))
    }
}

macro_rules! reflect_iterable {
    ($($ty:ident<T $(, $s:ident)?>),* $(,)?) => {
        $(
            impl<T: Reflect $(, $s: BuildHasher + 'static)?> Sequence for $ty<T $(, $s)?> {
                fn for_each(&self, f: &mut dyn FnMut(&dyn Reflect) -> Result<()>) -> Result<()> {
                    for item in self.iter() {
                        f(item)?;
                    }
                    Ok(())
                }
            }

            impl<T: Reflect $(, $s: BuildHasher + 'static)?> Typed for $ty<T $(, $s)?> {
                fn type_info() -> TypeInfo {
                    TypeInfo::class::<Self>().implements(&[Iterable::type_info])
                }
            }

            impl<T: Reflect $(, $s: BuildHasher + 'static)?> Reflect for $ty<T $(, $s)?> {
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
        )*
    };
}

reflect_iterable! {
    Vec<T>,
    VecDeque<T>,
    BTreeSet<T>,
    HashSet<T, S>,
}

impl<T: Reflect, const N: usize> Sequence for [T; N] {
    fn for_each(&self, f: &mut dyn FnMut(&dyn Reflect) -> Result<()>) -> Result<()> {
        for item in self {
            f(item)?;
        }
        Ok(())
    }
}

impl<T: Reflect, const N: usize> Typed for [T; N] {
    fn type_info() -> TypeInfo {
        TypeInfo::array::<Self>()
    }
}

impl<T: Reflect, const N: usize> Reflect for [T; N] {
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

macro_rules! reflect_map {
    ($($ty:ident<K, V $(, $s:ident)?>),* $(,)?) => {
        $(
            impl<K: Display + 'static, V: Reflect $(, $s: BuildHasher + 'static)?> Mapping for $ty<K, V $(, $s)?> {
                fn for_each_entry(&self, f: &mut dyn FnMut(&str, &dyn Reflect) -> Result<()>) -> Result<()> {
                    for (k, v) in self.iter() {
                        f(&k.to_string(), v)?;
                    }
                    Ok(())
                }
            }

            impl<K: Display + 'static, V: Reflect $(, $s: BuildHasher + 'static)?> Typed for $ty<K, V $(, $s)?> {
                fn type_info() -> TypeInfo {
                    TypeInfo::class::<Self>().implements(&[Keyed::type_info])
                }
            }

            impl<K: Display + 'static, V: Reflect $(, $s: BuildHasher + 'static)?> Reflect for $ty<K, V $(, $s)?> {
                fn reflect_type(&self) -> TypeInfo {
                    <Self as Typed>::type_info()
                }

                fn as_any(&self) -> &dyn Any {
                    self
                }

                fn reflect_ref(&self) -> ReflectRef<'_> {
                    ReflectRef::Map(self)
                }
            }
        )*
    };
}

reflect_map! {
    BTreeMap<K, V>,
    HashMap<K, V, S>,
}
