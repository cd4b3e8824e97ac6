/// Implements [`Reflect`](crate::reflect::Reflect) for types serialized
/// through their accessor table.
///
/// The type must also implement [`Typed`](crate::reflect::Typed), which is
/// where its parent, interfaces, override marker and accessors are declared.
///
/// ```
/// use jsonry::reflect::{Accessor, TypeInfo, Typed};
///
/// struct Point { x: i32, y: i32 }
///
/// impl Typed for Point {
///     fn type_info() -> TypeInfo {
///         TypeInfo::class::<Point>().with_accessors(|| vec![
///             Accessor::borrowed("get_x", |p: &Point| &p.x),
///             Accessor::borrowed("get_y", |p: &Point| &p.y),
///         ])
///     }
/// }
/// jsonry::impl_reflect!(Point);
///
/// assert_eq!(jsonry::to_string(&Point { x: 1, y: 2 }).unwrap(), r#"{"x":1,"y":2}"#);
/// ```
#[macro_export]
macro_rules! impl_reflect {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::reflect::Reflect for $ty {
                fn reflect_type(&self) -> $crate::reflect::TypeInfo {
                    <$ty as $crate::reflect::Typed>::type_info()
                }

                fn as_any(&self) -> &dyn ::core::any::Any {
                    self
                }

                fn reflect_ref(&self) -> $crate::reflect::ReflectRef<'_> {
                    $crate::reflect::ReflectRef::Object
                }
            }
        )+
    };
}

/// Implements [`Typed`](crate::reflect::Typed) and
/// [`Reflect`](crate::reflect::Reflect) for a unit-variant enum, written as
/// its quoted variant name.
///
/// ```
/// #[derive(Clone, Copy)]
/// enum Suit { Hearts, Spades }
/// jsonry::impl_reflect_enum!(Suit { Hearts, Spades });
///
/// assert_eq!(jsonry::to_string(&Suit::Spades).unwrap(), r#""Spades""#);
/// ```
#[macro_export]
macro_rules! impl_reflect_enum {
    ($ty:ident { $($variant:ident),+ $(,)? }) => {
        impl $crate::reflect::Typed for $ty {
            fn type_info() -> $crate::reflect::TypeInfo {
                $crate::reflect::TypeInfo::class::<$ty>()
                    .implements(&[<$crate::reflect::Enumeration as $crate::reflect::Typed>::type_info])
            }
        }

        impl $crate::reflect::Reflect for $ty {
            fn reflect_type(&self) -> $crate::reflect::TypeInfo {
                <$ty as $crate::reflect::Typed>::type_info()
            }

            fn as_any(&self) -> &dyn ::core::any::Any {
                self
            }

            fn reflect_ref(&self) -> $crate::reflect::ReflectRef<'_> {
                $crate::reflect::ReflectRef::Variant(match self {
                    $($ty::$variant => stringify!($variant),)+
                })
            }
        }
    };
}
