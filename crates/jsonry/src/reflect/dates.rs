use core::any::Any;

use std::time::SystemTime;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

use crate::reflect::{Reflect, ReflectRef, Temporal, TypeInfo, Typed};

macro_rules! reflect_date {
    ($([$($generics:tt)*] $ty:ty => |$v:ident| $naive:expr);* $(;)?) => {
        $(
            impl<$($generics)*> Typed for $ty {
                fn type_info() -> TypeInfo {
                    TypeInfo::class::<$ty>().implements(&[Temporal::type_info])
                }
            }

            impl<$($generics)*> Reflect for $ty {
                fn reflect_type(&self) -> TypeInfo {
                    <Self as Typed>::type_info()
                }

                fn as_any(&self) -> &dyn Any {
                    self
                }

                fn reflect_ref(&self) -> ReflectRef<'_> {
                    let $v = self;
                    ReflectRef::Date($naive)
                }
            }
        )*
    };
}

reflect_date! {
    [] NaiveDate => |d| d.and_time(NaiveTime::MIN);
    [] NaiveDateTime => |dt| *dt;
    [Tz: TimeZone + 'static] DateTime<Tz> => |dt| dt.naive_utc();
    [] SystemTime => |t| DateTime::<Utc>::from(*t).naive_utc();
}
