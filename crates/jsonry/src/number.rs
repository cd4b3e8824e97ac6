use core::fmt;

/// A numeric value as seen by the catalog number encoder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    I64(i64),
    U64(u64),
    I128(i128),
    U128(u128),
    F32(f32),
    F64(f64),
}

impl Number {
    /// Name used for non-finite floats, written as a quoted string.
    pub(crate) fn non_finite_name(&self) -> Option<&'static str> {
        let f = match *self {
            Number::F32(f) => f64::from(f),
            Number::F64(f) => f,
            _ => return None,
        };
        if f.is_nan() {
            Some("NaN")
        } else if f.is_infinite() && f.is_sign_positive() {
            Some("Infinity")
        } else if f.is_infinite() {
            Some("-Infinity")
        } else {
            None
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Number::I64(i) => write!(f, "{}", i),
            Number::U64(u) => write!(f, "{}", u),
            Number::I128(i) => write!(f, "{}", i),
            Number::U128(u) => write!(f, "{}", u),
            Number::F32(v) => match self.non_finite_name() {
                Some(name) => f.write_str(name),
                None => f.write_str(ryu::Buffer::new().format_finite(v)),
            },
            Number::F64(v) => match self.non_finite_name() {
                Some(name) => f.write_str(name),
                None => f.write_str(ryu::Buffer::new().format_finite(v)),
            },
        }
    }
}

macro_rules! number_from {
    ($($t:ty => $variant:ident as $as:ty),* $(,)?) => {
        $(
            impl From<$t> for Number {
                fn from(v: $t) -> Self {
                    Number::$variant(v as $as)
                }
            }
        )*
    };
}

number_from! {
    i8 => I64 as i64,
    i16 => I64 as i64,
    i32 => I64 as i64,
    i64 => I64 as i64,
    isize => I64 as i64,
    u8 => U64 as u64,
    u16 => U64 as u64,
    u32 => U64 as u64,
    u64 => U64 as u64,
    usize => U64 as u64,
    i128 => I128 as i128,
    u128 => U128 as u128,
    f32 => F32 as f32,
    f64 => F64 as f64,
}
