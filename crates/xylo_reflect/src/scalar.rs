//! The primitive scalar vocabulary.
//!
//! Scalars are the types whose values travel as plain element text:
//! `bool`, `char`, the integers and the floats. They are never identity
//! tracked and never carry reference ids in documents.

use alloc::boxed::Box;
use alloc::string::String;
use core::any::TypeId;
use core::{error, fmt};

use crate::Reflect;

// -----------------------------------------------------------------------------
// Parsing helper

trait FromScalarText: Sized {
    fn from_scalar_text(text: &str) -> Option<Self>;
}

macro_rules! impl_from_scalar_text {
    ($($ty:ty),* $(,)?) => {
        $(impl FromScalarText for $ty {
            #[inline]
            fn from_scalar_text(text: &str) -> Option<Self> {
                text.parse().ok()
            }
        })*
    };
}

impl_from_scalar_text!(
    bool, u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64
);

/// Characters keep only the first char of the text, trailing characters
/// are ignored.
impl FromScalarText for char {
    #[inline]
    fn from_scalar_text(text: &str) -> Option<Self> {
        text.chars().next()
    }
}

// -----------------------------------------------------------------------------
// ScalarKind / ScalarValue

macro_rules! scalars {
    ($(($kind:ident, $ty:ty, $path:literal)),* $(,)?) => {
        /// An enumeration of the primitive scalar types.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum ScalarKind {
            $($kind,)*
        }

        impl ScalarKind {
            /// Every scalar kind, in a fixed order.
            pub const ALL: &'static [ScalarKind] = &[$(Self::$kind,)*];

            /// Resolves a scalar kind from its type path.
            ///
            /// Scalar type paths are the bare primitive names (`"bool"`,
            /// `"i32"`, ...).
            pub fn from_path(path: &str) -> Option<Self> {
                match path {
                    $($path => Some(Self::$kind),)*
                    _ => None,
                }
            }

            /// Resolves a scalar kind from a [`TypeId`], answering whether
            /// the type is a scalar at all.
            pub fn of(id: TypeId) -> Option<Self> {
                $(
                    if id == TypeId::of::<$ty>() {
                        return Some(Self::$kind);
                    }
                )*
                None
            }

            /// Returns the type path of this scalar.
            pub const fn type_path(self) -> &'static str {
                match self {
                    $(Self::$kind => $path,)*
                }
            }

            /// Returns the [`TypeId`] of this scalar.
            pub fn type_id(self) -> TypeId {
                match self {
                    $(Self::$kind => TypeId::of::<$ty>(),)*
                }
            }

            /// Parses element text into a value of this scalar.
            ///
            /// The text is expected to be trimmed already.
            pub fn parse(self, text: &str) -> Result<ScalarValue, ScalarParseError> {
                let parsed = match self {
                    $(Self::$kind => {
                        <$ty as FromScalarText>::from_scalar_text(text).map(ScalarValue::$kind)
                    })*
                };
                parsed.ok_or_else(|| ScalarParseError {
                    kind: self,
                    text: String::from(text),
                })
            }
        }

        /// A scalar value, tagged by its [`ScalarKind`].
        ///
        /// The [`Display`](fmt::Display) implementation is the canonical
        /// text form written into documents, and [`ScalarKind::parse`]
        /// accepts what it produces.
        #[derive(Debug, Clone, Copy, PartialEq)]
        pub enum ScalarValue {
            $($kind($ty),)*
        }

        impl ScalarValue {
            /// Returns which scalar this value is.
            pub const fn kind(self) -> ScalarKind {
                match self {
                    $(Self::$kind(_) => ScalarKind::$kind,)*
                }
            }

            /// Boxes the value as a reflected primitive.
            pub fn into_reflect(self) -> Box<dyn Reflect> {
                match self {
                    $(Self::$kind(value) => Box::new(value),)*
                }
            }
        }

        impl fmt::Display for ScalarValue {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self {
                    $(Self::$kind(value) => write!(f, "{value}"),)*
                }
            }
        }
    };
}

scalars! {
    (Bool, bool, "bool"),
    (Char, char, "char"),
    (U8, u8, "u8"),
    (U16, u16, "u16"),
    (U32, u32, "u32"),
    (U64, u64, "u64"),
    (U128, u128, "u128"),
    (Usize, usize, "usize"),
    (I8, i8, "i8"),
    (I16, i16, "i16"),
    (I32, i32, "i32"),
    (I64, i64, "i64"),
    (I128, i128, "i128"),
    (Isize, isize, "isize"),
    (F32, f32, "f32"),
    (F64, f64, "f64"),
}

impl ScalarValue {
    /// Returns the type path of the underlying scalar.
    #[inline]
    pub const fn type_path(self) -> &'static str {
        self.kind().type_path()
    }

    /// Returns the [`TypeId`] of the underlying scalar, not of
    /// `ScalarValue` itself.
    #[inline]
    pub fn type_id(self) -> TypeId {
        self.kind().type_id()
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.type_path())
    }
}

// -----------------------------------------------------------------------------
// ScalarParseError

/// Error returned when element text cannot be parsed as a scalar.
#[derive(Debug)]
pub struct ScalarParseError {
    pub kind: ScalarKind,
    pub text: String,
}

impl fmt::Display for ScalarParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot parse `{}` as `{}`", self.text, self.kind)
    }
}

impl error::Error for ScalarParseError {}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_resolve_both_ways() {
        for &kind in ScalarKind::ALL {
            assert_eq!(ScalarKind::from_path(kind.type_path()), Some(kind));
            assert_eq!(ScalarKind::of(kind.type_id()), Some(kind));
        }
        assert_eq!(ScalarKind::from_path("alloc::string::String"), None);
        assert_eq!(ScalarKind::of(TypeId::of::<String>()), None);
    }

    #[test]
    fn bool_parsing_is_strict() {
        assert_eq!(
            ScalarKind::Bool.parse("true").unwrap(),
            ScalarValue::Bool(true)
        );
        assert!(ScalarKind::Bool.parse("True").is_err());
        assert!(ScalarKind::Bool.parse("1").is_err());
    }

    #[test]
    fn char_takes_the_first_character() {
        assert_eq!(
            ScalarKind::Char.parse("abc").unwrap(),
            ScalarValue::Char('a')
        );
        assert!(ScalarKind::Char.parse("").is_err());
    }

    #[test]
    fn numbers_round_trip_through_display() {
        let values = [
            ScalarValue::I32(-42),
            ScalarValue::U128(u128::MAX),
            ScalarValue::F64(2.5),
            ScalarValue::Usize(7),
        ];
        for value in values {
            let text = value.to_string();
            assert_eq!(value.kind().parse(&text).unwrap(), value);
        }
    }

    #[test]
    fn float_specials_round_trip() {
        let inf = ScalarKind::F64.parse("inf").unwrap();
        assert_eq!(inf, ScalarValue::F64(f64::INFINITY));

        let nan = ScalarKind::F64.parse(&ScalarValue::F64(f64::NAN).to_string()).unwrap();
        let ScalarValue::F64(nan) = nan else {
            panic!("expected f64");
        };
        assert!(nan.is_nan());
    }

    #[test]
    fn parse_failure_reports_kind_and_text() {
        let err = ScalarKind::U8.parse("300").unwrap_err();
        assert_eq!(err.kind, ScalarKind::U8);
        assert_eq!(err.text, "300");
    }
}
