//! String-to-value coercion for leaf fields.
//!
//! Scalars go through [`Coerce`], one impl per supported type, so the bit
//! width of an integer or float is the width of the Rust type it lands in.
//! Slices split the raw string on a separator and coerce element-wise; only
//! types implementing [`SliceElement`] can be list elements.

use std::fmt;
use std::time::Duration;

use crate::error::{EnvconfError, ParseFailure};
use crate::field::{ListSlot, Slot};

/// Separator used for slice fields that don't declare their own.
pub const DEFAULT_SEPARATOR: &str = ",";

/// Type-kind tag for a scalar coercion target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    Str,
    Bool,
    I8,
    I16,
    I32,
    I64,
    Isize,
    U8,
    U16,
    U32,
    U64,
    Usize,
    F32,
    F64,
    Duration,
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScalarKind::Str => "string",
            ScalarKind::Bool => "bool",
            ScalarKind::I8 => "i8",
            ScalarKind::I16 => "i16",
            ScalarKind::I32 => "i32",
            ScalarKind::I64 => "i64",
            ScalarKind::Isize => "isize",
            ScalarKind::U8 => "u8",
            ScalarKind::U16 => "u16",
            ScalarKind::U32 => "u32",
            ScalarKind::U64 => "u64",
            ScalarKind::Usize => "usize",
            ScalarKind::F32 => "f32",
            ScalarKind::F64 => "f64",
            ScalarKind::Duration => "duration",
        };
        f.write_str(name)
    }
}

/// A scalar type that can be parsed from a raw environment/default string.
pub trait Coerce: Sized {
    const KIND: ScalarKind;

    fn coerce(raw: &str) -> Result<Self, ParseFailure>;
}

/// Scalar types allowed as slice elements.
///
/// Unsigned integers, narrow signed integers and durations are deliberately
/// absent: vectors of those map to [`ListSlot::Unsupported`].
pub trait SliceElement: Coerce {}

impl Coerce for String {
    const KIND: ScalarKind = ScalarKind::Str;

    fn coerce(raw: &str) -> Result<Self, ParseFailure> {
        Ok(raw.to_owned())
    }
}

impl Coerce for bool {
    const KIND: ScalarKind = ScalarKind::Bool;

    fn coerce(raw: &str) -> Result<Self, ParseFailure> {
        match raw {
            "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
            "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
            _ => Err(ParseFailure::Bool),
        }
    }
}

impl Coerce for Duration {
    const KIND: ScalarKind = ScalarKind::Duration;

    fn coerce(raw: &str) -> Result<Self, ParseFailure> {
        Ok(humantime::parse_duration(raw)?)
    }
}

macro_rules! from_str_coerce {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl Coerce for $ty {
                const KIND: ScalarKind = ScalarKind::$kind;

                fn coerce(raw: &str) -> Result<Self, ParseFailure> {
                    Ok(raw.parse::<$ty>()?)
                }
            }
        )*
    };
}

from_str_coerce! {
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    usize => Usize,
    f32 => F32,
    f64 => F64,
}

impl SliceElement for String {}
impl SliceElement for bool {}
impl SliceElement for i32 {}
impl SliceElement for i64 {}
impl SliceElement for f32 {}
impl SliceElement for f64 {}

/// Coerce `raw` into `T`.
pub fn coerce<T: Coerce>(raw: &str) -> Result<T, ParseFailure> {
    T::coerce(raw)
}

/// Split `raw` on `separator` (or [`DEFAULT_SEPARATOR`] when `None` or empty)
/// and coerce each piece, stopping at the first element that fails.
///
/// The split is literal: no trimming, no escaping. An empty `raw` yields one
/// empty element, which is valid for strings and an error for everything else.
pub fn coerce_slice<T: SliceElement>(
    field: &str,
    raw: &str,
    separator: Option<&str>,
) -> Result<Vec<T>, EnvconfError> {
    let sep = separator
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_SEPARATOR);
    raw.split(sep).map(|piece| scalar(field, piece)).collect()
}

fn scalar<T: Coerce>(field: &str, raw: &str) -> Result<T, EnvconfError> {
    T::coerce(raw).map_err(|source| EnvconfError::TypeMismatch {
        field: field.to_string(),
        value: raw.to_string(),
        kind: T::KIND,
        source,
    })
}

/// Coerce `raw` according to the slot's kind and write it through.
pub(crate) fn assign(
    slot: Slot<'_>,
    raw: &str,
    separator: Option<&str>,
    field: &str,
) -> Result<(), EnvconfError> {
    match slot {
        Slot::Str(t) => *t = scalar(field, raw)?,
        Slot::Bool(t) => *t = scalar(field, raw)?,
        Slot::I8(t) => *t = scalar(field, raw)?,
        Slot::I16(t) => *t = scalar(field, raw)?,
        Slot::I32(t) => *t = scalar(field, raw)?,
        Slot::I64(t) => *t = scalar(field, raw)?,
        Slot::Isize(t) => *t = scalar(field, raw)?,
        Slot::U8(t) => *t = scalar(field, raw)?,
        Slot::U16(t) => *t = scalar(field, raw)?,
        Slot::U32(t) => *t = scalar(field, raw)?,
        Slot::U64(t) => *t = scalar(field, raw)?,
        Slot::Usize(t) => *t = scalar(field, raw)?,
        Slot::F32(t) => *t = scalar(field, raw)?,
        Slot::F64(t) => *t = scalar(field, raw)?,
        Slot::Duration(t) => *t = scalar(field, raw)?,
        Slot::List(list) => assign_list(list, raw, separator, field)?,
        Slot::Unsupported(type_name) => {
            return Err(EnvconfError::UnsupportedType {
                field: field.to_string(),
                type_name,
            });
        }
    }
    Ok(())
}

fn assign_list(
    list: ListSlot<'_>,
    raw: &str,
    separator: Option<&str>,
    field: &str,
) -> Result<(), EnvconfError> {
    match list {
        ListSlot::Str(t) => *t = coerce_slice(field, raw, separator)?,
        ListSlot::I32(t) => *t = coerce_slice(field, raw, separator)?,
        ListSlot::I64(t) => *t = coerce_slice(field, raw, separator)?,
        ListSlot::Bool(t) => *t = coerce_slice(field, raw, separator)?,
        ListSlot::F32(t) => *t = coerce_slice(field, raw, separator)?,
        ListSlot::F64(t) => *t = coerce_slice(field, raw, separator)?,
        ListSlot::Unsupported(type_name) => {
            return Err(EnvconfError::UnsupportedSliceType {
                field: field.to_string(),
                type_name,
            });
        }
    }
    Ok(())
}
