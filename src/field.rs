//! Field descriptors: the static table a record hands to the walker.
//!
//! A record describes itself by implementing [`EnvRecord`], returning one
//! [`Field`] per struct field in declaration order. Leaf fields borrow their
//! storage as a typed [`Slot`]; nested records are borrowed as
//! `&mut dyn EnvRecord` and walked recursively.
//!
//! ```
//! use envconf::{EnvRecord, Field};
//!
//! #[derive(Default)]
//! struct Database {
//!     url: String,
//! }
//!
//! impl EnvRecord for Database {
//!     fn fields(&mut self) -> Vec<Field<'_>> {
//!         vec![Field::new("url", &mut self.url).env("DATABASE_URL,required")]
//!     }
//! }
//!
//! #[derive(Default)]
//! struct AppConfig {
//!     port: i64,
//!     hosts: Vec<String>,
//!     database: Database,
//! }
//!
//! impl EnvRecord for AppConfig {
//!     fn fields(&mut self) -> Vec<Field<'_>> {
//!         vec![
//!             Field::new("port", &mut self.port).env("PORT").default("3000"),
//!             Field::new("hosts", &mut self.hosts)
//!                 .env("HOSTS")
//!                 .separator(":")
//!                 .default("8.8.8.8:8.8.4.4"),
//!             Field::nested("database", &mut self.database),
//!         ]
//!     }
//! }
//! ```

use std::any::type_name;
use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

/// A configuration record whose fields can be resolved from the environment.
///
/// Implementations return their descriptors in declaration order. The walker
/// visits them in that order and stops at the first error.
pub trait EnvRecord {
    fn fields(&mut self) -> Vec<Field<'_>>;
}

/// Declared annotations of one leaf field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tag {
    /// `"KEY"` or `"KEY,required"`. Empty means no environment binding.
    pub env: &'static str,
    /// Default literal. Empty means no default.
    pub default: &'static str,
    /// Slice separator override. Empty means the default comma.
    pub separator: &'static str,
}

/// One field of a record, as seen by the walker.
pub struct Field<'a> {
    pub(crate) name: &'static str,
    pub(crate) tag: Tag,
    pub(crate) target: Target<'a>,
}

pub(crate) enum Target<'a> {
    Leaf(Slot<'a>),
    Nested(&'a mut dyn EnvRecord),
}

impl<'a> Field<'a> {
    /// A leaf field writing into `value`.
    pub fn new<T: EnvField>(name: &'static str, value: &'a mut T) -> Self {
        Self {
            name,
            tag: Tag::default(),
            target: Target::Leaf(value.slot()),
        }
    }

    /// A nested record, always walked whether or not it carries annotations.
    pub fn nested<R: EnvRecord>(name: &'static str, record: &'a mut R) -> Self {
        Self {
            name,
            tag: Tag::default(),
            target: Target::Nested(record),
        }
    }

    /// Bind the field to an environment variable, optionally followed by
    /// comma-separated options (`"KEY,required"`).
    pub fn env(mut self, annotation: &'static str) -> Self {
        self.tag.env = annotation;
        self
    }

    /// Literal used when the environment variable is unset or empty.
    pub fn default(mut self, literal: &'static str) -> Self {
        self.tag.default = literal;
        self
    }

    /// Separator for splitting slice fields (default: `","`).
    pub fn separator(mut self, separator: &'static str) -> Self {
        self.tag.separator = separator;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn tag(&self) -> &Tag {
        &self.tag
    }

    pub fn is_nested(&self) -> bool {
        matches!(self.target, Target::Nested(_))
    }
}

/// Typed write target for a leaf field.
pub enum Slot<'a> {
    Str(&'a mut String),
    Bool(&'a mut bool),
    I8(&'a mut i8),
    I16(&'a mut i16),
    I32(&'a mut i32),
    I64(&'a mut i64),
    Isize(&'a mut isize),
    U8(&'a mut u8),
    U16(&'a mut u16),
    U32(&'a mut u32),
    U64(&'a mut u64),
    Usize(&'a mut usize),
    F32(&'a mut f32),
    F64(&'a mut f64),
    Duration(&'a mut Duration),
    List(ListSlot<'a>),
    /// A type with no coercion rule; carries its name for the error.
    Unsupported(&'static str),
}

/// Typed write target for a slice field.
pub enum ListSlot<'a> {
    Str(&'a mut Vec<String>),
    I32(&'a mut Vec<i32>),
    I64(&'a mut Vec<i64>),
    Bool(&'a mut Vec<bool>),
    F32(&'a mut Vec<f32>),
    F64(&'a mut Vec<f64>),
    Unsupported(&'static str),
}

/// Types that can back a leaf field.
pub trait EnvField {
    fn slot(&mut self) -> Slot<'_>;
}

macro_rules! scalar_field {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl EnvField for $ty {
                fn slot(&mut self) -> Slot<'_> {
                    Slot::$variant(self)
                }
            }
        )*
    };
}

scalar_field! {
    String => Str,
    bool => Bool,
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
    Duration => Duration,
}

macro_rules! list_field {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl EnvField for Vec<$ty> {
                fn slot(&mut self) -> Slot<'_> {
                    Slot::List(ListSlot::$variant(self))
                }
            }
        )*
    };
}

list_field! {
    String => Str,
    i32 => I32,
    i64 => I64,
    bool => Bool,
    f32 => F32,
    f64 => F64,
}

macro_rules! unsupported_list_field {
    ($($ty:ty),* $(,)?) => {
        $(
            impl EnvField for Vec<$ty> {
                fn slot(&mut self) -> Slot<'_> {
                    Slot::List(ListSlot::Unsupported(type_name::<Self>()))
                }
            }
        )*
    };
}

unsupported_list_field!(i8, i16, isize, u8, u16, u32, u64, usize, Duration);

impl<T> EnvField for Option<T> {
    fn slot(&mut self) -> Slot<'_> {
        Slot::Unsupported(type_name::<Self>())
    }
}

impl<K, V, S> EnvField for HashMap<K, V, S> {
    fn slot(&mut self) -> Slot<'_> {
        Slot::Unsupported(type_name::<Self>())
    }
}

impl<K, V> EnvField for BTreeMap<K, V> {
    fn slot(&mut self) -> Slot<'_> {
        Slot::Unsupported(type_name::<Self>())
    }
}
