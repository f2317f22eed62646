//! The value-type and heap-type vocabulary.
//!
//! Value types classify the values bytecode can compute with: numeric
//! scalars, references (nullable or not) into one of the three heap-type
//! hierarchies, and the uninhabited bottom type used for unreachable code.
//!
//! A heap type is either an abstract category (`any`, `eq`, `func`, ...) or a
//! concrete per-module type definition addressed by index. A `Concrete` heap
//! type is only meaningful together with the [`ModuleTypes`] that defines the
//! index; the same numeric index denotes unrelated definitions in different
//! contexts. All relation queries therefore take the owning context(s)
//! alongside the types themselves.
//!
//! [`ModuleTypes`]: crate::context::ModuleTypes

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::def::TypeIdx;

// =============================================================================
// NumType
// =============================================================================

/// Numeric value-type kinds.
///
/// `I8` and `I16` are packed storage kinds: they occur only as struct-field
/// and array-element storage and are widened to `I32` when read. They relate
/// to nothing but themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NumType {
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
    V128,
}

impl NumType {
    /// Packed kinds occupy less than four bytes in memory and have no
    /// direct representation on the value stack.
    pub const fn is_packed(self) -> bool {
        matches!(self, Self::I8 | Self::I16)
    }

    /// The kind a packed value widens to on load.
    pub const fn unpacked(self) -> Self {
        match self {
            Self::I8 | Self::I16 => Self::I32,
            other => other,
        }
    }

    const fn name(self) -> &'static str {
        match self {
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::V128 => "v128",
        }
    }
}

impl fmt::Display for NumType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// AbsHeapType
// =============================================================================

/// Abstract heap-type categories.
///
/// These form three disjoint hierarchies:
///
/// - the internal hierarchy: `None <: {Struct, Array, I31} <: Eq <: Any`
/// - the function hierarchy: `NoFunc <: Func`
/// - the external hierarchy: `NoExtern <: Extern`
///
/// `None`, `NoFunc`, and `NoExtern` are the uninhabited bottoms of their
/// hierarchies. No category of one hierarchy relates to any category of
/// another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AbsHeapType {
    Func,
    NoFunc,
    Extern,
    NoExtern,
    Any,
    Eq,
    I31,
    Struct,
    Array,
    None,
}

impl AbsHeapType {
    const fn name(self) -> &'static str {
        match self {
            Self::Func => "func",
            Self::NoFunc => "nofunc",
            Self::Extern => "extern",
            Self::NoExtern => "noextern",
            Self::Any => "any",
            Self::Eq => "eq",
            Self::I31 => "i31",
            Self::Struct => "struct",
            Self::Array => "array",
            Self::None => "none",
        }
    }
}

impl fmt::Display for AbsHeapType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// HeapType
// =============================================================================

/// The referent category of a reference value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeapType {
    /// An abstract category, meaningful in any context.
    Abs(AbsHeapType),
    /// A type definition in the owning module's type context.
    Concrete(TypeIdx),
}

impl HeapType {
    pub const fn is_abstract(self) -> bool {
        matches!(self, Self::Abs(_))
    }

    pub const fn is_concrete(self) -> bool {
        matches!(self, Self::Concrete(_))
    }

    pub const fn as_concrete(self) -> Option<TypeIdx> {
        match self {
            Self::Concrete(idx) => Some(idx),
            Self::Abs(_) => None,
        }
    }
}

impl fmt::Display for HeapType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Abs(abs) => abs.fmt(f),
            Self::Concrete(idx) => write!(f, "{}", idx.0),
        }
    }
}

impl From<AbsHeapType> for HeapType {
    fn from(abs: AbsHeapType) -> Self {
        Self::Abs(abs)
    }
}

impl From<TypeIdx> for HeapType {
    fn from(idx: TypeIdx) -> Self {
        Self::Concrete(idx)
    }
}

// =============================================================================
// Nullability
// =============================================================================

/// Whether a reference type admits the null value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Nullability {
    NonNull,
    Nullable,
}

impl Nullability {
    pub const fn is_nullable(self) -> bool {
        matches!(self, Self::Nullable)
    }

    /// The merge of two nullabilities: nullable if either side is.
    pub const fn union(self, other: Self) -> Self {
        match (self, other) {
            (Self::NonNull, Self::NonNull) => Self::NonNull,
            _ => Self::Nullable,
        }
    }
}

// =============================================================================
// ValueType
// =============================================================================

/// A full value-type descriptor.
///
/// Two `ValueType`s are compared for subtyping or equivalence only together
/// with the module type context(s) that give meaning to any concrete heap
/// type they contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueType {
    /// A numeric scalar. No subtype relation beyond identity.
    Num(NumType),
    /// A non-nullable reference.
    Ref(HeapType),
    /// A nullable reference.
    RefNull(HeapType),
    /// The uninhabited type; subtype of everything. Produced for values in
    /// unreachable code.
    Bottom,
}

impl ValueType {
    pub const I8: Self = Self::Num(NumType::I8);
    pub const I16: Self = Self::Num(NumType::I16);
    pub const I32: Self = Self::Num(NumType::I32);
    pub const I64: Self = Self::Num(NumType::I64);
    pub const F32: Self = Self::Num(NumType::F32);
    pub const F64: Self = Self::Num(NumType::F64);
    pub const V128: Self = Self::Num(NumType::V128);

    /// Build a reference type from its parts.
    pub fn reference(heap: impl Into<HeapType>, nullability: Nullability) -> Self {
        match nullability {
            Nullability::NonNull => Self::Ref(heap.into()),
            Nullability::Nullable => Self::RefNull(heap.into()),
        }
    }

    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Num(_))
    }

    pub const fn is_reference(self) -> bool {
        matches!(self, Self::Ref(_) | Self::RefNull(_))
    }

    pub const fn is_nullable(self) -> bool {
        matches!(self, Self::RefNull(_))
    }

    pub const fn is_bottom(self) -> bool {
        matches!(self, Self::Bottom)
    }

    /// The heap type of a reference, `None` for non-references.
    pub const fn heap_type(self) -> Option<HeapType> {
        match self {
            Self::Ref(h) | Self::RefNull(h) => Some(h),
            _ => None,
        }
    }

    /// The nullability of a reference, `None` for non-references.
    pub const fn nullability(self) -> Option<Nullability> {
        match self {
            Self::Ref(_) => Some(Nullability::NonNull),
            Self::RefNull(_) => Some(Nullability::Nullable),
            _ => None,
        }
    }

    /// Replace the nullability of a reference type.
    ///
    /// Must only be called on references.
    pub fn with_nullability(self, nullability: Nullability) -> Self {
        match self {
            Self::Ref(h) | Self::RefNull(h) => Self::reference(h, nullability),
            other => {
                debug_assert!(false, "with_nullability on non-reference {other}");
                other
            }
        }
    }

    /// Whether locals and table/struct slots of this type can be zero- or
    /// null-initialized. Non-null references are not defaultable.
    pub const fn is_defaultable(self) -> bool {
        !matches!(self, Self::Ref(_))
    }

    pub const fn is_packed(self) -> bool {
        matches!(self, Self::Num(n) if n.is_packed())
    }

    /// The type a packed storage value widens to on load.
    pub const fn unpacked(self) -> Self {
        match self {
            Self::Num(n) => Self::Num(n.unpacked()),
            other => other,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Num(n) => n.fmt(f),
            Self::Ref(h) => write!(f, "(ref {h})"),
            Self::RefNull(h) => write!(f, "(ref null {h})"),
            Self::Bottom => f.write_str("<bot>"),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
