//! Type definitions: the entries of a module type context.
//!
//! A definition is a composite shape (struct, array, or function signature)
//! plus its recursive-group membership and an optional declared supertype.
//! Definitions reference each other by [`TypeIdx`] into their owning
//! [`ModuleTypes`](crate::context::ModuleTypes) rather than by ownership
//! links, so mutually recursive definitions are plain integers with no
//! ownership cycle.

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::types::ValueType;

// =============================================================================
// Indices
// =============================================================================

/// Index of a type definition within its module type context.
///
/// Only meaningful paired with the context that defines it; the same index
/// in two contexts denotes unrelated definitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeIdx(pub u32);

impl fmt::Display for TypeIdx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.0)
    }
}

/// Identifier of a recursive group within a module type context.
///
/// Definitions in the same group may reference each other (including
/// forward references) and are checked as a mutually recursive unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecGroupId(pub u32);

// =============================================================================
// Composite shapes
// =============================================================================

/// A struct field or array element: a storage type plus mutability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldType {
    pub ty: ValueType,
    pub mutable: bool,
}

impl FieldType {
    pub const fn immutable(ty: ValueType) -> Self {
        Self { ty, mutable: false }
    }

    pub const fn mutable(ty: ValueType) -> Self {
        Self { ty, mutable: true }
    }
}

/// The shape of a type definition.
///
/// Most signatures and structs are short; the inline capacities cover the
/// common cases without heap allocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompositeType {
    Struct {
        fields: SmallVec<[FieldType; 4]>,
    },
    Array {
        field: FieldType,
    },
    Func {
        params: SmallVec<[ValueType; 4]>,
        results: SmallVec<[ValueType; 2]>,
    },
}

impl CompositeType {
    pub fn func(
        params: impl IntoIterator<Item = ValueType>,
        results: impl IntoIterator<Item = ValueType>,
    ) -> Self {
        Self::Func {
            params: params.into_iter().collect(),
            results: results.into_iter().collect(),
        }
    }

    pub fn struct_(fields: impl IntoIterator<Item = FieldType>) -> Self {
        Self::Struct {
            fields: fields.into_iter().collect(),
        }
    }

    pub fn array(field: FieldType) -> Self {
        Self::Array { field }
    }

    pub const fn kind(&self) -> CompositeKind {
        match self {
            Self::Struct { .. } => CompositeKind::Struct,
            Self::Array { .. } => CompositeKind::Array,
            Self::Func { .. } => CompositeKind::Func,
        }
    }
}

/// The three composite categories a definition can belong to.
///
/// Determines which abstract hierarchy a concrete heap type lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompositeKind {
    Struct,
    Array,
    Func,
}

impl fmt::Display for CompositeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Struct => "struct",
            Self::Array => "array",
            Self::Func => "func",
        })
    }
}

// =============================================================================
// TypeDef
// =============================================================================

/// One entry of a module type context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDef {
    pub composite: CompositeType,
    /// Declared nominal supertype. Absent means the only supertype is the
    /// matching abstract category's top (a struct's default supertype is
    /// `struct`, and so on).
    pub supertype: Option<TypeIdx>,
    /// The recursive group this definition was declared in.
    pub rec_group: RecGroupId,
}

impl TypeDef {
    pub const fn kind(&self) -> CompositeKind {
        self.composite.kind()
    }
}
