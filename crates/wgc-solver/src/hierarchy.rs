//! The fixed partial order among abstract heap-type categories.
//!
//! This table is independent of any module: it is the hard-coded lattice
//!
//! ```text
//!            any            func          extern
//!             |               |              |
//!             eq            nofunc       noextern
//!          /   |   \
//!     struct array i31
//!          \   |   /
//!            none
//! ```
//!
//! modeled as plain `match` tables with no state and no lifecycle. The three
//! columns are the disjoint heap branches; no category of one branch relates
//! to any category of another.

use wgc_types::{AbsHeapType, CompositeKind};

// =============================================================================
// Branches
// =============================================================================

/// The three disjoint heap-type hierarchies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeapBranch {
    Func,
    Extern,
    Any,
}

/// The branch an abstract category belongs to.
pub const fn branch_of(abs: AbsHeapType) -> HeapBranch {
    match abs {
        AbsHeapType::Func | AbsHeapType::NoFunc => HeapBranch::Func,
        AbsHeapType::Extern | AbsHeapType::NoExtern => HeapBranch::Extern,
        AbsHeapType::Any
        | AbsHeapType::Eq
        | AbsHeapType::I31
        | AbsHeapType::Struct
        | AbsHeapType::Array
        | AbsHeapType::None => HeapBranch::Any,
    }
}

/// The branch a concrete definition of the given kind belongs to.
pub const fn branch_of_kind(kind: CompositeKind) -> HeapBranch {
    match kind {
        CompositeKind::Func => HeapBranch::Func,
        CompositeKind::Struct | CompositeKind::Array => HeapBranch::Any,
    }
}

/// The uninhabited bottom category of a branch.
pub const fn bottom_of(branch: HeapBranch) -> AbsHeapType {
    match branch {
        HeapBranch::Func => AbsHeapType::NoFunc,
        HeapBranch::Extern => AbsHeapType::NoExtern,
        HeapBranch::Any => AbsHeapType::None,
    }
}

/// The top category of a branch.
pub const fn top_of(branch: HeapBranch) -> AbsHeapType {
    match branch {
        HeapBranch::Func => AbsHeapType::Func,
        HeapBranch::Extern => AbsHeapType::Extern,
        HeapBranch::Any => AbsHeapType::Any,
    }
}

/// Whether `abs` is the bottom category of its branch.
pub const fn is_branch_bottom(abs: AbsHeapType) -> bool {
    matches!(
        abs,
        AbsHeapType::None | AbsHeapType::NoFunc | AbsHeapType::NoExtern
    )
}

/// The default abstract supertype of a concrete definition: the category a
/// definition of this kind falls directly under when it declares no explicit
/// supertype.
pub const fn default_supertype_of_kind(kind: CompositeKind) -> AbsHeapType {
    match kind {
        CompositeKind::Struct => AbsHeapType::Struct,
        CompositeKind::Array => AbsHeapType::Array,
        CompositeKind::Func => AbsHeapType::Func,
    }
}

// =============================================================================
// The partial order
// =============================================================================

/// `a <: b` in the abstract hierarchy.
///
/// Total over all category pairs and reflexive; false for any pair
/// straddling two branches.
pub const fn abstract_le(a: AbsHeapType, b: AbsHeapType) -> bool {
    use AbsHeapType::*;
    match a {
        // Branch bottoms are below everything on their own branch.
        None => matches!(b, None | Struct | Array | I31 | Eq | Any),
        NoFunc => matches!(b, NoFunc | Func),
        NoExtern => matches!(b, NoExtern | Extern),

        Struct => matches!(b, Struct | Eq | Any),
        Array => matches!(b, Array | Eq | Any),
        I31 => matches!(b, I31 | Eq | Any),
        Eq => matches!(b, Eq | Any),

        // Branch tops are below nothing but themselves.
        Any => matches!(b, Any),
        Func => matches!(b, Func),
        Extern => matches!(b, Extern),
    }
}

// =============================================================================
// Tests
// =============================================================================
