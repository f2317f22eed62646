//! Greatest-lower-bound and least-upper-bound computation over value types.
//!
//! [`common_subtype`] types control-flow merge points (two branches feeding
//! the same value slot) within a single context. The operation is total:
//! when the inputs are genuinely irreconcilable it degrades to
//! [`ValueType::Bottom`] rather than failing, because a verifier's fallback
//! for an impossible merge is to treat the merged value as
//! unreachable-typed.
//!
//! [`common_supertype`] is the dual: the most specific type a value of
//! either input can flow into. Unlike the lower bound it is partial, since
//! the three heap branches share no common supertype, and neither do
//! distinct numeric scalars.

use tracing::trace;
use wgc_types::{HeapType, ModuleTypes, Nullability, ValueType};

use crate::hierarchy::{HeapBranch, bottom_of, branch_of, branch_of_kind, top_of};
use crate::subtype::is_subtype_of_in;

/// The most specific type that is a subtype of both `a` and `b` within
/// `ctx`, short of the trivial `Bottom` answer where a better one exists.
///
/// When one input is a subtype of the other, that input is the answer. Two
/// unrelated references on the same heap branch still share the branch's
/// uninhabited bottom sentinel, so the result is a reference to that
/// sentinel, non-null unless both inputs are nullable (a nullable result
/// could not stand in for a non-null input). Everything else bottoms out.
pub fn common_subtype(a: ValueType, b: ValueType, ctx: &ModuleTypes) -> ValueType {
    if a == b {
        return a;
    }
    if is_subtype_of_in(a, b, ctx) {
        return a;
    }
    if is_subtype_of_in(b, a, ctx) {
        return b;
    }

    let merged = match same_branch(a, b, ctx) {
        Some(branch) => ValueType::reference(bottom_of(branch), meet_nullability(a, b)),
        None => ValueType::Bottom,
    };
    trace!(%a, %b, result = %merged, "merged unrelated types downward");
    merged
}

/// The most specific type that both `a` and `b` are subtypes of within
/// `ctx`, or `None` when no common supertype exists (inputs on different
/// heap branches, or distinct numeric scalars).
///
/// Two unrelated references on the same branch join at the branch's
/// abstract top; the result is nullable if either input is.
pub fn common_supertype(a: ValueType, b: ValueType, ctx: &ModuleTypes) -> Option<ValueType> {
    if a == b {
        return Some(a);
    }
    if is_subtype_of_in(a, b, ctx) {
        return Some(b);
    }
    if is_subtype_of_in(b, a, ctx) {
        return Some(a);
    }

    let joined = same_branch(a, b, ctx)
        .map(|branch| ValueType::reference(top_of(branch), join_nullability(a, b)));
    if let Some(joined) = joined {
        trace!(%a, %b, result = %joined, "merged unrelated types upward");
    }
    joined
}

/// The shared heap branch of two reference types, if any. Concrete heap
/// types count as members of their definition's branch.
fn same_branch(a: ValueType, b: ValueType, ctx: &ModuleTypes) -> Option<HeapBranch> {
    let (h1, h2) = (a.heap_type()?, b.heap_type()?);
    let b1 = heap_branch(h1, ctx);
    (b1 == heap_branch(h2, ctx)).then_some(b1)
}

/// Nullable only when both sides are: the lower bound must be usable where
/// either input is required.
fn meet_nullability(a: ValueType, b: ValueType) -> Nullability {
    if a.is_nullable() && b.is_nullable() {
        Nullability::Nullable
    } else {
        Nullability::NonNull
    }
}

/// Nullable when either side is: the upper bound must admit every value of
/// either input.
fn join_nullability(a: ValueType, b: ValueType) -> Nullability {
    if a.is_nullable() || b.is_nullable() {
        Nullability::Nullable
    } else {
        Nullability::NonNull
    }
}

fn heap_branch(h: HeapType, ctx: &ModuleTypes) -> HeapBranch {
    match h {
        HeapType::Abs(abs) => branch_of(abs),
        HeapType::Concrete(idx) => branch_of_kind(ctx.get(idx).kind()),
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
#[path = "tests/join_tests.rs"]
mod tests;
