//! The subtyping engine: `sub <: super` over value types.
//!
//! Combines three ingredients:
//!
//! - the fixed abstract hierarchy ([`crate::hierarchy`])
//! - declared nominal supertype chains of concrete definitions
//! - nullability/reference-form covariance (`(ref T)` may stand in for
//!   `(ref null T)`, never the other way around)
//!
//! Queries are pure functions of the two types and their owning contexts;
//! no state is carried across calls. Worst-case cost is the length of the
//! subtype side's supertype chain, which module validation bounds by the
//! size of its context.

use tracing::trace;
use wgc_types::{HeapType, ModuleTypes, ValueType};

use crate::hierarchy::{
    abstract_le, branch_of, branch_of_kind, default_supertype_of_kind, is_branch_bottom,
};

/// Is `sub` a subtype of `sup`, with each side interpreted in its own
/// context?
///
/// The identity fast path requires the *same* context (definition identity,
/// not structural equality): equal types from distinct contexts still go
/// through the full rules, because a concrete index means different things
/// in different contexts.
pub fn is_subtype_of(
    sub: ValueType,
    sub_ctx: &ModuleTypes,
    sup: ValueType,
    sup_ctx: &ModuleTypes,
) -> bool {
    if sub == sup && ModuleTypes::same_context(sub_ctx, sup_ctx) {
        return true;
    }
    is_subtype_of_impl(sub, sub_ctx, sup, sup_ctx)
}

/// Single-context convenience form of [`is_subtype_of`].
pub fn is_subtype_of_in(sub: ValueType, sup: ValueType, ctx: &ModuleTypes) -> bool {
    if sub == sup {
        return true;
    }
    is_subtype_of_impl(sub, ctx, sup, ctx)
}

fn is_subtype_of_impl(
    sub: ValueType,
    sub_ctx: &ModuleTypes,
    sup: ValueType,
    sup_ctx: &ModuleTypes,
) -> bool {
    trace!(%sub, %sup, "subtype query");
    match (sub, sup) {
        // Bottom is below everything; nothing else is below bottom.
        (ValueType::Bottom, _) => true,
        (_, ValueType::Bottom) => false,

        // Numeric scalars relate by identity only.
        (ValueType::Num(a), ValueType::Num(b)) => a == b,

        // A nullable reference cannot stand in for a non-null one,
        // regardless of the heap types.
        (ValueType::RefNull(_), ValueType::Ref(_)) => false,

        (ValueType::Ref(h1), ValueType::Ref(h2))
        | (ValueType::Ref(h1), ValueType::RefNull(h2))
        | (ValueType::RefNull(h1), ValueType::RefNull(h2)) => {
            is_heap_subtype_of(h1, sub_ctx, h2, sup_ctx)
        }

        _ => false,
    }
}

/// Heap-type subtyping, across possibly different contexts.
pub fn is_heap_subtype_of(
    h1: HeapType,
    ctx1: &ModuleTypes,
    h2: HeapType,
    ctx2: &ModuleTypes,
) -> bool {
    match (h1, h2) {
        (HeapType::Abs(a), HeapType::Abs(b)) => abstract_le(a, b),

        // The only abstract category below a concrete type is its branch's
        // uninhabited bottom.
        (HeapType::Abs(a), HeapType::Concrete(idx)) => {
            is_branch_bottom(a) && branch_of(a) == branch_of_kind(ctx2.get(idx).kind())
        }

        // A concrete type sits directly under its category's default
        // abstract supertype; everything above that is the abstract table's
        // business. Function definitions never reach `eq`/`any`.
        (HeapType::Concrete(idx), HeapType::Abs(b)) => {
            abstract_le(default_supertype_of_kind(ctx1.get(idx).kind()), b)
        }

        // Walk the declared supertype chain of h1, one link at a time,
        // comparing definition identity (index + context) at each step.
        // Validation guarantees the chain is finite; a longer walk than the
        // context has definitions indicates a broken precondition.
        (HeapType::Concrete(i1), HeapType::Concrete(i2)) => {
            let same_ctx = ModuleTypes::same_context(ctx1, ctx2);
            let mut cursor = i1;
            let mut steps = 0usize;
            loop {
                if same_ctx && cursor == i2 {
                    return true;
                }
                match ctx1.supertype_of(cursor) {
                    Some(sup) => {
                        cursor = sup;
                        steps += 1;
                        debug_assert!(
                            steps <= ctx1.len(),
                            "supertype chain of {i1} exceeds context size; cycle in context"
                        );
                    }
                    None => return false,
                }
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
#[path = "tests/subtype_tests.rs"]
mod tests;
