//! The equivalence engine: isorecursive structural equality.
//!
//! Two types are equivalent when they denote the same structural type, even
//! if defined by different (but isomorphic) recursive groups in different
//! contexts. A module that re-declares a type identical in shape to one from
//! an imported module gets a type interchangeable with the original.
//!
//! This is not the subtyping relation: equivalence is symmetric and is used
//! for interning and call-signature matching, where subtyping is a
//! one-directional lattice check.
//!
//! The descent is coinductive: a pair of definitions already assumed equal
//! on the current query compares equal immediately, and the assumption only
//! falls if a contradiction shows up deeper in the structure. That is what
//! makes the algorithm terminate over cyclic and mutually recursive
//! definitions (see [`crate::recursion`]).

use tracing::trace;
use wgc_types::{CompositeType, CtxId, HeapType, ModuleTypes, TypeIdx, ValueType};

use crate::recursion::CoinductionGuard;

/// Are `t1` (in `ctx1`) and `t2` (in `ctx2`) structurally equivalent?
pub fn equivalent_types(
    t1: ValueType,
    ctx1: &ModuleTypes,
    t2: ValueType,
    ctx2: &ModuleTypes,
) -> bool {
    trace!(%t1, %t2, "equivalence query");
    EquivalenceChecker::new().check_value_types(t1, ctx1, t2, ctx2)
}

/// Key of a definition pair assumed equal: both indices with their owning
/// contexts' identities. A bare index pair would conflate definitions from
/// different modules.
type PairKey = (TypeIdx, CtxId, TypeIdx, CtxId);

/// Transient working state for equivalence queries.
///
/// Holds the visited-pair memo. One-shot callers should use
/// [`equivalent_types`]; callers batching many related checks (signature
/// matching, interning) can reuse one checker and benefit from assumptions
/// verified by earlier successful queries.
pub struct EquivalenceChecker {
    assumed: CoinductionGuard<PairKey>,
}

impl EquivalenceChecker {
    pub fn new() -> Self {
        Self {
            assumed: CoinductionGuard::new(),
        }
    }

    /// Top-level query entry point.
    ///
    /// A checker may be reused across queries against the same contexts:
    /// assumptions verified by a successful query are sound facts and are
    /// kept as a memo. A failed query leaves unverified assumptions behind,
    /// so they are dropped before the next query.
    pub fn check_value_types(
        &mut self,
        t1: ValueType,
        ctx1: &ModuleTypes,
        t2: ValueType,
        ctx2: &ModuleTypes,
    ) -> bool {
        let equal = self.value_types(t1, ctx1, t2, ctx2);
        if !equal {
            self.assumed.clear();
        }
        equal
    }

    fn value_types(
        &mut self,
        t1: ValueType,
        ctx1: &ModuleTypes,
        t2: ValueType,
        ctx2: &ModuleTypes,
    ) -> bool {
        match (t1, t2) {
            (ValueType::Num(a), ValueType::Num(b)) => a == b,
            (ValueType::Bottom, ValueType::Bottom) => true,

            // Wrappers must match in nullability exactly.
            (ValueType::Ref(h1), ValueType::Ref(h2))
            | (ValueType::RefNull(h1), ValueType::RefNull(h2)) => {
                self.heap_types(h1, ctx1, h2, ctx2)
            }

            _ => false,
        }
    }

    fn heap_types(
        &mut self,
        h1: HeapType,
        ctx1: &ModuleTypes,
        h2: HeapType,
        ctx2: &ModuleTypes,
    ) -> bool {
        match (h1, h2) {
            (HeapType::Abs(a), HeapType::Abs(b)) => a == b,

            (HeapType::Concrete(i1), HeapType::Concrete(i2)) => {
                // The same definition in the same table needs no descent.
                if i1 == i2 && ModuleTypes::same_context(ctx1, ctx2) {
                    return true;
                }
                let key = (i1, ctx1.ctx_id(), i2, ctx2.ctx_id());
                if self.assumed.enter(key).is_assumed() {
                    return true;
                }
                self.composites(&ctx1.get(i1).composite, ctx1, &ctx2.get(i2).composite, ctx2)
            }

            _ => false,
        }
    }

    fn composites(
        &mut self,
        c1: &CompositeType,
        ctx1: &ModuleTypes,
        c2: &CompositeType,
        ctx2: &ModuleTypes,
    ) -> bool {
        match (c1, c2) {
            (CompositeType::Struct { fields: f1 }, CompositeType::Struct { fields: f2 }) => {
                f1.len() == f2.len()
                    && f1.iter().zip(f2.iter()).all(|(a, b)| {
                        a.mutable == b.mutable
                            && self.value_types(a.ty, ctx1, b.ty, ctx2)
                    })
            }

            (CompositeType::Array { field: a }, CompositeType::Array { field: b }) => {
                a.mutable == b.mutable && self.value_types(a.ty, ctx1, b.ty, ctx2)
            }

            (
                CompositeType::Func {
                    params: p1,
                    results: r1,
                },
                CompositeType::Func {
                    params: p2,
                    results: r2,
                },
            ) => {
                p1.len() == p2.len()
                    && r1.len() == r2.len()
                    && p1
                        .iter()
                        .zip(p2.iter())
                        .all(|(a, b)| self.value_types(*a, ctx1, *b, ctx2))
                    && r1
                        .iter()
                        .zip(r2.iter())
                        .all(|(a, b)| self.value_types(*a, ctx1, *b, ctx2))
            }

            _ => false,
        }
    }
}

impl Default for EquivalenceChecker {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
#[path = "tests/equiv_tests.rs"]
mod tests;
