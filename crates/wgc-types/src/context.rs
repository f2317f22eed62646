//! The per-module table of type definitions.
//!
//! A [`ModuleTypes`] is constructed once, during module instantiation, by the
//! loading/validation pipeline and never mutated afterwards. The relation
//! engines hold only borrowed references to it for the duration of a single
//! query; write-once/read-many is a contract with the owner, not something
//! the engines enforce with locking.
//!
//! Context identity matters: a concrete heap type is only meaningful paired
//! with the context that defines its index, and two contexts are "the same"
//! only when they are literally the same table ([`ModuleTypes::same_context`],
//! which is pointer identity). [`CtxId`] packages that identity as a hashable
//! key for the equivalence engine's visited-pair memo.

use std::fmt;

use thiserror::Error;

use crate::def::{CompositeKind, CompositeType, RecGroupId, TypeDef, TypeIdx};

// =============================================================================
// ModuleTypes
// =============================================================================

/// Immutable, ordered table of type definitions, indexed `0..N-1`.
///
/// Definitions may reference earlier definitions freely and later ones within
/// the same recursive group. Constructed via [`ModuleTypesBuilder`].
#[derive(Debug, PartialEq, Eq)]
pub struct ModuleTypes {
    defs: Vec<TypeDef>,
}

impl ModuleTypes {
    /// Look up a definition.
    ///
    /// # Panics
    ///
    /// Panics on a dangling index. A dangling index is a bug in the decoding
    /// or validation stage that produced it, not a runtime condition this
    /// table tolerates.
    pub fn get(&self, idx: TypeIdx) -> &TypeDef {
        match self.defs.get(idx.0 as usize) {
            Some(def) => def,
            None => panic!(
                "dangling type index {idx} in a context of {} definitions",
                self.defs.len()
            ),
        }
    }

    /// The declared supertype link of a definition, if any.
    pub fn supertype_of(&self, idx: TypeIdx) -> Option<TypeIdx> {
        self.get(idx).supertype
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TypeIdx, &TypeDef)> {
        self.defs
            .iter()
            .enumerate()
            .map(|(i, def)| (TypeIdx(i as u32), def))
    }

    /// Definition identity of two contexts: are they literally the same
    /// table? Structurally identical tables are *not* the same context.
    pub fn same_context(a: &ModuleTypes, b: &ModuleTypes) -> bool {
        std::ptr::eq(a, b)
    }

    /// A hashable stand-in for this context's identity, stable for the
    /// lifetime of the borrow that produced it.
    pub fn ctx_id(&self) -> CtxId {
        CtxId(self as *const ModuleTypes as usize)
    }
}

impl fmt::Display for ModuleTypes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "module types ({}):", self.len())?;
        for (idx, def) in self.iter() {
            write!(f, "  {idx}: {}", def.kind())?;
            if let Some(sup) = def.supertype {
                write!(f, " <: {sup}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Opaque context-identity token, used as a memo-key component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CtxId(usize);

// =============================================================================
// Builder
// =============================================================================

/// Incremental constructor for [`ModuleTypes`].
///
/// Definitions added between [`begin_rec_group`](Self::begin_rec_group) and
/// [`end_rec_group`](Self::end_rec_group) share a recursive group; every
/// other definition gets a singleton group of its own, matching the way the
/// binary format treats a bare type definition as a group of one.
///
/// [`finish`](Self::finish) checks the invariants the relation engines rely
/// on: every declared supertype index is in bounds, links a definition to one
/// of the same composite kind, and the resulting supertype chains are
/// acyclic. Deeper shape checks (field-wise compatibility of a subtype with
/// its declared supertype) belong to module validation and are not repeated
/// here.
#[derive(Debug, Default)]
pub struct ModuleTypesBuilder {
    defs: Vec<TypeDef>,
    next_group: u32,
    open_group: Option<RecGroupId>,
}

impl ModuleTypesBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a recursive group. Groups do not nest.
    pub fn begin_rec_group(&mut self) {
        debug_assert!(self.open_group.is_none(), "recursive groups do not nest");
        self.open_group = Some(self.fresh_group());
    }

    /// Close the open recursive group.
    pub fn end_rec_group(&mut self) {
        debug_assert!(self.open_group.is_some(), "no recursive group is open");
        self.open_group = None;
    }

    /// Append a definition, returning its index.
    pub fn add(&mut self, composite: CompositeType, supertype: Option<TypeIdx>) -> TypeIdx {
        let rec_group = match self.open_group {
            Some(group) => group,
            None => self.fresh_group(),
        };
        let idx = TypeIdx(self.defs.len() as u32);
        self.defs.push(TypeDef {
            composite,
            supertype,
            rec_group,
        });
        idx
    }

    /// Validate and seal the table.
    pub fn finish(self) -> Result<ModuleTypes, TypeContextError> {
        debug_assert!(self.open_group.is_none(), "unclosed recursive group");

        let count = self.defs.len();
        for (i, def) in self.defs.iter().enumerate() {
            let sub = TypeIdx(i as u32);
            let Some(sup) = def.supertype else { continue };
            let Some(sup_def) = self.defs.get(sup.0 as usize) else {
                return Err(TypeContextError::DanglingSupertype { sub, sup, count });
            };
            if sup_def.kind() != def.kind() {
                return Err(TypeContextError::KindMismatch {
                    sub,
                    sub_kind: def.kind(),
                    sup,
                    sup_kind: sup_def.kind(),
                });
            }
        }

        // A chain longer than the table revisits some definition.
        for i in 0..count {
            let start = TypeIdx(i as u32);
            let mut cursor = start;
            let mut steps = 0usize;
            while let Some(sup) = self.defs[cursor.0 as usize].supertype {
                steps += 1;
                if steps > count {
                    return Err(TypeContextError::SupertypeCycle { start });
                }
                cursor = sup;
            }
        }

        Ok(ModuleTypes { defs: self.defs })
    }

    fn fresh_group(&mut self) -> RecGroupId {
        let group = RecGroupId(self.next_group);
        self.next_group += 1;
        group
    }
}

// =============================================================================
// Errors
// =============================================================================

/// Construction-time violations rejected by [`ModuleTypesBuilder::finish`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeContextError {
    #[error("type {sub} declares supertype {sup}, but the context defines only {count} types")]
    DanglingSupertype {
        sub: TypeIdx,
        sup: TypeIdx,
        count: usize,
    },

    #[error("type {sub} ({sub_kind}) declares supertype {sup} of a different kind ({sup_kind})")]
    KindMismatch {
        sub: TypeIdx,
        sub_kind: CompositeKind,
        sup: TypeIdx,
        sup_kind: CompositeKind,
    },

    #[error("the supertype chain starting at type {start} contains a cycle")]
    SupertypeCycle { start: TypeIdx },
}

// =============================================================================
// Tests
// =============================================================================
