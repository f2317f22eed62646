//! Type vocabulary and module type contexts for the wgc type engine.
//!
//! This crate defines the data half of the engine:
//!
//! - [`types`]: the value/heap-type vocabulary ([`ValueType`], [`HeapType`],
//!   the abstract categories) and their text-format rendering
//! - [`def`]: composite type definitions (structs, arrays, function
//!   signatures) with recursive-group membership and declared supertypes
//! - [`context`]: the immutable per-module definition table
//!   ([`ModuleTypes`]) plus its validating builder
//!
//! The relation engines themselves (subtyping, equivalence, common subtype)
//! live in `wgc-solver`; this crate carries no relation logic beyond plain
//! identity.

pub mod context;
pub mod def;
pub mod types;

pub use context::{CtxId, ModuleTypes, ModuleTypesBuilder, TypeContextError};
pub use def::{CompositeKind, CompositeType, FieldType, RecGroupId, TypeDef, TypeIdx};
pub use types::{AbsHeapType, HeapType, Nullability, NumType, ValueType};
