//! Structural type-relation engines for the WasmGC value/heap-type lattice.
//!
//! Three queries, used throughout a verifier/compiler pipeline:
//!
//! - [`is_subtype_of`]: may a value of one type stand in for another?
//!   Combines the fixed abstract hierarchy, declared nominal supertype
//!   chains, and nullability covariance.
//! - [`equivalent_types`]: do two types denote the same structural type,
//!   even when defined by different (isomorphic) recursive groups in
//!   different modules? Coinductive, safe over cyclic definitions.
//! - [`common_subtype`]: the greatest lower bound of two types, for typing
//!   control-flow merge points; total, degrading to `Bottom` for
//!   irreconcilable inputs. [`common_supertype`] is its partial dual.
//!
//! All three are pure functions of their arguments and the referenced
//! (immutable) [`ModuleTypes`](wgc_types::ModuleTypes) contexts. They retain
//! no state between calls and allocate only transient working memory (the
//! equivalence memo), so any number of worker threads may query the same
//! contexts concurrently without locking.
//!
//! Malformed inputs (dangling indices, supertype cycles) are caller-side
//! invariant violations: the engines assert rather than defining recovery,
//! since such states indicate a bug in the decoding/validation stage that
//! ran earlier.

pub mod equiv;
pub mod hierarchy;
pub mod join;
pub mod recursion;
pub mod subtype;

pub use equiv::{EquivalenceChecker, equivalent_types};
pub use hierarchy::{HeapBranch, abstract_le};
pub use join::{common_subtype, common_supertype};
pub use subtype::{is_heap_subtype_of, is_subtype_of, is_subtype_of_in};
