//! The engines are pure functions over immutable contexts: any number of
//! worker threads may query the same tables concurrently with no locking.
//! This drives all three engines from a rayon pool against shared contexts
//! and checks that every worker sees the same answers.

use rayon::prelude::*;
use wgc_solver::{common_subtype, equivalent_types, is_subtype_of, is_subtype_of_in};
use wgc_types::{
    AbsHeapType, CompositeType, FieldType, HeapType, ModuleTypes, ModuleTypesBuilder, TypeIdx,
    ValueType,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A module with a five-deep derivation chain and a self-referential struct.
fn build_module() -> ModuleTypes {
    let mut b = ModuleTypesBuilder::new();
    let mut prev = None;
    for depth in 0..6u32 {
        let fields = (0..depth).map(|_| FieldType::immutable(ValueType::I32));
        prev = Some(b.add(CompositeType::struct_(fields), prev));
    }
    b.begin_rec_group();
    b.add(
        CompositeType::struct_([FieldType::immutable(ValueType::RefNull(
            HeapType::Concrete(TypeIdx(6)),
        ))]),
        None,
    );
    b.end_rec_group();
    b.finish().expect("valid context")
}

#[test]
fn parallel_queries_agree() {
    init_tracing();
    let m1 = build_module();
    let m2 = build_module();

    let derived = ValueType::Ref(HeapType::Concrete(TypeIdx(5)));
    let base = ValueType::Ref(HeapType::Concrete(TypeIdx(0)));
    let cyclic = ValueType::RefNull(HeapType::Concrete(TypeIdx(6)));
    let eq_ref = ValueType::Ref(HeapType::Abs(AbsHeapType::Eq));

    let results: Vec<(bool, bool, bool, ValueType)> = (0..512)
        .into_par_iter()
        .map(|_| {
            (
                is_subtype_of_in(derived, base, &m1),
                is_subtype_of(cyclic, &m1, cyclic, &m2),
                equivalent_types(cyclic, &m1, cyclic, &m2),
                common_subtype(base, eq_ref, &m1),
            )
        })
        .collect();

    for (chain, cross_module_subtype, cross_module_equiv, merged) in results {
        assert!(chain, "derived <: base on every worker");
        // Same index in a different context is an unrelated definition...
        assert!(!cross_module_subtype);
        // ...but the isomorphic shapes are equivalent.
        assert!(cross_module_equiv);
        assert_eq!(merged, base);
    }
}
