use super::*;
use wgc_types::{AbsHeapType, FieldType, ModuleTypesBuilder, Nullability};

fn self_referential_struct(nullable_field: Nullability) -> ModuleTypes {
    let mut b = ModuleTypesBuilder::new();
    b.begin_rec_group();
    b.add(
        CompositeType::struct_([FieldType::immutable(ValueType::reference(
            HeapType::Concrete(TypeIdx(0)),
            nullable_field,
        ))]),
        None,
    );
    b.end_rec_group();
    b.finish().expect("valid context")
}

/// Two mutually recursive structs: each holds a nullable reference to the
/// other.
fn mutually_recursive_pair() -> ModuleTypes {
    let mut b = ModuleTypesBuilder::new();
    b.begin_rec_group();
    b.add(
        CompositeType::struct_([FieldType::immutable(ValueType::RefNull(
            HeapType::Concrete(TypeIdx(1)),
        ))]),
        None,
    );
    b.add(
        CompositeType::struct_([FieldType::immutable(ValueType::RefNull(
            HeapType::Concrete(TypeIdx(0)),
        ))]),
        None,
    );
    b.end_rec_group();
    b.finish().expect("valid context")
}

#[test]
fn numerics_and_bottom_by_identity() {
    let m = ModuleTypesBuilder::new().finish().expect("valid context");
    assert!(equivalent_types(ValueType::I32, &m, ValueType::I32, &m));
    assert!(!equivalent_types(ValueType::I32, &m, ValueType::I64, &m));
    assert!(!equivalent_types(ValueType::I8, &m, ValueType::I32, &m));
    assert!(equivalent_types(ValueType::Bottom, &m, ValueType::Bottom, &m));
    assert!(!equivalent_types(ValueType::Bottom, &m, ValueType::I32, &m));
}

#[test]
fn abstract_heads_by_identity() {
    let m = ModuleTypesBuilder::new().finish().expect("valid context");
    let eq = ValueType::RefNull(HeapType::Abs(AbsHeapType::Eq));
    let any = ValueType::RefNull(HeapType::Abs(AbsHeapType::Any));
    assert!(equivalent_types(eq, &m, eq, &m));
    // Subtype-related is not equivalent.
    assert!(!equivalent_types(eq, &m, any, &m));
}

#[test]
fn wrappers_must_agree_on_nullability() {
    let m = self_referential_struct(Nullability::Nullable);
    let h = HeapType::Concrete(TypeIdx(0));
    assert!(!equivalent_types(
        ValueType::Ref(h),
        &m,
        ValueType::RefNull(h),
        &m
    ));
}

#[test]
fn cyclic_equivalence_across_modules() {
    // S in module 1 with one field (ref null S); a structurally identical S'
    // in module 2. The two must be interchangeable, and the comparison must
    // terminate despite the self-reference.
    let m1 = self_referential_struct(Nullability::Nullable);
    let m2 = self_referential_struct(Nullability::Nullable);
    let s = ValueType::RefNull(HeapType::Concrete(TypeIdx(0)));

    assert!(equivalent_types(s, &m2, s, &m1));
    assert!(equivalent_types(s, &m1, s, &m2));
}

#[test]
fn cyclic_shape_mismatch_is_detected() {
    // Same cycle, but one module's field is non-null: the coinductive
    // assumption must be contradicted by the wrapper mismatch underneath.
    let m1 = self_referential_struct(Nullability::Nullable);
    let m2 = self_referential_struct(Nullability::NonNull);
    let s1 = ValueType::RefNull(HeapType::Concrete(TypeIdx(0)));

    assert!(!equivalent_types(s1, &m1, s1, &m2));
}

#[test]
fn mutually_recursive_groups_compare_across_modules() {
    let m1 = mutually_recursive_pair();
    let m2 = mutually_recursive_pair();
    for idx in [TypeIdx(0), TypeIdx(1)] {
        let t = ValueType::RefNull(HeapType::Concrete(idx));
        assert!(equivalent_types(t, &m1, t, &m2), "{t} across modules");
    }
    // The two members of the group have identical shapes up to index
    // renaming, so they are also equivalent to each other.
    let a = ValueType::RefNull(HeapType::Concrete(TypeIdx(0)));
    let b = ValueType::RefNull(HeapType::Concrete(TypeIdx(1)));
    assert!(equivalent_types(a, &m1, b, &m1));
}

#[test]
fn struct_shapes_compare_field_by_field() {
    let build = |mutable: bool, extra_field: bool| {
        let mut b = ModuleTypesBuilder::new();
        let mut fields = vec![FieldType {
            ty: ValueType::I32,
            mutable,
        }];
        if extra_field {
            fields.push(FieldType::immutable(ValueType::F64));
        }
        b.add(CompositeType::struct_(fields), None);
        b.finish().expect("valid context")
    };
    let plain = build(false, false);
    let tweaked_mutability = build(true, false);
    let widened = build(false, true);
    let t = ValueType::Ref(HeapType::Concrete(TypeIdx(0)));

    assert!(equivalent_types(t, &plain, t, &plain));
    assert!(!equivalent_types(t, &plain, t, &tweaked_mutability));
    assert!(!equivalent_types(t, &plain, t, &widened));
}

#[test]
fn array_shapes_compare_element_and_mutability() {
    let build = |ty: ValueType, mutable: bool| {
        let mut b = ModuleTypesBuilder::new();
        b.add(CompositeType::array(FieldType { ty, mutable }), None);
        b.finish().expect("valid context")
    };
    let a = build(ValueType::I8, true);
    let b = build(ValueType::I8, true);
    let frozen = build(ValueType::I8, false);
    let wider = build(ValueType::I16, true);
    let t = ValueType::Ref(HeapType::Concrete(TypeIdx(0)));

    assert!(equivalent_types(t, &a, t, &b));
    assert!(!equivalent_types(t, &a, t, &frozen));
    assert!(!equivalent_types(t, &a, t, &wider));
}

#[test]
fn func_signatures_compare_positionally() {
    let build = |params: Vec<ValueType>, results: Vec<ValueType>| {
        let mut b = ModuleTypesBuilder::new();
        b.add(CompositeType::func(params, results), None);
        b.finish().expect("valid context")
    };
    let f = build(vec![ValueType::I32, ValueType::F64], vec![ValueType::I64]);
    let same = build(vec![ValueType::I32, ValueType::F64], vec![ValueType::I64]);
    let swapped = build(vec![ValueType::F64, ValueType::I32], vec![ValueType::I64]);
    let shorter = build(vec![ValueType::I32], vec![ValueType::I64]);
    let t = ValueType::Ref(HeapType::Concrete(TypeIdx(0)));

    assert!(equivalent_types(t, &f, t, &same));
    assert!(!equivalent_types(t, &f, t, &swapped));
    assert!(!equivalent_types(t, &f, t, &shorter));
}

#[test]
fn recursive_signature_equivalence() {
    // A function type whose parameter is a nullable reference to itself.
    let build = || {
        let mut b = ModuleTypesBuilder::new();
        b.begin_rec_group();
        b.add(
            CompositeType::func(
                [ValueType::RefNull(HeapType::Concrete(TypeIdx(0)))],
                [ValueType::I32],
            ),
            None,
        );
        b.end_rec_group();
        b.finish().expect("valid context")
    };
    let m1 = build();
    let m2 = build();
    let t = ValueType::Ref(HeapType::Concrete(TypeIdx(0)));
    assert!(equivalent_types(t, &m1, t, &m2));
}

#[test]
fn different_composite_kinds_never_compare_equal() {
    let mut b = ModuleTypesBuilder::new();
    b.add(CompositeType::struct_([]), None);
    b.add(
        CompositeType::array(FieldType::immutable(ValueType::I32)),
        None,
    );
    let m = b.finish().expect("valid context");
    let s = ValueType::Ref(HeapType::Concrete(TypeIdx(0)));
    let a = ValueType::Ref(HeapType::Concrete(TypeIdx(1)));
    assert!(!equivalent_types(s, &m, a, &m));
}

#[test]
fn checker_reuse_keeps_verified_assumptions() {
    // Assumptions verified by a successful query are sound facts; a reused
    // checker may keep them as a memo across related queries.
    let m1 = self_referential_struct(Nullability::Nullable);
    let m2 = self_referential_struct(Nullability::Nullable);
    let s = ValueType::RefNull(HeapType::Concrete(TypeIdx(0)));

    let mut checker = EquivalenceChecker::new();
    assert!(checker.check_value_types(s, &m1, s, &m2));
    assert!(checker.check_value_types(s, &m2, s, &m1));
}

#[test]
fn failed_query_does_not_poison_a_reused_checker() {
    // A failed comparison enters pairs it never verifies; they must not
    // turn a repeat of the same query into a false positive.
    let m1 = self_referential_struct(Nullability::Nullable);
    let m2 = self_referential_struct(Nullability::NonNull);
    let s = ValueType::RefNull(HeapType::Concrete(TypeIdx(0)));

    let mut checker = EquivalenceChecker::new();
    assert!(!checker.check_value_types(s, &m1, s, &m2));
    assert!(!checker.check_value_types(s, &m1, s, &m2));
}
