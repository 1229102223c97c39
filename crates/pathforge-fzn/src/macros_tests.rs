//! Tests for the constraint macros.

use crate::types::{FznType, Predicate};
use crate::FznModel;

fn model_with_int_array(len: usize) -> FznModel {
    let mut model = FznModel::new();
    model.add_variable_array("x", FznType::range(0, 5), len, false, true);
    model
}

#[test]
fn test_equality_indicator_is_memoized() {
    let mut model = model_with_int_array(3);
    let first = model.equality_indicator("x", 5, 3, true);
    let constraints = model.constraint_count();
    let variables = model.variable_count();
    let second = model.equality_indicator("x", 5, 3, true);

    assert_eq!(first, second);
    assert_eq!(first, "ind_x_int_eq_reif_5");
    assert_eq!(constraints, 3);
    assert_eq!(model.constraint_count(), constraints);
    assert_eq!(model.variable_count(), variables);

    let ne = model.equality_indicator("x", 5, 3, false);
    assert_eq!(ne, "ind_x_int_ne_reif_5");
    assert_eq!(model.constraint_count(), 6);
}

#[test]
fn test_set_in_indicator() {
    let mut model = model_with_int_array(2);
    let ind = model.set_in_indicator("x", &[3, 1, 3], 2);
    assert_eq!(ind, "ind_x_in_1_3");
    assert_eq!(
        model.constraints()[0].to_string(),
        "constraint set_in_reif(x[1], {1, 3}, ind_x_in_1_3[1]) :: defines_var(ind_x_in_1_3[1]);"
    );
    // same set in another order is the same relation
    assert_eq!(model.set_in_indicator("x", &[1, 3], 2), ind);
    assert_eq!(model.constraint_count(), 2);
}

#[test]
fn test_empty_set_in_indicator_is_always_false() {
    let mut model = model_with_int_array(4);
    let ind = model.set_in_indicator("x", &[], 4);
    assert_eq!(model.constraint_count(), 1);
    assert_eq!(
        model.constraints()[0].to_string(),
        format!("constraint array_bool_or({ind}, false);")
    );
}

#[test]
fn test_prevent_assignments() {
    let mut model = model_with_int_array(2);
    model.add_variable_array("b", FznType::Bool, 2, false, false);
    model.prevent_assignments(&[("x", 2), ("b", 1)], 2);

    let clauses: Vec<String> = model
        .constraints()
        .iter()
        .filter(|c| c.predicate == Predicate::ArrayBoolOr)
        .map(|c| c.to_string())
        .collect();
    assert_eq!(
        clauses,
        vec![
            "constraint array_bool_or([ind_x_int_ne_reif_2[1], ind_not_b[1]], true);",
            "constraint array_bool_or([ind_x_int_ne_reif_2[2], ind_not_b[2]], true);",
        ]
    );

    // a boolean forbidden at false is its own indicator
    let before = model.constraint_count();
    model.prevent_assignments(&[("b", 0)], 2);
    assert_eq!(model.constraint_count(), before + 2);
    assert_eq!(
        model.constraints()[before].to_string(),
        "constraint array_bool_or([b[1]], true);"
    );
}

#[test]
fn test_implied_by_indicator_encodings() {
    let mut model = FznModel::new();
    model.add_variable_array("s", FznType::Bool, 1, false, false);
    let direct = model.implied_by_indicator("s", 1, false);
    let negated = model.implied_by_indicator("s", 1, true);
    assert_eq!(direct, "ind_implied_by_s");
    assert_eq!(negated, "ind_implied_by_not_s");
    assert_eq!(
        model.constraints()[0].to_string(),
        "constraint bool_le(s[1], ind_implied_by_s[1]) :: defines_var(ind_implied_by_s[1]);"
    );
    assert_eq!(
        model.constraints()[1].to_string(),
        "constraint array_bool_or([s[1], ind_implied_by_not_s[1]], true) :: defines_var(ind_implied_by_not_s[1]);"
    );
}

#[test]
fn test_assign_with_selector() {
    let mut model = FznModel::new();
    model.add_variable_array("s", FznType::Bool, 2, false, false);
    model.add_variable_array("t", FznType::Int, 2, true, false);
    let yes = vec!["v[1]".to_string(), "v[2]".to_string()];
    let no = vec!["0".to_string(), "0".to_string()];
    model.assign_with_selector("t", "s", &yes, &no, 2);
    // 2 implication indicators x 2 positions + 2 reified equalities x 2 positions
    assert_eq!(model.constraint_count(), 8);
    model.assign_with_selector("t", "s", &yes, &no, 2);
    assert_eq!(model.constraint_count(), 8);
    assert!(model
        .constraints()
        .iter()
        .any(|c| c.to_string() == "constraint int_eq_reif(t[2], 0, ind_implied_by_not_s[2]);"));
}

#[test]
fn test_weighted_sum() {
    let mut model = model_with_int_array(2);
    let total = model.weighted_sum_of_var_array("total", "x", &[3, -2]);
    assert_eq!(total, "total");
    assert_eq!(
        model.constraints()[0].to_string(),
        "constraint int_lin_eq([3, -2, -1], [x[1], x[2], total], 0) :: defines_var(total);"
    );
    assert_eq!(
        model.variable("total").unwrap().to_string(),
        "var int: total :: is_defined_var;"
    );
    assert!(!model.constrain_weighted_sum("total", &[], &[]));
    assert_eq!(model.constraint_count(), 1);

    let sum = model.sum_of_var_array("plain", "x");
    assert_eq!(
        model.constraints()[1].to_string(),
        format!("constraint int_lin_eq([1, 1, -1], [x[1], x[2], {sum}], 0) :: defines_var({sum});")
    );
}

#[test]
fn test_or_of_indicators_and_counts() {
    let mut model = FznModel::new();
    model.add_variable_array("a", FznType::Bool, 3, false, true);
    let or = model.or_of_indicators("a");
    assert_eq!(or, "a_OR");
    assert_eq!(model.or_of_indicators("a"), or);
    model.exactly_one("a", 3);
    model.at_most_one("a", 3);
    model.at_least_one("a", 3);
    let text: Vec<String> = model.constraints().iter().map(|c| c.to_string()).collect();
    assert_eq!(
        text,
        vec![
            "constraint array_bool_or(a, a_OR) :: defines_var(a_OR);",
            "constraint bool_lin_eq([1, 1, 1], a, 1);",
            "constraint bool_lin_le([1, 1, 1], a, 1);",
            "constraint bool_lin_le([-1, -1, -1], a, -1);",
        ]
    );
}

#[test]
fn test_shifted_selector() {
    let mut model = model_with_int_array(2);
    let idx = model.shifted_selector("x", 2);
    assert_eq!(idx, "x_idx");
    assert_eq!(model.declared_type(&idx), Some(FznType::Range(1, 6)));
    assert_eq!(
        model.constraints()[0].to_string(),
        "constraint int_lin_eq([1, 1, -1], [x[1], 1, x_idx[1]], 0) :: defines_var(x_idx[1]);"
    );
    assert_eq!(model.shifted_selector("x", 2), idx);
    assert_eq!(model.constraint_count(), 2);
}
