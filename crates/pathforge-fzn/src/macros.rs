//! Higher-level constraints compiled into indicator variables.
//!
//! FlatZinc has no conditionals, so every "if/then" is expressed through
//! boolean indicator arrays (one element per path position) and linear or
//! reified constraints. Each macro is memoized by the relation it encodes:
//! asking for the same relation twice returns the existing variable and adds
//! no constraints.

use crate::literal::{array_literal, repeated, set_literal, var_at_pos, var_positions};
use crate::model::FznModel;
use crate::types::{Annotation, FznType, Predicate, FALSE, TRUE};

/// Canonical key of a memoized relation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum Relation {
    Equality { var: String, value: i64, equal: bool },
    Not { var: String },
    ImpliedBy { var: String, negated: bool },
    SetIn { var: String, values: Vec<i64> },
    Or { array: String },
    Sum { target: String },
    Selected { target: String, selector: String },
    Shifted { var: String },
}

fn value_token(value: i64) -> String {
    if value < 0 {
        format!("m{}", value.unsigned_abs())
    } else {
        value.to_string()
    }
}

impl FznModel {
    fn memoized(&self, relation: &Relation) -> Option<String> {
        self.memo.get(relation).cloned()
    }

    fn remember(&mut self, relation: Relation, name: &str) {
        self.memo.insert(relation, name.to_string());
    }

    /// Indicator array true where `var` equals `value` (or differs from it,
    /// when `equal` is false).
    pub fn equality_indicator(&mut self, var: &str, value: i64, len: usize, equal: bool) -> String {
        let relation = Relation::Equality {
            var: var.to_string(),
            value,
            equal,
        };
        if let Some(name) = self.memoized(&relation) {
            return name;
        }
        let predicate = if equal {
            Predicate::IntEqReif
        } else {
            Predicate::IntNeReif
        };
        let indicator = format!("ind_{var}_{}_{}", predicate, value_token(value));
        self.add_variable_array(&indicator, FznType::Bool, len, true, false);
        for pos in 1..=len {
            let ind_at_pos = var_at_pos(&indicator, pos);
            self.add_constraint(
                predicate.clone(),
                vec![var_at_pos(var, pos), value.to_string(), ind_at_pos.clone()],
                vec![Annotation::DefinesVar(ind_at_pos)],
            );
        }
        self.remember(relation, &indicator);
        indicator
    }

    /// Indicator array true where the boolean array `var` is false.
    pub fn bool_not_indicator(&mut self, var: &str, len: usize) -> String {
        let relation = Relation::Not {
            var: var.to_string(),
        };
        if let Some(name) = self.memoized(&relation) {
            return name;
        }
        let indicator = format!("ind_not_{var}");
        self.add_variable_array(&indicator, FznType::Bool, len, true, false);
        for pos in 1..=len {
            let ind_at_pos = var_at_pos(&indicator, pos);
            self.add_constraint(
                Predicate::BoolNot,
                vec![var_at_pos(var, pos), ind_at_pos.clone()],
                vec![Annotation::DefinesVar(ind_at_pos)],
            );
        }
        self.remember(relation, &indicator);
        indicator
    }

    /// Indicator array that is true wherever `var` is true (or false, when
    /// `negated`).
    ///
    /// Uses `var <= ind` directly, and `var \/ ind` for the negated form.
    pub fn implied_by_indicator(&mut self, var: &str, len: usize, negated: bool) -> String {
        let relation = Relation::ImpliedBy {
            var: var.to_string(),
            negated,
        };
        if let Some(name) = self.memoized(&relation) {
            return name;
        }
        let indicator = if negated {
            format!("ind_implied_by_not_{var}")
        } else {
            format!("ind_implied_by_{var}")
        };
        self.add_variable_array(&indicator, FznType::Bool, len, true, false);
        for pos in 1..=len {
            let var_pos = var_at_pos(var, pos);
            let ind_at_pos = var_at_pos(&indicator, pos);
            let annotations = vec![Annotation::DefinesVar(ind_at_pos.clone())];
            if negated {
                self.add_constraint(
                    Predicate::ArrayBoolOr,
                    vec![array_literal([var_pos, ind_at_pos]), TRUE.to_string()],
                    annotations,
                );
            } else {
                self.add_constraint(Predicate::BoolLe, vec![var_pos, ind_at_pos], annotations);
            }
        }
        self.remember(relation, &indicator);
        indicator
    }

    /// Indicator array true where `var` takes one of `values`.
    ///
    /// An empty set yields an indicator that is false everywhere.
    pub fn set_in_indicator(&mut self, var: &str, values: &[i64], len: usize) -> String {
        let mut canonical = values.to_vec();
        canonical.sort_unstable();
        canonical.dedup();
        let relation = Relation::SetIn {
            var: var.to_string(),
            values: canonical.clone(),
        };
        if let Some(name) = self.memoized(&relation) {
            return name;
        }
        let tokens: Vec<String> = canonical.iter().map(|v| value_token(*v)).collect();
        let indicator = if tokens.is_empty() {
            format!("ind_{var}_in_empty")
        } else {
            format!("ind_{var}_in_{}", tokens.join("_"))
        };
        self.add_variable_array(&indicator, FznType::Bool, len, true, false);
        if canonical.is_empty() {
            self.add_constraint(
                Predicate::ArrayBoolOr,
                vec![indicator.clone(), FALSE.to_string()],
                Vec::new(),
            );
        } else {
            let set = set_literal(canonical.iter().map(|v| v.to_string()));
            for pos in 1..=len {
                let ind_at_pos = var_at_pos(&indicator, pos);
                self.add_constraint(
                    Predicate::SetInReif,
                    vec![var_at_pos(var, pos), set.clone(), ind_at_pos.clone()],
                    vec![Annotation::DefinesVar(ind_at_pos)],
                );
            }
        }
        self.remember(relation, &indicator);
        indicator
    }

    /// Scalar boolean holding the OR of all elements of `array`.
    pub fn or_of_indicators(&mut self, array: &str) -> String {
        let relation = Relation::Or {
            array: array.to_string(),
        };
        if let Some(name) = self.memoized(&relation) {
            return name;
        }
        let or_var = format!("{array}_OR");
        self.add_scalar_variable(&or_var, FznType::Bool, true, false);
        self.add_constraint(
            Predicate::ArrayBoolOr,
            vec![array.to_string(), or_var.clone()],
            vec![Annotation::DefinesVar(or_var.clone())],
        );
        self.remember(relation, &or_var);
        or_var
    }

    /// Forbids, at every position, the combination where each variable takes
    /// its paired value.
    ///
    /// Boolean variables are considered "false" for value 0 and "true" for
    /// any other value.
    pub fn prevent_assignments(&mut self, assignments: &[(&str, i64)], len: usize) {
        let mut indicators = Vec::with_capacity(assignments.len());
        for &(var, value) in assignments {
            let is_bool = self.declared_type(var).is_some_and(|t| t.is_bool());
            let indicator = if is_bool && value == 0 {
                var.to_string()
            } else if is_bool {
                self.bool_not_indicator(var, len)
            } else {
                self.equality_indicator(var, value, len, false)
            };
            indicators.push(indicator);
        }
        for pos in 1..=len {
            let clause = array_literal(indicators.iter().map(|ind| var_at_pos(ind, pos)));
            self.add_constraint(
                Predicate::ArrayBoolOr,
                vec![clause, TRUE.to_string()],
                Vec::new(),
            );
        }
    }

    /// Constrains `target[i]` to `if_true[i]` where `selector[i]` holds and
    /// to `if_false[i]` elsewhere.
    pub fn assign_with_selector(
        &mut self,
        target: &str,
        selector: &str,
        if_true: &[String],
        if_false: &[String],
        len: usize,
    ) {
        let relation = Relation::Selected {
            target: target.to_string(),
            selector: selector.to_string(),
        };
        if self.memoized(&relation).is_some() {
            return;
        }
        let when_true = self.implied_by_indicator(selector, len, false);
        let when_false = self.implied_by_indicator(selector, len, true);
        for pos in 1..=len {
            let target_at_pos = var_at_pos(target, pos);
            if let Some(value) = if_true.get(pos - 1) {
                self.add_constraint(
                    Predicate::IntEqReif,
                    vec![target_at_pos.clone(), value.clone(), var_at_pos(&when_true, pos)],
                    Vec::new(),
                );
            }
            if let Some(value) = if_false.get(pos - 1) {
                self.add_constraint(
                    Predicate::IntEqReif,
                    vec![target_at_pos, value.clone(), var_at_pos(&when_false, pos)],
                    Vec::new(),
                );
            }
        }
        self.remember(relation, target);
    }

    /// Constrains the declared integer `target` to `sum(weights[i] * terms[i])`.
    ///
    /// Encoded as `int_lin_eq(weights ++ [-1], terms ++ [target], 0)`. Terms
    /// may be variables or integer literals. Returns false if `target` was
    /// already constrained as a sum.
    pub fn constrain_weighted_sum(&mut self, target: &str, terms: &[String], weights: &[i64]) -> bool {
        let relation = Relation::Sum {
            target: target.to_string(),
        };
        if self.memoized(&relation).is_some() {
            return false;
        }
        let mut coefficients: Vec<String> = weights.iter().map(|w| w.to_string()).collect();
        coefficients.push("-1".to_string());
        let mut vars = terms.to_vec();
        vars.push(target.to_string());
        self.add_constraint(
            Predicate::IntLinEq,
            vec![array_literal(coefficients), array_literal(vars), "0".to_string()],
            vec![Annotation::DefinesVar(target.to_string())],
        );
        self.remember(relation, target);
        true
    }

    /// Declares `name` as a defined integer equal to a weighted sum of terms.
    pub fn weighted_sum(
        &mut self,
        name: &str,
        terms: &[String],
        weights: &[i64],
        output: bool,
    ) -> String {
        if !self.is_declared(name) {
            self.add_scalar_variable(name, FznType::Int, true, output);
        }
        self.constrain_weighted_sum(name, terms, weights);
        name.to_string()
    }

    /// Declares `name` as the weighted sum of the elements of `array`.
    pub fn weighted_sum_of_var_array(&mut self, name: &str, array: &str, weights: &[i64]) -> String {
        let terms = var_positions(array, weights.len());
        self.weighted_sum(name, &terms, weights, false)
    }

    /// Declares `name` as the sum of all elements of `array`.
    pub fn sum_of_var_array(&mut self, name: &str, array: &str) -> String {
        let weights = vec![1; self.declared_size(array)];
        self.weighted_sum_of_var_array(name, array, &weights)
    }

    /// Array `<var>_idx` with `<var>_idx[i] = var[i] + 1`.
    ///
    /// Decision variables are 0-based while FlatZinc element constraints index
    /// from 1; lookups go through this shifted copy.
    pub fn shifted_selector(&mut self, var: &str, len: usize) -> String {
        let relation = Relation::Shifted {
            var: var.to_string(),
        };
        if let Some(name) = self.memoized(&relation) {
            return name;
        }
        let shifted = format!("{var}_idx");
        let ty = self
            .declared_type(var)
            .map(|t| t.shifted(1))
            .unwrap_or(FznType::Int);
        self.add_variable_array(&shifted, ty, len, true, false);
        for pos in 1..=len {
            self.constrain_weighted_sum(
                &var_at_pos(&shifted, pos),
                &[var_at_pos(var, pos), "1".to_string()],
                &[1, 1],
            );
        }
        self.remember(relation, &shifted);
        shifted
    }

    /// Requires exactly one element of the boolean array to be true.
    pub fn exactly_one(&mut self, array: &str, len: usize) {
        self.add_constraint(
            Predicate::BoolLinEq,
            vec![array_literal(repeated(1, len)), array.to_string(), "1".to_string()],
            Vec::new(),
        );
    }

    /// Requires at most one element of the boolean array to be true.
    pub fn at_most_one(&mut self, array: &str, len: usize) {
        self.add_constraint(
            Predicate::BoolLinLe,
            vec![array_literal(repeated(1, len)), array.to_string(), "1".to_string()],
            Vec::new(),
        );
    }

    /// Requires at least one element of the boolean array to be true.
    pub fn at_least_one(&mut self, array: &str, len: usize) {
        self.add_constraint(
            Predicate::BoolLinLe,
            vec![array_literal(repeated(-1, len)), array.to_string(), "-1".to_string()],
            Vec::new(),
        );
    }
}

#[cfg(test)]
#[path = "macros_tests.rs"]
mod tests;
