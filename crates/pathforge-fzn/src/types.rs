//! FlatZinc types, annotations, predicates and solve goals.

use std::fmt;

/// Boolean literal `true`.
pub const TRUE: &str = "true";
/// Boolean literal `false`.
pub const FALSE: &str = "false";

/// Domain type of a parameter or variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FznType {
    Bool,
    Int,
    Float,
    /// Bounded integer range `lo..hi`, both inclusive.
    Range(i64, i64),
}

impl FznType {
    /// Integer range `lo..hi`; an empty range is clamped to `lo..lo`.
    pub fn range(lo: i64, hi: i64) -> Self {
        FznType::Range(lo, hi.max(lo))
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, FznType::Bool)
    }

    /// The same type with range bounds moved by `offset`.
    pub fn shifted(&self, offset: i64) -> Self {
        match *self {
            FznType::Range(lo, hi) => FznType::Range(lo + offset, hi + offset),
            other => other,
        }
    }
}

impl fmt::Display for FznType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FznType::Bool => write!(f, "bool"),
            FznType::Int => write!(f, "int"),
            FznType::Float => write!(f, "float"),
            FznType::Range(lo, hi) => write!(f, "{lo}..{hi}"),
        }
    }
}

/// Solver annotation on a declaration, constraint or solve item.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Annotation {
    /// The variable is functionally defined by some constraint.
    IsDefinedVar,
    /// This constraint defines the named variable.
    DefinesVar(String),
    /// Report the scalar variable in the solution.
    OutputVar,
    /// Report the array variable (of the given size) in the solution.
    OutputArray(usize),
    Custom(String),
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Annotation::IsDefinedVar => write!(f, "is_defined_var"),
            Annotation::DefinesVar(var) => write!(f, "defines_var({var})"),
            Annotation::OutputVar => write!(f, "output_var"),
            Annotation::OutputArray(size) => write!(f, "output_array([1..{size}])"),
            Annotation::Custom(s) => write!(f, "{s}"),
        }
    }
}

/// Writes ` :: a :: b` for a list of annotations.
pub(crate) struct Annotations<'a>(pub &'a [Annotation]);

impl fmt::Display for Annotations<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for annotation in self.0 {
            write!(f, " :: {annotation}")?;
        }
        Ok(())
    }
}

/// Built-in FlatZinc predicates used by the planner.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Predicate {
    BoolLe,
    BoolLinEq,
    BoolLinLe,
    BoolNot,
    ArrayBoolOr,
    IntEq,
    IntEqReif,
    IntNeReif,
    IntLeReif,
    SetIn,
    SetInReif,
    IntLinEq,
    ArrayIntElement,
    ArrayVarIntElement,
    ArrayIntMaximum,
    Custom(String),
}

impl Predicate {
    pub fn name(&self) -> &str {
        match self {
            Predicate::BoolLe => "bool_le",
            Predicate::BoolLinEq => "bool_lin_eq",
            Predicate::BoolLinLe => "bool_lin_le",
            Predicate::BoolNot => "bool_not",
            Predicate::ArrayBoolOr => "array_bool_or",
            Predicate::IntEq => "int_eq",
            Predicate::IntEqReif => "int_eq_reif",
            Predicate::IntNeReif => "int_ne_reif",
            Predicate::IntLeReif => "int_le_reif",
            Predicate::SetIn => "set_in",
            Predicate::SetInReif => "set_in_reif",
            Predicate::IntLinEq => "int_lin_eq",
            Predicate::ArrayIntElement => "array_int_element",
            Predicate::ArrayVarIntElement => "array_var_int_element",
            Predicate::ArrayIntMaximum => "array_int_maximum",
            Predicate::Custom(name) => name,
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Goal of the solve item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SolveGoal {
    #[default]
    Satisfy,
    Minimize,
    Maximize,
}

impl fmt::Display for SolveGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveGoal::Satisfy => write!(f, "satisfy"),
            SolveGoal::Minimize => write!(f, "minimize"),
            SolveGoal::Maximize => write!(f, "maximize"),
        }
    }
}
