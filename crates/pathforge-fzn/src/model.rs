//! The in-memory FlatZinc model.
//!
//! A model is written once and then serialized. Declarations keep their
//! insertion order, so a variable may be assigned from variables declared
//! before it, and constraints are dumped exactly in the order they were added.

use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use indexmap::IndexMap;

use crate::error::Result;
use crate::macros::Relation;
use crate::types::{Annotation, Annotations, FznType, Predicate, SolveGoal};

/// A named constant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub ty: FznType,
    pub size: usize,
    pub is_array: bool,
    pub assignment: String,
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_array {
            write!(f, "array [1..{}] of ", self.size)?;
        }
        write!(f, "{}: {} = {};", self.ty, self.name, self.assignment)
    }
}

/// A named decision variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    pub name: String,
    pub ty: FznType,
    pub size: usize,
    pub is_array: bool,
    pub assignment: Option<String>,
    pub annotations: Vec<Annotation>,
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_array {
            write!(f, "array [1..{}] of ", self.size)?;
        }
        write!(
            f,
            "var {}: {}{}",
            self.ty,
            self.name,
            Annotations(&self.annotations)
        )?;
        if let Some(assignment) = &self.assignment {
            write!(f, " = {assignment}")?;
        }
        write!(f, ";")
    }
}

/// A predicate call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    pub predicate: Predicate,
    pub args: Vec<String>,
    pub annotations: Vec<Annotation>,
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "constraint {}({}){};",
            self.predicate,
            self.args.join(", "),
            Annotations(&self.annotations)
        )
    }
}

/// The single solve item of a model.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SolveItem {
    pub goal: SolveGoal,
    pub expr: String,
    pub annotations: Vec<Annotation>,
}

impl fmt::Display for SolveItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "solve{} {}", Annotations(&self.annotations), self.goal)?;
        if !self.expr.is_empty() {
            write!(f, " {}", self.expr)?;
        }
        write!(f, ";")
    }
}

/// A flat constraint model.
///
/// Not meant to be shared between planning attempts; build a fresh model for
/// each one.
#[derive(Debug, Clone, Default)]
pub struct FznModel {
    header_comments: Vec<String>,
    params: IndexMap<String, Param>,
    variables: IndexMap<String, Variable>,
    constraints: Vec<Constraint>,
    solve: SolveItem,
    pub(crate) memo: HashMap<Relation, String>,
}

impl FznModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a `% ...` line at the top of the dumped model.
    pub fn add_header_comment(&mut self, line: impl Into<String>) {
        self.header_comments.push(line.into());
    }

    /// Declares a parameter; `count == 1` is a scalar, larger counts an array.
    pub fn add_param(
        &mut self,
        count: usize,
        name: impl Into<String>,
        ty: FznType,
        assignment: impl Into<String>,
    ) {
        let name = name.into();
        self.params.insert(
            name.clone(),
            Param {
                name,
                ty,
                size: count,
                is_array: count != 1,
                assignment: assignment.into(),
            },
        );
    }

    /// Declares a parameter array, even when it has a single element.
    pub fn add_param_array(
        &mut self,
        name: impl Into<String>,
        ty: FznType,
        size: usize,
        assignment: impl Into<String>,
    ) {
        let name = name.into();
        self.params.insert(
            name.clone(),
            Param {
                name,
                ty,
                size,
                is_array: true,
                assignment: assignment.into(),
            },
        );
    }

    /// Declares a variable; `count == 1` is a scalar, larger counts an array.
    pub fn add_variable(
        &mut self,
        count: usize,
        name: impl Into<String>,
        ty: FznType,
        assignment: Option<String>,
        annotations: Vec<Annotation>,
    ) {
        let name = name.into();
        self.variables.insert(
            name.clone(),
            Variable {
                name,
                ty,
                size: count,
                is_array: count != 1,
                assignment,
                annotations,
            },
        );
    }

    /// Declares a variable array of `size` elements.
    ///
    /// `defined` marks it as functionally defined by constraints, `output`
    /// asks the solver to report it.
    pub fn add_variable_array(
        &mut self,
        name: impl Into<String>,
        ty: FznType,
        size: usize,
        defined: bool,
        output: bool,
    ) {
        let mut annotations = Vec::new();
        if defined {
            annotations.push(Annotation::IsDefinedVar);
        }
        if output {
            annotations.push(Annotation::OutputArray(size));
        }
        let name = name.into();
        self.variables.insert(
            name.clone(),
            Variable {
                name,
                ty,
                size,
                is_array: true,
                assignment: None,
                annotations,
            },
        );
    }

    /// Declares a scalar variable.
    pub fn add_scalar_variable(
        &mut self,
        name: impl Into<String>,
        ty: FznType,
        defined: bool,
        output: bool,
    ) {
        let mut annotations = Vec::new();
        if defined {
            annotations.push(Annotation::IsDefinedVar);
        }
        if output {
            annotations.push(Annotation::OutputVar);
        }
        self.add_variable(1, name, ty, None, annotations);
    }

    /// Sets the assignment of a declared parameter or variable.
    ///
    /// Returns false if no declaration has that name.
    pub fn set_assignment(&mut self, name: &str, assignment: impl Into<String>) -> bool {
        let assignment = assignment.into();
        if let Some(param) = self.params.get_mut(name) {
            param.assignment = assignment;
            true
        } else if let Some(variable) = self.variables.get_mut(name) {
            variable.assignment = Some(assignment);
            true
        } else {
            false
        }
    }

    /// Appends a constraint; constraints are never reordered or deduplicated.
    pub fn add_constraint(
        &mut self,
        predicate: Predicate,
        args: Vec<String>,
        annotations: Vec<Annotation>,
    ) {
        self.constraints.push(Constraint {
            predicate,
            args,
            annotations,
        });
    }

    /// Sets the solve item, replacing any previous one.
    pub fn set_solve_target(
        &mut self,
        goal: SolveGoal,
        expr: impl Into<String>,
        annotations: Vec<Annotation>,
    ) {
        self.solve = SolveItem {
            goal,
            expr: expr.into(),
            annotations,
        };
    }

    pub fn param(&self, name: &str) -> Option<&Param> {
        self.params.get(name)
    }

    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.variables.get(name)
    }

    /// True if a parameter or variable with this name is declared.
    pub fn is_declared(&self, name: &str) -> bool {
        self.params.contains_key(name) || self.variables.contains_key(name)
    }

    /// Type of a declared parameter or variable.
    pub fn declared_type(&self, name: &str) -> Option<FznType> {
        self.params
            .get(name)
            .map(|p| p.ty)
            .or_else(|| self.variables.get(name).map(|v| v.ty))
    }

    /// Size of a declared parameter or variable, 0 if undeclared.
    pub fn declared_size(&self, name: &str) -> usize {
        self.params
            .get(name)
            .map(|p| p.size)
            .or_else(|| self.variables.get(name).map(|v| v.size))
            .unwrap_or(0)
    }

    pub fn params(&self) -> impl Iterator<Item = &Param> {
        self.params.values()
    }

    pub fn variables(&self) -> impl Iterator<Item = &Variable> {
        self.variables.values()
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn solve_item(&self) -> &SolveItem {
        &self.solve
    }

    pub fn header_comments(&self) -> &[String] {
        &self.header_comments
    }

    pub fn param_count(&self) -> usize {
        self.params.len()
    }

    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    /// Writes the model in FlatZinc syntax.
    ///
    /// Header comments (followed by a blank line), parameters, a blank line,
    /// variables, a blank line, constraints, a blank line, the solve item.
    pub fn write_to<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        if !self.header_comments.is_empty() {
            for line in &self.header_comments {
                writeln!(out, "% {line}")?;
            }
            writeln!(out)?;
        }
        for param in self.params.values() {
            writeln!(out, "{param}")?;
        }
        writeln!(out)?;
        for variable in self.variables.values() {
            writeln!(out, "{variable}")?;
        }
        writeln!(out)?;
        for constraint in &self.constraints {
            writeln!(out, "{constraint}")?;
        }
        writeln!(out)?;
        writeln!(out, "{}", self.solve)
    }

    /// The model as FlatZinc text.
    pub fn to_fzn_string(&self) -> String {
        let mut buf = Vec::new();
        // writing into a Vec cannot fail
        let _ = self.write_to(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }

    /// Writes the model to `path`, creating or truncating the file.
    pub fn dump(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let mut out = BufWriter::new(File::create(path)?);
        self.write_to(&mut out)?;
        out.flush()?;
        tracing::debug!(
            event = "model_dumped",
            path = %path.display(),
            params = self.params.len(),
            variables = self.variables.len(),
            constraints = self.constraints.len(),
        );
        Ok(())
    }
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
