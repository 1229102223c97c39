//! The solution graph returned by the optimizer.

use std::fmt;
use std::ops::Deref;

use serde::Serialize;

use crate::domain::{Action, Interface, Module, StorageAccount};

/// An access point on the path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Node {
    /// Physical connection; `None` for the empty interface.
    pub connection: Option<Interface>,
    /// True when the data is served through an API instead of stored.
    pub is_virtual: bool,
}

impl Node {
    pub fn new(connection: Option<Interface>, is_virtual: bool) -> Self {
        Self {
            connection,
            is_virtual,
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.connection {
            Some(c) if self.is_virtual => write!(f, "{c} (virtual)"),
            Some(c) => write!(f, "{c}"),
            None => write!(f, "<none>"),
        }
    }
}

/// One hop of the path: a module capability between two nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Edge {
    pub source: Node,
    pub sink: Node,
    pub module: Module,
    /// Index into `module.capabilities`.
    pub capability_index: usize,
}

/// An edge with its placement and assigned work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedEdge {
    #[serde(flatten)]
    pub edge: Edge,
    /// Name of the cluster the module runs on.
    pub cluster: String,
    /// Governance actions the module applies.
    pub actions: Vec<Action>,
    /// Storage allocated for the hop's output.
    pub storage_account: Option<StorageAccount>,
}

impl Deref for ResolvedEdge {
    type Target = Edge;

    fn deref(&self) -> &Edge {
        &self.edge
    }
}

impl fmt::Display for ResolvedEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let capability = self
            .module
            .capabilities
            .get(self.capability_index)
            .map(|c| c.capability.as_str())
            .unwrap_or("?");
        write!(
            f,
            "{} -> {} : {}[{}] ({}) on {}",
            self.source, self.sink, self.module.name, self.capability_index, capability, self.cluster
        )?;
        if !self.actions.is_empty() {
            let names: Vec<&str> = self.actions.iter().map(|a| a.name.as_str()).collect();
            write!(f, " actions=[{}]", names.join(", "))?;
        }
        if let Some(account) = &self.storage_account {
            write!(f, " storage={}", account.name)?;
        }
        Ok(())
    }
}

/// Ordered path from the data set to the workload.
///
/// An empty solution means no path exists at the attempted length.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Solution {
    pub data_path: Vec<ResolvedEdge>,
}

impl Solution {
    pub fn new(data_path: Vec<ResolvedEdge>) -> Self {
        Self { data_path }
    }

    pub fn len(&self) -> usize {
        self.data_path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data_path.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ResolvedEdge> {
        self.data_path.iter()
    }

    /// Returns the path in reverse order (used for write flows).
    pub fn reversed(mut self) -> Self {
        self.data_path.reverse();
        self
    }
}

impl<'a> IntoIterator for &'a Solution {
    type Item = &'a ResolvedEdge;
    type IntoIter = std::slice::Iter<'a, ResolvedEdge>;

    fn into_iter(self) -> Self::IntoIter {
        self.data_path.iter()
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "<empty path>");
        }
        for (pos, edge) in self.data_path.iter().enumerate() {
            if pos > 0 {
                writeln!(f)?;
            }
            write!(f, "{}. {}", pos + 1, edge)?;
        }
        Ok(())
    }
}
