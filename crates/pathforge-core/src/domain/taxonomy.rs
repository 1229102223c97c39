//! Taxonomy primitives shared by modules, data sets and workloads.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A data interface: how data is accessed and in which format.
///
/// The default value (empty protocol and format) stands for "no interface".
///
/// # Example
///
/// ```
/// use pathforge_core::Interface;
///
/// let any_s3 = Interface::new("s3", "");
/// let s3_csv = Interface::new("s3", "csv");
///
/// assert!(any_s3.accepts(&s3_csv));
/// assert!(!s3_csv.accepts(&Interface::new("s3", "parquet")));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Interface {
    /// Connection protocol, e.g. `s3` or `arrow-flight`.
    pub protocol: String,
    /// Data format; empty means "any format" on the module side.
    #[serde(default)]
    pub data_format: String,
}

impl Interface {
    pub fn new(protocol: impl Into<String>, data_format: impl Into<String>) -> Self {
        Self {
            protocol: protocol.into(),
            data_format: data_format.into(),
        }
    }

    /// Returns true if this is the empty interface.
    pub fn is_empty(&self) -> bool {
        self.protocol.is_empty() && self.data_format.is_empty()
    }

    /// Returns true if `other` can be consumed through this (module-side) interface.
    ///
    /// Protocols must be equal; an empty data format on `self` accepts any format.
    pub fn accepts(&self, other: &Interface) -> bool {
        self.protocol == other.protocol
            && (self.data_format.is_empty() || self.data_format == other.data_format)
    }
}

impl fmt::Display for Interface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            write!(f, "<none>")
        } else if self.data_format.is_empty() {
            write!(f, "{}", self.protocol)
        } else {
            write!(f, "{}/{}", self.protocol, self.data_format)
        }
    }
}

/// A governance action to be applied to the data, e.g. `RedactColumn`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
pub struct Action {
    /// Action name, as declared by modules that support it.
    pub name: String,
    /// Action arguments, passed through to the deployed module.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, String>,
}

impl Action {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: BTreeMap::new(),
        }
    }

    /// Adds an argument to the action.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }
}

/// Direction of the requested data flow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DataFlow {
    /// The workload reads from the data set.
    #[default]
    Read,
    /// The workload writes to the data set.
    Write,
}
