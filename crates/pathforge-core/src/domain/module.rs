//! Deployable modules and their capabilities.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::taxonomy::Interface;

/// A source/sink interface pair a capability can bridge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ModuleInOut {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<Interface>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sink: Option<Interface>,
}

impl ModuleInOut {
    pub fn new(source: Option<Interface>, sink: Option<Interface>) -> Self {
        Self { source, sink }
    }

    /// Shorthand for a pair with both ends set.
    pub fn between(source: Interface, sink: Interface) -> Self {
        Self {
            source: Some(source),
            sink: Some(sink),
        }
    }
}

/// One capability of a module, e.g. `read` or `copy`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleCapability {
    /// Capability type (`read`, `write`, `copy`, `transform`, ...).
    pub capability: String,
    /// Scope of the capability, e.g. `asset` or `workload`.
    #[serde(default)]
    pub scope: String,
    /// API the capability serves data through, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api: Option<Interface>,
    /// Physical interfaces the capability can read from and write to.
    #[serde(default)]
    pub supported_interfaces: Vec<ModuleInOut>,
    /// Names of governance actions the capability can apply.
    #[serde(default)]
    pub actions: Vec<String>,
}

impl ModuleCapability {
    pub fn new(capability: impl Into<String>) -> Self {
        Self {
            capability: capability.into(),
            scope: "asset".to_string(),
            ..Self::default()
        }
    }

    pub fn with_api(mut self, api: Interface) -> Self {
        self.api = Some(api);
        self
    }

    pub fn with_interfaces(mut self, interfaces: Vec<ModuleInOut>) -> Self {
        self.supported_interfaces = interfaces;
        self
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.actions.push(action.into());
        self
    }

    /// Returns true if the capability can apply the named action.
    pub fn supports_action(&self, name: &str) -> bool {
        self.actions.iter().any(|a| a == name)
    }

    /// Returns true if some supported pair declares a physical source.
    pub fn has_physical_source(&self) -> bool {
        self.supported_interfaces.iter().any(|io| io.source.is_some())
    }

    /// Returns true if some supported pair declares a physical sink.
    pub fn has_physical_sink(&self) -> bool {
        self.supported_interfaces.iter().any(|io| io.sink.is_some())
    }
}

/// A deployable module.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Module {
    pub name: String,
    #[serde(default)]
    pub capabilities: Vec<ModuleCapability>,
    /// Free-form properties, addressable by restrictions.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, String>,
}

impl Module {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_capability(mut self, capability: ModuleCapability) -> Self {
        self.capabilities.push(capability);
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }
}
