//! Output of policy evaluation: deploy decisions, restrictions and goals.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::infrastructure::{parse_numeric, AttributeManager, Cluster, RangeType, StorageAccount};
use super::module::Module;

/// Capability type whose restrictions apply to governance actions.
pub const TRANSFORM_CAPABILITY: &str = "transform";

/// Whether a capability must, may, or must not be deployed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeployStatus {
    /// At least one position on the path must use the capability.
    True,
    /// The capability must never be deployed.
    False,
    /// No requirement either way.
    #[default]
    Unknown,
}

/// A restriction on a single property of a resource.
///
/// The property is either an infrastructure attribute of the instance or a
/// dotted path into the serialized resource (`capabilities.scope`,
/// `properties.tier`). Array elements are addressed by their index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Restriction {
    pub property: String,
    /// Allowed values; ignored when `range` is set.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,
    /// Allowed numeric range; a zero bound is not enforced.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<RangeType>,
}

impl Restriction {
    pub fn values<I, S>(property: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            property: property.into(),
            values: values.into_iter().map(Into::into).collect(),
            range: None,
        }
    }

    pub fn range(property: impl Into<String>, min: i64, max: i64) -> Self {
        Self {
            property: property.into(),
            values: Vec::new(),
            range: Some(RangeType::new(min, max)),
        }
    }

    /// Rewrites a `capabilities.` property so it addresses one capability.
    pub fn scoped_to_capability(&self, capability_index: usize) -> Self {
        const PREFIX: &str = "capabilities.";
        let mut scoped = self.clone();
        if let Some(pos) = self.property.find(PREFIX) {
            let split = pos + PREFIX.len();
            scoped.property = format!(
                "{}{}.{}",
                &self.property[..split],
                capability_index,
                &self.property[split..]
            );
        }
        scoped
    }

    /// Returns true if `resource` (named `instance`) satisfies the restriction.
    ///
    /// A property that cannot be resolved never satisfies a restriction.
    pub fn satisfied_by<T: Serialize>(
        &self,
        attributes: &AttributeManager,
        resource: &T,
        instance: &str,
    ) -> bool {
        let value = match attributes.attribute_value(&self.property, instance) {
            Some(v) => Value::String(v.to_string()),
            None => {
                let Ok(serialized) = serde_json::to_value(resource) else {
                    return false;
                };
                match nested_field(&serialized, &self.property) {
                    Some(v) => v.clone(),
                    None => return false,
                }
            }
        };

        if let Some(range) = self.range {
            let numeric = match &value {
                Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
                Value::String(s) => parse_numeric(s),
                _ => None,
            };
            let Some(numeric) = numeric else {
                return false;
            };
            if range.max > 0 && numeric > range.max {
                return false;
            }
            if range.min > 0 && numeric < range.min {
                return false;
            }
            true
        } else if !self.values.is_empty() {
            let text = match &value {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                _ => return false,
            };
            self.values.iter().any(|v| *v == text)
        } else {
            true
        }
    }
}

fn nested_field<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = root;
    for field in path.split('.') {
        current = match current {
            Value::Object(map) => map.get(field)?,
            Value::Array(items) => items.get(field.parse::<usize>().ok()?)?,
            _ => return None,
        };
        if current.is_null() {
            return None;
        }
    }
    Some(current)
}

/// Restrictions on the resources a capability may be deployed with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Restrictions {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modules: Vec<Restriction>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub clusters: Vec<Restriction>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub storage_accounts: Vec<Restriction>,
}

impl Restrictions {
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty() && self.clusters.is_empty() && self.storage_accounts.is_empty()
    }

    /// Checks module restrictions against one capability of `module`.
    pub fn allows_module(
        &self,
        attributes: &AttributeManager,
        module: &Module,
        capability_index: usize,
    ) -> bool {
        self.modules.iter().all(|r| {
            r.scoped_to_capability(capability_index)
                .satisfied_by(attributes, module, &module.name)
        })
    }

    pub fn allows_cluster(&self, attributes: &AttributeManager, cluster: &Cluster) -> bool {
        self.clusters
            .iter()
            .all(|r| r.satisfied_by(attributes, cluster, &cluster.name))
    }

    pub fn allows_storage_account(
        &self,
        attributes: &AttributeManager,
        account: &StorageAccount,
    ) -> bool {
        self.storage_accounts
            .iter()
            .all(|r| r.satisfied_by(attributes, account, &account.name))
    }
}

/// Policy decision for one capability type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Decision {
    #[serde(default)]
    pub deploy: DeployStatus,
    #[serde(default, alias = "deploymentRestrictions")]
    pub restrictions: Restrictions,
}

impl Decision {
    pub fn new(deploy: DeployStatus) -> Self {
        Self {
            deploy,
            restrictions: Restrictions::default(),
        }
    }

    pub fn with_restrictions(mut self, restrictions: Restrictions) -> Self {
        self.restrictions = restrictions;
        self
    }
}

/// Direction of an optimization goal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OptimizationDirective {
    #[default]
    #[serde(alias = "minimize")]
    Min,
    #[serde(alias = "maximize")]
    Max,
}

/// One term of the optimization strategy.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AttributeOptimization {
    /// Name of an infrastructure attribute.
    pub attribute: String,
    #[serde(default)]
    pub directive: OptimizationDirective,
    /// Relative weight; 1.0 when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

impl AttributeOptimization {
    pub fn new(attribute: impl Into<String>, directive: OptimizationDirective) -> Self {
        Self {
            attribute: attribute.into(),
            directive,
            weight: None,
        }
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    /// Integer weight of the goal in a minimized objective.
    ///
    /// Weights are scaled by 100; maximized goals get a negative weight.
    pub fn signed_weight(&self) -> i64 {
        let scaled = (self.weight.unwrap_or(1.0) * 100.0) as i64;
        match self.directive {
            OptimizationDirective::Min => scaled,
            OptimizationDirective::Max => -scaled,
        }
    }
}

/// Deploy decisions per capability type, plus the optimization strategy.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyEvaluation {
    #[serde(default, alias = "configDecisions")]
    pub decisions: BTreeMap<String, Decision>,
    #[serde(default)]
    pub optimization_strategy: Vec<AttributeOptimization>,
}

impl PolicyEvaluation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_decision(mut self, capability: impl Into<String>, decision: Decision) -> Self {
        self.decisions.insert(capability.into(), decision);
        self
    }

    pub fn with_goal(mut self, goal: AttributeOptimization) -> Self {
        self.optimization_strategy.push(goal);
        self
    }

    /// Decision for `capability`, if policy made one.
    pub fn decision(&self, capability: &str) -> Option<&Decision> {
        self.decisions.get(capability)
    }
}
