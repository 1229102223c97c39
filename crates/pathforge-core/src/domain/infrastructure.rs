//! Clusters, storage accounts and infrastructure attributes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{PathForgeError, Result};

/// Attribute values are normalized to `0..=NORMALIZATION_FACTOR`.
pub const NORMALIZATION_FACTOR: i64 = 100;

/// A cluster a module instance can be deployed on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Cluster {
    pub name: String,
    #[serde(default)]
    pub region: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, String>,
}

impl Cluster {
    pub fn new(name: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            region: region.into(),
            properties: BTreeMap::new(),
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }
}

/// Storage that can be allocated for intermediate copies of the data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct StorageAccount {
    pub name: String,
    pub region: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub endpoint: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, String>,
}

impl StorageAccount {
    pub fn new(name: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            region: region.into(),
            ..Self::default()
        }
    }
}

/// Kind of resource an infrastructure attribute describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InstanceType {
    Module,
    Cluster,
    StorageAccount,
    /// Defined over a pair of regions, e.g. bandwidth.
    InterRegion,
}

/// Numeric range; a bound of zero is treated as "unbounded" by restrictions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct RangeType {
    #[serde(default)]
    pub min: i64,
    #[serde(default)]
    pub max: i64,
}

impl RangeType {
    pub fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }
}

/// Measurement metric with the scale used for normalization.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Metric {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub units: String,
    #[serde(default)]
    pub scale: Option<RangeType>,
}

impl Metric {
    pub fn new(name: impl Into<String>, scale: RangeType) -> Self {
        Self {
            name: name.into(),
            units: String::new(),
            scale: Some(scale),
        }
    }
}

/// A single infrastructure fact, e.g. "cluster `east` costs 56".
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InfrastructureAttribute {
    pub attribute: String,
    #[serde(default)]
    pub metric_name: String,
    pub value: String,
    pub object: InstanceType,
    /// Instance name (cluster, module or storage account).
    #[serde(default)]
    pub instance: String,
    /// Region pair for inter-region attributes.
    #[serde(default)]
    pub arguments: Vec<String>,
}

impl InfrastructureAttribute {
    /// Attribute of a single named instance.
    pub fn for_instance(
        attribute: impl Into<String>,
        metric_name: impl Into<String>,
        value: impl ToString,
        object: InstanceType,
        instance: impl Into<String>,
    ) -> Self {
        Self {
            attribute: attribute.into(),
            metric_name: metric_name.into(),
            value: value.to_string(),
            object,
            instance: instance.into(),
            arguments: Vec::new(),
        }
    }

    /// Attribute of a region pair (order-insensitive).
    pub fn between_regions(
        attribute: impl Into<String>,
        metric_name: impl Into<String>,
        value: impl ToString,
        region1: impl Into<String>,
        region2: impl Into<String>,
    ) -> Self {
        Self {
            attribute: attribute.into(),
            metric_name: metric_name.into(),
            value: value.to_string(),
            object: InstanceType::InterRegion,
            instance: String::new(),
            arguments: vec![region1.into(), region2.into()],
        }
    }
}

/// Read-only access to infrastructure attributes and their metrics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct AttributeManager {
    #[serde(default)]
    pub attributes: Vec<InfrastructureAttribute>,
    #[serde(default)]
    pub metrics: Vec<Metric>,
}

impl AttributeManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses the `{ "attributes": [...], "metrics": [...] }` JSON document.
    pub fn from_json_str(s: &str) -> Result<Self> {
        serde_json::from_str(s)
            .map_err(|e| PathForgeError::Attribute(format!("could not parse infrastructure json: {e}")))
    }

    pub fn with_metric(mut self, metric: Metric) -> Self {
        self.metrics.push(metric);
        self
    }

    pub fn with_attribute(mut self, attribute: InfrastructureAttribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Finds the attribute `name` defined for `instance`.
    pub fn attribute(&self, name: &str, instance: &str) -> Option<&InfrastructureAttribute> {
        self.attributes
            .iter()
            .find(|a| a.attribute == name && a.instance == instance)
    }

    /// Raw value of the attribute `name` defined for `instance`.
    pub fn attribute_value(&self, name: &str, instance: &str) -> Option<&str> {
        self.attribute(name, instance).map(|a| a.value.as_str())
    }

    /// Finds the attribute `name` defined between two regions, in either order.
    pub fn attribute_between(
        &self,
        name: &str,
        region1: &str,
        region2: &str,
    ) -> Option<&InfrastructureAttribute> {
        self.attributes.iter().find(|a| {
            a.attribute == name
                && a.arguments.len() == 2
                && ((a.arguments[0] == region1 && a.arguments[1] == region2)
                    || (a.arguments[0] == region2 && a.arguments[1] == region1))
        })
    }

    /// Distinct instance types the attribute is defined for, in order of appearance.
    pub fn instance_types(&self, name: &str) -> Vec<InstanceType> {
        let mut types = Vec::new();
        for attribute in self.attributes.iter().filter(|a| a.attribute == name) {
            if !types.contains(&attribute.object) {
                types.push(attribute.object);
            }
        }
        types
    }

    /// Value of `name` for `instance`, normalized to its metric scale.
    pub fn normalized_value(&self, name: &str, instance: &str) -> Result<i64> {
        let attribute = self.attribute(name, instance).ok_or_else(|| {
            PathForgeError::Attribute(format!(
                "attribute {name} is not defined for instance {instance}"
            ))
        })?;
        self.normalize(attribute)
            .map_err(|e| PathForgeError::Attribute(format!("{e} (instance {instance})")))
    }

    /// Value of `name` between two regions, normalized to its metric scale.
    pub fn normalized_value_between(&self, name: &str, region1: &str, region2: &str) -> Result<i64> {
        let attribute = self.attribute_between(name, region1, region2).ok_or_else(|| {
            PathForgeError::Attribute(format!(
                "attribute {name} is not defined for regions {region1} and {region2}"
            ))
        })?;
        self.normalize(attribute).map_err(|e| {
            PathForgeError::Attribute(format!("{e} (regions {region1} and {region2})"))
        })
    }

    fn normalize(&self, attribute: &InfrastructureAttribute) -> std::result::Result<i64, String> {
        let metric = self
            .metrics
            .iter()
            .find(|m| m.name == attribute.metric_name)
            .ok_or_else(|| {
                format!(
                    "undefined metric {} for attribute {}",
                    attribute.metric_name, attribute.attribute
                )
            })?;
        let scale = metric
            .scale
            .ok_or_else(|| format!("metric {} has no scale", metric.name))?;
        if scale.max <= scale.min {
            return Err(format!("metric {} has an empty scale", metric.name));
        }
        let value = parse_numeric(&attribute.value).ok_or_else(|| {
            format!(
                "bad {} attribute value ({})",
                attribute.attribute, attribute.value
            )
        })?;
        Ok((value - scale.min) * NORMALIZATION_FACTOR / (scale.max - scale.min))
    }
}

/// Parses an integer, accepting (and truncating) decimal notation.
pub(crate) fn parse_numeric(value: &str) -> Option<i64> {
    let value = value.trim();
    value
        .parse::<i64>()
        .ok()
        .or_else(|| value.parse::<f64>().ok().filter(|v| v.is_finite()).map(|v| v as i64))
}
