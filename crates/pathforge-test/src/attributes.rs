//! Infrastructure attribute fixtures.

use pathforge_core::{AttributeManager, InfrastructureAttribute, InstanceType, Metric, RangeType};

/// Costs for the clusters and storage accounts of
/// [`multi_cluster_problem`](crate::problems::multi_cluster_problem), plus
/// the bandwidth between its regions.
pub fn cost_attributes() -> AttributeManager {
    AttributeManager::new()
        .with_metric(Metric::new("cost", RangeType::new(0, 200)))
        .with_metric(Metric::new("bandwidth", RangeType::new(0, 1000)))
        .with_attribute(InfrastructureAttribute::for_instance(
            "cluster-cost",
            "cost",
            20,
            InstanceType::Cluster,
            "thegreendragon",
        ))
        .with_attribute(InfrastructureAttribute::for_instance(
            "cluster-cost",
            "cost",
            100,
            InstanceType::Cluster,
            "neverland-cluster",
        ))
        .with_attribute(InfrastructureAttribute::for_instance(
            "storage-cost",
            "cost",
            40,
            InstanceType::StorageAccount,
            "sa-theshire",
        ))
        .with_attribute(InfrastructureAttribute::for_instance(
            "storage-cost",
            "cost",
            80,
            InstanceType::StorageAccount,
            "sa-neverland",
        ))
        .with_attribute(InfrastructureAttribute::between_regions(
            "bandwidth", "bandwidth", 100, "theshire", "neverland",
        ))
        .with_attribute(InfrastructureAttribute::between_regions(
            "bandwidth", "bandwidth", 1000, "theshire", "theshire",
        ))
}
