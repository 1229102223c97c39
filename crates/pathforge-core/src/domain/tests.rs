//! Tests for the problem model.

use super::*;

fn cost_attributes() -> AttributeManager {
    AttributeManager::new()
        .with_metric(Metric::new("cost", RangeType::new(0, 200)))
        .with_metric(Metric::new("bandwidth", RangeType::new(0, 1000)))
        .with_attribute(InfrastructureAttribute::for_instance(
            "storage-cost",
            "cost",
            50,
            InstanceType::StorageAccount,
            "sa-east",
        ))
        .with_attribute(InfrastructureAttribute::for_instance(
            "cluster-cost",
            "cost",
            "150",
            InstanceType::Cluster,
            "east",
        ))
        .with_attribute(InfrastructureAttribute::between_regions(
            "bandwidth", "bandwidth", 400, "us-east", "eu-west",
        ))
}

#[test]
fn test_interface_wildcard_format() {
    let any = Interface::new("s3", "");
    assert!(any.accepts(&Interface::new("s3", "csv")));
    assert!(any.accepts(&Interface::new("s3", "")));
    assert!(!any.accepts(&Interface::new("db2", "")));
    assert!(!Interface::new("s3", "csv").accepts(&any));
    assert!(Interface::default().accepts(&Interface::default()));
}

#[test]
fn test_interface_display() {
    assert_eq!(Interface::default().to_string(), "<none>");
    assert_eq!(Interface::new("s3", "").to_string(), "s3");
    assert_eq!(Interface::new("s3", "parquet").to_string(), "s3/parquet");
}

#[test]
fn test_capability_interfaces() {
    let copy = ModuleCapability::new("copy").with_interfaces(vec![ModuleInOut::between(
        Interface::new("s3", "csv"),
        Interface::new("s3", "parquet"),
    )]);
    assert!(copy.has_physical_source());
    assert!(copy.has_physical_sink());

    let read = ModuleCapability::new("read")
        .with_api(Interface::new("arrow-flight", "arrow"))
        .with_interfaces(vec![ModuleInOut::new(Some(Interface::new("s3", "")), None)])
        .with_action("RedactColumn");
    assert!(read.has_physical_source());
    assert!(!read.has_physical_sink());
    assert!(read.supports_action("RedactColumn"));
    assert!(!read.supports_action("Encrypt"));
}

#[test]
fn test_normalized_value() {
    let attributes = cost_attributes();
    assert_eq!(attributes.normalized_value("storage-cost", "sa-east").unwrap(), 25);
    assert_eq!(attributes.normalized_value("cluster-cost", "east").unwrap(), 75);
    assert!(attributes.normalized_value("cluster-cost", "west").is_err());
}

#[test]
fn test_normalized_value_between_is_symmetric() {
    let attributes = cost_attributes();
    assert_eq!(
        attributes
            .normalized_value_between("bandwidth", "us-east", "eu-west")
            .unwrap(),
        40
    );
    assert_eq!(
        attributes
            .normalized_value_between("bandwidth", "eu-west", "us-east")
            .unwrap(),
        40
    );
    assert!(attributes
        .normalized_value_between("bandwidth", "us-east", "us-east")
        .is_err());
}

#[test]
fn test_undefined_metric_is_an_error() {
    let attributes = AttributeManager::new().with_attribute(InfrastructureAttribute::for_instance(
        "latency",
        "ms",
        3,
        InstanceType::Cluster,
        "east",
    ));
    let err = attributes.normalized_value("latency", "east").unwrap_err();
    assert!(err.to_string().contains("undefined metric ms"));
}

#[test]
fn test_instance_types_in_order_of_appearance() {
    let attributes = cost_attributes().with_attribute(InfrastructureAttribute::for_instance(
        "storage-cost",
        "cost",
        10,
        InstanceType::Cluster,
        "west",
    ));
    assert_eq!(
        attributes.instance_types("storage-cost"),
        vec![InstanceType::StorageAccount, InstanceType::Cluster]
    );
    assert_eq!(attributes.instance_types("bandwidth"), vec![InstanceType::InterRegion]);
    assert!(attributes.instance_types("unknown").is_empty());
}

#[test]
fn test_attribute_manager_from_json() {
    let json = r#"{
        "metrics": [{"name": "cost", "scale": {"min": 0, "max": 10}}],
        "attributes": [
            {"attribute": "cluster-cost", "metricName": "cost", "value": "5",
             "object": "cluster", "instance": "east"}
        ]
    }"#;
    let attributes = AttributeManager::from_json_str(json).unwrap();
    assert_eq!(attributes.normalized_value("cluster-cost", "east").unwrap(), 50);
    assert!(AttributeManager::from_json_str("not json").is_err());
}

#[test]
fn test_restriction_on_property_values() {
    let attributes = AttributeManager::new();
    let east = Cluster::new("east", "us-east").with_property("tier", "gold");
    let west = Cluster::new("west", "us-west");

    let region = Restriction::values("region", ["us-east"]);
    assert!(region.satisfied_by(&attributes, &east, &east.name));
    assert!(!region.satisfied_by(&attributes, &west, &west.name));

    let tier = Restriction::values("properties.tier", ["gold", "silver"]);
    assert!(tier.satisfied_by(&attributes, &east, &east.name));
    // unresolvable property
    assert!(!tier.satisfied_by(&attributes, &west, &west.name));
}

#[test]
fn test_restriction_range_uses_attributes() {
    let attributes = cost_attributes();
    let cheap = Restriction::range("storage-cost", 0, 40);
    let account = StorageAccount::new("sa-east", "us-east");
    assert!(!cheap.satisfied_by(&attributes, &account, &account.name));

    let affordable = Restriction::range("storage-cost", 0, 60);
    assert!(affordable.satisfied_by(&attributes, &account, &account.name));

    let at_least = Restriction::range("storage-cost", 51, 0);
    assert!(!at_least.satisfied_by(&attributes, &account, &account.name));
}

#[test]
fn test_module_restriction_scoped_to_capability() {
    let module = Module::new("arrow-flight")
        .with_capability(ModuleCapability::new("read"))
        .with_capability(ModuleCapability {
            scope: "workload".to_string(),
            ..ModuleCapability::new("copy")
        });
    let restrictions = Restrictions {
        modules: vec![Restriction::values("capabilities.scope", ["asset"])],
        ..Restrictions::default()
    };
    let attributes = AttributeManager::new();
    assert!(restrictions.allows_module(&attributes, &module, 0));
    assert!(!restrictions.allows_module(&attributes, &module, 1));
    // out-of-range capability index cannot be resolved
    assert!(!restrictions.allows_module(&attributes, &module, 2));

    let scoped = Restriction::values("capabilities.scope", ["asset"]).scoped_to_capability(3);
    assert_eq!(scoped.property, "capabilities.3.scope");
}

#[test]
fn test_signed_weight() {
    let min = AttributeOptimization::new("cost", OptimizationDirective::Min).with_weight(0.8);
    assert_eq!(min.signed_weight(), 80);
    let max = AttributeOptimization::new("bandwidth", OptimizationDirective::Max);
    assert_eq!(max.signed_weight(), -100);
}

#[test]
fn test_policy_evaluation_deserialize() {
    let json = r#"{
        "decisions": {
            "copy": {"deploy": "false"},
            "read": {"deploy": "true", "restrictions": {"clusters": [{"property": "region", "values": ["us-east"]}]}}
        },
        "optimizationStrategy": [{"attribute": "cost", "directive": "max", "weight": 0.5}]
    }"#;
    let policy: PolicyEvaluation = serde_json::from_str(json).unwrap();
    assert_eq!(policy.decision("copy").unwrap().deploy, DeployStatus::False);
    let read = policy.decision("read").unwrap();
    assert_eq!(read.deploy, DeployStatus::True);
    assert_eq!(read.restrictions.clusters.len(), 1);
    assert!(policy.decision("write").is_none());
    assert_eq!(policy.optimization_strategy[0].signed_weight(), -50);
}

#[test]
fn test_problem_data_builders() {
    let problem = ProblemData::new("ns/data", Cluster::new("west", "us-west"))
        .with_cluster(Cluster::new("east", "us-east"))
        .with_cluster(Cluster::new("west", "us-west"))
        .with_module(Module::new("reader"))
        .with_module(Module::new("reader").with_property("version", "2"))
        .with_flow(DataFlow::Write);

    assert_eq!(problem.dataset_id(), "ns/data");
    assert_eq!(problem.workload_cluster_index(), Some(1));
    assert_eq!(problem.modules.len(), 1);
    assert_eq!(problem.modules["reader"].properties["version"], "2");
    assert!(problem.writes_to_existing_dataset());
    assert!(!problem.with_new_dataset(true).writes_to_existing_dataset());
}
