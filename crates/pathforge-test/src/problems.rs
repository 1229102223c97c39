//! Complete planning problems.
//!
//! # Example
//!
//! ```
//! use pathforge_test::problems::single_cluster_read_problem;
//!
//! let problem = single_cluster_read_problem();
//! assert_eq!(problem.modules.len(), 2);
//! assert_eq!(problem.workload_cluster_index(), Some(0));
//! ```

use pathforge_core::{Action, Cluster, DataFlow, Interface, ProblemData, StorageAccount};

use crate::attributes::cost_attributes;
use crate::modules::{
    arrow_flight, copier_module, reader_module, s3_csv, s3_parquet, writer_module, REDACT_ACTION,
};

pub const DATASET_ID: &str = "s3/allData";

pub fn home_cluster() -> Cluster {
    Cluster::new("thegreendragon", "theshire")
}

pub fn remote_cluster() -> Cluster {
    Cluster::new("neverland-cluster", "neverland")
}

/// A CSV data set in S3 read by an Arrow Flight workload; one cluster, no
/// storage. Only a single `read` hop fits.
pub fn single_cluster_read_problem() -> ProblemData {
    ProblemData::new(DATASET_ID, home_cluster())
        .with_requirements(arrow_flight())
        .with_data_details(s3_csv(), "theshire")
        .with_module(reader_module())
        .with_module(copier_module())
        .with_cluster(home_cluster())
}

/// The workload asks for an interface no module provides.
pub fn unreachable_problem() -> ProblemData {
    ProblemData::new(DATASET_ID, home_cluster())
        .with_requirements(Interface::new("jdbc-db2", ""))
        .with_data_details(s3_csv(), "theshire")
        .with_module(reader_module())
        .with_module(copier_module())
        .with_cluster(home_cluster())
}

/// A remote data set, two clusters and two storage accounts; the workload
/// requires columns to be redacted and storing in `neverland` requires
/// encryption.
pub fn multi_cluster_problem() -> ProblemData {
    ProblemData::new(DATASET_ID, home_cluster())
        .with_requirements(arrow_flight())
        .with_data_details(s3_csv(), "neverland")
        .with_module(reader_module())
        .with_module(copier_module())
        .with_cluster(home_cluster())
        .with_cluster(remote_cluster())
        .with_storage_account(StorageAccount::new("sa-theshire", "theshire"))
        .with_storage_account(StorageAccount::new("sa-neverland", "neverland"))
        .with_storage_requirement("theshire", Vec::new())
        .with_storage_requirement("neverland", vec![Action::new("EncryptAtRest")])
        .with_action(Action::new(REDACT_ACTION).with_property("columns", "nameDest"))
        .with_attributes(cost_attributes())
}

/// A workload writing Arrow data into a new Parquet data set.
pub fn write_problem() -> ProblemData {
    ProblemData::new(DATASET_ID, home_cluster())
        .with_flow(DataFlow::Write)
        .with_new_dataset(true)
        .with_requirements(arrow_flight())
        .with_data_details(s3_parquet(), "theshire")
        .with_module(writer_module())
        .with_module(copier_module())
        .with_cluster(home_cluster())
        .with_storage_account(StorageAccount::new("sa-theshire", "theshire"))
        .with_storage_requirement("theshire", Vec::new())
}
