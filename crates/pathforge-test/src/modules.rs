//! Interface and module fixtures.
//!
//! # Example
//!
//! ```
//! use pathforge_test::modules::{reader_module, s3_csv};
//!
//! let reader = reader_module();
//! let read = &reader.capabilities[0];
//! assert_eq!(read.capability, "read");
//! assert!(read.supported_interfaces[0].source.as_ref().unwrap().accepts(&s3_csv()));
//! ```

use pathforge_core::{Interface, Module, ModuleCapability, ModuleInOut};

pub const READER_MODULE: &str = "arrow-flight-module";
pub const COPIER_MODULE: &str = "implicit-copy-batch";
pub const WRITER_MODULE: &str = "arrow-flight-writer";
pub const REDACT_ACTION: &str = "RedactColumn";

pub fn s3_csv() -> Interface {
    Interface::new("s3", "csv")
}

pub fn s3_parquet() -> Interface {
    Interface::new("s3", "parquet")
}

pub fn arrow_flight() -> Interface {
    Interface::new("arrow-flight", "arrow")
}

/// Serves any S3 object through its Arrow Flight API (virtual sink).
pub fn reader_module() -> Module {
    Module::new(READER_MODULE).with_capability(
        ModuleCapability::new("read")
            .with_api(arrow_flight())
            .with_interfaces(vec![ModuleInOut::new(Some(Interface::new("s3", "")), None)])
            .with_action(REDACT_ACTION),
    )
}

/// Copies CSV objects to Parquet objects.
pub fn copier_module() -> Module {
    Module::new(COPIER_MODULE).with_capability(
        ModuleCapability::new("copy")
            .with_interfaces(vec![ModuleInOut::between(s3_csv(), s3_parquet())])
            .with_action(REDACT_ACTION),
    )
}

/// Receives data through its Arrow Flight API and writes any S3 object
/// (virtual source).
pub fn writer_module() -> Module {
    Module::new(WRITER_MODULE).with_capability(
        ModuleCapability::new("write")
            .with_api(arrow_flight())
            .with_interfaces(vec![ModuleInOut::new(None, Some(Interface::new("s3", "")))]),
    )
}
