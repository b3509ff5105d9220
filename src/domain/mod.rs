//! Domain models for gemstage
//!
//! Pure value types shared by staging and deployment. No I/O happens here.

pub mod package;

pub use package::PackageDescriptor;
