//! Service catalog integration
//!
//! Descriptor records and the authenticated client that fetches them

pub mod client;
pub mod descriptor;

pub use client::{CatalogClient, CatalogConfig, Credentials, DEFAULT_CATALOG_URL};
pub use descriptor::{InstanceOption, ServiceDescriptor};
