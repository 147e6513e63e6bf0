//! Service catalog records as returned by `GET /service`.

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// One catalog entry: a service type and the options accepted when creating an instance.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDescriptor {
    pub service_id: String,
    #[serde(default)]
    pub service_instance_options: Vec<InstanceOption>,
}

/// A configurable instance option declared by a service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct InstanceOption {
    pub name: String,
    /// Type tag as published by the catalog, e.g. `"string"`.
    #[serde(rename = "type", default)]
    pub option_type: String,
    #[serde(default)]
    pub required: bool,
}

impl InstanceOption {
    pub fn is_string(&self) -> bool {
        self.option_type == "string"
    }
}

impl ServiceDescriptor {
    /// Parse a full catalog response body (a JSON array of descriptors).
    pub fn list_from_json(body: &str) -> Result<Vec<ServiceDescriptor>, CatalogError> {
        Ok(serde_json::from_str(body)?)
    }
}
