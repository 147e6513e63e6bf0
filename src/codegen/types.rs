//! Type definitions for the render context.
//!
//! These types are serialized to JSON and handed to the template renderer, so
//! their serialized field names are the placeholder names templates refer to.

use serde::{Deserialize, Serialize};

/// Framework value type of a generated attribute.
///
/// Only string options are generated today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum ValueType {
    #[serde(rename = "types.String")]
    String,
}

/// Whether an attribute must be set by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum Requiredness {
    Required,
    Optional,
}

impl From<bool> for Requiredness {
    fn from(required: bool) -> Self {
        if required {
            Requiredness::Required
        } else {
            Requiredness::Optional
        }
    }
}

/// Schema attribute kind used in the generated resource schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum SchemaAttributeKind {
    #[serde(rename = "schema.StringAttribute")]
    String,
}

/// A typed attribute of the generated resource schema.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaParameter {
    /// snake_case key persisted in the schema
    pub external_name: String,
    /// Title-cased struct field name
    pub internal_name: String,
    pub value_type: ValueType,
    pub requiredness_flag: Requiredness,
    pub schema_attribute_kind: SchemaAttributeKind,
    /// Plan field accessor, e.g. `plan.Profile`
    pub access_expression: String,
}

/// An argument sent when the generated resource creates a service instance.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceParameter {
    /// Option name exactly as the catalog spells it
    pub name: String,
    pub value_expression: String,
}

/// Everything a template needs to emit one resource file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceRenderContext {
    pub object_name: String,
    pub resource_name: String,
    pub service_id: String,
    pub schema_parameters: Vec<SchemaParameter>,
    pub instance_parameters: Vec<InstanceParameter>,
}

impl ResourceRenderContext {
    /// Serialize to the JSON value consumed by renderers.
    pub fn to_value(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_requiredness_from_bool() {
        assert_eq!(Requiredness::from(true), Requiredness::Required);
        assert_eq!(Requiredness::from(false), Requiredness::Optional);
    }

    #[test]
    fn test_serialized_field_names() {
        let context = ResourceRenderContext {
            object_name: "encore".to_string(),
            resource_name: "osc_encore_resource".to_string(),
            service_id: "encore".to_string(),
            schema_parameters: vec![SchemaParameter {
                external_name: "profile".to_string(),
                internal_name: "Profile".to_string(),
                value_type: ValueType::String,
                requiredness_flag: Requiredness::Required,
                schema_attribute_kind: SchemaAttributeKind::String,
                access_expression: "plan.Profile".to_string(),
            }],
            instance_parameters: vec![InstanceParameter {
                name: "profile".to_string(),
                value_expression: "plan.Profile.ValueString()".to_string(),
            }],
        };

        assert_eq!(
            context.to_value().unwrap(),
            json!({
                "objectName": "encore",
                "resourceName": "osc_encore_resource",
                "serviceId": "encore",
                "schemaParameters": [{
                    "externalName": "profile",
                    "internalName": "Profile",
                    "valueType": "types.String",
                    "requirednessFlag": "Required",
                    "schemaAttributeKind": "schema.StringAttribute",
                    "accessExpression": "plan.Profile"
                }],
                "instanceParameters": [{
                    "name": "profile",
                    "valueExpression": "plan.Profile.ValueString()"
                }]
            })
        );
    }
}
