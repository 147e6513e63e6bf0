//! Parameter schema builder.
//!
//! Maps a descriptor's instance options onto index-aligned schema and instance
//! parameter lists. Options are dropped, not rejected, when they are reserved,
//! not string-typed, named in a way that cannot become an identifier, or a
//! repeat of an earlier option. Every dropped option is reported in
//! [`BuiltParameters::filtered`].

use std::collections::BTreeSet;

use crate::catalog::{InstanceOption, ServiceDescriptor};
use crate::codegen::types::{
    InstanceParameter, Requiredness, SchemaAttributeKind, SchemaParameter, ValueType,
};
use crate::codegen::utils::{to_snake_case, to_title_case};

/// Attribute the generated resource always declares on its own.
const RESOURCE_URL_ATTRIBUTE: &str = "url";

/// Which options never become parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterFilter {
    /// Option names handled by the resource itself. Defaults to `name`.
    pub reserved: BTreeSet<String>,
}

impl Default for ParameterFilter {
    fn default() -> Self {
        Self {
            reserved: BTreeSet::from(["name".to_string()]),
        }
    }
}

impl ParameterFilter {
    pub fn with_reserved<I, S>(reserved: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            reserved: reserved.into_iter().map(Into::into).collect(),
        }
    }

    fn is_reserved(&self, name: &str) -> bool {
        self.reserved.contains(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterReason {
    Reserved,
    UnsupportedType(String),
    /// The name does not convert to a `[a-z0-9_]+` key and a capitalized field.
    InvalidName,
    /// An earlier option already produced the same schema key.
    Duplicate,
}

/// An option that was left out of the generated schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredOption {
    pub name: String,
    pub reason: FilterReason,
}

/// Output of [`build_parameters`].
///
/// `schema[i]` and `instance[i]` always come from the same option.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuiltParameters {
    pub schema: Vec<SchemaParameter>,
    pub instance: Vec<InstanceParameter>,
    pub filtered: Vec<FilteredOption>,
}

/// Build the schema and instance parameters for one descriptor.
///
/// Options keep their catalog order. A descriptor with no eligible options
/// yields empty lists.
pub fn build_parameters(
    descriptor: &ServiceDescriptor,
    filter: &ParameterFilter,
) -> BuiltParameters {
    let mut built = BuiltParameters::default();
    let mut external_names = BTreeSet::new();

    for option in &descriptor.service_instance_options {
        let id = &descriptor.service_id;

        if filter.is_reserved(&option.name) {
            tracing::debug!("{}: skipping reserved option '{}'", id, option.name);
            built.filtered.push(FilteredOption::new(option, FilterReason::Reserved));
            continue;
        }

        if !option.is_string() {
            tracing::debug!(
                "{}: skipping option '{}' of unsupported type '{}'",
                id,
                option.name,
                option.option_type
            );
            let reason = FilterReason::UnsupportedType(option.option_type.clone());
            built.filtered.push(FilteredOption::new(option, reason));
            continue;
        }

        let external_name = to_snake_case(&option.name);
        let internal_name = to_title_case(&option.name);

        if !is_valid_external_name(&external_name) || !is_valid_internal_name(&internal_name) {
            tracing::warn!(
                "{}: skipping option '{}', its name is not a valid identifier",
                id,
                option.name
            );
            built.filtered.push(FilteredOption::new(option, FilterReason::InvalidName));
            continue;
        }

        if !external_names.insert(external_name.clone()) {
            tracing::warn!(
                "{}: skipping option '{}', key '{}' is already declared",
                id,
                option.name,
                external_name
            );
            built.filtered.push(FilteredOption::new(option, FilterReason::Duplicate));
            continue;
        }

        if external_name == RESOURCE_URL_ATTRIBUTE {
            tracing::warn!(
                "{}: option '{}' collides with the resource's own '{}' attribute",
                id,
                option.name,
                RESOURCE_URL_ATTRIBUTE
            );
        }

        built.instance.push(InstanceParameter {
            name: option.name.clone(),
            value_expression: format!("plan.{}.ValueString()", internal_name),
        });
        built.schema.push(SchemaParameter {
            external_name,
            access_expression: format!("plan.{}", internal_name),
            internal_name,
            value_type: ValueType::String,
            requiredness_flag: Requiredness::from(option.required),
            schema_attribute_kind: SchemaAttributeKind::String,
        });
    }

    built
}

fn is_valid_external_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

fn is_valid_internal_name(name: &str) -> bool {
    name.starts_with(|c: char| c.is_ascii_uppercase())
}

impl FilteredOption {
    fn new(option: &InstanceOption, reason: FilterReason) -> Self {
        Self {
            name: option.name.clone(),
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option(name: &str, option_type: &str, required: bool) -> InstanceOption {
        InstanceOption {
            name: name.to_string(),
            option_type: option_type.to_string(),
            required,
        }
    }

    fn descriptor(options: Vec<InstanceOption>) -> ServiceDescriptor {
        ServiceDescriptor {
            service_id: "my-service".to_string(),
            service_instance_options: options,
        }
    }

    #[test]
    fn test_skip_name_and_non_string_options() {
        let service = descriptor(vec![
            option("name", "string", true),
            option("size", "string", true),
            option("count", "int", false),
        ]);

        let built = build_parameters(&service, &ParameterFilter::default());

        assert_eq!(built.schema.len(), 1);
        let size = &built.schema[0];
        assert_eq!(size.external_name, "size");
        assert_eq!(size.internal_name, "Size");
        assert_eq!(size.requiredness_flag, Requiredness::Required);
        assert_eq!(size.value_type, ValueType::String);
        assert_eq!(size.schema_attribute_kind, SchemaAttributeKind::String);
        assert_eq!(size.access_expression, "plan.Size");

        assert_eq!(built.instance.len(), 1);
        assert_eq!(built.instance[0].name, "size");
        assert_eq!(built.instance[0].value_expression, "plan.Size.ValueString()");

        assert_eq!(
            built.filtered,
            vec![
                FilteredOption { name: "name".to_string(), reason: FilterReason::Reserved },
                FilteredOption {
                    name: "count".to_string(),
                    reason: FilterReason::UnsupportedType("int".to_string()),
                },
            ]
        );
    }

    #[test]
    fn test_camel_case_option_names() {
        let service = descriptor(vec![option("MrssOrigin", "string", false)]);
        let built = build_parameters(&service, &ParameterFilter::default());

        assert_eq!(built.schema[0].external_name, "mrss_origin");
        assert_eq!(built.schema[0].internal_name, "MrssOrigin");
        assert_eq!(built.schema[0].requiredness_flag, Requiredness::Optional);
        assert_eq!(built.instance[0].name, "MrssOrigin");
    }

    #[test]
    fn test_parameters_are_index_aligned() {
        let service = descriptor(vec![
            option("alpha", "string", true),
            option("name", "string", true),
            option("betaValue", "boolean", false),
            option("gammaKey", "string", false),
            option("deltaURL", "string", false),
        ]);

        let built = build_parameters(&service, &ParameterFilter::default());

        assert_eq!(built.schema.len(), built.instance.len());
        for (schema, instance) in built.schema.iter().zip(&built.instance) {
            assert_eq!(schema.internal_name, to_title_case(&instance.name));
            assert_eq!(
                instance.value_expression,
                format!("{}.ValueString()", schema.access_expression)
            );
        }
        let names: Vec<_> = built.instance.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["alpha", "gammaKey", "deltaURL"]);
    }

    #[test]
    fn test_empty_options() {
        let built = build_parameters(&descriptor(vec![]), &ParameterFilter::default());
        assert!(built.schema.is_empty());
        assert!(built.instance.is_empty());
        assert!(built.filtered.is_empty());
    }

    #[test]
    fn test_custom_reserved_set() {
        let service = descriptor(vec![
            option("name", "string", true),
            option("url", "string", false),
        ]);

        let built = build_parameters(&service, &ParameterFilter::with_reserved(["name", "url"]));
        assert!(built.schema.is_empty());
        assert_eq!(built.filtered.len(), 2);

        // Only "name" is reserved by default; "url" is kept.
        let built = build_parameters(&service, &ParameterFilter::default());
        assert_eq!(built.schema.len(), 1);
        assert_eq!(built.schema[0].external_name, "url");
    }

    #[test]
    fn test_url_option_is_kept() {
        let service = descriptor(vec![option("URL", "string", true)]);
        let built = build_parameters(&service, &ParameterFilter::default());

        assert!(built.filtered.is_empty());
        assert_eq!(built.schema.len(), 1);
        assert_eq!(built.schema[0].external_name, "url");
        assert_eq!(built.schema[0].internal_name, "URL");
        assert_eq!(built.instance[0].name, "URL");
    }

    #[test]
    fn test_invalid_names_are_dropped() {
        let service = descriptor(vec![
            option("", "string", false),
            option("output-url", "string", false),
            option("_private", "string", false),
            option("9lives", "string", false),
            option("profile", "string", true),
        ]);

        let built = build_parameters(&service, &ParameterFilter::default());

        assert_eq!(built.schema.len(), 1);
        assert_eq!(built.schema[0].external_name, "profile");
        let invalid: Vec<_> = built
            .filtered
            .iter()
            .filter(|f| f.reason == FilterReason::InvalidName)
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(invalid, ["", "output-url", "_private", "9lives"]);
    }

    #[test]
    fn test_duplicate_options_are_dropped() {
        let service = descriptor(vec![
            option("profile", "string", true),
            option("profile", "string", false),
            option("outputUrl", "string", false),
            option("output_url", "string", false),
        ]);

        let built = build_parameters(&service, &ParameterFilter::default());

        let names: Vec<_> = built.instance.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["profile", "outputUrl"]);
        assert_eq!(built.schema[0].requiredness_flag, Requiredness::Required);
        assert_eq!(
            built.filtered,
            vec![
                FilteredOption { name: "profile".to_string(), reason: FilterReason::Duplicate },
                FilteredOption { name: "output_url".to_string(), reason: FilterReason::Duplicate },
            ]
        );
    }

    #[test]
    fn test_generated_names_are_identifier_safe() {
        let service = descriptor(vec![
            option("simpleName", "string", true),
            option("myHTTPCode", "string", false),
            option("s3Bucket", "string", false),
        ]);

        let built = build_parameters(&service, &ParameterFilter::default());
        for param in &built.schema {
            assert!(!param.external_name.is_empty());
            assert!(param
                .external_name
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'));
            assert!(param.internal_name.starts_with(|c: char| c.is_uppercase()));
        }
    }
}
