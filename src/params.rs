//! Parameter resolution.
//!
//! Every documented parameter is the merge of two layers: the attributes the route declares
//! for it and the process-wide default-parameter table. Route attributes win field by field;
//! the defaults fill in whatever the route leaves unset.

use crate::config::{DefaultParamSpec, DefaultParams, DocConfig};
use crate::route::{ParamType, ParamValue};
use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Documentation of a single parameter, as emitted in an operation's `parameters` list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedParam {
    #[serde(rename = "paramType")]
    pub param_type: ParamType,
    pub name: String,
    pub description: String,
    #[serde(rename = "dataType")]
    pub data_type: String,
    pub required: bool,
    /// Name of the parameter in the third-party management API, when it differs
    #[serde(rename = "threescale_name", skip_serializing_if = "Option::is_none")]
    pub third_party_name: Option<String>,
    #[serde(rename = "defaultValue", skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
    #[serde(rename = "allowedValues", skip_serializing_if = "Option::is_none")]
    pub allowed_values: Option<Value>,
}

/// A default-table entry with every fallback applied.
#[derive(Debug, Clone, PartialEq)]
struct MergedDefaults {
    description: String,
    data_type: String,
    param_type: ParamType,
    full_name: String,
    threescale_name: String,
    required: bool,
    default_value: Option<Value>,
    allowed_values: Option<Value>,
}

impl MergedDefaults {
    /// A missing table entry behaves exactly like an empty one.
    fn new(name: &str, spec: Option<&DefaultParamSpec>) -> Self {
        let empty = DefaultParamSpec::default();
        let spec = spec.unwrap_or(&empty);

        Self {
            description: spec.description.clone().unwrap_or_default(),
            data_type: spec
                .data_type
                .clone()
                .unwrap_or_else(|| "String".to_string()),
            param_type: spec.param_type.unwrap_or(ParamType::Query),
            full_name: spec.full_name.clone().unwrap_or_else(|| name.to_string()),
            threescale_name: spec.threescale_name.clone().unwrap_or_default(),
            required: spec.required.unwrap_or(false),
            default_value: spec.default.clone(),
            allowed_values: spec.allowed_values.clone(),
        }
    }
}

/// Resolves route parameters and headers against a default-parameter table.
pub struct ParamResolver<'a> {
    defaults: &'a DefaultParams,
    file_upload_type: &'a str,
}

impl<'a> ParamResolver<'a> {
    pub fn new(defaults: &'a DefaultParams, file_upload_type: &'a str) -> Self {
        Self {
            defaults,
            file_upload_type,
        }
    }

    pub fn from_config(config: &'a DocConfig) -> Self {
        Self::new(config.default_params(), config.file_upload_type())
    }

    fn merged_defaults(&self, name: &str) -> MergedDefaults {
        MergedDefaults::new(name, self.defaults.get(name))
    }

    /// Resolve a route's body/query/path parameters.
    ///
    /// A parameter whose name appears as `:name` in `path_template` is always a path
    /// parameter, whatever either layer declares.
    pub fn resolve_params(
        &self,
        params: &IndexMap<String, ParamValue>,
        path_template: &str,
    ) -> Vec<ResolvedParam> {
        params
            .iter()
            .map(|(name, value)| self.resolve_param(name, value, path_template))
            .collect()
    }

    fn resolve_param(&self, name: &str, value: &ParamValue, path_template: &str) -> ResolvedParam {
        let defs = self.merged_defaults(name);
        let spec = value.spec();

        let data_type = match spec.and_then(|s| s.data_type.as_deref()) {
            Some(t) if t == self.file_upload_type => "file".to_string(),
            Some(t) => t.to_string(),
            None => defs.data_type,
        };

        let param_type = if path_template.contains(&format!(":{}", name)) {
            ParamType::Path
        } else {
            spec.and_then(|s| s.param_type).unwrap_or(defs.param_type)
        };

        debug!("Resolved parameter {} as {:?}", name, param_type);

        ResolvedParam {
            param_type,
            name: spec
                .and_then(|s| s.full_name.clone())
                .unwrap_or(defs.full_name),
            description: spec
                .and_then(|s| s.declared_description())
                .map(str::to_string)
                .unwrap_or(defs.description),
            data_type,
            required: spec.and_then(|s| s.required).unwrap_or(defs.required),
            third_party_name: non_empty(
                spec.and_then(|s| s.threescale_name.clone())
                    .unwrap_or(defs.threescale_name),
            ),
            default_value: truthy(spec.and_then(|s| s.default.clone()).or(defs.default_value)),
            allowed_values: truthy(
                spec.and_then(|s| s.allowed_values.clone())
                    .or(defs.allowed_values),
            ),
        }
    }

    /// Resolve a route's request headers.
    ///
    /// Headers are documented under the default table's `full_name` and `type`; a route can
    /// only override `description`, `required` and `threescale_name`.
    pub fn resolve_headers(&self, headers: &IndexMap<String, ParamValue>) -> Vec<ResolvedParam> {
        headers
            .iter()
            .map(|(name, value)| self.resolve_header(name, value))
            .collect()
    }

    fn resolve_header(&self, name: &str, value: &ParamValue) -> ResolvedParam {
        let defs = self.merged_defaults(name);
        let spec = value.spec();

        ResolvedParam {
            param_type: ParamType::Header,
            name: defs.full_name,
            description: spec
                .and_then(|s| s.description.clone())
                .unwrap_or(defs.description),
            data_type: defs.data_type,
            required: spec.and_then(|s| s.required).unwrap_or(defs.required),
            third_party_name: non_empty(
                spec.and_then(|s| s.threescale_name.clone())
                    .unwrap_or(defs.threescale_name),
            ),
            default_value: truthy(defs.default_value),
            allowed_values: truthy(defs.allowed_values),
        }
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// `null` and `false` are never emitted.
fn truthy(value: Option<Value>) -> Option<Value> {
    value.filter(|v| !matches!(v, Value::Null | Value::Bool(false)))
}
