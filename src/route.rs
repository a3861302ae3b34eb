//! Route metadata as exposed by the host web framework.
//!
//! The documentation engine never defines routing itself: it reads a snapshot of the host's
//! route table, one [`RouteDescriptor`] per registered endpoint, and renders it. Route tables
//! usually arrive as YAML or JSON exported by the host (see [`crate::loader`]).
//!
//! # Example
//!
//! ```
//! use swagger_from_routes::route::{HttpMethod, RouteDescriptor};
//!
//! let route = RouteDescriptor::new(HttpMethod::Get, "/users/:id(.:format)")
//!     .with_description("Fetch a user");
//! assert_eq!(route.method.as_str(), "GET");
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Complete metadata about a single registered endpoint.
///
/// Mappings keep their declaration order, which is also the order parameters and error
/// responses appear in the generated document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteDescriptor {
    /// The HTTP method for this route
    pub method: HttpMethod,
    /// The raw path template (e.g. "/users/:id(.:format)")
    pub path: String,
    /// Declared body/query/path parameters, keyed by parameter name
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub params: IndexMap<String, ParamValue>,
    /// Declared request headers, keyed by header name
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub headers: IndexMap<String, ParamValue>,
    /// Documented status codes and their reasons
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub http_codes: IndexMap<u16, String>,
    /// Free-text notes, possibly heredoc-indented markdown
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Short one-line summary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl RouteDescriptor {
    /// Create a new RouteDescriptor with no parameters, headers, codes or notes
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            params: IndexMap::new(),
            headers: IndexMap::new(),
            http_codes: IndexMap::new(),
            notes: None,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_http_code(mut self, code: u16, reason: impl Into<String>) -> Self {
        self.http_codes.insert(code, reason.into());
        self
    }
}

/// HTTP methods a route can be registered under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Options,
    Head,
}

impl HttpMethod {
    /// Get the HTTP method as an upper-case verb
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Head => "HEAD",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "DELETE" => Ok(HttpMethod::Delete),
            "PATCH" => Ok(HttpMethod::Patch),
            "OPTIONS" => Ok(HttpMethod::Options),
            "HEAD" => Ok(HttpMethod::Head),
            other => Err(format!("unsupported HTTP method: {}", other)),
        }
    }
}

impl TryFrom<String> for HttpMethod {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<HttpMethod> for String {
    fn from(method: HttpMethod) -> Self {
        method.as_str().to_string()
    }
}

/// Where a parameter is read from in the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    Path,
    Query,
    Header,
    Body,
    Form,
}

/// The value a route declares for one of its parameters or headers.
///
/// Hosts declare either a mapping of documentation attributes or a bare value (typically a
/// one-word description or `true`). Only a mapping can override the default-parameter table;
/// a bare value documents the parameter purely through the defaults. A mapping that does not
/// type-check as a [`ParamSpec`] is rejected rather than demoted to a bare value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    Spec(ParamSpec),
    Bare(Value),
}

impl<'de> Deserialize<'de> for ParamValue {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        match value {
            Value::Object(_) => serde_json::from_value(value)
                .map(ParamValue::Spec)
                .map_err(serde::de::Error::custom),
            other => Ok(ParamValue::Bare(other)),
        }
    }
}

impl ParamValue {
    /// The declared attributes, if the route declared a mapping
    pub fn spec(&self) -> Option<&ParamSpec> {
        match self {
            ParamValue::Spec(spec) => Some(spec),
            ParamValue::Bare(_) => None,
        }
    }
}

impl From<ParamSpec> for ParamValue {
    fn from(spec: ParamSpec) -> Self {
        ParamValue::Spec(spec)
    }
}

impl From<Value> for ParamValue {
    fn from(value: Value) -> Self {
        ParamValue::Bare(value)
    }
}

/// Per-route documentation attributes of a parameter. Every field is optional: an unset
/// field falls back to the default-parameter table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParamSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threescale_name: Option<String>,
    #[serde(rename = "paramType", skip_serializing_if = "Option::is_none")]
    pub param_type: Option<ParamType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(rename = "allowedValues", skip_serializing_if = "Option::is_none")]
    pub allowed_values: Option<Value>,
}

impl ParamSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn data_type(mut self, data_type: impl Into<String>) -> Self {
        self.data_type = Some(data_type.into());
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    pub fn full_name(mut self, full_name: impl Into<String>) -> Self {
        self.full_name = Some(full_name.into());
        self
    }

    pub fn threescale_name(mut self, threescale_name: impl Into<String>) -> Self {
        self.threescale_name = Some(threescale_name.into());
        self
    }

    pub fn default_value(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn allowed_values(mut self, allowed: impl Into<Value>) -> Self {
        self.allowed_values = Some(allowed.into());
        self
    }

    /// The route's own description, `desc` taking priority over `description`
    pub fn declared_description(&self) -> Option<&str> {
        self.desc.as_deref().or(self.description.as_deref())
    }
}
