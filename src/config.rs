//! Documentation endpoint configuration.
//!
//! A [`DocConfig`] is established once, when the documentation endpoints are mounted, and is
//! read-only afterwards. Every handler and helper receives it by reference.

use crate::error::Error;
use crate::route::ParamType;
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

pub const DEFAULT_MOUNT_PATH: &str = "/3scale_doc";
pub const DEFAULT_API_VERSION: &str = "0.1";
pub const DEFAULT_FILE_UPLOAD_TYPE: &str = "Rack::Multipart::UploadedFile";

/// Global fallback descriptors, keyed by parameter name.
pub type DefaultParams = IndexMap<String, DefaultParamSpec>;

/// Fallback documentation for a parameter, consulted for every field a route leaves unset.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DefaultParamSpec {
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub data_type: Option<String>,
    #[serde(rename = "paramType")]
    pub param_type: Option<ParamType>,
    pub full_name: Option<String>,
    pub threescale_name: Option<String>,
    pub required: Option<bool>,
    pub default: Option<Value>,
    #[serde(rename = "allowedValues")]
    pub allowed_values: Option<Value>,
}

/// What the documentation engine knows about the request being served.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    /// Scheme and authority the request was addressed to, e.g. `https://api.example.com`
    pub base_url: String,
}

impl RequestContext {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

/// Computes a base path from the current request; `None` falls back to the request base URL.
pub type BasePathFn = dyn Fn(&RequestContext) -> Option<String> + Send + Sync;

/// Where the `basePath` of generated documents comes from.
#[derive(Clone, Default)]
pub enum BasePath {
    /// Use the base URL of the request being served
    #[default]
    RequestBaseUrl,
    Literal(String),
    Resolver(Arc<BasePathFn>),
}

impl BasePath {
    pub fn resolver<F>(f: F) -> Self
    where
        F: Fn(&RequestContext) -> Option<String> + Send + Sync + 'static,
    {
        BasePath::Resolver(Arc::new(f))
    }

    /// Resolve the base path for a request
    pub fn resolve(&self, request: &RequestContext) -> String {
        let configured = match self {
            BasePath::RequestBaseUrl => None,
            BasePath::Literal(path) => Some(path.clone()),
            BasePath::Resolver(f) => f(request),
        };
        configured.unwrap_or_else(|| request.base_url.clone())
    }
}

impl From<Option<String>> for BasePath {
    fn from(path: Option<String>) -> Self {
        match path {
            Some(path) => BasePath::Literal(path),
            None => BasePath::RequestBaseUrl,
        }
    }
}

impl fmt::Debug for BasePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BasePath::RequestBaseUrl => f.write_str("RequestBaseUrl"),
            BasePath::Literal(path) => f.debug_tuple("Literal").field(path).finish(),
            BasePath::Resolver(_) => f.write_str("Resolver(<fn>)"),
        }
    }
}

impl<'de> Deserialize<'de> for BasePath {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer).map(BasePath::from)
    }
}

/// Configuration of one mounted pair of documentation endpoints.
///
/// Config files use the field names below in snake case; a callable base path can only be
/// installed from code with [`DocConfig::with_base_path`].
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DocConfig {
    mount_path: String,
    base_path: BasePath,
    api_version: String,
    markdown: bool,
    hide_documentation_path: bool,
    hide_format: bool,
    default_params: DefaultParams,
    file_upload_type: String,
}

impl Default for DocConfig {
    fn default() -> Self {
        Self {
            mount_path: DEFAULT_MOUNT_PATH.to_string(),
            base_path: BasePath::RequestBaseUrl,
            api_version: DEFAULT_API_VERSION.to_string(),
            markdown: false,
            hide_documentation_path: false,
            hide_format: false,
            default_params: DefaultParams::new(),
            file_upload_type: DEFAULT_FILE_UPLOAD_TYPE.to_string(),
        }
    }
}

impl DocConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mount_path(mut self, mount_path: impl Into<String>) -> Self {
        self.mount_path = mount_path.into();
        self
    }

    pub fn with_base_path(mut self, base_path: BasePath) -> Self {
        self.base_path = base_path;
        self
    }

    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    pub fn with_markdown(mut self, markdown: bool) -> Self {
        self.markdown = markdown;
        self
    }

    pub fn with_hide_documentation_path(mut self, hide: bool) -> Self {
        self.hide_documentation_path = hide;
        self
    }

    pub fn with_hide_format(mut self, hide: bool) -> Self {
        self.hide_format = hide;
        self
    }

    pub fn with_default_params(mut self, default_params: DefaultParams) -> Self {
        self.default_params = default_params;
        self
    }

    pub fn with_default_param(mut self, name: impl Into<String>, spec: DefaultParamSpec) -> Self {
        self.default_params.insert(name.into(), spec);
        self
    }

    pub fn with_file_upload_type(mut self, file_upload_type: impl Into<String>) -> Self {
        self.file_upload_type = file_upload_type.into();
        self
    }

    /// Check the settings every source (builder, config file, flags) can get wrong.
    ///
    /// The mount path must be absolute and must not be the root, since the documentation
    /// endpoints are mounted beneath it.
    pub fn validate(&self) -> crate::error::Result<()> {
        if !self.mount_path.starts_with('/') || self.mount_path.trim_end_matches('/').is_empty() {
            return Err(Error::InvalidArgument(format!(
                "mount path must be a non-root absolute path: {:?}",
                self.mount_path
            )));
        }
        Ok(())
    }

    pub fn mount_path(&self) -> &str {
        &self.mount_path
    }

    pub fn base_path(&self) -> &BasePath {
        &self.base_path
    }

    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    pub fn markdown(&self) -> bool {
        self.markdown
    }

    pub fn hide_documentation_path(&self) -> bool {
        self.hide_documentation_path
    }

    pub fn hide_format(&self) -> bool {
        self.hide_format
    }

    pub fn default_params(&self) -> &DefaultParams {
        &self.default_params
    }

    /// Route type a host uses to mark multipart file uploads; documented as `file`
    pub fn file_upload_type(&self) -> &str {
        &self.file_upload_type
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DocConfig::new();

        assert_eq!(config.mount_path(), "/3scale_doc");
        assert_eq!(config.api_version(), "0.1");
        assert!(!config.markdown());
        assert!(!config.hide_documentation_path());
        assert!(!config.hide_format());
        assert!(config.default_params().is_empty());
        assert_eq!(config.file_upload_type(), DEFAULT_FILE_UPLOAD_TYPE);
    }

    #[test]
    fn test_deserialize_partial_config() {
        let yaml = r#"
api_version: "2.0"
hide_format: true
base_path: https://api.example.com
default_params:
  user_key:
    description: Your access key
    type: String
    paramType: query
    required: true
    threescale_name: user_keys
"#;
        let config: DocConfig = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.api_version(), "2.0");
        assert!(config.hide_format());
        assert_eq!(config.mount_path(), DEFAULT_MOUNT_PATH);

        let user_key = &config.default_params()["user_key"];
        assert_eq!(user_key.param_type, Some(ParamType::Query));
        assert_eq!(user_key.required, Some(true));
        assert_eq!(user_key.threescale_name.as_deref(), Some("user_keys"));

        let request = RequestContext::new("http://localhost:3000");
        assert_eq!(config.base_path().resolve(&request), "https://api.example.com");
    }

    #[test]
    fn test_base_path_falls_back_to_request() {
        let request = RequestContext::new("http://docs.local");

        assert_eq!(BasePath::RequestBaseUrl.resolve(&request), "http://docs.local");
        assert_eq!(
            BasePath::Literal("/api".to_string()).resolve(&request),
            "/api"
        );
    }

    #[test]
    fn test_base_path_resolver_sees_request() {
        let request = RequestContext::new("http://docs.local");

        let resolver = BasePath::resolver(|req| Some(format!("{}/v2", req.base_url)));
        assert_eq!(resolver.resolve(&request), "http://docs.local/v2");

        let declining = BasePath::resolver(|_| None);
        assert_eq!(declining.resolve(&request), "http://docs.local");
    }

    #[test]
    fn test_validate_mount_path() {
        assert!(DocConfig::new().validate().is_ok());
        assert!(DocConfig::new().with_mount_path("/docs/v1/").validate().is_ok());

        for mount_path in ["docs", "/", "//", ""] {
            let err = DocConfig::new().with_mount_path(mount_path).validate().unwrap_err();
            assert!(matches!(err, Error::InvalidArgument(_)), "{}", mount_path);
        }
    }
}
