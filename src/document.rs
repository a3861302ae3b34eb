use crate::config::{DocConfig, RequestContext};
use crate::grouper::ResourceGroups;
use crate::notes::{strip_heredoc, MarkdownRenderer, NotesRenderer};
use crate::params::{ParamResolver, ResolvedParam};
use crate::path::translate;
use crate::route::{HttpMethod, RouteDescriptor};
use indexmap::IndexMap;
use log::{debug, info};
use serde::{Deserialize, Serialize};

pub const SWAGGER_VERSION: &str = "1.1";

/// Characters of a path template that turn into `-` in an operation nickname
const NICKNAME_SEPARATORS: [char; 5] = ['/', ':', '(', ')', '.'];

/// Swagger 1.1 API description, as served by either documentation endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub api_version: String,
    pub swagger_version: String,
    pub base_path: String,
    /// Present (and empty) on single-resource documents
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_path: Option<String>,
    /// Present (and empty) on the index document
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operations: Option<Vec<Operation>>,
    pub apis: Vec<DocumentNode>,
}

/// One documented route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentNode {
    /// Translated path
    pub path: String,
    /// Always a single operation
    pub operations: Vec<Operation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    /// Route notes, rendered when markdown is enabled
    pub notes: Option<String>,
    /// Resource the route belongs to; only set in the index document
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    pub summary: String,
    pub nickname: String,
    pub http_method: HttpMethod,
    pub parameters: Vec<ResolvedParam>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_responses: Option<Vec<ErrorResponse>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: u16,
    pub reason: String,
}

/// Builds documents from grouped routes.
///
/// The assembler holds no state besides the configuration and the notes renderer, so one
/// instance can serve any number of requests.
pub struct DocumentAssembler<'a> {
    config: &'a DocConfig,
    renderer: Box<dyn NotesRenderer + Send + Sync + 'a>,
}

impl<'a> DocumentAssembler<'a> {
    /// Create an assembler rendering notes as markdown
    pub fn new(config: &'a DocConfig) -> Self {
        Self {
            config,
            renderer: Box::new(MarkdownRenderer),
        }
    }

    /// Replace the notes renderer
    pub fn with_renderer(mut self, renderer: impl NotesRenderer + Send + Sync + 'a) -> Self {
        self.renderer = Box::new(renderer);
        self
    }

    /// Build the document listing every resource.
    ///
    /// Each route becomes its own node, tagged with its resource in `group`. When the config
    /// hides the documentation path, the group the documentation endpoints live in is skipped.
    pub fn build_index(&self, groups: &ResourceGroups<'_>, request: &RequestContext) -> Document {
        let mut apis = Vec::new();

        for (name, routes) in groups {
            if self.config.hide_documentation_path() && self.is_documentation_group(name) {
                debug!("Hiding documentation resource {}", name);
                continue;
            }
            apis.extend(
                routes
                    .iter()
                    .map(|route| self.build_node(route, Some(name.as_str()))),
            );
        }

        info!("Built index document with {} APIs", apis.len());

        Document {
            api_version: self.config.api_version().to_string(),
            swagger_version: SWAGGER_VERSION.to_string(),
            base_path: self.config.base_path().resolve(request),
            resource_path: None,
            operations: Some(Vec::new()),
            apis,
        }
    }

    /// Build the document of a single resource
    pub fn build_resource(
        &self,
        routes: &[&RouteDescriptor],
        request: &RequestContext,
    ) -> Document {
        let apis: Vec<DocumentNode> = routes
            .iter()
            .map(|route| self.build_node(route, None))
            .collect();

        info!("Built resource document with {} APIs", apis.len());

        Document {
            api_version: self.config.api_version().to_string(),
            swagger_version: SWAGGER_VERSION.to_string(),
            base_path: self.config.base_path().resolve(request),
            resource_path: Some(String::new()),
            operations: None,
            apis,
        }
    }

    fn is_documentation_group(&self, name: &str) -> bool {
        let mount_path = translate(self.config.mount_path(), None, self.config.hide_format());
        format!("{}/", mount_path).starts_with(&format!("/{}/", name))
    }

    fn build_node(&self, route: &RouteDescriptor, group: Option<&str>) -> DocumentNode {
        debug!("Documenting route: {} {}", route.method, route.path);

        let resolver = ParamResolver::from_config(self.config);
        let mut parameters = resolver.resolve_headers(&route.headers);
        parameters.extend(resolver.resolve_params(&route.params, &route.path));

        let operation = Operation {
            notes: self.render_notes(route.notes.as_deref()),
            group: group.map(str::to_string),
            summary: route.description.clone().unwrap_or_default(),
            nickname: nickname(route.method, &route.path),
            http_method: route.method,
            parameters,
            error_responses: error_responses(&route.http_codes),
        };

        DocumentNode {
            path: translate(
                &route.path,
                Some(self.config.api_version()),
                self.config.hide_format(),
            ),
            operations: vec![operation],
        }
    }

    fn render_notes(&self, notes: Option<&str>) -> Option<String> {
        match notes {
            Some(notes) if self.config.markdown() && !notes.is_empty() => {
                Some(self.renderer.render(&strip_heredoc(notes)))
            }
            other => other.map(str::to_string),
        }
    }
}

/// Operation nickname: the method followed by the path, with every run of `/ : ( ) .`
/// collapsed into a single `-` and no trailing `-`.
///
/// This is not a one-for-one character replacement: `/users/:id(.:format)` gives
/// `users-id-format`, where replacing each separator would give `-users--id---format-`.
///
/// ```
/// use swagger_from_routes::document::nickname;
/// use swagger_from_routes::route::HttpMethod;
///
/// assert_eq!(nickname(HttpMethod::Get, "/users/:id(.:format)"), "GET-users-id-format");
/// ```
pub fn nickname(method: HttpMethod, path_template: &str) -> String {
    let mut sanitized = String::with_capacity(path_template.len());
    for c in path_template.chars() {
        if NICKNAME_SEPARATORS.contains(&c) {
            if !sanitized.ends_with('-') {
                sanitized.push('-');
            }
        } else {
            sanitized.push(c);
        }
    }
    format!("{}{}", method, sanitized.trim_end_matches('-'))
}

/// `None` when the route documents no status codes, so the field is omitted entirely.
fn error_responses(codes: &IndexMap<u16, String>) -> Option<Vec<ErrorResponse>> {
    if codes.is_empty() {
        return None;
    }
    Some(
        codes
            .iter()
            .map(|(code, reason)| ErrorResponse {
                code: *code,
                reason: reason.clone(),
            })
            .collect(),
    )
}
