//! Grouping of routes by resource.
//!
//! The resource name of a route is the first path segment made of word characters that is
//! followed by `.`, `/` or `(`, lower-cased. `/users/:id(.:format)` belongs to `users`,
//! `/:version/accounts(.:format)` to `accounts`.

use crate::config::DocConfig;
use crate::path::FORMAT_SUFFIX;
use crate::route::{HttpMethod, ParamSpec, RouteDescriptor};
use indexmap::IndexMap;
use log::{debug, warn};
use regex::Regex;
use std::sync::OnceLock;

/// Resource name -> routes of that resource, in route-table order.
pub type ResourceGroups<'a> = IndexMap<String, Vec<&'a RouteDescriptor>>;

fn resource_re() -> &'static Regex {
    static RESOURCE_RE: OnceLock<Regex> = OnceLock::new();
    RESOURCE_RE.get_or_init(|| Regex::new(r"/(\w*?)[./(]").unwrap())
}

/// Extract the resource name of a path template, if it has one.
pub fn resource_name(path_template: &str) -> Option<String> {
    let captures = resource_re().captures(path_template)?;
    let name = captures.get(1)?.as_str();
    if name.is_empty() {
        None
    } else {
        Some(name.to_lowercase())
    }
}

/// Partition routes by resource name.
///
/// Routes without a resource name are left out (and logged); groups and the routes inside
/// them keep route-table order.
pub fn group(routes: &[RouteDescriptor]) -> ResourceGroups<'_> {
    let mut groups = ResourceGroups::new();

    for route in routes {
        match resource_name(&route.path) {
            Some(name) => groups.entry(name).or_default().push(route),
            None => warn!(
                "Route {} {} has no resource name and is left out of the documentation",
                route.method, route.path
            ),
        }
    }

    debug!("Grouped {} routes into {} resources", routes.len(), groups.len());
    groups
}

/// Snapshot of the host's route table, plus the documentation endpoints once mounted.
#[derive(Debug, Clone, Default)]
pub struct RouteIndex {
    routes: Vec<RouteDescriptor>,
}

impl RouteIndex {
    pub fn new(routes: Vec<RouteDescriptor>) -> Self {
        Self { routes }
    }

    /// Append the two documentation endpoints described by `config`, as mounting them into
    /// the host would.
    pub fn with_documentation_routes(mut self, config: &DocConfig) -> Self {
        self.routes.extend(documentation_routes(config));
        self
    }

    pub fn routes(&self) -> &[RouteDescriptor] {
        &self.routes
    }

    /// Group the current snapshot; recomputed on every call.
    pub fn groups(&self) -> ResourceGroups<'_> {
        group(&self.routes)
    }

    /// Routes of one resource, looked up by its exact group key.
    pub fn resource(&self, name: &str) -> Option<Vec<&RouteDescriptor>> {
        self.groups().shift_remove(name)
    }
}

/// The routes the documentation endpoints themselves occupy in the host.
pub fn documentation_routes(config: &DocConfig) -> Vec<RouteDescriptor> {
    let mount_path = config.mount_path().trim_end_matches('/');

    vec![
        RouteDescriptor::new(HttpMethod::Get, format!("{}{}", mount_path, FORMAT_SUFFIX))
            .with_description("3scale compatible API description"),
        RouteDescriptor::new(
            HttpMethod::Get,
            format!("{}/:name{}", mount_path, FORMAT_SUFFIX),
        )
        .with_description("3scale compatible API description for specific API")
        .with_param(
            "name",
            ParamSpec::new()
                .description("Resource name of mounted API")
                .data_type("string")
                .required(true),
        ),
    ]
}
