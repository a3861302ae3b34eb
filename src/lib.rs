//! Swagger From Routes - API descriptions straight from a web API's route table.
//!
//! Given the route metadata a host web framework already holds (path templates, methods,
//! declared parameters and headers, status codes, free-text notes), this library renders a
//! Swagger 1.1 style API description that documentation UIs such as the 3scale developer
//! portal can consume. Nothing has to be documented twice.
//!
//! # Architecture
//!
//! 1. [`route`] - Route metadata as read from the host
//! 2. [`config`] - Immutable documentation settings and the default-parameter table
//! 3. [`path`] - Translates `:name` / `(.:format)` path templates to `{name}` placeholders
//! 4. [`params`] - Merges per-route parameter declarations with the default-parameter table
//! 5. [`grouper`] - Groups routes by resource name
//! 6. [`notes`] - Strips heredoc indentation and renders markdown notes
//! 7. [`document`] - Assembles the index and single-resource documents
//! 8. [`loader`] / [`serializer`] - Route tables in, documents out
//! 9. [`server`] - The two HTTP documentation endpoints
//!
//! # Example Usage
//!
//! ```
//! use swagger_from_routes::{
//!     config::{DocConfig, RequestContext},
//!     document::DocumentAssembler,
//!     grouper::RouteIndex,
//!     route::{HttpMethod, ParamSpec, RouteDescriptor},
//!     serializer::serialize_json,
//! };
//!
//! let routes = vec![
//!     RouteDescriptor::new(HttpMethod::Get, "/users/:id(.:format)")
//!         .with_description("Fetch a user")
//!         .with_param("id", ParamSpec::new().data_type("Integer").required(true)),
//! ];
//!
//! let config = DocConfig::new().with_api_version("1.0");
//! let index = RouteIndex::new(routes);
//! let request = RequestContext::new("https://api.example.com");
//!
//! let document = DocumentAssembler::new(&config).build_index(&index.groups(), &request);
//! assert_eq!(document.apis[0].path, "/users/{id}{format}");
//!
//! let json = serialize_json(&document).unwrap();
//! println!("{}", json);
//! ```
//!
//! # Command-Line Interface
//!
//! For command-line usage, see the [`cli`] module.

pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod grouper;
pub mod loader;
pub mod notes;
pub mod params;
pub mod path;
pub mod route;
pub mod serializer;
pub mod server;
