use crate::config::DocConfig;
use crate::error::{Error, Result};
use crate::route::RouteDescriptor;
use anyhow::Context;
use log::{debug, warn};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const ROUTE_FILE_EXTENSIONS: [&str; 3] = ["yaml", "yml", "json"];

/// Loader for route tables exported by the host framework.
///
/// The root can be a single route file or a directory. Directories are walked recursively for
/// `.yaml`, `.yml` and `.json` files, skipping `target` and hidden directories, and the routes of
/// all files are concatenated in path order.
///
/// # Example
///
/// ```no_run
/// use swagger_from_routes::loader::RouteLoader;
/// use std::path::PathBuf;
///
/// let loader = RouteLoader::new(PathBuf::from("./routes"));
/// let result = loader.load().unwrap();
/// println!("Loaded {} routes", result.routes.len());
/// ```
pub struct RouteLoader {
    root_path: PathBuf,
}

/// Result of loading a route table.
#[derive(Debug)]
pub struct LoadResult {
    /// Every route found, in file order then declaration order
    pub routes: Vec<RouteDescriptor>,
    /// Files the routes were read from
    pub files: Vec<PathBuf>,
    /// Files that were skipped, and why
    pub warnings: Vec<String>,
}

impl RouteLoader {
    pub fn new(root_path: PathBuf) -> Self {
        Self { root_path }
    }

    /// Reads the route table.
    ///
    /// # Errors
    ///
    /// Returns an error if the root does not exist, or if it is a single file that cannot be
    /// parsed. Unreadable files inside a directory only produce warnings.
    pub fn load(&self) -> anyhow::Result<LoadResult> {
        if self.root_path.is_file() {
            let routes = parse_route_file(&self.root_path)?;
            return Ok(LoadResult {
                routes,
                files: vec![self.root_path.clone()],
                warnings: Vec::new(),
            });
        }

        if !self.root_path.is_dir() {
            anyhow::bail!("Route table path does not exist: {}", self.root_path.display());
        }

        let mut warnings = Vec::new();
        let mut candidates = Vec::new();

        for entry in WalkDir::new(&self.root_path)
            .into_iter()
            .filter_entry(|e| {
                if e.path() == self.root_path {
                    return true;
                }
                let file_name = e.file_name().to_string_lossy();
                !file_name.starts_with('.') && file_name != "target"
            })
        {
            match entry {
                Ok(entry) => {
                    let path = entry.path();
                    if path.is_file() && is_route_file(path) {
                        candidates.push(path.to_path_buf());
                    }
                }
                Err(e) => {
                    let warning = format!("Failed to access path: {}", e);
                    warn!("{}", warning);
                    warnings.push(warning);
                }
            }
        }

        candidates.sort();

        let mut routes = Vec::new();
        let mut files = Vec::new();
        for path in candidates {
            match parse_route_file(&path) {
                Ok(parsed) => {
                    debug!("Loaded {} routes from {}", parsed.len(), path.display());
                    routes.extend(parsed);
                    files.push(path);
                }
                Err(e) => {
                    let warning = format!("Skipping route file: {}", e);
                    warn!("{}", warning);
                    warnings.push(warning);
                }
            }
        }

        Ok(LoadResult {
            routes,
            files,
            warnings,
        })
    }
}

fn is_route_file(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| ROUTE_FILE_EXTENSIONS.contains(&ext))
}

/// Parse a file by its extension: `.json` as JSON, anything else as YAML.
fn parse_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)?;
    let is_json = path.extension().and_then(|s| s.to_str()) == Some("json");

    let parsed = if is_json {
        serde_json::from_str(&content).map_err(|e| e.to_string())
    } else {
        serde_yaml::from_str(&content).map_err(|e| e.to_string())
    };

    parsed.map_err(|message| Error::ParseError {
        file: path.to_path_buf(),
        message,
    })
}

/// Parse a single route file holding a list of routes.
pub fn parse_route_file(path: &Path) -> Result<Vec<RouteDescriptor>> {
    parse_file(path)
}

/// Load documentation settings from a YAML or JSON config file.
pub fn load_config(path: &Path) -> anyhow::Result<DocConfig> {
    let config = parse_file(path)
        .with_context(|| format!("Failed to load config file: {}", path.display()))?;
    debug!("Loaded config from {}", path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::HttpMethod;
    use tempfile::TempDir;

    const USERS_YAML: &str = r#"
- method: GET
  path: /users(.:format)
- method: GET
  path: /users/:id(.:format)
"#;

    const POSTS_JSON: &str = r#"[{ "method": "POST", "path": "/posts(.:format)" }]"#;

    #[test]
    fn test_load_single_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("routes.yaml");
        fs::write(&file_path, USERS_YAML).unwrap();

        let result = RouteLoader::new(file_path.clone()).load().unwrap();

        assert_eq!(result.routes.len(), 2);
        assert_eq!(result.files, vec![file_path]);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_load_directory_in_path_order() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir(root.join("nested")).unwrap();
        fs::write(root.join("b_users.yml"), USERS_YAML).unwrap();
        fs::write(root.join("nested/a_posts.json"), POSTS_JSON).unwrap();
        fs::write(root.join("README.md"), "# not routes").unwrap();

        let result = RouteLoader::new(root.to_path_buf()).load().unwrap();

        assert_eq!(result.files.len(), 2);
        let methods: Vec<_> = result.routes.iter().map(|r| r.method).collect();
        assert_eq!(
            methods,
            vec![HttpMethod::Get, HttpMethod::Get, HttpMethod::Post]
        );
    }

    #[test]
    fn test_skips_hidden_and_target_directories() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir(root.join("target")).unwrap();
        fs::create_dir(root.join(".cache")).unwrap();
        fs::write(root.join("target/routes.yaml"), USERS_YAML).unwrap();
        fs::write(root.join(".cache/routes.yaml"), USERS_YAML).unwrap();
        fs::write(root.join("routes.json"), POSTS_JSON).unwrap();

        let result = RouteLoader::new(root.to_path_buf()).load().unwrap();

        assert_eq!(result.routes.len(), 1);
    }

    #[test]
    fn test_bad_file_in_directory_is_a_warning() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("broken.yaml"), "- method: FETCH\n  path: /x").unwrap();
        fs::write(root.join("routes.json"), POSTS_JSON).unwrap();

        let result = RouteLoader::new(root.to_path_buf()).load().unwrap();

        assert_eq!(result.routes.len(), 1);
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].contains("broken.yaml"));
    }

    #[test]
    fn test_mistyped_param_is_a_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("routes.yaml");
        fs::write(
            &file_path,
            "- method: GET\n  path: /users/:id\n  params:\n    id:\n      required: \"true\"\n",
        )
        .unwrap();

        let err = RouteLoader::new(file_path).load().unwrap_err();
        assert!(
            matches!(err.downcast_ref::<Error>(), Some(Error::ParseError { .. })),
            "{}",
            err
        );
    }

    #[test]
    fn test_bad_single_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("routes.json");
        fs::write(&file_path, "{ not json").unwrap();

        assert!(RouteLoader::new(file_path).load().is_err());
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope");

        assert!(RouteLoader::new(missing).load().is_err());
    }

    #[test]
    fn test_load_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("doc.json");
        fs::write(
            &file_path,
            r#"{ "mount_path": "/docs", "markdown": true, "default_params": { "id": { "type": "Integer" } } }"#,
        )
        .unwrap();

        let config = load_config(&file_path).unwrap();

        assert_eq!(config.mount_path(), "/docs");
        assert!(config.markdown());
        assert_eq!(
            config.default_params()["id"].data_type.as_deref(),
            Some("Integer")
        );
    }
}
