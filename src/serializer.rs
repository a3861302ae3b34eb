//! Serialization of API description documents to JSON or YAML.

use crate::document::Document;
use anyhow::{Context, Result};
use log::debug;
use std::fs;
use std::path::Path;

/// Serializes a document to pretty-printed JSON, the format documentation UIs consume.
pub fn serialize_json(doc: &Document) -> Result<String> {
    debug!("Serializing API description to JSON");
    serde_json::to_string_pretty(doc).context("Failed to serialize API description to JSON")
}

/// Serializes a document to YAML.
pub fn serialize_yaml(doc: &Document) -> Result<String> {
    debug!("Serializing API description to YAML");
    serde_yaml::to_string(doc).context("Failed to serialize API description to YAML")
}

/// Writes string content to a file, creating parent directories as needed.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written to.
pub fn write_to_file(content: &str, path: &Path) -> Result<()> {
    debug!("Writing content to file: {}", path.display());

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    fs::write(path, content)
        .with_context(|| format!("Failed to write to file: {}", path.display()))?;

    debug!("Successfully wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{DocumentNode, Operation};
    use crate::route::HttpMethod;
    use tempfile::TempDir;

    fn create_test_document() -> Document {
        Document {
            api_version: "1.0".to_string(),
            swagger_version: "1.1".to_string(),
            base_path: "http://api.example.com".to_string(),
            resource_path: None,
            operations: Some(Vec::new()),
            apis: vec![DocumentNode {
                path: "/users{format}".to_string(),
                operations: vec![Operation {
                    notes: None,
                    group: Some("users".to_string()),
                    summary: "List users".to_string(),
                    nickname: "GET-users-format".to_string(),
                    http_method: HttpMethod::Get,
                    parameters: Vec::new(),
                    error_responses: None,
                }],
            }],
        }
    }

    #[test]
    fn test_serialize_json() {
        let json = serialize_json(&create_test_document()).unwrap();

        assert!(json.contains("\"swaggerVersion\": \"1.1\""));
        assert!(json.contains("\"httpMethod\": \"GET\""));
        assert!(json.contains('\n'), "JSON should be pretty printed");

        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["apis"][0]["operations"][0]["group"], "users");
    }

    #[test]
    fn test_serialize_json_keeps_field_order() {
        let json = serialize_json(&create_test_document()).unwrap();

        let api_version = json.find("apiVersion").unwrap();
        let base_path = json.find("basePath").unwrap();
        let apis = json.find("\"apis\"").unwrap();
        assert!(api_version < base_path && base_path < apis);
    }

    #[test]
    fn test_serialize_yaml() {
        let yaml = serialize_yaml(&create_test_document()).unwrap();

        assert!(yaml.contains("apiVersion:"));
        assert!(yaml.contains("swaggerVersion:"));
        assert!(yaml.contains("nickname: GET-users-format"));
    }

    #[test]
    fn test_write_to_file_creates_directories() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("docs").join("nested").join("api.json");

        write_to_file("{}", &file_path).unwrap();

        assert_eq!(fs::read_to_string(&file_path).unwrap(), "{}");
    }

    #[test]
    fn test_write_to_file_overwrites_existing() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("api.yaml");

        write_to_file("initial content", &file_path).unwrap();
        write_to_file("new content", &file_path).unwrap();

        assert_eq!(fs::read_to_string(&file_path).unwrap(), "new content");
    }

    #[test]
    fn test_json_document_reads_back() {
        let doc = create_test_document();
        let json = serialize_json(&doc).unwrap();

        let read_back: Document = serde_json::from_str(&json).unwrap();
        assert_eq!(read_back, doc);
    }
}
