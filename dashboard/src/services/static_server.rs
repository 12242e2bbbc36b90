//! Static file serving service
//!
//! Serves the map page and its assets with proper caching and content types

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::fs;

use shared::{ProcessId, process_debug, process_error, process_warn};

use crate::error::{DashboardError, DashboardResult};
use crate::traits::{StaticFileResponse, StaticFileServer};

/// Real static file server implementation
#[derive(Clone)]
pub struct RealStaticFileServer {
    /// Base directory for static files
    base_dir: PathBuf,

    /// MIME type mappings
    mime_types: HashMap<&'static str, &'static str>,
}

impl RealStaticFileServer {
    /// Create new static file server
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Self {
        let mime_types = HashMap::from([
            ("html", "text/html; charset=utf-8"),
            ("css", "text/css"),
            ("js", "application/javascript"),
            ("json", "application/json"),
            ("png", "image/png"),
            ("svg", "image/svg+xml"),
            ("ico", "image/x-icon"),
        ]);

        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
            mime_types,
        }
    }

    /// Get MIME type from file extension
    fn get_mime_type(&self, path: &str) -> String {
        Path::new(path)
            .extension()
            .and_then(|e| e.to_str())
            .and_then(|ext| self.mime_types.get(ext.to_lowercase().as_str()))
            .unwrap_or(&"application/octet-stream")
            .to_string()
    }

    /// Get cache control header based on file type
    fn get_cache_control(&self, path: &str) -> Option<String> {
        let extension = Path::new(path).extension()?.to_str()?.to_lowercase();
        match extension.as_str() {
            "html" => Some("no-cache".to_string()),
            "js" | "css" | "json" => Some("public, max-age=3600".to_string()), // 1 hour
            "png" | "svg" | "ico" => Some("public, max-age=86400".to_string()), // 1 day
            _ => None,
        }
    }

    /// Resolve file path and prevent directory traversal
    fn resolve_path(&self, request_path: &str) -> DashboardResult<PathBuf> {
        let clean_path = request_path.trim_start_matches('/');
        let file_path = if clean_path.is_empty() { "index.html" } else { clean_path };

        let full_path = self.base_dir.join(file_path);

        // Canonicalize to prevent directory traversal
        let canonical_path = full_path.canonicalize().map_err(|_| DashboardError::StaticFileNotFound {
            path: request_path.to_string(),
        })?;

        let canonical_base = self.base_dir.canonicalize().map_err(|e| {
            process_error!(ProcessId::current(), "Failed to canonicalize base directory: {}", e);
            DashboardError::internal("Static file base directory not accessible")
        })?;

        if !canonical_path.starts_with(&canonical_base) {
            return Err(DashboardError::AccessDenied {
                path: request_path.to_string(),
            });
        }

        Ok(canonical_path)
    }
}

#[async_trait]
impl StaticFileServer for RealStaticFileServer {
    async fn serve_file(&self, path: &str) -> DashboardResult<StaticFileResponse> {
        let file_path = self.resolve_path(path)?;

        if file_path.is_dir() {
            return Err(DashboardError::StaticFileNotFound {
                path: path.to_string(),
            });
        }

        match fs::read(&file_path).await {
            Ok(content) => {
                process_debug!(ProcessId::current(), "📄 Served static file: {} ({} bytes)", path, content.len());

                let mut response = StaticFileResponse::new(content, self.get_mime_type(path));
                if let Some(cache) = self.get_cache_control(path) {
                    response = response.with_cache_control(cache);
                }
                Ok(response)
            }
            Err(e) => {
                process_warn!(ProcessId::current(), "❌ Failed to read static file {}: {}", path, e);
                Err(DashboardError::StaticFileNotFound {
                    path: path.to_string(),
                })
            }
        }
    }
}

impl Default for RealStaticFileServer {
    fn default() -> Self {
        Self::new("./static")
    }
}
