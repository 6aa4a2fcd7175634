// Where raw platform catalogs come from

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::Platform;
use crate::normalization::CatalogNode;

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("failed to read catalog snapshot {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("catalog snapshot {path} is not valid JSON: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("no catalog registered for platform {0}")]
    Missing(Platform),
}

/// Supplies the raw nested top-chart batch for a platform.
pub trait CatalogSource: Send + Sync {
    fn load(&self, platform: Platform) -> Result<Vec<CatalogNode>, SourceError>;
}

/// Reads `<dir>/<platform>.top100.json` snapshot files.
#[derive(Debug, Clone)]
pub struct JsonDirSource {
    dir: PathBuf,
}

impl JsonDirSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, platform: Platform) -> PathBuf {
        self.dir.join(format!("{}.top100.json", platform.as_str()))
    }
}

impl CatalogSource for JsonDirSource {
    fn load(&self, platform: Platform) -> Result<Vec<CatalogNode>, SourceError> {
        let path = self.path_for(platform);
        let raw = fs::read_to_string(&path).map_err(|source| SourceError::Io {
            path: path.clone(),
            source,
        })?;
        parse_snapshot(&raw, &path)
    }
}

fn parse_snapshot(raw: &str, path: &Path) -> Result<Vec<CatalogNode>, SourceError> {
    let root: CatalogNode = serde_json::from_str(raw).map_err(|source| SourceError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(match root {
        CatalogNode::Batch(nodes) => nodes,
        other => vec![other],
    })
}

/// In-memory catalogs keyed by platform.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    catalogs: HashMap<Platform, Vec<CatalogNode>>,
}

impl StaticSource {
    pub fn with(mut self, platform: Platform, batches: Vec<CatalogNode>) -> Self {
        self.catalogs.insert(platform, batches);
        self
    }
}

impl CatalogSource for StaticSource {
    fn load(&self, platform: Platform) -> Result<Vec<CatalogNode>, SourceError> {
        self.catalogs
            .get(&platform)
            .cloned()
            .ok_or(SourceError::Missing(platform))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn reads_platform_snapshot_file() {
        let tmp = TempDir::new().expect("temp dir");
        fs::write(
            tmp.path().join("android.top100.json"),
            r#"[[{"app_id": 1, "name": "A"}], [{"app_id": 2, "name": "B"}]]"#,
        )
        .expect("write snapshot");

        let nodes = JsonDirSource::new(tmp.path())
            .load(Platform::Android)
            .expect("snapshot loads");

        assert_eq!(nodes.len(), 2);
        assert!(matches!(nodes[0], CatalogNode::Batch(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let tmp = TempDir::new().expect("temp dir");
        let err = JsonDirSource::new(tmp.path())
            .load(Platform::Ios)
            .expect_err("no snapshot present");
        assert!(matches!(err, SourceError::Io { .. }));
        assert!(err.to_string().contains("ios.top100.json"));
    }

    #[test]
    fn invalid_json_is_reported_with_path() {
        let tmp = TempDir::new().expect("temp dir");
        fs::write(tmp.path().join("ios.top100.json"), "[[{").expect("write snapshot");
        let err = JsonDirSource::new(tmp.path())
            .load(Platform::Ios)
            .expect_err("broken snapshot");
        assert!(matches!(err, SourceError::Json { .. }));
    }

    #[test]
    fn static_source_reports_unregistered_platform() {
        let source = StaticSource::default().with(Platform::Ios, vec![]);
        assert!(source.load(Platform::Ios).expect("registered").is_empty());
        assert!(matches!(
            source.load(Platform::Android),
            Err(SourceError::Missing(Platform::Android))
        ));
    }
}
