//! Loading cart snapshots and forms from files.

use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::CommandError;

/// Read and parse `path`.
pub async fn load<T: DeserializeOwned>(path: &Path) -> Result<T, CommandError> {
    let content =
        tokio::fs::read_to_string(path)
            .await
            .map_err(|source| CommandError::Read {
                path: path.to_path_buf(),
                source,
            })?;

    tracing::debug!(path = %path.display(), bytes = content.len(), "Loaded input file");
    parse(path, &content)
}

/// Parse `content` as YAML or JSON, chosen by the extension of `path`.
pub fn parse<T: DeserializeOwned>(path: &Path, content: &str) -> Result<T, CommandError> {
    if is_yaml(path) {
        serde_yaml::from_str(content).map_err(|source| CommandError::Yaml {
            path: path.to_path_buf(),
            source,
        })
    } else {
        serde_json::from_str(content).map_err(|source| CommandError::Json {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
}
