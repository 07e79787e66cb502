//! Loads declarative form definitions from a directory of YAML files.

use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

use crate::domain::forms::{FormDefinition, FormDefinitionError};

/// Reads and validates every YAML form definition in `dir`, ordered by file
/// name. Any unreadable or invalid file fails the whole load.
pub async fn load_form_definitions(dir: &Path) -> Result<Vec<FormDefinition>, FormDefinitionError> {
    let io_error = |path: &Path, source: std::io::Error| FormDefinitionError::Io {
        path: path.display().to_string(),
        source,
    };

    let mut entries = fs::read_dir(dir).await.map_err(|e| io_error(dir, e))?;
    let mut paths: Vec<PathBuf> = Vec::new();
    while let Some(entry) = entries.next_entry().await.map_err(|e| io_error(dir, e))? {
        let path = entry.path();
        let is_yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext == "yaml" || ext == "yml");
        if is_yaml {
            paths.push(path);
        }
    }
    paths.sort();

    let mut definitions = Vec::with_capacity(paths.len());
    for path in paths {
        let yaml = fs::read_to_string(&path)
            .await
            .map_err(|e| io_error(&path, e))?;
        let definition = FormDefinition::from_yaml(&path.display().to_string(), &yaml)?;
        debug!("Loaded form definition '{}' from {}", definition.name, path.display());
        definitions.push(definition);
    }

    Ok(definitions)
}
