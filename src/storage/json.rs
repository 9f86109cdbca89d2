use crate::models::RoteiroBiblico;
use anyhow::{Context, Result};
use chrono::Utc;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;

/// Directory of pretty-printed script files
#[derive(Debug, Clone)]
pub struct JsonArchive {
    out_dir: PathBuf,
}

impl JsonArchive {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Write the script as `<timestamp>_<tipo>_<tema>.json`
    pub async fn save(&self, roteiro: &RoteiroBiblico) -> Result<PathBuf> {
        info!("Saving script: tema='{}', tipo='{}'", roteiro.tema, roteiro.tipo);

        fs::create_dir_all(&self.out_dir)
            .await
            .with_context(|| format!("Cannot create {}", self.out_dir.display()))?;

        let path = self.out_dir.join(file_name(roteiro));
        let content = serde_json::to_string_pretty(roteiro)?;
        fs::write(&path, content)
            .await
            .with_context(|| format!("Cannot write {}", path.display()))?;

        info!("📝 Script saved to {}", path.display());
        Ok(path)
    }
}

fn file_name(roteiro: &RoteiroBiblico) -> String {
    let timestamp = Utc::now().format("%Y%m%dT%H%M%SZ");
    let tema: String = roteiro
        .tema
        .chars()
        .map(|c| match c {
            ' ' | '/' | '\\' => '_',
            other => other,
        })
        .collect();

    format!("{}_{}_{}.json", timestamp, roteiro.tipo, tema)
}
