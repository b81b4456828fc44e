// src/infrastructure/renderer.rs
use anyhow::{Context, Result};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::Builder;
use tracing::{debug, instrument};

use crate::constants::BROWSER_LAUNCH_DELAY_MS;

/// Puts a rendered board on disk and hands it to the system browser.
#[derive(Debug, Default)]
pub struct BoardRenderer {
    // Keep last temp dir alive to prevent deletion
    _temp_dir: Option<Arc<tempfile::TempDir>>,
}

impl BoardRenderer {
    pub fn new() -> Self {
        Self { _temp_dir: None }
    }

    pub fn write_to(&self, path: &Path, content: &str) -> Result<()> {
        File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?
            .write_all(content.as_bytes())
            .context("Failed to write board")?;
        debug!(?path, "Wrote board");
        Ok(())
    }

    pub fn create_temp_file(&mut self, content: &str) -> Result<PathBuf> {
        let temp_dir = Builder::new()
            .prefix("notegrid-")
            .rand_bytes(5)
            .tempdir()
            .context("Failed to create temporary directory")?;

        let file_path = temp_dir.path().join("board.html");
        self.write_to(&file_path, content)?;

        self._temp_dir = Some(Arc::new(temp_dir));

        Ok(file_path)
    }

    #[instrument(level = "debug")]
    pub fn open_in_browser(&mut self, path: &Path) -> Result<()> {
        let path_str = path.to_str().context("Failed to convert path to string")?;

        #[cfg(target_os = "macos")]
        {
            std::process::Command::new("open")
                .arg(path_str)
                .spawn()
                .context("Failed to open browser")?;
        }
        #[cfg(target_os = "windows")]
        {
            std::process::Command::new("cmd")
                .args(["/C", "start", path_str])
                .spawn()
                .context("Failed to open browser")?;
        }
        #[cfg(all(unix, not(target_os = "macos")))]
        {
            std::process::Command::new("xdg-open")
                .arg(path_str)
                .spawn()
                .context("Failed to open browser")?;
        }

        // browser reads the file after spawn returns
        std::thread::sleep(std::time::Duration::from_millis(BROWSER_LAUNCH_DELAY_MS));

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_content_when_creating_temp_file_then_file_holds_it() {
        let mut renderer = BoardRenderer::new();

        let path = renderer.create_temp_file("<html></html>").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<html></html>");
        assert!(path.ends_with("board.html"));
    }
}
