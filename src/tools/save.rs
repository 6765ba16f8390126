//! Append research text to a local file.

use std::path::PathBuf;

use anyhow::Context;
use tokio::io::AsyncWriteExt;

/// Saves text to a `.txt` file, one timestamped entry per call.
pub struct SaveToFile {
    path: PathBuf,
}

impl SaveToFile {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub async fn run(&self, data: &str) -> anyhow::Result<String> {
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        let entry = format!("--- Research Output ---\nTimestamp: {timestamp}\n\n{data}\n\n\n");

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .with_context(|| format!("failed to open {}", self.path.display()))?;
        file.write_all(entry.as_bytes())
            .await
            .with_context(|| format!("failed to write {}", self.path.display()))?;
        file.flush().await?;

        tracing::info!(path = %self.path.display(), bytes = entry.len(), "Saved research output");

        Ok(format!("Data successfully saved to {}", self.path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn appends_timestamped_entries() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("research_output.txt");
        let tool = SaveToFile::new(path.clone());

        let message = tool.run("first finding").await.expect("save");
        assert!(message.starts_with("Data successfully saved to "));
        tool.run("second finding").await.expect("save");

        let contents = std::fs::read_to_string(&path).expect("read");
        let entries: Vec<&str> = contents
            .split("--- Research Output ---\n")
            .filter(|s| !s.is_empty())
            .collect();
        assert_eq!(entries.len(), 2);
        assert!(entries[0].starts_with("Timestamp: "));
        assert!(entries[0].ends_with("\n\nfirst finding\n\n\n"));
        assert!(entries[1].ends_with("\n\nsecond finding\n\n\n"));
    }

    #[tokio::test]
    async fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let tool = SaveToFile::new(dir.path().join("missing").join("out.txt"));
        let err = tool.run("data").await.unwrap_err();
        assert!(err.to_string().starts_with("failed to open"));
    }
}
