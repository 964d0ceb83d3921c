use crate::domain::ports::PortTableSource;
use crate::utils::error::Result;
use std::path::PathBuf;

/// Port table read from the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalPortTable {
    path: PathBuf,
}

impl LocalPortTable {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PortTableSource for LocalPortTable {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn read_table(&self) -> Result<Vec<u8>> {
        let data = tokio::fs::read(&self.path).await?;
        Ok(data)
    }
}
