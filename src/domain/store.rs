use crate::domain::models::Document;
use anyhow::Result;
use async_trait::async_trait;
use std::path::Path;

/// Persistence and export collaborator. The palette core and the reducer
/// never touch the filesystem; they only issue commands that the event loop
/// dispatches to this facade.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TemplateStore: Send + Sync {
    /// Read and deserialize a template document.
    async fn load(&self, path: &Path) -> Result<Document>;

    /// Persist the document as JSON. Must not leave a torn file behind on
    /// failure.
    async fn save(&self, document: &Document, path: &Path) -> Result<()>;

    /// Render the document to a standalone HTML file.
    async fn export_html(&self, document: &Document, path: &Path) -> Result<()>;
}
