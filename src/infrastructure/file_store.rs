use crate::domain::models::Document;
use crate::domain::store::TemplateStore;
use crate::infrastructure::html;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::Path;

/// JSON-file-backed template store.
pub struct FileTemplateStore;

impl FileTemplateStore {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileTemplateStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TemplateStore for FileTemplateStore {
    async fn load(&self, path: &Path) -> Result<Document> {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read template {}", path.display()))?;
        let document: Document = serde_json::from_str(&content)
            .with_context(|| format!("{} is not a valid template", path.display()))?;
        Ok(document)
    }

    async fn save(&self, document: &Document, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(document).context("failed to serialize template")?;

        // Write-then-rename so a crash mid-write cannot truncate the template.
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json.as_bytes())
            .await
            .with_context(|| format!("failed to write {}", tmp.display()))?;
        tokio::fs::rename(&tmp, path)
            .await
            .with_context(|| format!("failed to replace {}", path.display()))?;
        Ok(())
    }

    async fn export_html(&self, document: &Document, path: &Path) -> Result<()> {
        let rendered = html::render(document);
        tokio::fs::write(path, rendered.as_bytes())
            .await
            .with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::Block;

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("welcome.json");
        let store = FileTemplateStore::new();

        let mut doc = Document::new("Welcome");
        doc.blocks.push(Block::Text {
            text: "hello".to_string(),
        });

        store.save(&doc, &path).await.unwrap();
        let loaded = store.load(&path).await.unwrap();
        assert_eq!(loaded, doc);

        // No temp file left behind.
        assert!(!dir.path().join("welcome.json.tmp").exists());
    }

    #[tokio::test]
    async fn load_rejects_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        tokio::fs::write(&path, b"{ not json").await.unwrap();

        let err = FileTemplateStore::new().load(&path).await.unwrap_err();
        assert!(err.to_string().contains("not a valid template"));
    }

    #[tokio::test]
    async fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileTemplateStore::new()
            .load(&dir.path().join("absent.json"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("failed to read template"));
    }

    #[tokio::test]
    async fn export_writes_html() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.html");
        let doc = Document::starter();

        FileTemplateStore::new()
            .export_html(&doc, &path)
            .await
            .unwrap();

        let html = tokio::fs::read_to_string(&path).await.unwrap();
        assert!(html.starts_with("<!doctype html>"));
        assert!(html.contains("{{user.name}}"));
    }
}
