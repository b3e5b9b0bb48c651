use crate::domain::models::Document;
use std::path::PathBuf;

/// Side effects the reducer requests; executed by async store workers.
#[derive(Debug, Clone)]
pub enum Command {
    Load(PathBuf),
    Save(Document, PathBuf),
    Export(Document, PathBuf),
}
