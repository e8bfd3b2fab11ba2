//! Real file system service: writes the activity snapshot

use std::path::PathBuf;

use async_trait::async_trait;
use shared::{fs as shared_fs, MemberRecord, OrgLayout};

use crate::error::ScannerResult;
use crate::traits::FileSystem;

pub struct RealFileSystem {
    layout: OrgLayout,
}

impl RealFileSystem {
    pub fn new(layout: OrgLayout) -> Self {
        Self { layout }
    }
}

#[async_trait]
impl FileSystem for RealFileSystem {
    async fn write_snapshot(&self, members: &[MemberRecord]) -> ScannerResult<PathBuf> {
        let path = self.layout.snapshot_path();
        shared_fs::write_json_atomic(&path, members).await?;
        Ok(path)
    }
}
