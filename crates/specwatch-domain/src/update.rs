//! Update results accumulated during a run

use std::path::PathBuf;

/// Record of one successful update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateResult {
    /// Vendor id
    pub vendor: String,
    /// API id
    pub api: String,
    /// Last-known version before this run, `none` if never recorded
    pub old_version: String,
    /// Newly recorded last-known version
    pub new_version: String,
    /// API version the spec declares
    pub api_version: String,
    /// Where the spec was archived
    pub spec_path: PathBuf,
}

impl UpdateResult {
    /// One line of the change summary:
    /// `- <vendor>/<api>: <old> → <new> (API v<apiVersion>)`
    pub fn summary_line(&self) -> String {
        format!(
            "- {}/{}: {} → {} (API v{})",
            self.vendor, self.api, self.old_version, self.new_version, self.api_version
        )
    }
}
