//! Workspace layout: where files live on disk.
//!
//! The workspace root is configuration handed to whoever needs file paths;
//! nothing in the tracker reads it from global state. Stored attachment
//! paths are always relative to the root and use `/` separators.

use std::path::{Component, Path, PathBuf};

use crate::error::CoreError;
use crate::types::DbId;

/// Directory (under the root) holding uploaded attachments.
pub const ATTACHMENTS_DIR: &str = "attachments";

/// Directory (under the root) holding log files.
pub const LOGS_DIR: &str = "logs";

/// Longest sanitized file name we keep (excluding the timestamp prefix).
const MAX_FILE_NAME_LEN: usize = 120;

/// The entity an uploaded file is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentOwner {
    Project(DbId),
    Step(DbId),
}

impl AttachmentOwner {
    fn dir_name(self) -> String {
        match self {
            Self::Project(id) => format!("project_{id}"),
            Self::Step(id) => format!("step_{id}"),
        }
    }
}

/// Paths derived from the configured workspace root.
#[derive(Debug, Clone)]
pub struct WorkspaceLayout {
    root: PathBuf,
}

impl WorkspaceLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.root.join(LOGS_DIR)
    }

    /// Workspace-relative path for a new upload.
    ///
    /// `stamp` disambiguates repeated uploads of the same file name
    /// (callers pass a Unix timestamp).
    pub fn attachment_path(&self, owner: AttachmentOwner, file_name: &str, stamp: i64) -> String {
        format!(
            "{ATTACHMENTS_DIR}/{}/{stamp}_{}",
            owner.dir_name(),
            sanitize_file_name(file_name)
        )
    }

    /// Resolve a stored relative path to an absolute location inside the root.
    ///
    /// Absolute paths and any `..` component are rejected so that a stored
    /// path can never point outside the workspace.
    pub fn resolve(&self, relative: &str) -> Result<PathBuf, CoreError> {
        let path = Path::new(relative);
        let escapes = path
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if relative.is_empty() || escapes {
            return Err(CoreError::Validation(format!(
                "Path '{relative}' must be relative to the workspace"
            )));
        }
        Ok(self.root.join(path))
    }
}

/// Reduce a client-supplied file name to a safe single path segment.
///
/// Keeps ASCII alphanumerics, `.`, `-` and `_`; everything else becomes
/// `_`. Leading dots are stripped so the result is never hidden or `..`.
pub fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or_default();
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let trimmed = cleaned.trim_start_matches('.');

    let mut result: String = if trimmed.len() > MAX_FILE_NAME_LEN {
        // Keep the extension when truncating.
        match trimmed.rsplit_once('.') {
            Some((stem, ext)) if ext.len() < 16 => {
                let keep = MAX_FILE_NAME_LEN.saturating_sub(ext.len() + 1);
                format!("{}.{ext}", &stem[..keep.min(stem.len())])
            }
            _ => trimmed[..MAX_FILE_NAME_LEN].to_string(),
        }
    } else {
        trimmed.to_string()
    };

    if result.is_empty() {
        result.push_str("file");
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attachment_paths_are_relative_and_scoped() {
        let layout = WorkspaceLayout::new("/srv/tracker");
        assert_eq!(
            layout.attachment_path(AttachmentOwner::Project(7), "spec sheet.pdf", 1700000000),
            "attachments/project_7/1700000000_spec_sheet.pdf"
        );
        assert_eq!(
            layout.attachment_path(AttachmentOwner::Step(3), "photo.jpg", 1),
            "attachments/step_3/1_photo.jpg"
        );
    }

    #[test]
    fn logs_live_under_root() {
        let layout = WorkspaceLayout::new("/srv/tracker");
        assert_eq!(layout.logs_dir(), PathBuf::from("/srv/tracker/logs"));
    }

    #[test]
    fn sanitize_strips_directories_and_odd_characters() {
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name("C:\\Users\\me\\plan v2.xlsx"), "plan_v2.xlsx");
        assert_eq!(sanitize_file_name(".hidden"), "hidden");
        assert_eq!(sanitize_file_name(".."), "file");
        assert_eq!(sanitize_file_name(""), "file");
        assert_eq!(sanitize_file_name("отчёт.docx"), "_____.docx");
    }

    #[test]
    fn sanitize_truncates_but_keeps_extension() {
        let long = format!("{}.pdf", "a".repeat(300));
        let cleaned = sanitize_file_name(&long);
        assert_eq!(cleaned.len(), MAX_FILE_NAME_LEN);
        assert!(cleaned.ends_with(".pdf"));
    }

    #[test]
    fn resolve_rejects_escaping_paths() {
        let layout = WorkspaceLayout::new("/srv/tracker");
        assert_eq!(
            layout.resolve("attachments/project_1/a.pdf").unwrap(),
            PathBuf::from("/srv/tracker/attachments/project_1/a.pdf")
        );
        assert!(layout.resolve("../outside.txt").is_err());
        assert!(layout.resolve("/etc/passwd").is_err());
        assert!(layout.resolve("attachments/../../x").is_err());
        assert!(layout.resolve("").is_err());
    }
}
