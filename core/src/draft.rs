//! Submitter details and the in-progress complaint draft.
//!
//! RULE: Validation here is a UX guard, not a security boundary.
//! The submission gateway remains authoritative for every limit
//! enforced in this module.

use crate::category::{self, Category};
use crate::error::{PortalError, PortalResult};
use crate::identity::Identity;
use crate::types::CategoryId;
use serde::{Deserialize, Serialize};

/// Hard cap on attachments per complaint.
pub const MAX_ATTACHMENTS: usize = 5;

/// Per-file size cap: 10 MiB.
pub const MAX_ATTACHMENT_BYTES: u64 = 10 * 1024 * 1024;

// ── Submitter ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SubmitterInfo {
    pub name: String,
    pub phone: String,
    pub email: String,
    #[serde(default)]
    pub address: Option<String>,
}

impl SubmitterInfo {
    /// Pre-fill from the signed-in identity at workflow start.
    pub fn from_identity(identity: Identity) -> Self {
        Self {
            name: identity.name,
            phone: identity.phone,
            email: identity.email,
            address: identity.address,
        }
    }

    /// Field-level validation for the stage 1 → 2 advance.
    /// Phone is deliberately free-form; only presence is required.
    pub fn validate(&self) -> PortalResult<()> {
        if self.name.trim().is_empty() {
            return Err(PortalError::Validation {
                field: "name",
                message: "submitter name is required".to_string(),
            });
        }
        if self.phone.trim().is_empty() {
            return Err(PortalError::Validation {
                field: "phone",
                message: "contact phone number is required".to_string(),
            });
        }
        if self.email.trim().is_empty() {
            return Err(PortalError::Validation {
                field: "email",
                message: "email address is required".to_string(),
            });
        }
        if !email_is_plausible(self.email.trim()) {
            return Err(PortalError::Validation {
                field: "email",
                message: format!("'{}' is not a valid email address", self.email.trim()),
            });
        }
        Ok(())
    }
}

/// Basic syntactic email check: one '@', non-empty local part, and a
/// domain with at least one dot separating non-empty labels.
fn email_is_plausible(email: &str) -> bool {
    let mut parts = email.splitn(2, '@');
    let local = parts.next().unwrap_or("");
    let Some(domain) = parts.next() else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain.contains('.') && domain.split('.').all(|label| !label.is_empty())
}

// ── Attachments ──────────────────────────────────────────────────────────────

/// A file the citizen attached to the draft. Metadata only — the bytes
/// stay with the hosting page until submission.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FileRef {
    pub name: String,
    pub size: u64,
    pub mime_type_hint: String,
}

impl FileRef {
    /// Build a FileRef, deriving the mime hint from the extension.
    pub fn new(name: &str, size: u64) -> Self {
        Self {
            name: name.to_string(),
            size,
            mime_type_hint: mime_hint(name).to_string(),
        }
    }
}

/// Mime type guessed from the file extension. The portal's upload note
/// advertises jpg, png, and pdf; everything else is an opaque blob.
pub fn mime_hint(name: &str) -> &'static str {
    let extension = name.rsplit('.').next().unwrap_or("").to_ascii_lowercase();
    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "pdf" => "application/pdf",
        _ => "application/octet-stream",
    }
}

// ── Draft ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ComplaintDraft {
    pub category_id: CategoryId,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub attachments: Vec<FileRef>,
}

impl ComplaintDraft {
    /// Required-field validation for the stage 2 → 3 advance.
    ///
    /// When the category list loaded successfully, the chosen id must be
    /// a selectable leaf. An empty list (degraded load) skips the
    /// membership check — the gateway will reject unknown ids.
    pub fn validate(&self, categories: &[Category]) -> PortalResult<()> {
        if self.category_id.trim().is_empty() {
            return Err(PortalError::Validation {
                field: "categoryId",
                message: "a complaint category must be selected".to_string(),
            });
        }
        if self.title.trim().is_empty() {
            return Err(PortalError::Validation {
                field: "title",
                message: "complaint title is required".to_string(),
            });
        }
        if self.content.trim().is_empty() {
            return Err(PortalError::Validation {
                field: "content",
                message: "complaint content is required".to_string(),
            });
        }
        if !categories.is_empty() && !category::is_leaf_id(categories, &self.category_id) {
            return Err(PortalError::Validation {
                field: "categoryId",
                message: format!("'{}' is not a selectable category", self.category_id),
            });
        }
        Ok(())
    }

    /// Add a batch of files. All-or-nothing per user action: if the batch
    /// would push the count past the cap, or any single file is over the
    /// size cap, the whole batch is rejected and the sequence is unchanged.
    pub fn attach_all(&mut self, files: Vec<FileRef>) -> PortalResult<()> {
        if self.attachments.len() + files.len() > MAX_ATTACHMENTS {
            return Err(PortalError::LimitExceeded(format!(
                "attachment limit is {MAX_ATTACHMENTS} files ({} already attached, {} offered)",
                self.attachments.len(),
                files.len(),
            )));
        }
        if let Some(oversize) = files.iter().find(|f| f.size > MAX_ATTACHMENT_BYTES) {
            return Err(PortalError::LimitExceeded(format!(
                "'{}' is {} bytes; each file must be at most {MAX_ATTACHMENT_BYTES} bytes",
                oversize.name, oversize.size,
            )));
        }
        self.attachments.extend(files);
        Ok(())
    }

    /// Remove by position. No confirmation, no undo. Out-of-range
    /// indices are ignored.
    pub fn remove_attachment(&mut self, index: usize) -> Option<FileRef> {
        if index < self.attachments.len() {
            Some(self.attachments.remove(index))
        } else {
            log::warn!(
                "remove_attachment index {index} out of range ({} attached)",
                self.attachments.len()
            );
            None
        }
    }
}
