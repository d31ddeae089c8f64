//! The submission gateway collaborator — the system of record.
//!
//! The workflow hands the gateway a structured multipart payload; the
//! concrete wire encoding is owned by the gateway implementation.

use crate::draft::{ComplaintDraft, FileRef};
use crate::error::PortalResult;
use crate::types::{CategoryId, ReferenceNumber};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One file part of the multipart request. Field names follow the
/// backend contract: `attachment0`, `attachment1`, ...
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FilePart {
    pub field_name: String,
    pub file: FileRef,
}

/// The structured multipart request for creating a complaint:
/// ordered text fields plus one file part per attachment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
    pub fields: Vec<(String, String)>,
    pub files: Vec<FilePart>,
}

impl SubmissionPayload {
    pub fn build(draft: &ComplaintDraft) -> Self {
        let fields = vec![
            ("title".to_string(), draft.title.clone()),
            ("content".to_string(), draft.content.clone()),
            ("categoryId".to_string(), draft.category_id.clone()),
        ];
        let files = draft
            .attachments
            .iter()
            .enumerate()
            .map(|(index, file)| FilePart {
                field_name: format!("attachment{index}"),
                file: file.clone(),
            })
            .collect();
        Self { fields, files }
    }

    /// Value of a named text field, if present.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }
}

/// The persisted complaint as echoed back by the gateway.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedComplaint {
    pub reference_number: ReferenceNumber,
    pub title: String,
    pub content: String,
    pub category_id: CategoryId,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

pub trait SubmissionGateway {
    /// Persist a complaint. The single network call of the stage 3 →
    /// terminal transition. Success is the only path to Terminal.
    fn create_complaint(&self, payload: &SubmissionPayload) -> PortalResult<SubmittedComplaint>;
}
