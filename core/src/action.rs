use crate::classifier::ClassificationResult;
use crate::draft::{FileRef, SubmitterInfo};
use crate::types::{CategoryId, ReferenceNumber};
use serde::{Deserialize, Serialize};

/// Everything that can happen to a workflow instance.
///
/// User-initiated actions come from the hosting page; the
/// `*Completed` / `*Failed` pairs are fed back by the runtime when a
/// collaborator call resolves. Variants are never removed or reordered.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum WorkflowAction {
    // ── Stage 1 ───────────────────────────────────
    AdvanceSubmitter {
        submitter: SubmitterInfo,
    },

    // ── Stage 2 ───────────────────────────────────
    EditDraft {
        #[serde(default)]
        category_id: Option<CategoryId>,
        #[serde(default)]
        title: Option<String>,
        #[serde(default)]
        content: Option<String>,
    },
    AttachFiles {
        files: Vec<FileRef>,
    },
    RemoveAttachment {
        index: usize,
    },
    RequestClassification,
    ClassificationCompleted {
        result: ClassificationResult,
    },
    ClassificationFailed {
        reason: String,
    },

    // ── Stage 3 ───────────────────────────────────
    RequestSubmission,
    SubmissionCompleted {
        reference_number: ReferenceNumber,
    },
    SubmissionFailed {
        reason: String,
    },

    // ── Any collecting/reviewing stage ────────────
    Retreat,
}

impl WorkflowAction {
    /// Whether this action originates from the hosting page (as opposed
    /// to a collaborator call resolving). Only user actions are subject
    /// to the busy-state guard.
    pub fn is_user_initiated(&self) -> bool {
        !matches!(
            self,
            WorkflowAction::ClassificationCompleted { .. }
                | WorkflowAction::ClassificationFailed { .. }
                | WorkflowAction::SubmissionCompleted { .. }
                | WorkflowAction::SubmissionFailed { .. }
        )
    }
}
