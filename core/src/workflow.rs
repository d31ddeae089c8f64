//! The complaint submission workflow — a three-stage state machine.
//!
//! STAGES (fixed, documented, never reordered):
//!   1. CollectingSubmitter — who is filing
//!   2. CollectingContent   — category, title, content, attachments
//!      └─ Verifying        — transient, classifier call outstanding
//!   3. ReviewingResult     — classifier suggestion on display
//!      └─ Submitting       — transient, gateway call outstanding
//!   T. Terminal            — reference number issued, instance spent
//!
//! RULES:
//!   - `reduce` is pure: state × action → state, no I/O. Collaborator
//!     calls are emitted as commands and executed by the [`Workflow`]
//!     runtime, which feeds outcomes back in as actions.
//!   - A failed call never advances the machine and never discards
//!     entered data; every retry is user-initiated.
//!   - While a call is outstanding the machine sits in a transient
//!     state and ignores user actions (duplicate-invocation guard).
//!   - Terminal is reached exactly once; a spent instance ignores
//!     further submit actions. A second complaint needs a new instance.

use crate::action::WorkflowAction;
use crate::category::{Category, CategoryProvider};
use crate::classifier::{ClassificationResult, ComplaintClassifier};
use crate::draft::{ComplaintDraft, SubmitterInfo};
use crate::gateway::{SubmissionGateway, SubmissionPayload};
use crate::identity::IdentityProvider;
use crate::types::ReferenceNumber;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ── State ────────────────────────────────────────────────────────────────────

/// Workflow state as a tagged union. Each variant carries exactly the
/// data accumulated so far, so retreating never loses entered fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum WorkflowState {
    CollectingSubmitter {
        submitter: SubmitterInfo,
        draft: ComplaintDraft,
    },
    CollectingContent {
        submitter: SubmitterInfo,
        draft: ComplaintDraft,
    },
    Verifying {
        submitter: SubmitterInfo,
        draft: ComplaintDraft,
    },
    ReviewingResult {
        submitter: SubmitterInfo,
        draft: ComplaintDraft,
        result: ClassificationResult,
    },
    Submitting {
        submitter: SubmitterInfo,
        draft: ComplaintDraft,
        result: ClassificationResult,
    },
    Terminal {
        reference_number: ReferenceNumber,
    },
}

impl Default for WorkflowState {
    fn default() -> Self {
        WorkflowState::CollectingSubmitter {
            submitter: SubmitterInfo::default(),
            draft: ComplaintDraft::default(),
        }
    }
}

impl WorkflowState {
    /// Visual stage number shown to the citizen. Transient states
    /// report the stage whose button triggered them; Terminal stays
    /// on the final stage.
    pub fn stage(&self) -> u8 {
        match self {
            WorkflowState::CollectingSubmitter { .. } => 1,
            WorkflowState::CollectingContent { .. } | WorkflowState::Verifying { .. } => 2,
            WorkflowState::ReviewingResult { .. }
            | WorkflowState::Submitting { .. }
            | WorkflowState::Terminal { .. } => 3,
        }
    }

    /// True while a collaborator call is outstanding. Hosts must
    /// disable the triggering button while busy.
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            WorkflowState::Verifying { .. } | WorkflowState::Submitting { .. }
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, WorkflowState::Terminal { .. })
    }

    fn name(&self) -> &'static str {
        match self {
            WorkflowState::CollectingSubmitter { .. } => "collecting_submitter",
            WorkflowState::CollectingContent { .. } => "collecting_content",
            WorkflowState::Verifying { .. } => "verifying",
            WorkflowState::ReviewingResult { .. } => "reviewing_result",
            WorkflowState::Submitting { .. } => "submitting",
            WorkflowState::Terminal { .. } => "terminal",
        }
    }
}

// ── Notices and commands ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    Info,
    Warning,
    Error,
}

/// A user-visible notification. Errors in this workflow are never
/// silently swallowed; they all surface as a notice.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

/// A collaborator call requested by the reducer. Executed by the
/// runtime; never more than one per step.
#[derive(Debug, Clone)]
pub enum Command {
    Classify { title: String, content: String },
    Submit { payload: SubmissionPayload },
}

/// Result of one reducer step.
pub struct Step {
    pub state: WorkflowState,
    pub notice: Option<Notice>,
    pub command: Option<Command>,
}

impl Step {
    fn stay(state: WorkflowState) -> Self {
        Self {
            state,
            notice: None,
            command: None,
        }
    }

    fn notify(state: WorkflowState, notice: Notice) -> Self {
        Self {
            state,
            notice: Some(notice),
            command: None,
        }
    }

    fn run(state: WorkflowState, command: Command) -> Self {
        Self {
            state,
            notice: None,
            command: Some(command),
        }
    }
}

// ── Reducer ──────────────────────────────────────────────────────────────────

/// Pure transition function. `categories` is the list loaded at
/// workflow construction (possibly empty after a degraded load) and is
/// only consulted for draft validation.
pub fn reduce(state: WorkflowState, action: WorkflowAction, categories: &[Category]) -> Step {
    // Busy guard: while a call is outstanding, user actions are dropped.
    if state.is_busy() && action.is_user_initiated() {
        log::warn!(
            "user action ignored while {}: {action:?}",
            state.name()
        );
        return Step::stay(state);
    }

    match (state, action) {
        // ── Stage 1 → 2 ───────────────────────────────────────────
        (
            WorkflowState::CollectingSubmitter { draft, .. },
            WorkflowAction::AdvanceSubmitter { submitter },
        ) => match submitter.validate() {
            Ok(()) => {
                log::debug!("submitter accepted, advancing to content stage");
                Step::stay(WorkflowState::CollectingContent { submitter, draft })
            }
            // Keep the rejected values so the form stays populated.
            Err(e) => Step::notify(
                WorkflowState::CollectingSubmitter { submitter, draft },
                Notice::error(e.to_string()),
            ),
        },

        // ── Stage 2 editing ───────────────────────────────────────
        (
            WorkflowState::CollectingContent {
                submitter,
                mut draft,
            },
            WorkflowAction::EditDraft {
                category_id,
                title,
                content,
            },
        ) => {
            if let Some(category_id) = category_id {
                draft.category_id = category_id;
            }
            if let Some(title) = title {
                draft.title = title;
            }
            if let Some(content) = content {
                draft.content = content;
            }
            Step::stay(WorkflowState::CollectingContent { submitter, draft })
        }

        (
            WorkflowState::CollectingContent {
                submitter,
                mut draft,
            },
            WorkflowAction::AttachFiles { files },
        ) => match draft.attach_all(files) {
            Ok(()) => Step::stay(WorkflowState::CollectingContent { submitter, draft }),
            Err(e) => Step::notify(
                WorkflowState::CollectingContent { submitter, draft },
                Notice::error(e.to_string()),
            ),
        },

        (
            WorkflowState::CollectingContent {
                submitter,
                mut draft,
            },
            WorkflowAction::RemoveAttachment { index },
        ) => {
            draft.remove_attachment(index);
            Step::stay(WorkflowState::CollectingContent { submitter, draft })
        }

        // ── Stage 2 → 3 (classification) ──────────────────────────
        (
            WorkflowState::CollectingContent { submitter, draft },
            WorkflowAction::RequestClassification,
        ) => match draft.validate(categories) {
            Ok(()) => {
                let command = Command::Classify {
                    title: draft.title.clone(),
                    content: draft.content.clone(),
                };
                Step::run(WorkflowState::Verifying { submitter, draft }, command)
            }
            Err(e) => Step::notify(
                WorkflowState::CollectingContent { submitter, draft },
                Notice::error(e.to_string()),
            ),
        },

        (
            WorkflowState::Verifying { submitter, draft },
            WorkflowAction::ClassificationCompleted { result },
        ) => {
            log::debug!("classification complete: {}", result.result_message);
            Step::stay(WorkflowState::ReviewingResult {
                submitter,
                draft,
                result,
            })
        }

        (
            WorkflowState::Verifying { submitter, draft },
            WorkflowAction::ClassificationFailed { reason },
        ) => Step::notify(
            WorkflowState::CollectingContent { submitter, draft },
            Notice::error(format!("complaint analysis failed, please retry: {reason}")),
        ),

        // ── Stage 3 → terminal (submission) ───────────────────────
        (
            WorkflowState::ReviewingResult {
                submitter,
                draft,
                result,
            },
            WorkflowAction::RequestSubmission,
        ) => {
            let command = Command::Submit {
                payload: SubmissionPayload::build(&draft),
            };
            Step::run(
                WorkflowState::Submitting {
                    submitter,
                    draft,
                    result,
                },
                command,
            )
        }

        (
            WorkflowState::Submitting { .. },
            WorkflowAction::SubmissionCompleted { reference_number },
        ) => {
            log::debug!("complaint accepted, reference number {reference_number}");
            let notice = Notice::info(format!(
                "complaint submitted; reference number {reference_number}"
            ));
            Step::notify(WorkflowState::Terminal { reference_number }, notice)
        }

        (
            WorkflowState::Submitting {
                submitter,
                draft,
                result,
            },
            WorkflowAction::SubmissionFailed { reason },
        ) => Step::notify(
            WorkflowState::ReviewingResult {
                submitter,
                draft,
                result,
            },
            Notice::error(format!("complaint submission failed, please retry: {reason}")),
        ),

        // ── Retreat ───────────────────────────────────────────────
        (WorkflowState::CollectingContent { submitter, draft }, WorkflowAction::Retreat) => {
            Step::stay(WorkflowState::CollectingSubmitter { submitter, draft })
        }

        // Leaving the review discards the suggestion; a fresh
        // classification runs on the next advance.
        (
            WorkflowState::ReviewingResult {
                submitter, draft, ..
            },
            WorkflowAction::Retreat,
        ) => Step::stay(WorkflowState::CollectingContent { submitter, draft }),

        // ── Everything else is a no-op ────────────────────────────
        (state, action) => {
            log::warn!("action ignored in state {}: {action:?}", state.name());
            Step::stay(state)
        }
    }
}

// ── Runtime ──────────────────────────────────────────────────────────────────

/// One in-memory run of the submission state machine, scoped to a
/// single submission attempt. Owns the collaborator handles and drives
/// each requested call to completion before applying its outcome.
pub struct Workflow {
    instance_id: Uuid,
    state: WorkflowState,
    categories: Vec<Category>,
    last_notice: Option<Notice>,
    classifier: Box<dyn ComplaintClassifier>,
    gateway: Box<dyn SubmissionGateway>,
}

impl Workflow {
    /// Build a fresh instance. Loads the category list once; a failed
    /// load degrades to an empty selector (the only swallowed error in
    /// this workflow) and pre-fills the submitter from the signed-in
    /// identity when there is one.
    pub fn new(
        identity: &dyn IdentityProvider,
        categories: &dyn CategoryProvider,
        classifier: Box<dyn ComplaintClassifier>,
        gateway: Box<dyn SubmissionGateway>,
    ) -> Self {
        let categories = match categories.categories() {
            Ok(list) => list,
            Err(e) => {
                log::warn!("category list load failed, continuing with empty selector: {e}");
                Vec::new()
            }
        };
        let submitter = identity
            .current_identity()
            .map(SubmitterInfo::from_identity)
            .unwrap_or_default();
        Self {
            instance_id: Uuid::new_v4(),
            state: WorkflowState::CollectingSubmitter {
                submitter,
                draft: ComplaintDraft::default(),
            },
            categories,
            last_notice: None,
            classifier,
            gateway,
        }
    }

    /// Apply one action. If the reducer requests a collaborator call,
    /// it is executed here and its outcome applied before returning, so
    /// the machine is never left in a transient state between calls.
    pub fn apply(&mut self, action: WorkflowAction) {
        let state = std::mem::take(&mut self.state);
        let step = reduce(state, action, &self.categories);
        self.state = step.state;
        self.last_notice = step.notice;

        match step.command {
            Some(Command::Classify { title, content }) => {
                let outcome = match self.classifier.classify(&title, &content) {
                    Ok(result) => WorkflowAction::ClassificationCompleted { result },
                    Err(e) => WorkflowAction::ClassificationFailed {
                        reason: e.to_string(),
                    },
                };
                self.apply(outcome);
            }
            Some(Command::Submit { payload }) => {
                let outcome = match self.gateway.create_complaint(&payload) {
                    Ok(submitted) => WorkflowAction::SubmissionCompleted {
                        reference_number: submitted.reference_number,
                    },
                    Err(e) => WorkflowAction::SubmissionFailed {
                        reason: e.to_string(),
                    },
                };
                self.apply(outcome);
            }
            None => {}
        }
    }

    // ── What the hosting page sees ────────────────────────────────

    pub fn instance_id(&self) -> Uuid {
        self.instance_id
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    pub fn stage(&self) -> u8 {
        self.state.stage()
    }

    pub fn is_busy(&self) -> bool {
        self.state.is_busy()
    }

    pub fn is_complete(&self) -> bool {
        self.state.is_terminal()
    }

    /// The notice raised by the most recent action, if any.
    pub fn last_notice(&self) -> Option<&Notice> {
        self.last_notice.as_ref()
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn submitter(&self) -> Option<&SubmitterInfo> {
        match &self.state {
            WorkflowState::CollectingSubmitter { submitter, .. }
            | WorkflowState::CollectingContent { submitter, .. }
            | WorkflowState::Verifying { submitter, .. }
            | WorkflowState::ReviewingResult { submitter, .. }
            | WorkflowState::Submitting { submitter, .. } => Some(submitter),
            WorkflowState::Terminal { .. } => None,
        }
    }

    pub fn draft(&self) -> Option<&ComplaintDraft> {
        match &self.state {
            WorkflowState::CollectingSubmitter { draft, .. }
            | WorkflowState::CollectingContent { draft, .. }
            | WorkflowState::Verifying { draft, .. }
            | WorkflowState::ReviewingResult { draft, .. }
            | WorkflowState::Submitting { draft, .. } => Some(draft),
            WorkflowState::Terminal { .. } => None,
        }
    }

    pub fn classification(&self) -> Option<&ClassificationResult> {
        match &self.state {
            WorkflowState::ReviewingResult { result, .. }
            | WorkflowState::Submitting { result, .. } => Some(result),
            _ => None,
        }
    }

    /// The completion event: set once Terminal is reached.
    pub fn reference_number(&self) -> Option<&str> {
        match &self.state {
            WorkflowState::Terminal { reference_number } => Some(reference_number),
            _ => None,
        }
    }
}
