//! The AI classification collaborator.
//!
//! Given the draft's title and content, the classifier suggests a
//! category, a responsible department, and an estimated processing
//! time. Classification has no side effect on stored state, so the
//! workflow may re-issue the same call after a failure.

use crate::error::PortalResult;
use serde::{Deserialize, Serialize};

/// A category suggestion. The backend sometimes returns a name without
/// an id, so the id is optional.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRef {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
}

/// A department suggestion, same shape as [`CategoryRef`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentRef {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
}

/// Result of one classification call. Produced at most once per
/// successful stage 2 → 3 transition, read-only afterward, and never
/// persisted client-side.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResult {
    pub result_message: String,
    #[serde(default)]
    pub suggested_category: Option<CategoryRef>,
    #[serde(default)]
    pub suggested_department: Option<DepartmentRef>,
    #[serde(default)]
    pub estimated_processing_time: Option<String>,
}

pub trait ComplaintClassifier {
    /// Classify a title/content pair. The single network call of the
    /// stage 2 → 3 transition.
    fn classify(&self, title: &str, content: &str) -> PortalResult<ClassificationResult>;
}
