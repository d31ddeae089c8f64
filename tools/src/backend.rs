//! Local stand-ins for the portal's backend collaborators.
//!
//! The runner works offline: categories come from a static tree
//! matching the portal's service areas, classification is a
//! deterministic keyword table, and the gateway persists complaints to
//! a local sqlite database and issues reference numbers in the
//! backend's `YS-YYYY-NNNNN-RRRR` format.

use chrono::{DateTime, Datelike, Utc};
use minwon_core::category::{Category, CategoryProvider};
use minwon_core::classifier::{
    CategoryRef, ClassificationResult, ComplaintClassifier, DepartmentRef,
};
use minwon_core::error::{PortalError, PortalResult};
use minwon_core::gateway::{SubmissionGateway, SubmissionPayload, SubmittedComplaint};
use minwon_core::identity::{Identity, IdentityProvider};
use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;
use rusqlite::{params, Connection};
use std::cell::RefCell;

// ── Categories ───────────────────────────────────────────────────────────────

/// The portal's service areas. Two-level where the area has distinct
/// complaint types; complaints are always filed against a leaf.
pub struct StaticCategories;

impl CategoryProvider for StaticCategories {
    fn categories(&self) -> PortalResult<Vec<Category>> {
        Ok(vec![
            Category::leaf("general", "일반 민원"),
            Category::group(
                "env",
                "환경",
                vec![
                    Category::leaf("env-noise", "소음공해"),
                    Category::leaf("env-waste", "쓰레기/폐기물"),
                ],
            ),
            Category::group(
                "traffic",
                "교통/도로",
                vec![
                    Category::leaf("traffic-road", "도로보수"),
                    Category::leaf("traffic-parking", "불법주정차"),
                ],
            ),
            Category::leaf("housing", "주택/건축"),
            Category::leaf("business", "기업/창업"),
            Category::leaf("education", "교육"),
            Category::leaf("health", "보건/복지"),
            Category::leaf("community", "지역사회"),
        ])
    }
}

// ── Classifier ───────────────────────────────────────────────────────────────

struct Rule {
    keywords: &'static [&'static str],
    category_id: &'static str,
    category_name: &'static str,
    department: &'static str,
    eta: &'static str,
}

const RULES: &[Rule] = &[
    Rule {
        keywords: &["소음", "시끄"],
        category_id: "env-noise",
        category_name: "소음공해",
        department: "환경관리과",
        eta: "3-5일",
    },
    Rule {
        keywords: &["쓰레기", "폐기물", "무단투기"],
        category_id: "env-waste",
        category_name: "쓰레기/폐기물",
        department: "환경관리과",
        eta: "3-5일",
    },
    Rule {
        keywords: &["도로", "포장", "포트홀"],
        category_id: "traffic-road",
        category_name: "도로보수",
        department: "도로관리과",
        eta: "7-10일",
    },
    Rule {
        keywords: &["주차", "주정차"],
        category_id: "traffic-parking",
        category_name: "불법주정차",
        department: "교통행정과",
        eta: "3-5일",
    },
    Rule {
        keywords: &["건축", "공사"],
        category_id: "housing",
        category_name: "주택/건축",
        department: "건축과",
        eta: "7-10일",
    },
    Rule {
        keywords: &["복지", "보건"],
        category_id: "health",
        category_name: "보건/복지",
        department: "주민복지과",
        eta: "5-7일",
    },
];

/// Deterministic keyword classifier: the first rule whose keyword
/// appears in the title or content wins.
pub struct RuleClassifier;

impl ComplaintClassifier for RuleClassifier {
    fn classify(&self, title: &str, content: &str) -> PortalResult<ClassificationResult> {
        let haystack = format!("{title} {content}");
        let matched = RULES
            .iter()
            .find(|rule| rule.keywords.iter().any(|k| haystack.contains(k)));

        let result = match matched {
            Some(rule) => ClassificationResult {
                result_message: "민원 내용이 AI에 의해 분석되었습니다.".to_string(),
                suggested_category: Some(CategoryRef {
                    id: Some(rule.category_id.to_string()),
                    name: rule.category_name.to_string(),
                }),
                suggested_department: Some(DepartmentRef {
                    id: None,
                    name: rule.department.to_string(),
                }),
                estimated_processing_time: Some(rule.eta.to_string()),
            },
            None => ClassificationResult {
                result_message: "민원 내용이 AI에 의해 분석되었습니다.".to_string(),
                suggested_category: Some(CategoryRef {
                    id: Some("general".to_string()),
                    name: "일반 민원".to_string(),
                }),
                suggested_department: Some(DepartmentRef {
                    id: None,
                    name: "민원봉사과".to_string(),
                }),
                estimated_processing_time: Some("5-7일".to_string()),
            },
        };
        Ok(result)
    }
}

// ── Gateway ──────────────────────────────────────────────────────────────────

/// Sqlite-backed submission gateway. Plays the backend system of
/// record for headless runs.
pub struct LocalGateway {
    conn: Connection,
    rng: RefCell<Pcg64Mcg>,
}

impl LocalGateway {
    /// Open (or create) the complaint store. `seed` drives the random
    /// suffix of generated reference numbers, so runs are reproducible.
    pub fn open(path: &str, seed: u64) -> PortalResult<Self> {
        let conn = Connection::open(path).map_err(storage_error)?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS complaint (
                reference_number TEXT PRIMARY KEY,
                title            TEXT NOT NULL,
                content          TEXT NOT NULL,
                category_id      TEXT NOT NULL,
                status           TEXT NOT NULL,
                created_at       TEXT NOT NULL,
                attachment_count INTEGER NOT NULL
             )",
            [],
        )
        .map_err(storage_error)?;
        Ok(Self {
            conn,
            rng: RefCell::new(Pcg64Mcg::seed_from_u64(seed)),
        })
    }

    /// Reference numbers follow the backend's visible format:
    /// `YS-<year>-<5-digit serial>-<4-digit random>`.
    fn next_reference_number(&self, now: DateTime<Utc>) -> PortalResult<String> {
        let serial: i64 = self
            .conn
            .query_row("SELECT COUNT(*) + 1 FROM complaint", [], |row| row.get(0))
            .map_err(storage_error)?;
        let suffix = self.rng.borrow_mut().next_u64() % 10_000;
        Ok(format!("YS-{}-{serial:05}-{suffix:04}", now.year()))
    }

    /// Previously submitted complaints, newest first. Backs the
    /// runner's end-of-run summary, like the portal's status lookup.
    pub fn list_complaints(&self) -> PortalResult<Vec<SubmittedComplaint>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT reference_number, title, content, category_id, status, created_at
                 FROM complaint ORDER BY created_at DESC",
            )
            .map_err(storage_error)?;
        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, String>(4)?,
                    row.get::<_, String>(5)?,
                ))
            })
            .map_err(storage_error)?;

        let mut complaints = Vec::new();
        for row in rows {
            let (reference_number, title, content, category_id, status, created_at) =
                row.map_err(storage_error)?;
            let created_at = DateTime::parse_from_rfc3339(&created_at)
                .map_err(|e| PortalError::Other(anyhow::anyhow!("bad created_at: {e}")))?
                .with_timezone(&Utc);
            complaints.push(SubmittedComplaint {
                reference_number,
                title,
                content,
                category_id,
                status,
                created_at,
            });
        }
        Ok(complaints)
    }
}

impl SubmissionGateway for LocalGateway {
    fn create_complaint(&self, payload: &SubmissionPayload) -> PortalResult<SubmittedComplaint> {
        let title = required_field(payload, "title")?;
        let content = required_field(payload, "content")?;
        let category_id = required_field(payload, "categoryId")?;

        let now = Utc::now();
        let reference_number = self.next_reference_number(now)?;
        self.conn
            .execute(
                "INSERT INTO complaint (
                    reference_number, title, content, category_id,
                    status, created_at, attachment_count
                 ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    &reference_number,
                    title,
                    content,
                    category_id,
                    "RECEIVED",
                    now.to_rfc3339(),
                    payload.files.len() as i64,
                ],
            )
            .map_err(storage_error)?;
        log::debug!(
            "stored complaint {reference_number} ({} attachments)",
            payload.files.len()
        );

        Ok(SubmittedComplaint {
            reference_number,
            title: title.to_string(),
            content: content.to_string(),
            category_id: category_id.to_string(),
            status: "RECEIVED".to_string(),
            created_at: now,
        })
    }
}

fn required_field<'a>(payload: &'a SubmissionPayload, name: &'static str) -> PortalResult<&'a str> {
    payload.field(name).ok_or_else(|| PortalError::Transport {
        operation: "create complaint",
        message: format!("multipart payload missing '{name}' field"),
    })
}

fn storage_error(e: rusqlite::Error) -> PortalError {
    PortalError::Transport {
        operation: "create complaint",
        message: e.to_string(),
    }
}

// ── Identity ─────────────────────────────────────────────────────────────────

/// A fixed signed-in citizen for scripted runs.
pub struct SessionIdentity(pub Identity);

impl IdentityProvider for SessionIdentity {
    fn current_identity(&self) -> Option<Identity> {
        Some(self.0.clone())
    }
}
