//! minwon-runner: headless driver for the complaint submission workflow.
//!
//! Wires the workflow to the local backend stand-ins and runs one
//! scripted submission end to end, printing the classification result
//! and the issued reference number.
//!
//! Usage:
//!   minwon-runner --seed 42 --db complaints.db
//!   minwon-runner --category env-noise --title "층간소음" --content "밤마다 소음"

mod backend;

use anyhow::{bail, Result};
use backend::{LocalGateway, RuleClassifier, SessionIdentity, StaticCategories};
use minwon_core::action::WorkflowAction;
use minwon_core::classifier::ClassificationResult;
use minwon_core::draft::{FileRef, SubmitterInfo};
use minwon_core::gateway::SubmittedComplaint;
use minwon_core::identity::Identity;
use minwon_core::workflow::{NoticeKind, Workflow};
use std::env;

/// End-of-run state, printable as JSON for tooling on top of the runner.
#[derive(serde::Serialize)]
struct RunSummary {
    reference_number: String,
    classification: Option<ClassificationResult>,
    stored_complaints: Vec<SubmittedComplaint>,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 42u64);
    let json = args.iter().any(|a| a == "--json");
    let db = string_arg(&args, "--db", ":memory:");
    let category = string_arg(&args, "--category", "env-noise");
    let title = string_arg(&args, "--title", "아파트 층간소음 문제");
    let content = string_arg(
        &args,
        "--content",
        "위층에서 발생하는 소음으로 생활에 불편을 겪고 있습니다. 밤 10시 이후에도 소음이 계속됩니다.",
    );

    if !json {
        println!("Minwon portal — submission runner");
        println!("  seed: {seed}");
        println!("  db:   {db}");
        println!();
    }

    let identity = SessionIdentity(Identity {
        name: "홍길동".to_string(),
        phone: "010-1234-5678".to_string(),
        email: "hong@example.com".to_string(),
        address: Some("대전광역시 유성구".to_string()),
    });
    let gateway = LocalGateway::open(&db, seed)?;

    let mut workflow = Workflow::new(
        &identity,
        &StaticCategories,
        Box::new(RuleClassifier),
        Box::new(gateway),
    );

    // Stage 1: submitter details pre-filled from the session identity.
    let submitter = workflow
        .submitter()
        .cloned()
        .unwrap_or_else(SubmitterInfo::default);
    workflow.apply(WorkflowAction::AdvanceSubmitter { submitter });
    check(&workflow)?;

    // Stage 2: complaint content plus a sample attachment.
    workflow.apply(WorkflowAction::EditDraft {
        category_id: Some(category),
        title: Some(title),
        content: Some(content),
    });
    workflow.apply(WorkflowAction::AttachFiles {
        files: vec![FileRef::new("noise-recording.pdf", 220_000)],
    });
    check(&workflow)?;

    workflow.apply(WorkflowAction::RequestClassification);
    check(&workflow)?;

    let classification = workflow.classification().cloned();
    if !json {
        if let Some(ref result) = classification {
            println!("AI classification:");
            println!("  {}", result.result_message);
            if let Some(ref suggested) = result.suggested_category {
                println!("  category:   {}", suggested.name);
            }
            if let Some(ref department) = result.suggested_department {
                println!("  department: {}", department.name);
            }
            if let Some(ref eta) = result.estimated_processing_time {
                println!("  estimated:  {eta}");
            }
            println!();
        }
    }

    // Stage 3: final submission.
    workflow.apply(WorkflowAction::RequestSubmission);
    check(&workflow)?;

    let Some(reference_number) = workflow.reference_number() else {
        bail!("workflow did not reach the terminal state");
    };

    let stored_complaints = if db != ":memory:" {
        LocalGateway::open(&db, seed)?.list_complaints()?
    } else {
        Vec::new()
    };

    let summary = RunSummary {
        reference_number: reference_number.to_string(),
        classification,
        stored_complaints,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("complaint accepted: {}", summary.reference_number);
    if !summary.stored_complaints.is_empty() {
        println!();
        println!("stored complaints ({}):", summary.stored_complaints.len());
        for complaint in &summary.stored_complaints {
            println!(
                "  {}  [{}]  {}",
                complaint.reference_number, complaint.status, complaint.title
            );
        }
    }

    Ok(())
}

/// Bail out if the last action raised an error notice.
fn check(workflow: &Workflow) -> Result<()> {
    if let Some(notice) = workflow.last_notice() {
        match notice.kind {
            NoticeKind::Error => bail!("stage {}: {}", workflow.stage(), notice.message),
            _ => log::info!("{}", notice.message),
        }
    }
    Ok(())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}

fn string_arg(args: &[String], flag: &str, default: &str) -> String {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].clone())
        .unwrap_or_else(|| default.to_string())
}
