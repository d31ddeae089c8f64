//! minwon-core — the complaint submission workflow of the Minwon civic
//! portal.
//!
//! The portal lets citizens file municipal complaints ("민원") through a
//! three-stage form: submitter details, complaint content with
//! attachments, then an AI-suggested category/department review before
//! final submission. This crate holds everything with more than one
//! state: the submission state machine, its validation rules, and the
//! contracts of the three backend collaborators (category list, AI
//! classifier, submission gateway). Rendering, routing, and auth token
//! mechanics live elsewhere.
//!
//! The machine itself is a tagged union plus a pure reducer
//! ([`workflow::reduce`]); the [`workflow::Workflow`] runtime wraps it
//! with collaborator handles so hosts drive it with plain actions.

pub mod action;
pub mod category;
pub mod classifier;
pub mod draft;
pub mod error;
pub mod gateway;
pub mod identity;
pub mod types;
pub mod workflow;
