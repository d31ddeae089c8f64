//! Shared primitive types used across the portal core.

/// Identifier of a complaint category as served by the backend.
pub type CategoryId = String;

/// Backend-generated unique identifier for a persisted complaint.
pub type ReferenceNumber = String;
