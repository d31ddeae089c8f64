//! The signed-in citizen, as reported by the auth collaborator.
//!
//! The workflow never touches tokens or session storage. It only asks
//! "who is signed in, if anyone" to pre-fill the submitter form.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub name: String,
    pub phone: String,
    pub email: String,
    #[serde(default)]
    pub address: Option<String>,
}

pub trait IdentityProvider {
    /// The current authenticated identity, or None for anonymous use.
    fn current_identity(&self) -> Option<Identity>;
}
