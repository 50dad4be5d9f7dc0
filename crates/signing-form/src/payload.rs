//! Submitted form payload

use serde::{Deserialize, Serialize};
use signing_core::{Entry, Identity, NativeId, SignerRole};

use crate::config::SigningMode;

/// One signer as handed to the submission transport
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignerRecord {
    pub identity: Identity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub native_id: Option<NativeId>,
    pub name: String,
    pub email: String,
    pub role: SignerRole,
    pub signing_order: u32,
}

impl From<&Entry> for SignerRecord {
    fn from(entry: &Entry) -> Self {
        Self {
            identity: entry.identity.clone(),
            native_id: entry.native_id,
            name: entry.name.clone(),
            email: entry.email.clone(),
            role: entry.role,
            signing_order: entry.order,
        }
    }
}

/// The signer list together with the signing mode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SigningPayload {
    pub signing_order: SigningMode,
    pub signers: Vec<SignerRecord>,
}

impl SigningPayload {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
