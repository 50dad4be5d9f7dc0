//! Session scripts
//!
//! A script lists the signers already on the document and the edits to apply,
//! in order:
//!
//! ```toml
//! mode = "sequential"
//!
//! [user]
//! name = "Me"
//! email = "me@example.com"
//!
//! [[signer]]
//! name = "Ann"
//! email = "ann@example.com"
//! native_id = 11
//! signed_at = "2024-05-01T10:00:00Z"
//!
//! [[step]]
//! action = "type-order"
//! row = 3
//! value = "1"
//! ```
//!
//! Rows are 1-based, as shown to the user.

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use signing_core::{
    Entry, Identity, NativeId, Sequence, SignerRole, SignerStatus, SignerStatusBook,
};
use signing_form::{CurrentUser, SigningMode};

use crate::error::{CliError, Result};

/// A parsed session script
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Script {
    /// Signing mode to start in; the form configuration decides otherwise
    #[serde(default)]
    pub mode: Option<SigningMode>,
    /// User for `add-self` steps
    #[serde(default)]
    pub user: Option<CurrentUser>,
    #[serde(default, rename = "signer")]
    pub signers: Vec<ScriptSigner>,
    #[serde(default, rename = "step")]
    pub steps: Vec<Step>,
}

/// A signer present before the session starts
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScriptSigner {
    /// Identity; `signer-<row>` when absent
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: SignerRole,
    /// Persisted record id
    #[serde(default)]
    pub native_id: Option<u64>,
    /// When the signer completed their action
    #[serde(default)]
    pub signed_at: Option<DateTime<Utc>>,
    /// Fields the signer has already filled in
    #[serde(default)]
    pub placed_fields: Vec<String>,
}

/// One user intent
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum Step {
    Add {
        #[serde(default)]
        name: String,
        #[serde(default)]
        email: String,
        #[serde(default)]
        role: SignerRole,
    },
    AddSelf,
    Remove {
        name: String,
    },
    /// A drag gesture; a missing `to` is a drop outside the list
    Drag {
        from: usize,
        #[serde(default)]
        to: Option<usize>,
    },
    TypeOrder {
        row: usize,
        value: String,
    },
    Mode {
        mode: SigningMode,
    },
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Add { name, .. } => write!(f, "add {}", name),
            Step::AddSelf => write!(f, "add-self"),
            Step::Remove { name } => write!(f, "remove {}", name),
            Step::Drag { from, to: Some(to) } => write!(f, "drag {} -> {}", from, to),
            Step::Drag { from, to: None } => write!(f, "drag {} -> (outside)", from),
            Step::TypeOrder { row, value } => write!(f, "type-order {} {:?}", row, value),
            Step::Mode { mode } => write!(f, "mode {}", mode),
        }
    }
}

/// Convert a 1-based row to a list position
pub fn position_of_row(row: usize) -> Result<usize> {
    row.checked_sub(1)
        .ok_or_else(|| CliError::user("rows start at 1"))
}

impl Script {
    /// Load a script file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::Script {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// The starting sequence and the status of every persisted signer
    ///
    /// # Errors
    ///
    /// Fails on duplicate ids and on signed signers without a native id.
    pub fn lineup(&self) -> Result<(Sequence, SignerStatusBook)> {
        let mut seen = HashSet::new();
        let mut book = SignerStatusBook::new();
        let mut entries = Vec::with_capacity(self.signers.len());

        for (index, signer) in self.signers.iter().enumerate() {
            let row = index + 1;
            let identity = Identity::new(
                signer
                    .id
                    .clone()
                    .unwrap_or_else(|| format!("signer-{}", row)),
            );
            if !seen.insert(identity.clone()) {
                return Err(CliError::user(format!("duplicate signer id: {}", identity)));
            }

            let mut entry = Entry::new(identity)
                .with_contact(signer.name.clone(), signer.email.clone())
                .with_role(signer.role)
                .with_order(u32::try_from(row).unwrap_or(u32::MAX));

            let status = SignerStatus {
                signed_at: signer.signed_at,
                placed_fields: signer.placed_fields.clone(),
            };
            match signer.native_id {
                Some(id) => {
                    let native_id = NativeId::new(id);
                    entry = entry.with_native_id(native_id);
                    book.insert(native_id, status);
                }
                None if status.has_acted() => {
                    return Err(CliError::user(format!(
                        "signer on row {} has acted but has no native_id",
                        row
                    )));
                }
                None => {}
            }
            entries.push(entry);
        }

        Ok((Sequence::from_entries(entries), book))
    }
}
