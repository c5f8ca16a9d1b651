// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Caller identity resolution
//!
//! The substrate attaches an opaque credential to every operation. It is a
//! JSON document carrying the membership-service id of the issuing
//! organization and the X.509 subject of the caller:
//!
//! ```json
//! {"mspId": "InstitutionMSP", "subject": "x509::CN=prof.dupont,OU=client::CN=ca.institution"}
//! ```
//!
//! Every authorization decision keys off the resolved [`Caller`].

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors resolving a credential. Always fatal for the operation.
#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("malformed credential: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("credential carries no organization")]
    MissingOrganization,
    #[error("credential subject has no common name: {0:?}")]
    MissingCommonName(String),
}

/// Organizational affiliation of a caller
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Organization {
    Institution,
    Learner,
    /// An affiliation outside the known set; denied by every check
    Unrecognized(String),
}

impl Organization {
    /// Map a membership-service id to an organization
    pub fn from_msp_id(msp_id: &str) -> Self {
        match msp_id {
            "InstitutionMSP" | "Institution" => Organization::Institution,
            "LearnerMSP" | "Learner" => Organization::Learner,
            other => Organization::Unrecognized(other.to_string()),
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Organization::Unrecognized(_))
    }
}

impl fmt::Display for Organization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Organization::Institution => write!(f, "Institution"),
            Organization::Learner => write!(f, "Learner"),
            Organization::Unrecognized(msp) => write!(f, "{}", msp),
        }
    }
}

/// The resolved caller of an operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub org: Organization,
    pub id: String,
}

impl Caller {
    pub fn new(org: Organization, id: impl Into<String>) -> Self {
        Self { org, id: id.into() }
    }

    pub fn institution(id: impl Into<String>) -> Self {
        Self::new(Organization::Institution, id)
    }

    pub fn learner(id: impl Into<String>) -> Self {
        Self::new(Organization::Learner, id)
    }

    pub fn is_institution(&self) -> bool {
        self.org == Organization::Institution
    }

    pub fn is_learner(&self) -> bool {
        self.org == Organization::Learner
    }
}

impl fmt::Display for Caller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.id, self.org)
    }
}

/// Wire form of a credential
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credential {
    pub msp_id: String,
    pub subject: String,
}

impl Credential {
    pub fn new(msp_id: impl Into<String>, subject: impl Into<String>) -> Self {
        Self {
            msp_id: msp_id.into(),
            subject: subject.into(),
        }
    }

    /// Credential for an institution member with the given common name
    pub fn institution(common_name: &str) -> Self {
        Self::new("InstitutionMSP", format!("CN={},OU=client", common_name))
    }

    /// Credential for a learner with the given common name
    pub fn learner(common_name: &str) -> Self {
        Self::new("LearnerMSP", format!("CN={},OU=client", common_name))
    }

    /// Encode as the opaque bytes the substrate attaches to an operation
    pub fn to_bytes(&self) -> Vec<u8> {
        // Two string fields always serialize
        serde_json::to_vec(self).unwrap_or_default()
    }
}

/// Resolve an opaque credential into a caller
pub fn resolve(credential: &[u8]) -> Result<Caller, IdentityError> {
    let credential: Credential = serde_json::from_slice(credential)?;
    let msp_id = credential.msp_id.trim();
    if msp_id.is_empty() {
        return Err(IdentityError::MissingOrganization);
    }
    let id = common_name(&credential.subject)
        .ok_or_else(|| IdentityError::MissingCommonName(credential.subject.clone()))?;
    Ok(Caller::new(Organization::from_msp_id(msp_id), id))
}

/// Extract the CN component of a distinguished name.
///
/// Accepts both a bare DN (`CN=alice,OU=client`) and the Fabric client-identity
/// form `x509::<subject>::<issuer>`, in which case only the subject is read.
fn common_name(subject: &str) -> Option<String> {
    let dn = match subject.strip_prefix("x509::") {
        Some(rest) => rest.split("::").next().unwrap_or(rest),
        None => subject,
    };
    dn.split([',', '/'])
        .map(str::trim)
        .find_map(|part| {
            let (attr, value) = part.split_once('=')?;
            attr.trim().eq_ignore_ascii_case("CN").then(|| value.trim())
        })
        .filter(|cn| !cn.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
#[path = "identity_tests.rs"]
mod tests;
