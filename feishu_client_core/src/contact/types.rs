//! Request, response and result types for the user id lookup

use crate::error::{Result, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Phone numbers and emails to resolve in one batch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LookupRequest {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub mobiles: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub emails: Vec<String>,
}

impl LookupRequest {
    pub fn new(mobiles: Vec<String>, emails: Vec<String>) -> Self {
        Self { mobiles, emails }
    }

    pub fn is_empty(&self) -> bool {
        self.mobiles.is_empty() && self.emails.is_empty()
    }

    /// At least one mobile or email is required
    pub fn validate(&self) -> Result<()> {
        if self.is_empty() {
            return Err(ValidationError::missing_field("mobile or email").into());
        }
        Ok(())
    }
}

/// Which kind of input an entry refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdKind {
    Mobile,
    Email,
}

impl fmt::Display for IdKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mobile => write!(f, "Mobile"),
            Self::Email => write!(f, "Email"),
        }
    }
}

/// One entry of `user_list`; any field may be absent
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedUser {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl ResolvedUser {
    /// Inputs this entry answers, mobile first
    pub fn inputs(&self) -> Vec<(IdKind, &str)> {
        let mut inputs = Vec::with_capacity(2);
        if let Some(mobile) = &self.mobile {
            inputs.push((IdKind::Mobile, mobile.as_str()));
        }
        if let Some(email) = &self.email {
            inputs.push((IdKind::Email, email.as_str()));
        }
        inputs
    }
}

/// An input the platform could not resolve
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnresolvedEntry {
    #[serde(rename = "msg", default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl UnresolvedEntry {
    /// Offending input; mobile wins when both are present
    pub fn input(&self) -> Option<(IdKind, &str)> {
        self.mobile
            .as_deref()
            .map(|m| (IdKind::Mobile, m))
            .or_else(|| self.email.as_deref().map(|e| (IdKind::Email, e)))
    }
}

/// Normalized payload of a successful lookup
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupData {
    #[serde(default)]
    pub user_list: Vec<ResolvedUser>,
    #[serde(default)]
    pub errors: Vec<UnresolvedEntry>,
}

/// Tagged outcome: `{success, data}` or `{success: false, error}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<LookupData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl LookupResult {
    pub fn ok(data: LookupData) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }
}

/// `POST /open-apis/auth/v3/tenant_access_token/internal` body
#[derive(Debug, Serialize)]
pub(crate) struct TenantTokenBody<'a> {
    pub app_id: &'a str,
    pub app_secret: &'a str,
}

/// `POST /open-apis/auth/v3/tenant_access_token/internal` reply
#[derive(Debug, Deserialize)]
pub(crate) struct TenantTokenReply {
    pub code: i64,
    #[serde(default)]
    pub msg: String,
    pub tenant_access_token: Option<String>,
    #[allow(dead_code)]
    pub expire: Option<u64>,
}

/// `POST /open-apis/contact/v3/users/batch_get_id` reply
#[derive(Debug, Deserialize)]
pub(crate) struct BatchGetIdReply {
    pub code: i64,
    #[serde(default)]
    pub msg: String,
    pub data: Option<LookupData>,
}
