use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// One persisted event, exactly as it appears in the submissions document.
///
/// Wire shape is flat: `{"id", "type", "timestamp", "visitorId", ...payload}`.
/// The `type` tag and the payload fields come from the flattened [`Payload`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    /// Empty only for legacy records written before ids were assigned.
    #[serde(default)]
    pub id: String,
    #[serde(flatten)]
    pub payload: Payload,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visitor_id: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// Type-specific part of a [`Submission`], keyed by the wire `type` field.
///
/// `email` and `content` default to empty so legacy documents still parse;
/// new records always pass through [`NewSubmission`] validation first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Payload {
    Visit {
        #[serde(
            rename = "userAgent",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        user_agent: Option<String>,
    },
    Join {
        #[serde(default)]
        email: String,
        #[serde(rename = "apiAccess", default)]
        api_access: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },
    Feedback {
        #[serde(default)]
        content: String,
    },
}

impl Payload {
    /// The wire value of the `type` tag.
    pub fn kind(&self) -> &'static str {
        match self {
            Payload::Visit { .. } => "visit",
            Payload::Join { .. } => "join",
            Payload::Feedback { .. } => "feedback",
        }
    }
}

impl Submission {
    /// `visitorId` when present and non-blank.
    pub fn visitor_key(&self) -> Option<&str> {
        non_blank(self.visitor_id.as_deref())
    }

    pub fn is_feedback(&self) -> bool {
        matches!(self.payload, Payload::Feedback { .. })
    }
}

/// A validated, caller-supplied event that has not been stored yet.
///
/// `id` and `timestamp` are assigned by [`NewSubmission::stamp`] at append time.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSubmission {
    pub visitor_id: Option<String>,
    pub payload: Payload,
}

impl NewSubmission {
    /// A page visit. Never fails validation.
    pub fn visit(visitor_id: Option<String>, user_agent: Option<String>) -> Self {
        Self {
            visitor_id: normalize(visitor_id),
            payload: Payload::Visit {
                user_agent: normalize(user_agent),
            },
        }
    }

    /// A waitlist signup. `email` must be non-blank.
    pub fn join(
        email: Option<String>,
        api_access: bool,
        visitor_id: Option<String>,
        name: Option<String>,
    ) -> Result<Self, ValidationError> {
        let email = normalize(email).ok_or(ValidationError::MissingField {
            field: "email",
            message: "Email is required",
        })?;
        Ok(Self {
            visitor_id: normalize(visitor_id),
            payload: Payload::Join {
                email,
                api_access,
                name: normalize(name),
            },
        })
    }

    /// Free-form feedback. `content` must be non-blank.
    pub fn feedback(
        content: Option<String>,
        visitor_id: Option<String>,
    ) -> Result<Self, ValidationError> {
        let content = normalize(content).ok_or(ValidationError::MissingField {
            field: "feedback",
            message: "Feedback content is required",
        })?;
        Ok(Self {
            visitor_id: normalize(visitor_id),
            payload: Payload::Feedback { content },
        })
    }

    /// Assign a fresh random v4 UUID and the current UTC time.
    pub fn stamp(self) -> Submission {
        Submission {
            id: new_submission_id(),
            payload: self.payload,
            visitor_id: self.visitor_id,
            timestamp: Utc::now(),
        }
    }
}

/// 128-bit random identifier used for every stored submission.
pub fn new_submission_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

fn normalize(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
