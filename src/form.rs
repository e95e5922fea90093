//! Form data and the state machine that drives a submission.
//!
//! Every submission walks `Idle | Success | Failed` → `Loading` → `Success |
//! Failed`. [`FormState::apply`] is the only place that transition happens.

use serde::{Deserialize, Deserializer, Serialize};

use crate::options::{Culture, Tone};

/// Which draft field an edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Subject,
    Body,
}

/// The email as the user typed it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftEmail {
    pub subject: String,
    pub body: String,
}

impl DraftEmail {
    /// A draft can be sent once its body has something other than whitespace.
    pub fn is_submittable(&self) -> bool {
        !self.body.trim().is_empty()
    }
}

/// One outbound rewrite request. Built fresh for each submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewriteRequest {
    pub subject: String,
    pub body: String,
    pub target_culture: Culture,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tone_emphasis: Option<Tone>,
}

impl RewriteRequest {
    pub fn new(draft: &DraftEmail, target_culture: Culture, tone_emphasis: Option<Tone>) -> Self {
        Self {
            subject: draft.subject.clone(),
            body: draft.body.clone(),
            target_culture,
            tone_emphasis,
        }
    }
}

/// What the service sends back. Missing or null fields decode as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewriteResult {
    #[serde(deserialize_with = "null_as_empty")]
    pub rewritten_subject: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub rewritten_body: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub cultural_notes: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Where the form is in its submit cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum UiStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Failed(String),
}

impl UiStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, UiStatus::Loading)
    }

    /// The user-facing error message, if the last submission failed.
    pub fn error(&self) -> Option<&str> {
        match self {
            UiStatus::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Inputs to the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    Submit,
    Success(RewriteResult),
    /// Carries the already-derived user-facing message.
    Failure(String),
}

/// Status plus the result it refers to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub status: UiStatus,
    pub result: Option<RewriteResult>,
}

impl FormState {
    /// Apply one event. Events that don't fit the current status leave the
    /// state untouched: `Submit` while loading, and a `Success`/`Failure`
    /// that arrives when nothing is in flight.
    pub fn apply(self, event: FormEvent) -> FormState {
        match (self.status, event) {
            (UiStatus::Loading, FormEvent::Submit) => {
                tracing::debug!("submit ignored: request already in flight");
                FormState {
                    status: UiStatus::Loading,
                    result: self.result,
                }
            }
            (_, FormEvent::Submit) => FormState {
                status: UiStatus::Loading,
                result: None,
            },
            (UiStatus::Loading, FormEvent::Success(result)) => FormState {
                status: UiStatus::Success,
                result: Some(result),
            },
            (UiStatus::Loading, FormEvent::Failure(message)) => FormState {
                status: UiStatus::Failed(message),
                result: None,
            },
            (status, event) => {
                tracing::debug!(?status, ?event, "stale completion ignored");
                FormState {
                    status,
                    result: self.result,
                }
            }
        }
    }
}
