//! The rewrite form: draft, selections, and the submit cycle.

use crate::form::{
    DraftEmail, DraftField, FormEvent, FormState, RewriteRequest, RewriteResult, UiStatus,
};
use crate::options::{Culture, Tone};
use crate::rewriter::{RewriteError, Rewriter};

/// Owns everything the form shows and drives one submission at a time.
#[derive(Debug, Default)]
pub struct RewriteFormController {
    draft: DraftEmail,
    target_culture: Culture,
    tone_emphasis: Option<Tone>,
    state: FormState,
}

impl RewriteFormController {
    pub fn new(target_culture: Culture, tone_emphasis: Option<Tone>) -> Self {
        Self {
            target_culture,
            tone_emphasis,
            ..Self::default()
        }
    }

    pub fn update_draft(&mut self, field: DraftField, value: impl Into<String>) {
        let value = value.into();
        match field {
            DraftField::Subject => self.draft.subject = value,
            DraftField::Body => self.draft.body = value,
        }
    }

    /// Add a line to the end of the body.
    pub fn append_body_line(&mut self, line: &str) {
        if !self.draft.body.is_empty() {
            self.draft.body.push('\n');
        }
        self.draft.body.push_str(line);
    }

    /// Empty the draft. Selections and the last outcome are kept.
    pub fn clear_draft(&mut self) {
        self.draft = DraftEmail::default();
    }

    pub fn set_target_culture(&mut self, culture: Culture) {
        self.target_culture = culture;
    }

    pub fn set_tone_emphasis(&mut self, tone: Option<Tone>) {
        self.tone_emphasis = tone;
    }

    pub fn draft(&self) -> &DraftEmail {
        &self.draft
    }

    pub fn target_culture(&self) -> Culture {
        self.target_culture
    }

    pub fn tone_emphasis(&self) -> Option<Tone> {
        self.tone_emphasis
    }

    pub fn status(&self) -> &UiStatus {
        &self.state.status
    }

    pub fn result(&self) -> Option<&RewriteResult> {
        self.state.result.as_ref()
    }

    /// Submission is refused while loading and when the body is blank.
    pub fn can_submit(&self) -> bool {
        !self.state.status.is_loading() && self.draft.is_submittable()
    }

    /// Enter `Loading` and build the request to send. `None` when the form
    /// can't be submitted right now; no state changes in that case.
    pub fn begin_submit(&mut self) -> Option<RewriteRequest> {
        if !self.can_submit() {
            tracing::debug!(status = ?self.state.status, "submit refused");
            return None;
        }
        self.dispatch(FormEvent::Submit);
        Some(RewriteRequest::new(
            &self.draft,
            self.target_culture,
            self.tone_emphasis,
        ))
    }

    /// Record how the in-flight request ended.
    pub fn complete_submit(&mut self, outcome: Result<RewriteResult, RewriteError>) {
        let event = match outcome {
            Ok(result) => FormEvent::Success(result),
            Err(err) => FormEvent::Failure(err.user_message()),
        };
        self.dispatch(event);
    }

    /// Run one full submission against `rewriter`.
    ///
    /// Returns `false` without contacting the rewriter when the form can't be
    /// submitted. Otherwise the form always ends in `Success` or `Failed`.
    pub async fn submit(&mut self, rewriter: &dyn Rewriter) -> bool {
        let Some(request) = self.begin_submit() else {
            return false;
        };
        let outcome = rewriter.rewrite(&request).await;
        self.complete_submit(outcome);
        true
    }

    fn dispatch(&mut self, event: FormEvent) {
        let state = std::mem::take(&mut self.state);
        self.state = state.apply(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_body(body: &str) -> RewriteFormController {
        let mut form = RewriteFormController::default();
        form.update_draft(DraftField::Body, body);
        form
    }

    #[test]
    fn starts_idle_with_first_culture() {
        let form = RewriteFormController::default();
        assert_eq!(form.status(), &UiStatus::Idle);
        assert_eq!(form.target_culture(), Culture::Japan);
        assert_eq!(form.tone_emphasis(), None);
        assert!(form.result().is_none());
    }

    #[test]
    fn update_draft_sets_fields() {
        let mut form = RewriteFormController::default();
        form.update_draft(DraftField::Subject, "Hello");
        form.update_draft(DraftField::Body, "World");
        assert_eq!(form.draft().subject, "Hello");
        assert_eq!(form.draft().body, "World");
    }

    #[test]
    fn append_body_line_joins_with_newlines() {
        let mut form = RewriteFormController::default();
        form.append_body_line("first");
        form.append_body_line("second");
        assert_eq!(form.draft().body, "first\nsecond");
    }

    #[test]
    fn clear_draft_keeps_selections() {
        let mut form = RewriteFormController::new(Culture::France, Some(Tone::Respect));
        form.update_draft(DraftField::Body, "text");
        form.clear_draft();
        assert_eq!(form.draft(), &DraftEmail::default());
        assert_eq!(form.target_culture(), Culture::France);
        assert_eq!(form.tone_emphasis(), Some(Tone::Respect));
    }

    #[test]
    fn blank_body_cannot_submit() {
        let mut form = with_body("  \n ");
        assert!(!form.can_submit());
        assert!(form.begin_submit().is_none());
        assert_eq!(form.status(), &UiStatus::Idle);
    }

    #[test]
    fn begin_submit_builds_request_from_current_state() {
        let mut form = RewriteFormController::new(Culture::India, Some(Tone::Formality));
        form.update_draft(DraftField::Subject, "Leave");
        form.update_draft(DraftField::Body, "I need Friday off.");
        let request = form.begin_submit().unwrap();
        assert_eq!(request.subject, "Leave");
        assert_eq!(request.body, "I need Friday off.");
        assert_eq!(request.target_culture, Culture::India);
        assert_eq!(request.tone_emphasis, Some(Tone::Formality));
        assert!(form.status().is_loading());
    }

    #[test]
    fn cannot_submit_while_loading() {
        let mut form = with_body("text");
        assert!(form.begin_submit().is_some());
        assert!(!form.can_submit());
        assert!(form.begin_submit().is_none());
    }

    #[test]
    fn complete_with_error_sets_failed_message() {
        let mut form = with_body("text");
        form.begin_submit();
        form.complete_submit(Err(RewriteError::Server {
            status: 400,
            detail: Some("Culture not supported".to_string()),
        }));
        assert_eq!(form.status().error(), Some("Error: Culture not supported"));
        assert!(form.can_submit());
    }

    #[test]
    fn complete_with_result_sets_success() {
        let mut form = with_body("text");
        form.begin_submit();
        let result = RewriteResult {
            rewritten_subject: "a".to_string(),
            rewritten_body: "b".to_string(),
            cultural_notes: "c".to_string(),
        };
        form.complete_submit(Ok(result.clone()));
        assert_eq!(form.status(), &UiStatus::Success);
        assert_eq!(form.result(), Some(&result));
    }
}
