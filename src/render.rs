//! Turns form state into what the terminal shows.

use std::fmt;

use crate::consts::{
    LOADING_MESSAGE, NO_BODY_PLACEHOLDER, NO_NOTES_PLACEHOLDER, NO_SUBJECT_PLACEHOLDER,
    PLACEHOLDER_PROMPT,
};
use crate::controller::RewriteFormController;
use crate::form::{RewriteResult, UiStatus};
use crate::options::tone_label;

/// The output panel, derived from the controller's status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputView<'a> {
    /// Nothing submitted yet.
    Placeholder,
    Loading,
    Failed(&'a str),
    Rewritten {
        subject: &'a str,
        body: &'a str,
        notes: &'a str,
    },
}

impl<'a> OutputView<'a> {
    pub fn of(form: &'a RewriteFormController) -> Self {
        match (form.status(), form.result()) {
            (UiStatus::Idle, _) => OutputView::Placeholder,
            (UiStatus::Loading, _) => OutputView::Loading,
            (UiStatus::Failed(message), _) => OutputView::Failed(message),
            (UiStatus::Success, Some(result)) => Self::rewritten(result),
            (UiStatus::Success, None) => OutputView::Rewritten {
                subject: NO_SUBJECT_PLACEHOLDER,
                body: NO_BODY_PLACEHOLDER,
                notes: NO_NOTES_PLACEHOLDER,
            },
        }
    }

    fn rewritten(result: &'a RewriteResult) -> Self {
        OutputView::Rewritten {
            subject: or_placeholder(&result.rewritten_subject, NO_SUBJECT_PLACEHOLDER),
            body: or_placeholder(&result.rewritten_body, NO_BODY_PLACEHOLDER),
            notes: or_placeholder(&result.cultural_notes, NO_NOTES_PLACEHOLDER),
        }
    }
}

fn or_placeholder<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.is_empty() { placeholder } else { value }
}

impl fmt::Display for OutputView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputView::Placeholder => write!(f, "{PLACEHOLDER_PROMPT}"),
            OutputView::Loading => write!(f, "{LOADING_MESSAGE}"),
            OutputView::Failed(message) => write!(f, "{message}"),
            OutputView::Rewritten {
                subject,
                body,
                notes,
            } => {
                writeln!(f, "Rewritten Subject:")?;
                writeln!(f, "{}", indent(subject))?;
                writeln!(f)?;
                writeln!(f, "Rewritten Body:")?;
                writeln!(f, "{}", indent(body))?;
                writeln!(f)?;
                writeln!(f, "Cultural Notes:")?;
                write!(f, "{}", indent(notes))
            }
        }
    }
}

fn indent(text: &str) -> String {
    text.lines()
        .map(|line| format!("  {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// The draft and selections, as `/show` prints them.
pub fn draft_summary(form: &RewriteFormController) -> String {
    let draft = form.draft();
    let subject = if draft.subject.is_empty() {
        "(empty)".to_string()
    } else {
        draft.subject.clone()
    };
    let body = if draft.body.is_empty() {
        "  (empty)".to_string()
    } else {
        indent(&draft.body)
    };
    format!(
        "  culture   {}\n  tone      {}\n  subject   {}\n  body\n{}\n",
        form.target_culture(),
        tone_label(form.tone_emphasis()),
        subject,
        body,
    )
}
