use async_trait::async_trait;

use super::{Command, CommandResult, Session};
use crate::form::DraftField;

pub struct SubjectCommand;

#[async_trait]
impl Command for SubjectCommand {
    fn name(&self) -> &str {
        "/subject"
    }

    fn usage(&self) -> &str {
        "<text>"
    }

    fn description(&self) -> &str {
        "set the email subject (no text shows it)"
    }

    async fn execute(&self, args: &str, session: &mut Session) -> CommandResult {
        if args.is_empty() {
            let subject = &session.form.draft().subject;
            if subject.is_empty() {
                println!("  subject is empty");
            } else {
                println!("  subject: {subject}");
            }
            return CommandResult::Handled;
        }

        session.form.update_draft(DraftField::Subject, args);
        println!("  ✓ subject set");
        CommandResult::Handled
    }
}
