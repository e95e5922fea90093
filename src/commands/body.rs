use async_trait::async_trait;

use super::{Command, CommandResult, Session};
use crate::form::DraftField;

pub struct BodyCommand;

/// `\n` in typed text becomes a real line break.
fn unescape_newlines(text: &str) -> String {
    text.replace("\\n", "\n")
}

#[async_trait]
impl Command for BodyCommand {
    fn name(&self) -> &str {
        "/body"
    }

    fn usage(&self) -> &str {
        "<text>"
    }

    fn description(&self) -> &str {
        "replace the email body (\\n for line breaks, no text shows it)"
    }

    async fn execute(&self, args: &str, session: &mut Session) -> CommandResult {
        if args.is_empty() {
            let body = &session.form.draft().body;
            if body.is_empty() {
                println!("  body is empty");
            } else {
                println!("{body}");
            }
            return CommandResult::Handled;
        }

        session
            .form
            .update_draft(DraftField::Body, unescape_newlines(args));
        println!("  ✓ body set");
        CommandResult::Handled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::tests::test_session;

    #[tokio::test]
    async fn replaces_body() {
        let (mut session, _) = test_session(vec![]);
        session.form.append_body_line("old text");
        BodyCommand.execute("Hi all,\\nThanks.", &mut session).await;
        assert_eq!(session.form.draft().body, "Hi all,\nThanks.");
    }

    #[tokio::test]
    async fn empty_args_show_body() {
        let (mut session, _) = test_session(vec![]);
        session.form.append_body_line("keep");
        BodyCommand.execute("", &mut session).await;
        assert_eq!(session.form.draft().body, "keep");
    }

    #[test]
    fn unescape() {
        assert_eq!(unescape_newlines("a\\nb"), "a\nb");
        assert_eq!(unescape_newlines("plain"), "plain");
    }
}
