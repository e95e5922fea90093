use async_trait::async_trait;
use std::sync::Arc;

use super::{Command, CommandResult, Session};
use crate::consts::SUBMITTING_LABEL;
use crate::render::OutputView;
use crate::spinner::Spinner;

pub struct RewriteCommand;

#[async_trait]
impl Command for RewriteCommand {
    fn name(&self) -> &str {
        "/rewrite"
    }

    fn aliases(&self) -> &[&str] {
        &["/r", "/send"]
    }

    fn description(&self) -> &str {
        "send the draft to the rewriting service"
    }

    async fn execute(&self, _args: &str, session: &mut Session) -> CommandResult {
        if !session.form.can_submit() {
            if session.form.status().is_loading() {
                eprintln!("  ✗ a rewrite is already running");
            } else {
                eprintln!("  ✗ the body is empty; type the email first");
            }
            return CommandResult::Handled;
        }

        let rewriter = Arc::clone(&session.rewriter);
        let spinner = Spinner::start(SUBMITTING_LABEL);
        let submitted = session.form.submit(rewriter.as_ref()).await;
        spinner.stop().await;

        if submitted {
            session.rewrites += 1;
        }
        println!("{}", OutputView::of(&session.form));
        CommandResult::Handled
    }
}
