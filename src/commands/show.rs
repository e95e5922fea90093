use async_trait::async_trait;

use super::{Command, CommandResult, Session};
use crate::render::draft_summary;

pub struct ShowCommand;

#[async_trait]
impl Command for ShowCommand {
    fn name(&self) -> &str {
        "/show"
    }

    fn aliases(&self) -> &[&str] {
        &["/draft"]
    }

    fn description(&self) -> &str {
        "show the draft, culture, and tone"
    }

    async fn execute(&self, _args: &str, session: &mut Session) -> CommandResult {
        print!("{}", draft_summary(&session.form));
        if !session.form.draft().is_submittable() {
            println!("  (body is empty, /rewrite is disabled)");
        }
        CommandResult::Handled
    }
}
