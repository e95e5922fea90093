use async_trait::async_trait;

use super::{Command, CommandResult, Session};

pub struct ClearCommand;

#[async_trait]
impl Command for ClearCommand {
    fn name(&self) -> &str {
        "/clear"
    }

    fn aliases(&self) -> &[&str] {
        &["/new"]
    }

    fn description(&self) -> &str {
        "start a new draft (keeps culture and tone)"
    }

    async fn execute(&self, _args: &str, session: &mut Session) -> CommandResult {
        session.form.clear_draft();
        println!("  ✓ draft cleared");
        CommandResult::Handled
    }
}
