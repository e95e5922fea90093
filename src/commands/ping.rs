use async_trait::async_trait;

use super::{Command, CommandResult, Session};

pub struct PingCommand;

#[async_trait]
impl Command for PingCommand {
    fn name(&self) -> &str {
        "/ping"
    }

    fn description(&self) -> &str {
        "check that the rewriting service is up"
    }

    async fn execute(&self, _args: &str, session: &mut Session) -> CommandResult {
        match session.rewriter.ping().await {
            Ok(greeting) => println!("  ✓ {greeting}"),
            Err(e) => eprintln!("  ✗ {}", e.user_message()),
        }
        CommandResult::Handled
    }
}
