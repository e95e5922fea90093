use async_trait::async_trait;

use super::{Command, CommandResult, Session};
use crate::render::OutputView;

pub struct ResultCommand;

#[async_trait]
impl Command for ResultCommand {
    fn name(&self) -> &str {
        "/result"
    }

    fn description(&self) -> &str {
        "show the last rewrite again"
    }

    async fn execute(&self, _args: &str, session: &mut Session) -> CommandResult {
        println!("{}", OutputView::of(&session.form));
        CommandResult::Handled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::tests::test_session;

    #[tokio::test]
    async fn returns_handled_before_any_rewrite() {
        let (mut session, _) = test_session(vec![]);
        assert_eq!(
            ResultCommand.execute("", &mut session).await,
            CommandResult::Handled
        );
    }
}
