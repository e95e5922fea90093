use async_trait::async_trait;

use super::{Command, CommandResult, Session};
use crate::options::Culture;

pub struct CultureCommand;

#[async_trait]
impl Command for CultureCommand {
    fn name(&self) -> &str {
        "/culture"
    }

    fn usage(&self) -> &str {
        "[label]"
    }

    fn description(&self) -> &str {
        "choose the target culture (no label lists them)"
    }

    async fn execute(&self, args: &str, session: &mut Session) -> CommandResult {
        if args.is_empty() {
            let current = session.form.target_culture();
            for culture in Culture::ALL {
                let marker = if *culture == current { " ← current" } else { "" };
                println!("  {culture}{marker}");
            }
            return CommandResult::Handled;
        }

        match args.parse::<Culture>() {
            Ok(culture) => {
                session.form.set_target_culture(culture);
                println!("  ✓ target culture: {culture}");
            }
            Err(e) => eprintln!("  ✗ {e}"),
        }
        CommandResult::Handled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::tests::test_session;

    #[tokio::test]
    async fn sets_culture() {
        let (mut session, _) = test_session(vec![]);
        CultureCommand.execute("u.k.", &mut session).await;
        assert_eq!(session.form.target_culture(), Culture::UnitedKingdom);
    }

    #[tokio::test]
    async fn unknown_culture_keeps_current() {
        let (mut session, _) = test_session(vec![]);
        CultureCommand.execute("France", &mut session).await;
        assert_eq!(
            CultureCommand.execute("Mars", &mut session).await,
            CommandResult::Handled
        );
        assert_eq!(session.form.target_culture(), Culture::France);
    }

    #[tokio::test]
    async fn listing_changes_nothing() {
        let (mut session, _) = test_session(vec![]);
        CultureCommand.execute("", &mut session).await;
        assert_eq!(session.form.target_culture(), Culture::Japan);
    }
}
