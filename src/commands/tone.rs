use async_trait::async_trait;

use super::{Command, CommandResult, Session};
use crate::options::{NO_TONE_LABEL, Tone, parse_tone_choice, tone_label};

pub struct ToneCommand;

#[async_trait]
impl Command for ToneCommand {
    fn name(&self) -> &str {
        "/tone"
    }

    fn usage(&self) -> &str {
        "[label|none]"
    }

    fn description(&self) -> &str {
        "choose an optional tone emphasis (no label lists them)"
    }

    async fn execute(&self, args: &str, session: &mut Session) -> CommandResult {
        if args.is_empty() {
            let current = session.form.tone_emphasis();
            let mark = |selected: bool| if selected { " ← current" } else { "" };
            println!("  {NO_TONE_LABEL}{}", mark(current.is_none()));
            for tone in Tone::ALL {
                println!("  {tone}{}", mark(current == Some(*tone)));
            }
            return CommandResult::Handled;
        }

        match parse_tone_choice(args) {
            Ok(tone) => {
                session.form.set_tone_emphasis(tone);
                println!("  ✓ tone emphasis: {}", tone_label(tone));
            }
            Err(e) => eprintln!("  ✗ {e}"),
        }
        CommandResult::Handled
    }
}
