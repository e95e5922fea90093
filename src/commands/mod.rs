//! REPL commands prefixed with `/`.
//!
//! Commands implement the [`Command`] trait and are registered in a
//! [`CommandRegistry`]. The registry handles dispatch, alias resolution,
//! and help generation. Input that isn't a command goes back to the REPL,
//! which appends it to the draft body.

mod body;
mod clear;
mod culture;
mod help;
mod ping;
mod quit;
mod result;
mod rewrite;
mod show;
mod subject;
mod tone;

use async_trait::async_trait;
use std::sync::Arc;

use crate::controller::RewriteFormController;
use crate::rewriter::Rewriter;

/// Everything a command may read or change.
pub struct Session {
    pub form: RewriteFormController,
    pub rewriter: Arc<dyn Rewriter>,
    /// Completed rewrite attempts this session.
    pub rewrites: usize,
}

impl Session {
    pub fn new(form: RewriteFormController, rewriter: Arc<dyn Rewriter>) -> Self {
        Self {
            form,
            rewriter,
            rewrites: 0,
        }
    }
}

/// What the REPL should do after a command runs.
#[derive(Debug, PartialEq, Eq)]
pub enum CommandResult {
    /// Not a command; the REPL treats it as body text.
    NotACommand,
    /// Command handled, continue the REPL loop.
    Handled,
    /// Exit the REPL.
    Quit,
}

/// A REPL command. Implement this trait to add new commands.
#[async_trait]
pub trait Command: Send + Sync {
    /// Primary name, e.g. `"/rewrite"`.
    fn name(&self) -> &str;

    /// Alternative names, e.g. `&["/h", "/?"]`.
    fn aliases(&self) -> &[&str] {
        &[]
    }

    /// Argument hint for `/help`, e.g. `"<text>"`.
    fn usage(&self) -> &str {
        ""
    }

    /// One-line description for `/help`.
    fn description(&self) -> &str;

    /// Run the command. `args` is the trimmed text after the command name.
    async fn execute(&self, args: &str, session: &mut Session) -> CommandResult;
}

/// Holds registered commands.
pub struct CommandRegistry {
    commands: Vec<Arc<dyn Command>>,
}

impl CommandRegistry {
    /// Create a registry with all built-in commands.
    pub fn new() -> Self {
        let commands: Vec<Arc<dyn Command>> = vec![
            Arc::new(help::HelpCommand),
            Arc::new(subject::SubjectCommand),
            Arc::new(body::BodyCommand),
            Arc::new(culture::CultureCommand),
            Arc::new(tone::ToneCommand),
            Arc::new(show::ShowCommand),
            Arc::new(rewrite::RewriteCommand),
            Arc::new(result::ResultCommand),
            Arc::new(clear::ClearCommand),
            Arc::new(ping::PingCommand),
            Arc::new(quit::QuitCommand),
        ];
        Self { commands }
    }

    /// Register an additional command.
    pub fn register(&mut self, command: Arc<dyn Command>) {
        self.commands.push(command);
    }

    /// Dispatch input to a matching command, or return `NotACommand`.
    ///
    /// Lines that start with `/` never fall through: an unknown `/word` line
    /// is added to the body with a hint, and `//text` adds `/text`.
    pub async fn dispatch(&self, input: &str, session: &mut Session) -> CommandResult {
        let raw = input;
        let input = input.trim();

        if input.starts_with("//") {
            session.form.append_body_line(&raw.replacen("//", "/", 1));
            return CommandResult::Handled;
        }

        let (cmd, args) = input
            .split_once(char::is_whitespace)
            .map(|(cmd, args)| (cmd, args.trim()))
            .unwrap_or((input, ""));

        for command in &self.commands {
            if cmd == command.name() || command.aliases().contains(&cmd) {
                // /help needs the registry to list all commands
                if command.name() == "/help" {
                    print!("{}", self.help_text());
                    return CommandResult::Handled;
                }
                return command.execute(args, session).await;
            }
        }

        if cmd.starts_with('/') {
            session.form.append_body_line(raw);
            println!("{cmd} is not a command, added to the body (type /help for commands)");
            return CommandResult::Handled;
        }

        CommandResult::NotACommand
    }

    /// Generate help text from all registered commands.
    pub fn help_text(&self) -> String {
        let entries: Vec<(String, &str)> = self
            .commands
            .iter()
            .map(|c| (format_label(c.name(), c.usage(), c.aliases()), c.description()))
            .collect();

        let max_width = entries
            .iter()
            .map(|(label, _)| label.len())
            .max()
            .unwrap_or(10);

        let mut out = String::new();
        for (label, desc) in &entries {
            out.push_str(&format!("  {label:<max_width$}  {desc}\n"));
        }
        out.push_str("\n  any other line is appended to the email body\n");
        out.push_str("  start a line with // to add a line beginning with /\n");
        out
    }

    /// All registered command names (for testing).
    pub fn names(&self) -> Vec<&str> {
        self.commands.iter().map(|c| c.name()).collect()
    }

    /// All registered names and aliases (for duplicate detection).
    pub fn all_triggers(&self) -> Vec<&str> {
        let mut triggers = Vec::new();
        for cmd in &self.commands {
            triggers.push(cmd.name());
            triggers.extend_from_slice(cmd.aliases());
        }
        triggers
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn format_label(name: &str, usage: &str, aliases: &[&str]) -> String {
    let mut label = name.to_string();
    if !usage.is_empty() {
        label.push(' ');
        label.push_str(usage);
    }
    if !aliases.is_empty() {
        label.push_str(&format!(" ({})", aliases.join(", ")));
    }
    label
}
