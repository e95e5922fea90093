//! Startup banner and farewell.

use crate::consts::{AUTHOR, REPO};
use crate::options::{Culture, Tone, tone_label};

/// Session configuration for display in the startup banner.
pub struct BannerInfo<'a> {
    pub endpoint: &'a str,
    pub culture: Culture,
    pub tone: Option<Tone>,
    pub config: &'a str,
}

/// Render the startup banner with session info.
pub fn banner_text(info: &BannerInfo) -> String {
    format!(
        r#"
   ╔═══════════════════════════════════════╗
   ║             P A R L E Y               ║
   ║    say it the way they'd say it       ║
   ╚═══════════════════════════════════════╝

   version   {}
   by        {}
   repo      {}
   service   {}
   culture   {}
   tone      {}
   config    {}

   type the email body, set a subject with /subject, then /rewrite.
   /help lists every command.
"#,
        env!("CARGO_PKG_VERSION"),
        AUTHOR,
        REPO,
        info.endpoint,
        info.culture,
        tone_label(info.tone),
        info.config,
    )
}

pub fn print_banner(info: &BannerInfo) {
    println!("{}", banner_text(info));
}

/// Print the session farewell, noting how many rewrites ran.
pub fn print_session_summary(rewrites: usize) {
    if rewrites > 0 {
        println!(
            "session: {rewrites} rewrite{}",
            if rewrites == 1 { "" } else { "s" }
        );
    }
    println!("goodbye.");
}
