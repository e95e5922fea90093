//! The fixed option sets offered to the user.
//!
//! These must stay in sync with what the rewriting service accepts. Nothing
//! here checks that agreement; the client simply never offers anything else.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Label shown for the "no tone" choice.
pub const NO_TONE_LABEL: &str = "-- None --";

/// Destination culture the email is rewritten for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Culture {
    #[default]
    Japan,
    #[serde(rename = "U.S.")]
    UnitedStates,
    #[serde(rename = "U.K.")]
    UnitedKingdom,
    France,
    India,
    Germany,
}

impl Culture {
    /// Every culture, in presentation order.
    pub const ALL: &'static [Culture] = &[
        Culture::Japan,
        Culture::UnitedStates,
        Culture::UnitedKingdom,
        Culture::France,
        Culture::India,
        Culture::Germany,
    ];

    /// The label sent over the wire.
    pub fn label(self) -> &'static str {
        match self {
            Culture::Japan => "Japan",
            Culture::UnitedStates => "U.S.",
            Culture::UnitedKingdom => "U.K.",
            Culture::France => "France",
            Culture::India => "India",
            Culture::Germany => "Germany",
        }
    }
}

/// Stylistic dimension to emphasize in the rewrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tone {
    Clarity,
    Formality,
    Urgency,
    Respect,
}

impl Tone {
    /// Every tone, in presentation order.
    pub const ALL: &'static [Tone] = &[Tone::Clarity, Tone::Formality, Tone::Urgency, Tone::Respect];

    /// The label sent over the wire.
    pub fn label(self) -> &'static str {
        match self {
            Tone::Clarity => "Clarity",
            Tone::Formality => "Formality",
            Tone::Urgency => "Urgency",
            Tone::Respect => "Respect",
        }
    }
}

impl fmt::Display for Culture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A value that matched none of the known labels.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}' (expected one of: {expected})")]
pub struct UnknownOption {
    pub kind: &'static str,
    pub value: String,
    pub expected: String,
}

/// Lowercase and drop dots/whitespace so `U.S.`, `u.s.` and `us` compare equal.
fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| *c != '.' && !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

fn find<T: Copy>(all: &[T], label: impl Fn(T) -> &'static str, input: &str) -> Option<T> {
    let wanted = normalize(input);
    all.iter().copied().find(|item| normalize(label(*item)) == wanted)
}

fn labels<T: Copy>(all: &[T], label: impl Fn(T) -> &'static str) -> String {
    all.iter().map(|item| label(*item)).collect::<Vec<_>>().join(", ")
}

impl FromStr for Culture {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        find(Culture::ALL, Culture::label, s).ok_or_else(|| UnknownOption {
            kind: "culture",
            value: s.to_string(),
            expected: labels(Culture::ALL, Culture::label),
        })
    }
}

impl FromStr for Tone {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        find(Tone::ALL, Tone::label, s).ok_or_else(|| UnknownOption {
            kind: "tone",
            value: s.to_string(),
            expected: labels(Tone::ALL, Tone::label),
        })
    }
}

/// Parse a tone selection where "no tone" is a valid choice.
///
/// An empty string, `none`, and the `-- None --` label all mean `None`.
pub fn parse_tone_choice(s: &str) -> Result<Option<Tone>, UnknownOption> {
    let trimmed = s.trim();
    if trimmed.is_empty() || trimmed == NO_TONE_LABEL || trimmed.eq_ignore_ascii_case("none") {
        return Ok(None);
    }
    trimmed.parse().map(Some)
}

/// Display label for an optional tone.
pub fn tone_label(tone: Option<Tone>) -> &'static str {
    tone.map(Tone::label).unwrap_or(NO_TONE_LABEL)
}
