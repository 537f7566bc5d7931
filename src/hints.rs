//! Player-facing advice derived from session state.
//!
//! Everything here is a pure function of a [`Session`]: feedback after a
//! guess, the standing suggestion, on-demand hints, and the final rating.

use std::fmt;

use crate::session::{Outcome, Session};

/// How a front end might colour a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Error,
    Warning,
    Info,
    Success,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Feedback {
    pub headline: &'static str,
    pub detail: &'static str,
    pub tone: Tone,
}

/// Feedback for a single evaluated guess.
#[must_use]
pub fn feedback_for(match_count: u8) -> Feedback {
    let (headline, detail, tone) = match match_count {
        0 => (
            "Completely off target",
            "No digit is in the right place",
            Tone::Error,
        ),
        1 => (
            "Found 1 correct position",
            "Keep exploring the other positions",
            Tone::Warning,
        ),
        2 => (
            "Not bad! 2 positions correct",
            "Keep up the momentum",
            Tone::Info,
        ),
        3 => (
            "Almost there! 3 positions correct",
            "One step away from victory",
            Tone::Success,
        ),
        _ => (
            "Congratulations! Code cleared!",
            "You found the hidden number",
            Tone::Success,
        ),
    };
    Feedback {
        headline,
        detail,
        tone,
    }
}

/// The standing suggestion shown beside the board.
#[must_use]
pub fn suggestion(session: &Session) -> &'static str {
    if session.outcome() == Some(Outcome::Won) {
        return "Brilliant! You cracked it with flawless deduction";
    }
    match session.attempts() {
        0 => "Start with 1234, then narrow the digit range step by step",
        1 => "Try 5678 to test the other group of digits",
        2..=3 => "Adjust your strategy based on the match counts",
        _ if session.history().iter().any(|r| r.match_count >= 2) => {
            "You have pinned down some digits, keep working on their positions"
        }
        _ => "Stay patient and test the possibilities systematically",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hint {
    pub text: &'static str,
    pub detail: &'static str,
}

/// A hint based on the most recent guess.
#[must_use]
pub fn hint(session: &Session) -> Hint {
    let Some(last) = session.history().front() else {
        return Hint {
            text: "Start by testing 1234 or 5678",
            detail: "This quickly narrows the digit range",
        };
    };
    let text = match last.match_count {
        0 => "Try a completely different combination",
        1 => "Keep the matching digit and move the others",
        _ => "You are close, keep testing the remaining possibilities",
    };
    Hint {
        text,
        detail: "Based on your last guess",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rating {
    Master,
    Expert,
    Proficient,
    Apprentice,
    Novice,
}

impl Rating {
    #[must_use]
    pub fn for_attempts(attempts: u32) -> Self {
        match attempts {
            0..=4 => Self::Master,
            5..=6 => Self::Expert,
            7..=8 => Self::Proficient,
            9..=10 => Self::Apprentice,
            _ => Self::Novice,
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Master => "Deduction Master",
            Self::Expert => "Expert",
            Self::Proficient => "Proficient",
            Self::Apprentice => "Apprentice",
            Self::Novice => "Novice",
        };
        f.write_str(label)
    }
}
