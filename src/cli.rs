use clap::Parser;
use crate::config::{GameConfig, RevealPolicy};
use crate::debug_log;
use crate::error::SubmitError;
use crate::game_state::{GameInterface, UserAction};
use crate::hints::Hint;
use crate::session::{Completion, Evaluation, GameView, Outcome};
use std::fmt::Display;
use std::io::{BufRead, Write};
use std::path::PathBuf;

/// Digit Sweeper: find the hidden 4-digit code with unique digits
#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// File holding the best score (defaults to the user data directory)
    #[arg(long = "best-score-file")]
    pub best_score_path: Option<PathBuf>,

    /// Keep the best score in memory only
    #[arg(long = "no-persist", conflicts_with = "best_score_path")]
    pub no_persist: bool,

    /// Seed for reproducible secrets
    #[arg(long)]
    pub seed: Option<u64>,

    /// Do not count revealing the answer as an attempt
    #[arg(long = "reveal-no-attempt")]
    pub reveal_no_attempt: bool,

    /// Allow a revealed game to set the best score
    #[arg(long = "reveal-sets-best")]
    pub reveal_sets_best: bool,
}

impl Cli {
    #[must_use]
    pub fn game_config(&self) -> GameConfig {
        GameConfig {
            reveal: RevealPolicy {
                counts_as_attempt: !self.reveal_no_attempt,
                eligible_for_best: self.reveal_sets_best,
            },
            seed: self.seed,
        }
    }
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

fn parse_action(input: &str) -> UserAction {
    match input.to_lowercase().as_str() {
        "exit" | "quit" => UserAction::Exit,
        "new" | "next" => UserAction::NewGame,
        "reveal" => UserAction::Reveal,
        "hint" => UserAction::Hint,
        "history" => UserAction::History,
        _ => UserAction::Guess(input.to_string()),
    }
}

fn format_best(best_score: Option<u32>) -> String {
    best_score.map_or_else(|| "-".to_string(), |b| b.to_string())
}

/// CLI implementation of the `GameInterface` trait over any reader and writer.
pub struct CliInterface<R: BufRead, W: Write> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> CliInterface<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn say(&mut self, line: impl Display) {
        if let Err(e) = writeln!(self.writer, "{line}") {
            debug_log!("say() - write failed: {}", e);
        }
    }

    fn display_stats(&mut self, view: &GameView) {
        self.say(format_args!(
            "Attempts: {} | Best: {}",
            view.attempts,
            format_best(view.best_score)
        ));
    }
}

impl<R: BufRead, W: Write> GameInterface for CliInterface<R, W> {
    fn read_action(&mut self) -> Option<UserAction> {
        self.say("\nEnter a 4-digit guess (or 'hint', 'reveal', 'history', 'new', 'exit'):");
        // Non-UTF-8 bytes reach the validator as replacement characters.
        let mut line = Vec::new();
        match self.reader.read_until(b'\n', &mut line) {
            Ok(0) => Some(UserAction::Exit),
            Ok(_) => {
                let input = String::from_utf8_lossy(&line);
                let input = input.trim();
                if input.is_empty() {
                    None
                } else {
                    Some(parse_action(input))
                }
            }
            Err(e) => {
                log::warn!("Failed to read input: {e}");
                Some(UserAction::Exit)
            }
        }
    }

    fn display_welcome(&mut self, view: &GameView, suggestion: &str) {
        self.say("Digit Sweeper: a hidden code of 4 distinct digits awaits.");
        self.say("Each guess reports how many digits sit in exactly the right position.");
        self.display_stats(view);
        self.say(format_args!("Suggestion: {suggestion}"));
    }

    fn display_evaluation(&mut self, evaluation: &Evaluation) {
        self.say(format_args!(
            "#{} {} -> {} match{}",
            evaluation.attempts,
            evaluation.guess,
            evaluation.match_count,
            if evaluation.match_count == 1 { "" } else { "es" }
        ));
        self.say(format_args!(
            "{} ({})",
            evaluation.feedback.headline, evaluation.feedback.detail
        ));
        if !evaluation.is_win() {
            self.say(format_args!("Suggestion: {}", evaluation.suggestion));
        }
    }

    fn display_rejection(&mut self, error: &SubmitError) {
        match error {
            SubmitError::Malformed(e) => {
                self.say(format_args!("Invalid guess: {e}. For example: 1234 or 5678."));
            }
            SubmitError::GameOver => self.say("This game is over. Type 'new' to play again."),
        }
    }

    fn display_completion(&mut self, completion: &Completion, best_score: Option<u32>) {
        match completion.outcome {
            Outcome::Won => self.say("You cleared the code!"),
            Outcome::Revealed => self.say("Answer revealed."),
        }
        let elapsed = completion.elapsed.num_seconds().max(0);
        self.say(format_args!("Secret: {}", completion.secret));
        self.say(format_args!("Attempts: {}", completion.attempts));
        self.say(format_args!("Time: {}:{:02}", elapsed / 60, elapsed % 60));
        self.say(format_args!("Rating: {}", completion.rating));
        if completion.new_best {
            self.say("New best score!");
        }
        self.say(format_args!("Best: {}", format_best(best_score)));
        self.say("Type 'new' to play again or 'exit' to quit.");
    }

    fn display_hint(&mut self, hint: &Hint) {
        self.say(format_args!("Hint: {} ({})", hint.text, hint.detail));
    }

    fn display_history(&mut self, view: &GameView) {
        self.display_stats(view);
        if view.history.is_empty() {
            self.say("No guesses yet.");
            return;
        }
        let total = view.history.len();
        for (i, record) in view.history.iter().enumerate() {
            self.say(format_args!(
                "#{} {} {} -> {}",
                total - i,
                record.timestamp.format("%H:%M"),
                record.value,
                record.match_count
            ));
        }
    }

    fn display_already_over(&mut self) {
        self.say("The game is already over. Type 'new' to play again.");
    }

    fn display_new_game_message(&mut self, view: &GameView, suggestion: &str) {
        self.say("New game started. A fresh code has been hidden.");
        self.display_stats(view);
        self.say(format_args!("Suggestion: {suggestion}"));
    }

    fn display_exit_message(&mut self) {
        self.say("Exiting.");
    }
}
