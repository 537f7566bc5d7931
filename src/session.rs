//! Game session state and the controller that drives it.
//!
//! A [`Session`] is one game: the secret, the attempt count and the guess
//! history, newest first. [`GameController`] owns the active session and the
//! injected [`BestScoreStore`], and exposes the request/response operations a
//! front end calls.
//!
//! # State Machine
//! - `AwaitingGuess` → (guess with fewer than 4 matches) → `AwaitingGuess`
//! - `AwaitingGuess` → (4 matches, or reveal) → `Completed`
//! - any state → (new game) → `AwaitingGuess`

use std::collections::VecDeque;

use chrono::{DateTime, Local, TimeDelta};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::best_score::BestScoreStore;
use crate::config::GameConfig;
use crate::error::SubmitError;
use crate::guess::{Guess, count_matches, validate_guess};
use crate::hints::{self, Feedback, Hint, Rating};
use crate::secret::{CODE_LENGTH, Secret};
use crate::{debug_log, info_log};

const WINNING_MATCHES: u8 = CODE_LENGTH as u8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Won,
    Revealed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    AwaitingGuess,
    Completed(Outcome),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessRecord {
    pub value: Guess,
    pub match_count: u8,
    pub timestamp: DateTime<Local>,
}

#[derive(Debug, Clone)]
pub struct Session {
    secret: Secret,
    attempts: u32,
    history: VecDeque<GuessRecord>,
    outcome: Option<Outcome>,
    started_at: DateTime<Local>,
    finished_at: Option<DateTime<Local>>,
}

impl Session {
    #[must_use]
    pub fn new(secret: Secret) -> Self {
        Self {
            secret,
            attempts: 0,
            history: VecDeque::new(),
            outcome: None,
            started_at: Local::now(),
            finished_at: None,
        }
    }

    #[must_use]
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Guess records, most recent first.
    #[must_use]
    pub fn history(&self) -> &VecDeque<GuessRecord> {
        &self.history
    }

    #[must_use]
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        match self.outcome {
            Some(outcome) => SessionState::Completed(outcome),
            None => SessionState::AwaitingGuess,
        }
    }

    /// The secret, once the session is over.
    #[must_use]
    pub fn revealed_secret(&self) -> Option<Secret> {
        self.outcome.map(|_| self.secret)
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Local> {
        self.started_at
    }

    /// Time from start to completion, or to now while still in play.
    #[must_use]
    pub fn elapsed(&self) -> TimeDelta {
        self.finished_at.unwrap_or_else(Local::now) - self.started_at
    }

    /// Evaluate an accepted guess and record it. Callers must check
    /// `is_over` first.
    pub(crate) fn record_guess(&mut self, guess: Guess) -> u8 {
        let match_count = count_matches(&guess, &self.secret);
        self.history.push_front(GuessRecord {
            value: guess,
            match_count,
            timestamp: Local::now(),
        });
        self.attempts += 1;
        if match_count == WINNING_MATCHES {
            self.finish(Outcome::Won);
        }
        match_count
    }

    pub(crate) fn reveal(&mut self, counts_as_attempt: bool) {
        if counts_as_attempt {
            self.attempts += 1;
        }
        self.finish(Outcome::Revealed);
    }

    fn finish(&mut self, outcome: Outcome) {
        self.outcome = Some(outcome);
        self.finished_at = Some(Local::now());
    }
}

/// End-of-game summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub secret: Secret,
    pub attempts: u32,
    pub outcome: Outcome,
    pub elapsed: TimeDelta,
    pub rating: Rating,
    /// Whether this game set a new best score.
    pub new_best: bool,
}

/// Result of an accepted guess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub guess: Guess,
    pub match_count: u8,
    pub attempts: u32,
    pub feedback: Feedback,
    pub suggestion: &'static str,
    pub completion: Option<Completion>,
}

impl Evaluation {
    #[must_use]
    pub fn is_win(&self) -> bool {
        self.match_count == WINNING_MATCHES
    }
}

/// Snapshot of everything a front end displays.
#[derive(Debug, Clone, Copy)]
pub struct GameView<'a> {
    pub attempts: u32,
    pub history: &'a VecDeque<GuessRecord>,
    pub best_score: Option<u32>,
    pub is_over: bool,
    pub secret: Option<Secret>,
}

pub struct GameController<S: BestScoreStore> {
    session: Session,
    store: S,
    best_score: Option<u32>,
    config: GameConfig,
    rng: StdRng,
}

impl<S: BestScoreStore> GameController<S> {
    /// Create a controller and start the first game.
    pub fn new(store: S, config: GameConfig) -> Self {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let best_score = store.get().filter(|&best| best > 0);
        info_log!("Loaded best score: {:?}", best_score);
        let session = Session::new(Secret::generate(&mut rng));
        debug_log!("New game secret: {}", session.secret);
        Self {
            session,
            store,
            best_score,
            config,
            rng,
        }
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub fn best_score(&self) -> Option<u32> {
        self.best_score
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    #[must_use]
    pub fn view(&self) -> GameView<'_> {
        GameView {
            attempts: self.session.attempts(),
            history: self.session.history(),
            best_score: self.best_score,
            is_over: self.session.is_over(),
            secret: self.session.revealed_secret(),
        }
    }

    /// Validate and evaluate a candidate guess.
    ///
    /// Rejections leave the session untouched and do not count as attempts.
    pub fn submit_guess(&mut self, candidate: &str) -> Result<Evaluation, SubmitError> {
        if self.session.is_over() {
            debug_log!("Ignoring guess '{}' for a finished game", candidate);
            return Err(SubmitError::GameOver);
        }
        let guess = validate_guess(candidate)?;
        let match_count = self.session.record_guess(guess);
        info_log!(
            "Guess {} scored {} (attempt {})",
            guess,
            match_count,
            self.session.attempts()
        );

        let completion = if self.session.is_over() {
            let new_best = self.update_best_score();
            Some(self.completion(Outcome::Won, new_best))
        } else {
            None
        };

        Ok(Evaluation {
            guess,
            match_count,
            attempts: self.session.attempts(),
            feedback: hints::feedback_for(match_count),
            suggestion: hints::suggestion(&self.session),
            completion,
        })
    }

    /// End the game and expose the secret. Has no effect once the game is over.
    pub fn request_reveal(&mut self) -> Option<Completion> {
        if self.session.is_over() {
            return None;
        }
        let policy = self.config.reveal;
        self.session.reveal(policy.counts_as_attempt);
        info_log!("Secret revealed after {} attempts", self.session.attempts());
        let new_best = policy.eligible_for_best && self.update_best_score();
        Some(self.completion(Outcome::Revealed, new_best))
    }

    #[must_use]
    pub fn request_hint(&self) -> Hint {
        hints::hint(&self.session)
    }

    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        hints::suggestion(&self.session)
    }

    pub fn start_new_game(&mut self) {
        let secret = Secret::generate(&mut self.rng);
        self.start_new_game_with(secret);
    }

    /// Start a game against a known secret.
    pub fn start_new_game_with(&mut self, secret: Secret) {
        self.session = Session::new(secret);
        debug_log!("New game secret: {}", secret);
    }

    /// Record the current attempt count if it beats the stored best.
    /// A game finished without a single attempt is never a record.
    fn update_best_score(&mut self) -> bool {
        let attempts = self.session.attempts();
        if attempts == 0 {
            return false;
        }
        if self.best_score.is_some_and(|best| attempts >= best) {
            return false;
        }
        self.best_score = Some(attempts);
        if let Err(e) = self.store.set(attempts) {
            log::warn!("Could not save best score: {e}");
        }
        true
    }

    fn completion(&self, outcome: Outcome, new_best: bool) -> Completion {
        let session = &self.session;
        Completion {
            secret: session.secret,
            attempts: session.attempts(),
            outcome,
            elapsed: session.elapsed(),
            rating: Rating::for_attempts(session.attempts()),
            new_best,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::best_score::MemoryStore;
    use crate::config::RevealPolicy;
    use crate::error::GuessError;

    fn controller_with_secret(secret: &str) -> GameController<MemoryStore> {
        let mut controller = GameController::new(MemoryStore::new(), GameConfig::default());
        controller.start_new_game_with(secret.parse().unwrap());
        controller
    }

    #[test]
    fn test_new_game_starts_awaiting_guess() {
        let controller = GameController::new(MemoryStore::new(), GameConfig::default());
        let session = controller.session();
        assert_eq!(session.state(), SessionState::AwaitingGuess);
        assert_eq!(session.attempts(), 0);
        assert!(session.history().is_empty());
        assert_eq!(session.revealed_secret(), None);
    }

    #[test]
    fn test_winning_sequence() {
        let mut controller = controller_with_secret("1234");

        let first = controller.submit_guess("5678").unwrap();
        assert_eq!(first.match_count, 0);
        assert!(first.completion.is_none());

        let second = controller.submit_guess("1243").unwrap();
        assert_eq!(second.match_count, 2);

        let third = controller.submit_guess("1234").unwrap();
        assert!(third.is_win());
        let completion = third.completion.unwrap();
        assert_eq!(completion.attempts, 3);
        assert_eq!(completion.outcome, Outcome::Won);
        assert_eq!(completion.rating, Rating::Master);
        assert!(completion.new_best);

        let session = controller.session();
        assert_eq!(session.state(), SessionState::Completed(Outcome::Won));
        assert_eq!(session.attempts(), 3);
        let history: Vec<(String, u8)> = session
            .history()
            .iter()
            .map(|r| (r.value.to_string(), r.match_count))
            .collect();
        assert_eq!(
            history,
            vec![
                ("1234".to_string(), 4),
                ("1243".to_string(), 2),
                ("5678".to_string(), 0)
            ]
        );
        assert_eq!(controller.best_score(), Some(3));
        assert_eq!(controller.store().get(), Some(3));
    }

    #[test]
    fn test_malformed_guess_does_not_count() {
        let mut controller = controller_with_secret("1234");
        for bad in ["12a4", "123", "12345", ""] {
            assert!(matches!(
                controller.submit_guess(bad),
                Err(SubmitError::Malformed(_))
            ));
        }
        assert_eq!(
            controller.submit_guess("12a4"),
            Err(SubmitError::Malformed(GuessError::NonDigit('a')))
        );
        assert_eq!(controller.session().attempts(), 0);
        assert!(controller.session().history().is_empty());
    }

    #[test]
    fn test_guess_after_win_is_rejected_without_mutation() {
        let mut controller = controller_with_secret("1234");
        controller.submit_guess("1234").unwrap();

        assert_eq!(controller.submit_guess("5678"), Err(SubmitError::GameOver));
        assert_eq!(controller.session().attempts(), 1);
        assert_eq!(controller.session().history().len(), 1);
    }

    #[test]
    fn test_attempts_track_history_without_win() {
        let mut controller = controller_with_secret("1234");
        for guess in ["5678", "9012", "1111", "0000"] {
            controller.submit_guess(guess).unwrap();
        }
        let session = controller.session();
        assert_eq!(session.attempts(), 4);
        assert_eq!(session.history().len(), 4);
        assert_eq!(session.history()[0].value.to_string(), "0000");
        assert!(!session.is_over());
    }

    #[test]
    fn test_best_score_only_improves() {
        let mut controller = GameController::new(MemoryStore::with_best(2), GameConfig::default());
        controller.start_new_game_with("1234".parse().unwrap());
        controller.submit_guess("5678").unwrap();
        let completion = controller.submit_guess("1234").unwrap().completion.unwrap();
        assert!(!completion.new_best, "equal score is not an improvement");
        assert_eq!(controller.best_score(), Some(2));

        controller.start_new_game_with("4321".parse().unwrap());
        let completion = controller.submit_guess("4321").unwrap().completion.unwrap();
        assert!(completion.new_best);
        assert_eq!(controller.best_score(), Some(1));
        assert_eq!(controller.into_store().get(), Some(1));
    }

    #[test]
    fn test_reveal_with_default_policy() {
        let mut controller = controller_with_secret("1234");
        let completion = controller.request_reveal().unwrap();

        assert_eq!(completion.secret.to_string(), "1234");
        assert_eq!(completion.attempts, 1);
        assert_eq!(completion.outcome, Outcome::Revealed);
        assert!(!completion.new_best);
        assert_eq!(controller.best_score(), None);

        let view = controller.view();
        assert!(view.is_over);
        assert_eq!(view.attempts, 1);
        assert_eq!(view.secret.map(|s| s.to_string()), Some("1234".to_string()));
    }

    #[test]
    fn test_reveal_policy_can_set_best_without_counting() {
        let config = GameConfig {
            reveal: RevealPolicy {
                counts_as_attempt: false,
                eligible_for_best: true,
            },
            seed: None,
        };
        let mut controller = GameController::new(MemoryStore::with_best(5), config);
        controller.start_new_game_with("1234".parse().unwrap());
        controller.submit_guess("5678").unwrap();

        let completion = controller.request_reveal().unwrap();
        assert_eq!(completion.attempts, 1);
        assert!(completion.new_best);
        assert_eq!(controller.best_score(), Some(1));
    }

    #[test]
    fn test_reveal_without_attempts_never_sets_best() {
        let config = GameConfig {
            reveal: RevealPolicy {
                counts_as_attempt: false,
                eligible_for_best: true,
            },
            seed: None,
        };
        let mut controller = GameController::new(MemoryStore::new(), config);

        let completion = controller.request_reveal().unwrap();
        assert_eq!(completion.attempts, 0);
        assert!(!completion.new_best);
        assert_eq!(controller.best_score(), None);
        assert_eq!(controller.store().get(), None);

        // A later win still records its real score.
        controller.start_new_game_with("1234".parse().unwrap());
        controller.submit_guess("1234").unwrap();
        assert_eq!(controller.best_score(), Some(1));
    }

    #[test]
    fn test_stored_zero_is_not_a_record() {
        let controller = GameController::new(MemoryStore::with_best(0), GameConfig::default());
        assert_eq!(controller.best_score(), None);
    }

    #[test]
    fn test_guess_after_reveal_is_rejected_without_mutation() {
        let mut controller = controller_with_secret("1234");
        controller.submit_guess("5678").unwrap();
        controller.request_reveal().unwrap();

        assert_eq!(controller.submit_guess("1234"), Err(SubmitError::GameOver));
        assert_eq!(controller.submit_guess("12a4"), Err(SubmitError::GameOver));
        let session = controller.session();
        assert_eq!(session.attempts(), 2);
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.outcome(), Some(Outcome::Revealed));
    }

    #[test]
    fn test_reveal_is_ignored_once_over() {
        let mut controller = controller_with_secret("1234");
        controller.submit_guess("1234").unwrap();
        assert!(controller.request_reveal().is_none());
        assert_eq!(controller.session().attempts(), 1);
        assert_eq!(controller.session().outcome(), Some(Outcome::Won));
    }

    #[test]
    fn test_new_game_resets_session_but_keeps_best() {
        let mut controller = controller_with_secret("1234");
        controller.submit_guess("1234").unwrap();
        controller.start_new_game();

        let view = controller.view();
        assert_eq!(view.attempts, 0);
        assert!(view.history.is_empty());
        assert!(!view.is_over);
        assert_eq!(view.secret, None);
        assert_eq!(view.best_score, Some(1));
    }

    #[test]
    fn test_seeded_controllers_share_secret() {
        let config = GameConfig {
            seed: Some(99),
            ..GameConfig::default()
        };
        let mut a = GameController::new(MemoryStore::new(), config);
        let mut b = GameController::new(MemoryStore::new(), config);
        let ra = a.request_reveal().unwrap();
        let rb = b.request_reveal().unwrap();
        assert_eq!(ra.secret, rb.secret);
    }

    #[test]
    fn test_hint_and_suggestion_follow_session() {
        let mut controller = controller_with_secret("1234");
        assert!(controller.suggestion().starts_with("Start with 1234"));
        let eval = controller.submit_guess("1678").unwrap();
        assert_eq!(eval.suggestion, "Try 5678 to test the other group of digits");
        assert_eq!(
            controller.request_hint().text,
            "Keep the matching digit and move the others"
        );
    }
}
