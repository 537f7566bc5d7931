// Library interface for digit-sweeper
// This allows integration tests to access internal modules

pub mod best_score;
pub mod cli;
pub mod config;
pub mod error;
pub mod game_state;
pub mod guess;
pub mod hints;
pub mod logging;
pub mod secret;
pub mod session;

// Re-export commonly used items for easier testing
pub use best_score::{BestScoreStore, FileStore, MemoryStore};
pub use config::{GameConfig, RevealPolicy};
pub use error::{GuessError, SecretError, StoreError, SubmitError};
pub use game_state::{GameInterface, UserAction, game_loop};
pub use guess::{Guess, count_matches, validate_guess};
pub use secret::{CODE_LENGTH, Secret};
pub use session::{Completion, Evaluation, GameController, GameView, Outcome, Session, SessionState};
