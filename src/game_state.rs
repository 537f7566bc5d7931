use crate::best_score::BestScoreStore;
use crate::error::SubmitError;
use crate::hints::Hint;
use crate::info_log;
use crate::session::{Completion, Evaluation, GameController, GameView};

/// Actions a front end can request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    Guess(String),
    Hint,
    Reveal,
    History,
    NewGame,
    Exit,
}

/// Front-end abstraction driven by [`game_loop`].
pub trait GameInterface {
    /// Next action, or `None` if the input was not understood.
    fn read_action(&mut self) -> Option<UserAction>;
    fn display_welcome(&mut self, view: &GameView, suggestion: &str);
    fn display_evaluation(&mut self, evaluation: &Evaluation);
    fn display_rejection(&mut self, error: &SubmitError);
    fn display_completion(&mut self, completion: &Completion, best_score: Option<u32>);
    fn display_hint(&mut self, hint: &Hint);
    fn display_history(&mut self, view: &GameView);
    fn display_already_over(&mut self);
    fn display_new_game_message(&mut self, view: &GameView, suggestion: &str);
    fn display_exit_message(&mut self);
}

pub fn game_loop<S, I>(controller: &mut GameController<S>, interface: &mut I)
where
    S: BestScoreStore,
    I: GameInterface + ?Sized,
{
    interface.display_welcome(&controller.view(), controller.suggestion());

    loop {
        let Some(action) = interface.read_action() else {
            continue;
        };
        info_log!("game_loop() - Action: {:?}", action);

        match action {
            UserAction::Exit => {
                interface.display_exit_message();
                break;
            }
            UserAction::NewGame => {
                controller.start_new_game();
                interface.display_new_game_message(&controller.view(), controller.suggestion());
            }
            UserAction::Guess(candidate) => match controller.submit_guess(&candidate) {
                Ok(evaluation) => {
                    interface.display_evaluation(&evaluation);
                    if let Some(completion) = &evaluation.completion {
                        interface.display_completion(completion, controller.best_score());
                    }
                }
                Err(e) => interface.display_rejection(&e),
            },
            UserAction::Reveal => match controller.request_reveal() {
                Some(completion) => {
                    interface.display_completion(&completion, controller.best_score());
                }
                None => interface.display_already_over(),
            },
            UserAction::Hint => {
                let hint = controller.request_hint();
                interface.display_hint(&hint);
            }
            UserAction::History => interface.display_history(&controller.view()),
        }
    }
}
