/// What a reveal does to the score.
///
/// Revealing the secret ends the game. Whether that counts as an attempt,
/// and whether such a game may set the best score, is a policy choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealPolicy {
    pub counts_as_attempt: bool,
    pub eligible_for_best: bool,
}

impl Default for RevealPolicy {
    fn default() -> Self {
        Self {
            counts_as_attempt: true,
            eligible_for_best: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GameConfig {
    pub reveal: RevealPolicy,
    /// Fixed seed for secret generation; `None` draws from the OS.
    pub seed: Option<u64>,
}
