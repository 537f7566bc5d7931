use std::fmt;
use std::str::FromStr;

use crate::error::GuessError;
use crate::secret::{CODE_LENGTH, Secret};

/// A well-formed guess. Unlike a secret, digits may repeat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Guess([u8; CODE_LENGTH]);

impl Guess {
    #[must_use]
    pub fn digits(&self) -> &[u8; CODE_LENGTH] {
        &self.0
    }
}

/// Validate a candidate: length first, then the first non-digit character.
pub fn validate_guess(candidate: &str) -> Result<Guess, GuessError> {
    parse_digits(candidate).map(Guess)
}

/// Number of positions where the guess and the secret hold the same digit.
#[must_use]
pub fn count_matches(guess: &Guess, secret: &Secret) -> u8 {
    let hits = guess
        .digits()
        .iter()
        .zip(secret.digits())
        .filter(|(g, s)| g == s)
        .count();
    // At most CODE_LENGTH, always fits.
    hits as u8
}

pub(crate) fn parse_digits(s: &str) -> Result<[u8; CODE_LENGTH], GuessError> {
    let found = s.chars().count();
    if found != CODE_LENGTH {
        return Err(GuessError::Length { found });
    }
    let mut digits = [0; CODE_LENGTH];
    for (slot, c) in digits.iter_mut().zip(s.chars()) {
        if !c.is_ascii_digit() {
            return Err(GuessError::NonDigit(c));
        }
        *slot = c as u8 - b'0';
    }
    Ok(digits)
}

pub(crate) fn write_digits(f: &mut fmt::Formatter<'_>, digits: &[u8; CODE_LENGTH]) -> fmt::Result {
    digits.iter().try_for_each(|d| write!(f, "{d}"))
}

impl FromStr for Guess {
    type Err = GuessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate_guess(s)
    }
}

impl From<Secret> for Guess {
    fn from(secret: Secret) -> Self {
        Self(*secret.digits())
    }
}

impl fmt::Display for Guess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_digits(f, &self.0)
    }
}
