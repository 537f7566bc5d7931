use std::fmt;
use std::str::FromStr;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::error::{GuessError, SecretError};
use crate::guess::{parse_digits, write_digits};

pub const CODE_LENGTH: usize = 4;

const DIGIT_ALPHABET: [u8; 10] = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9];

/// The hidden code: four distinct digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Secret([u8; CODE_LENGTH]);

impl Secret {
    /// Draw a secret uniformly from the 5040 ordered selections of four
    /// distinct digits.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut alphabet = DIGIT_ALPHABET;
        let (chosen, _) = alphabet.partial_shuffle(rng, CODE_LENGTH);
        let mut digits = [0; CODE_LENGTH];
        digits.copy_from_slice(chosen);
        Self(digits)
    }

    #[must_use]
    pub fn digits(&self) -> &[u8; CODE_LENGTH] {
        &self.0
    }
}

impl FromStr for Secret {
    type Err = SecretError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = parse_digits(s).map_err(|e| match e {
            GuessError::Length { found } => SecretError::Length { found },
            GuessError::NonDigit(c) => SecretError::NonDigit(c),
        })?;
        for (i, d) in digits.iter().enumerate() {
            if digits[i + 1..].contains(d) {
                return Err(SecretError::RepeatedDigit(char::from(b'0' + d)));
            }
        }
        Ok(Self(digits))
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_digits(f, &self.0)
    }
}
