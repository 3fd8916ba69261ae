use core::fmt::{self, Display};
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseStarsError;

/// Rating of a team, the key teams are bucketed by.
///
/// Ratings come in half-star steps, so they are stored as a count of half
/// stars. That keeps them exact, totally ordered and hashable.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Stars(u8);

impl Stars {
    #[must_use]
    pub const fn from_half_stars(half_stars: u8) -> Self {
        Self(half_stars)
    }
}

impl TryFrom<f64> for Stars {
    type Error = ParseStarsError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        let doubled = value * 2.0;
        if !doubled.is_finite()
            || doubled < 0.0
            || doubled > f64::from(u8::MAX)
            || doubled.fract() != 0.0
        {
            return Err(ParseStarsError::OutOfRange(value.to_string()));
        }
        #[expect(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "range and integrality checked above"
        )]
        let half_stars = doubled as u8;
        Ok(Self(half_stars))
    }
}

impl From<Stars> for f64 {
    fn from(value: Stars) -> Self {
        Self::from(value.0) / 2.0
    }
}

impl FromStr for Stars {
    type Err = ParseStarsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let value: f64 = trimmed
            .parse()
            .map_err(|_| ParseStarsError::NotANumber(trimmed.to_owned()))?;
        Self::try_from(value)
    }
}

impl Display for Stars {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 % 2 == 0 {
            write!(f, "{}", self.0 / 2)
        } else {
            write!(f, "{}.5", self.0 / 2)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Stars;
    use crate::error::ParseStarsError;

    #[test]
    fn parses_whole_and_half_stars() -> Result<(), ParseStarsError> {
        assert_eq!("5".parse::<Stars>()?, Stars::from_half_stars(10));
        assert_eq!(" 4.5 ".parse::<Stars>()?, Stars::from_half_stars(9));
        assert_eq!("0".parse::<Stars>()?, Stars::from_half_stars(0));
        Ok(())
    }

    #[test]
    fn rejects_malformed_stars() {
        assert!(matches!(
            "five".parse::<Stars>(),
            Err(ParseStarsError::NotANumber(_))
        ));
        assert!(matches!(
            "4.3".parse::<Stars>(),
            Err(ParseStarsError::OutOfRange(_))
        ));
        assert!(matches!(
            "-1".parse::<Stars>(),
            Err(ParseStarsError::OutOfRange(_))
        ));
        assert!(Stars::try_from(f64::NAN).is_err());
    }

    #[test]
    fn displays_like_the_input() {
        assert_eq!(Stars::from_half_stars(9).to_string(), "4.5");
        assert_eq!(Stars::from_half_stars(6).to_string(), "3");
    }

    #[test]
    fn serializes_as_number() -> Result<(), serde_json::Error> {
        let stars: Stars = serde_json::from_str("3.5")?;
        assert_eq!(stars, Stars::from_half_stars(7));
        assert_eq!(serde_json::to_string(&stars)?, "3.5");
        Ok(())
    }
}
