use thiserror::Error;

use crate::model::{ParticipantId, TeamId};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseStarsError {
    #[error("stars value {0:?} is not a number")]
    NotANumber(String),
    #[error("stars value {0} must be a finite, non-negative multiple of 0.5")]
    OutOfRange(String),
}

/// Malformed team list handed to [`crate::BucketIndex::build`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidInputError {
    #[error("team {id} ({title:?}) has no stars")]
    MissingStars { id: TeamId, title: String },
    #[error("team {id} ({title:?}) has invalid stars: {source}")]
    InvalidStars {
        id: TeamId,
        title: String,
        source: ParseStarsError,
    },
    #[error("team id {0} is used more than once")]
    DuplicateTeam(TeamId),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DrawError {
    #[error("participant {id} ({name:?}) is not eligible for any bucket")]
    EmptyEligibility { id: ParticipantId, name: String },
    #[error("participant id {0} is used more than once")]
    DuplicateParticipant(ParticipantId),
}
