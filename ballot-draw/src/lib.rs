//! Fair random draw of teams for tournament participants.
//!
//! Teams are grouped into buckets by their star rating with
//! [`BucketIndex::build`], then [`draw()`] hands every participant a distinct
//! team out of the buckets it is eligible for.

extern crate alloc;

pub mod bucket;
pub mod draw;
pub mod error;
pub mod model;
pub mod stars;

pub use crate::bucket::{Bucket, BucketIndex};
pub use crate::draw::{draw, draw_with, DrawOutcome};
pub use crate::error::{DrawError, InvalidInputError, ParseStarsError};
pub use crate::model::{
    next_participant_id, AssignedTeam, Eligibility, Participant, ParticipantId, Team, TeamId,
};
pub use crate::stars::Stars;
