use alloc::collections::BTreeSet;
use core::fmt::{self, Display};
use core::str::FromStr;

use itertools::Itertools as _;
use serde::{Deserialize, Serialize};

use crate::error::ParseStarsError;
use crate::stars::Stars;

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamId(pub u32);

impl Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

/// A team as produced by the team list scraper.
///
/// `stars` stays raw here, it is validated when the teams are bucketed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub title: String,
    #[serde(default)]
    pub img: String,
    #[serde(default)]
    pub stars: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub league: Option<String>,
}

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(pub u32);

impl Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

/// The buckets a participant may draw from.
///
/// Persisted as comma separated text (`"5,4.5"`), the way the participant
/// grid edits it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Eligibility(BTreeSet<Stars>);

impl Eligibility {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Stars> + '_ {
        self.0.iter().copied()
    }

    #[must_use]
    pub fn contains(&self, stars: Stars) -> bool {
        self.0.contains(&stars)
    }
}

impl FromIterator<Stars> for Eligibility {
    fn from_iter<T: IntoIterator<Item = Stars>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl FromStr for Eligibility {
    type Err = ParseStarsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split(',')
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .map(str::parse)
            .collect()
    }
}

impl TryFrom<String> for Eligibility {
    type Error = ParseStarsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Eligibility> for String {
    fn from(value: Eligibility) -> Self {
        value.to_string()
    }
}

impl Display for Eligibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // highest rating first, matching the bucket listing
        write!(f, "{}", self.0.iter().rev().join(","))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignedTeam {
    pub id: TeamId,
    pub title: String,
}

impl From<&Team> for AssignedTeam {
    fn from(team: &Team) -> Self {
        Self {
            id: team.id,
            title: team.title.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
    #[serde(default)]
    pub buckets: Eligibility,
    #[serde(default)]
    pub team: Option<AssignedTeam>,
}

impl Participant {
    #[must_use]
    pub const fn new(id: ParticipantId, name: String, buckets: Eligibility) -> Self {
        Self {
            id,
            name,
            buckets,
            team: None,
        }
    }
}

/// Next free id for a new participant row, one above the current maximum.
///
/// `None` once the maximum is `u32::MAX`.
#[must_use]
pub fn next_participant_id(participants: &[Participant]) -> Option<ParticipantId> {
    participants
        .iter()
        .map(|participant| participant.id.0)
        .max()
        .map_or(Some(1), |max| max.checked_add(1))
        .map(ParticipantId)
}
