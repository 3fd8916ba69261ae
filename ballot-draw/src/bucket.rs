use std::collections::{HashMap, HashSet};

use itertools::Itertools as _;
use tracing::debug;

use crate::error::InvalidInputError;
use crate::model::Team;
use crate::stars::Stars;

/// Teams sharing one rating, in the order they were listed.
#[derive(Debug, Clone, PartialEq)]
pub struct Bucket {
    stars: Stars,
    teams: Vec<Team>,
}

impl Bucket {
    #[must_use]
    pub const fn stars(&self) -> Stars {
        self.stars
    }

    #[must_use]
    pub fn teams(&self) -> &[Team] {
        &self.teams
    }
}

/// Teams partitioned by rating.
///
/// Derived from the team list and never edited, rebuild it when the list
/// changes.
#[derive(Debug, Clone, Default)]
pub struct BucketIndex {
    buckets: HashMap<Stars, Bucket>,
    /// descending
    keys: Vec<Stars>,
}

impl BucketIndex {
    pub fn build<'a, I>(teams: I) -> Result<Self, InvalidInputError>
    where
        I: IntoIterator<Item = &'a Team>,
    {
        let mut seen = HashSet::new();
        let keyed = teams
            .into_iter()
            .map(|team| {
                if !seen.insert(team.id) {
                    return Err(InvalidInputError::DuplicateTeam(team.id));
                }
                let raw = team.stars.ok_or_else(|| InvalidInputError::MissingStars {
                    id: team.id,
                    title: team.title.clone(),
                })?;
                let stars =
                    Stars::try_from(raw).map_err(|source| InvalidInputError::InvalidStars {
                        id: team.id,
                        title: team.title.clone(),
                        source,
                    })?;
                Ok((stars, team.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let buckets: HashMap<Stars, Bucket> = keyed
            .into_iter()
            .into_group_map()
            .into_iter()
            .map(|(stars, teams)| (stars, Bucket { stars, teams }))
            .collect();
        let keys = buckets.keys().copied().sorted_by(|a, b| b.cmp(a)).collect();

        debug!(buckets = buckets.len(), teams = seen.len(), "built bucket index");

        Ok(Self { buckets, keys })
    }

    #[must_use]
    pub fn lookup(&self, stars: Stars) -> Option<&Bucket> {
        self.buckets.get(&stars)
    }

    /// Every rating that has at least one team, highest first.
    #[must_use]
    pub fn keys(&self) -> &[Stars] {
        &self.keys
    }

    pub fn iter(&self) -> impl Iterator<Item = &Bucket> + '_ {
        self.keys.iter().filter_map(|stars| self.buckets.get(stars))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
