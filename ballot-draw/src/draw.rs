use std::collections::{BTreeMap, HashMap, HashSet};

use rand::seq::SliceRandom as _;
use rand::Rng;
use tracing::{debug, info};

use crate::bucket::BucketIndex;
use crate::error::DrawError;
use crate::model::{AssignedTeam, Participant, ParticipantId, Team, TeamId};

/// Result of one draw: every participant in input order, each holding the
/// team drawn for it or none if its buckets were exhausted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrawOutcome {
    participants: Vec<Participant>,
}

impl DrawOutcome {
    #[must_use]
    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    #[must_use]
    pub fn into_participants(self) -> Vec<Participant> {
        self.participants
    }

    /// Participants that could not be given a team.
    pub fn unassigned(&self) -> impl Iterator<Item = &Participant> + '_ {
        self.participants
            .iter()
            .filter(|participant| participant.team.is_none())
    }

    #[must_use]
    pub fn assignments(&self) -> BTreeMap<ParticipantId, TeamId> {
        self.participants
            .iter()
            .filter_map(|participant| Some((participant.id, participant.team.as_ref()?.id)))
            .collect()
    }
}

/// Draws with the thread local generator.
pub fn draw(index: &BucketIndex, participants: &[Participant]) -> Result<DrawOutcome, DrawError> {
    draw_with(index, participants, &mut rand::thread_rng())
}

/// Assigns every participant a distinct team from its eligible buckets.
///
/// The processing order is shuffled first, so no participant is favoured by
/// its position in the list. Each participant then gets a uniformly chosen
/// team out of those in its buckets that nobody drew before it. Participants
/// whose candidates are all taken end up without a team, that is not an
/// error.
///
/// All participants are validated before anything is drawn.
pub fn draw_with<R>(
    index: &BucketIndex,
    participants: &[Participant],
    rng: &mut R,
) -> Result<DrawOutcome, DrawError>
where
    R: Rng + ?Sized,
{
    validate(participants)?;

    let mut order: Vec<&Participant> = participants.iter().collect();
    order.shuffle(rng);

    let mut claimed: HashSet<TeamId> = HashSet::new();
    let mut drawn: HashMap<ParticipantId, AssignedTeam> = HashMap::new();

    for participant in order {
        let mut candidates: Vec<&Team> = participant
            .buckets
            .iter()
            .filter_map(|stars| index.lookup(stars))
            .flat_map(|bucket| bucket.teams())
            .filter(|team| !claimed.contains(&team.id))
            .collect();
        candidates.shuffle(rng);

        if let Some(team) = candidates.first() {
            debug!(
                participant = %participant.id,
                team = %team.id,
                candidates = candidates.len(),
                "drew team"
            );
            claimed.insert(team.id);
            drawn.insert(participant.id, AssignedTeam::from(*team));
        } else {
            debug!(participant = %participant.id, "no team left in eligible buckets");
        }
    }

    let participants: Vec<Participant> = participants
        .iter()
        .map(|participant| Participant {
            team: drawn.remove(&participant.id),
            ..participant.clone()
        })
        .collect();
    let outcome = DrawOutcome { participants };

    info!(
        participants = outcome.participants.len(),
        unassigned = outcome.unassigned().count(),
        "draw finished"
    );

    Ok(outcome)
}

fn validate(participants: &[Participant]) -> Result<(), DrawError> {
    let mut seen = HashSet::new();
    for participant in participants {
        if !seen.insert(participant.id) {
            return Err(DrawError::DuplicateParticipant(participant.id));
        }
        if participant.buckets.is_empty() {
            return Err(DrawError::EmptyEligibility {
                id: participant.id,
                name: participant.name.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, HashSet};

    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng as _;

    use super::{draw, draw_with};
    use crate::bucket::BucketIndex;
    use crate::error::DrawError;
    use crate::model::{AssignedTeam, Eligibility, Participant, ParticipantId, Team, TeamId};
    use crate::stars::Stars;

    fn team(id: u32, half_stars: u8) -> Team {
        Team {
            id: TeamId(id),
            title: format!("team {id}"),
            img: format!("logos/{id}.png"),
            stars: Some(f64::from(half_stars) / 2.0),
            league: None,
        }
    }

    fn participant(id: u32, buckets: &[u8]) -> Participant {
        Participant::new(
            ParticipantId(id),
            format!("participant {id}"),
            buckets.iter().copied().map(Stars::from_half_stars).collect(),
        )
    }

    fn index(teams: &[Team]) -> BucketIndex {
        BucketIndex::build(teams).unwrap()
    }

    #[test]
    fn empty_draw_is_a_no_op() -> Result<(), DrawError> {
        let outcome = draw(&index(&[team(1, 10)]), &[])?;
        assert!(outcome.participants().is_empty());
        assert!(outcome.assignments().is_empty());
        Ok(())
    }

    #[test]
    fn one_team_for_two_participants() -> Result<(), DrawError> {
        let index = index(&[team(1, 10)]);
        let participants = vec![participant(1, &[10]), participant(2, &[10])];
        let outcome = draw_with(&index, &participants, &mut StdRng::seed_from_u64(7))?;

        assert_eq!(outcome.assignments().len(), 1);
        assert_eq!(outcome.unassigned().count(), 1);
        assert_eq!(outcome.assignments().values().next(), Some(&TeamId(1)));
        Ok(())
    }

    #[test]
    fn empty_eligibility_aborts_the_whole_draw() {
        let index = index(&[team(1, 10), team(2, 10)]);
        let participants = vec![
            participant(1, &[10]),
            Participant::new(ParticipantId(2), "nobody".to_owned(), Eligibility::default()),
        ];
        assert_eq!(
            draw(&index, &participants),
            Err(DrawError::EmptyEligibility {
                id: ParticipantId(2),
                name: "nobody".to_owned(),
            })
        );
    }

    #[test]
    fn duplicate_participants_are_rejected() {
        let index = index(&[team(1, 10), team(2, 10)]);
        let participants = vec![participant(1, &[10]), participant(1, &[10])];
        assert_eq!(
            draw(&index, &participants),
            Err(DrawError::DuplicateParticipant(ParticipantId(1)))
        );
    }

    #[test]
    fn unknown_buckets_contribute_nothing() -> Result<(), DrawError> {
        let index = index(&[team(1, 10)]);
        let participants = vec![participant(1, &[3]), participant(2, &[3, 10])];
        let outcome = draw_with(&index, &participants, &mut StdRng::seed_from_u64(1))?;
        assert_eq!(
            outcome.assignments(),
            BTreeMap::from([(ParticipantId(2), TeamId(1))])
        );
        assert_eq!(
            outcome.unassigned().map(|p| p.id).collect::<Vec<_>>(),
            vec![ParticipantId(1)]
        );
        Ok(())
    }

    #[test]
    fn previous_assignments_are_replaced() -> Result<(), DrawError> {
        let index = index(&[team(1, 10)]);
        let mut first = participant(1, &[10]);
        first.team = Some(AssignedTeam {
            id: TeamId(99),
            title: "stale".to_owned(),
        });
        let mut second = participant(2, &[8]);
        second.team = first.team.clone();

        let outcome = draw_with(&index, &[first, second], &mut StdRng::seed_from_u64(3))?;
        let participants = outcome.participants();
        assert_eq!(participants[0].team.as_ref().map(|team| team.id), Some(TeamId(1)));
        assert_eq!(participants[0].team.as_ref().map(|team| team.title.as_str()), Some("team 1"));
        assert_eq!(participants[1].team, None);
        Ok(())
    }

    #[test]
    fn keeps_input_order() -> Result<(), DrawError> {
        let index = index(&(1..=10).map(|id| team(id, 8)).collect::<Vec<_>>());
        let participants = (1..=10).map(|id| participant(id, &[8])).collect::<Vec<_>>();
        let outcome = draw_with(&index, &participants, &mut StdRng::seed_from_u64(11))?;
        assert_eq!(
            outcome.participants().iter().map(|p| p.id).collect::<Vec<_>>(),
            participants.iter().map(|p| p.id).collect::<Vec<_>>()
        );
        assert_eq!(outcome.unassigned().count(), 0);
        Ok(())
    }

    #[test]
    fn both_participants_get_both_teams_equally_often() -> Result<(), DrawError> {
        const ROUNDS: u32 = 20_000;
        let index = index(&[team(1, 10), team(2, 10)]);
        let participants = vec![participant(1, &[10]), participant(2, &[10])];
        let mut rng = StdRng::seed_from_u64(0);

        let mut first_got_team_one = 0_u32;
        for _ in 0..ROUNDS {
            let outcome = draw_with(&index, &participants, &mut rng)?;
            let assignments = outcome.assignments();
            assert_eq!(assignments.len(), 2);
            if assignments.get(&ParticipantId(1)) == Some(&TeamId(1)) {
                first_got_team_one += 1;
            }
        }

        let share = f64::from(first_got_team_one) / f64::from(ROUNDS);
        assert!((0.47..=0.53).contains(&share), "biased draw: {share}");
        Ok(())
    }

    fn scenario() -> impl Strategy<Value = (Vec<Team>, Vec<Participant>)> {
        let teams = prop::collection::vec(0_u8..=6, 0..30).prop_map(|stars| {
            stars
                .into_iter()
                .enumerate()
                .map(|(id, half)| team(u32::try_from(id).unwrap(), half))
                .collect::<Vec<_>>()
        });
        let participants = prop::collection::vec(
            prop::collection::btree_set(0_u8..=8, 1..4),
            0..30,
        )
        .prop_map(|eligibilities| {
            eligibilities
                .into_iter()
                .enumerate()
                .map(|(id, buckets)| {
                    participant(
                        u32::try_from(id).unwrap(),
                        &buckets.into_iter().collect::<Vec<_>>(),
                    )
                })
                .collect::<Vec<_>>()
        });
        (teams, participants)
    }

    proptest! {
        #[test]
        fn draws_are_exclusive_and_respect_eligibility(
            (teams, participants) in scenario(),
            seed in any::<u64>(),
        ) {
            let index = index(&teams);
            let outcome = draw_with(&index, &participants, &mut StdRng::seed_from_u64(seed)).unwrap();

            let mut used = HashSet::new();
            for participant in outcome.participants() {
                if let Some(assigned) = &participant.team {
                    prop_assert!(used.insert(assigned.id), "team {} drawn twice", assigned.id);
                    let team = teams.iter().find(|team| team.id == assigned.id).unwrap();
                    let stars = Stars::try_from(team.stars.unwrap()).unwrap();
                    prop_assert!(participant.buckets.contains(stars));
                }
            }
            prop_assert_eq!(outcome.participants().len(), participants.len());
        }

        #[test]
        fn nobody_is_left_out_while_their_buckets_have_teams(
            (teams, participants) in scenario(),
            seed in any::<u64>(),
        ) {
            let index = index(&teams);
            let outcome = draw_with(&index, &participants, &mut StdRng::seed_from_u64(seed)).unwrap();
            let used: HashSet<TeamId> = outcome.assignments().into_values().collect();

            for participant in outcome.unassigned() {
                let leftover = participant
                    .buckets
                    .iter()
                    .filter_map(|stars| index.lookup(stars))
                    .flat_map(|bucket| bucket.teams())
                    .any(|team| !used.contains(&team.id));
                prop_assert!(!leftover);
            }
        }
    }
}
