use std::io::Write;

use ballot_cocktails::{
    device_options, ingredient_options, match_cocktails, validate_selection, Cocktail,
};
use ballot_config::Config;
use ballot_draw::{draw, next_participant_id, BucketIndex, Participant, Team};
use ballot_storage::{read_json_list, StorageKey, Store, TodoList};
use itertools::Itertools as _;
use tracing::info;

use crate::cli::{CocktailsAction, Command, ParticipantsAction, TodoAction};
use crate::error::CliError;

pub fn run<S, W>(
    command: Command,
    config: &Config,
    store: &mut S,
    out: &mut W,
) -> Result<(), CliError>
where
    S: Store,
    W: Write,
{
    match command {
        Command::Buckets => buckets(config, out),
        Command::Participants { action } => participants(action, store, out),
        Command::Draw => run_draw(config, store, out),
        Command::Cocktails { action } => cocktails(action, config, store, out),
        Command::Todo { action } => todo(action, store, out),
    }
}

fn bucket_index(config: &Config) -> Result<BucketIndex, CliError> {
    let teams: Vec<Team> = read_json_list(&config.teams)?;
    Ok(BucketIndex::build(&teams)?)
}

fn buckets<W: Write>(config: &Config, out: &mut W) -> Result<(), CliError> {
    let index = bucket_index(config)?;
    for bucket in index.iter() {
        writeln!(out, "Bucket {} ({} teams)", bucket.stars(), bucket.teams().len())?;
        for team in bucket.teams() {
            writeln!(out, "  {}\t{}", team.id, team.title)?;
        }
    }
    Ok(())
}

fn print_participants<W: Write>(participants: &[Participant], out: &mut W) -> Result<(), CliError> {
    for participant in participants {
        let team = participant
            .team
            .as_ref()
            .map_or("-", |team| team.title.as_str());
        writeln!(
            out,
            "{}\t{}\t{}\t{}",
            participant.id, participant.name, participant.buckets, team
        )?;
    }
    Ok(())
}

fn participants<S: Store, W: Write>(
    action: ParticipantsAction,
    store: &mut S,
    out: &mut W,
) -> Result<(), CliError> {
    let mut participants: Vec<Participant> = store.load(StorageKey::Participants)?;
    match action {
        ParticipantsAction::List => return print_participants(&participants, out),
        ParticipantsAction::Add { name, buckets } => {
            let name = name.trim();
            if name.is_empty() {
                return Err(CliError::EmptyName);
            }
            let id =
                next_participant_id(&participants).ok_or(CliError::ParticipantIdsExhausted)?;
            participants.push(Participant::new(id, name.to_owned(), buckets));
            writeln!(out, "added participant {id}")?;
        }
        ParticipantsAction::Edit { id, name, buckets } => {
            let participant = participants
                .iter_mut()
                .find(|participant| participant.id == id)
                .ok_or(CliError::ParticipantNotFound(id))?;
            if let Some(name) = name {
                let name = name.trim();
                if name.is_empty() {
                    return Err(CliError::EmptyName);
                }
                name.clone_into(&mut participant.name);
            }
            if let Some(buckets) = buckets {
                participant.buckets = buckets;
            }
            writeln!(out, "updated participant {id}")?;
        }
        ParticipantsAction::Remove { id } => {
            let before = participants.len();
            participants.retain(|participant| participant.id != id);
            if participants.len() == before {
                return Err(CliError::ParticipantNotFound(id));
            }
            writeln!(out, "removed participant {id}")?;
        }
    }
    store.save(StorageKey::Participants, &participants)?;
    Ok(())
}

fn run_draw<S: Store, W: Write>(
    config: &Config,
    store: &mut S,
    out: &mut W,
) -> Result<(), CliError> {
    let index = bucket_index(config)?;
    let participants: Vec<Participant> = store.load(StorageKey::Participants)?;

    let outcome = draw(&index, &participants)?;
    let unassigned = outcome.unassigned().count();
    let participants = outcome.into_participants();
    store.save(StorageKey::Participants, &participants)?;
    info!(participants = participants.len(), unassigned, "saved draw");

    print_participants(&participants, out)?;
    if unassigned > 0 {
        writeln!(
            out,
            "{unassigned} of {} participants without a team",
            participants.len()
        )?;
    }
    Ok(())
}

fn cocktails<S: Store, W: Write>(
    action: CocktailsAction,
    config: &Config,
    store: &mut S,
    out: &mut W,
) -> Result<(), CliError> {
    let cocktails: Vec<Cocktail> = read_json_list(&config.cocktails)?;
    match action {
        CocktailsAction::Options => {
            writeln!(out, "ingredients: {}", ingredient_options(&cocktails).join(", "))?;
            writeln!(out, "devices: {}", device_options(&cocktails).join(", "))?;
        }
        CocktailsAction::SelectIngredients { values } => {
            validate_selection(&cocktails, &values, &[])?;
            store.save(StorageKey::Ingredients, &values)?;
            writeln!(out, "selected {} ingredients", values.len())?;
        }
        CocktailsAction::SelectDevices { values } => {
            validate_selection(&cocktails, &[], &values)?;
            store.save(StorageKey::Devices, &values)?;
            writeln!(out, "selected {} devices", values.len())?;
        }
        CocktailsAction::Match => {
            let ingredients: Vec<String> = store.load(StorageKey::Ingredients)?;
            let devices: Vec<String> = store.load(StorageKey::Devices)?;
            let matches = match_cocktails(&cocktails, &ingredients, &devices);
            if !matches.ready.is_empty() {
                writeln!(out, "ready to mix:")?;
                for cocktail in &matches.ready {
                    writeln!(out, "  {}\t{}", cocktail.name, cocktail.link)?;
                }
            }
            if !matches.need_one_more.is_empty() {
                writeln!(out, "one ingredient or device short:")?;
                for near in &matches.need_one_more {
                    writeln!(
                        out,
                        "  {}\t{}\tneeds {}",
                        near.cocktail.name,
                        near.cocktail.link,
                        near.missing().join(", ")
                    )?;
                }
            }
        }
    }
    Ok(())
}

fn todo<S: Store, W: Write>(
    action: TodoAction,
    store: &mut S,
    out: &mut W,
) -> Result<(), CliError> {
    let mut list = TodoList::new(store.load(StorageKey::Todos)?);
    match action {
        TodoAction::List => {
            for item in list.iter() {
                let mark = if item.done { 'x' } else { ' ' };
                writeln!(out, "[{mark}] {}\t{}", item.id, item.text)?;
            }
            return Ok(());
        }
        TodoAction::Add { text } => {
            let id = list.add(&text)?;
            writeln!(out, "added to-do {id}")?;
        }
        TodoAction::Toggle { id } => {
            let done = list.toggle(id)?;
            writeln!(out, "to-do {id} {}", if done { "done" } else { "open" })?;
        }
        TodoAction::Remove { id } => {
            list.remove(id)?;
            writeln!(out, "removed to-do {id}")?;
        }
    }
    store.save(StorageKey::Todos, list.items())?;
    Ok(())
}
