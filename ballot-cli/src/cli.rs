use std::path::PathBuf;

use ballot_draw::{Eligibility, ParticipantId};
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "ballot", version, about = "Draw teams for tournament participants")]
pub struct Cli {
    /// Configuration file
    #[arg(long, global = true, default_value = ballot_config::CONFIG_FILE)]
    pub config: PathBuf,

    /// Directory holding participants, selections and to-dos
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Team list (JSON)
    #[arg(long, global = true)]
    pub teams: Option<PathBuf>,

    /// Cocktail list (JSON)
    #[arg(long, global = true)]
    pub cocktails: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the teams grouped by rating, highest first
    Buckets,

    /// Manage the participants of the draw
    Participants {
        #[command(subcommand)]
        action: ParticipantsAction,
    },

    /// Draw a team for every participant and save the result
    Draw,

    /// Find cocktails for the ingredients and devices at hand
    Cocktails {
        #[command(subcommand)]
        action: CocktailsAction,
    },

    /// Keep a to-do list
    Todo {
        #[command(subcommand)]
        action: TodoAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ParticipantsAction {
    List,
    Add {
        #[arg(long)]
        name: String,

        /// Comma separated ratings to draw from, e.g. "5,4.5"
        #[arg(long, default_value = "", value_parser = parse_eligibility)]
        buckets: Eligibility,
    },
    Edit {
        #[arg(long, value_parser = parse_participant_id)]
        id: ParticipantId,

        #[arg(long)]
        name: Option<String>,

        #[arg(long, value_parser = parse_eligibility)]
        buckets: Option<Eligibility>,
    },
    Remove {
        #[arg(long, value_parser = parse_participant_id)]
        id: ParticipantId,
    },
}

#[derive(Subcommand, Debug)]
pub enum CocktailsAction {
    /// Show the ingredients and devices that can be selected
    Options,
    /// Replace the selected ingredients, no values clears the selection
    SelectIngredients { values: Vec<String> },
    /// Replace the selected devices, no values clears the selection
    SelectDevices { values: Vec<String> },
    /// Show what can be mixed with the current selection
    Match,
}

#[derive(Subcommand, Debug)]
pub enum TodoAction {
    List,
    Add { text: String },
    Toggle { id: u32 },
    Remove { id: u32 },
}

fn parse_eligibility(value: &str) -> Result<Eligibility, String> {
    value.parse().map_err(|error| format!("{error}"))
}

fn parse_participant_id(value: &str) -> Result<ParticipantId, String> {
    value
        .parse()
        .map(ParticipantId)
        .map_err(|error| format!("{error}"))
}
