use core::fmt::{Debug, Display};

use ballot_cocktails::CocktailError;
use ballot_config::ConfigError;
use ballot_draw::{DrawError, InvalidInputError, ParticipantId};
use ballot_storage::StorageError;
use ballot_telemetry::TryInitError;

#[derive(thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to set up logging: {0}")]
    Telemetry(#[from] TryInitError),
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("invalid team list: {0}")]
    InvalidInput(#[from] InvalidInputError),
    #[error("draw failed: {0}")]
    Draw(#[from] DrawError),
    #[error("{0}")]
    Cocktail(#[from] CocktailError),
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
    #[error("no participant with id {0}")]
    ParticipantNotFound(ParticipantId),
    #[error("every participant id up to u32::MAX is taken")]
    ParticipantIdsExhausted,
    #[error("participant name must not be empty")]
    EmptyName,
}

// main prints the Debug representation of returned errors
impl Debug for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}
