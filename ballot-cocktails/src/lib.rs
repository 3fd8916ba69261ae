//! Which cocktails can be mixed with what is at hand.

use std::collections::HashSet;

use itertools::Itertools as _;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CocktailError {
    #[error("no cocktail uses the ingredient {0:?}")]
    UnknownIngredient(String),
    #[error("no cocktail needs the device {0:?}")]
    UnknownDevice(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cocktail {
    pub name: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default, alias = "tools")]
    pub devices: Vec<String>,
}

/// A cocktail that is one ingredient and/or one device short.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NearMiss<'a> {
    pub cocktail: &'a Cocktail,
    pub missing_ingredients: Vec<&'a str>,
    pub missing_devices: Vec<&'a str>,
}

impl<'a> NearMiss<'a> {
    pub fn missing(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.missing_ingredients
            .iter()
            .chain(&self.missing_devices)
            .copied()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Matches<'a> {
    pub ready: Vec<&'a Cocktail>,
    pub need_one_more: Vec<NearMiss<'a>>,
}

/// Every ingredient any cocktail uses, in first seen order.
#[must_use]
pub fn ingredient_options(cocktails: &[Cocktail]) -> Vec<&str> {
    cocktails
        .iter()
        .flat_map(|cocktail| &cocktail.ingredients)
        .map(String::as_str)
        .unique()
        .collect()
}

/// Every device any cocktail needs, in first seen order.
#[must_use]
pub fn device_options(cocktails: &[Cocktail]) -> Vec<&str> {
    cocktails
        .iter()
        .flat_map(|cocktail| &cocktail.devices)
        .map(String::as_str)
        .unique()
        .collect()
}

/// Checks a selection against the offered options so typos don't silently
/// match nothing.
pub fn validate_selection(
    cocktails: &[Cocktail],
    ingredients: &[String],
    devices: &[String],
) -> Result<(), CocktailError> {
    let known_ingredients: HashSet<&str> = ingredient_options(cocktails).into_iter().collect();
    if let Some(unknown) = ingredients
        .iter()
        .find(|ingredient| !known_ingredients.contains(ingredient.as_str()))
    {
        return Err(CocktailError::UnknownIngredient(unknown.clone()));
    }
    let known_devices: HashSet<&str> = device_options(cocktails).into_iter().collect();
    if let Some(unknown) = devices
        .iter()
        .find(|device| !known_devices.contains(device.as_str()))
    {
        return Err(CocktailError::UnknownDevice(unknown.clone()));
    }
    Ok(())
}

fn missing<'a>(required: &'a [String], selected: &HashSet<&str>) -> Vec<&'a str> {
    required
        .iter()
        .map(String::as_str)
        .filter(|value| !selected.contains(value))
        .unique()
        .collect()
}

pub fn match_cocktails<'a>(
    cocktails: &'a [Cocktail],
    ingredients: &[String],
    devices: &[String],
) -> Matches<'a> {
    let ingredients: HashSet<&str> = ingredients.iter().map(String::as_str).collect();
    let devices: HashSet<&str> = devices.iter().map(String::as_str).collect();

    let mut matches = Matches::default();
    for cocktail in cocktails {
        let missing_ingredients = missing(&cocktail.ingredients, &ingredients);
        let missing_devices = missing(&cocktail.devices, &devices);
        if missing_ingredients.len() > 1 || missing_devices.len() > 1 {
            continue;
        }
        if missing_ingredients.is_empty() && missing_devices.is_empty() {
            matches.ready.push(cocktail);
        } else {
            matches.need_one_more.push(NearMiss {
                cocktail,
                missing_ingredients,
                missing_devices,
            });
        }
    }

    debug!(
        ready = matches.ready.len(),
        need_one_more = matches.need_one_more.len(),
        "matched cocktails"
    );
    matches
}
