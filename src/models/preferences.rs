use crate::models::GenerateRecipeRequest;
use thiserror::Error;

pub const DIETARY_OPTIONS: [&str; 10] = [
    "Vegetarian",
    "Vegan",
    "Gluten-Free",
    "Keto",
    "Paleo",
    "Mediterranean",
    "Low-Carb",
    "High-Protein",
    "Dairy-Free",
    "Nut-Free",
];

pub const CUISINE_TYPES: [&str; 12] = [
    "Italian",
    "Mexican",
    "Asian",
    "Mediterranean",
    "Indian",
    "American",
    "French",
    "Thai",
    "Chinese",
    "Japanese",
    "Korean",
    "Spanish",
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PreferenceError {
    #[error("Unknown {kind} tag: {tag}")]
    UnknownTag { kind: &'static str, tag: String },
}

/// Ingredientes e preferências coletados antes da geração
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Preferences {
    ingredients: Vec<String>,
    dietary: Vec<String>,
    cuisines: Vec<String>,
}

impl Preferences {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ingredients(&self) -> &[String] {
        &self.ingredients
    }

    pub fn dietary(&self) -> &[String] {
        &self.dietary
    }

    pub fn cuisines(&self) -> &[String] {
        &self.cuisines
    }

    /// Adds a trimmed ingredient. Blank input and duplicates are ignored.
    /// Returns whether the list changed.
    pub fn add_ingredient(&mut self, raw: &str) -> bool {
        let ingredient = raw.trim();
        if ingredient.is_empty() || self.ingredients.iter().any(|i| i == ingredient) {
            return false;
        }
        self.ingredients.push(ingredient.to_string());
        true
    }

    pub fn remove_ingredient(&mut self, ingredient: &str) -> bool {
        let before = self.ingredients.len();
        self.ingredients.retain(|i| i != ingredient);
        self.ingredients.len() != before
    }

    /// Flips a dietary tag; returns whether it is now selected.
    pub fn toggle_diet(&mut self, tag: &str) -> Result<bool, PreferenceError> {
        toggle(&mut self.dietary, &DIETARY_OPTIONS, "dietary", tag)
    }

    pub fn toggle_cuisine(&mut self, tag: &str) -> Result<bool, PreferenceError> {
        toggle(&mut self.cuisines, &CUISINE_TYPES, "cuisine", tag)
    }

    pub fn can_submit(&self) -> bool {
        !self.ingredients.is_empty()
    }

    pub fn to_request(&self, user_id: &str) -> GenerateRecipeRequest {
        GenerateRecipeRequest {
            ingredients: self.ingredients.clone(),
            dietary_preferences: self.dietary.clone(),
            cuisine_types: self.cuisines.clone(),
            user_id: user_id.to_string(),
        }
    }
}

fn toggle(
    selected: &mut Vec<String>,
    vocabulary: &[&str],
    kind: &'static str,
    tag: &str,
) -> Result<bool, PreferenceError> {
    if !vocabulary.contains(&tag) {
        return Err(PreferenceError::UnknownTag {
            kind,
            tag: tag.to_string(),
        });
    }

    if let Some(pos) = selected.iter().position(|t| t == tag) {
        selected.remove(pos);
        Ok(false)
    } else {
        selected.push(tag.to_string());
        Ok(true)
    }
}
