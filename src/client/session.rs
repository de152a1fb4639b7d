use super::{ClientError, RecipeClient};
use crate::models::{GenerateRecipeRequest, Preferences, Recipe};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Add at least one ingredient first")]
    NoIngredients,

    #[error("A recipe is already being generated")]
    AlreadyGenerating,

    #[error("Sign in to generate recipes")]
    MissingUser,
}

/// Estado da tela do gerador: uma requisição por vez, só o resultado mais recente
#[derive(Debug, Default)]
pub struct GeneratorSession {
    preferences: Preferences,
    generating: bool,
    current: Option<Recipe>,
    last_error: Option<String>,
}

impl GeneratorSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    pub fn preferences_mut(&mut self) -> &mut Preferences {
        &mut self.preferences
    }

    pub fn is_generating(&self) -> bool {
        self.generating
    }

    pub fn current_recipe(&self) -> Option<&Recipe> {
        self.current.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Mirrors the disabled state of the generate button.
    pub fn can_submit(&self) -> bool {
        self.preferences.can_submit() && !self.generating
    }

    /// Enters the generating state and returns the request to send.
    pub fn begin(&mut self, user_id: &str) -> Result<GenerateRecipeRequest, SessionError> {
        if self.generating {
            return Err(SessionError::AlreadyGenerating);
        }
        if !self.preferences.can_submit() {
            return Err(SessionError::NoIngredients);
        }
        if user_id.trim().is_empty() {
            return Err(SessionError::MissingUser);
        }

        self.generating = true;
        Ok(self.preferences.to_request(user_id))
    }

    /// Leaves the generating state. Returns false (and ignores `outcome`)
    /// when no request was in flight.
    pub fn finish(&mut self, outcome: Result<Recipe, ClientError>) -> bool {
        if !self.generating {
            log::warn!("⚠️  Ignoring generation result: no request in flight");
            return false;
        }
        self.generating = false;

        match outcome {
            Ok(recipe) => {
                self.current = Some(recipe);
                self.last_error = None;
            }
            Err(e) => {
                log::warn!("❌ Recipe generation failed: {}", e);
                self.last_error = Some(e.to_string());
            }
        }
        true
    }

    /// `begin`, one awaited call, `finish`.
    pub async fn submit(&mut self, client: &RecipeClient, user_id: &str) -> Result<(), SessionError> {
        let request = self.begin(user_id)?;
        let outcome = client.generate(&request).await;
        self.finish(outcome);
        Ok(())
    }
}
