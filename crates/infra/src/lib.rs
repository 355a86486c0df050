//! Infrastructure layer: configuration and external service clients.

use std::sync::Arc;

use tracing::info;

use pantry_ai::{RecipeBoard, SuggestionError};

pub mod config;
pub mod external;

pub use config::{ConfigError, OpenAiConfig, PantryConfig};
pub use external::OpenAiRecipeService;

/// Build the recipe board for `config`, or `None` when suggestions are disabled.
pub fn recipe_board(config: &PantryConfig) -> Result<Option<Arc<RecipeBoard>>, SuggestionError> {
    let Some(openai) = &config.openai else {
        return Ok(None);
    };

    let service = OpenAiRecipeService::new(openai)?;
    info!(model = service.model(), base_url = %openai.base_url, "recipe suggestions enabled");

    let board = RecipeBoard::new(Arc::new(service)).with_policy(config.failure_policy);
    Ok(Some(Arc::new(board)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_api_key_means_no_board() {
        let config = PantryConfig::from_lookup(|_| None).unwrap();
        assert!(recipe_board(&config).unwrap().is_none());
    }

    #[test]
    fn board_inherits_failure_policy() {
        let config = PantryConfig::from_lookup(|key| match key {
            "OPENAI_API_KEY" => Some("k".into()),
            "PANTRY_FAILURE_POLICY" => Some("surface".into()),
            _ => None,
        })
        .unwrap();
        let board = recipe_board(&config).unwrap().unwrap();
        assert!(board.policy().surfaces());
    }
}
