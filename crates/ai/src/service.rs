use std::sync::Arc;

use async_trait::async_trait;

use crate::result::SuggestionError;

/// Text-completion service used to suggest recipes.
///
/// Single request/response, no streaming. Implementations must map service
/// error codes onto `SuggestionErrorKind` so callers can log them by category.
#[async_trait]
pub trait RecipeService: Send + Sync + 'static {
    /// Return the first completion for `prompt`.
    async fn complete(&self, prompt: &str) -> Result<String, SuggestionError>;
}

#[async_trait]
impl<S> RecipeService for Arc<S>
where
    S: RecipeService + ?Sized,
{
    async fn complete(&self, prompt: &str) -> Result<String, SuggestionError> {
        (**self).complete(prompt).await
    }
}
