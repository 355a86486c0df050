/// A single recipe-suggestion request over a list of ingredient names.
///
/// Inputs are provided by callers (the mutation layer or the HTTP surface);
/// this crate never reads the inventory itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeJob {
    ingredients: Vec<String>,
}

impl RecipeJob {
    pub fn new(ingredients: Vec<String>) -> Self {
        Self { ingredients }
    }

    pub fn into_ingredients(self) -> Vec<String> {
        self.ingredients
    }

    /// Prompt sent to the completion service.
    pub fn prompt(&self) -> String {
        format!(
            "Suggest a recipe based on the following pantry contents: {}.",
            self.ingredients.join(", ")
        )
    }
}
