pub const SYSTEM_PROMPT: &str =
    "You are a professional chef assistant. Always respond with valid JSON containing recipe data.";

const RESPONSE_SHAPE: &str = r#"{
  "title": "Recipe name",
  "description": "Brief description",
  "ingredients": ["ingredient 1", "ingredient 2"],
  "instructions": ["step 1", "step 2"],
  "cookTime": 30,
  "servings": 4,
  "difficulty": "Easy",
  "cuisineType": "Italian"
}"#;

fn join_or(values: &[String], fallback: &str) -> String {
    if values.is_empty() {
        fallback.to_string()
    } else {
        values.join(", ")
    }
}

/// Monta o prompt do usuário a partir das preferências
pub fn build_recipe_prompt(ingredients: &[String], dietary: &[String], cuisines: &[String]) -> String {
    format!(
        "Create a detailed recipe using these ingredients: {}.\n\
         \n\
         Dietary preferences: {}\n\
         Cuisine types: {}\n\
         \n\
         Please provide a JSON response with exactly this structure:\n\
         {}\n\
         \n\
         Make sure all ingredients from the input are used, and the recipe is realistic and delicious.",
        ingredients.join(", "),
        join_or(dietary, "None"),
        join_or(cuisines, "Any"),
        RESPONSE_SHAPE,
    )
}
