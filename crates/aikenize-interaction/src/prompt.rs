//! Prompt text and response schema for the Aiken translation request.

use aikenize_core::SourceLanguage;
use minijinja::{Environment, UndefinedBehavior, context};
use serde_json::{Value, json};

/// System instruction sent with every translation request.
pub const AIKEN_SYSTEM_PROMPT: &str = r#"
You are a specialized high-performance compiler and transpiler.
Your goal is to convert Web2 code (TypeScript or Python) into valid Aiken code for Cardano smart contracts.

Aiken is a functional programming language. Key concepts to remember:
1. Use 'validator' blocks.
2. Logic is strictly functional.
3. Common modules include 'aiken/transaction', 'aiken/transaction/value', 'aiken/time'.
4. Data structures are defined with 'type'.
5. Error handling is done via 'expect' or 'fail'.
6. Validators usually take (datum, redeemer, context).

Output Format:
You MUST return a JSON object with the following structure:
{
  "aikenCode": "The full source code in Aiken",
  "explanation": "A concise explanation of how the logic was mapped to the eUTXO model and Aiken syntax.",
  "errors": "Any mapping issues or logical impossibilities (optional)"
}
"#;

const USER_PROMPT_NAME: &str = "user_prompt";
const USER_PROMPT_TEMPLATE: &str =
    "Transpile the following {{ language }} code into Aiken:\n\n{{ source }}";

/// Renders the user turn for `snippet`.
pub fn render_user_prompt(
    language: SourceLanguage,
    snippet: &str,
) -> Result<String, minijinja::Error> {
    let mut env = Environment::new();
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    env.add_template(USER_PROMPT_NAME, USER_PROMPT_TEMPLATE)?;

    env.get_template(USER_PROMPT_NAME)?.render(context! {
        language => language.as_ref(),
        source => snippet,
    })
}

/// Structured-output schema: `aikenCode` and `explanation` are required,
/// `errors` is optional.
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "aikenCode": { "type": "STRING" },
            "explanation": { "type": "STRING" },
            "errors": { "type": "STRING" }
        },
        "required": ["aikenCode", "explanation"]
    })
}
