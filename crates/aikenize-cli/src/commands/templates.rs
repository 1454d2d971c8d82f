use aikenize_core::SourceLanguage;
use aikenize_core::template::{find_template, template_or_default};
use strum::IntoEnumIterator;

use crate::render;

pub fn list(language: Option<SourceLanguage>) {
    let languages: Vec<SourceLanguage> = match language {
        Some(language) => vec![language],
        None => SourceLanguage::iter().collect(),
    };
    for language in languages {
        print!("{}", render::templates(language));
    }
}

/// Prints a template body; unknown keys print the language's default snippet.
pub fn show(language: SourceLanguage, key: &str) {
    if find_template(language, key).is_none() {
        tracing::warn!("Unknown template '{}', showing the default {} snippet", key, language);
    }
    println!("{}", template_or_default(language, key));
}
