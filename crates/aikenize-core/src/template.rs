//! Static catalog of starter snippets.
//!
//! Every language has a default snippet (shown after a language switch) and
//! a small set of named templates used by "new contract".

use crate::language::SourceLanguage;

/// A named starter snippet for one language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    pub language: SourceLanguage,
    pub key: &'static str,
    pub title: &'static str,
    pub body: &'static str,
}

/// Template keys offered for every language.
pub const TEMPLATE_KEYS: [&str; 3] = ["basic", "vesting", "oracle"];

pub const DEFAULT_TYPESCRIPT_SNIPPET: &str = r#"// Example: Simple Vesting Validator
interface Datum {
  beneficiary: string;
  deadline: number;
}

function validate(datum: Datum, redeemer: void, context: any): boolean {
  const isCorrectBeneficiary = context.signatories.includes(datum.beneficiary);
  const isPastDeadline = context.range.lowerBound >= datum.deadline;
  
  return isCorrectBeneficiary && isPastDeadline;
}"#;

pub const DEFAULT_PYTHON_SNIPPET: &str = r#"# Example: Simple Vesting Validator
from dataclasses import dataclass

@dataclass
class Datum:
    beneficiary: str
    deadline: int

def validate(datum: Datum, redeemer: None, context: any) -> bool:
    is_correct_beneficiary = datum.beneficiary in context.signatories
    is_past_deadline = context.range.lower_bound >= datum.deadline
    
    return is_correct_beneficiary and is_past_deadline"#;

const TEMPLATES: &[Template] = &[
    Template {
        language: SourceLanguage::TypeScript,
        key: "basic",
        title: "Basic Logic Boilerplate",
        body: r#"// Basic Logic Boilerplate
function main(datum: any, redeemer: any, ctx: any): boolean {
  return true;
}"#,
    },
    Template {
        language: SourceLanguage::TypeScript,
        key: "vesting",
        title: "Vesting Contract",
        body: r#"// Vesting Contract
interface VestingDatum {
  owner: string;
  lock_until: number;
}

function validate(datum: VestingDatum, _r: void, ctx: any) {
  return ctx.signatories.includes(datum.owner) && ctx.time >= datum.lock_until;
}"#,
    },
    Template {
        language: SourceLanguage::TypeScript,
        key: "oracle",
        title: "Oracle Consumption Logic",
        body: r#"// Oracle Consumption Logic
interface OracleDatum {
  price: number;
  expiry: number;
}

function consume_oracle(datum: OracleDatum, _r: void, ctx: any) {
  return datum.price > 0 && ctx.time < datum.expiry;
}"#,
    },
    Template {
        language: SourceLanguage::Python,
        key: "basic",
        title: "Basic Logic Boilerplate",
        body: r#"# Basic Logic Boilerplate
def validate(datum: any, redeemer: any, ctx: any) -> bool:
    return True"#,
    },
    Template {
        language: SourceLanguage::Python,
        key: "vesting",
        title: "Vesting Contract",
        body: r#"# Vesting Contract
@dataclass
class VestingDatum:
    owner: str
    lock_until: int

def validate(datum: VestingDatum, redeemer: None, ctx: any) -> bool:
    return datum.owner in ctx.signatories and ctx.time >= datum.lock_until"#,
    },
    Template {
        language: SourceLanguage::Python,
        key: "oracle",
        title: "Oracle Consumption Logic",
        body: r#"# Oracle Consumption Logic
@dataclass
class OracleDatum:
    price: int
    expiry: int

def validate(datum: OracleDatum, redeemer: None, ctx: any) -> bool:
    return datum.price > 0 and ctx.time < datum.expiry"#,
    },
];

/// The example snippet loaded when switching to `language`.
pub fn default_snippet(language: SourceLanguage) -> &'static str {
    match language {
        SourceLanguage::TypeScript => DEFAULT_TYPESCRIPT_SNIPPET,
        SourceLanguage::Python => DEFAULT_PYTHON_SNIPPET,
    }
}

/// Looks up a template by language and key.
pub fn find_template(language: SourceLanguage, key: &str) -> Option<&'static Template> {
    TEMPLATES
        .iter()
        .find(|template| template.language == language && template.key == key)
}

/// Template body for `(language, key)`, or the language's default snippet
/// when the key is unknown.
pub fn template_or_default(language: SourceLanguage, key: &str) -> &'static str {
    find_template(language, key)
        .map(|template| template.body)
        .unwrap_or_else(|| default_snippet(language))
}

/// All templates for one language, in catalog order.
pub fn templates_for(language: SourceLanguage) -> impl Iterator<Item = &'static Template> {
    TEMPLATES
        .iter()
        .filter(move |template| template.language == language)
}
