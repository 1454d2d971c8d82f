//! Example history shown when nothing has been persisted yet.

use chrono::{DateTime, Duration, Utc};

use super::model::{HistoryLog, HistoryRecord};
use crate::language::SourceLanguage;
use crate::translation::TranslationResult;

/// Id of the single seed record.
pub const SEED_RECORD_ID: &str = "mock-1";

const SEED_SNIPPET: &str = "function checkSigner(datum: { admin: string }, ctx: any) {\n  return ctx.signatories.includes(datum.admin);\n}";

const SEED_AIKEN_CODE: &str = "type Datum {\n  admin: Hash<Blake2b_224, VerificationKey>\n}\n\nvalidator {\n  fn check_signer(datum: Datum, _redeemer: Void, ctx: ScriptContext) -> Bool {\n    list.has(ctx.transaction.extra_signatories, datum.admin)\n  }\n}";

const SEED_EXPLANATION: &str = "Mapped the TypeScript array check to Aiken's list.has utility.";

/// Seed dataset, with the record stamped five minutes before `now`.
pub fn seed_history(now: DateTime<Utc>) -> HistoryLog {
    HistoryLog::from_records(vec![HistoryRecord {
        id: SEED_RECORD_ID.to_string(),
        created_at: now - Duration::minutes(5),
        source_language: SourceLanguage::TypeScript,
        snippet: SEED_SNIPPET.to_string(),
        result: TranslationResult::success(SEED_AIKEN_CODE, SEED_EXPLANATION),
    }])
}
