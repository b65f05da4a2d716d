use super::ResolveError;
use crate::{
    LookupOutcome, ResultCode, TransactionRecord, TransactionType, MSG_TYPE_FINANCIAL,
    MSG_TYPE_REVERSAL, WORK_PROGRESS_FAILED, WORK_PROGRESS_SUCCESS,
};

/// Classify the rows a lookup returned
///
/// A row set holding both a `1200` request and a `1400` reversal is a reversed
/// transaction. Otherwise the first row decides. Combinations with no defined
/// outcome are reported as `ResolveError::Unclassified`.
pub fn classify(rows: &[TransactionRecord]) -> Result<LookupOutcome, ResolveError> {
    let Some(first) = rows.first() else {
        return Ok(LookupOutcome::new(ResultCode::NotFound));
    };

    if rows.len() > 1 && is_reversed(rows) {
        return Ok(LookupOutcome::with_type(
            ResultCode::AlreadyReversed,
            scan_direction(rows),
        ));
    }

    let code = match (first.message_type.as_str(), first.work_progress.as_str()) {
        (MSG_TYPE_FINANCIAL, WORK_PROGRESS_FAILED) => ResultCode::TransactionFailed,
        (MSG_TYPE_FINANCIAL, WORK_PROGRESS_SUCCESS) => ResultCode::AlreadyProcessed,
        (message_type, work_progress) => {
            return Err(ResolveError::Unclassified {
                message_type: message_type.to_string(),
                work_progress: work_progress.to_string(),
            });
        }
    };

    Ok(LookupOutcome::with_type(code, first.transaction_type()))
}

fn is_reversed(rows: &[TransactionRecord]) -> bool {
    let has = |message_type: &str| rows.iter().any(|r| r.message_type == message_type);
    has(MSG_TYPE_FINANCIAL) && has(MSG_TYPE_REVERSAL)
}

/// First row with a populated account decides; `DEBIT` when none has one
fn scan_direction(rows: &[TransactionRecord]) -> TransactionType {
    rows.iter()
        .find_map(TransactionRecord::account_direction)
        .unwrap_or(TransactionType::Debit)
}
