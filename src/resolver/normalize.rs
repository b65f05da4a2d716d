//! Conversions from the inbound field encoding to the transaction log's key encoding

use crate::{store::LookupKey, ValidatedLookup};
use chrono::NaiveDate;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("settlement date {0:?} is not a DD-MM-YYYY calendar date")]
    InvalidSettlementDate(String),
}

/// Left-pad a STAN with zeros to 6 digits
pub fn sequence_number(stan: &str) -> String {
    format!("{:0>6}", stan)
}

/// Rescale an amount into the log's 12-digit encoding
///
/// Leading zeros are stripped, three zero digits appended, and the result is
/// left-padded back to 12. Not idempotent: apply exactly once per request.
pub fn amount(txnamt: &str) -> String {
    let significant = txnamt.trim_start_matches('0');
    let rescaled = format!("{}000", significant);
    let padded = format!("{:0>12}", rescaled);
    debug!(
        "Amount formatting: original={} significant={} rescaled={} final={}",
        txnamt, significant, rescaled, padded
    );
    padded
}

/// `DD-MM-YYYY` to `YYMMDD`
pub fn settlement_date(setldate: &str) -> Result<String, NormalizeError> {
    let date = NaiveDate::parse_from_str(setldate, "%d-%m-%Y")
        .map_err(|_| NormalizeError::InvalidSettlementDate(setldate.to_string()))?;
    Ok(date.format("%y%m%d").to_string())
}

/// Build the store key for a validated inquiry
pub fn lookup_key(lookup: &ValidatedLookup) -> Result<LookupKey, NormalizeError> {
    let key = LookupKey {
        reference_number: lookup.reference_number.clone(),
        sequence_number: sequence_number(&lookup.sequence_number),
        amount: amount(&lookup.amount),
        terminal_id: lookup.terminal_id.clone(),
        settlement_date: settlement_date(&lookup.settlement_date)?,
    };
    debug!(
        "Converted SETLDATE {} to {}",
        lookup.settlement_date, key.settlement_date
    );
    Ok(key)
}
