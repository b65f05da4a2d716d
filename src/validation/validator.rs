use crate::{
    InquiryRequest, LookUpDetails, ResultCode, ValidatedLookup, AUTHORIZED_CALLER_ID,
};
use chrono::NaiveDate;
use serde_json::Value;
use tracing::{debug, warn};

/// Stateless inquiry validator
///
/// Field order is fixed: caller id, RRN, STAN, TXNAMT, TERMID, SETLDATE.
/// An envelope without `LookUpData.Details` is rejected with E9 before any
/// field is looked at.
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator;

impl Validator {
    pub fn new() -> Self {
        Self
    }

    /// Validate an inquiry envelope
    /// Returns the extracted lookup fields, or the code of the first failing field
    pub fn validate(&self, request: &InquiryRequest) -> Result<ValidatedLookup, ResultCode> {
        let details = request.details().ok_or_else(|| {
            warn!("Inquiry envelope is missing LookUpData.Details");
            ResultCode::SystemError
        })?;

        self.check_caller_id(as_text(request.caller_id()))?;

        let lookup = self.check_details(&details)?;
        debug!("Inquiry validation successful for RRN {}", lookup.reference_number);
        Ok(lookup)
    }

    fn check_caller_id(&self, caller_id: Option<&str>) -> Result<(), ResultCode> {
        match caller_id.map(str::trim) {
            Some(id) if id == AUTHORIZED_CALLER_ID => Ok(()),
            other => {
                warn!("Rejected caller id {:?}", other);
                Err(ResultCode::InvalidCallerId)
            }
        }
    }

    fn check_details(&self, details: &LookUpDetails) -> Result<ValidatedLookup, ResultCode> {
        let reference_number = digits(&details.rrn, 12, 12, ResultCode::InvalidReferenceNumber)?;
        let sequence_number = digits(&details.stan, 6, 6, ResultCode::InvalidSequenceNumber)?;
        let amount = digits(&details.txnamt, 12, 12, ResultCode::InvalidAmount)?;
        let terminal_id = digits(&details.termid, 6, 8, ResultCode::InvalidTerminalId)?;
        let settlement_date = check_settlement_date(text(&details.setldate))?;

        Ok(ValidatedLookup {
            reference_number: reference_number.to_string(),
            sequence_number: sequence_number.to_string(),
            amount: amount.to_string(),
            terminal_id: terminal_id.to_string(),
            settlement_date: settlement_date.to_string(),
        })
    }
}

/// Only JSON strings count as present; numbers, booleans and `null` do not
fn text(value: &Option<Value>) -> Option<&str> {
    as_text(value.as_ref())
}

fn as_text(value: Option<&Value>) -> Option<&str> {
    match value {
        Some(Value::String(s)) => Some(s.as_str()),
        _ => None,
    }
}

fn is_digits(s: &str, min: usize, max: usize) -> bool {
    (min..=max).contains(&s.len()) && s.bytes().all(|b| b.is_ascii_digit())
}

fn digits<'a>(
    value: &'a Option<Value>,
    min: usize,
    max: usize,
    code: ResultCode,
) -> Result<&'a str, ResultCode> {
    match text(value) {
        Some(s) if is_digits(s, min, max) => Ok(s),
        other => {
            warn!("Field check failed with {}: got {:?}", code.code(), other);
            Err(code)
        }
    }
}

/// `DD-MM-YYYY` shape first (E7), then calendar existence from year 0100 on (E6)
fn check_settlement_date(value: Option<&str>) -> Result<&str, ResultCode> {
    let Some(date) = value.filter(|d| !d.is_empty()) else {
        warn!("SETLDATE is missing");
        return Err(ResultCode::InvalidSettlementDate);
    };

    let bytes = date.as_bytes();
    let shaped = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            2 | 5 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !shaped {
        warn!("SETLDATE {:?} is not DD-MM-YYYY", date);
        return Err(ResultCode::InvalidDateFormat);
    }

    // All positions are ASCII digits at this point.
    let day: u32 = date[0..2].parse().map_err(|_| ResultCode::InvalidDateFormat)?;
    let month: u32 = date[3..5].parse().map_err(|_| ResultCode::InvalidDateFormat)?;
    let year: i32 = date[6..10].parse().map_err(|_| ResultCode::InvalidDateFormat)?;

    // Years below 100 are two-digit years upstream and never match a DD-MM-YYYY date.
    if year < 100 || NaiveDate::from_ymd_opt(year, month, day).is_none() {
        warn!("SETLDATE {} is not a calendar date", date);
        return Err(ResultCode::InvalidSettlementDate);
    }

    Ok(date)
}
