use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Caller identity every inquiry must carry in `TargetSystemUserID`
pub const AUTHORIZED_CALLER_ID: &str = "SWITCHUSER";

/// `MSG_TYPE` of the original financial request
pub const MSG_TYPE_FINANCIAL: &str = "1200";
/// `MSG_TYPE` of a reversal advice
pub const MSG_TYPE_REVERSAL: &str = "1400";

/// `WORK_PROGRESS` of a request the switch failed to process
pub const WORK_PROGRESS_FAILED: &str = "F";
/// `WORK_PROGRESS` of a request the switch processed successfully
pub const WORK_PROGRESS_SUCCESS: &str = "S";

/// Inbound inquiry envelope
///
/// Only the top level is typed. Containers and leaves stay raw JSON so that a
/// wrong type anywhere below surfaces as the matching field's validation code
/// instead of failing the whole envelope.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InquiryRequest {
    #[serde(rename = "HeaderSwitchModel", default)]
    pub header: Option<Value>,
    #[serde(rename = "LookUpData", default)]
    pub look_up_data: Option<Value>,
}

impl InquiryRequest {
    /// `HeaderSwitchModel.TargetSystemUserID`, absent when the header is not an object
    pub fn caller_id(&self) -> Option<&Value> {
        self.header.as_ref()?.get("TargetSystemUserID")
    }

    /// `LookUpData.Details`
    ///
    /// `None` when the lookup data or its details are missing or empty-valued
    /// (`null`, `false`, `0`, `""`). Any other non-object details yield a
    /// record with every field absent.
    pub fn details(&self) -> Option<LookUpDetails> {
        let details = self
            .look_up_data
            .as_ref()
            .filter(|data| is_truthy(data))?
            .get("Details")
            .filter(|details| is_truthy(details))?;

        Some(serde_json::from_value(details.clone()).unwrap_or_default())
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// The five identifying fields of the transaction being inquired about
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LookUpDetails {
    #[serde(rename = "RRN", default)]
    pub rrn: Option<Value>,
    #[serde(rename = "STAN", default)]
    pub stan: Option<Value>,
    #[serde(rename = "TXNAMT", default)]
    pub txnamt: Option<Value>,
    #[serde(rename = "TERMID", default)]
    pub termid: Option<Value>,
    #[serde(rename = "SETLDATE", default)]
    pub setldate: Option<Value>,
}

/// Lookup fields that passed validation, still in their inbound encoding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedLookup {
    pub reference_number: String,
    pub sequence_number: String,
    pub amount: String,
    pub terminal_id: String,
    /// `DD-MM-YYYY`
    pub settlement_date: String,
}

/// One row of the switch transaction log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub reference_number: String,
    pub sequence_number: String,
    pub amount: String,
    pub terminal_id: String,
    pub settlement_date: String,
    pub message_type: String,
    pub from_account: Option<String>,
    pub to_account: Option<String>,
    pub work_progress: String,
}

impl TransactionRecord {
    /// Direction implied by whichever account column is populated, if any
    pub fn account_direction(&self) -> Option<TransactionType> {
        if is_populated(&self.from_account) {
            Some(TransactionType::Debit)
        } else if is_populated(&self.to_account) {
            Some(TransactionType::Credit)
        } else {
            None
        }
    }

    /// Transaction type of this record, defaulting to `DEBIT`
    pub fn transaction_type(&self) -> TransactionType {
        self.account_direction().unwrap_or(TransactionType::Debit)
    }
}

fn is_populated(account: &Option<String>) -> bool {
    account.as_deref().is_some_and(|a| !a.is_empty())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    Debit,
    Credit,
}

/// Closed set of result codes an inquiry can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultCode {
    /// E1
    InvalidCallerId,
    /// E2
    InvalidReferenceNumber,
    /// E3
    InvalidSequenceNumber,
    /// E4
    InvalidAmount,
    /// E5
    InvalidTerminalId,
    /// E6
    InvalidSettlementDate,
    /// E7
    InvalidDateFormat,
    /// E8
    DestinationUnreachable,
    /// E9
    SystemError,
    /// R1
    TransactionFailed,
    /// R2
    AlreadyReversed,
    /// R3
    AlreadyProcessed,
    /// R4
    NotFound,
}

impl ResultCode {
    pub fn code(&self) -> &'static str {
        match self {
            ResultCode::InvalidCallerId => "E1",
            ResultCode::InvalidReferenceNumber => "E2",
            ResultCode::InvalidSequenceNumber => "E3",
            ResultCode::InvalidAmount => "E4",
            ResultCode::InvalidTerminalId => "E5",
            ResultCode::InvalidSettlementDate => "E6",
            ResultCode::InvalidDateFormat => "E7",
            ResultCode::DestinationUnreachable => "E8",
            ResultCode::SystemError => "E9",
            ResultCode::TransactionFailed => "R1",
            ResultCode::AlreadyReversed => "R2",
            ResultCode::AlreadyProcessed => "R3",
            ResultCode::NotFound => "R4",
        }
    }

    /// Caller-facing text; downstream consumers match on it verbatim
    pub fn message(&self) -> &'static str {
        match self {
            ResultCode::InvalidCallerId => "Please check user id",
            ResultCode::InvalidReferenceNumber => {
                "Please check RRN must be 12 digit and not include any characters"
            }
            ResultCode::InvalidSequenceNumber => {
                "Please check STAN must be 6 digit and not include any characters"
            }
            ResultCode::InvalidAmount => "Please check TXNAMT",
            ResultCode::InvalidTerminalId => {
                "Please check termid must be not less than 6 and not more then 8 digit and not include any special characters"
            }
            ResultCode::InvalidSettlementDate => "Please check txn date",
            ResultCode::InvalidDateFormat => "Date format must be DD-MM-YYYY",
            ResultCode::DestinationUnreachable => "ORA-12543: TNS:destination host unreachable\n",
            ResultCode::SystemError => "Core bank system error",
            ResultCode::TransactionFailed => "Transaction Failed",
            ResultCode::AlreadyReversed => "Transaction is already Reversed",
            ResultCode::AlreadyProcessed => "Transaction is already Processed",
            ResultCode::NotFound => "Transaction is not Found",
        }
    }

    /// `true` for R-codes: the inquiry itself succeeded
    pub fn is_inquiry_success(&self) -> bool {
        matches!(
            self,
            ResultCode::TransactionFailed
                | ResultCode::AlreadyReversed
                | ResultCode::AlreadyProcessed
                | ResultCode::NotFound
        )
    }
}

impl std::fmt::Display for ResultCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.code(), self.message().trim_end())
    }
}

/// Outcome of a resolved inquiry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupOutcome {
    pub code: ResultCode,
    pub transaction_type: Option<TransactionType>,
}

impl LookupOutcome {
    pub fn new(code: ResultCode) -> Self {
        Self {
            code,
            transaction_type: None,
        }
    }

    pub fn with_type(code: ResultCode, transaction_type: TransactionType) -> Self {
        Self {
            code,
            transaction_type: Some(transaction_type),
        }
    }
}

/// Outbound envelope; always carries exactly one entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InquiryResponse {
    #[serde(rename = "Result")]
    pub result: Vec<ResultEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultEntry {
    #[serde(rename = "Code")]
    pub code: String,
    #[serde(rename = "Message")]
    pub message: String,
    #[serde(
        rename = "TransactionType",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub transaction_type: Option<TransactionType>,
}

impl From<LookupOutcome> for InquiryResponse {
    fn from(outcome: LookupOutcome) -> Self {
        Self {
            result: vec![ResultEntry {
                code: outcome.code.code().to_string(),
                message: outcome.code.message().to_string(),
                transaction_type: outcome.transaction_type,
            }],
        }
    }
}

impl From<ResultCode> for InquiryResponse {
    fn from(code: ResultCode) -> Self {
        LookupOutcome::new(code).into()
    }
}
