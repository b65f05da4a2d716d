//! Tests for inquiry validation
//! 
//! Covers each field rule and the first-failing-field ordering

#[cfg(test)]
mod tests {
    use crate::{validation::Validator, InquiryRequest, ResultCode};
    use serde_json::{json, Value};

    /// Helper building a request that passes every rule
    fn valid_body() -> Value {
        json!({
            "HeaderSwitchModel": { "TargetSystemUserID": "SWITCHUSER" },
            "LookUpData": { "Details": {
                "RRN": "456107036921",
                "STAN": "543028",
                "TXNAMT": "000000020000",
                "TERMID": "888777",
                "SETLDATE": "19-03-2025"
            }}
        })
    }

    /// Helper replacing one detail field
    fn with_detail(field: &str, value: Value) -> Value {
        let mut body = valid_body();
        body["LookUpData"]["Details"][field] = value;
        body
    }

    fn validate(body: Value) -> Result<crate::ValidatedLookup, ResultCode> {
        let request: InquiryRequest = serde_json::from_value(body).unwrap();
        Validator::new().validate(&request)
    }

    #[test]
    fn test_valid_request_passes() {
        let lookup = validate(valid_body()).unwrap();

        assert_eq!(lookup.reference_number, "456107036921");
        assert_eq!(lookup.sequence_number, "543028");
        assert_eq!(lookup.amount, "000000020000");
        assert_eq!(lookup.terminal_id, "888777");
        assert_eq!(lookup.settlement_date, "19-03-2025");
    }

    #[test]
    fn test_caller_id_rules() {
        let mut body = valid_body();
        body["HeaderSwitchModel"]["TargetSystemUserID"] = json!("");
        assert_eq!(validate(body).unwrap_err(), ResultCode::InvalidCallerId);

        let mut body = valid_body();
        body["HeaderSwitchModel"]["TargetSystemUserID"] = json!("OTHERUSER");
        assert_eq!(validate(body).unwrap_err(), ResultCode::InvalidCallerId);

        let mut body = valid_body();
        body["HeaderSwitchModel"]["TargetSystemUserID"] = json!("  SWITCHUSER ");
        assert!(validate(body).is_ok());

        let mut body = valid_body();
        body.as_object_mut().unwrap().remove("HeaderSwitchModel");
        assert_eq!(validate(body).unwrap_err(), ResultCode::InvalidCallerId);
    }

    #[test]
    fn test_missing_details_is_system_error() {
        let body = json!({
            "HeaderSwitchModel": { "TargetSystemUserID": "SWITCHUSER" },
            "LookUpData": {}
        });
        assert_eq!(validate(body).unwrap_err(), ResultCode::SystemError);

        // Envelope problems win over a bad caller id
        let body = json!({ "HeaderSwitchModel": { "TargetSystemUserID": "" } });
        assert_eq!(validate(body).unwrap_err(), ResultCode::SystemError);
    }

    #[test]
    fn test_first_failing_field_wins() {
        let mut body = with_detail("RRN", json!("123"));
        body["HeaderSwitchModel"]["TargetSystemUserID"] = json!("nobody");
        assert_eq!(validate(body).unwrap_err(), ResultCode::InvalidCallerId);

        let mut body = with_detail("STAN", json!("1"));
        body["LookUpData"]["Details"]["SETLDATE"] = json!("bad");
        assert_eq!(validate(body).unwrap_err(), ResultCode::InvalidSequenceNumber);
    }

    #[test]
    fn test_rrn_rules() {
        assert_eq!(
            validate(with_detail("RRN", json!("123456789"))).unwrap_err(),
            ResultCode::InvalidReferenceNumber
        );
        assert_eq!(
            validate(with_detail("RRN", json!("45610703692A"))).unwrap_err(),
            ResultCode::InvalidReferenceNumber
        );
        // Numbers are not accepted in place of strings
        assert_eq!(
            validate(with_detail("RRN", json!(456107036921u64))).unwrap_err(),
            ResultCode::InvalidReferenceNumber
        );
    }

    #[test]
    fn test_stan_rules() {
        assert_eq!(
            validate(with_detail("STAN", json!("5430"))).unwrap_err(),
            ResultCode::InvalidSequenceNumber
        );
        assert_eq!(
            validate(with_detail("STAN", Value::Null)).unwrap_err(),
            ResultCode::InvalidSequenceNumber
        );
    }

    #[test]
    fn test_amount_rules() {
        assert_eq!(
            validate(with_detail("TXNAMT", json!("abc"))).unwrap_err(),
            ResultCode::InvalidAmount
        );
        assert_eq!(
            validate(with_detail("TXNAMT", json!("20000"))).unwrap_err(),
            ResultCode::InvalidAmount
        );
        // All zeros is a legal amount
        assert!(validate(with_detail("TXNAMT", json!("000000000000"))).is_ok());
    }

    #[test]
    fn test_terminal_id_rules() {
        assert_eq!(
            validate(with_detail("TERMID", json!("12345"))).unwrap_err(),
            ResultCode::InvalidTerminalId
        );
        assert_eq!(
            validate(with_detail("TERMID", json!("123456789"))).unwrap_err(),
            ResultCode::InvalidTerminalId
        );
        assert_eq!(
            validate(with_detail("TERMID", json!("1234-67"))).unwrap_err(),
            ResultCode::InvalidTerminalId
        );
        assert!(validate(with_detail("TERMID", json!("12345678"))).is_ok());
    }

    #[test]
    fn test_settlement_date_rules() {
        assert_eq!(
            validate(with_detail("SETLDATE", json!("2025-03-19"))).unwrap_err(),
            ResultCode::InvalidDateFormat
        );
        assert_eq!(
            validate(with_detail("SETLDATE", json!("1-3-2025"))).unwrap_err(),
            ResultCode::InvalidDateFormat
        );
        // Well formed but not on the calendar
        assert_eq!(
            validate(with_detail("SETLDATE", json!("31-04-2025"))).unwrap_err(),
            ResultCode::InvalidSettlementDate
        );
        assert_eq!(
            validate(with_detail("SETLDATE", json!("29-02-2023"))).unwrap_err(),
            ResultCode::InvalidSettlementDate
        );
        assert!(validate(with_detail("SETLDATE", json!("29-02-2024"))).is_ok());
        // Missing date reports the date check, not the format check
        assert_eq!(
            validate(with_detail("SETLDATE", Value::Null)).unwrap_err(),
            ResultCode::InvalidSettlementDate
        );
    }

    #[test]
    fn test_non_object_header_is_caller_id_error() {
        let mut body = valid_body();
        body["HeaderSwitchModel"] = json!("SWITCHUSER");
        assert_eq!(validate(body).unwrap_err(), ResultCode::InvalidCallerId);

        let mut body = valid_body();
        body["HeaderSwitchModel"] = json!(["SWITCHUSER"]);
        assert_eq!(validate(body).unwrap_err(), ResultCode::InvalidCallerId);
    }

    #[test]
    fn test_details_container_shapes() {
        // Empty-valued details count as missing
        for details in [Value::Null, json!(""), json!(0), json!(false)] {
            let mut body = valid_body();
            body["LookUpData"]["Details"] = details;
            assert_eq!(validate(body).unwrap_err(), ResultCode::SystemError);
        }

        let mut body = valid_body();
        body["LookUpData"] = json!("details");
        assert_eq!(validate(body).unwrap_err(), ResultCode::SystemError);

        // Present but not an object: every field is absent
        let mut body = valid_body();
        body["LookUpData"]["Details"] = json!("456107036921");
        assert_eq!(validate(body).unwrap_err(), ResultCode::InvalidReferenceNumber);
    }

    #[test]
    fn test_two_digit_years_are_not_calendar_dates() {
        assert_eq!(
            validate(with_detail("SETLDATE", json!("29-02-0000"))).unwrap_err(),
            ResultCode::InvalidSettlementDate
        );
        assert_eq!(
            validate(with_detail("SETLDATE", json!("01-01-0099"))).unwrap_err(),
            ResultCode::InvalidSettlementDate
        );
        assert!(validate(with_detail("SETLDATE", json!("01-01-0100"))).is_ok());
    }
}
