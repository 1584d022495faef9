//! Unit tests for sample domain scalar types.

use crate::sample::domain::{
    ParseSampleStatusError, RecordedAt, RejectionKind, SampleColumn, SampleDomainError,
    SampleStatus, SerialNumber,
};
use rstest::rstest;

#[rstest]
#[case("SN-1", "SN-1")]
#[case("  SN-2\t", "SN-2")]
#[case("000123", "000123")]
fn serial_number_is_trimmed(#[case] raw: &str, #[case] expected: &str) {
    let serial = SerialNumber::new(raw).expect("serial should be valid");
    assert_eq!(serial.as_str(), expected);
}

#[rstest]
#[case("")]
#[case("   ")]
fn blank_serial_number_is_rejected(#[case] raw: &str) {
    assert_eq!(
        SerialNumber::new(raw),
        Err(SampleDomainError::EmptySerialNumber)
    );
}

#[test]
fn serial_number_match_is_exact_text() {
    let serial = SerialNumber::new("SN-1").expect("valid serial");
    assert!(serial.matches("SN-1"));
    assert!(!serial.matches("sn-1"));
    assert!(!serial.matches("SN-10"));
}

#[rstest]
#[case("InStock", SampleStatus::InStock)]
#[case("in_stock", SampleStatus::InStock)]
#[case(" SENTOUT ", SampleStatus::SentOut)]
#[case("在库", SampleStatus::InStock)]
#[case("送出", SampleStatus::SentOut)]
fn status_parses_canonical_and_legacy_labels(#[case] raw: &str, #[case] expected: SampleStatus) {
    assert_eq!(SampleStatus::try_from(raw), Ok(expected));
}

#[test]
fn unknown_status_is_rejected() {
    assert_eq!(
        SampleStatus::try_from("lost"),
        Err(ParseSampleStatusError("lost".to_owned()))
    );
}

#[test]
fn column_headers_follow_persisted_order() {
    let headers: Vec<&str> = SampleColumn::ALL.iter().map(|c| c.header()).collect();
    assert_eq!(
        headers,
        [
            "Model",
            "SerialNumber",
            "PartNumber",
            "OutboundCourierID",
            "Status",
            "SentAt",
            "SentToClient",
            "SentAttachment",
            "ReceivedAt",
            "ReturnCourierID",
            "ReturnAttachment",
        ]
    );
}

#[rstest]
#[case("SerialNumber", Some(SampleColumn::SerialNumber))]
#[case("outboundcourierid", Some(SampleColumn::OutboundCourierId))]
#[case("序列号", Some(SampleColumn::SerialNumber))]
#[case("归还附件", Some(SampleColumn::ReturnAttachment))]
#[case("Notes", None)]
fn column_resolves_from_header(#[case] header: &str, #[case] expected: Option<SampleColumn>) {
    assert_eq!(SampleColumn::from_header(header), expected);
}

#[test]
fn recorded_at_uses_fixed_width_format() {
    let stamp = RecordedAt::parse("2026-03-01 09:05:07").expect("valid timestamp");
    assert_eq!(stamp.to_string(), "2026-03-01 09:05:07");
}

#[rstest]
#[case("2026-03-01")]
#[case("01/03/2026 09:05:07")]
#[case("2026-03-01T09:05:07")]
#[case("2024/1/5")]
#[case("not a date")]
fn recorded_at_rejects_other_formats(#[case] raw: &str) {
    assert!(RecordedAt::parse(raw).is_err());
}

#[rstest]
#[case("2024/1/5 10:00", "2024-01-05 10:00:00")]
#[case("2024/01/05 10:00:30", "2024-01-05 10:00:30")]
#[case("2024-01-05 10:00", "2024-01-05 10:00:00")]
fn recorded_at_reads_spreadsheet_layouts_in_storage_form(
    #[case] raw: &str,
    #[case] expected: &str,
) {
    let stamp = RecordedAt::parse(raw).expect("spreadsheet timestamp parses");
    assert_eq!(stamp.to_string(), expected);
}

#[test]
fn blank_recorded_at_parses_as_none() {
    assert_eq!(RecordedAt::parse_optional("  "), Ok(None));
}

#[rstest]
#[case(SampleDomainError::EmptySerialNumber, RejectionKind::Conflict)]
#[case(SampleDomainError::NotFound("SN-1".to_owned()), RejectionKind::NotFound)]
#[case(
    SampleDomainError::ConfirmationRequired(SerialNumber::new("SN-1").expect("valid serial")),
    RejectionKind::ConfirmationRequired
)]
#[case(
    SampleDomainError::NotInStock {
        serial_number: SerialNumber::new("SN-1").expect("valid serial"),
        status: SampleStatus::SentOut,
    },
    RejectionKind::Conflict
)]
fn domain_errors_map_to_rejection_kinds(
    #[case] error: SampleDomainError,
    #[case] expected: RejectionKind,
) {
    assert_eq!(error.kind(), expected);
}
