//! Failure Reason Extractor - normalizes endpoint error payloads.

use serde_json::Value;

/// Projects a raw registration-endpoint response body onto a single
/// human-readable reason string.
///
/// Precedence:
/// 1. a top-level `error` string field,
/// 2. else `jobs[0].result` when it is a string,
/// 3. else the raw body decoded as lossy UTF-8.
///
/// Total over arbitrary bytes: unparsable input degrades to raw-text
/// passthrough, never an error.
pub fn extract_reason(body: &[u8]) -> String {
    if let Ok(value) = serde_json::from_slice::<Value>(body) {
        if let Some(error) = value.get("error").and_then(Value::as_str) {
            return error.to_string();
        }
        if let Some(result) = value
            .get("jobs")
            .and_then(|jobs| jobs.get(0))
            .and_then(|job| job.get("result"))
            .and_then(Value::as_str)
        {
            return result.to_string();
        }
    }
    String::from_utf8_lossy(body).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn top_level_error_field_wins() {
        let body = br#"{"error": "capacity full", "jobs": [{"result": "ignored"}]}"#;
        assert_eq!(extract_reason(body), "capacity full");
    }

    #[test]
    fn falls_back_to_first_job_result() {
        let body = br#"{"jobs": [{"result": "COURSE_FULL"}, {"result": "other"}]}"#;
        assert_eq!(extract_reason(body), "COURSE_FULL");
    }

    #[test]
    fn non_string_error_field_is_skipped() {
        let body = br#"{"error": 42, "jobs": [{"result": "COURSE_FULL"}]}"#;
        assert_eq!(extract_reason(body), "COURSE_FULL");
    }

    #[test]
    fn unparsable_body_passes_through_as_text() {
        assert_eq!(extract_reason(b"service unavailable"), "service unavailable");
    }

    #[test]
    fn empty_body_yields_empty_string() {
        assert_eq!(extract_reason(b""), "");
    }

    #[test]
    fn json_without_relevant_fields_passes_through() {
        let body = br#"{"status": "weird"}"#;
        assert_eq!(extract_reason(body), r#"{"status": "weird"}"#);
    }

    proptest! {
        #[test]
        fn total_over_arbitrary_bytes(body in proptest::collection::vec(any::<u8>(), 0..256)) {
            // Must never panic, whatever the input.
            let _ = extract_reason(&body);
        }
    }
}
