//! Single-course registration worker.
//!
//! One worker owns one course's attempt loop for the lifetime of a dispatch
//! batch. Failure classification:
//!
//! - transport errors and non-2xx statuses are terminal immediately - an
//!   unreachable or refusing HTTP layer is not worth hammering;
//! - a 2xx body that is not an acceptance is a business rejection and is
//!   retried under the session's [`RetryPolicy`].

use serde_json::Value;
use tokio::time::sleep;
use tracing::debug;

use crate::domain::{extract_reason, RegistrationOutcome, RetryPolicy, MAX_RETRIES_REACHED};
use crate::ports::{RegistrationGateway, RegistrationRequest, StatusReporter};

/// Runs the attempt loop for one course until the policy says stop.
///
/// Never returns an error: every failure mode is folded into the outcome.
pub async fn register_course<G>(
    gateway: &G,
    reporter: &dyn StatusReporter,
    policy: &RetryPolicy,
    request: RegistrationRequest,
) -> RegistrationOutcome
where
    G: RegistrationGateway + ?Sized,
{
    let mut attempts = 0u32;
    loop {
        attempts += 1;
        let body = match gateway.submit(&request).await {
            Ok(body) => body,
            // Local/transport/HTTP-layer failures are terminal for this
            // course; only the endpoint's own rejections are retried.
            Err(err) => return RegistrationOutcome::failure(&request.course, err.to_string()),
        };

        if endpoint_accepted(&body) {
            return RegistrationOutcome::success(&request.course);
        }

        let reason = extract_reason(&body);
        reporter.attempt_rejected(&request.course, &reason);
        debug!(course = %request.course, attempt = attempts, %reason, "registration rejected");

        if !policy.should_continue(attempts, false) {
            return RegistrationOutcome::failure(&request.course, MAX_RETRIES_REACHED);
        }
        sleep(policy.delay).await;
    }
}

/// Whether a 2xx body reports acceptance. `COURSE_DUPLICATE` counts: an
/// already-registered course is an idempotent success.
fn endpoint_accepted(body: &[u8]) -> bool {
    let Ok(value) = serde_json::from_slice::<Value>(body) else {
        return false;
    };
    matches!(
        value
            .get("jobs")
            .and_then(|jobs| jobs.get(0))
            .and_then(|job| job.get("result"))
            .and_then(Value::as_str),
        Some("OK") | Some("COURSE_DUPLICATE")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::{NullReporter, ScriptedGateway};
    use crate::domain::{RegistrationAction, RegistrationStatus};
    use crate::ports::GatewayError;
    use std::time::Duration;

    fn request(course: &str) -> RegistrationRequest {
        RegistrationRequest::new(RegistrationAction::Add, course, 3)
    }

    #[test]
    fn acceptance_requires_a_known_result() {
        assert!(endpoint_accepted(br#"{"jobs":[{"result":"OK"}]}"#));
        assert!(endpoint_accepted(br#"{"jobs":[{"result":"COURSE_DUPLICATE"}]}"#));
        assert!(!endpoint_accepted(br#"{"jobs":[{"result":"COURSE_FULL"}]}"#));
        assert!(!endpoint_accepted(b"not json"));
        assert!(!endpoint_accepted(b""));
    }

    #[tokio::test]
    async fn ok_on_first_attempt_is_success() {
        let gateway = ScriptedGateway::from_bodies([r#"{"jobs":[{"result":"OK"}]}"#]);
        let outcome = register_course(
            &gateway,
            &NullReporter,
            &RetryPolicy::bounded(3, Duration::ZERO),
            request("CS101"),
        )
        .await;
        assert_eq!(outcome.status, RegistrationStatus::Success);
        assert_eq!(gateway.calls(), 1);
    }

    #[tokio::test]
    async fn duplicate_is_idempotent_success() {
        let gateway = ScriptedGateway::from_bodies([r#"{"jobs":[{"result":"COURSE_DUPLICATE"}]}"#]);
        let outcome = register_course(
            &gateway,
            &NullReporter,
            &RetryPolicy::bounded(3, Duration::ZERO),
            request("CS101"),
        )
        .await;
        assert_eq!(outcome.status, RegistrationStatus::Success);
    }

    #[tokio::test]
    async fn transport_error_is_terminal_without_retry() {
        let gateway =
            ScriptedGateway::always_err(GatewayError::Transport("connection refused".into()));
        let outcome = register_course(
            &gateway,
            &NullReporter,
            &RetryPolicy::bounded(5, Duration::ZERO),
            request("CS101"),
        )
        .await;
        assert_eq!(gateway.calls(), 1);
        assert_eq!(
            outcome.status.reason(),
            Some("Transport error: connection refused")
        );
    }

    #[tokio::test]
    async fn non_2xx_status_is_terminal_without_retry() {
        let gateway = ScriptedGateway::always_err(GatewayError::Status(401));
        let outcome = register_course(
            &gateway,
            &NullReporter,
            &RetryPolicy::bounded(5, Duration::ZERO),
            request("CS101"),
        )
        .await;
        assert_eq!(gateway.calls(), 1);
        assert_eq!(outcome.status.reason(), Some("Status Code: 401"));
    }

    #[tokio::test]
    async fn bounded_rejections_exhaust_after_exactly_max_attempts() {
        let gateway = ScriptedGateway::always_body(r#"{"jobs":[{"result":"COURSE_FULL"}]}"#);
        let outcome = register_course(
            &gateway,
            &NullReporter,
            &RetryPolicy::bounded(4, Duration::ZERO),
            request("CS101"),
        )
        .await;
        assert_eq!(gateway.calls(), 4);
        assert_eq!(outcome.status.reason(), Some(MAX_RETRIES_REACHED));
    }

    #[tokio::test]
    async fn unbounded_retries_until_first_acceptance() {
        let mut bodies = vec![r#"{"error":"not open yet"}"#; 7];
        bodies.push(r#"{"jobs":[{"result":"OK"}]}"#);
        let gateway = ScriptedGateway::from_bodies(bodies);
        let outcome = register_course(
            &gateway,
            &NullReporter,
            &RetryPolicy::unbounded(Duration::ZERO),
            request("CS101"),
        )
        .await;
        assert_eq!(gateway.calls(), 8);
        assert_eq!(outcome.status, RegistrationStatus::Success);
    }
}
