//! Registration dispatcher - one concurrent worker per favorite course.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinSet;
use tokio::time::sleep;
use tracing::{error, info};

use crate::domain::{DispatchSnapshot, RegistrationOutcome, RegistrationStatus, RetryPolicy};
use crate::ports::{RegistrationGateway, RegistrationRequest, StatusReporter};

use super::worker::register_course;

/// Runs one dispatch batch to completion.
///
/// After an optional start-of-window `offset` sleep (clock-skew compensation),
/// spawns one worker task per favorite course. Each worker owns a disjoint
/// slot in the outcome vector, indexed by course position, so finalization
/// order does not matter. Blocks until every worker has finalized, reports
/// the per-course summary, and returns exactly one outcome per favorite.
pub async fn dispatch(
    gateway: Arc<dyn RegistrationGateway>,
    reporter: Arc<dyn StatusReporter>,
    snapshot: DispatchSnapshot,
    policy: RetryPolicy,
    offset: Duration,
) -> Vec<RegistrationOutcome> {
    if !offset.is_zero() {
        sleep(offset).await;
    }

    info!(
        courses = snapshot.favorites.len(),
        action = %snapshot.action,
        "dispatching registration batch"
    );

    let mut slots: Vec<Option<RegistrationOutcome>> = vec![None; snapshot.favorites.len()];
    let mut workers = JoinSet::new();

    for (index, course_id) in snapshot.favorites.iter().enumerate() {
        let request = RegistrationRequest::new(
            snapshot.action,
            course_id,
            snapshot.catalog.units_for(course_id),
        );
        let gateway = Arc::clone(&gateway);
        let reporter = Arc::clone(&reporter);
        workers.spawn(async move {
            let outcome = register_course(gateway.as_ref(), reporter.as_ref(), &policy, request).await;
            (index, outcome)
        });
    }

    while let Some(joined) = workers.join_next().await {
        match joined {
            Ok((index, outcome)) => slots[index] = Some(outcome),
            // Workers fold all failures into outcomes, so a join error means
            // the task itself died. The slot's fallback below covers it.
            Err(err) => error!(error = %err, "registration worker task failed"),
        }
    }

    let outcomes: Vec<RegistrationOutcome> = snapshot
        .favorites
        .iter()
        .zip(slots)
        .map(|(course_id, slot)| {
            slot.unwrap_or_else(|| RegistrationOutcome::failure(course_id, "worker task failed"))
        })
        .collect();

    for outcome in &outcomes {
        match &outcome.status {
            RegistrationStatus::Success => reporter.course_registered(&outcome.course_id),
            RegistrationStatus::Failure(reason) => {
                reporter.course_failed(&outcome.course_id, reason)
            }
        }
    }

    outcomes
}
