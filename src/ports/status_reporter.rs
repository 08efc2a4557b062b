//! StatusReporter port - user-visible progress, kept out of the core.

use std::time::Duration;

/// Port for the observable side effects of a session: countdown ticks,
/// per-attempt rejections, and the final per-course summary. Implementations
/// must be cheap and non-blocking; the console adapter is the only production
/// one, tests use a recording stub.
pub trait StatusReporter: Send + Sync {
    /// Favorites resolved for this session, in dispatch order.
    fn favorites_known(&self, favorites: &[String]);

    /// One tick of the countdown to the registration instant.
    fn countdown_tick(&self, remaining: Duration);

    /// A single attempt was rejected by the endpoint (the worker may retry).
    fn attempt_rejected(&self, course_id: &str, reason: &str);

    /// Terminal success observation for one course.
    fn course_registered(&self, course_id: &str);

    /// Terminal failure observation for one course.
    fn course_failed(&self, course_id: &str, reason: &str);
}
