//! Test doubles for the application layer.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::ports::{GatewayError, RegistrationGateway, RegistrationRequest, StatusReporter};

/// Gateway that replays a script of responses, then falls back to a fixed
/// response (or panics when no fallback is set). Records every request.
pub(crate) struct ScriptedGateway {
    script: Mutex<VecDeque<Result<Vec<u8>, GatewayError>>>,
    fallback: Option<Result<Vec<u8>, GatewayError>>,
    calls: AtomicU32,
    requests: Mutex<Vec<RegistrationRequest>>,
}

impl ScriptedGateway {
    pub fn from_bodies<I, S>(bodies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            script: Mutex::new(
                bodies
                    .into_iter()
                    .map(|b| {
                        let body: String = b.into();
                        Ok(body.into_bytes())
                    })
                    .collect(),
            ),
            fallback: None,
            calls: AtomicU32::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn always_body(body: &str) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            fallback: Some(Ok(body.as_bytes().to_vec())),
            calls: AtomicU32::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn always_err(err: GatewayError) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            fallback: Some(Err(err)),
            calls: AtomicU32::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<RegistrationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl RegistrationGateway for ScriptedGateway {
    async fn submit(&self, request: &RegistrationRequest) -> Result<Vec<u8>, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());
        if let Some(next) = self.script.lock().unwrap().pop_front() {
            return next;
        }
        match &self.fallback {
            Some(response) => response.clone(),
            None => panic!("gateway script exhausted"),
        }
    }
}

/// Reporter that swallows everything.
pub(crate) struct NullReporter;

impl StatusReporter for NullReporter {
    fn favorites_known(&self, _favorites: &[String]) {}
    fn countdown_tick(&self, _remaining: Duration) {}
    fn attempt_rejected(&self, _course_id: &str, _reason: &str) {}
    fn course_registered(&self, _course_id: &str) {}
    fn course_failed(&self, _course_id: &str, _reason: &str) {}
}

/// Reporter that records one line per observation, for asserting on output
/// order and content.
#[derive(Default)]
pub(crate) struct RecordingReporter {
    lines: Mutex<Vec<String>>,
}

impl RecordingReporter {
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }

    fn record(&self, line: String) {
        self.lines.lock().unwrap().push(line);
    }
}

impl StatusReporter for RecordingReporter {
    fn favorites_known(&self, favorites: &[String]) {
        self.record(format!("favorites {}", favorites.join(",")));
    }

    fn countdown_tick(&self, remaining: Duration) {
        self.record(format!("countdown {}s", remaining.as_secs()));
    }

    fn attempt_rejected(&self, course_id: &str, reason: &str) {
        self.record(format!("rejected {} {}", course_id, reason));
    }

    fn course_registered(&self, course_id: &str) {
        self.record(format!("registered {}", course_id));
    }

    fn course_failed(&self, course_id: &str, reason: &str) {
        self.record(format!("failed {} {}", course_id, reason));
    }
}
