//! Inbound event protocol for the real-time feed.
//!
//! Frames are parsed in two steps: a thin envelope carrying only `type`,
//! then the payload for the types the core understands. Unrecognized types
//! are surfaced as [`InboundEvent::Unknown`] so the coordinator can log and
//! ignore them without failing the session.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// `type` tag of the session-info message.
pub const SESSION_INFO_TYPE: &str = "userState";
/// `type` tag of the catalog-update message.
pub const CATALOG_UPDATE_TYPE: &str = "listUpdate";

/// One parsed feed event.
#[derive(Debug, Clone, PartialEq)]
pub enum InboundEvent {
    /// Session info: the student's favorites and the registration instant.
    SessionInfo {
        favorites: Vec<String>,
        /// Epoch milliseconds; absent when the server has not announced the
        /// window yet.
        registration_time_ms: Option<f64>,
    },
    /// Full catalog replacement; entries stay raw for the snapshot builder.
    CatalogUpdate { entries: Vec<Value> },
    /// A type the core does not know. Logged and ignored upstream.
    Unknown { kind: String },
}

/// A frame that could not be turned into an event. Never fatal to the
/// session; the coordinator drops the frame and keeps reading.
#[derive(Debug, Error)]
pub enum EventParseError {
    #[error("Frame is not a JSON object with a 'type' field: {0}")]
    InvalidEnvelope(#[source] serde_json::Error),

    #[error("Malformed '{kind}' payload: {source}")]
    InvalidPayload {
        kind: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Deserialize)]
struct Envelope {
    #[serde(rename = "type")]
    kind: String,
}

#[derive(Deserialize)]
struct SessionInfoFrame {
    #[serde(default)]
    message: SessionInfoPayload,
}

#[derive(Deserialize, Default)]
struct SessionInfoPayload {
    #[serde(default)]
    favorites: Vec<String>,
    #[serde(rename = "registrationTime")]
    registration_time: Option<f64>,
}

#[derive(Deserialize)]
struct CatalogFrame {
    #[serde(default)]
    message: Vec<Value>,
}

/// Parses one framed feed message.
pub fn parse_event(frame: &str) -> Result<InboundEvent, EventParseError> {
    let envelope: Envelope =
        serde_json::from_str(frame).map_err(EventParseError::InvalidEnvelope)?;

    match envelope.kind.as_str() {
        SESSION_INFO_TYPE => {
            let parsed: SessionInfoFrame =
                serde_json::from_str(frame).map_err(|source| EventParseError::InvalidPayload {
                    kind: envelope.kind.clone(),
                    source,
                })?;
            Ok(InboundEvent::SessionInfo {
                favorites: parsed.message.favorites,
                registration_time_ms: parsed.message.registration_time,
            })
        }
        CATALOG_UPDATE_TYPE => {
            let parsed: CatalogFrame =
                serde_json::from_str(frame).map_err(|source| EventParseError::InvalidPayload {
                    kind: envelope.kind.clone(),
                    source,
                })?;
            Ok(InboundEvent::CatalogUpdate {
                entries: parsed.message,
            })
        }
        other => Ok(InboundEvent::Unknown {
            kind: other.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_session_info() {
        let frame = r#"{"type":"userState","message":{"favorites":["CS101","CS102"],"registrationTime":1700000000000.0}}"#;
        let event = parse_event(frame).unwrap();
        assert_eq!(
            event,
            InboundEvent::SessionInfo {
                favorites: vec!["CS101".into(), "CS102".into()],
                registration_time_ms: Some(1_700_000_000_000.0),
            }
        );
    }

    #[test]
    fn session_info_tolerates_missing_fields() {
        let event = parse_event(r#"{"type":"userState","message":{}}"#).unwrap();
        assert_eq!(
            event,
            InboundEvent::SessionInfo {
                favorites: vec![],
                registration_time_ms: None,
            }
        );
    }

    #[test]
    fn parses_catalog_update() {
        let frame = r#"{"type":"listUpdate","message":[{"id":"CS101","units":3}]}"#;
        match parse_event(frame).unwrap() {
            InboundEvent::CatalogUpdate { entries } => assert_eq!(entries.len(), 1),
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn unknown_type_is_preserved_not_rejected() {
        let event = parse_event(r#"{"type":"heartbeat"}"#).unwrap();
        assert_eq!(
            event,
            InboundEvent::Unknown {
                kind: "heartbeat".into()
            }
        );
    }

    #[test]
    fn non_json_frame_is_an_envelope_error() {
        assert!(matches!(
            parse_event("not json"),
            Err(EventParseError::InvalidEnvelope(_))
        ));
    }

    #[test]
    fn wrong_payload_shape_is_a_payload_error() {
        let frame = r#"{"type":"listUpdate","message":{"not":"an array"}}"#;
        assert!(matches!(
            parse_event(frame),
            Err(EventParseError::InvalidPayload { .. })
        ));
    }
}
