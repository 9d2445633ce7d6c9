//! Tests for mapping host event payloads to typed events

use opencode_notify::events::{Event, RawEvent};
use serde_json::json;

fn raw(value: serde_json::Value) -> RawEvent {
    serde_json::from_value(value).expect("raw event should deserialize")
}

mod known_kinds {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_session_idle() {
        let event = Event::from_raw(&raw(json!({
            "type": "session.idle",
            "properties": { "sessionID": "ses_1" }
        })));
        assert_eq!(
            event,
            Some(Event::SessionIdle {
                session_id: "ses_1".to_string()
            })
        );
    }

    #[test]
    fn test_session_error_with_string() {
        let event = Event::from_raw(&raw(json!({
            "type": "session.error",
            "properties": { "sessionID": "ses_1", "error": "context overflow" }
        })));
        assert_eq!(
            event,
            Some(Event::SessionError {
                session_id: "ses_1".to_string(),
                error: Some("context overflow".to_string()),
            })
        );
    }

    #[test]
    fn test_session_error_with_object() {
        let event = Event::from_raw(&raw(json!({
            "type": "session.error",
            "properties": {
                "sessionID": "ses_1",
                "error": { "name": "APIError", "data": { "message": "overloaded" } }
            }
        })));
        assert_eq!(
            event,
            Some(Event::SessionError {
                session_id: "ses_1".to_string(),
                error: Some("overloaded".to_string()),
            })
        );
    }

    #[test]
    fn test_session_error_without_error() {
        let event = Event::parse(r#"{"type":"session.error","properties":{"sessionID":"s"}}"#);
        assert_eq!(
            event,
            Some(Event::SessionError {
                session_id: "s".to_string(),
                error: None,
            })
        );
    }

    #[test]
    fn test_permission_updated_ignores_properties() {
        let event = Event::parse(
            r#"{"type":"permission.updated","properties":{"id":"per_1","type":"bash","sessionID":"s"}}"#,
        );
        assert_eq!(event, Some(Event::PermissionUpdated));
    }

    #[test]
    fn test_question_asked() {
        let event = Event::parse(r#"{"type":"question.asked","properties":{}}"#);
        assert_eq!(event, Some(Event::QuestionAsked));
    }
}

mod ignored {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_unknown_kind_ignored() {
        let event = Event::parse(r#"{"type":"message.part.updated","properties":{}}"#);
        assert_eq!(event, None);
    }

    #[test]
    fn test_idle_without_session_id_ignored() {
        assert_eq!(
            Event::parse(r#"{"type":"session.idle","properties":{}}"#),
            None
        );
        assert_eq!(
            Event::parse(r#"{"type":"session.idle","properties":{"sessionID":""}}"#),
            None
        );
    }

    #[test]
    fn test_missing_properties_tolerated() {
        assert_eq!(
            Event::parse(r#"{"type":"permission.updated"}"#),
            Some(Event::PermissionUpdated)
        );
        assert_eq!(Event::parse(r#"{"type":"session.error"}"#), None);
    }

    #[test]
    fn test_invalid_json_ignored() {
        assert_eq!(Event::parse("not json"), None);
        assert_eq!(Event::parse(r#"{"properties":{}}"#), None);
    }
}
