//! Calendar actions

use chrono::DateTime;
use mailbridge_common::{GraphClient, GraphRequest};
use mailbridge_domain::{BridgeError, Credential, GraphCollection, Result};
use serde::Deserialize;
use serde_json::{json, Value};

/// Fields for creating a calendar event.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventInput {
    /// Target calendar; the default calendar when empty.
    pub calendar_id: Option<String>,
    pub subject: String,
    /// RFC 3339 timestamp.
    pub start_time: String,
    /// RFC 3339 timestamp.
    pub end_time: String,
    pub is_all_day: bool,
    /// Event description; HTML allowed.
    pub body: Option<String>,
    /// Free/busy visibility (`free` | `busy`).
    pub show_as: Option<String>,
}

/// Hidden trigger powering the calendar dropdown.
pub async fn list_calendars(
    client: &GraphClient,
    api_base: &str,
    credential: &Credential,
) -> Result<Vec<Value>> {
    let request = GraphRequest::get(format!("{api_base}/me/calendars"))
        .error_prefix("Unable to retrieve the list of calendars");

    let response = client.execute(Some(&credential.access_token), request).await?;
    let collection: GraphCollection<Value> = response.json().map_err(|err| {
        BridgeError::Network(format!("Unable to retrieve the list of calendars: {err}"))
    })?;

    Ok(collection.value)
}

/// Create an event in the chosen calendar.
pub async fn create_calendar_event(
    client: &GraphClient,
    api_base: &str,
    credential: &Credential,
    input: &EventInput,
) -> Result<Value> {
    let url = match &input.calendar_id {
        Some(calendar_id) => format!("{api_base}/me/calendars/{calendar_id}/events"),
        None => format!("{api_base}/me/events"),
    };

    let request = GraphRequest::post(url)
        .json(event_body(input))
        .error_prefix("Unable to create the calendar event");

    let response = client.execute(Some(&credential.access_token), request).await?;
    response.json().map_err(|err| {
        BridgeError::Network(format!("Unable to create the calendar event: {err}"))
    })
}

fn event_body(input: &EventInput) -> Value {
    let start = event_time(&input.start_time, input.is_all_day);
    let end = event_time(&input.end_time, input.is_all_day);

    let mut body = json!({
        "subject": input.subject,
        "isAllDay": input.is_all_day,
        "start": { "dateTime": start, "timeZone": "UTC" },
        "end": { "dateTime": end, "timeZone": "UTC" },
    });

    if let (Some(map), Some(description)) = (body.as_object_mut(), &input.body) {
        map.insert(
            "body".to_string(),
            json!({ "contentType": "HTML", "content": description }),
        );
    }
    if let (Some(map), Some(show_as)) = (body.as_object_mut(), &input.show_as) {
        map.insert("showAs".to_string(), json!(show_as));
    }

    body
}

/// All-day events ignore the time component: Graph wants them pinned
/// to midnight. Timestamps that fail to parse pass through verbatim
/// and the upstream validation error surfaces via the middleware.
fn event_time(timestamp: &str, is_all_day: bool) -> String {
    if !is_all_day {
        return timestamp.to_string();
    }

    match DateTime::parse_from_rfc3339(timestamp) {
        Ok(parsed) => format!("{}T00:00:00", parsed.date_naive().format("%Y-%m-%d")),
        Err(_) => timestamp.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timed_event_keeps_timestamps_verbatim() {
        let input = EventInput {
            subject: "Standup".to_string(),
            start_time: "2019-03-25T18:00:00Z".to_string(),
            end_time: "2019-03-25T18:30:00Z".to_string(),
            ..EventInput::default()
        };

        let body = event_body(&input);
        assert_eq!(body["start"]["dateTime"], "2019-03-25T18:00:00Z");
        assert_eq!(body["isAllDay"], false);
        assert!(body.get("showAs").is_none());
    }

    #[test]
    fn all_day_event_truncates_times_to_midnight() {
        let input = EventInput {
            subject: "Conference".to_string(),
            start_time: "2019-03-25T18:00:00Z".to_string(),
            end_time: "2019-03-26T09:00:00-05:00".to_string(),
            is_all_day: true,
            ..EventInput::default()
        };

        let body = event_body(&input);
        assert_eq!(body["start"]["dateTime"], "2019-03-25T00:00:00");
        assert_eq!(body["end"]["dateTime"], "2019-03-26T00:00:00");
    }

    #[test]
    fn optional_fields_appear_when_set() {
        let input = EventInput {
            subject: "Review".to_string(),
            start_time: "2019-03-25T18:00:00Z".to_string(),
            end_time: "2019-03-25T19:00:00Z".to_string(),
            body: Some("<p>agenda</p>".to_string()),
            show_as: Some("free".to_string()),
            ..EventInput::default()
        };

        let body = event_body(&input);
        assert_eq!(body["body"]["contentType"], "HTML");
        assert_eq!(body["body"]["content"], "<p>agenda</p>");
        assert_eq!(body["showAs"], "free");
    }

    #[test]
    fn unparseable_all_day_timestamp_passes_through() {
        assert_eq!(event_time("tomorrow", true), "tomorrow");
    }
}
