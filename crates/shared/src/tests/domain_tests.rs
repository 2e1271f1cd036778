use super::*;

use crate::protocol::UpdateEventInput;

#[test]
fn occurrence_uses_camel_case_wire_names() {
    let occurrence = Occurrence::parse("2024-05-01", "09:00", "10:30").expect("occurrence");
    let value = serde_json::to_value(occurrence).expect("serialize");
    assert_eq!(
        value,
        serde_json::json!({
            "startDate": "2024-05-01",
            "startTime": "09:00",
            "endTime": "10:30"
        })
    );
}

#[test]
fn occurrence_accepts_times_with_seconds() {
    let occurrence: Occurrence = serde_json::from_value(serde_json::json!({
        "startDate": "2024-05-01",
        "startTime": "09:00:00",
        "endTime": "10:30:00"
    }))
    .expect("deserialize");
    assert_eq!(
        occurrence,
        Occurrence::parse("2024-05-01", "09:00", "10:30").expect("occurrence")
    );
}

#[test]
fn event_decodes_query_shape_with_nulls() {
    let event: Event = serde_json::from_value(serde_json::json!({
        "id": "42",
        "title": "Rust meetup",
        "description": null,
        "isOnline": false,
        "isLive": true,
        "images": [{ "url": "https://cdn.example/banner.jpg" }],
        "user": { "name": "Ada" },
        "venue": null,
        "occurrences": []
    }))
    .expect("deserialize");

    assert_eq!(event.id, EventId::new("42"));
    assert!(event.is_live);
    assert_eq!(event.description, None);
    assert_eq!(event.venue, None);
    assert_eq!(event.user, Some(Organizer { name: "Ada".to_string() }));
    assert_eq!(event.images, vec![ImageRef::hosted("https://cdn.example/banner.jpg")]);
}

#[test]
fn fresh_upload_requires_non_empty_encoded_data() {
    assert!(!ImageRef::hosted("a.jpg").is_fresh_upload());
    assert!(!ImageRef {
        url: Some("a.jpg".to_string()),
        encoded_data: Some(String::new()),
    }
    .is_fresh_upload());
    assert!(ImageRef::upload("data:image/png;base64,AAAA").is_fresh_upload());
}

#[test]
fn update_input_omits_images_when_absent() {
    let input = UpdateEventInput {
        id: EventId::new("7"),
        title: "Title".to_string(),
        description: "[]".to_string(),
        occurrences: Vec::new(),
        images: None,
    };
    let value = serde_json::to_value(&input).expect("serialize");
    assert!(value.get("images").is_none());
}
