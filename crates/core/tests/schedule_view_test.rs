use pretty_assertions::assert_eq;
use serde_json::json;
use slotbook_core::models::Weekday;
use slotbook_core::schedule_view::{UpstreamSlot, WeeklyAvailability};

fn upstream(value: serde_json::Value) -> UpstreamSlot {
    serde_json::from_value(value).expect("valid upstream slot")
}

#[test]
fn test_is_available_flag_wins() {
    let slot = upstream(json!({ "isAvailable": true, "isBooked": true }));
    assert!(slot.is_free());

    let slot = upstream(json!({ "isAvailable": false, "status": "available" }));
    assert!(!slot.is_free());
}

#[test]
fn test_status_string_checked_second() {
    let slot = upstream(json!({ "status": "available", "booked": true }));
    assert!(slot.is_free());

    let slot = upstream(json!({ "status": "taken" }));
    assert!(!slot.is_free());
}

#[test]
fn test_booked_flags_checked_last() {
    assert!(!upstream(json!({ "isBooked": true })).is_free());
    assert!(!upstream(json!({ "booked": true })).is_free());
    assert!(!upstream(json!({ "reserved": true })).is_free());
    // Nothing says it is taken: free.
    assert!(upstream(json!({})).is_free());
}

#[test]
fn test_grouping_keeps_only_free_slots() {
    let slots = vec![
        upstream(json!({ "dayOfWeek": "monday", "startTime": "09:00", "endTime": "10:00" })),
        upstream(json!({ "dayOfWeek": "monday", "startTime": "11:00", "isBooked": true })),
        upstream(json!({ "dayOfWeek": "wednesday", "startTime": "14:00" })),
    ];
    let week = WeeklyAvailability::from_slots(slots);

    assert_eq!(week.slots_on(Weekday::Monday).len(), 1);
    assert_eq!(week.slots_on(Weekday::Wednesday).len(), 1);
    assert!(week.slots_on(Weekday::Tuesday).is_empty());
}

#[test]
fn test_day_sorted_by_start_with_unparsable_last() {
    let slots = vec![
        upstream(json!({ "dayOfWeek": "friday", "startTime": "garbled" })),
        upstream(json!({ "dayOfWeek": "friday", "startTime": "14:00" })),
        upstream(json!({ "dayOfWeek": "friday", "startTime": "09:00" })),
    ];
    let week = WeeklyAvailability::from_slots(slots);

    let starts: Vec<Option<&str>> = week
        .slots_on(Weekday::Friday)
        .iter()
        .map(|slot| slot.start_time.as_deref())
        .collect();
    assert_eq!(starts, vec![Some("09:00"), Some("14:00"), Some("garbled")]);
}

#[test]
fn test_unknown_day_is_dropped() {
    let slots = vec![upstream(
        json!({ "dayOfWeek": "someday", "startTime": "09:00" }),
    )];
    let week = WeeklyAvailability::from_slots(slots);

    for day in slotbook_core::models::weekday::ALL_WEEKDAYS {
        assert!(week.slots_on(day).is_empty());
    }
}

#[test]
fn test_default_day_is_first_with_free_slot() {
    let slots = vec![
        upstream(json!({ "dayOfWeek": "thursday", "startTime": "09:00" })),
        upstream(json!({ "dayOfWeek": "tuesday", "startTime": "09:00" })),
    ];
    let week = WeeklyAvailability::from_slots(slots);

    assert!(week.day_has_free(Weekday::Tuesday));
    assert!(!week.day_has_free(Weekday::Monday));
    assert_eq!(week.default_day(), Weekday::Tuesday);
}

#[test]
fn test_default_day_falls_back_to_monday_when_empty() {
    let week = WeeklyAvailability::from_slots(vec![]);
    assert_eq!(week.default_day(), Weekday::Monday);
}

#[test]
fn test_alternate_field_spellings_accepted() {
    let slot = upstream(json!({ "day": "monday", "start": "09:00", "end": "10:00" }));
    assert_eq!(slot.day_of_week.as_deref(), Some("monday"));
    assert_eq!(slot.start_time.as_deref(), Some("09:00"));
    assert_eq!(slot.end_time.as_deref(), Some("10:00"));
}
