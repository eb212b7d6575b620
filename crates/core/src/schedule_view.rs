//! Presentation-side derivation of a teacher's weekly availability.
//!
//! The upstream profile feed is not uniform about how it flags a slot as
//! taken, so this module also carries the compatibility shim that decides
//! "is this slot free" across the known field spellings.

use serde::Deserialize;

use crate::models::weekday::{ALL_WEEKDAYS, Weekday};
use crate::time::parse_to_minutes;

/// A slot as delivered by the upstream profile feed.
///
/// Field names vary by source, hence the aliases. Only the fields this view
/// needs are modeled; everything else in the payload is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamSlot {
    #[serde(default, alias = "_id")]
    pub id: Option<String>,
    #[serde(default, rename = "dayOfWeek", alias = "day")]
    pub day_of_week: Option<String>,
    #[serde(default, rename = "startTime", alias = "start")]
    pub start_time: Option<String>,
    #[serde(default, rename = "endTime", alias = "end")]
    pub end_time: Option<String>,
    #[serde(default, rename = "isAvailable")]
    pub is_available: Option<bool>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, rename = "isBooked")]
    pub is_booked: Option<bool>,
    #[serde(default)]
    pub booked: Option<bool>,
    #[serde(default)]
    pub reserved: Option<bool>,
}

impl UpstreamSlot {
    /// Compatibility shim: whether the slot is free to book.
    ///
    /// Ordered fallback across the field spellings seen upstream: an explicit
    /// `isAvailable` wins, then a `status` string compared to `"available"`,
    /// then the negation of any booked/reserved flag. Keep this the single
    /// place that answers the question so unifying the feed later is a
    /// one-line change.
    pub fn is_free(&self) -> bool {
        if let Some(available) = self.is_available {
            return available;
        }
        if let Some(status) = &self.status {
            return status.eq_ignore_ascii_case("available");
        }
        !(self.is_booked.unwrap_or(false)
            || self.booked.unwrap_or(false)
            || self.reserved.unwrap_or(false))
    }

    fn weekday(&self) -> Option<Weekday> {
        self.day_of_week.as_deref()?.parse().ok()
    }

    /// Sort key within a day: start minutes ascending, unparsable times last.
    fn start_key(&self) -> u32 {
        self.start_time
            .as_deref()
            .and_then(parse_to_minutes)
            .unwrap_or(u32::MAX)
    }
}

/// Free slots grouped into the seven canonical weekdays, Monday first.
#[derive(Debug, Clone, Default)]
pub struct WeeklyAvailability {
    days: [Vec<UpstreamSlot>; 7],
}

impl WeeklyAvailability {
    /// Groups the free slots of a flat feed by weekday. Slots that are not
    /// free, or whose day cannot be recognized, are dropped. Each day is
    /// sorted by start time ascending with unparsable times last.
    pub fn from_slots(slots: Vec<UpstreamSlot>) -> Self {
        let mut days: [Vec<UpstreamSlot>; 7] = Default::default();
        for slot in slots {
            if !slot.is_free() {
                continue;
            }
            let Some(day) = slot.weekday() else { continue };
            days[day.index()].push(slot);
        }
        for day in &mut days {
            day.sort_by_key(UpstreamSlot::start_key);
        }
        Self { days }
    }

    pub fn slots_on(&self, day: Weekday) -> &[UpstreamSlot] {
        &self.days[day.index()]
    }

    /// Whether the weekday has at least one free slot.
    pub fn day_has_free(&self, day: Weekday) -> bool {
        !self.days[day.index()].is_empty()
    }

    /// Default selection for a day picker: the first weekday (Monday-first)
    /// with a free slot, else today if it has availability, else Monday.
    pub fn default_day(&self) -> Weekday {
        for day in ALL_WEEKDAYS {
            if self.day_has_free(day) {
                return day;
            }
        }
        let today = Weekday::today();
        if self.day_has_free(today) {
            today
        } else {
            Weekday::Monday
        }
    }
}
