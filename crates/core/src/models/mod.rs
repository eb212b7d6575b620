pub mod booking;
pub mod slot;
pub mod weekday;

pub use booking::{Booking, BookingDraft, BookingStatus, UserType};
pub use slot::{SlotDraft, TimeSlot};
pub use weekday::Weekday;
