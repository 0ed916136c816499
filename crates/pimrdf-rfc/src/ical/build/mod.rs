//! iCalendar serialization.
//!
//! - Escape: TEXT value escaping
//! - Fold: content line folding at 75 octets
//! - Calendar: `VCALENDAR` documents of `VEVENT`s

mod calendar;
mod escape;
mod fold;

pub use calendar::{CalendarEvent, PRODUCT_ID, serialize_calendar};
pub use escape::escape_text;
pub use fold::fold_line;
