//! Google Calendar "create event" deep-links for earnings events.
//!
//! Link construction is pure string templating: no I/O and no error path. A
//! date-only start is placed at 09:00 local time and every event lasts one hour.

mod link;

pub use link::{CalendarLink, CalendarLinkBuilder, DEFAULT_LOCATION};
