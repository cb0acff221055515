//! Time wrappers shared by envelopes and record schemas.
//!
//! | Type | Wire format |
//! |------|-------------|
//! | [`UtcDateTime`] | RFC3339, UTC only (`2024-01-01T00:00:00Z`) |
//! | [`CalendarDate`] | ISO calendar date (`2024-01-01`) |

mod date;
mod timestamp;

pub use date::CalendarDate;
pub use timestamp::UtcDateTime;
