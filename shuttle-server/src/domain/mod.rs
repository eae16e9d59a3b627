//! Domain types for the shuttle notification server.
//!
//! These types represent validated schedule data. Invariants are enforced
//! at construction time, so code that receives them can trust their
//! validity: a `ClockTime` is always a real time of day, a `Weekday` is
//! always one of the seven days.

mod session;
mod time;
mod weekday;

pub use session::{ClassSession, DayBracket, WeeklySchedule, bracket_day};
pub use time::{ClockTime, TimeError};
pub use weekday::{InvalidWeekday, Weekday};
