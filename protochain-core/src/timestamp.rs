//! UTC timestamp helpers
//!
//! Every entity is stamped with the UTC moment of its creation. The
//! human-readable form uses a fixed day-first format with microsecond
//! precision.

use chrono::{DateTime, Utc};

/// Human-readable date/time format, e.g. `30.08.2026 12:34:56.123456`
pub const MOMENT_FORMAT: &str = "%d.%m.%Y %H:%M:%S%.6f";

/// The current moment in UTC
pub fn this_moment() -> DateTime<Utc> {
    Utc::now()
}

/// Render a moment using [`MOMENT_FORMAT`]
pub fn moment_to_str(moment: &DateTime<Utc>) -> String {
    moment.format(MOMENT_FORMAT).to_string()
}
