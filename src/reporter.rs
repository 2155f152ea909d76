//! Human-readable summaries of a compile/decide run: num-format for
//! thousands separators and `format_duration_hhmmss_ms` for wall-clock
//! times — just the handful of numbers worth surfacing for a single
//! compile-and-decide call.

use std::time::Duration;

use num_format::{Locale, ToFormattedString};

use crate::nesa::Nesa;
use crate::status::Outcome;

/// Summarizes a compiled [`Nesa`]: how large the state-exploded automaton
/// turned out to be.
pub fn report_compile(nesa: &Nesa, elapsed: Duration) -> String {
    format!(
        "compiled: {} states, {} transitions, {} symbols in alphabet ({})",
        nesa.states().len().to_formatted_string(&Locale::en),
        nesa.transition_count().to_formatted_string(&Locale::en),
        nesa.alphabet().len().to_formatted_string(&Locale::en),
        format_duration_hhmmss_ms(elapsed, true),
    )
}

/// Summarizes a [`crate::engine::decide`] run: the outcome reached and how
/// long it took.
pub fn report_decide(outcome: &Outcome, elapsed: Duration) -> String {
    format!(
        "decide: {outcome} ({})",
        format_duration_hhmmss_ms(elapsed, true)
    )
}

/// Formats a `std::time::Duration` into `HH:mm:ss.ms`.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use nesa_challenge::reporter::format_duration_hhmmss_ms;
///
/// assert_eq!(format_duration_hhmmss_ms(Duration::from_secs(3661), true), "01:01:01.000");
/// assert_eq!(format_duration_hhmmss_ms(Duration::from_millis(123456), false), "00:02:03");
/// ```
pub fn format_duration_hhmmss_ms(duration: Duration, display_millis: bool) -> String {
    let total_milliseconds = duration.as_millis();
    let hours = total_milliseconds / (1000 * 60 * 60);
    let minutes = (total_milliseconds % (1000 * 60 * 60)) / (1000 * 60);
    let mut seconds = ((total_milliseconds % (1000 * 60 * 60)) % (1000 * 60)) / 1000;
    let milliseconds = total_milliseconds % 1000;
    if milliseconds >= 500 {
        seconds += 1;
    }

    if display_millis {
        format!("{hours:02}:{minutes:02}:{seconds:02}.{milliseconds:03}")
    } else {
        format!("{hours:02}:{minutes:02}:{seconds:02}")
    }
}
