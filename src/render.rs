//! Turns a [`Frame`] into one colored terminal line.
//!
//! Layout:
//!
//! ```text
//!  @ Progress ━━━━━━━━━━━━━━━━━━━━ [ 31.00 %] ETA: 00:12
//!  √ Progress ━━━━━━━━━━━━━━━━━━━━ [100.00 %] Elapsed: 11.42s
//! ```
//!
//! Every field carries its own ANSI foreground color and is closed by a foreground
//! reset, so the line never leaks color into whatever follows it.

use std::time::Duration;

use owo_colors::{AnsiColors, OwoColorize};

use crate::frame::{BarState, Frame};

/// Glyph for both the filled and the empty part of the bar.
pub const BAR_GLYPH: char = '━';

const ICON_RUNNING: char = '@';
const ICON_COMPLETE: char = '√';

struct Palette {
    text: AnsiColors,
    filled: AnsiColors,
    empty: AnsiColors,
}

impl Palette {
    const fn for_state(state: BarState) -> Self {
        match state {
            BarState::Running => Self {
                text: AnsiColors::Red,
                filled: AnsiColors::Yellow,
                empty: AnsiColors::Black,
            },
            BarState::Complete => Self {
                text: AnsiColors::Green,
                filled: AnsiColors::Green,
                empty: AnsiColors::Black,
            },
        }
    }
}

/// Renders `frame` under `label`, without a line terminator.
#[must_use]
pub fn line(label: &str, frame: &Frame) -> String {
    let palette = Palette::for_state(frame.state());
    let icon = match frame.state() {
        BarState::Running => ICON_RUNNING,
        BarState::Complete => ICON_COMPLETE,
    };
    let filled: String = std::iter::repeat_n(BAR_GLYPH, frame.filled()).collect();
    let empty: String = std::iter::repeat_n(BAR_GLYPH, frame.empty()).collect();
    let percentage = format!("[{}]", format_percentage(frame.percentage()));

    let mut out = format!(
        " {} {} {}{} {}",
        icon.color(palette.text),
        label.color(palette.text),
        filled.color(palette.filled),
        empty.color(palette.empty),
        percentage.color(palette.text),
    );

    let time = match (frame.state(), frame.eta()) {
        (BarState::Complete, _) => Some(format!("Elapsed: {}", format_elapsed(frame.elapsed()))),
        (BarState::Running, Some(eta)) => Some(format!("ETA: {}", format_eta(eta))),
        (BarState::Running, None) => None,
    };
    if let Some(time) = time {
        out.push_str(&format!(" {}", time.color(palette.text)));
    }

    out
}

/// Formats a percentage right-aligned in six columns with two decimals: `" 42.00 %"`.
#[must_use]
pub fn format_percentage(percentage: f64) -> String {
    format!("{percentage:>6.2} %")
}

/// Formats a duration as zero-padded `MM:SS`. Minutes are not wrapped into hours.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
#[must_use]
pub fn format_eta(eta: Duration) -> String {
    let secs = eta.as_secs_f64();
    let minutes = (secs / 60.0).floor() as u64;
    let seconds = (secs % 60.0).floor() as u64;
    format!("{minutes:02}:{seconds:02}")
}

/// Formats a duration in seconds with two decimals: `"3.25s"`.
#[must_use]
pub fn format_elapsed(elapsed: Duration) -> String {
    format!("{:.2}s", elapsed.as_secs_f64())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{format_elapsed, format_eta, format_percentage, line};
    use crate::frame::Frame;

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(10.0), " 10.00 %");
        assert_eq!(format_percentage(3.14159), "  3.14 %");
        assert_eq!(format_percentage(100.0), "100.00 %");
    }

    #[test]
    fn test_format_eta() {
        assert_eq!(format_eta(Duration::from_secs(7)), "00:07");
        assert_eq!(format_eta(Duration::from_secs_f64(61.9)), "01:01");
        assert_eq!(format_eta(Duration::from_secs(6000)), "100:00");
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(Duration::from_millis(3250)), "3.25s");
        assert_eq!(format_elapsed(Duration::ZERO), "0.00s");
    }

    /// Running Line
    /// Icon, red text, yellow fill, black remainder, ETA field.
    #[test]
    fn test_running_line() {
        let frame = Frame::compute(0.5, 4, Duration::from_secs(2));
        let rendered = line("Work", &frame);

        assert_eq!(
            rendered,
            " \x1b[31m@\x1b[39m \x1b[31mWork\x1b[39m \x1b[33m━━\x1b[39m\x1b[30m━━\x1b[39m \
             \x1b[31m[ 50.00 %]\x1b[39m \x1b[31mETA: 00:03\x1b[39m"
        );
    }

    /// Complete Line
    /// Everything green, elapsed time instead of ETA.
    #[test]
    fn test_complete_line() {
        let frame = Frame::compute(1.0, 3, Duration::from_millis(1500));
        let rendered = line("Done", &frame);

        assert!(rendered.contains("\x1b[32m√\x1b[39m"));
        assert!(rendered.contains("\x1b[32m━━━\x1b[39m"));
        assert!(rendered.contains("[100.00 %]"));
        assert!(rendered.ends_with("\x1b[32mElapsed: 1.50s\x1b[39m"));
        assert!(!rendered.contains("ETA"));
    }

    /// No ETA Before Progress
    #[test]
    fn test_zero_progress_has_no_time_field() {
        let frame = Frame::compute(0.0, 4, Duration::ZERO);
        let rendered = line("Idle", &frame);

        assert!(!rendered.contains("ETA"));
        assert!(rendered.ends_with("[  0.00 %]\x1b[39m"));
    }
}
