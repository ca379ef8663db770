//! Drives a bar through a loop that runs past its total.
//!
//! The extra iterations are ignored by the bar. Run with `RUST_LOG=debug` to see the
//! lifecycle logs on stderr.

use std::{thread, time::Duration};

use inline_progress::{ProgressBar, ProgressIteratorExt as _};

fn main() -> Result<(), inline_progress::ProgressError> {
    env_logger::Builder::from_env(env_logger::Env::default().filter_or("RUST_LOG", "warn")).init();

    let mut bar = ProgressBar::with_label(90, "Progress")?;
    let _cursor = bar.cursor_guard();
    for i in 0..101 {
        bar.update(i);
        thread::sleep(Duration::from_millis(20));
    }

    for _ in (0..40).progress_bar("Iterating")? {
        thread::sleep(Duration::from_millis(25));
    }

    Ok(())
}
