//! Lightweight progress line for evaluation passes

use std::io::Write;
use std::time::Instant;

/// Utterance-level progress indicator writing carriage-return updates to
/// stderr. A disabled indicator still counts, it just stays silent.
pub struct Progress {
    total: usize,
    done: usize,
    started: Instant,
    enabled: bool,
}

impl Progress {
    pub fn new(total: usize, enabled: bool) -> Self {
        Self {
            total,
            done: 0,
            started: Instant::now(),
            enabled,
        }
    }

    pub fn done(&self) -> usize {
        self.done
    }

    /// Advance by `n` utterances and redraw.
    pub fn update(&mut self, n: usize) {
        self.done += n;
        if !self.enabled {
            return;
        }
        let percent = if self.total == 0 {
            100.0
        } else {
            self.done as f64 / self.total as f64 * 100.0
        };
        let elapsed = self.started.elapsed().as_secs_f64();
        let eta = if self.done == 0 {
            0.0
        } else {
            elapsed / self.done as f64 * self.total.saturating_sub(self.done) as f64
        };
        eprint!(
            "\r{}/{} ({percent:.1}%) eta {}",
            self.done,
            self.total,
            format_duration(eta)
        );
        let _ = std::io::stderr().flush();
    }

    /// Terminate the progress line.
    pub fn finish(&self) {
        if self.enabled {
            eprintln!();
        }
    }
}

/// Render seconds as a compact human-readable duration.
pub fn format_duration(secs: f64) -> String {
    if secs < 60.0 {
        format!("{secs:.0}s")
    } else if secs < 3600.0 {
        format!("{}m{:02.0}s", (secs / 60.0) as u64, secs % 60.0)
    } else {
        format!(
            "{}h{:02}m",
            (secs / 3600.0) as u64,
            ((secs % 3600.0) / 60.0) as u64
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0.0), "0s");
        assert_eq!(format_duration(42.4), "42s");
        assert_eq!(format_duration(90.0), "1m30s");
        assert_eq!(format_duration(3725.0), "1h02m");
    }

    #[test]
    fn test_disabled_progress_counts_silently() {
        let mut progress = Progress::new(10, false);
        progress.update(3);
        progress.update(2);
        assert_eq!(progress.done(), 5);
        progress.finish();
    }
}
