//! Frame pacing.
//!
//! The pacer gates the outer loop to a fixed target interval using a
//! seconds+microseconds timestamp sampled from a monotonic epoch and a
//! hybrid spin/sleep wait. The sleep truncates the remaining deficit to
//! whole seconds, so for sub-second deficits the loop degrades to a
//! resampling spin; the timestamp resolution, the elapsed-milliseconds
//! formula, and that truncation are all part of the pacing behavior.

use std::thread;
use std::time::{Duration, Instant};

/// A clock sample at second + microsecond resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timestamp {
    pub secs: i64,
    pub micros: i64,
}

/// Elapsed wall-clock milliseconds between two samples:
/// `(stop.secs - start.secs) * 1000 + (stop.micros - start.micros) / 1000`.
pub fn elapsed_msec(start: Timestamp, stop: Timestamp) -> f32 {
    (stop.secs - start.secs) as f32 * 1000.0 + (stop.micros - start.micros) as f32 / 1000.0
}

/// Paces the outer loop to `1000 / target_fps` milliseconds per frame.
#[derive(Debug)]
pub struct FramePacer {
    target_ms: f32,
    epoch: Instant,
    checkpoint: Timestamp,
}

impl FramePacer {
    pub fn new(target_fps: f32) -> Self {
        let epoch = Instant::now();
        let pacer = Self {
            target_ms: 1000.0 / target_fps,
            epoch,
            checkpoint: Timestamp { secs: 0, micros: 0 },
        };
        tracing::debug!(target_fps, target_ms = pacer.target_ms, "frame pacer ready");
        pacer
    }

    pub fn target_ms(&self) -> f32 {
        self.target_ms
    }

    fn sample(&self) -> Timestamp {
        let since_epoch = self.epoch.elapsed();
        Timestamp {
            secs: since_epoch.as_secs() as i64,
            micros: i64::from(since_epoch.subsec_micros()),
        }
    }

    /// Block until the target interval has elapsed since the previous
    /// checkpoint, then advance the checkpoint to the last sample taken.
    ///
    /// While time remains the thread sleeps for the deficit converted to
    /// whole seconds; a sub-second deficit sleeps zero and the loop spins
    /// on fresh samples until the interval is reached.
    pub fn wait(&mut self) {
        let mut now = self.checkpoint;
        let mut elapsed = 0.0;

        while elapsed < self.target_ms {
            now = self.sample();
            elapsed = elapsed_msec(self.checkpoint, now);
            if elapsed <= self.target_ms {
                let deficit_secs = (self.target_ms - elapsed) / 1000.0;
                thread::sleep(Duration::from_secs(deficit_secs as u64));
            }
        }

        self.checkpoint = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_one_frame_at_sixty_fps() {
        let start = Timestamp { secs: 10, micros: 0 };
        let stop = Timestamp {
            secs: 10,
            micros: 16_000,
        };
        assert_eq!(elapsed_msec(start, stop), 16.0);
    }

    #[test]
    fn elapsed_across_a_second_boundary() {
        let start = Timestamp {
            secs: 10,
            micros: 999_000,
        };
        let stop = Timestamp {
            secs: 11,
            micros: 1_000,
        };
        // 1000ms - 998ms from the microsecond delta going negative.
        assert_eq!(elapsed_msec(start, stop), 2.0);
    }

    #[test]
    fn target_interval_from_fps() {
        let pacer = FramePacer::new(60.0);
        assert!((pacer.target_ms() - 1000.0 / 60.0).abs() < 1e-6);
    }

    #[test]
    fn wait_blocks_for_at_least_the_interval() {
        let mut pacer = FramePacer::new(100.0);
        let begin = Instant::now();
        pacer.wait();
        assert!(begin.elapsed() >= Duration::from_millis(9));
    }

    #[test]
    fn checkpoint_advances_per_wait() {
        let mut pacer = FramePacer::new(200.0);
        pacer.wait();
        let first = pacer.checkpoint;
        pacer.wait();
        assert!(elapsed_msec(first, pacer.checkpoint) >= pacer.target_ms());
    }
}
