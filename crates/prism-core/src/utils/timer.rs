// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! A monotonic clock used to derive the `time` uniform.

use std::time::{Duration, Instant};

/// Measures wall-clock time since it was started or last restarted.
///
/// A `ShaderProgram` restarts its stopwatch at the moment of every successful
/// link, so the value pushed to the `time` uniform always counts from the
/// program that is currently bound.
#[derive(Debug, Clone)]
pub struct Stopwatch {
    start_time: Instant,
}

impl Stopwatch {
    /// Creates a new stopwatch that starts counting immediately.
    #[inline]
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
        }
    }

    /// Resets the origin to "now".
    #[inline]
    pub fn restart(&mut self) {
        self.start_time = Instant::now();
    }

    /// Returns the elapsed time since the stopwatch was started or restarted.
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Returns the elapsed time in seconds as f32, the precision uniforms carry.
    #[inline]
    pub fn elapsed_secs_f32(&self) -> f32 {
        self.elapsed().as_secs_f32()
    }
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    const SMALL_DURATION_MS: u64 = 15;
    const SLEEP_DURATION_MS: u64 = 50;
    const SLEEP_MARGIN_MS: u64 = 200;

    #[test]
    fn stopwatch_elapsed_time_near_zero_initially() {
        let watch = Stopwatch::new();
        assert!(
            watch.elapsed() < Duration::from_millis(SMALL_DURATION_MS),
            "Initial elapsed duration should be very small"
        );
        assert!(watch.elapsed_secs_f32() < SMALL_DURATION_MS as f32 / 1000.0);
    }

    #[test]
    fn stopwatch_elapsed_time_after_delay() {
        let watch = Stopwatch::new();
        thread::sleep(Duration::from_millis(SLEEP_DURATION_MS));

        let elapsed_ms = watch.elapsed().as_millis() as u64;
        assert!(
            elapsed_ms >= SLEEP_DURATION_MS,
            "Elapsed ms ({elapsed_ms}) should be >= sleep duration ({SLEEP_DURATION_MS})"
        );
        assert!(
            elapsed_ms < SLEEP_DURATION_MS + SLEEP_MARGIN_MS,
            "Elapsed ms ({elapsed_ms}) should be < sleep duration + margin"
        );
        assert!(watch.elapsed_secs_f32() >= SLEEP_DURATION_MS as f32 / 1000.0);
    }

    #[test]
    fn stopwatch_restart_resets_origin() {
        let mut watch = Stopwatch::new();
        thread::sleep(Duration::from_millis(SLEEP_DURATION_MS));
        watch.restart();
        assert!(
            watch.elapsed() < Duration::from_millis(SLEEP_DURATION_MS),
            "Restarted stopwatch should count from the restart point"
        );
    }

    #[test]
    fn stopwatch_clone_shares_origin() {
        let watch1 = Stopwatch::new();
        thread::sleep(Duration::from_millis(10));
        let watch2 = watch1.clone();

        let difference = watch1.elapsed().abs_diff(watch2.elapsed());
        assert!(
            difference < Duration::from_millis(1),
            "Elapsed time of clones should be very close (diff: {difference:?})"
        );
    }
}
