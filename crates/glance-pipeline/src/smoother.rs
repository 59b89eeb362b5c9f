use std::collections::VecDeque;

/// Sliding-window moving average over analysis durations.
///
/// Reports nothing until `window` samples have arrived; from then on
/// every push evicts the oldest sample and yields the average of the
/// last `window`. A running sum keeps each push O(1).
#[derive(Debug)]
pub struct LatencySmoother {
    window: usize,
    samples: VecDeque<u64>,
    sum: u64,
}

impl LatencySmoother {
    /// Create a smoother over the last `window` samples. A window below
    /// 1 is treated as 1.
    pub fn new(window: usize) -> Self {
        let window = window.max(1);
        Self {
            window,
            samples: VecDeque::with_capacity(window),
            sum: 0,
        }
    }

    pub fn window(&self) -> usize {
        self.window
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Record one duration. Returns the window average once the window
    /// is full, `None` before that.
    pub fn push(&mut self, duration_ms: u64) -> Option<f64> {
        if self.samples.len() == self.window {
            if let Some(oldest) = self.samples.pop_front() {
                self.sum -= oldest;
            }
        }
        self.samples.push_back(duration_ms);
        self.sum += duration_ms;

        self.average()
    }

    /// Current window average without recording anything. `None` until
    /// the window has filled once.
    pub fn average(&self) -> Option<f64> {
        if self.samples.len() == self.window {
            Some(self.sum as f64 / self.window as f64)
        } else {
            None
        }
    }
}
