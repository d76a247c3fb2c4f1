//! # Throttle
//!
//! Rate limiter for scroll handling: at most one execution per window.
//!
//! The first call in a window runs immediately (leading edge). Calls that
//! land inside the window replace each other, and the latest one runs once
//! when the window closes (trailing flush).
//!
//! ```text
//! calls:     x   x  x      x              (window = 100ms)
//! time:      0  30  60    90   100
//! executes:  x(0)                 x(90's args at 100)
//! ```

use crate::core::schedule::Millis;

#[derive(Debug, Clone)]
pub struct Throttle<A> {
    window: Millis,
    last_run: Option<Millis>,
    trailing: Option<(Millis, A)>,
}

impl<A> Throttle<A> {
    pub fn new(window: Millis) -> Self {
        Self {
            window,
            last_run: None,
            trailing: None,
        }
    }

    /// Offer a call. Returns the args back if the caller should run now;
    /// otherwise they are parked for the trailing flush.
    pub fn call(&mut self, now: Millis, args: A) -> Option<A> {
        match self.last_run {
            Some(last) if now.saturating_sub(last) < self.window => {
                self.trailing = Some((last + self.window, args));
                None
            }
            _ => {
                self.trailing = None;
                self.last_run = Some(now);
                Some(args)
            }
        }
    }

    /// Take the trailing call if its window has closed.
    pub fn poll(&mut self, now: Millis) -> Option<A> {
        match self.trailing.take() {
            Some((due, args)) if due <= now => {
                self.last_run = Some(now);
                Some(args)
            }
            pending => {
                self.trailing = pending;
                None
            }
        }
    }

    /// When the parked trailing call becomes due.
    pub fn deadline(&self) -> Option<Millis> {
        self.trailing.as_ref().map(|(due, _)| *due)
    }

    pub fn has_pending(&self) -> bool {
        self.trailing.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_call_runs_immediately() {
        let mut throttle = Throttle::new(100);
        assert_eq!(throttle.call(0, 1), Some(1));
        assert!(!throttle.has_pending());
    }

    #[test]
    fn test_calls_in_window_coalesce_to_latest() {
        let mut throttle = Throttle::new(100);
        assert_eq!(throttle.call(0, 1), Some(1));
        assert_eq!(throttle.call(30, 2), None);
        assert_eq!(throttle.call(60, 3), None);
        assert_eq!(throttle.call(90, 4), None);

        assert_eq!(throttle.deadline(), Some(100));
        assert_eq!(throttle.poll(99), None);
        assert_eq!(throttle.poll(100), Some(4));
        assert_eq!(throttle.poll(500), None, "trailing call fires exactly once");
    }

    #[test]
    fn test_trailing_flush_opens_a_new_window() {
        let mut throttle = Throttle::new(100);
        throttle.call(0, 'a');
        throttle.call(50, 'b');
        assert_eq!(throttle.poll(100), Some('b'));

        // 150 is inside the window started by the flush at 100
        assert_eq!(throttle.call(150, 'c'), None);
        assert_eq!(throttle.deadline(), Some(200));
    }

    #[test]
    fn test_call_after_window_supersedes_parked_args() {
        let mut throttle = Throttle::new(100);
        throttle.call(0, 1);
        throttle.call(10, 2);
        // Nobody polled; the next call is past the window and runs now
        assert_eq!(throttle.call(250, 3), Some(3));
        assert!(!throttle.has_pending());
    }

    #[test]
    fn test_at_most_one_run_per_window() {
        let mut throttle = Throttle::new(100);
        let mut runs = Vec::new();
        for now in (0..=1_000).step_by(10) {
            if throttle.call(now, now).is_some() {
                runs.push(now);
            }
            if throttle.poll(now).is_some() {
                runs.push(now);
            }
        }
        for pair in runs.windows(2) {
            assert!(pair[1] - pair[0] >= 100, "runs too close: {:?}", pair);
        }
    }
}
