/// Fixed-interval tick gate driven by an external clock (milliseconds).
///
/// The host calls [`Ticker::due`] once per frame. A cancelled ticker never
/// fires until it is armed again.
#[derive(Debug, Default, Clone, Copy)]
pub struct Ticker {
    last_tick_ms: Option<f64>,
}

impl Ticker {
    pub fn arm(&mut self, now_ms: f64) {
        self.last_tick_ms = Some(now_ms);
    }

    pub fn cancel(&mut self) {
        self.last_tick_ms = None;
    }

    #[cfg(test)]
    fn is_armed(&self) -> bool {
        self.last_tick_ms.is_some()
    }

    /// Fires at most once per call, stamping `now_ms` as the new tick time.
    pub fn due(&mut self, now_ms: f64, interval_ms: u32) -> bool {
        match self.last_tick_ms {
            Some(last) if now_ms - last >= f64::from(interval_ms) => {
                self.last_tick_ms = Some(now_ms);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_after_interval() {
        let mut t = Ticker::default();
        t.arm(1000.0);
        assert!(!t.due(1100.0, 150));
        assert!(t.due(1150.0, 150));
        assert!(!t.due(1200.0, 150));
        assert!(t.due(1300.0, 150));
    }

    #[test]
    fn test_one_tick_per_call_after_long_gap() {
        let mut t = Ticker::default();
        t.arm(0.0);
        assert!(t.due(10_000.0, 100));
        assert!(!t.due(10_050.0, 100));
    }

    #[test]
    fn test_cancelled_never_fires() {
        let mut t = Ticker::default();
        assert!(!t.is_armed());
        assert!(!t.due(1e9, 1));

        t.arm(0.0);
        t.cancel();
        assert!(!t.is_armed());
        assert!(!t.due(1e9, 1));
    }
}
