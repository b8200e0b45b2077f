/// Share of the run's items that reached a terminal state.
///
/// The terminal count only ever grows, so the reported percentage is
/// non-decreasing over a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchProgress {
    total: usize,
    terminal: usize,
}

impl BatchProgress {
    pub fn new(total: usize) -> Self {
        Self { total, terminal: 0 }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn terminal(&self) -> usize {
        self.terminal
    }

    pub fn record(&mut self, finished: usize) {
        self.terminal = (self.terminal + finished).min(self.total);
    }

    /// Percentage rounded to nearest, ties away from zero. An empty run is complete.
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 100;
        }
        (self.terminal as f64 / self.total as f64 * 100.0).round() as u8
    }

    pub fn is_complete(&self) -> bool {
        self.terminal == self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_nearest() {
        let mut p = BatchProgress::new(3);
        p.record(1);
        assert_eq!(p.percent(), 33);
        p.record(1);
        assert_eq!(p.percent(), 67);
        p.record(1);
        assert_eq!(p.percent(), 100);
        assert!(p.is_complete());
    }

    #[test]
    fn half_rounds_up() {
        let mut p = BatchProgress::new(8);
        p.record(1);
        // 12.5 -> 13
        assert_eq!(p.percent(), 13);
    }

    #[test]
    fn never_exceeds_total() {
        let mut p = BatchProgress::new(2);
        p.record(5);
        assert_eq!(p.terminal(), 2);
        assert_eq!(p.percent(), 100);
    }

    #[test]
    fn empty_run_is_complete() {
        assert_eq!(BatchProgress::new(0).percent(), 100);
    }
}
