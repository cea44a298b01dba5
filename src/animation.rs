use crate::format::{format_currency, format_percent};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StatKind {
    Currency,
    Percent,
}

pub fn format_stat(value: f64, kind: StatKind, symbol: &str) -> String {
    match kind {
        StatKind::Currency => format_currency(value, symbol),
        StatKind::Percent => format_percent(value),
    }
}

/// Count-up from zero to `target` in a fixed number of equal increments.
#[derive(Clone, Debug, PartialEq)]
pub struct CountUp {
    target: f64,
    increment: f64,
    steps: u32,
    taken: u32,
}

impl CountUp {
    pub fn new(target: f64, steps: u32) -> Self {
        let steps = steps.max(1);
        CountUp {
            target,
            increment: target / steps as f64,
            steps,
            taken: 0,
        }
    }

    /// Advances one tick; returns the value to show and whether the target was reached.
    ///
    /// The last tick always lands on `target` exactly, so the count takes `steps`
    /// ticks regardless of rounding in the increments.
    pub fn step(&mut self) -> (f64, bool) {
        if self.increment <= 0.0 {
            self.taken = self.steps;
            return (self.target, true);
        }
        self.taken += 1;
        if self.taken >= self.steps {
            return (self.target, true);
        }
        (self.increment * self.taken as f64, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticks_until_done(target: f64) -> (u32, f64) {
        let mut anim = CountUp::new(target, 50);
        let mut ticks = 0;
        loop {
            ticks += 1;
            let (value, done) = anim.step();
            if done {
                return (ticks, value);
            }
            assert!(value < target);
        }
    }

    #[test]
    fn reaches_target_exactly() {
        assert_eq!(ticks_until_done(123.45), (50, 123.45));
    }

    #[test]
    fn every_cent_amount_takes_fifty_ticks() {
        for cents in 1..20_000 {
            let target = cents as f64 / 100.0;
            assert_eq!(ticks_until_done(target), (50, target), "target {}", target);
        }
    }

    #[test]
    fn zero_and_negative_targets_finish_immediately() {
        assert_eq!(CountUp::new(0.0, 50).step(), (0.0, true));
        assert_eq!(CountUp::new(-5.0, 50).step(), (-5.0, true));
    }

    #[test]
    fn stat_formatting() {
        assert_eq!(format_stat(12.5, StatKind::Currency, "$"), "$12.50");
        assert_eq!(format_stat(40.0, StatKind::Percent, "$"), "40.0%");
    }
}
