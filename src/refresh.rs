use crate::error::{AppError, Result};

/// Hands out increasing tickets so only the newest refresh may apply its results.
#[derive(Debug, Default)]
pub struct RefreshSequencer {
    latest: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RefreshTicket(u64);

impl RefreshSequencer {
    pub fn begin(&mut self) -> RefreshTicket {
        self.latest += 1;
        RefreshTicket(self.latest)
    }

    pub fn is_current(&self, ticket: RefreshTicket) -> bool {
        ticket.0 == self.latest
    }

    /// Classifies a finished refresh; anything a newer refresh superseded is `Stale`.
    pub fn settle<T>(&self, ticket: RefreshTicket, result: Result<T>) -> Settled<T> {
        if !self.is_current(ticket) {
            return Settled::Stale;
        }
        match result {
            Ok(value) => Settled::Loaded(value),
            Err(e) => Settled::Failed(e),
        }
    }
}

#[derive(Debug)]
pub enum Settled<T> {
    Stale,
    Loaded(T),
    Failed(AppError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_refresh_wins_when_earlier_resolves_last() {
        let mut seq = RefreshSequencer::default();
        let year_a = seq.begin();
        let year_b = seq.begin();

        let mut shown = None;
        // B resolves first, A second
        for (ticket, year) in [(year_b, 2024), (year_a, 2023)] {
            if seq.is_current(ticket) {
                shown = Some(year);
            }
        }
        assert_eq!(shown, Some(2024));
    }

    #[test]
    fn superseded_failure_is_stale_too() {
        let mut seq = RefreshSequencer::default();
        let old = seq.begin();
        let new = seq.begin();
        assert!(matches!(
            seq.settle::<u32>(old, Err(AppError::NothingToExport)),
            Settled::Stale
        ));
        assert!(matches!(
            seq.settle::<u32>(new, Err(AppError::Chart("boom".into()))),
            Settled::Failed(AppError::Chart(_))
        ));
    }

    #[test]
    fn single_refresh_is_current() {
        let mut seq = RefreshSequencer::default();
        let t = seq.begin();
        assert!(seq.is_current(t));
        let _ = seq.begin();
        assert!(!seq.is_current(t));
    }
}
