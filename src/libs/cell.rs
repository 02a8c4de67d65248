//! Optimistic edit state for a single grid cell.
//!
//! A cell shows the new value as soon as a save starts. At most one save may
//! be in flight per cell. When the save fails, the cell goes back to the
//! value it had before and remembers that it was rolled back until the next
//! save starts.
//!
//! ```text
//! Idle ──begin_save──▶ Saving ──complete(Ok)──▶ Idle
//!                        │
//!                        └────complete(Err)──▶ Idle (rolled back)
//! ```

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CellError {
    #[error("a save is already in progress for this cell")]
    Busy,
    #[error("no save is in progress for this cell")]
    NotSaving,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CellState<T> {
    Idle,
    Saving { pending: T, previous: T },
}

/// Result of finishing a save.
#[derive(Debug, Clone, PartialEq)]
pub enum CellOutcome<T> {
    Saved(T),
    RolledBack(T),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CellEdit<T> {
    committed: T,
    state: CellState<T>,
    rolled_back: bool,
}

impl<T: Clone> CellEdit<T> {
    pub fn new(value: T) -> Self {
        CellEdit {
            committed: value,
            state: CellState::Idle,
            rolled_back: false,
        }
    }

    /// What the cell shows right now: the pending value while saving.
    pub fn displayed(&self) -> &T {
        match &self.state {
            CellState::Idle => &self.committed,
            CellState::Saving { pending, .. } => pending,
        }
    }

    pub fn committed(&self) -> &T {
        &self.committed
    }

    pub fn state(&self) -> &CellState<T> {
        &self.state
    }

    pub fn is_saving(&self) -> bool {
        matches!(self.state, CellState::Saving { .. })
    }

    pub fn rolled_back(&self) -> bool {
        self.rolled_back
    }

    pub fn begin_save(&mut self, value: T) -> Result<(), CellError> {
        if self.is_saving() {
            return Err(CellError::Busy);
        }
        self.state = CellState::Saving {
            pending: value,
            previous: self.committed.clone(),
        };
        self.rolled_back = false;
        Ok(())
    }

    /// Finishes the in-flight save with the store's answer.
    ///
    /// On success the confirmed value becomes the committed one; it may differ
    /// from the pending value (for instance after server-side rounding).
    pub fn complete<E>(&mut self, result: Result<T, E>) -> Result<CellOutcome<T>, CellError> {
        let previous = match std::mem::replace(&mut self.state, CellState::Idle) {
            CellState::Idle => return Err(CellError::NotSaving),
            CellState::Saving { previous, .. } => previous,
        };
        match result {
            Ok(confirmed) => {
                self.committed = confirmed.clone();
                Ok(CellOutcome::Saved(confirmed))
            }
            Err(_) => {
                self.committed = previous.clone();
                self.rolled_back = true;
                Ok(CellOutcome::RolledBack(previous))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_successful_save() {
        let mut cell = CellEdit::new(Some(2.0));
        cell.begin_save(Some(2.5)).unwrap();
        assert!(cell.is_saving());
        assert_eq!(cell.displayed(), &Some(2.5));
        assert_eq!(cell.committed(), &Some(2.0));

        let outcome = cell.complete::<()>(Ok(Some(2.5))).unwrap();
        assert_eq!(outcome, CellOutcome::Saved(Some(2.5)));
        assert_eq!(cell.state(), &CellState::Idle);
        assert_eq!(cell.displayed(), &Some(2.5));
        assert!(!cell.rolled_back());
    }

    #[test]
    fn test_second_save_while_busy() {
        let mut cell = CellEdit::new(None::<f64>);
        cell.begin_save(Some(1.0)).unwrap();
        assert_eq!(cell.begin_save(Some(2.0)), Err(CellError::Busy));
        assert_eq!(cell.displayed(), &Some(1.0));
    }

    #[test]
    fn test_failed_save_rolls_back() {
        let mut cell = CellEdit::new(Some(3.0));
        cell.begin_save(None).unwrap();
        let outcome = cell.complete(Err("network down")).unwrap();
        assert_eq!(outcome, CellOutcome::RolledBack(Some(3.0)));
        assert_eq!(cell.displayed(), &Some(3.0));
        assert!(cell.rolled_back());

        cell.begin_save(Some(4.0)).unwrap();
        assert!(!cell.rolled_back());
    }

    #[test]
    fn test_complete_while_idle() {
        let mut cell = CellEdit::new(0);
        assert_eq!(cell.complete::<()>(Ok(1)), Err(CellError::NotSaving));
    }
}
