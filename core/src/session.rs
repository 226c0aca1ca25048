use alloc::format;
use alloc::string::String;
use core::fmt;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - Active -> Active (failed submission with attempts left)
/// - Active -> Passed
/// - Active -> LockedOut (attempts exhausted, or no replacement challenge could be generated)
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    Active,
    Passed,
    LockedOut,
}

impl SessionState {
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Passed | Self::LockedOut)
    }

    /// Final verdict, `None` while still active.
    pub const fn verdict(self) -> Option<bool> {
        match self {
            Self::Active => None,
            Self::Passed => Some(true),
            Self::LockedOut => Some(false),
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::Active
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SelectOutcome {
    NoChange,
    Selected(CellIndex),
    Deselected(CellIndex),
}

impl SelectOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    Passed,
    /// A fresh challenge was generated.
    Retry { attempts_left: CellCount },
    LockedOut,
}

impl SubmitOutcome {
    pub const fn is_finished(self) -> bool {
        !matches!(self, Self::Retry { .. })
    }
}

impl fmt::Display for SubmitOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Passed => f.write_str("Passed."),
            Self::Retry { attempts_left: 1 } => f.write_str("1 attempt left."),
            Self::Retry { attempts_left } => write!(f, "{} attempts left.", attempts_left),
            Self::LockedOut => f.write_str("No attempts left."),
        }
    }
}

/// One validation episode: the live challenge, the subject's selection and the attempt budget.
///
/// A session that reached `Passed` or `LockedOut` accepts no more input, a new episode needs a new session.
#[derive(Clone, Debug)]
pub struct ChallengeSession<G = RandomChallengeGenerator> {
    config: ChallengeConfig,
    generator: G,
    challenge: Challenge,
    selection: Selection,
    attempts: CellCount,
    state: SessionState,
}

impl<G: ChallengeGenerator> ChallengeSession<G> {
    pub fn new(config: ChallengeConfig, mut generator: G) -> Result<Self> {
        config.validate()?;
        let challenge = generator.generate(&config)?;
        log::debug!(
            "Session started, {}x{} grid, target: {}",
            config.size.rows,
            config.size.cols,
            challenge.target
        );
        Ok(Self {
            config,
            generator,
            challenge,
            selection: Selection::new(),
            attempts: 0,
            state: SessionState::Active,
        })
    }

    pub fn config(&self) -> &ChallengeConfig {
        &self.config
    }

    pub fn challenge(&self) -> &Challenge {
        &self.challenge
    }

    pub fn grid(&self) -> &Grid {
        &self.challenge.grid
    }

    pub fn target(&self) -> TargetCriterion {
        self.challenge.target
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    /// Failed submissions so far in this episode.
    pub fn attempts(&self) -> CellCount {
        self.attempts
    }

    pub fn attempts_left(&self) -> CellCount {
        self.config.max_attempts.saturating_sub(self.attempts)
    }

    pub fn prompt(&self) -> String {
        format!("Select all {}", self.challenge.target)
    }

    pub fn view(&self) -> ChallengeView<'_> {
        ChallengeView {
            grid: &self.challenge.grid,
            target: self.challenge.target,
            selection: &self.selection,
            state: self.state,
            attempts_left: self.attempts_left(),
        }
    }

    /// New grid and target, empty selection, attempt counter untouched.
    pub fn reset(&mut self) -> Result<()> {
        self.check_active()?;
        self.regenerate()
    }

    pub fn toggle(&mut self, index: CellIndex) -> Result<SelectOutcome> {
        let index = self.challenge.grid.validate_index(index)?;
        self.check_active()?;

        Ok(if self.selection.toggle(index) {
            SelectOutcome::Selected(index)
        } else {
            SelectOutcome::Deselected(index)
        })
    }

    /// Routes a pointer event through the coordinate mapper, clicks outside the grid change nothing.
    pub fn click(&mut self, pointer: Point, surface: &Surface, roi: Rect) -> Result<SelectOutcome> {
        self.check_active()?;

        match map_point_to_cell(pointer, surface, roi, self.config.size) {
            PointerTarget::Cell(index) => self.toggle(index),
            PointerTarget::OutOfBounds => Ok(SelectOutcome::NoChange),
        }
    }

    pub fn submit(&mut self) -> Result<SubmitOutcome> {
        self.check_active()?;

        let report = review(&self.challenge.grid, &self.challenge.target, &self.selection);
        if report.is_correct() {
            log::debug!("Submission correct after {} failed attempts", self.attempts);
            self.state = SessionState::Passed;
            return Ok(SubmitOutcome::Passed);
        }

        self.attempts += 1;
        log::debug!(
            "Submission wrong ({} missed, {} extra), attempt {}/{}",
            report.missed,
            report.extra,
            self.attempts,
            self.config.max_attempts
        );

        if self.attempts >= self.config.max_attempts {
            self.state = SessionState::LockedOut;
            return Ok(SubmitOutcome::LockedOut);
        }

        // the judged grid must not stay live, no replacement means the session is over
        if let Err(err) = self.regenerate() {
            log::warn!("No replacement challenge, ending session: {}", err);
            self.state = SessionState::LockedOut;
            self.selection.clear();
            return Err(err);
        }
        Ok(SubmitOutcome::Retry {
            attempts_left: self.attempts_left(),
        })
    }

    /// Swaps in a fresh challenge and clears the selection, leaves both untouched on failure.
    fn regenerate(&mut self) -> Result<()> {
        let challenge = self.generator.generate(&self.config)?;
        log::debug!("New challenge, target: {}", challenge.target);
        self.challenge = challenge;
        self.selection.clear();
        Ok(())
    }

    fn check_active(&self) -> Result<()> {
        if self.state.is_active() {
            Ok(())
        } else {
            Err(ChallengeError::AlreadyEnded)
        }
    }
}
