//! Local state of a single set-logging card.
//!
//! The card owns two text buffers and the currently visible panel. It never
//! owns the exercise log: each operation reads the caller's snapshot and, when
//! the log has to change, passes a complete replacement to the owner's
//! `on_update` callback.

use crate::model::{ExerciseLog, SetRecord};
use crate::parse::{parse_float, parse_int};

/// Which transient region of the card is open. At most one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Panel {
    #[default]
    Idle,
    ShowingOptions,
    ShowingInput,
}

/// A user interaction on the card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardAction {
    ToggleOptions,
    OpenInput,
    SelectExercise(usize),
    RemoveSet(usize),
    CommitSet,
}

/// What an action did to the card and its log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionResult {
    Unchanged,
    PanelChanged,
    /// The owner received a new log.
    Updated,
    /// The weight field was blank. Nothing changed; focus belongs on the
    /// weight field.
    MissingWeight,
}

#[derive(Debug, Clone, Default)]
pub struct CardState {
    pub panel: Panel,
    pub weight: String,
    pub reps: String,
    exercise_id: Option<String>,
}

/// The switch control only exists for unlocked slots with a real choice.
pub fn can_switch(log: &ExerciseLog, locked: bool) -> bool {
    !locked && log.has_alternatives()
}

impl CardState {
    /// Bring transient state in line with the snapshot about to be drawn.
    ///
    /// A different active exercise resets the card so an open input row is
    /// never left attached to the wrong exercise. An options panel that can
    /// no longer be opened is closed.
    pub fn sync(&mut self, log: &ExerciseLog, locked: bool) {
        match self.exercise_id.as_deref() {
            Some(id) if id == log.exercise_id => {}
            Some(_) => {
                log::debug!("Active exercise changed to {}, resetting card", log.exercise_id);
                self.reset();
                self.exercise_id = Some(log.exercise_id.clone());
            }
            None => self.exercise_id = Some(log.exercise_id.clone()),
        }
        if self.panel == Panel::ShowingOptions && !can_switch(log, locked) {
            self.panel = Panel::Idle;
        }
    }

    fn reset(&mut self) {
        self.panel = Panel::Idle;
        self.weight.clear();
        self.reps.clear();
    }

    pub fn options_open(&self) -> bool {
        self.panel == Panel::ShowingOptions
    }

    pub fn input_open(&self) -> bool {
        self.panel == Panel::ShowingInput
    }

    /// Flip the exercise-switch panel. Returns `false` when the control is
    /// unavailable and nothing happened.
    pub fn toggle_options(&mut self, log: &ExerciseLog, locked: bool) -> bool {
        if !can_switch(log, locked) {
            return false;
        }
        self.panel = match self.panel {
            Panel::ShowingOptions => Panel::Idle,
            Panel::Idle | Panel::ShowingInput => Panel::ShowingOptions,
        };
        true
    }

    pub fn open_input(&mut self) {
        self.panel = Panel::ShowingInput;
    }

    /// Switch to the alternative at `index`, hand the new log to
    /// `on_update` and close the options panel.
    ///
    /// Re-selecting the active alternative still yields a (equal) new log.
    /// Returns `false` for an index outside the alternatives.
    pub fn select_exercise(
        &mut self,
        log: &ExerciseLog,
        index: usize,
        on_update: impl FnOnce(ExerciseLog),
    ) -> bool {
        let Some(next) = log.with_exercise_selected(index) else {
            return false;
        };
        log::info!("Switched {} to {}", log.name, next.name);
        on_update(next);
        self.panel = Panel::Idle;
        true
    }

    /// Append a set built from the buffers and hand the new log to
    /// `on_update`. Buffers are cleared only once `on_update` has returned.
    ///
    /// Returns `false` without calling `on_update` when the weight is blank.
    pub fn commit(&mut self, log: &ExerciseLog, on_update: impl FnOnce(ExerciseLog)) -> bool {
        let weight = self.weight.trim();
        if weight.is_empty() {
            return false;
        }
        let reps = self.reps.trim();
        let set = SetRecord {
            weight: parse_float(weight),
            reps: (!reps.is_empty()).then(|| parse_int(reps)),
        };
        let next = log.with_set_added(set);
        log::info!("Logged set {} for {}", next.sets.len(), next.name);
        on_update(next);
        self.weight.clear();
        self.reps.clear();
        self.panel = Panel::Idle;
        true
    }

    pub fn apply(
        &mut self,
        log: &ExerciseLog,
        locked: bool,
        action: CardAction,
        on_update: impl FnOnce(ExerciseLog),
    ) -> ActionResult {
        match action {
            CardAction::ToggleOptions => {
                if self.toggle_options(log, locked) {
                    ActionResult::PanelChanged
                } else {
                    ActionResult::Unchanged
                }
            }
            CardAction::OpenInput => {
                self.open_input();
                ActionResult::PanelChanged
            }
            CardAction::SelectExercise(index) => {
                if self.select_exercise(log, index, on_update) {
                    ActionResult::Updated
                } else {
                    ActionResult::Unchanged
                }
            }
            CardAction::RemoveSet(index) => {
                log::info!("Removed set {} from {}", index + 1, log.name);
                on_update(log.with_set_removed(index));
                ActionResult::Updated
            }
            CardAction::CommitSet => {
                if self.commit(log, on_update) {
                    ActionResult::Updated
                } else {
                    ActionResult::MissingWeight
                }
            }
        }
    }
}
