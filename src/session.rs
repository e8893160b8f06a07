//! The owner of every exercise log in the current workout.
//!
//! Cards hand their next snapshot to [`WorkoutSession::apply_update`]; the
//! session stores it as-is, in the order the updates arrive.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::catalog;
use crate::model::ExerciseLog;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutSession {
    pub date: NaiveDate,
    #[serde(default)]
    pub title: String,
    pub logs: Vec<ExerciseLog>,
}

impl Default for WorkoutSession {
    fn default() -> Self {
        Self {
            date: Local::now().date_naive(),
            title: "Full Body".to_owned(),
            logs: catalog::default_workout(),
        }
    }
}

#[derive(Debug)]
pub enum PlanError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Empty,
    /// `selected_index` does not point at the active exercise.
    InconsistentSelection { slot: usize, exercise_id: String },
}

impl std::fmt::Display for PlanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlanError::Io(e) => write!(f, "Could not read plan: {e}"),
            PlanError::Parse(e) => write!(f, "Invalid plan file: {e}"),
            PlanError::Empty => write!(f, "Plan contains no exercises"),
            PlanError::InconsistentSelection { slot, exercise_id } => write!(
                f,
                "Exercise {} ({exercise_id}) does not match its selected alternative",
                slot + 1
            ),
        }
    }
}

impl std::error::Error for PlanError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PlanError::Io(e) => Some(e),
            PlanError::Parse(e) => Some(e),
            PlanError::Empty | PlanError::InconsistentSelection { .. } => None,
        }
    }
}

impl From<std::io::Error> for PlanError {
    fn from(e: std::io::Error) -> Self {
        PlanError::Io(e)
    }
}

impl From<serde_json::Error> for PlanError {
    fn from(e: serde_json::Error) -> Self {
        PlanError::Parse(e)
    }
}

impl WorkoutSession {
    /// Replace the log in `slot` with `log`. Returns `false` if there is no
    /// such slot.
    pub fn apply_update(&mut self, slot: usize, log: ExerciseLog) -> bool {
        match self.logs.get_mut(slot) {
            Some(current) => {
                log::debug!(
                    "Slot {slot}: {} -> {} ({} sets)",
                    current.name,
                    log.name,
                    log.sets.len()
                );
                *current = log;
                true
            }
            None => {
                log::warn!("Dropping update for unknown slot {slot}");
                false
            }
        }
    }

    pub fn total_sets(&self) -> usize {
        self.logs.iter().map(|l| l.sets.len()).sum()
    }

    /// Read a session from a JSON plan file.
    ///
    /// A plan may carry sets already; they are kept. A plan without a date
    /// is rejected by the parser. One without any exercise, or with a log
    /// whose selected alternative is not its active exercise, is rejected
    /// here.
    pub fn load_plan<P: AsRef<Path>>(path: P) -> Result<Self, PlanError> {
        let data = std::fs::read_to_string(path)?;
        let session: WorkoutSession = serde_json::from_str(&data)?;
        if session.logs.is_empty() {
            return Err(PlanError::Empty);
        }
        if let Some((slot, log)) = session
            .logs
            .iter()
            .enumerate()
            .find(|(_, l)| !l.selection_is_consistent())
        {
            return Err(PlanError::InconsistentSelection {
                slot,
                exercise_id: log.exercise_id.clone(),
            });
        }
        Ok(session)
    }

    pub fn save_plan<P: AsRef<Path>>(&self, path: P) -> Result<(), PlanError> {
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(self)?;
        std::fs::write(path, data)?;
        Ok(())
    }
}
