//! Exercise log snapshots exchanged between a workout card and its owner.
//!
//! A card never edits a log in place. Every mutation below takes `&self` and
//! returns a new log with only the affected fields replaced.

use serde::{Deserialize, Deserializer, Serialize};

/// One selectable alternative for an exercise slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseOption {
    pub id: String,
    pub name: String,
}

/// A completed set.
///
/// A weight that could not be parsed is kept as `NaN`. JSON has no NaN, so it
/// is written as `null` and read back as `NaN`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SetRecord {
    #[serde(deserialize_with = "null_as_nan")]
    pub weight: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reps: Option<f32>,
}

impl SetRecord {
    /// Reps worth showing: present, non-zero and a number.
    pub fn display_reps(&self) -> Option<f32> {
        self.reps.filter(|r| *r != 0.0 && !r.is_nan())
    }
}

// NaN never equals itself; two records holding the same garbage input should.
impl PartialEq for SetRecord {
    fn eq(&self, other: &Self) -> bool {
        fn same(a: f32, b: f32) -> bool {
            a == b || (a.is_nan() && b.is_nan())
        }
        same(self.weight, other.weight)
            && match (self.reps, other.reps) {
                (Some(a), Some(b)) => same(a, b),
                (None, None) => true,
                _ => false,
            }
    }
}

fn null_as_nan<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f32, D::Error> {
    Ok(Option::<f32>::deserialize(deserializer)?.unwrap_or(f32::NAN))
}

/// The data a card renders and edits for a single exercise slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseLog {
    pub exercise_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub muscle_group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_group: Option<String>,
    #[serde(default)]
    pub available_exercises: Vec<ExerciseOption>,
    #[serde(default)]
    pub selected_index: usize,
    #[serde(default)]
    pub sets: Vec<SetRecord>,
}

impl ExerciseLog {
    /// Classification shown under the name; the sub group wins when both exist.
    pub fn group_label(&self) -> Option<&str> {
        self.sub_group
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| self.muscle_group.as_deref().filter(|s| !s.is_empty()))
    }

    /// Whether there is anything to switch to.
    pub fn has_alternatives(&self) -> bool {
        self.available_exercises.len() > 1
    }

    /// `selected_index` points at the alternative named by `exercise_id`.
    /// A log without alternatives has nothing to point at and always agrees.
    pub fn selection_is_consistent(&self) -> bool {
        if self.available_exercises.is_empty() {
            return true;
        }
        self.available_exercises
            .get(self.selected_index)
            .is_some_and(|o| o.id == self.exercise_id)
    }

    pub fn with_set_added(&self, set: SetRecord) -> ExerciseLog {
        let mut sets = Vec::with_capacity(self.sets.len() + 1);
        sets.extend_from_slice(&self.sets);
        sets.push(set);
        ExerciseLog {
            sets,
            ..self.clone()
        }
    }

    /// Drop the set at `index`. An index past the end removes nothing.
    pub fn with_set_removed(&self, index: usize) -> ExerciseLog {
        ExerciseLog {
            sets: self
                .sets
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != index)
                .map(|(_, s)| *s)
                .collect(),
            ..self.clone()
        }
    }

    /// Make the alternative at `index` the active exercise. Sets are kept.
    pub fn with_exercise_selected(&self, index: usize) -> Option<ExerciseLog> {
        let option = self.available_exercises.get(index)?;
        Some(ExerciseLog {
            exercise_id: option.id.clone(),
            name: option.name.clone(),
            selected_index: index,
            ..self.clone()
        })
    }
}
