use phf::phf_map;

use crate::model::{ExerciseLog, ExerciseOption};

/// Static metadata for a known exercise.
#[derive(Debug, Clone, Copy)]
pub struct CatalogEntry {
    pub name: &'static str,
    pub muscle_group: &'static str,
    pub sub_group: Option<&'static str>,
}

pub static EXERCISES: phf::Map<&'static str, CatalogEntry> = phf_map! {
    "bench_press" => CatalogEntry {
        name: "Bench Press",
        muscle_group: "Chest",
        sub_group: None,
    },
    "incline_db_press" => CatalogEntry {
        name: "Incline Dumbbell Press",
        muscle_group: "Chest",
        sub_group: Some("Upper Chest"),
    },
    "machine_chest_press" => CatalogEntry {
        name: "Machine Chest Press",
        muscle_group: "Chest",
        sub_group: None,
    },
    "back_squat" => CatalogEntry {
        name: "Back Squat",
        muscle_group: "Legs",
        sub_group: Some("Quads"),
    },
    "leg_press" => CatalogEntry {
        name: "Leg Press",
        muscle_group: "Legs",
        sub_group: Some("Quads"),
    },
    "hack_squat" => CatalogEntry {
        name: "Hack Squat",
        muscle_group: "Legs",
        sub_group: Some("Quads"),
    },
    "romanian_deadlift" => CatalogEntry {
        name: "Romanian Deadlift",
        muscle_group: "Legs",
        sub_group: Some("Hamstrings"),
    },
    "lying_leg_curl" => CatalogEntry {
        name: "Lying Leg Curl",
        muscle_group: "Legs",
        sub_group: Some("Hamstrings"),
    },
    "barbell_row" => CatalogEntry {
        name: "Barbell Row",
        muscle_group: "Back",
        sub_group: None,
    },
    "cable_row" => CatalogEntry {
        name: "Seated Cable Row",
        muscle_group: "Back",
        sub_group: None,
    },
    "lat_pulldown" => CatalogEntry {
        name: "Lat Pulldown",
        muscle_group: "Back",
        sub_group: Some("Lats"),
    },
    "overhead_press" => CatalogEntry {
        name: "Overhead Press",
        muscle_group: "Shoulders",
        sub_group: None,
    },
    "lateral_raise" => CatalogEntry {
        name: "Lateral Raise",
        muscle_group: "Shoulders",
        sub_group: Some("Side Delts"),
    },
    "cable_lateral_raise" => CatalogEntry {
        name: "Cable Lateral Raise",
        muscle_group: "Shoulders",
        sub_group: Some("Side Delts"),
    },
    "plank" => CatalogEntry {
        name: "Plank",
        muscle_group: "Core",
        sub_group: None,
    },
};

/// Alternatives per slot of the built-in full-body workout. The first entry
/// is active by default.
pub const DEFAULT_SLOTS: &[&[&str]] = &[
    &["back_squat", "leg_press", "hack_squat"],
    &["bench_press", "incline_db_press", "machine_chest_press"],
    &["barbell_row", "cable_row", "lat_pulldown"],
    &["romanian_deadlift", "lying_leg_curl"],
    &["overhead_press"],
    &["lateral_raise", "cable_lateral_raise"],
    &["plank"],
];

pub fn lookup(id: &str) -> Option<&'static CatalogEntry> {
    EXERCISES.get(id)
}

/// Build an empty log for a slot. Unknown ids are skipped; a slot with no
/// known exercise yields `None`.
pub fn slot_log(ids: &[&str]) -> Option<ExerciseLog> {
    let options: Vec<ExerciseOption> = ids
        .iter()
        .filter_map(|id| {
            lookup(id).map(|e| ExerciseOption {
                id: (*id).to_string(),
                name: e.name.to_string(),
            })
        })
        .collect();
    let first = options.first()?;
    let entry = lookup(&first.id)?;
    Some(ExerciseLog {
        exercise_id: first.id.clone(),
        name: first.name.clone(),
        muscle_group: Some(entry.muscle_group.to_string()),
        sub_group: entry.sub_group.map(str::to_string),
        available_exercises: options,
        selected_index: 0,
        sets: Vec::new(),
    })
}

pub fn default_workout() -> Vec<ExerciseLog> {
    DEFAULT_SLOTS.iter().filter_map(|ids| slot_log(ids)).collect()
}
