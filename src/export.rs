use crate::session::WorkoutSession;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// One logged set as it appears in a CSV export.
#[derive(Debug, Serialize, PartialEq)]
pub struct SetRow<'a> {
    pub date: String,
    pub slot: usize,
    pub exercise: &'a str,
    pub muscle_group: Option<&'a str>,
    pub set: usize,
    pub weight: Option<f32>,
    pub reps: Option<f32>,
}

/// Flatten a session into rows, one per set. Slot and set numbers are 1-based.
/// Unparsable values become empty cells.
pub fn set_rows(session: &WorkoutSession) -> Vec<SetRow<'_>> {
    let date = session.date.format("%Y-%m-%d").to_string();
    let mut rows = Vec::new();
    for (slot, log) in session.logs.iter().enumerate() {
        for (i, s) in log.sets.iter().enumerate() {
            rows.push(SetRow {
                date: date.clone(),
                slot: slot + 1,
                exercise: &log.name,
                muscle_group: log.group_label(),
                set: i + 1,
                weight: Some(s.weight).filter(|w| !w.is_nan()),
                reps: s.reps.filter(|r| !r.is_nan()),
            });
        }
    }
    rows
}

pub fn write_json<T: Serialize + ?Sized, P: AsRef<Path>>(
    value: &T,
    path: P,
) -> std::io::Result<()> {
    let file = std::fs::File::create(path)?;
    serde_json::to_writer_pretty(file, value)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
}

pub fn write_csv<T: Serialize>(writer: impl Write, records: &[T]) -> csv::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for r in records {
        wtr.serialize(r)?;
    }
    wtr.flush().map_err(Into::into)
}

pub fn save_session_csv<P: AsRef<Path>>(path: P, session: &WorkoutSession) -> csv::Result<()> {
    write_csv(std::fs::File::create(path)?, &set_rows(session))
}

pub fn save_session_json<P: AsRef<Path>>(path: P, session: &WorkoutSession) -> std::io::Result<()> {
    write_json(session, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SetRecord;
    use chrono::NaiveDate;

    fn session() -> WorkoutSession {
        let mut s = WorkoutSession {
            date: NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
            ..WorkoutSession::default()
        };
        let squat = s.logs[0]
            .with_set_added(SetRecord {
                weight: 100.0,
                reps: Some(5.0),
            })
            .with_set_added(SetRecord {
                weight: 102.5,
                reps: None,
            });
        s.apply_update(0, squat);
        let bench = s.logs[1].with_set_added(SetRecord {
            weight: f32::NAN,
            reps: Some(8.0),
        });
        s.apply_update(1, bench);
        s
    }

    #[test]
    fn rows_follow_slot_and_set_order() {
        let s = session();
        let rows = set_rows(&s);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].exercise, "Back Squat");
        assert_eq!(rows[0].muscle_group, Some("Quads"));
        assert_eq!((rows[0].slot, rows[0].set), (1, 1));
        assert_eq!((rows[1].slot, rows[1].set), (1, 2));
        assert_eq!(rows[1].reps, None);
        assert_eq!((rows[2].slot, rows[2].set), (2, 1));
        assert_eq!(rows[2].weight, None);
    }

    #[test]
    fn csv_export_writes_header_and_rows() {
        let s = session();
        let mut buf = Vec::new();
        write_csv(&mut buf, &set_rows(&s)).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("date,slot,exercise,muscle_group,set,weight,reps")
        );
        assert_eq!(lines.next(), Some("2024-03-09,1,Back Squat,Quads,1,100.0,5.0"));
        assert_eq!(lines.next(), Some("2024-03-09,1,Back Squat,Quads,2,102.5,"));
        assert_eq!(lines.next(), Some("2024-03-09,2,Bench Press,Chest,1,,8.0"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn json_export_can_be_reloaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let s = session();
        save_session_json(&path, &s).unwrap();
        assert_eq!(WorkoutSession::load_plan(&path).unwrap(), s);
    }
}
