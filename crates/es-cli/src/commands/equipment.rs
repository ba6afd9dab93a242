//! Equipment command for listing known equipment.

use std::io::Write;

use anyhow::Result;
use es_db::Database;

pub fn run<W: Write>(writer: &mut W, db: &Database) -> Result<()> {
    let equipment = db.list_equipment()?;

    if equipment.is_empty() {
        writeln!(writer, "No equipment recorded.")?;
        return Ok(());
    }

    writeln!(writer, "{:<16}  {:>6}  Last change", "Equipment", "Events")?;
    writeln!(writer, "────────────────  ──────  ────────────────")?;
    for entry in equipment {
        writeln!(
            writer,
            "{:<16}  {:>6}  {} {}",
            entry.equipment, entry.event_count, entry.last_date, entry.last_time
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use es_db::StatusEventRecord;

    fn record(id: &str, equipment: &str, date: &str, time: &str) -> StatusEventRecord {
        StatusEventRecord {
            id: id.to_string(),
            equipment: equipment.to_string(),
            date: date.to_string(),
            time: time.to_string(),
            status: "running".to_string(),
            note: None,
            operator: String::new(),
            recorded_at: "2025-07-03T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn lists_equipment_with_last_change() {
        let mut db = Database::open_in_memory().unwrap();
        db.insert_events(&[
            record("a", "press-1", "2025-07-02", "08:00"),
            record("b", "press-1", "2025-07-03", "08:00"),
            record("c", "kiln-2", "2025-07-01", "22:15"),
        ])
        .unwrap();

        let mut output = Vec::new();
        run(&mut output, &db).unwrap();

        let output = String::from_utf8(output).unwrap();
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[2], "kiln-2                 1  2025-07-01 22:15");
        assert_eq!(lines[3], "press-1                2  2025-07-03 08:00");
    }

    #[test]
    fn empty_database() {
        let db = Database::open_in_memory().unwrap();
        let mut output = Vec::new();
        run(&mut output, &db).unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), "No equipment recorded.\n");
    }
}
