use csv::WriterBuilder;

use crate::queue::AppointmentRecord;

/// Renders the queue as CSV (name, age, gender, slot, status) for the staff
/// download button. Records serialize in field order, so the header row
/// matches the queue file's layout.
pub fn export_queue_csv(records: &[AppointmentRecord]) -> Result<Vec<u8>, csv::Error> {
    let mut wtr = WriterBuilder::new().has_headers(true).from_writer(Vec::new());

    // The writer only emits headers alongside the first record; an empty
    // queue still needs the header row.
    if records.is_empty() {
        wtr.write_record(["name", "age", "gender", "slot", "status"])?;
    }
    for record in records {
        wtr.serialize(record)?;
    }

    wtr.into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queue::Status;

    fn record(name: &str, slot: &str, status: Status) -> AppointmentRecord {
        AppointmentRecord {
            name: name.to_string(),
            age: "42".to_string(),
            gender: "Male".to_string(),
            slot: slot.to_string(),
            status,
        }
    }

    #[test]
    fn export_includes_header_and_rows() {
        let records = vec![
            record("Asha", "10:00", Status::Pending),
            record("Ravi", "10:10", Status::Checked),
        ];
        let bytes = export_queue_csv(&records).unwrap();
        let text = String::from_utf8(bytes).unwrap();

        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("name,age,gender,slot,status"));
        assert_eq!(lines.next(), Some("Asha,42,Male,10:00,Pending"));
        assert_eq!(lines.next(), Some("Ravi,42,Male,10:10,Checked"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn empty_queue_exports_header_only() {
        let bytes = export_queue_csv(&[]).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(text.trim_end(), "name,age,gender,slot,status");
    }
}
