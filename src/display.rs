use std::fs::File;
use std::io::Write;

use crate::queue::{AppointmentRecord, Status};

/// Formats a patient line the way the staff view shows it.
pub fn format_patient_label(record: &AppointmentRecord) -> String {
    format!(
        "{} ({} yrs, {})",
        record.name, record.age, record.gender
    )
}

/// Prints the queue in a readable format, with per-status totals.
pub fn print_queue(records: &[AppointmentRecord]) {
    println!("\n=== Today's Appointments ===");
    println!("Total booked: {}", records.len());

    let pending = records.iter().filter(|r| r.status == Status::Pending).count();
    let checked = records.iter().filter(|r| r.status == Status::Checked).count();
    let absent = records.iter().filter(|r| r.status == Status::Absent).count();
    println!("Pending: {} | Checked: {} | Absent: {}", pending, checked, absent);

    if records.is_empty() {
        println!("\nNo appointments booked yet.");
        return;
    }

    println!();
    for record in records {
        println!(
            "  {} -> {} [{}]",
            record.slot,
            format_patient_label(record),
            record.status
        );
    }
}

/// Writes the queue to a file in the format: HH:MM name (age yrs, gender) [status]
pub fn write_queue_report(records: &[AppointmentRecord], filename: &str) -> std::io::Result<()> {
    let mut file = File::create(filename)?;

    writeln!(file, "** Today's Appointments **")?;

    for record in records {
        writeln!(
            file,
            "{} {} [{}]",
            record.slot,
            format_patient_label(record),
            record.status
        )?;
    }

    Ok(())
}
