use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// A single booked appointment as it lives in the queue file.
///
/// Field order matters: `save` serializes in declaration order so the file
/// stays diffable across rewrites.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentRecord {
    pub name: String,
    #[serde(deserialize_with = "age_from_string_or_number")]
    pub age: String,
    pub gender: String,
    /// "HH:MM" label of the occupied slot; unique across the queue,
    /// enforced at booking time.
    pub slot: String,
    pub status: Status,
}

/// Appointment status. `Pending` is the only state transitions leave from;
/// `Checked` and `Absent` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Pending,
    Checked,
    Absent,
}

impl Status {
    /// Whether moving from `self` to `next` is legal. Re-applying the
    /// current status counts as legal (idempotent no-op).
    pub fn can_transition_to(self, next: Status) -> bool {
        self == next || self == Status::Pending
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Status::Pending => "Pending",
            Status::Checked => "Checked",
            Status::Absent => "Absent",
        };
        f.write_str(s)
    }
}

// Hand-edited queue files carry age as either a bare number or a string;
// store it as a string either way.
fn age_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Age {
        Text(String),
        Number(i64),
    }

    Ok(match Age::deserialize(deserializer)? {
        Age::Text(s) => s,
        Age::Number(n) => n.to_string(),
    })
}
