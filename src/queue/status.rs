use thiserror::Error;

use super::types::{AppointmentRecord, Status};

/// Errors from marking a record's status.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StatusError {
    #[error("no appointment at index {index} (queue holds {len})")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("cannot mark a {from} appointment as {to}")]
    IllegalTransition { from: Status, to: Status },
}

/// Sets `records[index].status = new_status` after checking the transition
/// is legal. The legality check lives here so whatever renders the queue
/// cannot bypass it.
///
/// Returns `Ok(true)` when the record changed and needs persisting,
/// `Ok(false)` when the record already carried `new_status` (idempotent
/// re-mark, nothing to write).
pub fn mark_status(
    records: &mut [AppointmentRecord],
    index: usize,
    new_status: Status,
) -> Result<bool, StatusError> {
    let len = records.len();
    let record = records
        .get_mut(index)
        .ok_or(StatusError::IndexOutOfRange { index, len })?;

    if record.status == new_status {
        return Ok(false);
    }
    if !record.status.can_transition_to(new_status) {
        return Err(StatusError::IllegalTransition {
            from: record.status,
            to: new_status,
        });
    }

    record.status = new_status;
    Ok(true)
}
