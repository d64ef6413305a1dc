use serde::Deserialize;

use crate::queue::{bracket_by_label, Bracket};

/// Booking request from the patient page. Everything arrives as the strings
/// the form collected.
#[derive(Debug, Clone, Deserialize)]
pub struct BookingRequest {
    pub name: String,
    pub age: String,
    pub gender: String,
    pub bracket: String,
}

/// Validates a booking request. Runs before any store access so a rejected
/// request never leaves partial state behind.
pub fn validate_booking(req: &BookingRequest, brackets: &[Bracket]) -> Result<(), String> {
    if req.name.trim().is_empty() {
        return Err("Full name is required".to_string());
    }

    if req.age.trim().is_empty() {
        return Err("Age is required".to_string());
    }

    if req.gender.trim().is_empty() {
        return Err("Gender selection is required".to_string());
    }

    if req.bracket.trim().is_empty() {
        return Err("Time bracket selection is required".to_string());
    }
    if bracket_by_label(brackets, req.bracket.trim()).is_none() {
        return Err(format!("Unknown time bracket: {}", req.bracket));
    }

    Ok(())
}
