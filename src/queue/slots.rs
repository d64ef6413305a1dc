use std::collections::HashSet;

use chrono::{Duration, NaiveTime};

/// Number of 10-minute slots in each hour-long bracket.
pub const SLOTS_PER_BRACKET: usize = 6;

const SLOT_INTERVAL_MINUTES: i64 = 10;

/// A fixed hour-long booking window subdivided into six 10-minute slots
/// starting on the hour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bracket {
    pub label: String,
    pub start: NaiveTime,
}

impl Bracket {
    /// Builds a bracket from a "HH:MM - HH:MM" label. The start time is
    /// taken from the label; the end is implied by the six-slot layout.
    pub fn from_label(label: &str) -> Option<Bracket> {
        let start_str = label.split('-').next()?.trim();
        let start = parse_slot(start_str)?;
        Some(Bracket {
            label: label.to_string(),
            start,
        })
    }

    /// The bracket's slot labels in chronological order.
    pub fn slots(&self) -> Vec<String> {
        (0..SLOTS_PER_BRACKET)
            .map(|i| {
                let time = self.start + Duration::minutes(SLOT_INTERVAL_MINUTES * i as i64);
                time.format("%H:%M").to_string()
            })
            .collect()
    }
}

/// The clinic's booking windows. Labels match the printed intake sheet,
/// including the third bracket's 12-hour-clock spelling (its slots run
/// 12:00 through 12:50).
pub fn default_brackets() -> Vec<Bracket> {
    ["10:00 - 11:00", "11:00 - 12:00", "12:00 - 01:00"]
        .iter()
        .filter_map(|label| Bracket::from_label(label))
        .collect()
}

pub fn bracket_by_label<'a>(brackets: &'a [Bracket], label: &str) -> Option<&'a Bracket> {
    brackets.iter().find(|b| b.label == label)
}

/// Scans the bracket's slots in chronological order and returns the first
/// one not present in `booked_slots`, or `None` when all six are taken.
/// Earliest time wins; the scan is deterministic.
pub fn find_open_slot(bracket: &Bracket, booked_slots: &HashSet<String>) -> Option<String> {
    bracket
        .slots()
        .into_iter()
        .find(|slot| !booked_slots.contains(slot))
}

/// How many of the bracket's slots are still free.
pub fn open_slot_count(bracket: &Bracket, booked_slots: &HashSet<String>) -> usize {
    bracket
        .slots()
        .iter()
        .filter(|slot| !booked_slots.contains(*slot))
        .count()
}

/// Parses an "HH:MM" slot label.
pub fn parse_slot(slot: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(slot.trim(), "%H:%M").ok()
}

/// Sort key for chronological slot ordering. Labels that fail to parse sort
/// first so they are impossible to miss in the staff view.
pub fn slot_sort_key(slot: &str) -> (bool, NaiveTime) {
    match parse_slot(slot) {
        Some(time) => (true, time),
        None => (false, NaiveTime::MIN),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn booked(slots: &[&str]) -> HashSet<String> {
        slots.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bracket_generates_six_slots_on_the_tens() {
        let bracket = Bracket::from_label("10:00 - 11:00").unwrap();
        assert_eq!(
            bracket.slots(),
            vec!["10:00", "10:10", "10:20", "10:30", "10:40", "10:50"]
        );
    }

    #[test]
    fn noon_bracket_stays_on_the_24_hour_clock() {
        let bracket = Bracket::from_label("12:00 - 01:00").unwrap();
        assert_eq!(
            bracket.slots(),
            vec!["12:00", "12:10", "12:20", "12:30", "12:40", "12:50"]
        );
    }

    #[test]
    fn open_slot_is_earliest_free() {
        let bracket = Bracket::from_label("10:00 - 11:00").unwrap();
        assert_eq!(
            find_open_slot(&bracket, &booked(&[])),
            Some("10:00".to_string())
        );
        assert_eq!(
            find_open_slot(&bracket, &booked(&["10:00", "10:10"])),
            Some("10:20".to_string())
        );
        // Holes are filled before later slots.
        assert_eq!(
            find_open_slot(&bracket, &booked(&["10:00", "10:20", "10:30"])),
            Some("10:10".to_string())
        );
    }

    #[test]
    fn full_bracket_yields_none() {
        let bracket = Bracket::from_label("10:00 - 11:00").unwrap();
        let all = booked(&["10:00", "10:10", "10:20", "10:30", "10:40", "10:50"]);
        assert_eq!(find_open_slot(&bracket, &all), None);
        assert_eq!(open_slot_count(&bracket, &all), 0);
    }

    #[test]
    fn bookings_in_other_brackets_do_not_count() {
        let bracket = Bracket::from_label("11:00 - 12:00").unwrap();
        let other = booked(&["10:00", "10:10", "12:00"]);
        assert_eq!(
            find_open_slot(&bracket, &other),
            Some("11:00".to_string())
        );
        assert_eq!(open_slot_count(&bracket, &other), SLOTS_PER_BRACKET);
    }

    #[test]
    fn default_brackets_resolve_by_label() {
        let brackets = default_brackets();
        assert_eq!(brackets.len(), 3);
        assert!(bracket_by_label(&brackets, "11:00 - 12:00").is_some());
        assert!(bracket_by_label(&brackets, "09:00 - 10:00").is_none());
    }

    #[test]
    fn slot_sort_key_orders_chronologically() {
        let mut slots = vec!["12:10", "10:00", "11:50", "10:10"];
        slots.sort_by_key(|s| slot_sort_key(s));
        assert_eq!(slots, vec!["10:00", "10:10", "11:50", "12:10"]);
    }
}
