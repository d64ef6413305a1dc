pub mod slots;
pub mod status;
pub mod store;
pub mod types;

pub use slots::{
    bracket_by_label, default_brackets, find_open_slot, open_slot_count, slot_sort_key, Bracket,
    SLOTS_PER_BRACKET,
};
pub use status::{mark_status, StatusError};
pub use store::{QueueStore, StoreError};
pub use types::{AppointmentRecord, Status};
