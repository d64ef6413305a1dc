pub mod booking;
pub mod export;

pub use booking::{validate_booking, BookingRequest};
pub use export::export_queue_csv;
