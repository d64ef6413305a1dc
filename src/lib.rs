pub mod display;
pub mod form;
pub mod queue;
pub mod web;
