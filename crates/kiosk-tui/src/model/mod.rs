pub mod calendar;
pub mod grid;
