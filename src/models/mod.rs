pub mod puzzle;
pub mod time_record;

pub use puzzle::{NewPuzzle, Puzzle};
pub use time_record::{TimeRecord, compute_ppm};
