pub mod catalog;
pub mod collection;
pub mod images;
pub mod lookup;
pub mod stats;
pub mod timer;
