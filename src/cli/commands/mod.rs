pub mod add;
pub mod config;
pub mod db;
pub mod del;
pub mod edit;
pub mod init;
pub mod list;
pub mod log;
pub mod lookup;
pub mod stats;
pub mod time;
pub mod timer;
