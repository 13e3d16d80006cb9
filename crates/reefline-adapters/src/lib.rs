pub mod notify;
pub mod persistence;
