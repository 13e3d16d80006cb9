mod log;

pub use log::LogNotifier;
