pub mod alert;
pub mod context;
pub mod error;
pub mod evaluator;
pub mod events;
pub mod ids;
pub mod notification;
pub mod parameter;
pub mod threshold;
