//! Clinical analysis components layered over the model handles.

pub mod entities;
pub mod intent;
pub mod keywords;
pub mod report;
pub mod sentiment;
pub mod soap;
pub mod summary;
