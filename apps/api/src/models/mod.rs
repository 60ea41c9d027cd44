pub mod context;
pub mod resume;
