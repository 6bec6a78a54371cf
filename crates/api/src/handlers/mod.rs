pub mod availability;
pub mod content;
pub mod inquiry;
pub mod sections;
