pub mod categories;
pub mod status;
