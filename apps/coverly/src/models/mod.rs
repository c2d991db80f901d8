pub mod form;
pub mod resume;
