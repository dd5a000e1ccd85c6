pub mod school;

pub use school::{NewSchool, PayloadError, School, SCHOOL_COLUMNS};
