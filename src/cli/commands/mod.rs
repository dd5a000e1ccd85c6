pub mod add;
pub mod filters;
pub mod list;
pub mod migrate;
