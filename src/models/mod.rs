pub mod place;
pub mod search;
