pub mod templates;
pub mod users;
