pub mod admin;
pub mod assessments;
pub mod auth;
pub mod progress;
pub mod training;
