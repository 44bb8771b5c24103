pub mod admin;
pub mod lifecycle;
pub mod reward;
pub mod submit;
