pub mod rules;
pub mod tool;
