pub mod alumni;
pub mod catalog;
pub mod profile;
