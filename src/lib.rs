pub mod calc;
pub mod config;
pub mod db;
pub mod notice;
pub mod ui;
pub mod validate;
