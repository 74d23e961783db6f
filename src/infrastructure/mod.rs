pub mod database;
pub mod logging;
pub mod repositories;
pub mod security;
pub mod time;
pub mod validation;
