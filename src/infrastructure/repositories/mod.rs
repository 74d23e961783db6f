// src/infrastructure/repositories/mod.rs
mod error;
mod memory_token;
mod memory_user;
mod postgres_token;
mod postgres_user;

pub use error::map_sqlx;
pub use memory_token::InMemoryTokenStore;
pub use memory_user::InMemoryUserStore;
pub use postgres_token::PostgresTokenStore;
pub use postgres_user::PostgresUserStore;
