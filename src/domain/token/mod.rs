pub mod entity;
pub mod repository;

pub use entity::{TokenEntity, TokenKind};
pub use repository::{TokenByUserId, TokenRemover, TokenSaver};
