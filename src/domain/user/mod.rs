pub mod entity;
pub mod repository;
pub mod value_objects;

pub use entity::{NewUser, User};
pub use repository::{EmailAvailability, UserByEmail, UserCreator};
pub use value_objects::{Email, PasswordHash, PersonName, Role, UserId};
