//! Account handlers: registration, login and profiles.

mod login;
mod profile;
mod register;

pub use login::{LoginCommand, LoginHandler, LoginResult};
pub use profile::{GetProfileHandler, GetProfileQuery, UpdateProfileCommand, UpdateProfileHandler};
pub use register::{RegisterCommand, RegisterHandler, RegisterResult};
