pub mod logger;
pub mod schema;
pub mod security;
pub mod time;

pub type TokenGeneratorPort = dyn security::TokenGenerator;
pub type TokenVerifierPort = dyn security::TokenVerifier;
pub type LoggerPort = dyn logger::Logger;
pub type ClockPort = dyn time::Clock;
