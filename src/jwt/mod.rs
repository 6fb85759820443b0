//! Token claims and their signed compact serialization.

pub mod builder;
pub mod claims;
pub mod serializer;

pub use builder::ClaimsBuilder;
pub use claims::{generate_salt, Claims, SALT_LENGTH};
pub use serializer::JwtSerializer;
