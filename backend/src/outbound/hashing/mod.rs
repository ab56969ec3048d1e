//! Password hashing adapters.

mod bcrypt_hasher;

pub use bcrypt_hasher::{BcryptPasswordHasher, DEFAULT_BCRYPT_COST, InvalidBcryptCost};
