mod keys;
mod predicates;
mod value;

pub use keys::QueryKey;
pub use predicates::KeyPredicate;
pub use value::QueryValue;
