pub mod token;

pub use token::{SessionClaims, VerifiedSession};
