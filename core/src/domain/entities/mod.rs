//! Domain entities representing core authentication objects.

pub mod token;
pub mod user;

// Re-export commonly used types
pub use token::{Claims, Token, RESERVED_CLAIMS};
pub use user::Principal;
