//! Authentication: token issuance/verification and the bearer middleware.

pub mod jwt;
pub mod middleware;

pub use jwt::{Claims, JwtHandler};
pub use middleware::{auth_middleware, AuthError};
