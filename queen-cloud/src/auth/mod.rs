//! Authentication: token issue/verify and the request middleware

pub mod jwt;
pub mod middleware;

pub use middleware::{CurrentPrincipal, require_auth};
