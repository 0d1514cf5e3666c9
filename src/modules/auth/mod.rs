pub mod handlers;
pub mod policy;
pub mod routes;

pub use policy::{require_admin, require_auth, SessionUser};
