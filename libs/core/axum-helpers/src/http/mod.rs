//! HTTP middleware: CORS, security headers and timeout responses.

pub mod cors;
pub mod security;
pub mod timeout;

pub use cors::create_cors_layer;
pub use security::security_headers;
pub use timeout::timeout_envelope;
