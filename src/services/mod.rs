pub mod forward_auth;
pub mod introspection;
