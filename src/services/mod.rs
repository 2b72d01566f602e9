//! Business logic: account signup, authentication, and balance lookup.

pub mod auth;

pub use auth::{AuthService, Login, LoginOutcome, SignUp};
