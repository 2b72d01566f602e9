//! Authentication: password hashing, bearer tokens, account HTTP handlers.

mod handlers;
mod jwt;
mod password;

pub use handlers::{authenticate, balance, signup};
pub use handlers::{
    AuthenticateRequest, AuthenticateResponse, BalanceRequest, BalanceResponse, SignUpRequest,
};
pub use jwt::{Claims, TokenService, TOKEN_TTL_SECS};
pub use password::{PasswordHasher, DUMMY_HASH, KEY_LEN, PBKDF2_ITERATIONS, SALT_LEN};
