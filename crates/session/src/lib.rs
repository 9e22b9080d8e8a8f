//! Client-side session state for FAQDesk
//!
//! Provides the session store and its durable backends, token payload
//! decoding, the validity check, and the authority that turns a live
//! session into outbound request headers (or tears it down).

mod authority;
mod claims;
mod clock;
mod error;
mod storage;
mod store;
mod token;
mod types;
mod validator;

pub use authority::{Credentials, RequestAuthority};
pub use claims::TokenClaims;
#[cfg(any(test, feature = "test-support"))]
pub use clock::ManualClock;
pub use clock::{Clock, SystemClock};
pub use error::SessionError;
pub use storage::{
    Entries, FileStorage, MemoryStorage, SessionStorage, ROLE_KEY, SUBJECT_KEY, TOKEN_KEY,
};
pub use store::SessionStore;
pub use token::decode_claims;
pub use types::{Role, Session, SessionState};
pub use validator::SessionValidator;
