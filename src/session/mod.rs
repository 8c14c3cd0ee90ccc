//! Local accounts and the current session
//!
//! - `model`: `Session` and `CredentialRecord`
//! - `store`: `SessionStore` with signup / login / logout

mod model;
mod store;

pub use model::{CredentialRecord, Session};
pub use store::SessionStore;
