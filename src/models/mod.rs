pub mod recovery_token;
pub mod user;

pub use recovery_token::{RecoveryToken, RecoveryTokenStatus};
pub use user::{User, UserIdentity, UserRole, UserStatus};
