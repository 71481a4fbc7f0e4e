pub mod recovery_tokens;
pub mod users;
