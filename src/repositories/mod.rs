pub mod session_repository;

pub use session_repository::{InMemorySessionRepository, SessionHandle, SessionRepository};
