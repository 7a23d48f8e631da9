//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod client_repo;
pub mod paella_repo;
pub mod profile_repo;
pub mod session_repo;
pub mod user_repo;

pub use client_repo::ClientRepo;
pub use paella_repo::PaellaRepo;
pub use profile_repo::ProfileRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;
