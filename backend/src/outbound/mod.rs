//! Outbound adapters implementing the domain repository ports.
//!
//! - **memory**: process-local repositories for tests and database-less runs.
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM.
//!
//! Adapters translate between domain types and storage representations and
//! contain no business rules.

pub mod memory;
pub mod persistence;
