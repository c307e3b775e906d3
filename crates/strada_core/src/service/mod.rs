//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep callers decoupled from storage details.
//!
//! `UserService` and `EmploymentService` are pass-throughs over the stores.
//! `IntegrityService` runs the cross-entity pre-checks in front of them.

pub mod employment_service;
pub mod integrity_service;
pub mod user_service;
