//! Domain layer for Salary Guardian
//!
//! CDD Principle: Domain Model - Pure business logic for guarded salary adjustments
//! - Contains the employee record, validation outcomes and adjustment errors
//! - Independent of configuration formats and rule registration
//! - Expresses the ubiquitous language of raises, rejections and receipts

pub mod adjustments;
pub mod employee;

// Re-export main domain types for convenience
pub use adjustments::*;
pub use employee::*;
