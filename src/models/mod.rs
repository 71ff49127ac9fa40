//! Wire and report models
//!
//! DTOs for the pricing service response body and the serialisable
//! appraisal report.

pub mod aggregated;
pub mod report;

// Re-export commonly used types
pub use aggregated::{AggregatedResponse, AggregatedResult, PricePoint, ScopedPrices};
pub use report::AppraisalReport;
