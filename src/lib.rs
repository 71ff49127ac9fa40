//! Housing Appraiser - market value estimates for housing layouts
//!
//! Resolves item prices through a time-bounded local cache backed by a
//! batched remote pricing service, then totals furniture and dyes.

pub mod aggregate;
pub mod app;
pub mod cache;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod housing;
pub mod models;
pub mod remote;
pub mod report;
pub mod resolver;

pub use app::{appraise_list, Appraisal, Appraiser};
pub use config::Config;
pub use error::{AppraiseError, Result};
pub use resolver::{PriceResolver, ResolvedPriceMap};
