//! URL handling module for Skyquake
//!
//! This module provides the region table and the builders that turn a region,
//! a query or product identifiers, and a page number into request URLs.

mod builder;
mod region;

pub use builder::{build_question_url, build_review_url, build_search_url, page_urls};
pub use region::{build_base_url, Region, BASE_URL};
