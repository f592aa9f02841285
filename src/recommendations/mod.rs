//! Recommendations module
//!
//! Provides writing recommendations (vocabulary, readability, tone)
//! based on a linguistic profile.

pub mod engine;
pub mod types;

// Re-export commonly used types
pub use engine::generate_recommendations;
pub use types::{Recommendation, RecommendationInput, RecommendationSummary, RecommendationType};

use crate::models::metrics::AuthorProfile;

/// Generate recommendations straight from a profile
pub fn recommend_for_profile(profile: &AuthorProfile) -> RecommendationSummary {
    generate_recommendations(&RecommendationInput::from(profile))
}
