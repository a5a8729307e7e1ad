use thiserror::Error;

use conveyors_motion_core::MotionError;

use crate::catalog::Page;

#[derive(Debug, Error)]
pub enum SiteError {
    #[error("site catalog parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("site catalog has no {0:?} page")]
    MissingPage(Page),
    #[error("{0:?} page has no sections")]
    EmptyPage(Page),
    #[error("{page:?} page repeats section id '{section}'")]
    DuplicateSection { page: Page, section: String },
    #[error("testimonial by {author} has rating {rating}, expected 1..=5")]
    InvalidRating { author: String, rating: u8 },
    #[error(transparent)]
    Motion(#[from] MotionError),
}
