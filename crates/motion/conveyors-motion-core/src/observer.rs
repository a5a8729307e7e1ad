//! Host viewport-observation capability.
//!
//! The engine asks the host to start watching a region when it is mounted and
//! to stop once the region's gate detaches (one-shot fire, unmount, or engine
//! teardown). Measurements themselves flow back through [`crate::Inputs`].

use crate::error::{MotionError, Result};
use crate::ids::RegionId;

pub trait Observer: std::fmt::Debug {
    /// Begin observing `region`. Returning [`MotionError::ObserverUnavailable`]
    /// makes the region fail open (revealed immediately).
    fn observe(&mut self, region: RegionId, margin_px: f64) -> Result<()>;

    /// Release the observation. Called exactly once per successful `observe`.
    fn unobserve(&mut self, region: RegionId);
}

/// Observer for hosts that push every region's geometry each frame themselves
/// (scroll handlers, terminal layouts, tests). Nothing to acquire or release.
#[derive(Debug, Default, Clone, Copy)]
pub struct ManualObserver;

impl Observer for ManualObserver {
    fn observe(&mut self, _region: RegionId, _margin_px: f64) -> Result<()> {
        Ok(())
    }

    fn unobserve(&mut self, _region: RegionId) {}
}

/// Observer for environments with no viewport geometry at all.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableObserver;

impl Observer for UnavailableObserver {
    fn observe(&mut self, _region: RegionId, _margin_px: f64) -> Result<()> {
        Err(MotionError::ObserverUnavailable)
    }

    fn unobserve(&mut self, _region: RegionId) {}
}
