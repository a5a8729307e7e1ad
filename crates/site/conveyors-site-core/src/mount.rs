//! Wires a page's sections into a motion [`Engine`].
//!
//! Each section gets a tracked region with its staggered entrance, one
//! counter per stat bound to that region, and a marquee when it carries
//! testimonials. Marquees scroll from mount, independent of the reveal.
//! A page is mounted completely or not at all.

use conveyors_motion_core::{CounterId, Engine, MarqueeId, RegionId, RegionOptions};

use crate::catalog::{Page, PageContent, Section};
use crate::error::SiteError;

#[derive(Clone, Debug)]
pub struct MountedStat {
    pub label: String,
    pub counter: CounterId,
}

#[derive(Clone, Debug)]
pub struct MountedSection {
    pub id: String,
    pub region: RegionId,
    pub stats: Vec<MountedStat>,
    pub marquee: Option<MarqueeId>,
}

impl MountedSection {
    fn attach(&mut self, engine: &mut Engine, section: &Section) -> Result<(), SiteError> {
        engine.mount_entrance(self.region, section.children)?;
        for stat in &section.stats {
            let counter = engine.mount_counter(self.region, &stat.value, None)?;
            self.stats.push(MountedStat {
                label: stat.label.clone(),
                counter,
            });
        }
        if section.has_marquee() {
            self.marquee =
                Some(engine.mount_marquee(section.testimonials.len(), section.marquee_cycle_ms)?);
        }
        Ok(())
    }

    /// Unmount the region (its counters go with it) and the marquee. Handles
    /// the host already removed through `Inputs::unmount` are skipped.
    fn release(&self, engine: &mut Engine) {
        if let Err(err) = engine.unmount_region(self.region) {
            log::debug!("section '{}': {err}", self.id);
        }
        if let Some(marquee) = self.marquee {
            if let Err(err) = engine.unmount_marquee(marquee) {
                log::debug!("section '{}': {err}", self.id);
            }
        }
    }
}

#[derive(Debug)]
pub struct PageMount {
    page: Page,
    sections: Vec<MountedSection>,
}

impl PageMount {
    /// Mount every section of `content`. On failure everything mounted so
    /// far is released again before the error is returned.
    pub fn mount(engine: &mut Engine, content: &PageContent) -> Result<Self, SiteError> {
        let mut mount = Self {
            page: content.page,
            sections: Vec::with_capacity(content.sections.len()),
        };
        for section in &content.sections {
            let mut mounted = MountedSection {
                id: section.id.clone(),
                region: engine.mount_region(RegionOptions::default()),
                stats: Vec::with_capacity(section.stats.len()),
                marquee: None,
            };
            let attached = mounted.attach(engine, section);
            mount.sections.push(mounted);
            if let Err(err) = attached {
                log::warn!(
                    "mounting {:?} failed at section '{}': {err}",
                    content.page,
                    section.id
                );
                mount.unmount(engine);
                return Err(err);
            }
        }
        log::debug!("mounted {:?} with {} sections", content.page, mount.sections.len());
        Ok(mount)
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn sections(&self) -> &[MountedSection] {
        &self.sections
    }

    pub fn section(&self, id: &str) -> Option<&MountedSection> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// Release every region (with its counters) and marquee of this page.
    pub fn unmount(self, engine: &mut Engine) {
        for section in &self.sections {
            section.release(engine);
        }
        log::debug!("unmounted {:?}", self.page);
    }
}
