//! Fixed site header: navigation, the mobile menu, and the compact style the
//! header switches to once the page scrolls past the configured threshold.

use conveyors_motion_core::{Engine, MotionEvent, Outputs, ScrollFlagId};

use crate::catalog::Page;
use crate::error::SiteError;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    pub page: Page,
}

pub const NAV: [NavItem; 6] = [
    NavItem { label: "Home", page: Page::Home },
    NavItem { label: "About", page: Page::About },
    NavItem { label: "Products", page: Page::Products },
    NavItem { label: "Industries", page: Page::Industries },
    NavItem { label: "Training", page: Page::Training },
    NavItem { label: "Contact", page: Page::Contact },
];

#[derive(Debug)]
pub struct Header {
    scroll_flag: ScrollFlagId,
    scrolled: bool,
    menu_open: bool,
}

impl Header {
    pub fn mount(engine: &mut Engine) -> Result<Self, SiteError> {
        let scroll_flag = engine.mount_scroll_flag(None)?;
        Ok(Self {
            scroll_flag,
            scrolled: false,
            menu_open: false,
        })
    }

    pub fn scroll_flag(&self) -> ScrollFlagId {
        self.scroll_flag
    }

    /// Compact, opaque styling applies while true.
    pub fn is_scrolled(&self) -> bool {
        self.scrolled
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    pub fn toggle_menu(&mut self) -> bool {
        self.menu_open = !self.menu_open;
        self.menu_open
    }

    /// Navigate via a header link: the mobile menu closes and the route is returned.
    pub fn follow(&mut self, item: &NavItem) -> &'static str {
        self.menu_open = false;
        item.page.path()
    }

    pub fn is_active(item: &NavItem, current: Page) -> bool {
        item.page == current
    }

    /// Apply this frame's engine output. Returns true when the styling flipped.
    pub fn apply(&mut self, outputs: &Outputs) -> bool {
        let mut flipped = false;
        for event in &outputs.events {
            if let MotionEvent::ScrollFlagChanged { flag, scrolled } = event {
                if *flag == self.scroll_flag && *scrolled != self.scrolled {
                    self.scrolled = *scrolled;
                    flipped = true;
                }
            }
        }
        flipped
    }

    pub fn unmount(self, engine: &mut Engine) {
        if let Err(err) = engine.unmount_scroll_flag(self.scroll_flag) {
            log::debug!("header: {err}");
        }
    }
}
