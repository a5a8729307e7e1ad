//! conveyors-site-core
//!
//! Page content for the Conveyors Inc. marketing site, the glue that mounts
//! it onto the motion engine, and the fixed header's state. Markup, styling
//! and routing stay in the host; this crate only knows which sections exist,
//! what they count, and what the contact form carries.

pub mod catalog;
pub mod contact;
pub mod error;
pub mod header;
pub mod mount;

pub use crate::catalog::{ContactDetail, Page, PageContent, Section, SiteCatalog, Stat, Testimonial};
pub use crate::contact::{ContactForm, ContactHandler, LoggingContactHandler, Subject};
pub use crate::error::SiteError;
pub use crate::header::{Header, NavItem, NAV};
pub use crate::mount::{MountedSection, MountedStat, PageMount};
