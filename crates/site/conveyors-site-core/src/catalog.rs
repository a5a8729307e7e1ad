//! Static page/section catalog: the content the site's sections animate.

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use crate::error::SiteError;

static EMBEDDED: &str = include_str!("../data/site.json");

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    Home,
    About,
    Products,
    Industries,
    Training,
    Contact,
}

impl Page {
    pub const ALL: [Page; 6] = [
        Page::Home,
        Page::About,
        Page::Products,
        Page::Industries,
        Page::Training,
        Page::Contact,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Page::Home => "/",
            Page::About => "/about",
            Page::Products => "/products",
            Page::Industries => "/industries",
            Page::Training => "/training",
            Page::Contact => "/contact",
        }
    }

    /// Route lookup; trailing slashes are ignored.
    pub fn from_path(path: &str) -> Option<Page> {
        let trimmed = path.trim_end_matches('/');
        let trimmed = if trimmed.is_empty() { "/" } else { trimmed };
        Page::ALL.into_iter().find(|p| p.path() == trimmed)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stat {
    /// Display string, e.g. `"2,500+"`.
    pub value: String,
    pub label: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Testimonial {
    pub quote: String,
    pub author: String,
    pub role: String,
    pub rating: u8,
}

impl Testimonial {
    /// Avatar initial shown on the card.
    pub fn initial(&self) -> Option<char> {
        self.author.chars().next()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    /// Number of children that enter with a staggered transition.
    #[serde(default)]
    pub children: usize,
    #[serde(default)]
    pub stats: Vec<Stat>,
    #[serde(default)]
    pub testimonials: Vec<Testimonial>,
    #[serde(default)]
    pub marquee_cycle_ms: Option<u32>,
}

impl Section {
    pub fn has_marquee(&self) -> bool {
        !self.testimonials.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageContent {
    pub page: Page,
    pub title: String,
    pub sections: Vec<Section>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDetail {
    pub title: String,
    pub value: String,
    pub subvalue: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteCatalog {
    pub pages: Vec<PageContent>,
    #[serde(default)]
    pub contact: Vec<ContactDetail>,
}

impl SiteCatalog {
    /// The catalog compiled into the crate.
    pub fn embedded() -> Result<Self, SiteError> {
        Self::from_json(EMBEDDED)
    }

    pub fn from_json(s: &str) -> Result<Self, SiteError> {
        let catalog: SiteCatalog = serde_json::from_str(s)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Every page present and non-empty, unique section ids per page, ratings 1..=5.
    pub fn validate(&self) -> Result<(), SiteError> {
        for page in Page::ALL {
            let content = self.page(page).ok_or(SiteError::MissingPage(page))?;
            if content.sections.is_empty() {
                return Err(SiteError::EmptyPage(page));
            }
            let mut seen = HashSet::new();
            for section in &content.sections {
                if !seen.insert(section.id.as_str()) {
                    return Err(SiteError::DuplicateSection {
                        page,
                        section: section.id.clone(),
                    });
                }
                for t in &section.testimonials {
                    if !(1..=5).contains(&t.rating) {
                        return Err(SiteError::InvalidRating {
                            author: t.author.clone(),
                            rating: t.rating,
                        });
                    }
                }
            }
        }
        Ok(())
    }

    pub fn page(&self, page: Page) -> Option<&PageContent> {
        self.pages.iter().find(|p| p.page == page)
    }

    /// Every stat display string on the site, in page order.
    pub fn stats(&self) -> impl Iterator<Item = &Stat> + '_ {
        self.pages
            .iter()
            .flat_map(|p| p.sections.iter())
            .flat_map(|s| s.stats.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_catalog_is_valid() {
        let catalog = SiteCatalog::embedded().unwrap();
        assert_eq!(catalog.pages.len(), 6);
        let home = catalog.page(Page::Home).unwrap();
        assert_eq!(home.sections[0].id, "hero");
        assert_eq!(home.sections[0].stats[1].value, "2,500+");
        assert_eq!(catalog.contact.len(), 4);
    }

    #[test]
    fn routes_round_trip() {
        for page in Page::ALL {
            assert_eq!(Page::from_path(page.path()), Some(page));
        }
        assert_eq!(Page::from_path("/about/"), Some(Page::About));
        assert_eq!(Page::from_path(""), Some(Page::Home));
        assert_eq!(Page::from_path("/careers"), None);
    }

    #[test]
    fn bad_rating_is_rejected() {
        let mut catalog = SiteCatalog::embedded().unwrap();
        let home = catalog
            .pages
            .iter_mut()
            .find(|p| p.page == Page::Home)
            .unwrap();
        let section = home
            .sections
            .iter_mut()
            .find(|s| s.has_marquee())
            .unwrap();
        section.testimonials[0].rating = 6;
        assert!(matches!(
            catalog.validate(),
            Err(SiteError::InvalidRating { rating: 6, .. })
        ));
    }

    #[test]
    fn duplicate_section_ids_are_rejected() {
        let mut catalog = SiteCatalog::embedded().unwrap();
        let about = catalog
            .pages
            .iter_mut()
            .find(|p| p.page == Page::About)
            .unwrap();
        let first = about.sections[0].clone();
        about.sections.push(first);
        assert!(matches!(
            catalog.validate(),
            Err(SiteError::DuplicateSection { page: Page::About, ref section }) if section == "intro"
        ));
    }

    #[test]
    fn missing_page_is_rejected() {
        let err = SiteCatalog::from_json(r#"{ "pages": [] }"#).unwrap_err();
        assert!(matches!(err, SiteError::MissingPage(Page::Home)));
    }
}
