use std::cell::RefCell;
use std::rc::Rc;

use conveyors_motion_core::{
    CounterPhase, CounterSpec, Engine, Inputs, MotionConfig, MotionError, MotionEvent, Observer,
    Rect, RegionId, RevealState, Unmount,
};
use conveyors_site_core::{Page, PageMount, SiteCatalog, SiteError};
use conveyors_test_fixtures::counters;

const VIEWPORT: Rect = Rect::new(0.0, 0.0, 1280.0, 800.0);
const SECTION_HEIGHT: f64 = 700.0;

#[derive(Debug, Default, Clone)]
struct Recording {
    observed: Rc<RefCell<Vec<RegionId>>>,
    released: Rc<RefCell<Vec<RegionId>>>,
}

impl Observer for Recording {
    fn observe(&mut self, region: RegionId, _margin_px: f64) -> Result<(), MotionError> {
        self.observed.borrow_mut().push(region);
        Ok(())
    }

    fn unobserve(&mut self, region: RegionId) {
        self.released.borrow_mut().push(region);
    }
}

/// Lay sections out top to bottom and report their positions for `scroll_y`.
fn measure_page(mount: &PageMount, scroll_y: f64) -> Inputs {
    mount
        .sections()
        .iter()
        .enumerate()
        .fold(Inputs::default().with_viewport(VIEWPORT), |inputs, (i, s)| {
            let y = i as f64 * SECTION_HEIGHT - scroll_y;
            inputs.measure(s.region, Rect::new(0.0, y, 1280.0, SECTION_HEIGHT))
        })
}

#[test]
fn every_site_stat_is_a_known_counter_case() {
    let catalog = SiteCatalog::embedded().unwrap();
    let cases = counters::cases("site-stats").unwrap();
    for stat in catalog.stats() {
        let case = cases
            .iter()
            .find(|c| c.display == stat.value)
            .unwrap_or_else(|| panic!("no fixture for {}", stat.value));
        let spec = CounterSpec::parse(&stat.value, 2000);
        assert_eq!(spec.target_value, case.target);
        assert!(spec.target_value > 0, "{} degraded", stat.value);
    }
}

#[test]
fn home_page_counts_up_as_sections_scroll_into_view() {
    let catalog = SiteCatalog::embedded().unwrap();
    let home = catalog.page(Page::Home).unwrap();
    let mut eng = Engine::with_manual_observer(MotionConfig::default()).unwrap();
    let mount = PageMount::mount(&mut eng, home).unwrap();

    let hero = mount.section("hero").unwrap().clone();
    let about = mount.section("about").unwrap().clone();
    assert_eq!(hero.stats.len(), 3);

    // At the top of the page only the hero is revealed.
    let out = eng.update(16.0, measure_page(&mount, 0.0));
    assert!(out
        .events
        .contains(&MotionEvent::Revealed { region: hero.region }));
    assert_eq!(eng.reveal_state(about.region), Some(RevealState::Unseen));
    for stat in &about.stats {
        assert_eq!(eng.counter_text(stat.counter).as_deref(), Some("0+"));
    }

    for _ in 0..200 {
        eng.update(16.0, Inputs::default());
    }
    let hero_texts: Vec<String> = hero
        .stats
        .iter()
        .map(|s| eng.counter_text(s.counter).unwrap())
        .collect();
    assert_eq!(hero_texts, ["45+", "2,500+", "100+"]);

    // Scroll the about section into view.
    eng.update(16.0, measure_page(&mount, SECTION_HEIGHT));
    assert_eq!(eng.reveal_state(about.region), Some(RevealState::Visible));
    for _ in 0..200 {
        eng.update(16.0, Inputs::default());
    }
    assert_eq!(
        eng.counter_text(about.stats[0].counter).as_deref(),
        Some("200,000+")
    );
    assert_eq!(eng.counter_phase(about.stats[2].counter), Some(CounterPhase::Done));
}

#[test]
fn testimonial_marquee_tiles_the_catalog_cards() {
    let catalog = SiteCatalog::embedded().unwrap();
    let home = catalog.page(Page::Home).unwrap();
    let testimonials = &home
        .sections
        .iter()
        .find(|s| s.has_marquee())
        .unwrap()
        .testimonials;

    let mut eng = Engine::with_manual_observer(MotionConfig::default()).unwrap();
    let mount = PageMount::mount(&mut eng, home).unwrap();
    let marquee = mount.section("testimonials").unwrap().marquee.unwrap();

    let track = eng.marquee_track(marquee).unwrap();
    let cards: Vec<_> = track.rendered().map(|&i| &testimonials[i]).collect();
    assert_eq!(cards.len(), testimonials.len() * 4);
    assert_eq!(cards[track.loop_index()], cards[0]);
    assert_eq!(cards[0].initial(), Some('D'));

    // Half way through the forty second cycle.
    eng.update(20_000.0, Inputs::default());
    assert_eq!(eng.marquee_offset(marquee), Some(-25.0));
}

#[test]
fn unmounting_a_page_silences_it() {
    let catalog = SiteCatalog::embedded().unwrap();
    let mut eng = Engine::with_manual_observer(MotionConfig::default()).unwrap();
    let mount = PageMount::mount(&mut eng, catalog.page(Page::Home).unwrap()).unwrap();
    let hero = mount.section("hero").unwrap().clone();

    eng.update(16.0, measure_page(&mount, 0.0));
    eng.update(16.0, Inputs::default());
    mount.unmount(&mut eng);

    for _ in 0..50 {
        assert!(eng.update(16.0, Inputs::default()).is_empty());
    }
    assert_eq!(eng.counter_text(hero.stats[0].counter), None);
    assert_eq!(eng.reveal_state(hero.region), None);
}

#[test]
fn every_page_mounts() {
    let catalog = SiteCatalog::embedded().unwrap();
    for page in Page::ALL {
        let mut eng = Engine::with_manual_observer(MotionConfig::default()).unwrap();
        let content = catalog.page(page).unwrap();
        let mount = PageMount::mount(&mut eng, content).unwrap();
        assert_eq!(mount.page(), page);
        assert_eq!(mount.sections().len(), content.sections.len());
        mount.unmount(&mut eng);
    }
}

#[test]
fn failed_mount_releases_everything_it_mounted() {
    let catalog = SiteCatalog::embedded().unwrap();
    let mut home = catalog.page(Page::Home).unwrap().clone();
    let testimonials = home
        .sections
        .iter_mut()
        .find(|s| s.has_marquee())
        .unwrap();
    testimonials.marquee_cycle_ms = Some(0);

    let rec = Recording::default();
    let mut eng = Engine::new(MotionConfig::default(), Box::new(rec.clone())).unwrap();
    let err = PageMount::mount(&mut eng, &home).unwrap_err();
    assert!(matches!(err, SiteError::Motion(MotionError::InvalidConfig(_))));

    let observed = rec.observed.borrow().clone();
    assert!(!observed.is_empty());
    assert_eq!(*rec.released.borrow(), observed);
    for region in &observed {
        assert_eq!(eng.reveal_state(*region), None);
    }
    let out = eng.update(
        16.0,
        Inputs::default()
            .with_viewport(VIEWPORT)
            .measure(observed[0], Rect::new(0.0, 0.0, 1280.0, 700.0)),
    );
    assert!(out.is_empty());
}

#[test]
fn unmount_continues_past_regions_the_host_already_removed() {
    let catalog = SiteCatalog::embedded().unwrap();
    let rec = Recording::default();
    let mut eng = Engine::new(MotionConfig::default(), Box::new(rec.clone())).unwrap();
    let mount = PageMount::mount(&mut eng, catalog.page(Page::Home).unwrap()).unwrap();
    let section = mount.section("testimonials").unwrap().clone();
    let marquee = section.marquee.unwrap();

    eng.update(16.0, Inputs::default().unmount(Unmount::Region(section.region)));
    mount.unmount(&mut eng);

    assert_eq!(eng.marquee_offset(marquee), None);
    let mut released = rec.released.borrow().clone();
    released.sort();
    assert_eq!(released, *rec.observed.borrow());
    assert!(eng.update(16.0, Inputs::default()).is_empty());
}
