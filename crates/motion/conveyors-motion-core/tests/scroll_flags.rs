use conveyors_motion_core::{
    Engine, Inputs, MotionConfig, MotionError, MotionEvent, ScrollFlagId, Unmount,
};

fn changes(out: &conveyors_motion_core::Outputs) -> Vec<(ScrollFlagId, bool)> {
    out.events
        .iter()
        .filter_map(|e| match e {
            MotionEvent::ScrollFlagChanged { flag, scrolled } => Some((*flag, *scrolled)),
            _ => None,
        })
        .collect()
}

#[test]
fn header_flag_follows_the_fifty_pixel_threshold() {
    let mut eng = Engine::with_manual_observer(MotionConfig::default()).unwrap();
    let header = eng.mount_scroll_flag(None).unwrap();
    assert_eq!(eng.is_scrolled(header), Some(false));

    let out = eng.update(16.0, Inputs::default().scroll_to(0.0));
    assert!(changes(out).is_empty());
    let out = eng.update(16.0, Inputs::default().scroll_to(50.0));
    assert!(changes(out).is_empty());
    let out = eng.update(16.0, Inputs::default().scroll_to(120.0));
    assert_eq!(changes(out), vec![(header, true)]);

    // Position is retained between frames; no repeated event.
    let out = eng.update(16.0, Inputs::default());
    assert!(changes(out).is_empty());

    let out = eng.update(16.0, Inputs::default().scroll_to(10.0));
    assert_eq!(changes(out), vec![(header, false)]);
    assert_eq!(eng.is_scrolled(header), Some(false));
}

#[test]
fn flag_mounted_on_a_scrolled_page_reports_on_next_update() {
    let mut eng = Engine::with_manual_observer(MotionConfig::default()).unwrap();
    eng.update(16.0, Inputs::default().scroll_to(900.0));
    let flag = eng.mount_scroll_flag(Some(200.0)).unwrap();
    let out = eng.update(16.0, Inputs::default());
    assert_eq!(changes(out), vec![(flag, true)]);
}

#[test]
fn unmounted_flag_goes_quiet() {
    let mut eng = Engine::with_manual_observer(MotionConfig::default()).unwrap();
    let flag = eng.mount_scroll_flag(None).unwrap();
    let out = eng.update(
        16.0,
        Inputs::default()
            .scroll_to(300.0)
            .unmount(Unmount::ScrollFlag(flag)),
    );
    assert!(changes(out).is_empty());
    assert_eq!(eng.is_scrolled(flag), None);
    assert!(matches!(
        eng.unmount_scroll_flag(flag),
        Err(MotionError::UnknownScrollFlag(_))
    ));
}

#[test]
fn non_finite_threshold_is_rejected() {
    let mut eng = Engine::with_manual_observer(MotionConfig::default()).unwrap();
    assert!(matches!(
        eng.mount_scroll_flag(Some(f64::NAN)),
        Err(MotionError::InvalidConfig(_))
    ));
}
