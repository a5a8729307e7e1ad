use conveyors_motion_core::{counter, CounterSpec, Easing};
use conveyors_test_fixtures::counters;

#[test]
fn site_statistics_parse_and_settle() {
    let cases = counters::cases("site-stats").expect("site-stats fixture");
    assert!(!cases.is_empty());
    for case in cases {
        let spec = CounterSpec::parse(&case.display, 2000);
        assert_eq!(spec.target_value, case.target, "{}", case.display);
        assert_eq!(spec.suffix, case.suffix, "{}", case.display);
        assert_eq!(spec.render(0), format!("0{}", case.suffix));

        let last = counter::run(spec.clone(), Easing::EaseOutExpo, true, 16.0)
            .last()
            .expect("triggered run yields samples");
        assert_eq!(last, case.target);
        assert_eq!(spec.render(last), case.rendered);
    }
}

#[test]
fn degraded_displays_render_verbatim() {
    for case in counters::cases("degraded").expect("degraded fixture") {
        let spec = CounterSpec::parse(&case.display, 2000);
        assert_eq!(spec.target_value, 0, "{:?}", case.display);
        assert_eq!(spec.suffix, case.display);
        let last = counter::run(spec.clone(), Easing::Linear, true, 16.0)
            .last()
            .unwrap();
        assert_eq!(spec.render(last), case.rendered);
    }
}

#[test]
fn every_sample_stays_within_bounds_for_all_curves() {
    let curves = [
        Easing::Linear,
        Easing::EaseOutCubic,
        Easing::EaseOutQuart,
        Easing::EaseOutExpo,
        Easing::EaseInOutCubic,
    ];
    for easing in curves {
        for target in [1u64, 7, 999, 1_000, 65_535, 4_294_967_296] {
            let spec = CounterSpec {
                target_value: target,
                suffix: String::new(),
                duration_ms: 1500,
            };
            let samples: Vec<u64> = counter::run(spec, easing, true, 13.0).collect();
            assert!(samples.iter().all(|v| *v <= target), "{easing:?} {target}");
            assert!(
                samples.windows(2).all(|w| w[0] <= w[1]),
                "{easing:?} {target} not monotonic"
            );
            assert_eq!(*samples.last().unwrap(), target);
        }
    }
}
