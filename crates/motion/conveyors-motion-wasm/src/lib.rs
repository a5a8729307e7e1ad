use js_sys::{Function, Reflect};
use serde::Serialize;
use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;

use conveyors_motion_core::{
    CounterId, CounterSpec, Engine, Inputs, ManualObserver, MarqueeId, MotionConfig, MotionError,
    Observer, RegionId, RegionOptions, ScrollFlagId, UnavailableObserver,
};

#[wasm_bindgen]
pub struct ConveyorsMotion {
    core: Engine,
}

fn jsvalue_is_undefined_or_null(v: &JsValue) -> bool {
    v.is_undefined() || v.is_null()
}

fn js_err(context: &str, err: impl std::fmt::Display) -> JsError {
    JsError::new(&format!("{context}: {err}"))
}

/// Forwards observe/unobserve to host callbacks, typically wrapping an
/// `IntersectionObserver`. A callback that throws counts as unavailable.
#[derive(Debug)]
struct JsObserver {
    observe: Function,
    unobserve: Option<Function>,
}

impl Observer for JsObserver {
    fn observe(&mut self, region: RegionId, margin_px: f64) -> Result<(), MotionError> {
        let id = JsValue::from(region.0);
        let margin = JsValue::from_f64(margin_px);
        match self.observe.call2(&JsValue::UNDEFINED, &id, &margin) {
            Ok(ret) if ret.as_bool() == Some(false) => Err(MotionError::ObserverUnavailable),
            Ok(_) => Ok(()),
            Err(_) => Err(MotionError::ObserverUnavailable),
        }
    }

    fn unobserve(&mut self, region: RegionId) {
        if let Some(f) = &self.unobserve {
            if let Err(err) = f.call1(&JsValue::UNDEFINED, &JsValue::from(region.0)) {
                log::debug!("unobserve({}) threw: {err:?}", region.0);
            }
        }
    }
}

fn has_intersection_observer() -> bool {
    Reflect::has(&js_sys::global(), &JsValue::from_str("IntersectionObserver")).unwrap_or(false)
}

fn parse_config(config: JsValue) -> Result<MotionConfig, JsError> {
    if jsvalue_is_undefined_or_null(&config) {
        return Ok(MotionConfig::default());
    }
    if let Some(text) = config.as_string() {
        return MotionConfig::from_json(&text).map_err(|e| js_err("config error", e));
    }
    swb::from_value(config).map_err(|e| js_err("config error", e))
}

#[derive(Serialize)]
struct ParsedCounter<'a> {
    target_value: u64,
    suffix: &'a str,
    rendered: String,
}

#[wasm_bindgen]
impl ConveyorsMotion {
    /// Create an engine. `config` is a JSON object/string or undefined for defaults.
    ///
    /// `observe(regionId, marginPx)` is called when a region mounts; return
    /// `false` (or throw) when it cannot be observed and the region will be
    /// revealed immediately. `unobserve(regionId)` is called exactly once per
    /// observed region. Without an `observe` callback the host pushes geometry
    /// each frame; if the environment has no `IntersectionObserver` at all,
    /// every region fails open.
    #[wasm_bindgen(constructor)]
    pub fn new(
        config: JsValue,
        observe: Option<Function>,
        unobserve: Option<Function>,
    ) -> Result<ConveyorsMotion, JsError> {
        console_error_panic_hook::set_once();

        let cfg = parse_config(config)?;
        let observer: Box<dyn Observer> = match observe {
            Some(observe) => Box::new(JsObserver { observe, unobserve }),
            None if has_intersection_observer() => Box::new(ManualObserver),
            None => Box::new(UnavailableObserver),
        };
        let core = Engine::new(cfg, observer).map_err(|e| js_err("config error", e))?;
        Ok(ConveyorsMotion { core })
    }

    /// Track a region. `opts` is optional `{ margin_px?, once? }`. Returns a RegionId (u32).
    #[wasm_bindgen(js_name = mount_region)]
    pub fn mount_region(&mut self, opts: JsValue) -> Result<u32, JsError> {
        let opts: RegionOptions = if jsvalue_is_undefined_or_null(&opts) {
            RegionOptions::default()
        } else {
            swb::from_value(opts).map_err(|e| js_err("region options error", e))?
        };
        Ok(self.core.mount_region(opts).0)
    }

    /// Mount a counter from a display string like "2,500+". Returns a CounterId (u32).
    #[wasm_bindgen(js_name = mount_counter)]
    pub fn mount_counter(
        &mut self,
        region_id: u32,
        display: String,
        duration_ms: Option<u32>,
    ) -> Result<u32, JsError> {
        let id = self
            .core
            .mount_counter(RegionId(region_id), &display, duration_ms)
            .map_err(|e| js_err("mount_counter", e))?;
        Ok(id.0)
    }

    #[wasm_bindgen(js_name = mount_entrance)]
    pub fn mount_entrance(&mut self, region_id: u32, children: usize) -> Result<(), JsError> {
        self.core
            .mount_entrance(RegionId(region_id), children)
            .map_err(|e| js_err("mount_entrance", e))
    }

    /// Mount a marquee over `card_count` cards. Returns a MarqueeId (u32).
    #[wasm_bindgen(js_name = mount_marquee)]
    pub fn mount_marquee(
        &mut self,
        card_count: usize,
        cycle_duration_ms: Option<u32>,
    ) -> Result<u32, JsError> {
        let id = self
            .core
            .mount_marquee(card_count, cycle_duration_ms)
            .map_err(|e| js_err("mount_marquee", e))?;
        Ok(id.0)
    }

    /// Track `scrollY > threshold` (configured threshold when omitted). Returns a ScrollFlagId (u32).
    #[wasm_bindgen(js_name = mount_scroll_flag)]
    pub fn mount_scroll_flag(&mut self, threshold_px: Option<f64>) -> Result<u32, JsError> {
        let id = self
            .core
            .mount_scroll_flag(threshold_px)
            .map_err(|e| js_err("mount_scroll_flag", e))?;
        Ok(id.0)
    }

    #[wasm_bindgen(js_name = unmount_scroll_flag)]
    pub fn unmount_scroll_flag(&mut self, flag_id: u32) -> Result<(), JsError> {
        self.core
            .unmount_scroll_flag(ScrollFlagId(flag_id))
            .map_err(|e| js_err("unmount_scroll_flag", e))
    }

    #[wasm_bindgen(js_name = unmount_region)]
    pub fn unmount_region(&mut self, region_id: u32) -> Result<(), JsError> {
        self.core
            .unmount_region(RegionId(region_id))
            .map_err(|e| js_err("unmount_region", e))
    }

    #[wasm_bindgen(js_name = unmount_counter)]
    pub fn unmount_counter(&mut self, counter_id: u32) -> Result<(), JsError> {
        self.core
            .unmount_counter(CounterId(counter_id))
            .map_err(|e| js_err("unmount_counter", e))
    }

    #[wasm_bindgen(js_name = unmount_marquee)]
    pub fn unmount_marquee(&mut self, marquee_id: u32) -> Result<(), JsError> {
        self.core
            .unmount_marquee(MarqueeId(marquee_id))
            .map_err(|e| js_err("unmount_marquee", e))
    }

    /// Current text of a counter, or undefined once unmounted.
    #[wasm_bindgen(js_name = counter_text)]
    pub fn counter_text(&self, counter_id: u32) -> Option<String> {
        self.core.counter_text(CounterId(counter_id))
    }

    /// Step by dt (milliseconds) with inputs JSON. Returns Outputs JSON.
    #[wasm_bindgen]
    pub fn update(&mut self, dt_ms: f64, inputs_json: JsValue) -> Result<JsValue, JsError> {
        let inputs: Inputs = if jsvalue_is_undefined_or_null(&inputs_json) {
            Inputs::default()
        } else {
            swb::from_value(inputs_json).map_err(|e| js_err("inputs error", e))?
        };
        let out = self.core.update(dt_ms, inputs);
        swb::to_value(out).map_err(|e| js_err("outputs error", e))
    }
}

/// Parse a display string the way counters do: `{ target_value, suffix, rendered }`.
/// Targets above `Number.MAX_SAFE_INTEGER` degrade to text like any other unparseable value.
#[wasm_bindgen(js_name = parse_counter)]
pub fn parse_counter(display: String) -> Result<JsValue, JsError> {
    let spec = CounterSpec::parse(&display, 0);
    let parsed = ParsedCounter {
        target_value: spec.target_value,
        suffix: &spec.suffix,
        rendered: spec.render(spec.target_value),
    };
    swb::to_value(&parsed).map_err(|e| js_err("parse_counter", e))
}

/// Numeric ABI version for compatibility checks at init.
#[wasm_bindgen]
pub fn abi_version() -> u32 {
    1
}
