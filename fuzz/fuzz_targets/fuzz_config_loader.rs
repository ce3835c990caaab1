#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // Parse and validation errors are fine; panics are not.
    if let Ok(cfg) = tremor_config::load_toml(data) {
        if cfg.validate().is_ok() {
            // A valid config must also have a usable tap window.
            assert!(cfg.tap.fatigue_min_taps >= 2 * cfg.tap.fatigue_window);
            assert!(cfg.trace.target_y <= cfg.trace.surface_height);
        }
    }
});
