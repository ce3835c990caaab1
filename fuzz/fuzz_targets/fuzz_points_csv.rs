#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(dir) = std::env::temp_dir().canonicalize() else {
        return;
    };
    let path = dir.join(format!("tremor-fuzz-{}.csv", std::process::id()));
    if std::fs::write(&path, data).is_err() {
        return;
    }
    if let Ok(points) = tremor_config::load_points_csv(&path) {
        assert!(points.iter().all(|p| p.x.is_finite() && p.y.is_finite()));
    }
    let _ = std::fs::remove_file(&path);
});
