use simplelog::{ Config, LevelFilter, TestLogger };

/// Routes `log` output through the test harness. Safe to call from every test.
pub(crate) fn init_logging() {
    // a second init in the same process returns Err, which is fine
    let _ = TestLogger::init(LevelFilter::Trace, Config::default());
}
