mod context_test;
mod stream_test;

use std::sync::Once;

// Initialize logger only once for all tests in this crate
static LOGGER_INIT: Once = Once::new();

pub(crate) fn setup_logger() {
    LOGGER_INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}
