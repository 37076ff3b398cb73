//! Browser console logging.
//!
//! Call [`init`] once, before mounting. Events from the `tracing` macros land
//! in the developer tools console, filtered by the level from `?log=`.

use tracing_wasm::WASMLayerConfigBuilder;

use crate::config::EditorConfig;

pub fn init(config: &EditorConfig) {
    console_error_panic_hook::set_once();

    let layer_config = WASMLayerConfigBuilder::new()
        .set_max_level(config.log_level)
        .set_report_logs_in_timings(false)
        .build();
    tracing_wasm::set_as_global_default_with_config(layer_config);
}
