use anyhow::Result;

use dial_clock::config::FontSources;
use dial_clock::{ClockApp, ClockConfig};
use dial_engine::device::GpuInit;
use dial_engine::logging::{init_logging, LoggingConfig};
use dial_engine::window::Runtime;

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = ClockConfig::new()
        .title("Dial")
        .size(800.0, 800.0)
        .fonts(FontSources::from_env());

    let app = ClockApp::new(&config);
    Runtime::run(config.runtime_config(), GpuInit::default(), app)
}
