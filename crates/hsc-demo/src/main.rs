use anyhow::Result;
use hsc_engine::device::NativeInit;
use hsc_engine::logging::{init_logging, LoggingConfig};
use hsc_engine::window::{Runtime, RuntimeConfig};

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    log::info!("starting HelloSurfaceControl demo");
    Runtime::run(RuntimeConfig::default(), NativeInit::default())
}
