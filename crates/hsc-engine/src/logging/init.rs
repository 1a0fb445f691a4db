use std::sync::Once;

/// wgpu's internal crates, chatty at `info` during every surface configure.
const GPU_TARGETS: &[&str] = &["wgpu_core", "wgpu_hal", "naga"];

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// `env_logger` directives; wins over `RUST_LOG` when set.
    pub filter: Option<String>,

    /// Used when neither `filter` nor `RUST_LOG` says anything.
    pub default_level: log::LevelFilter,

    /// Caps the GPU stack at `warn` unless the filter names its crates.
    pub quiet_gpu: bool,

    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: None,
            default_level: log::LevelFilter::Info,
            quiet_gpu: true,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

static INIT: Once = Once::new();

/// Installs `env_logger` behind the `log` facade, once per process.
///
/// Call it before `init_native` so adapter selection is logged. Returns
/// `false` when a logger was already installed, by this function or by
/// someone else.
pub fn init_logging(config: LoggingConfig) -> bool {
    let mut installed = false;

    INIT.call_once(|| {
        let env = std::env::var("RUST_LOG").ok();
        let spec = filter_spec(&config, env.as_deref());

        let mut builder = env_logger::Builder::new();
        builder.parse_filters(&spec);
        builder.write_style(config.write_style);

        installed = builder.try_init().is_ok();
        if installed {
            log::debug!("logging initialized ({spec})");
        }
    });

    installed
}

/// Resolves the directive string handed to `env_logger`.
fn filter_spec(config: &LoggingConfig, env: Option<&str>) -> String {
    let mut spec = config
        .filter
        .as_deref()
        .or(env)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| config.default_level.as_str().to_ascii_lowercase());

    if config.quiet_gpu {
        for target in GPU_TARGETS {
            if !names_target(&spec, target) {
                spec.push_str(&format!(",{target}=warn"));
            }
        }
    }

    spec
}

fn names_target(spec: &str, target: &str) -> bool {
    spec.split(',')
        .filter_map(|directive| directive.split('=').next())
        .any(|module| module.trim() == target)
}
