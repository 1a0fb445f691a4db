/// How `on_surface_lost` treats a surface with no bound control.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum LostPolicy {
    /// Report a protocol violation.
    #[default]
    Strict,
    /// Log and return `Ok(())`. For hosts that repeat teardown notifications.
    Lenient,
}

/// Bridge configuration.
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    pub lost_policy: LostPolicy,

    /// Name handed to the native layer for every control it creates.
    pub debug_name: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            lost_policy: LostPolicy::Strict,
            debug_name: "HelloSurfaceControl".to_string(),
        }
    }
}
