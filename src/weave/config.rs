//! Configuration for the weaving engine.

/// Configuration for the weaving engine.
///
/// The host build pipeline resolves its own opt-out mechanism (a build-time
/// symbol, an environment switch, whatever it exposes) into the [`enabled`]
/// flag before invoking the engine; the engine itself never inspects build
/// configuration directly.
///
/// [`enabled`]: WeaveConfig::enabled
#[derive(Debug, Clone)]
pub struct WeaveConfig {
    /// Run the pass at all (default: true). When false, [`crate::weave::Weaver::run`]
    /// returns immediately without touching the module or the observers.
    pub enabled: bool,
}

impl Default for WeaveConfig {
    fn default() -> Self {
        WeaveConfig { enabled: true }
    }
}

impl WeaveConfig {
    /// A configuration with the pass switched off.
    #[must_use]
    pub fn disabled() -> Self {
        WeaveConfig { enabled: false }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert!(WeaveConfig::default().enabled);
        assert!(!WeaveConfig::disabled().enabled);
    }
}
