//! `ClassyConfig`: the knobs a `classy` run can be tuned with. There is no
//! target-language-version axis the way a real-world compiler config would
//! have one — `classy` has no backend — so this stays small.

use classy_common::ReportStyle;

/// Configuration for one `compile()` run.
#[derive(Clone, Copy, Debug)]
pub struct ClassyConfig {
    /// Recursion guard for the generator/elaborator's expression walk,
    /// mirroring `classy_common::limits::MAX_RECURSION_DEPTH`. Exposed
    /// here so a CLI run can override it for a pathological input
    /// without rebuilding the crate.
    pub max_recursion_depth: usize,
    /// How diagnostics are rendered: human-readable text or JSON, the
    /// latter driven by `ClassyError`'s `Serialize` derive.
    pub report_style: ReportStyle,
}

impl Default for ClassyConfig {
    fn default() -> Self {
        ClassyConfig { max_recursion_depth: classy_common::limits::MAX_RECURSION_DEPTH, report_style: ReportStyle::Plain }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_uses_the_shared_recursion_limit() {
        let config = ClassyConfig::default();
        assert_eq!(config.max_recursion_depth, classy_common::limits::MAX_RECURSION_DEPTH);
        assert_eq!(config.report_style, ReportStyle::Plain);
    }
}
