//! Logger configuration and partial reconfiguration

use super::level::LogLevel;
use super::transport::Transport;
use crate::format::Formatter;
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Logger configuration.
///
/// Defaults are environment-agnostic; [`LoggerConfig::development`] and
/// [`LoggerConfig::production`] supply environment-sensitive defaults at the
/// call site so the core never probes the environment itself.
#[derive(Clone)]
pub struct LoggerConfig {
    /// Minimum level; entries below it are suppressed before any work.
    pub min_level: LogLevel,
    /// Multi-line console blocks instead of single-line output.
    pub pretty: bool,
    /// Terminal colors on console output.
    pub colorize: bool,
    /// Keep the `stack` component of captured errors.
    pub include_stack: bool,
    /// Route entries to a durable file transport as well.
    pub file_enabled: bool,
    /// Target path for the file transport.
    pub file_path: Option<PathBuf>,
    /// 12-hour clock on console timestamps (files always use ISO 8601).
    pub use_12_hour_clock: bool,
    /// Per-level color overrides for console output.
    pub level_colors: HashMap<LogLevel, colored::Color>,
    /// Per-level icon overrides for console output.
    pub level_icons: HashMap<LogLevel, String>,
    /// Explicit formatter applied to every transport this config builds,
    /// in place of the pretty/line default selection.
    pub formatter: Option<Arc<dyn Formatter>>,
}

impl fmt::Debug for LoggerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerConfig")
            .field("min_level", &self.min_level)
            .field("pretty", &self.pretty)
            .field("colorize", &self.colorize)
            .field("include_stack", &self.include_stack)
            .field("file_enabled", &self.file_enabled)
            .field("file_path", &self.file_path)
            .field("use_12_hour_clock", &self.use_12_hour_clock)
            .field("level_colors", &self.level_colors)
            .field("level_icons", &self.level_icons)
            .field("formatter", &self.formatter.as_ref().map(|_| "<override>"))
            .finish()
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            min_level: LogLevel::Info,
            pretty: true,
            colorize: true,
            include_stack: false,
            file_enabled: false,
            file_path: None,
            use_12_hour_clock: false,
            level_colors: HashMap::new(),
            level_icons: HashMap::new(),
            formatter: None,
        }
    }
}

impl LoggerConfig {
    /// Verbose, colorized defaults for interactive development.
    pub fn development() -> Self {
        Self {
            min_level: LogLevel::Debug,
            include_stack: true,
            ..Self::default()
        }
    }

    /// Plain single-line defaults for production.
    pub fn production() -> Self {
        Self {
            pretty: false,
            colorize: false,
            ..Self::default()
        }
    }

    /// Console icon for a level, honoring overrides.
    pub fn icon_for(&self, level: LogLevel) -> String {
        self.level_icons
            .get(&level)
            .cloned()
            .unwrap_or_else(|| level.icon().to_string())
    }

    /// Console color for a level, honoring overrides.
    pub fn color_for(&self, level: LogLevel) -> colored::Color {
        self.level_colors
            .get(&level)
            .copied()
            .unwrap_or_else(|| level.color_code())
    }

    /// Merge a patch into this config.
    ///
    /// Returns `true` when an option affecting transport construction
    /// actually changed, meaning the transport set must be rebuilt.
    pub fn apply(&mut self, patch: &ConfigPatch) -> bool {
        if let Some(level) = patch.min_level {
            self.min_level = level;
        }
        if let Some(include_stack) = patch.include_stack {
            self.include_stack = include_stack;
        }

        let mut transports_affected = false;
        macro_rules! merge_transport_opt {
            ($field:ident) => {
                if let Some(value) = &patch.$field {
                    if self.$field != *value {
                        self.$field = value.clone();
                        transports_affected = true;
                    }
                }
            };
        }

        merge_transport_opt!(pretty);
        merge_transport_opt!(colorize);
        merge_transport_opt!(file_enabled);
        merge_transport_opt!(file_path);
        merge_transport_opt!(use_12_hour_clock);
        merge_transport_opt!(level_colors);
        merge_transport_opt!(level_icons);

        // Formatters compare by identity, not value
        if let Some(ref formatter) = patch.formatter {
            let changed = match (&self.formatter, formatter) {
                (None, None) => false,
                (Some(current), Some(new)) => !Arc::ptr_eq(current, new),
                _ => true,
            };
            if changed {
                self.formatter = formatter.clone();
                transports_affected = true;
            }
        }

        transports_affected
    }
}

/// Partial configuration for [`crate::core::Logger::configure`].
///
/// Every field is optional; `None` leaves the current value untouched, so an
/// empty patch is a no-op. An explicit `transports` list always replaces the
/// live transport set.
#[derive(Default)]
pub struct ConfigPatch {
    pub min_level: Option<LogLevel>,
    pub pretty: Option<bool>,
    pub colorize: Option<bool>,
    pub include_stack: Option<bool>,
    pub file_enabled: Option<bool>,
    pub file_path: Option<Option<PathBuf>>,
    pub use_12_hour_clock: Option<bool>,
    pub level_colors: Option<HashMap<LogLevel, colored::Color>>,
    pub level_icons: Option<HashMap<LogLevel, String>>,
    /// Explicit formatter override; `Some(None)` restores the defaults.
    pub formatter: Option<Option<Arc<dyn Formatter>>>,
    /// Explicit transport list replacing whatever the config would build.
    pub transports: Option<Vec<Box<dyn Transport>>>,
}

impl ConfigPatch {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.min_level = Some(level);
        self
    }

    #[must_use]
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = Some(pretty);
        self
    }

    #[must_use]
    pub fn colorize(mut self, colorize: bool) -> Self {
        self.colorize = Some(colorize);
        self
    }

    #[must_use]
    pub fn include_stack(mut self, include_stack: bool) -> Self {
        self.include_stack = Some(include_stack);
        self
    }

    #[must_use]
    pub fn file_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.file_enabled = Some(true);
        self.file_path = Some(Some(path.into()));
        self
    }

    #[must_use]
    pub fn no_file_output(mut self) -> Self {
        self.file_enabled = Some(false);
        self
    }

    #[must_use]
    pub fn use_12_hour_clock(mut self, use_12_hour: bool) -> Self {
        self.use_12_hour_clock = Some(use_12_hour);
        self
    }

    #[must_use]
    pub fn formatter(mut self, formatter: Arc<dyn Formatter>) -> Self {
        self.formatter = Some(Some(formatter));
        self
    }

    #[must_use]
    pub fn default_formatters(mut self) -> Self {
        self.formatter = Some(None);
        self
    }

    #[must_use]
    pub fn transports(mut self, transports: Vec<Box<dyn Transport>>) -> Self {
        self.transports = Some(transports);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_patch_is_noop() {
        let mut config = LoggerConfig::default();
        let before = format!("{:?}", config);

        let affected = config.apply(&ConfigPatch::default());

        assert!(!affected);
        assert_eq!(format!("{:?}", config), before);
    }

    #[test]
    fn test_level_change_does_not_touch_transports() {
        let mut config = LoggerConfig::default();
        let affected = config.apply(&ConfigPatch::new().min_level(LogLevel::Error));

        assert!(!affected);
        assert_eq!(config.min_level, LogLevel::Error);
    }

    #[test]
    fn test_file_change_touches_transports() {
        let mut config = LoggerConfig::default();
        let affected = config.apply(&ConfigPatch::new().file_output("/tmp/app.log"));

        assert!(affected);
        assert!(config.file_enabled);
        assert_eq!(config.file_path, Some(PathBuf::from("/tmp/app.log")));
    }

    #[test]
    fn test_same_value_does_not_report_change() {
        let mut config = LoggerConfig::default();
        let affected = config.apply(&ConfigPatch::new().pretty(config.pretty));
        assert!(!affected);
    }

    #[test]
    fn test_formatter_override_is_transport_affecting() {
        use crate::format::JsonFormatter;

        let mut config = LoggerConfig::default();
        let formatter: Arc<dyn Formatter> = Arc::new(JsonFormatter::new());

        assert!(config.apply(&ConfigPatch::new().formatter(Arc::clone(&formatter))));
        assert!(config.formatter.is_some());

        // The same instance again is not a change
        assert!(!config.apply(&ConfigPatch::new().formatter(formatter)));

        // Restoring the defaults is a change
        assert!(config.apply(&ConfigPatch::new().default_formatters()));
        assert!(config.formatter.is_none());
    }

    #[test]
    fn test_icon_and_color_overrides() {
        let mut config = LoggerConfig::default();
        config
            .level_icons
            .insert(LogLevel::Error, "💥".to_string());
        config
            .level_colors
            .insert(LogLevel::Info, colored::Color::Cyan);

        assert_eq!(config.icon_for(LogLevel::Error), "💥");
        assert_eq!(config.icon_for(LogLevel::Warn), LogLevel::Warn.icon());
        assert_eq!(config.color_for(LogLevel::Info), colored::Color::Cyan);
    }
}
