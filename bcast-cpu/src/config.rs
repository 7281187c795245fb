use bcast_core::layout::Layout;
#[cfg(feature = "std")]
use bcast_core::error::BcastError;
#[cfg(feature = "std")]
use nanoserde::DeJson;
#[cfg(feature = "std")]
use std::path::PathBuf;

/// Executor configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Debug mask, bit 0 config, bit 1 plans, bit 2 execution
    pub debug: u32,
    /// Outputs with at least this many elements are computed in parallel
    pub parallel_threshold: usize,
    /// Layout used by operator arguments that do not set order
    pub default_layout: Layout,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            debug: 0,
            parallel_threshold: 32768,
            default_layout: Layout::NCHW,
        }
    }
}

#[cfg(feature = "std")]
#[derive(DeJson, Debug, Default)]
struct ConfigFile {
    #[nserde(default)]
    debug: Option<u32>,
    #[nserde(default)]
    parallel_threshold: Option<usize>,
    #[nserde(default)]
    default_layout: Option<String>,
}

impl Config {
    pub(crate) const fn debug_config(&self) -> bool {
        self.debug % 2 == 1
    }

    pub(crate) const fn debug_plan(&self) -> bool {
        (self.debug >> 1) % 2 == 1
    }

    pub(crate) const fn debug_exec(&self) -> bool {
        (self.debug >> 2) % 2 == 1
    }

    /// Load configuration.
    ///
    /// Searches config directories for bcast/config.json, then applies
    /// `BCAST_DEBUG` and `BCAST_PAR_THRESHOLD` environment variables.
    /// Anything that fails to load or parse is left at its default.
    #[cfg(feature = "std")]
    #[must_use]
    pub fn load() -> Self {
        let env = |name: &str| std::env::var(name).ok();
        // Env debug mask decides whether loading itself is reported
        let debug = Self::default().apply_env(env).debug_config();
        let dirs = xdg::BaseDirectories::new()
            .map_err(|e| {
                if debug {
                    println!("Failed to find config directories for bcast/config.json, {e}");
                }
            })
            .ok()
            .map(|bd| {
                let mut dirs = bd.get_config_dirs();
                dirs.push(bd.get_config_home());
                dirs
            })
            .unwrap_or_default();
        Self::from_dirs(dirs, debug).apply_env(env)
    }

    /// Read bcast/config.json from the first of `dirs` that contains it.
    /// Defaults are used if there is no such file or if it does not parse.
    #[cfg(feature = "std")]
    fn from_dirs(dirs: impl IntoIterator<Item = PathBuf>, debug: bool) -> Self {
        dirs.into_iter()
            .find_map(|mut path| {
                path.push("bcast/config.json");
                std::fs::read_to_string(&path).ok()
            })
            .and_then(|file| {
                Self::from_json(&file)
                    .map_err(|e| {
                        if debug {
                            println!("Failed to parse bcast/config.json, {e}");
                        }
                    })
                    .ok()
            })
            .inspect(|_| {
                if debug {
                    println!("Config successfully read and parsed.");
                }
            })
            .unwrap_or_else(|| {
                if debug {
                    println!("Failed to get config, using defaults.");
                }
                Self::default()
            })
    }

    /// Parse configuration from json, missing fields keep their defaults
    #[cfg(feature = "std")]
    pub fn from_json(json: &str) -> Result<Self, BcastError> {
        let file = ConfigFile::deserialize_json(json)
            .map_err(|e| BcastError::ParseError(format!("{e}").into()))?;
        let mut config = Self::default();
        if let Some(debug) = file.debug {
            config.debug = debug;
        }
        if let Some(threshold) = file.parallel_threshold {
            config.parallel_threshold = threshold;
        }
        if let Some(layout) = file.default_layout {
            config.default_layout = layout.parse()?;
        }
        Ok(config)
    }

    /// Override fields with environment variables, `var` looks up variable by name.
    /// Values that do not parse are ignored.
    #[cfg(feature = "std")]
    #[must_use]
    pub fn apply_env(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(x) = var("BCAST_DEBUG").and_then(|x| x.parse().ok()) {
            self.debug = x;
        }
        if let Some(x) = var("BCAST_PAR_THRESHOLD").and_then(|x| x.parse().ok()) {
            self.parallel_threshold = x;
        }
        self
    }
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::Config;
    use bcast_core::error::BcastError;
    use bcast_core::layout::Layout;

    #[test]
    fn json() -> Result<(), BcastError> {
        let config = Config::from_json(r#"{"parallel_threshold": 16, "default_layout": "NHWC"}"#)?;
        assert_eq!(config.parallel_threshold, 16);
        assert_eq!(config.default_layout, Layout::NHWC);
        assert_eq!(config.debug, 0);
        assert!(matches!(
            Config::from_json(r#"{"default_layout": "HWCN"}"#),
            Err(BcastError::UnknownLayout(_))
        ));
        assert!(matches!(
            Config::from_json("{debug: "),
            Err(BcastError::ParseError(_))
        ));
        Ok(())
    }

    #[test]
    fn env_overrides() {
        let var = |name: &str| match name {
            "BCAST_DEBUG" => Some(String::from("6")),
            "BCAST_PAR_THRESHOLD" => Some(String::from("many")),
            _ => None,
        };
        let config = Config::default().apply_env(var);
        assert_eq!(config.debug, 6);
        assert!(!config.debug_config());
        assert!(config.debug_plan());
        assert!(config.debug_exec());
        assert_eq!(config.parallel_threshold, Config::default().parallel_threshold);
    }

    #[test]
    fn config_file() -> std::io::Result<()> {
        let root = std::env::temp_dir().join(format!("bcast-config-{}", std::process::id()));
        let (bad, good) = (root.join("bad"), root.join("good"));
        std::fs::create_dir_all(bad.join("bcast"))?;
        std::fs::create_dir_all(good.join("bcast"))?;
        std::fs::write(bad.join("bcast/config.json"), "{\"debug\": ")?;
        std::fs::write(
            good.join("bcast/config.json"),
            r#"{"debug": 2, "default_layout": "NHWC"}"#,
        )?;
        // Directories without the file are skipped
        let config = Config::from_dirs([root.join("missing"), good.clone()], false);
        assert_eq!(
            config,
            Config {
                debug: 2,
                default_layout: Layout::NHWC,
                ..Config::default()
            }
        );
        // First file found is used, if it does not parse defaults are used
        assert_eq!(Config::from_dirs([bad, good], false), Config::default());
        assert_eq!(Config::from_dirs(Vec::new(), false), Config::default());
        std::fs::remove_dir_all(root)
    }
}
