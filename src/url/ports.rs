//! Default ports of well-known URI schemes.
//!
//! The process-wide table is loaded once, on first lookup, from the bundled
//! `resources/default-ports.properties` or from the file named by the
//! `URLKIT_DEFAULT_PORTS` environment variable.

use std::collections::HashMap;
use std::ffi::OsStr;
use std::sync::OnceLock;

use tracing::{debug, warn};

/// Environment variable naming a properties file that replaces the bundled table.
pub const DEFAULT_PORTS_ENV: &str = "URLKIT_DEFAULT_PORTS";

const BUNDLED: &str = include_str!("../../resources/default-ports.properties");

static GLOBAL: OnceLock<DefaultPorts> = OnceLock::new();

/// An immutable scheme to port table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DefaultPorts {
    ports: HashMap<String, u16>,
}

impl DefaultPorts {
    /// The process-wide table, loaded on first use.
    pub fn global() -> &'static DefaultPorts {
        GLOBAL.get_or_init(Self::load)
    }

    /// The table shipped with the crate.
    pub fn bundled() -> DefaultPorts {
        Self::from_properties(BUNDLED)
    }

    /// Parse `scheme=port` lines. Blank lines and lines starting with `#` or
    /// `!` are ignored; malformed lines are skipped with a warning.
    pub fn from_properties(text: &str) -> DefaultPorts {
        let mut ports = HashMap::new();
        for (number, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                continue;
            }
            let parsed = line
                .split_once(['=', ':'])
                .and_then(|(scheme, port)| Some((scheme.trim(), port.trim().parse::<u16>().ok()?)))
                .filter(|(scheme, _)| !scheme.is_empty());
            match parsed {
                Some((scheme, port)) => {
                    ports.insert(scheme.to_string(), port);
                }
                None => warn!(line = number + 1, content = line, "skipping malformed default port entry"),
            }
        }
        DefaultPorts { ports }
    }

    /// Port for `scheme`, or `None` for an empty or unknown scheme.
    /// Lookup is case-sensitive.
    pub fn get(&self, scheme: &str) -> Option<u16> {
        if scheme.is_empty() {
            return None;
        }
        self.ports.get(scheme).copied()
    }

    /// Number of schemes in the table.
    pub fn len(&self) -> usize {
        self.ports.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.ports.is_empty()
    }

    fn load() -> DefaultPorts {
        Self::load_from(std::env::var_os(DEFAULT_PORTS_ENV).as_deref())
    }

    /// Read the table from `path`, falling back to the bundled one when no
    /// path is given or the file cannot be read.
    fn load_from(path: Option<&OsStr>) -> DefaultPorts {
        if let Some(path) = path {
            match std::fs::read_to_string(path) {
                Ok(text) => {
                    let table = Self::from_properties(&text);
                    debug!(path = %path.to_string_lossy(), entries = table.len(), "loaded default ports override");
                    return table;
                }
                Err(err) => warn!(
                    path = %path.to_string_lossy(),
                    error = %err,
                    "cannot read default ports override, using bundled table"
                ),
            }
        }
        let table = Self::bundled();
        debug!(entries = table.len(), "loaded bundled default ports");
        table
    }
}

/// Conventional port of `scheme` from the process-wide table.
///
/// # Examples
///
/// ```
/// use urlkit::default_port;
///
/// assert_eq!(default_port("http"), Some(80));
/// assert_eq!(default_port("https"), Some(443));
/// assert_eq!(default_port(""), None);
/// assert_eq!(default_port("HTTP"), None);
/// ```
pub fn default_port(scheme: &str) -> Option<u16> {
    DefaultPorts::global().get(scheme)
}
