//! Version-string canonicalization.
//!
//! Raw version strings such as `"12.3.4.5"` are turned into short display
//! labels (`"12.3"`). Anything that does not look like a dotted numeric
//! version yields `None`, which the quality filter treats as "not a category".

use once_cell::sync::Lazy;
use regex::Regex;

// Two to four dotted integer components, optional leading "v"
static VERSION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[vV]?(\d+)\.(\d+)(?:\.(\d+))?(?:\.(\d+))?$").expect("Invalid regex: version")
});

/// Maps a raw version string to a display label.
///
/// Implementations must be deterministic and must return `None` for
/// unparseable input instead of failing.
pub trait VersionLabeler: Send + Sync {
    fn label(&self, raw_version: &str) -> Option<String>;
}

/// Labeler for dotted numeric versions that keeps the leading components.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DottedVersionLabeler {
    components: usize,
}

impl DottedVersionLabeler {
    /// Create a labeler keeping `components` leading parts (clamped to 1..=4).
    pub fn new(components: usize) -> Self {
        Self {
            components: components.clamp(1, 4),
        }
    }

    pub fn components(&self) -> usize {
        self.components
    }
}

impl Default for DottedVersionLabeler {
    fn default() -> Self {
        Self::new(2)
    }
}

impl VersionLabeler for DottedVersionLabeler {
    fn label(&self, raw_version: &str) -> Option<String> {
        let caps = VERSION_PATTERN.captures(raw_version.trim())?;

        let parts: Vec<u64> = caps
            .iter()
            .skip(1)
            .flatten()
            .map(|m| m.as_str().parse::<u64>())
            .collect::<Result<_, _>>()
            .ok()?;

        let label = parts
            .iter()
            .take(self.components)
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join(".");

        Some(label)
    }
}

/// Any `Fn(&str) -> Option<String>` can be used as a labeler.
impl<F> VersionLabeler for F
where
    F: Fn(&str) -> Option<String> + Send + Sync,
{
    fn label(&self, raw_version: &str) -> Option<String> {
        self(raw_version)
    }
}
