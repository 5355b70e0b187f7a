//! Conversion options with documented defaults
//!
//! Every knob the movelist engine reads lives here. Options are built from
//! defaults, optionally overlaid by a TOML file, and finally by CLI flags.

use crate::core::error::Result;
use regex::Regex;
use serde::Deserialize;
use std::path::Path;
use std::sync::OnceLock;

/// Header color used when none is given
pub const DEFAULT_HEADER_COLOR: &str = "f0f000";

/// Power-suffix color used when none is given
pub const DEFAULT_POWER_COLOR: &str = "bebebe";

/// Substituted for any color that fails validation
pub const FALLBACK_COLOR: &str = "ff00ff";

/// Frame window assumed for a command without a `time` key
pub const DEFAULT_COMMAND_TIME: i32 = 15;

/// How button tokens are rendered in the movelist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonScheme {
    /// `^A ^B ^C ^X ^Y ^Z` (plus `^S ^D ^W`)
    #[default]
    Letters,
    /// `^LP ^MP ^HP` for x/y/z and `^LK ^MK ^HK` for a/b/c
    Strike,
}

/// Configuration for a single conversion
///
/// The conversion is a pure function of the source text and these values.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ConvertOptions {
    /// Keep entries whose merged command is a single token and that have no
    /// power gate
    ///
    /// These are usually plain normals (a lone `x`) and clutter the list,
    /// so they are dropped unless this is set.
    pub keep_single_button: bool,

    /// Keep commands the classifier marks as automation-only
    pub keep_ai: bool,

    /// Collapse motions (quarter circles, half circles, dashes...) to one glyph
    pub compress_motions: bool,

    /// Button rendering scheme
    pub buttons: ButtonScheme,

    /// Hex color for the section headers (validated at render time)
    pub header_color: String,

    /// Hex color for the `(power)` suffix on hyper moves
    pub power_color: String,

    /// Frame window for commands without `time`, unless `[Defaults]`
    /// declares `command.time`
    pub default_command_time: i32,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            keep_single_button: false,
            keep_ai: false,
            compress_motions: true,
            buttons: ButtonScheme::Letters,
            header_color: DEFAULT_HEADER_COLOR.to_string(),
            power_color: DEFAULT_POWER_COLOR.to_string(),
            default_command_time: DEFAULT_COMMAND_TIME,
        }
    }
}

impl ConvertOptions {
    /// Create options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse options from TOML text; missing keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load options from a TOML file on disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}

fn color_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^([0-9a-f]{3}|[0-9a-f]{6})$").expect("color pattern is a valid regex")
    })
}

/// Returns `color` if it is 3 or 6 lowercase hex digits, otherwise the fallback magenta
pub fn validated_color(color: &str) -> &str {
    if color_pattern().is_match(color) {
        color
    } else {
        tracing::warn!("Invalid color {:?}, using {}", color, FALLBACK_COLOR);
        FALLBACK_COLOR
    }
}
