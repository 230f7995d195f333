//! Export configuration.
//!
//! Every layout constant lives here rather than in module statics, so an
//! export sees only what its [`ExportContext`](crate::ExportContext) carries.
//! All structs deserialize with per-field defaults: a config file only needs
//! the values it overrides.
//!
//! ```
//! use deck_export::ExportConfig;
//!
//! let config = ExportConfig::from_json(r#"{ "rows": { "max_scale": 1.2 } }"#).unwrap();
//! assert_eq!(config.rows.max_scale, 1.2);
//! assert_eq!(config.rows.card_width, 110.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::card::{Category, EditionId, Race};
use crate::color::Color;
use crate::error::ConfigError;

/// Pixel dimensions of a canvas.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl CanvasSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Top-level export configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Wide (horizontal) canvas.
    pub wide: CanvasSize,
    /// Square (vertical) canvas.
    pub square: CanvasSize,
    /// Background template reference.
    pub background: String,
    pub header: HeaderConfig,
    pub rows: RowConfig,
    pub grid: GridConfig,
    pub icons: IconSet,
    pub ally_rule: AllyIconRule,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            wide: CanvasSize::new(1920, 1080),
            square: CanvasSize::new(1080, 1080),
            background: "backgrounds/deck-export.png".to_string(),
            header: HeaderConfig::default(),
            rows: RowConfig::default(),
            grid: GridConfig::default(),
            icons: IconSet::default(),
            ally_rule: AllyIconRule::default(),
        }
    }
}

impl ExportConfig {
    /// Parse and validate a JSON config; missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the layout engines cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(field: &'static str, reason: &'static str) -> Result<(), ConfigError> {
            Err(ConfigError::InvalidValue { field, reason })
        }

        for (field, size) in [("wide", self.wide), ("square", self.square)] {
            if size.width == 0 || size.height == 0 {
                return invalid(field, "dimensions must be non-zero");
            }
        }
        if self.background.is_empty() {
            return invalid("background", "must not be empty");
        }
        if !(self.header.chip_height > 0.0) {
            return invalid("header.chip_height", "must be positive");
        }
        if !(0.0..=1.0).contains(&self.header.icon_fraction) {
            return invalid("header.icon_fraction", "must be within 0..=1");
        }
        if !(self.rows.card_width > 0.0 && self.rows.card_height > 0.0) {
            return invalid("rows.card_width/card_height", "must be positive");
        }
        if !(self.rows.max_scale >= 1.0) {
            return invalid("rows.max_scale", "must be at least 1");
        }
        if !(self.grid.aspect > 0.0) {
            return invalid("grid.aspect", "must be positive");
        }
        if self.grid.gap < 0.0 || self.rows.gap_x < 0.0 || self.rows.gap_y < 0.0 {
            return invalid("gap", "must not be negative");
        }
        for (field, t) in [
            ("ally_rule.edition_threshold", self.ally_rule.edition_threshold),
            ("ally_rule.race_threshold", self.ally_rule.race_threshold),
        ] {
            if !(0.0..=1.0).contains(&t) {
                return invalid(field, "must be within 0..=1");
            }
        }
        Ok(())
    }
}

/// Title and chip row geometry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderConfig {
    /// Left edge of the title.
    pub title_x: f32,
    /// Top edge of the title line box.
    pub title_y: f32,
    pub title_size: f32,
    pub title_color: Color,
    /// Left edge of the first chip.
    pub chip_x: f32,
    pub chip_top: f32,
    pub chip_height: f32,
    /// Space between adjacent chips.
    pub chip_gap: f32,
    /// Horizontal padding on each side inside a chip.
    pub chip_padding: f32,
    /// Space between the text column and the icon box.
    pub chip_inner_gap: f32,
    pub icon_box: f32,
    /// Icon size as a fraction of `icon_box`.
    pub icon_fraction: f32,
    pub label_size: f32,
    /// Smaller than `label_size`.
    pub count_size: f32,
    pub chip_color: Color,
    pub label_color: Color,
    pub count_color: Color,
    /// Space between the chip row and `layout_top`.
    pub bottom_margin: f32,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            title_x: 60.0,
            title_y: 40.0,
            title_size: 56.0,
            title_color: Color::white(),
            chip_x: 60.0,
            chip_top: 128.0,
            chip_height: 64.0,
            chip_gap: 16.0,
            chip_padding: 20.0,
            chip_inner_gap: 12.0,
            icon_box: 44.0,
            icon_fraction: 0.8,
            label_size: 20.0,
            count_size: 16.0,
            chip_color: Color::rgba(16, 16, 24, 0xcc),
            label_color: Color::white(),
            count_color: Color::rgb(0xf2, 0xc9, 0x4c),
            bottom_margin: 28.0,
        }
    }
}

/// Row-packing geometry, in unscaled pixels.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RowConfig {
    pub card_width: f32,
    pub card_height: f32,
    pub gap_x: f32,
    pub gap_y: f32,
    /// Horizontal offset between copies in a stack.
    pub stack_offset: f32,
    pub margin_left: f32,
    pub margin_right: f32,
    /// Vertical gap before each category block.
    pub category_gap: f32,
    pub bottom_margin: f32,
    /// Upper bound of the fill scale.
    pub max_scale: f32,
}

impl Default for RowConfig {
    fn default() -> Self {
        Self {
            card_width: 110.0,
            card_height: 154.0,
            gap_x: 12.0,
            gap_y: 16.0,
            stack_offset: 22.0,
            margin_left: 60.0,
            margin_right: 60.0,
            category_gap: 10.0,
            bottom_margin: 40.0,
            max_scale: 1.4,
        }
    }
}

/// Square-grid geometry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub gap: f32,
    /// Horizontal margin on each side of the available area.
    pub margin_x: f32,
    pub bottom_margin: f32,
    /// Cell height as a multiple of cell width.
    pub aspect: f32,
    pub badge_radius: f32,
    /// Distance from the cell top to the top of the badge.
    pub badge_inset: f32,
    pub badge_fill: Color,
    pub badge_text_size: f32,
    pub badge_text_color: Color,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            gap: 10.0,
            margin_x: 40.0,
            bottom_margin: 40.0,
            aspect: 1.5,
            badge_radius: 22.0,
            badge_inset: 6.0,
            badge_fill: Color::rgba(0, 0, 0, 0x99),
            badge_text_size: 24.0,
            badge_text_color: Color::white(),
        }
    }
}

/// Icon references for header chips.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IconSet {
    pub ally_generic: String,
    /// Used when the themed edition dominates the allies.
    pub ally_edition: String,
    pub races: RaceIcons,
    pub weapon: String,
    pub talisman: String,
    pub totem: String,
    pub gold: String,
}

impl Default for IconSet {
    fn default() -> Self {
        Self {
            ally_generic: "icons/ally.png".to_string(),
            ally_edition: "icons/ally-edition.png".to_string(),
            races: RaceIcons::default(),
            weapon: "icons/weapon.png".to_string(),
            talisman: "icons/talisman.png".to_string(),
            totem: "icons/totem.png".to_string(),
            gold: "icons/gold.png".to_string(),
        }
    }
}

impl IconSet {
    /// Static icon for a category. Ally chips use
    /// [`AllyIcon::reference`](crate::AllyIcon::reference) instead.
    pub fn category(&self, category: Category) -> &str {
        match category {
            Category::Ally => &self.ally_generic,
            Category::Weapon => &self.weapon,
            Category::Talisman => &self.talisman,
            Category::Totem => &self.totem,
            Category::Gold => &self.gold,
        }
    }
}

/// One icon reference per [`Race`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RaceIcons {
    pub knight: String,
    pub dragon: String,
    pub faerie: String,
    pub hero: String,
    pub olympian: String,
    pub titan: String,
    pub defender: String,
    pub challenger: String,
    pub shadow: String,
    pub eternal: String,
    pub pharaoh: String,
    pub sphinx: String,
}

impl Default for RaceIcons {
    fn default() -> Self {
        let icon = |name: &str| format!("icons/race/{name}.png");
        Self {
            knight: icon("knight"),
            dragon: icon("dragon"),
            faerie: icon("faerie"),
            hero: icon("hero"),
            olympian: icon("olympian"),
            titan: icon("titan"),
            defender: icon("defender"),
            challenger: icon("challenger"),
            shadow: icon("shadow"),
            eternal: icon("eternal"),
            pharaoh: icon("pharaoh"),
            sphinx: icon("sphinx"),
        }
    }
}

impl RaceIcons {
    pub fn get(&self, race: Race) -> &str {
        match race {
            Race::Knight => &self.knight,
            Race::Dragon => &self.dragon,
            Race::Faerie => &self.faerie,
            Race::Hero => &self.hero,
            Race::Olympian => &self.olympian,
            Race::Titan => &self.titan,
            Race::Defender => &self.defender,
            Race::Challenger => &self.challenger,
            Race::Shadow => &self.shadow,
            Race::Eternal => &self.eternal,
            Race::Pharaoh => &self.pharaoh,
            Race::Sphinx => &self.sphinx,
        }
    }
}

/// Thresholds for picking the Ally chip icon.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllyIconRule {
    /// Themed edition; `None` disables the edition check.
    pub edition: Option<EditionId>,
    /// Edition share that must be exceeded (strictly).
    pub edition_threshold: f32,
    /// Race share that must be exceeded (strictly).
    pub race_threshold: f32,
}

impl Default for AllyIconRule {
    fn default() -> Self {
        Self {
            edition: None,
            edition_threshold: 0.30,
            race_threshold: 0.40,
        }
    }
}
