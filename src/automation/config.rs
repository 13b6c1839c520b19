//! Configuration types for the purchase loop.
//!
//! `ConfigDocument` mirrors config.json field for field so the calibration
//! tools can rewrite it without losing anything. `BotConfig` is the validated
//! view the purchase loop runs on; it is built once at startup.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::error::ConfigError;
use crate::ocr::extract::normalize_name;

/// Purchase button position used when `purchase_btn_location` is absent.
pub const DEFAULT_PURCHASE_BUTTON: NormalizedPoint = NormalizedPoint { x: 0.825, y: 0.86 };

pub const NAME_REGION_KEY: &str = "card_name_range";
pub const PRICE_REGION_KEY: &str = "card_price_range";

fn default_debug() -> bool {
    true
}

fn default_floating_percentage_range() -> f64 {
    0.1
}

fn default_want_buy() -> Value {
    Value::from(0)
}

/// Elements of a JSON array of numbers. `None` for any other shape.
fn numbers(value: &Value) -> Option<Vec<f64>> {
    value.as_array()?.iter().map(Value::as_f64).collect()
}

/// Acceptable names of a target: a single string or a list of strings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NameList {
    One(String),
    Many(Vec<String>),
}

impl Default for NameList {
    fn default() -> Self {
        NameList::One(String::new())
    }
}

impl NameList {
    pub fn names(&self) -> Vec<&str> {
        match self {
            NameList::One(name) => vec![name.as_str()],
            NameList::Many(names) => names.iter().map(String::as_str).collect(),
        }
    }
}

/// One entry of the `keys` array.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TargetEntry {
    #[serde(default)]
    pub name: NameList,
    #[serde(default = "default_floating_percentage_range")]
    pub floating_percentage_range: f64,
    #[serde(default)]
    pub ideal_price: f64,
    /// [x, y] as fractions of the screen size; kept raw so a malformed
    /// value only disables this card
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Value>,
    /// 1 (or true) = buy this card, anything else = ignore it
    #[serde(default = "default_want_buy")]
    pub want_buy: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for TargetEntry {
    fn default() -> Self {
        Self {
            name: NameList::default(),
            floating_percentage_range: default_floating_percentage_range(),
            ideal_price: 0.0,
            position: None,
            want_buy: default_want_buy(),
            extra: Map::new(),
        }
    }
}

impl TargetEntry {
    pub fn wants_buy(&self) -> bool {
        match &self.want_buy {
            Value::Bool(flag) => *flag,
            other => other.as_f64() == Some(1.0),
        }
    }
}

/// The config.json document as stored on disk.
///
/// Regions and points stay raw JSON values here; they are validated one by
/// one in `BotConfig::from_document`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConfigDocument {
    /// Dry-run: skip the confirming purchase click
    #[serde(default = "default_debug")]
    pub is_debug: bool,
    /// Keep purchased cards in the list and buy them again
    #[serde(default)]
    pub is_loop: bool,
    /// Card name region [x, y, width, height] in screen pixels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_name_range: Option<Value>,
    /// Card price region [x, y, width, height] in screen pixels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_price_range: Option<Value>,
    /// Purchase button [x, y] as fractions of the screen size
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_btn_location: Option<Value>,
    #[serde(default)]
    pub keys: Vec<TargetEntry>,
    /// Delay after opening a card before reading it (milliseconds)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub click_settle_ms: Option<u64>,
    /// Pause after each card before the next one (milliseconds)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_interval_ms: Option<u64>,
    /// Poll interval while stopped (milliseconds)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idle_poll_ms: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for ConfigDocument {
    fn default() -> Self {
        Self {
            is_debug: default_debug(),
            is_loop: false,
            card_name_range: None,
            card_price_range: None,
            purchase_btn_location: None,
            keys: Vec::new(),
            click_settle_ms: None,
            target_interval_ms: None,
            idle_poll_ms: None,
            extra: Map::new(),
        }
    }
}

impl ConfigDocument {
    /// Reads and parses the config file.
    ///
    /// A missing file, malformed JSON, and an empty object are all errors:
    /// the purchase loop never starts on an empty configuration.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let parse_error = |source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        };

        let value: Value = serde_json::from_str(&contents).map_err(parse_error)?;
        if value.as_object().is_some_and(Map::is_empty) {
            return Err(ConfigError::Empty(path.to_path_buf()));
        }
        serde_json::from_value(value).map_err(parse_error)
    }

    /// Loads the document for editing, starting from defaults when the file
    /// is missing or empty. Malformed JSON is still an error so it is never
    /// overwritten.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        match Self::load(path) {
            Ok(doc) => Ok(doc),
            Err(ConfigError::Empty(_)) => Ok(Self::default()),
            Err(ConfigError::Read { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                crate::log(&format!(
                    "Warning: {} not found, starting from defaults",
                    path.display()
                ));
                Ok(Self::default())
            }
            Err(e) => Err(e),
        }
    }

    /// Writes the document as pretty-printed JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, json + "\n")
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }
}

/// A rectangle in absolute screen pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScreenRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl ScreenRect {
    /// Parses `[x, y, width, height]`. Anything else, including an empty
    /// area, is rejected.
    pub fn from_values(values: &[i64]) -> Option<Self> {
        let [x, y, width, height] = values else {
            return None;
        };
        let rect = Self {
            x: i32::try_from(*x).ok()?,
            y: i32::try_from(*y).ok()?,
            width: u32::try_from(*width).ok()?,
            height: u32::try_from(*height).ok()?,
        };
        (rect.width > 0 && rect.height > 0).then_some(rect)
    }

    /// Parses a JSON `[x, y, width, height]`. Whole-valued floats such as
    /// `1410.0` are accepted; fractional pixels are not.
    pub fn from_json(value: &Value) -> Option<Self> {
        let values: Option<Vec<i64>> = numbers(value)?
            .into_iter()
            .map(|v| (v.is_finite() && v.fract() == 0.0).then_some(v as i64))
            .collect();
        Self::from_values(&values?)
    }

    pub fn to_values(self) -> Vec<i64> {
        vec![
            self.x as i64,
            self.y as i64,
            self.width as i64,
            self.height as i64,
        ]
    }
}

/// A point as fractions of the screen size (0.0 to 1.0 on both axes).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NormalizedPoint {
    pub x: f64,
    pub y: f64,
}

impl NormalizedPoint {
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let [x, y] = values else {
            return None;
        };
        let in_range = |v: f64| v.is_finite() && (0.0..=1.0).contains(&v);
        (in_range(*x) && in_range(*y)).then_some(Self { x: *x, y: *y })
    }

    pub fn from_json(value: &Value) -> Option<Self> {
        Self::from_values(&numbers(value)?)
    }

    /// Scales the point to absolute pixels for a screen of the given size.
    pub fn to_screen(self, screen_size: (u32, u32)) -> (i32, i32) {
        let x = self.x * screen_size.0 as f64;
        let y = self.y * screen_size.1 as f64;
        (x.round() as i32, y.round() as i32)
    }
}

/// One card the loop tries to buy.
#[derive(Clone, Debug, PartialEq)]
pub struct Target {
    /// Index of the entry in `keys`; stable identity across sweeps
    pub id: usize,
    /// Acceptable names with all whitespace removed
    pub names: Vec<String>,
    pub ideal_price: f64,
    pub floating_tolerance: f64,
    /// `None` when the configured position is missing or malformed
    pub position: Option<NormalizedPoint>,
    pub want_buy: bool,
}

impl Target {
    pub fn from_entry(id: usize, entry: &TargetEntry) -> Self {
        Self {
            id,
            names: entry
                .name
                .names()
                .into_iter()
                .map(normalize_name)
                .filter(|n| !n.is_empty())
                .collect(),
            ideal_price: entry.ideal_price,
            floating_tolerance: entry.floating_percentage_range,
            position: entry.position.as_ref().and_then(NormalizedPoint::from_json),
            want_buy: entry.wants_buy(),
        }
    }

    /// Human-readable name for logs.
    pub fn label(&self) -> String {
        if self.names.is_empty() {
            format!("#{}", self.id)
        } else {
            self.names.join("/")
        }
    }

    pub fn accepts_name(&self, observed: &str) -> bool {
        let observed = normalize_name(observed);
        self.names.iter().any(|name| *name == observed)
    }
}

/// Delays used by the purchase loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timing {
    pub click_settle: Duration,
    pub target_interval: Duration,
    pub idle_poll: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            click_settle: Duration::from_millis(100),
            target_interval: Duration::from_millis(100),
            idle_poll: Duration::from_millis(100),
        }
    }
}

/// Validated configuration for the purchase loop.
#[derive(Clone, Debug)]
pub struct BotConfig {
    pub debug: bool,
    pub loop_mode: bool,
    pub name_region: Option<ScreenRect>,
    pub price_region: Option<ScreenRect>,
    pub purchase_button: NormalizedPoint,
    pub targets: Vec<Target>,
    pub timing: Timing,
}

impl BotConfig {
    /// Builds the typed view. Invalid regions and positions are logged here and
    /// reported again when a cycle needs them.
    pub fn from_document(doc: &ConfigDocument) -> Self {
        let name_region = region_from(doc.card_name_range.as_ref(), NAME_REGION_KEY);
        let price_region = region_from(doc.card_price_range.as_ref(), PRICE_REGION_KEY);

        let purchase_button = match &doc.purchase_btn_location {
            None => DEFAULT_PURCHASE_BUTTON,
            Some(value) => NormalizedPoint::from_json(value).unwrap_or_else(|| {
                crate::log(&format!(
                    "Warning: purchase_btn_location {} is invalid, using ({}, {})",
                    value, DEFAULT_PURCHASE_BUTTON.x, DEFAULT_PURCHASE_BUTTON.y
                ));
                DEFAULT_PURCHASE_BUTTON
            }),
        };

        let targets: Vec<Target> = doc
            .keys
            .iter()
            .enumerate()
            .map(|(id, entry)| Target::from_entry(id, entry))
            .collect();
        for target in targets.iter().filter(|t| t.want_buy && t.position.is_none()) {
            crate::log(&format!(
                "Warning: card {} has no valid position and will be skipped",
                target.label()
            ));
        }

        let defaults = Timing::default();
        let millis_or = |value: Option<u64>, default: Duration| {
            value.map(Duration::from_millis).unwrap_or(default)
        };
        let timing = Timing {
            click_settle: millis_or(doc.click_settle_ms, defaults.click_settle),
            target_interval: millis_or(doc.target_interval_ms, defaults.target_interval),
            idle_poll: millis_or(doc.idle_poll_ms, defaults.idle_poll),
        };

        Self {
            debug: doc.is_debug,
            loop_mode: doc.is_loop,
            name_region,
            price_region,
            purchase_button,
            targets,
            timing,
        }
    }

    pub fn name_region(&self) -> Result<ScreenRect, ConfigError> {
        self.name_region.ok_or(ConfigError::InvalidRegion {
            key: NAME_REGION_KEY,
        })
    }

    pub fn price_region(&self) -> Result<ScreenRect, ConfigError> {
        self.price_region.ok_or(ConfigError::InvalidRegion {
            key: PRICE_REGION_KEY,
        })
    }

    /// Targets with `want_buy == 1`, in config order.
    pub fn active_targets(&self) -> Vec<Target> {
        self.targets.iter().filter(|t| t.want_buy).cloned().collect()
    }
}

fn region_from(value: Option<&Value>, key: &'static str) -> Option<ScreenRect> {
    let region = value.and_then(ScreenRect::from_json);
    if region.is_none() {
        crate::log(&format!(
            "Error: {}",
            ConfigError::InvalidRegion { key }
        ));
    }
    region
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    const SAMPLE: &str = r#"{
        "is_debug": false,
        "is_loop": true,
        "card_name_range": [100, 200, 300, 40],
        "card_price_range": [120, 260, 150, 30],
        "purchase_btn_location": [0.8, 0.9],
        "keys": [
            {"name": ["Red Key", "红 钥匙"], "floating_percentage_range": 0.2,
             "ideal_price": 1000, "position": [0.68912, 0.55191], "want_buy": 1},
            {"name": "Blue Key", "ideal_price": 500, "position": [0.1, 0.2], "want_buy": 0},
            {"name": "Green Key", "ideal_price": 700, "want_buy": 1, "note": "keep me"}
        ],
        "window_title": "game"
    }"#;

    fn write_config(contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn test_load_parses_all_fields() {
        let (_dir, path) = write_config(SAMPLE);
        let doc = ConfigDocument::load(&path).unwrap();

        assert!(!doc.is_debug);
        assert!(doc.is_loop);
        assert_eq!(doc.card_name_range, Some(json!([100, 200, 300, 40])));
        assert_eq!(doc.keys.len(), 3);
        assert_eq!(
            doc.keys[0].name,
            NameList::Many(vec!["Red Key".to_string(), "红 钥匙".to_string()])
        );
        assert_eq!(doc.keys[1].name, NameList::One("Blue Key".to_string()));
        assert_eq!(doc.keys[1].floating_percentage_range, 0.1);
        assert_eq!(doc.keys[2].extra.get("note"), Some(&Value::from("keep me")));
        assert_eq!(doc.extra.get("window_title"), Some(&Value::from("game")));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let err = ConfigDocument::load(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_load_malformed_json() {
        let (_dir, path) = write_config("{ \"is_debug\": tru");
        let err = ConfigDocument::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_load_empty_object() {
        let (_dir, path) = write_config("{}");
        let err = ConfigDocument::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Empty(_)));
    }

    #[test]
    fn test_load_or_default() {
        let dir = tempdir().unwrap();
        let doc = ConfigDocument::load_or_default(&dir.path().join("nope.json")).unwrap();
        assert_eq!(doc, ConfigDocument::default());

        let (_dir, path) = write_config("{}");
        assert_eq!(
            ConfigDocument::load_or_default(&path).unwrap(),
            ConfigDocument::default()
        );

        let (_dir, path) = write_config("[1, 2");
        assert!(ConfigDocument::load_or_default(&path).is_err());
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let (dir, path) = write_config(SAMPLE);
        let doc = ConfigDocument::load(&path).unwrap();

        let out = dir.path().join("nested").join("saved.json");
        doc.save(&out).unwrap();
        let reloaded = ConfigDocument::load(&out).unwrap();

        assert_eq!(reloaded, doc);
        let names: Vec<_> = reloaded.keys.iter().map(|k| k.name.names()[0]).collect();
        assert_eq!(names, vec!["Red Key", "Blue Key", "Green Key"]);

        let position = numbers(reloaded.keys[0].position.as_ref().unwrap()).unwrap();
        assert!((position[0] - 0.68912).abs() < 1e-9);
        assert!((position[1] - 0.55191).abs() < 1e-9);
        assert_eq!(reloaded.keys[1].want_buy, json!(0));
    }

    #[test]
    fn test_save_omits_unset_optional_fields() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        ConfigDocument::default().save(&path).unwrap();

        let saved = fs::read_to_string(&path).unwrap();
        assert!(!saved.contains("card_name_range"));
        assert!(!saved.contains("click_settle_ms"));
        assert!(saved.contains("\"keys\": []"));
    }

    #[test]
    fn test_bot_config_from_document() {
        let (_dir, path) = write_config(SAMPLE);
        let config = BotConfig::from_document(&ConfigDocument::load(&path).unwrap());

        assert!(!config.debug);
        assert!(config.loop_mode);
        assert_eq!(
            config.name_region,
            Some(ScreenRect { x: 100, y: 200, width: 300, height: 40 })
        );
        assert_eq!(config.purchase_button, NormalizedPoint { x: 0.8, y: 0.9 });
        assert_eq!(config.timing, Timing::default());

        let red = &config.targets[0];
        assert_eq!(red.names, vec!["RedKey".to_string(), "红钥匙".to_string()]);
        assert_eq!(red.floating_tolerance, 0.2);
        assert!(red.want_buy);
        assert!(red.accepts_name("红钥匙"));
        assert!(red.accepts_name(" Red Key "));
        assert!(!red.accepts_name("Red"));

        assert_eq!(config.targets[2].position, None);
    }

    #[test]
    fn test_active_targets_filters_want_buy_in_order() {
        let (_dir, path) = write_config(SAMPLE);
        let config = BotConfig::from_document(&ConfigDocument::load(&path).unwrap());

        let ids: Vec<usize> = config.active_targets().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![0, 2]);
    }

    #[test]
    fn test_defaults_when_fields_missing() {
        let doc: ConfigDocument = serde_json::from_str(r#"{"keys": [{"name": "A"}]}"#).unwrap();
        let config = BotConfig::from_document(&doc);

        assert!(config.debug);
        assert!(!config.loop_mode);
        assert_eq!(config.purchase_button, DEFAULT_PURCHASE_BUTTON);
        assert!(config.name_region().is_err());
        assert!(matches!(
            config.price_region(),
            Err(ConfigError::InvalidRegion { key: PRICE_REGION_KEY })
        ));
        assert!(!config.targets[0].want_buy);
    }

    #[test]
    fn test_malformed_position_only_disables_that_card() {
        let (_dir, path) = write_config(
            r#"{
                "card_name_range": [100, 200, 300, 40],
                "keys": [
                    {"name": "A", "ideal_price": 10, "position": [0.1, 0.2], "want_buy": 1},
                    {"name": "B", "ideal_price": 10, "position": "0.5,0.5", "want_buy": 1},
                    {"name": "C", "ideal_price": 10, "position": [0.3, "x"], "want_buy": 1}
                ]
            }"#,
        );
        let doc = ConfigDocument::load(&path).unwrap();
        assert_eq!(doc.keys[1].position, Some(json!("0.5,0.5")));

        let config = BotConfig::from_document(&doc);
        assert_eq!(
            config.targets[0].position,
            Some(NormalizedPoint { x: 0.1, y: 0.2 })
        );
        assert_eq!(config.targets[1].position, None);
        assert_eq!(config.targets[2].position, None);
        assert_eq!(config.active_targets().len(), 3);
    }

    #[test]
    fn test_regions_accept_whole_floats() {
        let doc: ConfigDocument = serde_json::from_str(
            r#"{"card_name_range": [1410.0, 180, 420, 48], "card_price_range": [1, 2.5, 3, 4]}"#,
        )
        .unwrap();
        let config = BotConfig::from_document(&doc);

        assert_eq!(
            config.name_region().unwrap(),
            ScreenRect { x: 1410, y: 180, width: 420, height: 48 }
        );
        assert!(config.price_region().is_err());
    }

    #[test]
    fn test_malformed_region_does_not_fail_load() {
        let (_dir, path) = write_config(
            r#"{"card_name_range": "100,200,300,40", "card_price_range": [120, 260, 150, 30]}"#,
        );
        let config = BotConfig::from_document(&ConfigDocument::load(&path).unwrap());

        assert!(config.name_region().is_err());
        assert!(config.price_region().is_ok());
    }

    #[test]
    fn test_want_buy_forms() {
        let doc: ConfigDocument = serde_json::from_str(
            r#"{"keys": [
                {"name": "A", "want_buy": true},
                {"name": "B", "want_buy": 1.0},
                {"name": "C", "want_buy": false},
                {"name": "D", "want_buy": 2},
                {"name": "E", "want_buy": "1"},
                {"name": "F"}
            ]}"#,
        )
        .unwrap();
        let flags: Vec<bool> = BotConfig::from_document(&doc)
            .targets
            .iter()
            .map(|t| t.want_buy)
            .collect();
        assert_eq!(flags, vec![true, true, false, false, false, false]);
    }

    #[test]
    fn test_invalid_purchase_button_falls_back() {
        let doc: ConfigDocument =
            serde_json::from_str(r#"{"purchase_btn_location": [0.5], "keys": []}"#).unwrap();
        assert_eq!(
            BotConfig::from_document(&doc).purchase_button,
            DEFAULT_PURCHASE_BUTTON
        );
    }

    #[test]
    fn test_timing_overrides() {
        let doc: ConfigDocument =
            serde_json::from_str(r#"{"click_settle_ms": 250, "idle_poll_ms": 0}"#).unwrap();
        let timing = BotConfig::from_document(&doc).timing;
        assert_eq!(timing.click_settle, Duration::from_millis(250));
        assert_eq!(timing.target_interval, Duration::from_millis(100));
        assert_eq!(timing.idle_poll, Duration::ZERO);
    }

    #[test]
    fn test_screen_rect_from_values() {
        assert_eq!(
            ScreenRect::from_values(&[1, 2, 3, 4]),
            Some(ScreenRect { x: 1, y: 2, width: 3, height: 4 })
        );
        assert_eq!(ScreenRect::from_values(&[1, 2, 3]), None);
        assert_eq!(ScreenRect::from_values(&[1, 2, 3, 4, 5]), None);
        assert_eq!(ScreenRect::from_values(&[1, 2, 0, 4]), None);
        assert_eq!(ScreenRect::from_values(&[1, 2, -3, 4]), None);
        assert_eq!(ScreenRect::from_json(&json!([1, 2, 3, "4"])), None);
        assert_eq!(ScreenRect::from_json(&json!({"x": 1})), None);
    }

    #[test]
    fn test_normalized_point() {
        assert_eq!(NormalizedPoint::from_values(&[0.5]), None);
        assert_eq!(NormalizedPoint::from_values(&[1.5, 0.5]), None);
        assert_eq!(NormalizedPoint::from_values(&[f64::NAN, 0.5]), None);

        assert_eq!(NormalizedPoint::from_json(&json!("0.5,0.5")), None);
        assert_eq!(
            NormalizedPoint::from_json(&json!([0, 1])),
            Some(NormalizedPoint { x: 0.0, y: 1.0 })
        );

        let point = NormalizedPoint::from_values(&[0.825, 0.86]).unwrap();
        assert_eq!(point.to_screen((1920, 1080)), (1584, 929));
    }
}
