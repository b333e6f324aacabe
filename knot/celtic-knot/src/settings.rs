//! Saving and loading knot parameters as named properties.
//!
//! A knot writes its parameters to any [`SettingsSink`] as typed scalars
//! grouped in nested sections, and accepts them back one property at a
//! time through [`CelticKnot::load_property`]. [`TomlSettings`] stores
//! them as a TOML document.

use std::fs;
use std::path::Path;

use knot_topology::Orientation;
use toml::{Table, Value};
use tracing::{debug, warn};

use crate::config::Dimension;
use crate::error::KnotResult;
use crate::knot::CelticKnot;

/// Section holding the grid parameters.
pub const CELTIC_SECTION: &str = "celtic";

/// Section, nested in [`CELTIC_SECTION`], holding the rendering parameters.
pub const RENDER_SECTION: &str = "render";

/// Receiver of named scalar properties in nested sections.
pub trait SettingsSink {
    /// Open a section inside the current one.
    fn section_start(&mut self, name: &str);

    /// Close the innermost open section.
    fn section_end(&mut self, name: &str);

    /// Write an integer property.
    fn write_int(&mut self, name: &str, value: i64);

    /// Write a floating-point property.
    fn write_float(&mut self, name: &str, value: f64);

    /// Write a boolean property.
    fn write_bool(&mut self, name: &str, value: bool);
}

/// A loaded property value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SettingValue {
    /// Integer.
    Int(i64),
    /// Floating point.
    Float(f64),
    /// Boolean.
    Bool(bool),
}

impl SettingValue {
    /// The value as an integer. Floats are not converted.
    #[must_use]
    pub fn as_int(self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(value),
            Self::Float(_) | Self::Bool(_) => None,
        }
    }

    /// The value as a float. Integers are widened.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_float(self) -> Option<f64> {
        match self {
            Self::Int(value) => Some(value as f64),
            Self::Float(value) => Some(value),
            Self::Bool(_) => None,
        }
    }

    /// The value as a boolean. Integers are true when non-zero.
    #[must_use]
    pub fn as_bool(self) -> Option<bool> {
        match self {
            Self::Int(value) => Some(value != 0),
            Self::Bool(value) => Some(value),
            Self::Float(_) => None,
        }
    }

    fn as_count(self) -> Option<usize> {
        self.as_int().and_then(|value| usize::try_from(value).ok())
    }

    fn as_seed(self) -> Option<u32> {
        self.as_int().and_then(|value| u32::try_from(value).ok())
    }
}

impl From<i64> for SettingValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for SettingValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for SettingValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

fn count(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

impl CelticKnot {
    /// Write every persistent parameter to `sink`.
    ///
    /// Grid parameters go to a `celtic` section and rendering parameters
    /// to a `render` section nested inside it. Depth and the z tile size
    /// are only written for cubic knots.
    pub fn save_settings<S: SettingsSink + ?Sized>(&self, sink: &mut S) {
        let config = self.config();
        let cubic = config.dimension == Dimension::Cubic;

        sink.section_start(CELTIC_SECTION);
        sink.write_int("Seed", i64::from(config.seed));
        sink.write_int("Width", count(config.width));
        sink.write_int("Height", count(config.height));
        if cubic {
            sink.write_int("Depth", count(config.depth));
        }
        sink.write_float("TileSizeX", config.tile_size[0]);
        sink.write_float("TileSizeY", config.tile_size[1]);
        if cubic {
            sink.write_float("TileSizeZ", config.tile_size[2]);
        }
        sink.write_float("Weirdness", f64::from(config.weirdness));
        sink.write_int("Orientation", config.orientation.code());
        sink.write_bool("Symmetrical", config.symmetrify);

        sink.section_start(RENDER_SECTION);
        sink.write_int("ColourSeed", i64::from(config.colour_seed));
        sink.write_float("LineInsetX", config.inset[0]);
        sink.write_float("LineInsetY", config.inset[1]);
        sink.write_float("LineInsetZ", config.inset[2]);
        sink.write_float("Thickness", config.thickness);
        sink.write_float("WeaveHeight", config.weave_height);
        sink.write_int("AccuracyLongitudinal", count(config.accuracy_longitudinal));
        sink.write_int("AccuracyRadial", count(config.accuracy_radial));
        sink.section_end(RENDER_SECTION);

        sink.section_end(CELTIC_SECTION);
    }

    /// Apply one saved property.
    ///
    /// Section and property names match case-insensitively. Returns
    /// whether the property was recognised with a usable value; unknown
    /// names and unusable values are logged and ignored.
    #[allow(clippy::cast_possible_truncation)]
    pub fn load_property(&mut self, section: &str, name: &str, value: SettingValue) -> bool {
        let key = name.to_ascii_lowercase();
        let applied = if section.eq_ignore_ascii_case(CELTIC_SECTION) {
            match key.as_str() {
                "seed" => value.as_seed().map(|v| self.set_seed(v)),
                "width" => value.as_count().map(|v| self.set_width(v)),
                "height" => value.as_count().map(|v| self.set_height(v)),
                "depth" => value.as_count().map(|v| self.set_depth(v)),
                "tilesizex" => value.as_float().map(|v| self.set_tile_size_x(v)),
                "tilesizey" => value.as_float().map(|v| self.set_tile_size_y(v)),
                "tilesizez" => value.as_float().map(|v| self.set_tile_size_z(v)),
                "weirdness" => value.as_float().map(|v| self.set_weirdness(v as f32)),
                "orientation" => value
                    .as_int()
                    .and_then(Orientation::from_code)
                    .map(|v| self.set_orientation(v)),
                "symmetrical" => value.as_bool().map(|v| self.set_symmetrify(v)),
                _ => return unknown(section, name),
            }
        } else if section.eq_ignore_ascii_case(RENDER_SECTION) {
            match key.as_str() {
                "colourseed" => value.as_seed().map(|v| self.set_colour_seed(v)),
                "lineinsetx" => value.as_float().map(|v| self.set_inset_x(v)),
                "lineinsety" => value.as_float().map(|v| self.set_inset_y(v)),
                "lineinsetz" => value.as_float().map(|v| self.set_inset_z(v)),
                "thickness" => value.as_float().map(|v| self.set_thickness(v)),
                "weaveheight" => value.as_float().map(|v| self.set_weave_height(v)),
                "accuracylongitudinal" => value
                    .as_count()
                    .map(|v| self.set_accuracy_longitudinal(v)),
                "accuracyradial" => value.as_count().map(|v| self.set_accuracy_radial(v)),
                _ => return unknown(section, name),
            }
        } else {
            return unknown(section, name);
        };

        if applied.is_none() {
            warn!(section, name, ?value, "ignored setting with unusable value");
        }
        applied.is_some()
    }
}

fn unknown(section: &str, name: &str) -> bool {
    warn!(section, name, "ignored unknown setting");
    false
}

/// Settings stored as a TOML document.
///
/// As a [`SettingsSink`] it collects properties into tables, one per
/// section. Loading walks a document and hands every scalar to
/// [`CelticKnot::load_property`] with the name of its enclosing table.
///
/// # Examples
///
/// ```
/// use celtic_knot::{CelticKnot, Dimension, TomlSettings};
///
/// let mut knot = CelticKnot::new(Dimension::Flat);
/// knot.set_seed(12);
///
/// let mut settings = TomlSettings::new();
/// knot.save_settings(&mut settings);
/// let text = settings.to_toml_string()?;
/// assert!(text.contains("[celtic.render]"));
///
/// let mut copy = CelticKnot::new(Dimension::Flat);
/// TomlSettings::apply_str(&text, &mut copy)?;
/// assert_eq!(copy.seed(), 12);
/// # Ok::<(), celtic_knot::KnotError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TomlSettings {
    root: Table,
    open: Vec<(String, Table)>,
}

impl TomlSettings {
    /// An empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The collected document. Sections still open are not included.
    #[must_use]
    pub fn table(&self) -> &Table {
        &self.root
    }

    /// Render the collected document as TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be serialized.
    pub fn to_toml_string(&self) -> KnotResult<String> {
        Ok(toml::to_string(&self.root)?)
    }

    /// Write the collected document to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if serializing or writing fails.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> KnotResult<()> {
        fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }

    /// Apply every property of a TOML document to `knot`. Returns the
    /// number of properties accepted.
    ///
    /// # Errors
    ///
    /// Returns an error if `text` is not valid TOML.
    pub fn apply_str(text: &str, knot: &mut CelticKnot) -> KnotResult<usize> {
        let table: Table = toml::from_str(text)?;
        let applied = apply_table("", &table, knot);
        debug!(applied, "loaded knot settings");
        Ok(applied)
    }

    /// Apply every property of the TOML file at `path` to `knot`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML.
    pub fn load<P: AsRef<Path>>(path: P, knot: &mut CelticKnot) -> KnotResult<usize> {
        let text = fs::read_to_string(path)?;
        Self::apply_str(&text, knot)
    }

    fn current(&mut self) -> &mut Table {
        match self.open.last_mut() {
            Some((_, table)) => table,
            None => &mut self.root,
        }
    }
}

fn apply_table(section: &str, table: &Table, knot: &mut CelticKnot) -> usize {
    let mut applied = 0;
    for (name, value) in table {
        let setting = match value {
            Value::Table(inner) => {
                applied += apply_table(name, inner, knot);
                continue;
            }
            Value::Integer(v) => SettingValue::Int(*v),
            Value::Float(v) => SettingValue::Float(*v),
            Value::Boolean(v) => SettingValue::Bool(*v),
            other => {
                warn!(section, name = name.as_str(), kind = other.type_str(), "ignored setting of unsupported type");
                continue;
            }
        };
        if knot.load_property(section, name, setting) {
            applied += 1;
        }
    }
    applied
}

impl SettingsSink for TomlSettings {
    fn section_start(&mut self, name: &str) {
        self.open.push((name.to_owned(), Table::new()));
    }

    fn section_end(&mut self, name: &str) {
        let Some((open, table)) = self.open.pop() else {
            warn!(section = name, "closed a section that was never opened");
            return;
        };
        if open != name {
            warn!(expected = open.as_str(), found = name, "mismatched section end");
        }
        self.current().insert(open, Value::Table(table));
    }

    fn write_int(&mut self, name: &str, value: i64) {
        self.current().insert(name.to_owned(), Value::Integer(value));
    }

    fn write_float(&mut self, name: &str, value: f64) {
        self.current().insert(name.to_owned(), Value::Float(value));
    }

    fn write_bool(&mut self, name: &str, value: bool) {
        self.current().insert(name.to_owned(), Value::Boolean(value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        lines: Vec<String>,
    }

    impl SettingsSink for Recorder {
        fn section_start(&mut self, name: &str) {
            self.lines.push(format!("[{name}"));
        }

        fn section_end(&mut self, name: &str) {
            self.lines.push(format!("{name}]"));
        }

        fn write_int(&mut self, name: &str, value: i64) {
            self.lines.push(format!("{name}={value}"));
        }

        fn write_float(&mut self, name: &str, value: f64) {
            self.lines.push(format!("{name}={value}"));
        }

        fn write_bool(&mut self, name: &str, value: bool) {
            self.lines.push(format!("{name}={value}"));
        }
    }

    fn recorded(knot: &CelticKnot) -> Vec<String> {
        let mut recorder = Recorder::default();
        knot.save_settings(&mut recorder);
        recorder.lines
    }

    #[test]
    fn flat_knots_skip_depth() {
        let lines = recorded(&CelticKnot::new(Dimension::Flat));
        assert_eq!(lines.first().map(String::as_str), Some("[celtic"));
        assert_eq!(lines.last().map(String::as_str), Some("celtic]"));
        assert!(lines.contains(&"Orientation=1".to_owned()));
        assert!(lines.contains(&"[render".to_owned()));
        assert!(!lines.iter().any(|l| l.starts_with("Depth")));
        assert!(!lines.iter().any(|l| l.starts_with("TileSizeZ")));
    }

    #[test]
    fn cubic_knots_write_depth() {
        let lines = recorded(&CelticKnot::new(Dimension::Cubic));
        assert!(lines.contains(&"Depth=3".to_owned()));
        assert!(lines.contains(&"TileSizeZ=3".to_owned()));
    }

    #[test]
    fn names_match_case_insensitively() {
        let mut knot = CelticKnot::new(Dimension::Flat);
        assert!(knot.load_property("CELTIC", "width", SettingValue::Int(7)));
        assert!(knot.load_property("Render", "THICKNESS", SettingValue::Float(0.4)));
        assert_eq!(knot.width(), 7);
        assert_eq!(knot.thickness(), 0.4);
    }

    #[test]
    fn unknown_and_unusable_properties_are_ignored() {
        let mut knot = CelticKnot::new(Dimension::Flat);
        assert!(!knot.load_property("celtic", "Colour", SettingValue::Int(1)));
        assert!(!knot.load_property("lighting", "Seed", SettingValue::Int(1)));
        assert!(!knot.load_property("celtic", "Seed", SettingValue::Int(-4)));
        assert!(!knot.load_property("celtic", "Orientation", SettingValue::Int(9)));
        assert_eq!(knot.seed(), 0);
    }

    #[test]
    fn toml_round_trip() {
        let mut knot = CelticKnot::new(Dimension::Cubic);
        knot.set_seed(31);
        knot.set_depth(5);
        knot.set_tile_size_z(2.5);
        knot.set_weave_height(0.45);
        knot.set_accuracy_radial(7);

        let mut settings = TomlSettings::new();
        knot.save_settings(&mut settings);
        let text = settings.to_toml_string().expect("serialize");

        let mut copy = CelticKnot::new(Dimension::Cubic);
        let applied = TomlSettings::apply_str(&text, &mut copy).expect("parse");
        assert_eq!(applied, 18);
        assert_eq!(copy.config(), knot.config());
    }

    #[test]
    fn integer_tile_sizes_are_accepted() {
        let mut knot = CelticKnot::new(Dimension::Flat);
        let text = "[celtic]\nTileSizeX = 4\nNotes = \"hello\"\n";
        let applied = TomlSettings::apply_str(text, &mut knot).expect("parse");
        assert_eq!(applied, 1);
        assert_eq!(knot.tile_size_x(), 4.0);
    }

    #[test]
    fn malformed_documents_are_errors() {
        let mut knot = CelticKnot::new(Dimension::Flat);
        assert!(TomlSettings::apply_str("[celtic\nSeed = 1", &mut knot).is_err());
    }
}
