use std::path::Path;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::error::EditorError;
use crate::mods::ModId;

/// Look of the live box-selection rectangle drawn by the viewport overlay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionRectStyle {
    /// Fill colour, RGBA.
    pub fill: [f32; 4],
    /// Outline colour, RGBA.
    pub border: [f32; 4],
    /// Corner radius in pixels.
    pub rounding: f32,
    /// Outline thickness in pixels.
    pub thickness: f32,
}

impl Default for SelectionRectStyle {
    fn default() -> Self {
        Self {
            fill: [0.4, 0.4, 0.4, 0.4],
            border: [1.0, 1.0, 1.0, 1.0],
            rounding: 5.0,
            thickness: 2.0,
        }
    }
}

/// Editor settings, read from a TOML file.  Every field is optional.
///
/// ```toml
/// drag_threshold = 6.0
/// initial_mod = "Cursor"
/// picking_debug = true
///
/// [selection_rect]
/// rounding = 0.0
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Pixels the pointer must travel with the left button held before a
    /// click becomes a drag.
    pub drag_threshold: f32,
    /// Mode enabled by `Editor::init`.
    pub initial_mod: ModId,
    /// Keep the last pick ray and hit point around for visualisation.
    pub picking_debug: bool,
    pub log_level: String,
    /// Half extent of the editor ground grid in world units.
    pub grid_half_size: f32,
    pub selection_rect: SelectionRectStyle,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            drag_threshold: 4.0,
            initial_mod: ModId::Select,
            picking_debug: false,
            log_level: "info".to_string(),
            grid_half_size: 50.0,
            selection_rect: SelectionRectStyle::default(),
        }
    }
}

impl EditorConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, EditorError> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading editor config {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("parsing editor config {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_gives_defaults() {
        assert_eq!(EditorConfig::from_toml_str("").unwrap(), EditorConfig::default());
    }

    #[test]
    fn partial_document_overrides_fields() {
        let cfg = EditorConfig::from_toml_str(
            r#"
            drag_threshold = 6.5
            initial_mod = "Cursor"
            picking_debug = true

            [selection_rect]
            rounding = 0.0
            "#,
        )
        .unwrap();
        assert_eq!(cfg.drag_threshold, 6.5);
        assert_eq!(cfg.initial_mod, ModId::Cursor);
        assert!(cfg.picking_debug);
        assert_eq!(cfg.selection_rect.rounding, 0.0);
        assert_eq!(cfg.selection_rect.thickness, 2.0);
        assert_eq!(cfg.log_level, "info");
    }

    #[test]
    fn malformed_document_is_an_error() {
        let err = EditorConfig::from_toml_str("drag_threshold = \"far\"").unwrap_err();
        assert!(matches!(err, EditorError::Config(_)));
    }

    #[test]
    fn load_reports_missing_file() {
        let err = EditorConfig::load("/nonexistent/editor.toml").unwrap_err();
        assert!(err.to_string().contains("reading editor config"));
    }
}
