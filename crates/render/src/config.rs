use serde::{Deserialize, Serialize};

/// Styling and layout knobs for generated drawings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawingConfig {
    /// Margin added around each projected line set's view box.
    pub padding: f64,
    pub visible_stroke: String,
    pub visible_stroke_width: f64,
    pub hidden_stroke: String,
    pub hidden_stroke_width: f64,
    /// SVG `stroke-dasharray` for hidden lines.
    pub hidden_dash: String,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            padding: 1.0,
            visible_stroke: "#000000".into(),
            visible_stroke_width: 0.5,
            hidden_stroke: "#777777".into(),
            hidden_stroke_width: 0.25,
            hidden_dash: "3 1".into(),
        }
    }
}
