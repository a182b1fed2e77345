use serde::{Deserialize, Serialize};

use crate::controller::{FieldLegendOptions, LegendOptions, TooltipOptions};
use crate::core::{CoordOptions, Padding, ScaleOptions, Size};
use crate::error::{ChartError, ChartResult};
use crate::plot::DEFAULT_AUTO_PADDING_APPEND;
use crate::render::BackgroundStyle;
use crate::view::{AxesOptions, ViewOptions};

/// Root options shared into views, plus the overlay settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartOptions {
    #[serde(default)]
    pub scales: ScaleOptions,
    #[serde(default)]
    pub coord: CoordOptions,
    #[serde(default)]
    pub axes: AxesOptions,
    /// `None` hides every legend.
    #[serde(default = "default_legend")]
    pub legend: Option<LegendOptions>,
    /// `None` disables tooltips.
    #[serde(default = "default_tooltip")]
    pub tooltip: Option<TooltipOptions>,
}

fn default_legend() -> Option<LegendOptions> {
    Some(LegendOptions::default())
}

fn default_tooltip() -> Option<TooltipOptions> {
    Some(TooltipOptions::default())
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            scales: ScaleOptions::new(),
            coord: CoordOptions::default(),
            axes: AxesOptions::default(),
            legend: default_legend(),
            tooltip: default_tooltip(),
        }
    }
}

impl ChartOptions {
    pub(super) fn view_options(&self) -> ViewOptions {
        ViewOptions {
            scales: self.scales.clone(),
            coord: self.coord,
            axes: self.axes,
        }
    }
}

/// Argument of `Chart::legend`.
#[derive(Debug, Clone, PartialEq)]
pub enum LegendSetting {
    Hide,
    Show(LegendOptions),
    /// Per-field options; `None` hides that field's legend.
    Field {
        field: String,
        config: Option<FieldLegendOptions>,
    },
}

/// Argument of `Chart::tooltip`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TooltipSetting {
    Hide,
    Show(TooltipOptions),
}

/// Public chart bootstrap configuration.
///
/// Serializable so host applications can persist and load chart setup
/// without inventing their own format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(default)]
    pub container: Option<String>,
    /// Used as the container when `container` is unset.
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default = "default_width")]
    pub width: f64,
    #[serde(default = "default_height")]
    pub height: f64,
    #[serde(default)]
    pub pixel_ratio: Option<f64>,
    /// Tracks the container width at init and on debounced window resizes.
    #[serde(default)]
    pub force_fit: bool,
    #[serde(default)]
    pub padding: Padding,
    #[serde(default)]
    pub background: BackgroundStyle,
    #[serde(default)]
    pub plot_background: BackgroundStyle,
    #[serde(default = "default_auto_padding_append")]
    pub auto_padding_append: f64,
    /// Largest per-edge change treated as "same padding" after measurement.
    #[serde(default = "default_padding_tolerance")]
    pub padding_tolerance: f64,
    #[serde(default = "default_resize_debounce_ms")]
    pub resize_debounce_ms: u64,
    #[serde(default)]
    pub options: ChartOptions,
}

fn default_width() -> f64 {
    500.0
}

fn default_height() -> f64 {
    500.0
}

fn default_auto_padding_append() -> f64 {
    DEFAULT_AUTO_PADDING_APPEND
}

fn default_padding_tolerance() -> f64 {
    0.5
}

fn default_resize_debounce_ms() -> u64 {
    200
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            container: None,
            id: None,
            width: default_width(),
            height: default_height(),
            pixel_ratio: None,
            force_fit: false,
            padding: Padding::default(),
            background: BackgroundStyle::default(),
            plot_background: BackgroundStyle::default(),
            auto_padding_append: default_auto_padding_append(),
            padding_tolerance: default_padding_tolerance(),
            resize_debounce_ms: default_resize_debounce_ms(),
            options: ChartOptions::default(),
        }
    }
}

impl ChartConfig {
    /// Minimal config mounting into `container`.
    #[must_use]
    pub fn new(container: impl Into<String>) -> Self {
        Self {
            container: Some(container.into()),
            ..Self::default()
        }
    }

    /// Parses a JSON document; missing fields take their defaults.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse chart config json: {e}")))
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize chart config: {e}")))
    }

    #[must_use]
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    #[must_use]
    pub fn with_pixel_ratio(mut self, pixel_ratio: f64) -> Self {
        self.pixel_ratio = Some(pixel_ratio);
        self
    }

    #[must_use]
    pub fn with_force_fit(mut self, force_fit: bool) -> Self {
        self.force_fit = force_fit;
        self
    }

    #[must_use]
    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    #[must_use]
    pub fn with_background(mut self, background: BackgroundStyle) -> Self {
        self.background = background;
        self
    }

    #[must_use]
    pub fn with_plot_background(mut self, plot_background: BackgroundStyle) -> Self {
        self.plot_background = plot_background;
        self
    }

    #[must_use]
    pub fn with_auto_padding_append(mut self, margin: f64) -> Self {
        self.auto_padding_append = margin;
        self
    }

    #[must_use]
    pub fn with_padding_tolerance(mut self, tolerance: f64) -> Self {
        self.padding_tolerance = tolerance;
        self
    }

    #[must_use]
    pub fn with_resize_debounce_ms(mut self, delay_ms: u64) -> Self {
        self.resize_debounce_ms = delay_ms;
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: ChartOptions) -> Self {
        self.options = options;
        self
    }

    /// Container reference, falling back to the legacy `id`.
    pub fn resolve_container(&self) -> ChartResult<&str> {
        self.container
            .as_deref()
            .or(self.id.as_deref())
            .filter(|name| !name.is_empty())
            .ok_or(ChartError::MissingContainer)
    }

    #[must_use]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub(super) fn validate(&self) -> ChartResult<()> {
        self.size().validate()?;
        if let Some(ratio) = self.pixel_ratio {
            if !ratio.is_finite() || ratio <= 0.0 {
                return Err(ChartError::InvalidData(
                    "pixel ratio must be finite and > 0".to_owned(),
                ));
            }
        }
        if !self.padding_tolerance.is_finite() || self.padding_tolerance < 0.0 {
            return Err(ChartError::InvalidData(
                "padding tolerance must be finite and >= 0".to_owned(),
            ));
        }
        for background in [self.background, self.plot_background] {
            background.fill.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::ChartConfig;
    use crate::core::{Padding, PaddingEdge};
    use crate::error::ChartError;

    #[test]
    fn json_defaults_fill_missing_fields() {
        let config = ChartConfig::from_json_str(r#"{"id": "mount", "padding": "auto"}"#)
            .expect("valid json");
        assert_eq!(config.resolve_container().expect("id fallback"), "mount");
        assert_eq!(config.padding, Padding::auto());
        assert_eq!(config.width, 500.0);
        assert_eq!(config.resize_debounce_ms, 200);
        assert!(config.options.legend.is_some());
    }

    #[test]
    fn json_padding_uses_shorthand() {
        let config = ChartConfig::from_json_str(r#"{"padding": [10, "auto"]}"#).expect("valid");
        assert_eq!(
            config.padding.edges(),
            [
                PaddingEdge::Fixed(10.0),
                PaddingEdge::AUTO,
                PaddingEdge::Fixed(10.0),
                PaddingEdge::AUTO,
            ]
        );
    }

    #[test]
    fn malformed_json_is_invalid_data() {
        assert!(matches!(
            ChartConfig::from_json_str("{\"width\": \"wide\"}"),
            Err(ChartError::InvalidData(_))
        ));
        assert!(matches!(
            ChartConfig::default().resolve_container(),
            Err(ChartError::MissingContainer)
        ));
    }
}
