use std::fmt;

use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

const DEFAULT_TICK_COUNT: usize = 5;

/// One value of a scale domain.
///
/// Values are totally ordered so value sets can be compared as sorted
/// multisets regardless of insertion order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScaleValue {
    Number(OrderedFloat<f64>),
    Text(String),
}

impl ScaleValue {
    #[must_use]
    pub fn number(value: f64) -> Self {
        Self::Number(OrderedFloat(value))
    }

    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(value.into_inner()),
            Self::Text(_) => None,
        }
    }

    /// Converts a JSON record value; objects, arrays and null have no scale value.
    #[must_use]
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Number(number) => number.as_f64().map(Self::number),
            serde_json::Value::String(text) => Some(Self::Text(text.clone())),
            serde_json::Value::Bool(flag) => Some(Self::Text(flag.to_string())),
            _ => None,
        }
    }
}

impl From<&str> for ScaleValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<f64> for ScaleValue {
    fn from(value: f64) -> Self {
        Self::number(value)
    }
}

impl fmt::Display for ScaleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => {
                let value = value.into_inner();
                if value.fract() == 0.0 && value.abs() < 1e15 {
                    write!(f, "{value:.0}")
                } else {
                    let text = format!("{value:.2}");
                    f.write_str(text.trim_end_matches('0').trim_end_matches('.'))
                }
            }
            Self::Text(text) => f.write_str(text),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleKind {
    Linear,
    Category,
    /// Constant visual value; never data-driven and never legend-eligible.
    Identity,
}

/// Mapping from a data field's domain to the normalized `0..=1` range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scale {
    #[serde(default)]
    pub field: Option<String>,
    pub kind: ScaleKind,
    #[serde(default)]
    pub values: Vec<ScaleValue>,
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default)]
    pub tick_count: Option<usize>,
}

impl Scale {
    #[must_use]
    pub fn linear(field: impl Into<String>, min: f64, max: f64) -> Self {
        Self {
            field: Some(field.into()),
            kind: ScaleKind::Linear,
            values: Vec::new(),
            min: Some(min),
            max: Some(max),
            alias: None,
            tick_count: None,
        }
    }

    #[must_use]
    pub fn category<V: Into<ScaleValue>>(
        field: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        Self {
            field: Some(field.into()),
            kind: ScaleKind::Category,
            values: values.into_iter().map(Into::into).collect(),
            min: None,
            max: None,
            alias: None,
            tick_count: None,
        }
    }

    #[must_use]
    pub fn identity(value: impl Into<ScaleValue>) -> Self {
        Self {
            field: None,
            kind: ScaleKind::Identity,
            values: vec![value.into()],
            min: None,
            max: None,
            alias: None,
            tick_count: None,
        }
    }

    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    #[must_use]
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    /// Display title: alias when set, field name otherwise.
    #[must_use]
    pub fn title(&self) -> &str {
        self.alias
            .as_deref()
            .or(self.field.as_deref())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn is_legend_eligible(&self) -> bool {
        self.field.as_deref().is_some_and(|field| !field.is_empty())
            && self.kind != ScaleKind::Identity
    }

    fn numeric_domain(&self) -> Option<(f64, f64)> {
        let min = self.min.or_else(|| {
            self.values
                .iter()
                .filter_map(ScaleValue::as_f64)
                .reduce(f64::min)
        })?;
        let max = self.max.or_else(|| {
            self.values
                .iter()
                .filter_map(ScaleValue::as_f64)
                .reduce(f64::max)
        })?;
        Some((min, max))
    }

    /// Maps a domain value into `0..=1`; `None` when the value is not in the domain.
    #[must_use]
    pub fn normalize(&self, value: &ScaleValue) -> Option<f64> {
        match self.kind {
            ScaleKind::Linear => {
                let raw = value.as_f64()?;
                let (min, max) = self.numeric_domain()?;
                let span = max - min;
                if !span.is_finite() || span == 0.0 {
                    return Some(0.5);
                }
                Some((raw - min) / span)
            }
            ScaleKind::Category => {
                let index = self.values.iter().position(|candidate| candidate == value)?;
                Some((index as f64 + 0.5) / self.values.len() as f64)
            }
            ScaleKind::Identity => Some(0.5),
        }
    }

    /// Tick values used by axis guides.
    #[must_use]
    pub fn ticks(&self) -> Vec<ScaleValue> {
        match self.kind {
            ScaleKind::Category => self.values.clone(),
            ScaleKind::Identity => Vec::new(),
            ScaleKind::Linear => {
                let Some((min, max)) = self.numeric_domain() else {
                    return Vec::new();
                };
                let count = self.tick_count.unwrap_or(DEFAULT_TICK_COUNT).max(2);
                if min == max {
                    return vec![ScaleValue::number(min)];
                }
                let step = (max - min) / (count - 1) as f64;
                (0..count)
                    .map(|index| ScaleValue::number(min + step * index as f64))
                    .collect()
            }
        }
    }

    /// Domain values in scale order (categories, or the numeric ticks).
    #[must_use]
    pub fn domain_values(&self) -> Vec<ScaleValue> {
        match self.kind {
            ScaleKind::Category | ScaleKind::Identity => self.values.clone(),
            ScaleKind::Linear => {
                if self.values.is_empty() {
                    self.ticks()
                } else {
                    self.values.clone()
                }
            }
        }
    }

    /// Applies a per-field override when it targets this scale's field.
    pub fn apply_option(&mut self, options: &ScaleOptions) {
        let Some(option) = self.field.as_deref().and_then(|field| options.get(field)) else {
            return;
        };
        if let Some(alias) = &option.alias {
            self.alias = Some(alias.clone());
        }
        if let Some(values) = &option.values {
            self.values = values.clone();
        }
        if option.min.is_some() {
            self.min = option.min;
        }
        if option.max.is_some() {
            self.max = option.max;
        }
        if option.tick_count.is_some() {
            self.tick_count = option.tick_count;
        }
    }
}

/// Per-field scale override carried in view options.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScaleOption {
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default)]
    pub values: Option<Vec<ScaleValue>>,
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
    #[serde(default)]
    pub tick_count: Option<usize>,
}

pub type ScaleOptions = IndexMap<String, ScaleOption>;

#[cfg(test)]
mod tests {
    use super::{Scale, ScaleKind, ScaleOption, ScaleOptions, ScaleValue};

    #[test]
    fn scale_kinds_parse_from_lowercase_names() {
        let kinds: Vec<ScaleKind> =
            serde_json::from_str(r#"["linear", "category", "identity"]"#).expect("known kinds");
        assert_eq!(
            kinds,
            vec![ScaleKind::Linear, ScaleKind::Category, ScaleKind::Identity]
        );
        assert!(serde_json::from_str::<ScaleKind>(r#""time""#).is_err());
    }

    #[test]
    fn category_normalizes_to_band_centers() {
        let scale = Scale::category("genre", ["a", "b", "c", "d"]);
        assert_eq!(scale.normalize(&"a".into()), Some(0.125));
        assert_eq!(scale.normalize(&"d".into()), Some(0.875));
        assert_eq!(scale.normalize(&"z".into()), None);
    }

    #[test]
    fn linear_ticks_cover_domain() {
        let scale = Scale::linear("sold", 0.0, 100.0);
        let ticks = scale.ticks();
        assert_eq!(ticks.len(), 5);
        assert_eq!(ticks[0], ScaleValue::number(0.0));
        assert_eq!(ticks[4], ScaleValue::number(100.0));
        assert_eq!(scale.normalize(&ScaleValue::number(25.0)), Some(0.25));
    }

    #[test]
    fn identity_and_fieldless_scales_are_not_legend_eligible() {
        assert!(!Scale::identity("red").is_legend_eligible());
        let mut fieldless = Scale::category("x", ["a"]);
        fieldless.field = None;
        assert!(!fieldless.is_legend_eligible());
        assert!(Scale::category("x", ["a"]).is_legend_eligible());
    }

    #[test]
    fn number_display_trims_trailing_zeros() {
        assert_eq!(ScaleValue::number(12.0).to_string(), "12");
        assert_eq!(ScaleValue::number(2.5).to_string(), "2.5");
        assert_eq!(ScaleValue::number(1.0 / 3.0).to_string(), "0.33");
    }

    #[test]
    fn scale_option_overrides_matching_field_only() {
        let mut options = ScaleOptions::new();
        options.insert(
            "sold".to_owned(),
            ScaleOption {
                alias: Some("Units".to_owned()),
                max: Some(200.0),
                ..ScaleOption::default()
            },
        );
        let mut sold = Scale::linear("sold", 0.0, 100.0);
        sold.apply_option(&options);
        assert_eq!(sold.title(), "Units");
        assert_eq!(sold.max, Some(200.0));

        let mut other = Scale::linear("price", 0.0, 100.0);
        other.apply_option(&options);
        assert_eq!(other.title(), "price");
    }
}
