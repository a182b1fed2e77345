use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Keyword accepted in place of a numeric padding edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaddingKeyword {
    Auto,
}

/// One padding edge: a fixed length or the auto marker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PaddingEdge {
    Fixed(f64),
    Keyword(PaddingKeyword),
}

impl PaddingEdge {
    pub const AUTO: Self = Self::Keyword(PaddingKeyword::Auto);

    #[must_use]
    pub fn is_auto(self) -> bool {
        matches!(self, Self::Keyword(PaddingKeyword::Auto))
    }

    /// Length used for layout; unresolved auto edges count as zero.
    #[must_use]
    pub fn length(self) -> f64 {
        match self {
            Self::Fixed(value) => value,
            Self::Keyword(PaddingKeyword::Auto) => 0.0,
        }
    }

    fn normalized(self) -> Self {
        match self {
            Self::Fixed(value) if value.is_finite() && value > 0.0 => Self::Fixed(value),
            Self::Fixed(_) => Self::Fixed(0.0),
            keyword => keyword,
        }
    }
}

impl From<f64> for PaddingEdge {
    fn from(value: f64) -> Self {
        Self::Fixed(value)
    }
}

/// Edge index order shared by every padding tuple.
pub const TOP: usize = 0;
pub const RIGHT: usize = 1;
pub const BOTTOM: usize = 2;
pub const LEFT: usize = 3;

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum PaddingInput {
    Single(PaddingEdge),
    Many(Vec<PaddingEdge>),
}

/// Plot padding in `[top, right, bottom, left]` order.
///
/// Deserializes from a single edge (`10`, `"auto"`) or a 1-4 element array
/// expanded with CSS shorthand rules.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PaddingInput", into = "[PaddingEdge; 4]")]
pub struct Padding {
    edges: [PaddingEdge; 4],
}

impl Default for Padding {
    fn default() -> Self {
        Self::fixed([20.0, 20.0, 95.0, 80.0])
    }
}

impl Padding {
    #[must_use]
    pub fn new(edges: [PaddingEdge; 4]) -> Self {
        Self {
            edges: edges.map(PaddingEdge::normalized),
        }
    }

    #[must_use]
    pub fn fixed(values: [f64; 4]) -> Self {
        Self::new(values.map(PaddingEdge::Fixed))
    }

    #[must_use]
    pub fn uniform(edge: PaddingEdge) -> Self {
        Self::new([edge; 4])
    }

    #[must_use]
    pub fn auto() -> Self {
        Self::uniform(PaddingEdge::AUTO)
    }

    /// Expands 1-4 values the way CSS shorthand does.
    pub fn from_values(values: &[PaddingEdge]) -> ChartResult<Self> {
        let edges = match *values {
            [all] => [all; 4],
            [vertical, horizontal] => [vertical, horizontal, vertical, horizontal],
            [top, horizontal, bottom] => [top, horizontal, bottom, horizontal],
            [top, right, bottom, left] => [top, right, bottom, left],
            _ => {
                return Err(ChartError::InvalidData(format!(
                    "padding expects 1 to 4 values, got {}",
                    values.len()
                )));
            }
        };
        Ok(Self::new(edges))
    }

    #[must_use]
    pub fn edges(&self) -> [PaddingEdge; 4] {
        self.edges
    }

    #[must_use]
    pub fn edge(&self, index: usize) -> Option<PaddingEdge> {
        self.edges.get(index).copied()
    }

    /// Replaces the edge at `index` (see [`TOP`] .. [`LEFT`]); returns `false`
    /// and leaves the padding untouched when `index` is out of range.
    pub fn set_edge(&mut self, index: usize, edge: PaddingEdge) -> bool {
        let Some(slot) = self.edges.get_mut(index) else {
            return false;
        };
        *slot = edge.normalized();
        true
    }

    #[must_use]
    pub fn has_auto(&self) -> bool {
        self.edges.iter().any(|edge| edge.is_auto())
    }

    /// Layout lengths with unresolved auto edges counted as zero.
    #[must_use]
    pub fn lengths(&self) -> [f64; 4] {
        self.edges.map(PaddingEdge::length)
    }

    /// Edge-wise comparison tolerating sub-pixel differences between fixed edges.
    #[must_use]
    pub fn approx_eq(&self, other: &Self, tolerance: f64) -> bool {
        self.edges
            .iter()
            .zip(other.edges.iter())
            .all(|(a, b)| match (a, b) {
                (PaddingEdge::Fixed(a), PaddingEdge::Fixed(b)) => (a - b).abs() <= tolerance,
                (a, b) => a == b,
            })
    }
}

impl TryFrom<PaddingInput> for Padding {
    type Error = ChartError;

    fn try_from(input: PaddingInput) -> Result<Self, Self::Error> {
        match input {
            PaddingInput::Single(edge) => Ok(Self::uniform(edge)),
            PaddingInput::Many(values) => Self::from_values(&values),
        }
    }
}

impl From<Padding> for [PaddingEdge; 4] {
    fn from(padding: Padding) -> Self {
        padding.edges
    }
}

#[cfg(test)]
mod tests {
    use super::{Padding, PaddingEdge};

    #[test]
    fn shorthand_expands_like_css() {
        let values = [PaddingEdge::Fixed(10.0), PaddingEdge::AUTO];
        let two = Padding::from_values(&values).expect("two values");
        assert_eq!(
            two.edges(),
            [
                PaddingEdge::Fixed(10.0),
                PaddingEdge::AUTO,
                PaddingEdge::Fixed(10.0),
                PaddingEdge::AUTO,
            ]
        );

        let values: [PaddingEdge; 3] = [1.0.into(), 2.0.into(), 3.0.into()];
        let three = Padding::from_values(&values).expect("three values");
        assert_eq!(three.lengths(), [1.0, 2.0, 3.0, 2.0]);
        assert!(Padding::from_values(&[]).is_err());
    }

    #[test]
    fn negative_and_non_finite_edges_clamp_to_zero() {
        let padding = Padding::new([
            PaddingEdge::Fixed(-4.0),
            PaddingEdge::Fixed(f64::NAN),
            PaddingEdge::Fixed(7.0),
            PaddingEdge::AUTO,
        ]);
        assert_eq!(padding.lengths(), [0.0, 0.0, 7.0, 0.0]);
        assert!(padding.has_auto());
    }

    #[test]
    fn padding_deserializes_from_keyword_number_and_array() {
        let auto: Padding = serde_json::from_str("\"auto\"").expect("keyword");
        assert_eq!(auto, Padding::auto());

        let uniform: Padding = serde_json::from_str("12").expect("number");
        assert_eq!(uniform.lengths(), [12.0; 4]);

        let mixed: Padding = serde_json::from_str("[20, \"auto\", 30, \"auto\"]").expect("array");
        assert!(mixed.edge(1).is_some_and(PaddingEdge::is_auto));
        assert_eq!(mixed.edge(2), Some(PaddingEdge::Fixed(30.0)));

        assert!(serde_json::from_str::<Padding>("[1, 2, 3, 4, 5]").is_err());
    }

    #[test]
    fn out_of_range_edge_index_is_ignored() {
        let mut padding = Padding::fixed([1.0, 2.0, 3.0, 4.0]);
        assert_eq!(padding.edge(4), None);
        assert!(!padding.set_edge(4, PaddingEdge::AUTO));
        assert_eq!(padding.lengths(), [1.0, 2.0, 3.0, 4.0]);

        assert!(padding.set_edge(super::LEFT, PaddingEdge::Fixed(-2.0)));
        assert_eq!(padding.edge(super::LEFT), Some(PaddingEdge::Fixed(0.0)));
    }

    #[test]
    fn approx_eq_tolerates_jitter_but_not_auto_mismatch() {
        let a = Padding::fixed([5.0, 5.0, 5.0, 5.0]);
        let b = Padding::fixed([5.2, 5.0, 4.9, 5.0]);
        assert!(a.approx_eq(&b, 0.5));
        assert!(!a.approx_eq(&b, 0.01));
        assert!(!a.approx_eq(&Padding::auto(), 0.5));
    }
}
