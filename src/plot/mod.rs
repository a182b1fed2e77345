mod auto_padding;
mod plot_region;

pub use auto_padding::{AutoPaddingResolver, DEFAULT_AUTO_PADDING_APPEND};
pub use plot_region::PlotRegion;
