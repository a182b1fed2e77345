use thiserror::Error;

use crate::view::ViewId;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("please specify the container for the chart")]
    MissingContainer,

    #[error("container `{0}` could not be resolved")]
    ContainerNotFound(String),

    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: f64, height: f64 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("view `{0}` is not registered on this chart")]
    UnknownView(ViewId),

    #[error("chart has not been rendered yet")]
    NotRendered,

    #[error("canvas failure: {0}")]
    Canvas(String),
}
