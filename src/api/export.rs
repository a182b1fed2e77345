use tracing::debug;

use crate::error::{ChartError, ChartResult};
use crate::render::{Canvas, CanvasHost, ImageData};

use super::Chart;

const DEFAULT_IMAGE_NAME: &str = "chart";

impl<H: CanvasHost> Chart<H> {
    /// Snapshot of the current surface; only valid after a successful render.
    pub fn to_image_data(&self) -> ChartResult<ImageData> {
        if !self.rendered {
            return Err(ChartError::NotRendered);
        }
        self.canvas.snapshot()
    }

    /// Offers the snapshot to the host as `{name}.png` and returns the file name.
    pub fn download_image(&mut self, name: Option<&str>) -> ChartResult<String> {
        let image = self.to_image_data()?;
        let stem = name
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_IMAGE_NAME);
        let file_name = format!("{stem}.png");
        self.host.offer_download(&file_name, &image)?;
        debug!(file = %file_name, bytes = image.bytes.len(), "image offered for download");
        Ok(file_name)
    }
}
