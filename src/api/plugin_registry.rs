use crate::error::{ChartError, ChartResult};
use crate::extensions::ChartPlugin;
use crate::render::CanvasHost;

use super::Chart;

impl<H: CanvasHost> Chart<H> {
    /// Registers a plugin with a unique identifier.
    pub fn register_plugin(&mut self, plugin: Box<dyn ChartPlugin>) -> ChartResult<()> {
        validate_plugin_id(&self.plugins, plugin.as_ref())?;
        self.plugins.push(plugin);
        Ok(())
    }

    /// Unregisters a plugin by id. Returns `true` when removed.
    pub fn unregister_plugin(&mut self, plugin_id: &str) -> bool {
        let Some(position) = self
            .plugins
            .iter()
            .position(|entry| entry.id() == plugin_id)
        else {
            return false;
        };
        self.plugins.remove(position);
        true
    }

    #[must_use]
    pub fn plugin_count(&self) -> usize {
        self.plugins.len()
    }

    #[must_use]
    pub fn has_plugin(&self, plugin_id: &str) -> bool {
        self.plugins.iter().any(|plugin| plugin.id() == plugin_id)
    }
}

pub(super) fn validate_plugin_id(
    registered: &[Box<dyn ChartPlugin>],
    plugin: &dyn ChartPlugin,
) -> ChartResult<()> {
    let plugin_id = plugin.id();
    if plugin_id.is_empty() {
        return Err(ChartError::InvalidData(
            "plugin id must not be empty".to_owned(),
        ));
    }
    if registered.iter().any(|entry| entry.id() == plugin_id) {
        return Err(ChartError::InvalidData(format!(
            "plugin with id `{plugin_id}` is already registered"
        )));
    }
    Ok(())
}
