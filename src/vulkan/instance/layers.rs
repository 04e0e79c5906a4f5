//! This module defines functions for checking supported Vulkan layers.

use crate::{
    logging::PrettyList,
    vulkan::{probe::InstanceCapabilities, requirements, VulkanError},
};

/// Check that each of the required layers is available on the current
/// platform.
pub fn check_layers(
    probe: &impl InstanceCapabilities,
    required_layers: &[String],
) -> Result<(), VulkanError> {
    let available = probe.instance_layer_names()?;
    let missing = requirements::missing(required_layers, &available);
    if !missing.is_empty() {
        log::error!("Missing layers: {}", PrettyList(&missing));
        Err(VulkanError::RequiredLayersNotFound(missing))
    } else {
        Ok(())
    }
}
