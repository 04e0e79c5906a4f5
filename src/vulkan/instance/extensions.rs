//! This module provides functions for verifying the available Vulkan
//! extensions.

use crate::{
    logging::PrettyList,
    vulkan::{probe::InstanceCapabilities, requirements, VulkanError},
};

/// Check that each of the provided extensions is available on the current
/// platform.
pub fn check_extensions(
    probe: &impl InstanceCapabilities,
    required_extensions: &[String],
) -> Result<(), VulkanError> {
    let available = probe.instance_extension_names()?;
    let missing = requirements::missing(required_extensions, &available);
    if !missing.is_empty() {
        log::error!("Missing instance extensions: {}", PrettyList(&missing));
        Err(VulkanError::RequiredExtensionsNotFound(missing))
    } else {
        Ok(())
    }
}
