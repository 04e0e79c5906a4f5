//! Read-only capability queries.
//!
//! Each query returns a complete, order-preserving snapshot of what the
//! driver reports. The Vulkan "count, then fill" enumeration protocol is
//! hidden behind these methods. An empty list means "unsupported" and is
//! never an error by itself.

mod ash_probe;

#[cfg(test)]
pub(crate) mod fake;

use ash::vk;

use crate::vulkan::VulkanError;

pub use self::ash_probe::AshDeviceProbe;

/// Instance-level queries. These are available before an instance exists.
pub trait InstanceCapabilities {
    /// Names of every instance extension the loader can enable.
    fn instance_extension_names(&self) -> Result<Vec<String>, VulkanError>;

    /// Names of every instance layer the loader can enable.
    fn instance_layer_names(&self) -> Result<Vec<String>, VulkanError>;
}

/// Physical-device and surface-level queries.
pub trait DeviceCapabilities {
    /// Every physical device, in the order the driver reports them.
    fn physical_devices(&self) -> Result<Vec<vk::PhysicalDevice>, VulkanError>;

    fn properties(
        &self,
        device: vk::PhysicalDevice,
    ) -> vk::PhysicalDeviceProperties;

    fn features(&self, device: vk::PhysicalDevice) -> vk::PhysicalDeviceFeatures;

    /// Names of every device extension supported by the device.
    fn extension_names(&self, device: vk::PhysicalDevice) -> Vec<String>;

    /// Queue family properties, indexed by queue family index.
    fn queue_families(
        &self,
        device: vk::PhysicalDevice,
    ) -> Vec<vk::QueueFamilyProperties>;

    /// True when the queue family can present to the surface.
    fn can_present(
        &self,
        device: vk::PhysicalDevice,
        queue_family_index: u32,
    ) -> bool;

    fn surface_formats(
        &self,
        device: vk::PhysicalDevice,
    ) -> Vec<vk::SurfaceFormatKHR>;

    fn present_modes(&self, device: vk::PhysicalDevice) -> Vec<vk::PresentModeKHR>;

    fn surface_capabilities(
        &self,
        device: vk::PhysicalDevice,
    ) -> Result<vk::SurfaceCapabilitiesKHR, VulkanError>;

    /// Collect everything the surface supports for the device.
    fn surface_support(
        &self,
        device: vk::PhysicalDevice,
    ) -> Result<SurfaceSupport, VulkanError> {
        Ok(SurfaceSupport {
            capabilities: self.surface_capabilities(device)?,
            formats: self.surface_formats(device),
            present_modes: self.present_modes(device),
        })
    }
}

/// Everything a surface supports for a specific physical device.
#[derive(Clone, Debug, Default)]
pub struct SurfaceSupport {
    pub capabilities: vk::SurfaceCapabilitiesKHR,
    pub formats: Vec<vk::SurfaceFormatKHR>,
    pub present_modes: Vec<vk::PresentModeKHR>,
}

impl SurfaceSupport {
    /// A swapchain needs at least one format and one present mode.
    pub fn is_chain_capable(&self) -> bool {
        !self.formats.is_empty() && !self.present_modes.is_empty()
    }

    /// Fail with ChainSupportUnavailable when no swapchain can be built.
    pub fn ensure_chain_capable(&self) -> Result<(), VulkanError> {
        if self.is_chain_capable() {
            Ok(())
        } else {
            Err(VulkanError::ChainSupportUnavailable {
                formats: self.formats.len(),
                present_modes: self.present_modes.len(),
            })
        }
    }
}
