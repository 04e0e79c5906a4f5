use ash::{extensions::khr, vk};

use crate::vulkan::VulkanError;

/// The surface targeted by this application and the Ash extension loader
/// which provides access to KHR surface functions. It's convenient to keep
/// these pieces of data together because they're so frequently used
/// together.
#[derive(Clone)]
pub struct WindowSurface {
    loader: khr::Surface,
    khr: vk::SurfaceKHR,
}

impl WindowSurface {
    /// Load the surface extension functions for a surface which was created
    /// by the window system.
    ///
    /// # Safety
    ///
    /// The application must destroy the surface before the instance is
    /// destroyed.
    pub unsafe fn new(
        entry: &ash::Entry,
        instance: &ash::Instance,
        surface_khr: vk::SurfaceKHR,
    ) -> Self {
        Self {
            loader: khr::Surface::new(entry, instance),
            khr: surface_khr,
        }
    }

    /// The raw surface handle.
    pub fn raw(&self) -> vk::SurfaceKHR {
        self.khr
    }

    /// Check that a queue family on the physical device can present
    /// swapchain images to this surface.
    ///
    /// # Safety
    ///
    /// Unsafe because the queue family index is assumed to be valid and the
    /// physical_device is assumed to still exist.
    pub unsafe fn get_physical_device_surface_support(
        &self,
        physical_device: vk::PhysicalDevice,
        queue_family_index: u32,
    ) -> Result<bool, vk::Result> {
        self.loader.get_physical_device_surface_support(
            physical_device,
            queue_family_index,
            self.khr,
        )
    }

    /// Returns the set of all supported formats for this device.
    ///
    /// # Safety
    ///
    /// The device's supported extensions must be checked prior to querying
    /// the surface formats.
    pub unsafe fn supported_formats(
        &self,
        physical_device: vk::PhysicalDevice,
    ) -> Result<Vec<vk::SurfaceFormatKHR>, vk::Result> {
        self.loader
            .get_physical_device_surface_formats(physical_device, self.khr)
    }

    /// Returns the set of all supported presentation modes for this device.
    ///
    /// # Safety
    ///
    /// The device's supported extensions must be checked prior to querying
    /// the presentation modes.
    pub unsafe fn supported_presentation_modes(
        &self,
        physical_device: vk::PhysicalDevice,
    ) -> Result<Vec<vk::PresentModeKHR>, vk::Result> {
        self.loader
            .get_physical_device_surface_present_modes(physical_device, self.khr)
    }

    /// Returns the surface capabilities for this device.
    ///
    /// # Safety
    ///
    /// The device's supported extensions must be checked prior to querying
    /// the surface capabilities.
    pub unsafe fn surface_capabilities(
        &self,
        physical_device: vk::PhysicalDevice,
    ) -> Result<vk::SurfaceCapabilitiesKHR, VulkanError> {
        self.loader
            .get_physical_device_surface_capabilities(physical_device, self.khr)
            .map_err(VulkanError::UnableToGetSurfaceCapabilities)
    }

    /// Destroy the surface.
    ///
    /// # Safety
    ///
    /// Unsafe because:
    ///   - It is undefined behavior to use this surface after calling destroy.
    ///   - Any swapchain built on the surface must already be destroyed.
    ///   - The application must destroy the surface before destroying the
    ///     Vulkan instance.
    pub unsafe fn destroy(&self) {
        self.loader.destroy_surface(self.khr, None);
    }
}

impl std::fmt::Debug for WindowSurface {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("WindowSurface")
            .field("surface", &self.khr)
            .finish()
    }
}
