use ash::vk;

use super::{DeviceCapabilities, InstanceCapabilities};
use crate::{
    logging::PrettyList,
    vulkan::{ffi::name_from_raw, VulkanError, WindowSurface},
};

impl InstanceCapabilities for ash::Entry {
    fn instance_extension_names(&self) -> Result<Vec<String>, VulkanError> {
        let available_extensions = self
            .enumerate_instance_extension_properties(None)
            .map_err(VulkanError::UnableToListAvailableExtensions)?;

        let available_names: Vec<String> = available_extensions
            .iter()
            // only accept valid utf-8 extension names
            .filter_map(|ext| name_from_raw(&ext.extension_name))
            .collect();

        log::debug!("Available extensions: {}", PrettyList(&available_names));

        Ok(available_names)
    }

    fn instance_layer_names(&self) -> Result<Vec<String>, VulkanError> {
        let available_layer_properties = self
            .enumerate_instance_layer_properties()
            .map_err(VulkanError::UnableToListAvailableLayers)?;

        let available_names: Vec<String> = available_layer_properties
            .iter()
            .filter_map(|layer| name_from_raw(&layer.layer_name))
            .collect();

        log::debug!("Available layers: {}", PrettyList(&available_names));

        Ok(available_names)
    }
}

/// Device queries backed by a live Vulkan instance and window surface.
pub struct AshDeviceProbe<'a> {
    instance: &'a ash::Instance,
    window_surface: &'a WindowSurface,
}

impl<'a> AshDeviceProbe<'a> {
    pub fn new(
        instance: &'a ash::Instance,
        window_surface: &'a WindowSurface,
    ) -> Self {
        Self {
            instance,
            window_surface,
        }
    }
}

impl<'a> DeviceCapabilities for AshDeviceProbe<'a> {
    fn physical_devices(&self) -> Result<Vec<vk::PhysicalDevice>, VulkanError> {
        unsafe {
            self.instance
                .enumerate_physical_devices()
                .map_err(VulkanError::UnableToEnumeratePhysicalDevices)
        }
    }

    fn properties(
        &self,
        device: vk::PhysicalDevice,
    ) -> vk::PhysicalDeviceProperties {
        unsafe { self.instance.get_physical_device_properties(device) }
    }

    fn features(&self, device: vk::PhysicalDevice) -> vk::PhysicalDeviceFeatures {
        unsafe { self.instance.get_physical_device_features(device) }
    }

    fn extension_names(&self, device: vk::PhysicalDevice) -> Vec<String> {
        let properties = unsafe {
            self.instance
                .enumerate_device_extension_properties(device)
                .unwrap_or_else(|err| {
                    log::warn!(
                        "Unable to list extensions for device {:?}: {:?}",
                        device,
                        err
                    );
                    vec![]
                })
        };
        let names: Vec<String> = properties
            .iter()
            .filter_map(|extension| name_from_raw(&extension.extension_name))
            .collect();

        log::trace!(
            "Available physical device extensions: {}",
            PrettyList(&names),
        );

        names
    }

    fn queue_families(
        &self,
        device: vk::PhysicalDevice,
    ) -> Vec<vk::QueueFamilyProperties> {
        unsafe {
            self.instance
                .get_physical_device_queue_family_properties(device)
        }
    }

    fn can_present(
        &self,
        device: vk::PhysicalDevice,
        queue_family_index: u32,
    ) -> bool {
        let result = unsafe {
            self.window_surface
                .get_physical_device_surface_support(device, queue_family_index)
        };
        match result {
            Ok(supported) => supported,
            Err(error) => {
                // This is not necessarily a problem - there could be other
                // queues to check - but it's good to know if it's happening.
                log::warn!(
                    indoc::indoc!(
                        "
                        Error checking for surface support
                          - device {:?}
                          - queue family {}
                          - error {:?}"
                    ),
                    device,
                    queue_family_index,
                    error,
                );
                false
            }
        }
    }

    fn surface_formats(
        &self,
        device: vk::PhysicalDevice,
    ) -> Vec<vk::SurfaceFormatKHR> {
        let formats = unsafe { self.window_surface.supported_formats(device) }
            .unwrap_or_else(|err| {
                log::warn!("Unable to list surface formats: {:?}", err);
                vec![]
            });
        log::trace!("Available surface formats: {:?}", PrettyList(&formats));
        formats
    }

    fn present_modes(&self, device: vk::PhysicalDevice) -> Vec<vk::PresentModeKHR> {
        let modes = unsafe {
            self.window_surface.supported_presentation_modes(device)
        }
        .unwrap_or_else(|err| {
            log::warn!("Unable to list presentation modes: {:?}", err);
            vec![]
        });
        log::trace!("Available presentation modes: {:?}", PrettyList(&modes));
        modes
    }

    fn surface_capabilities(
        &self,
        device: vk::PhysicalDevice,
    ) -> Result<vk::SurfaceCapabilitiesKHR, VulkanError> {
        unsafe { self.window_surface.surface_capabilities(device) }
    }
}
