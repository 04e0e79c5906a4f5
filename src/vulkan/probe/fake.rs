//! An in-memory driver for exercising the negotiation logic without a GPU.

use std::cell::{Cell, RefCell};

use ash::vk::{self, Handle};

use super::{DeviceCapabilities, InstanceCapabilities};
use crate::vulkan::VulkanError;

/// Everything the fake driver reports for a single physical device.
#[derive(Clone, Debug)]
pub struct FakeDevice {
    pub device_type: vk::PhysicalDeviceType,
    pub features: vk::PhysicalDeviceFeatures,
    pub extensions: Vec<String>,
    pub queue_families: Vec<vk::QueueFamilyProperties>,

    /// Queue family indices which can present to the surface.
    pub present_families: Vec<u32>,

    pub formats: Vec<vk::SurfaceFormatKHR>,
    pub present_modes: Vec<vk::PresentModeKHR>,
    pub capabilities: vk::SurfaceCapabilitiesKHR,
}

pub struct FakeDriver {
    pub instance_extensions: Vec<String>,
    pub instance_layers: Vec<String>,
    devices: RefCell<Vec<FakeDevice>>,

    /// Every (device, queue family) pair checked for presentation support.
    present_queries: RefCell<Vec<(vk::PhysicalDevice, u32)>>,

    /// Number of surface format and present mode queries.
    surface_queries: Cell<usize>,
}

pub fn queue_family(
    queue_flags: vk::QueueFlags,
    queue_count: u32,
) -> vk::QueueFamilyProperties {
    vk::QueueFamilyProperties {
        queue_flags,
        queue_count,
        ..Default::default()
    }
}

pub fn surface_format(
    format: vk::Format,
    color_space: vk::ColorSpaceKHR,
) -> vk::SurfaceFormatKHR {
    vk::SurfaceFormatKHR {
        format,
        color_space,
    }
}

pub fn format_pairs(
    formats: &[vk::SurfaceFormatKHR],
) -> Vec<(vk::Format, vk::ColorSpaceKHR)> {
    formats.iter().map(|f| (f.format, f.color_space)).collect()
}

impl FakeDriver {
    pub fn new() -> Self {
        Self {
            instance_extensions: vec![
                "VK_KHR_surface".to_owned(),
                "VK_KHR_xcb_surface".to_owned(),
                "VK_EXT_debug_utils".to_owned(),
            ],
            instance_layers: vec!["VK_LAYER_KHRONOS_validation".to_owned()],
            devices: RefCell::new(vec![]),
            present_queries: RefCell::new(vec![]),
            surface_queries: Cell::new(0),
        }
    }

    /// A discrete GPU with a single graphics+present queue family which
    /// passes every default requirement.
    pub fn suitable_device() -> FakeDevice {
        FakeDevice {
            device_type: vk::PhysicalDeviceType::DISCRETE_GPU,
            features: vk::PhysicalDeviceFeatures {
                geometry_shader: vk::TRUE,
                ..Default::default()
            },
            extensions: vec![
                "VK_KHR_maintenance1".to_owned(),
                "VK_KHR_swapchain".to_owned(),
            ],
            queue_families: vec![queue_family(
                vk::QueueFlags::GRAPHICS | vk::QueueFlags::COMPUTE,
                1,
            )],
            present_families: vec![0],
            formats: vec![
                surface_format(
                    vk::Format::R8G8B8A8_SRGB,
                    vk::ColorSpaceKHR::SRGB_NONLINEAR,
                ),
                surface_format(
                    vk::Format::B8G8R8A8_UNORM,
                    vk::ColorSpaceKHR::SRGB_NONLINEAR,
                ),
            ],
            present_modes: vec![vk::PresentModeKHR::FIFO],
            capabilities: vk::SurfaceCapabilitiesKHR {
                min_image_count: 2,
                max_image_count: 8,
                current_extent: vk::Extent2D {
                    width: 800,
                    height: 600,
                },
                min_image_extent: vk::Extent2D {
                    width: 1,
                    height: 1,
                },
                max_image_extent: vk::Extent2D {
                    width: 4096,
                    height: 4096,
                },
                current_transform: vk::SurfaceTransformFlagsKHR::IDENTITY,
                ..Default::default()
            },
        }
    }

    /// Register a device. Devices are enumerated in registration order.
    pub fn add_device(&self, device: FakeDevice) -> vk::PhysicalDevice {
        let mut devices = self.devices.borrow_mut();
        devices.push(device);
        vk::PhysicalDevice::from_raw(devices.len() as u64)
    }

    pub fn present_queries(&self) -> Vec<(vk::PhysicalDevice, u32)> {
        self.present_queries.borrow().clone()
    }

    pub fn surface_queries(&self) -> usize {
        self.surface_queries.get()
    }

    fn device(&self, handle: vk::PhysicalDevice) -> FakeDevice {
        self.devices.borrow()[handle.as_raw() as usize - 1].clone()
    }
}

impl InstanceCapabilities for FakeDriver {
    fn instance_extension_names(&self) -> Result<Vec<String>, VulkanError> {
        Ok(self.instance_extensions.clone())
    }

    fn instance_layer_names(&self) -> Result<Vec<String>, VulkanError> {
        Ok(self.instance_layers.clone())
    }
}

impl DeviceCapabilities for FakeDriver {
    fn physical_devices(&self) -> Result<Vec<vk::PhysicalDevice>, VulkanError> {
        Ok((1..=self.devices.borrow().len() as u64)
            .map(vk::PhysicalDevice::from_raw)
            .collect())
    }

    fn properties(
        &self,
        device: vk::PhysicalDevice,
    ) -> vk::PhysicalDeviceProperties {
        vk::PhysicalDeviceProperties {
            device_type: self.device(device).device_type,
            device_name: crate::vulkan::ffi::raw_name(&format!(
                "Fake GPU {}",
                device.as_raw()
            )),
            ..Default::default()
        }
    }

    fn features(&self, device: vk::PhysicalDevice) -> vk::PhysicalDeviceFeatures {
        self.device(device).features
    }

    fn extension_names(&self, device: vk::PhysicalDevice) -> Vec<String> {
        self.device(device).extensions
    }

    fn queue_families(
        &self,
        device: vk::PhysicalDevice,
    ) -> Vec<vk::QueueFamilyProperties> {
        self.device(device).queue_families
    }

    fn can_present(
        &self,
        device: vk::PhysicalDevice,
        queue_family_index: u32,
    ) -> bool {
        self.present_queries
            .borrow_mut()
            .push((device, queue_family_index));
        self.device(device)
            .present_families
            .contains(&queue_family_index)
    }

    fn surface_formats(
        &self,
        device: vk::PhysicalDevice,
    ) -> Vec<vk::SurfaceFormatKHR> {
        self.surface_queries.set(self.surface_queries.get() + 1);
        self.device(device).formats
    }

    fn present_modes(&self, device: vk::PhysicalDevice) -> Vec<vk::PresentModeKHR> {
        self.surface_queries.set(self.surface_queries.get() + 1);
        self.device(device).present_modes
    }

    fn surface_capabilities(
        &self,
        device: vk::PhysicalDevice,
    ) -> Result<vk::SurfaceCapabilitiesKHR, VulkanError> {
        Ok(self.device(device).capabilities)
    }
}
