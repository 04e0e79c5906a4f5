mod device_queue;
mod physical_device;
mod queue_families;

use ash::vk;

use crate::{
    logging::PrettyList,
    vulkan::{ffi::to_os_ptrs, probe::DeviceCapabilities, VulkanError},
};

pub use self::{
    device_queue::DeviceQueue,
    physical_device::{
        describe, find_optimal_physical_device, is_device_suitable,
        select_first,
    },
    queue_families::{QueueFamilies, QueueFamilyIndices},
};

/// The Vulkan logical device and the queues needed for presenting graphics
/// to the screen.
///
/// The physical device belongs to the driver and is never destroyed. The
/// queues are only valid while the logical device is alive.
#[derive(Clone)]
pub struct RenderDevice {
    physical_device: vk::PhysicalDevice,
    logical_device: ash::Device,
    queue_families: QueueFamilies,
    graphics_queue: DeviceQueue,
    present_queue: DeviceQueue,
}

impl RenderDevice {
    /// Create the logical Vulkan device for the selected physical device.
    ///
    /// Queue families are resolved again for the selected device. One queue
    /// is created for each distinct family, every required extension is
    /// enabled, and no optional features are turned on.
    pub fn new(
        instance: &ash::Instance,
        probe: &impl DeviceCapabilities,
        physical_device: vk::PhysicalDevice,
        device_extensions: &[String],
        layers: &[String],
    ) -> Result<Self, VulkanError> {
        let queue_families =
            QueueFamilies::find_for_physical_device(probe, physical_device)?;
        let queue_create_infos = queue_families.as_queue_create_infos();

        log::debug!("Enabled device extensions: {}", PrettyList(device_extensions));

        let (_layer_names, layer_ptrs) = unsafe { to_os_ptrs(layers)? };
        let (_ext_names, ext_ptrs) = unsafe { to_os_ptrs(device_extensions)? };
        let features = vk::PhysicalDeviceFeatures::default();

        let create_info = vk::DeviceCreateInfo {
            queue_create_info_count: queue_create_infos.len() as u32,
            p_queue_create_infos: queue_create_infos.as_ptr(),
            p_enabled_features: &features,
            pp_enabled_layer_names: layer_ptrs.as_ptr(),
            enabled_layer_count: layer_ptrs.len() as u32,
            pp_enabled_extension_names: ext_ptrs.as_ptr(),
            enabled_extension_count: ext_ptrs.len() as u32,
            ..Default::default()
        };

        let logical_device = unsafe {
            instance
                .create_device(physical_device, &create_info, None)
                .map_err(VulkanError::UnableToCreateLogicalDevice)?
        };

        let (graphics_queue, present_queue) =
            queue_families.get_queues(&logical_device);

        log::debug!(
            "Graphics queue family {}, present queue family {}",
            graphics_queue.family_index(),
            present_queue.family_index()
        );

        Ok(Self {
            physical_device,
            logical_device,
            queue_families,
            graphics_queue,
            present_queue,
        })
    }

    pub fn physical_device(&self) -> vk::PhysicalDevice {
        self.physical_device
    }

    pub fn device(&self) -> &ash::Device {
        &self.logical_device
    }

    pub fn queue_families(&self) -> QueueFamilies {
        self.queue_families
    }

    pub fn graphics_queue(&self) -> DeviceQueue {
        self.graphics_queue
    }

    pub fn present_queue(&self) -> DeviceQueue {
        self.present_queue
    }

    /// Destroy the logical device.
    ///
    /// # Safety
    ///
    /// Every object created from the device must already be destroyed, and
    /// the device, and its queues, must not be used afterwards.
    pub unsafe fn destroy(&self) {
        if let Err(err) = self.logical_device.device_wait_idle() {
            log::warn!("Error while idling the device before destruction: {:?}", err);
        }
        self.logical_device.destroy_device(None);
    }
}

impl std::fmt::Debug for RenderDevice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderDevice")
            .field("physical_device", &self.physical_device)
            .field("logical_device", &self.logical_device.handle())
            .field("graphics_queue", &self.graphics_queue)
            .field("present_queue", &self.present_queue)
            .finish()
    }
}
