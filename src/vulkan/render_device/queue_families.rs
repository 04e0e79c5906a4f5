use std::collections::BTreeSet;

use ash::vk;

use crate::vulkan::{
    probe::DeviceCapabilities, render_device::DeviceQueue, VulkanError,
};

static QUEUE_PRIORITIES: [f32; 1] = [1.0];

/// The queue family indices found on a physical device. Either index can be
/// missing when no family fills that role.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct QueueFamilyIndices {
    pub graphics: Option<u32>,
    pub present: Option<u32>,
}

impl QueueFamilyIndices {
    /// Scan the device's queue families in the order the driver reports
    /// them.
    ///
    /// Families without any queues are skipped. Every other family is
    /// recorded as the graphics candidate when it supports graphics commands
    /// and, independently, as the present candidate when it can present to
    /// the surface. Scanning stops as soon as both candidates are known.
    pub fn resolve(
        probe: &impl DeviceCapabilities,
        physical_device: vk::PhysicalDevice,
    ) -> Self {
        let mut indices = Self::default();

        for (index, family) in
            probe.queue_families(physical_device).iter().enumerate()
        {
            if family.queue_count == 0 {
                continue;
            }
            let index = index as u32;

            if family.queue_flags.contains(vk::QueueFlags::GRAPHICS) {
                indices.graphics = Some(index);
            }

            if probe.can_present(physical_device, index) {
                indices.present = Some(index);
            }

            if indices.is_complete() {
                break;
            }
        }

        log::trace!(
            "Queue families for device {:?}: {:?}",
            physical_device,
            indices
        );

        indices
    }

    /// True when both a graphics and a present family were found.
    pub fn is_complete(&self) -> bool {
        self.graphics.is_some() && self.present.is_some()
    }
}

/// The indices for all of the required queue families for this application.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct QueueFamilies {
    graphics_family_index: u32,
    present_family_index: u32,
}

impl TryFrom<QueueFamilyIndices> for QueueFamilies {
    type Error = VulkanError;

    fn try_from(indices: QueueFamilyIndices) -> Result<Self, Self::Error> {
        Ok(Self {
            graphics_family_index: indices
                .graphics
                .ok_or(VulkanError::UnableToFindGraphicsQueue)?,
            present_family_index: indices
                .present
                .ok_or(VulkanError::UnableToFindPresentQueue)?,
        })
    }
}

impl QueueFamilies {
    /// Find the queue family indexes for the queues this application needs.
    pub fn find_for_physical_device(
        probe: &impl DeviceCapabilities,
        physical_device: vk::PhysicalDevice,
    ) -> Result<Self, VulkanError> {
        QueueFamilyIndices::resolve(probe, physical_device).try_into()
    }

    pub fn graphics_family_index(&self) -> u32 {
        self.graphics_family_index
    }

    pub fn present_family_index(&self) -> u32 {
        self.present_family_index
    }

    /// True when graphics and presentation use the same queue family.
    pub fn is_same_family(&self) -> bool {
        self.graphics_family_index == self.present_family_index
    }

    /// Each distinct family index, in ascending order.
    pub fn unique_family_indices(&self) -> Vec<u32> {
        [self.graphics_family_index, self.present_family_index]
            .into_iter()
            .collect::<BTreeSet<u32>>()
            .into_iter()
            .collect()
    }

    /// Create one queue create info per distinct family, each with a single
    /// queue.
    pub fn as_queue_create_infos(&self) -> Vec<vk::DeviceQueueCreateInfo> {
        self.unique_family_indices()
            .into_iter()
            .map(|queue_family_index| vk::DeviceQueueCreateInfo {
                queue_family_index,
                p_queue_priorities: QUEUE_PRIORITIES.as_ptr(),
                queue_count: QUEUE_PRIORITIES.len() as u32,
                ..Default::default()
            })
            .collect()
    }

    /// Get the graphics and present queues from the logical device.
    ///
    /// # Returns
    ///
    /// A tuple of `(graphics_queue, present_queue)`.
    pub fn get_queues(
        &self,
        logical_device: &ash::Device,
    ) -> (DeviceQueue, DeviceQueue) {
        let raw_graphics_queue = unsafe {
            logical_device.get_device_queue(self.graphics_family_index, 0)
        };
        let graphics_queue = DeviceQueue::from_raw(
            raw_graphics_queue,
            self.graphics_family_index,
            0,
        );

        let present_queue = if self.is_same_family() {
            graphics_queue
        } else {
            let raw_present_queue = unsafe {
                logical_device.get_device_queue(self.present_family_index, 0)
            };
            DeviceQueue::from_raw(
                raw_present_queue,
                self.present_family_index,
                0,
            )
        };

        (graphics_queue, present_queue)
    }
}
