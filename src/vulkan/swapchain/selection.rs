use ash::vk;

use crate::{
    logging::PrettyList,
    vulkan::{
        config::ChainPreferences, probe::SurfaceSupport,
        render_device::QueueFamilies, VulkanError,
    },
};

/// The current extent reported by surfaces which let the application choose
/// the swapchain size.
pub const ANY_EXTENT: u32 = u32::MAX;

/// How swapchain images are shared between queue families.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ImageSharing {
    /// Graphics and presentation use the same family.
    Exclusive,

    /// Graphics and presentation use different families, listed as
    /// `[graphics, present]`.
    Concurrent([u32; 2]),
}

impl ImageSharing {
    pub fn for_queue_families(queue_families: &QueueFamilies) -> Self {
        if queue_families.is_same_family() {
            Self::Exclusive
        } else {
            Self::Concurrent([
                queue_families.graphics_family_index(),
                queue_families.present_family_index(),
            ])
        }
    }

    pub fn sharing_mode(&self) -> vk::SharingMode {
        match self {
            Self::Exclusive => vk::SharingMode::EXCLUSIVE,
            Self::Concurrent(_) => vk::SharingMode::CONCURRENT,
        }
    }

    /// The queue family indices which share the images. Empty for exclusive
    /// access.
    pub fn queue_family_indices(&self) -> &[u32] {
        match self {
            Self::Exclusive => &[],
            Self::Concurrent(indices) => indices,
        }
    }
}

/// Everything chosen for the swapchain before it is created.
#[derive(Copy, Clone, Debug)]
pub struct PresentationChainParameters {
    pub surface_format: vk::SurfaceFormatKHR,
    pub present_mode: vk::PresentModeKHR,
    pub extent: vk::Extent2D,
    pub image_count: u32,
    pub pre_transform: vk::SurfaceTransformFlagsKHR,
    pub sharing: ImageSharing,
}

/// Choose every swapchain parameter from what the surface supports.
///
/// The only failure is a surface without any formats or present modes, which
/// device selection already rules out.
pub fn configure(
    support: &SurfaceSupport,
    queue_families: &QueueFamilies,
    desired_extent: vk::Extent2D,
    preferences: &ChainPreferences,
) -> Result<PresentationChainParameters, VulkanError> {
    support.ensure_chain_capable()?;

    let surface_format =
        choose_surface_format(&support.formats, preferences).ok_or(
            VulkanError::ChainSupportUnavailable {
                formats: 0,
                present_modes: support.present_modes.len(),
            },
        )?;
    let parameters = PresentationChainParameters {
        surface_format,
        present_mode: choose_present_mode(&support.present_modes, preferences),
        extent: choose_swap_extent(&support.capabilities, desired_extent),
        image_count: choose_image_count(&support.capabilities),
        pre_transform: support.capabilities.current_transform,
        sharing: ImageSharing::for_queue_families(queue_families),
    };

    log::info!("Swapchain parameters: {:#?}", parameters);
    Ok(parameters)
}

/// Choose the preferred format if the surface supports it, otherwise the
/// first supported format.
pub fn choose_surface_format(
    formats: &[vk::SurfaceFormatKHR],
    preferences: &ChainPreferences,
) -> Option<vk::SurfaceFormatKHR> {
    log::debug!("Available Surface Formats: {:#?}", PrettyList(formats));

    let preferred = preferences.surface_format;
    let format = formats
        .iter()
        .copied()
        .find(|format| {
            format.format == preferred.format
                && format.color_space == preferred.color_space
        })
        .or_else(|| formats.first().copied());

    log::debug!("Chose Surface Format: {:#?}", format);
    format
}

/// Choose the preferred present mode if the surface supports it, otherwise
/// the fallback mode.
pub fn choose_present_mode(
    modes: &[vk::PresentModeKHR],
    preferences: &ChainPreferences,
) -> vk::PresentModeKHR {
    log::debug!("Available Presentation Modes: {:?}", PrettyList(modes));

    let mode = if modes.contains(&preferences.present_mode) {
        preferences.present_mode
    } else {
        preferences.fallback_present_mode
    };

    log::debug!("Chose Present Mode: {:?}", mode);
    mode
}

/// Use the surface's current extent, unless the surface lets the application
/// choose. Then the desired extent is clamped into the supported range.
pub fn choose_swap_extent(
    capabilities: &vk::SurfaceCapabilitiesKHR,
    desired_extent: vk::Extent2D,
) -> vk::Extent2D {
    if capabilities.current_extent.width != ANY_EXTENT {
        log::debug!(
            "use current swapchain extent {:?}",
            capabilities.current_extent
        );
        return capabilities.current_extent;
    }

    let min = capabilities.min_image_extent;
    let max = capabilities.max_image_extent;
    let extent = vk::Extent2D {
        width: desired_extent.width.min(max.width).max(min.width),
        height: desired_extent.height.min(max.height).max(min.height),
    };
    log::debug!("use computed extent {:?}", extent);
    extent
}

/// One image more than the minimum, limited by the maximum when the surface
/// has one. A maximum of zero means there is no limit.
pub fn choose_image_count(capabilities: &vk::SurfaceCapabilitiesKHR) -> u32 {
    let proposed_image_count = capabilities.min_image_count + 1;
    if capabilities.max_image_count > 0 {
        std::cmp::min(proposed_image_count, capabilities.max_image_count)
    } else {
        proposed_image_count
    }
}
