use std::ffi::NulError;

use ash::vk;
use thiserror::Error;

/// The broad category of a failure. Every category is fatal during startup.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ErrorKind {
    /// The Vulkan loader library could not be found or loaded.
    LoaderUnavailable,

    /// The driver reported an error while listing capabilities.
    ProbeFailed,

    /// A required instance extension, device extension, or layer is absent.
    MissingCapability,

    /// No physical device exists, or none passes every suitability check.
    NoSuitableDevice,

    /// The surface reports no formats or no present modes for the device.
    ChainSupportUnavailable,

    /// The driver refused to create an object.
    ObjectCreationFailed,
}

#[derive(Debug, Error)]
pub enum VulkanError {
    #[error("Unable to load the Vulkan library")]
    VulkanLoadingError(#[source] ash::LoadingError),

    #[error("A Vulkan name contains an interior nul byte")]
    InvalidName(#[from] NulError),

    #[error("The following extensions are required but unavailable {:?}", .0)]
    RequiredExtensionsNotFound(Vec<String>),

    #[error("Unable to get the available Vulkan extensions {:?}", .0)]
    UnableToListAvailableExtensions(#[source] vk::Result),

    #[error("The window system cannot report its required Vulkan extensions")]
    WindowExtensionsUnavailable,

    #[error("The following layers are required but unavailable {:?}", .0)]
    RequiredLayersNotFound(Vec<String>),

    #[error("Unable to get the available Vulkan layers {:?}", .0)]
    UnableToListAvailableLayers(#[source] vk::Result),

    #[error("Unable to enumerate physical devices {:?}", .0)]
    UnableToEnumeratePhysicalDevices(#[source] vk::Result),

    #[error("Unable to get the surface capabilities for a physical device {:?}", .0)]
    UnableToGetSurfaceCapabilities(#[source] vk::Result),

    #[error("The Vulkan instance did not report any physical devices")]
    NoPhysicalDevicesFound,

    #[error("No suitable physical device could be found for this application")]
    NoSuitableDeviceFound,

    #[error("Unable to find a suitable graphics queue")]
    UnableToFindGraphicsQueue,

    #[error("Unable to find a suitable presentation queue")]
    UnableToFindPresentQueue,

    #[error(
        "The surface cannot back a swapchain: {} formats, {} present modes",
        .formats,
        .present_modes
    )]
    ChainSupportUnavailable { formats: usize, present_modes: usize },

    #[error("Unable to create a Vulkan instance {:?}", .0)]
    UnableToCreateInstance(#[source] vk::Result),

    #[error("Unable to create the Vulkan debug messenger {:?}", .0)]
    UnableToCreateDebugMessenger(#[source] vk::Result),

    #[error("Unable to create the Vulkan surface {:?}", .0)]
    UnableToCreateSurface(#[source] vk::Result),

    #[error("Unable to create the logical device {:?}", .0)]
    UnableToCreateLogicalDevice(#[source] vk::Result),

    #[error("Unable to create the swapchain {:?}", .0)]
    UnableToCreateSwapchain(#[source] vk::Result),

    #[error("Unable to get the swapchain images {:?}", .0)]
    UnableToGetSwapchainImages(#[source] vk::Result),

    #[error("Unable to create a swapchain image view {:?}", .0)]
    UnableToCreateImageView(#[source] vk::Result),
}

impl VulkanError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        use VulkanError::*;
        match self {
            VulkanLoadingError(_) => ErrorKind::LoaderUnavailable,

            UnableToListAvailableExtensions(_)
            | WindowExtensionsUnavailable
            | UnableToListAvailableLayers(_)
            | UnableToEnumeratePhysicalDevices(_)
            | UnableToGetSurfaceCapabilities(_) => ErrorKind::ProbeFailed,

            RequiredExtensionsNotFound(_) | RequiredLayersNotFound(_) => {
                ErrorKind::MissingCapability
            }

            NoPhysicalDevicesFound
            | NoSuitableDeviceFound
            | UnableToFindGraphicsQueue
            | UnableToFindPresentQueue => ErrorKind::NoSuitableDevice,

            ChainSupportUnavailable { .. } => {
                ErrorKind::ChainSupportUnavailable
            }

            InvalidName(_)
            | UnableToCreateInstance(_)
            | UnableToCreateDebugMessenger(_)
            | UnableToCreateSurface(_)
            | UnableToCreateLogicalDevice(_)
            | UnableToCreateSwapchain(_)
            | UnableToGetSwapchainImages(_)
            | UnableToCreateImageView(_) => ErrorKind::ObjectCreationFailed,
        }
    }
}
