//! Constructor-time configuration for a negotiation session.
//!
//! Everything the negotiation needs to know about the application lives here
//! so tests (and applications) can substitute their own requirement sets.

use ash::vk;

/// A function which inspects the raw physical device features and returns
/// true when they are suitable for this application.
pub type ArePhysicalDeviceFeaturesSuitableFn =
    fn(&vk::PhysicalDeviceFeatures) -> bool;

/// The default feature check: the device must support geometry shaders.
pub fn requires_geometry_shader(features: &vk::PhysicalDeviceFeatures) -> bool {
    features.geometry_shader == vk::TRUE
}

/// Accept any set of device features.
pub fn any_features(_features: &vk::PhysicalDeviceFeatures) -> bool {
    true
}

/// Everything a physical device must provide before it can be selected.
#[derive(Clone, Debug)]
pub struct DeviceRequirements {
    /// Device extensions which must all be present.
    pub required_extensions: Vec<String>,

    /// Device categories which may be selected, e.g. discrete GPUs.
    pub accepted_device_types: Vec<vk::PhysicalDeviceType>,

    /// The optional-feature predicate.
    pub are_features_suitable: ArePhysicalDeviceFeaturesSuitableFn,
}

impl Default for DeviceRequirements {
    fn default() -> Self {
        Self {
            required_extensions: vec![swapchain_extension_name()],
            accepted_device_types: vec![
                vk::PhysicalDeviceType::DISCRETE_GPU,
                vk::PhysicalDeviceType::INTEGRATED_GPU,
            ],
            are_features_suitable: requires_geometry_shader,
        }
    }
}

/// Preferences used when configuring the swapchain.
#[derive(Copy, Clone, Debug)]
pub struct ChainPreferences {
    pub surface_format: vk::SurfaceFormatKHR,
    pub present_mode: vk::PresentModeKHR,

    /// Used when the preferred mode is unavailable. FIFO is the only mode
    /// every driver is required to support.
    pub fallback_present_mode: vk::PresentModeKHR,
}

impl Default for ChainPreferences {
    fn default() -> Self {
        Self {
            surface_format: vk::SurfaceFormatKHR {
                format: vk::Format::B8G8R8A8_UNORM,
                color_space: vk::ColorSpaceKHR::SRGB_NONLINEAR,
            },
            present_mode: vk::PresentModeKHR::MAILBOX,
            fallback_present_mode: vk::PresentModeKHR::FIFO,
        }
    }
}

/// All inputs for a negotiation session.
#[derive(Clone, Debug)]
pub struct SessionConfig {
    pub application_name: String,
    pub window_title: String,

    /// The window size, also used as the swapchain extent hint when the
    /// surface lets the application pick.
    pub window_extent: vk::Extent2D,

    /// When true, the validation layers are required and the debug messenger
    /// is attached to the instance.
    pub enable_validation: bool,
    pub validation_layers: Vec<String>,

    pub device_requirements: DeviceRequirements,
    pub chain_preferences: ChainPreferences,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            application_name: "Hello Triangle".to_owned(),
            window_title: "Vulkan window".to_owned(),
            window_extent: vk::Extent2D {
                width: 1280,
                height: 720,
            },
            enable_validation: cfg!(debug_assertions),
            validation_layers: vec!["VK_LAYER_KHRONOS_validation".to_owned()],
            device_requirements: DeviceRequirements::default(),
            chain_preferences: ChainPreferences::default(),
        }
    }
}

/// The name of the swapchain device extension.
pub fn swapchain_extension_name() -> String {
    ash::extensions::khr::Swapchain::name()
        .to_string_lossy()
        .into_owned()
}

/// The name of the debug utils instance extension.
pub fn debug_utils_extension_name() -> String {
    ash::extensions::ext::DebugUtils::name()
        .to_string_lossy()
        .into_owned()
}
