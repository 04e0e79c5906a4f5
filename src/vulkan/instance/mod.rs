mod debug_callback;
mod extensions;
mod layers;

use std::{ffi::CString, os::raw::c_void};

use ash::vk;

use crate::{
    logging::PrettyList,
    vulkan::{
        config::{debug_utils_extension_name, SessionConfig},
        ffi::to_os_ptrs,
        VulkanError,
    },
};

pub use self::{
    debug_callback::{create_debug_logger, log_level, messenger_create_info},
    extensions::check_extensions,
    layers::check_layers,
};

/// Load the Vulkan library at runtime.
pub fn load_entry() -> Result<ash::Entry, VulkanError> {
    unsafe { ash::Entry::load().map_err(VulkanError::VulkanLoadingError) }
}

/// Every instance extension the application must enable: the window system's
/// extensions, plus debug utils when validation is enabled.
pub fn required_extensions(
    config: &SessionConfig,
    window_extensions: &[String],
) -> Vec<String> {
    let mut required = Vec::with_capacity(window_extensions.len() + 1);
    required.extend_from_slice(window_extensions);
    if config.enable_validation {
        required.push(debug_utils_extension_name());
    }
    required
}

/// The layers enabled on the instance and logical device.
pub fn enabled_layers(config: &SessionConfig) -> Vec<String> {
    if config.enable_validation {
        config.validation_layers.clone()
    } else {
        vec![]
    }
}

/// Create a Vulkan instance with the required extensions.
///
/// Every required extension and layer is checked before the instance is
/// created. When validation is enabled the debug messenger create info is
/// chained into the instance create info so messages emitted during
/// instance creation and destruction are logged too.
pub fn create_instance(
    entry: &ash::Entry,
    config: &SessionConfig,
    window_extensions: &[String],
) -> Result<ash::Instance, VulkanError> {
    let extensions = required_extensions(config, window_extensions);
    let layers = enabled_layers(config);

    check_layers(entry, &layers)?;
    check_extensions(entry, &extensions)?;

    log::debug!("Required Extensions: {}", PrettyList(&extensions));
    log::debug!("Enabled Layers: {}", PrettyList(&layers));

    let app_name = CString::new(config.application_name.as_str())?;
    let engine_name = CString::new("No Engine")?;

    let app_info = vk::ApplicationInfo {
        p_engine_name: engine_name.as_ptr(),
        p_application_name: app_name.as_ptr(),
        application_version: vk::make_api_version(0, 1, 0, 0),
        engine_version: vk::make_api_version(0, 1, 0, 0),
        api_version: vk::API_VERSION_1_1,
        ..Default::default()
    };

    let (_layer_names, layer_ptrs) = unsafe { to_os_ptrs(&layers)? };
    let (_ext_names, ext_ptrs) = unsafe { to_os_ptrs(&extensions)? };

    let debug_create_info = messenger_create_info();
    let p_next = if config.enable_validation {
        &debug_create_info as *const vk::DebugUtilsMessengerCreateInfoEXT
            as *const c_void
    } else {
        std::ptr::null()
    };

    let create_info = vk::InstanceCreateInfo {
        p_next,
        p_application_info: &app_info,
        pp_enabled_layer_names: layer_ptrs.as_ptr(),
        enabled_layer_count: layer_ptrs.len() as u32,
        pp_enabled_extension_names: ext_ptrs.as_ptr(),
        enabled_extension_count: ext_ptrs.len() as u32,
        ..Default::default()
    };

    unsafe {
        entry
            .create_instance(&create_info, None)
            .map_err(VulkanError::UnableToCreateInstance)
    }
}
