use std::{borrow::Cow, ffi::CStr, os::raw::c_void};

use ash::{extensions::ext::DebugUtils, vk};

use crate::vulkan::VulkanError;

/// The create info for a messenger which forwards every warning, error, and
/// verbose message into the application's logs.
pub fn messenger_create_info() -> vk::DebugUtilsMessengerCreateInfoEXT {
    vk::DebugUtilsMessengerCreateInfoEXT {
        message_severity: vk::DebugUtilsMessageSeverityFlagsEXT::VERBOSE
            | vk::DebugUtilsMessageSeverityFlagsEXT::INFO
            | vk::DebugUtilsMessageSeverityFlagsEXT::WARNING
            | vk::DebugUtilsMessageSeverityFlagsEXT::ERROR,
        message_type: vk::DebugUtilsMessageTypeFlagsEXT::GENERAL
            | vk::DebugUtilsMessageTypeFlagsEXT::VALIDATION
            | vk::DebugUtilsMessageTypeFlagsEXT::PERFORMANCE,
        pfn_user_callback: Some(debug_callback),
        ..Default::default()
    }
}

/// Attach the debug messenger to a live instance.
pub fn create_debug_logger(
    entry: &ash::Entry,
    instance: &ash::Instance,
) -> Result<(DebugUtils, vk::DebugUtilsMessengerEXT), VulkanError> {
    let debug_utils = DebugUtils::new(entry, instance);
    let create_info = messenger_create_info();
    let messenger = unsafe {
        debug_utils
            .create_debug_utils_messenger(&create_info, None)
            .map_err(VulkanError::UnableToCreateDebugMessenger)?
    };
    Ok((debug_utils, messenger))
}

/// The log level used for a message of the given severity.
pub fn log_level(severity: vk::DebugUtilsMessageSeverityFlagsEXT) -> log::Level {
    if severity.contains(vk::DebugUtilsMessageSeverityFlagsEXT::ERROR) {
        log::Level::Error
    } else if severity.contains(vk::DebugUtilsMessageSeverityFlagsEXT::WARNING)
    {
        log::Level::Warn
    } else if severity.contains(vk::DebugUtilsMessageSeverityFlagsEXT::INFO) {
        log::Level::Info
    } else {
        log::Level::Trace
    }
}

fn message_type_name(message_type: vk::DebugUtilsMessageTypeFlagsEXT) -> &'static str {
    if message_type.contains(vk::DebugUtilsMessageTypeFlagsEXT::VALIDATION) {
        "VALIDATION"
    } else if message_type
        .contains(vk::DebugUtilsMessageTypeFlagsEXT::PERFORMANCE)
    {
        "PERFORMANCE"
    } else {
        "GENERAL"
    }
}

/// The callback invoked by the validation layers.
///
/// Never aborts the call which triggered the message.
unsafe extern "system" fn debug_callback(
    message_severity: vk::DebugUtilsMessageSeverityFlagsEXT,
    message_type: vk::DebugUtilsMessageTypeFlagsEXT,
    p_callback_data: *const vk::DebugUtilsMessengerCallbackDataEXT,
    _p_user_data: *mut c_void,
) -> vk::Bool32 {
    let message = if p_callback_data.is_null()
        || (*p_callback_data).p_message.is_null()
    {
        Cow::Borrowed("<no message>")
    } else {
        CStr::from_ptr((*p_callback_data).p_message).to_string_lossy()
    };

    log::log!(
        log_level(message_severity),
        "[{}] {}",
        message_type_name(message_type),
        message
    );

    vk::FALSE
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn severities_map_onto_log_levels() {
        use vk::DebugUtilsMessageSeverityFlagsEXT as Severity;
        assert_eq!(log_level(Severity::ERROR), log::Level::Error);
        assert_eq!(log_level(Severity::WARNING), log::Level::Warn);
        assert_eq!(log_level(Severity::INFO), log::Level::Info);
        assert_eq!(log_level(Severity::VERBOSE), log::Level::Trace);
    }

    #[test]
    fn message_types_are_named() {
        use vk::DebugUtilsMessageTypeFlagsEXT as Type;
        assert_eq!(message_type_name(Type::VALIDATION), "VALIDATION");
        assert_eq!(message_type_name(Type::PERFORMANCE), "PERFORMANCE");
        assert_eq!(message_type_name(Type::GENERAL), "GENERAL");
    }

    #[test]
    fn the_messenger_listens_to_every_message_type() {
        let info = messenger_create_info();
        assert!(info.pfn_user_callback.is_some());
        assert!(info
            .message_type
            .contains(vk::DebugUtilsMessageTypeFlagsEXT::VALIDATION));
        assert!(info
            .message_severity
            .contains(vk::DebugUtilsMessageSeverityFlagsEXT::ERROR));
    }
}
