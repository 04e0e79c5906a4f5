use ash::vk;

use crate::{
    logging::PrettyList,
    vulkan::{
        config::DeviceRequirements, ffi::name_from_raw,
        probe::DeviceCapabilities, render_device::QueueFamilyIndices,
        requirements, VulkanError,
    },
};

/// Enumerate every physical device and pick the first suitable one.
pub fn find_optimal_physical_device(
    probe: &impl DeviceCapabilities,
    device_requirements: &DeviceRequirements,
) -> Result<vk::PhysicalDevice, VulkanError> {
    let devices = probe.physical_devices()?;
    select_first(probe, &devices, device_requirements)
}

/// Pick the first device, in the given order, which passes every
/// suitability check. There is no scoring between suitable devices.
pub fn select_first(
    probe: &impl DeviceCapabilities,
    devices: &[vk::PhysicalDevice],
    device_requirements: &DeviceRequirements,
) -> Result<vk::PhysicalDevice, VulkanError> {
    if devices.is_empty() {
        return Err(VulkanError::NoPhysicalDevicesFound);
    }

    let names: Vec<String> =
        devices.iter().map(|&device| describe(probe, device)).collect();
    log::debug!("Physical devices: {}", PrettyList(&names));

    let device = devices
        .iter()
        .copied()
        .find(|&device| is_device_suitable(probe, device, device_requirements))
        .ok_or(VulkanError::NoSuitableDeviceFound)?;

    log::info!("Selected physical device {}", describe(probe, device));
    Ok(device)
}

/// Check a device against the requirements.
///
/// Checks run in a fixed order and stop at the first failure: device type,
/// features, queue families, device extensions, and finally surface support.
/// Surface support is only queried once the device is known to support every
/// required extension.
pub fn is_device_suitable(
    probe: &impl DeviceCapabilities,
    device: vk::PhysicalDevice,
    device_requirements: &DeviceRequirements,
) -> bool {
    let properties = probe.properties(device);
    if !device_requirements
        .accepted_device_types
        .contains(&properties.device_type)
    {
        log::trace!(
            "Device {:?} has unsupported type {:?}",
            device,
            properties.device_type
        );
        return false;
    }

    if !(device_requirements.are_features_suitable)(&probe.features(device)) {
        log::trace!("Device {:?} lacks required features", device);
        return false;
    }

    if !QueueFamilyIndices::resolve(probe, device).is_complete() {
        log::trace!(
            "Could not find suitable queue families for physical device {:?}",
            device
        );
        return false;
    }

    let available_extensions = probe.extension_names(device);
    let missing = requirements::missing(
        &device_requirements.required_extensions,
        &available_extensions,
    );
    if !missing.is_empty() {
        log::trace!(
            "Device {:?} is missing extensions {}",
            device,
            PrettyList(&missing)
        );
        return false;
    }

    match probe.surface_support(device) {
        Ok(support) if support.is_chain_capable() => true,
        Ok(support) => {
            log::trace!(
                "Device {:?} reports {} surface formats and {} present modes",
                device,
                support.formats.len(),
                support.present_modes.len()
            );
            false
        }
        Err(err) => {
            log::warn!(
                "Unable to query surface support for device {:?}: {}",
                device,
                err
            );
            false
        }
    }
}

/// A human readable name for the device, e.g. "GeForce GTX 1080 (DISCRETE_GPU)".
pub fn describe(
    probe: &impl DeviceCapabilities,
    device: vk::PhysicalDevice,
) -> String {
    let properties = probe.properties(device);
    let name = name_from_raw(&properties.device_name)
        .unwrap_or_else(|| format!("{:?}", device));
    format!("{} ({:?})", name, properties.device_type)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vulkan::{
        config::any_features,
        probe::fake::{queue_family, FakeDevice, FakeDriver},
        ErrorKind,
    };
    use pretty_assertions::assert_eq;

    fn requirements() -> DeviceRequirements {
        DeviceRequirements::default()
    }

    #[test]
    fn cpu_devices_are_skipped_for_a_later_discrete_gpu() {
        let driver = FakeDriver::new();
        let _cpu = driver.add_device(FakeDevice {
            device_type: vk::PhysicalDeviceType::CPU,
            ..FakeDriver::suitable_device()
        });
        let gpu = driver.add_device(FakeDriver::suitable_device());

        let selected =
            find_optimal_physical_device(&driver, &requirements()).unwrap();

        assert_eq!(selected, gpu);
    }

    #[test]
    fn the_first_of_several_suitable_devices_wins() {
        let driver = FakeDriver::new();
        let integrated = driver.add_device(FakeDevice {
            device_type: vk::PhysicalDeviceType::INTEGRATED_GPU,
            ..FakeDriver::suitable_device()
        });
        let _discrete = driver.add_device(FakeDriver::suitable_device());

        let selected =
            find_optimal_physical_device(&driver, &requirements()).unwrap();

        assert_eq!(selected, integrated);
    }

    #[test]
    fn virtual_and_other_devices_are_rejected() {
        let driver = FakeDriver::new();
        for device_type in [
            vk::PhysicalDeviceType::VIRTUAL_GPU,
            vk::PhysicalDeviceType::OTHER,
            vk::PhysicalDeviceType::CPU,
        ] {
            let device = driver.add_device(FakeDevice {
                device_type,
                ..FakeDriver::suitable_device()
            });
            assert!(!is_device_suitable(&driver, device, &requirements()));
        }
    }

    #[test]
    fn an_empty_device_list_is_its_own_error() {
        let driver = FakeDriver::new();
        let err =
            find_optimal_physical_device(&driver, &requirements()).unwrap_err();
        assert!(matches!(err, VulkanError::NoPhysicalDevicesFound));
        assert_eq!(err.kind(), ErrorKind::NoSuitableDevice);
    }

    #[test]
    fn no_suitable_device_is_reported_when_none_qualify() {
        let driver = FakeDriver::new();
        driver.add_device(FakeDevice {
            device_type: vk::PhysicalDeviceType::CPU,
            ..FakeDriver::suitable_device()
        });
        let err =
            find_optimal_physical_device(&driver, &requirements()).unwrap_err();
        assert!(matches!(err, VulkanError::NoSuitableDeviceFound));
    }

    #[test]
    fn geometry_shader_support_is_required_by_default() {
        let driver = FakeDriver::new();
        let device = driver.add_device(FakeDevice {
            features: vk::PhysicalDeviceFeatures::default(),
            ..FakeDriver::suitable_device()
        });

        assert!(!is_device_suitable(&driver, device, &requirements()));

        let relaxed = DeviceRequirements {
            are_features_suitable: any_features,
            ..requirements()
        };
        assert!(is_device_suitable(&driver, device, &relaxed));
    }

    #[test]
    fn incomplete_queue_families_disqualify_the_device() {
        let driver = FakeDriver::new();
        let device = driver.add_device(FakeDevice {
            queue_families: vec![queue_family(vk::QueueFlags::TRANSFER, 1)],
            present_families: vec![0],
            ..FakeDriver::suitable_device()
        });
        assert!(!is_device_suitable(&driver, device, &requirements()));
    }

    #[test]
    fn surface_support_is_not_queried_when_extensions_are_missing() {
        let driver = FakeDriver::new();
        let device = driver.add_device(FakeDevice {
            extensions: vec!["VK_KHR_maintenance1".to_owned()],
            ..FakeDriver::suitable_device()
        });

        assert!(!is_device_suitable(&driver, device, &requirements()));
        assert_eq!(driver.surface_queries(), 0);
    }

    #[test]
    fn custom_extension_requirements_are_honored() {
        let driver = FakeDriver::new();
        let device = driver.add_device(FakeDriver::suitable_device());
        let demanding = DeviceRequirements {
            required_extensions: vec![
                "VK_KHR_swapchain".to_owned(),
                "VK_KHR_ray_query".to_owned(),
            ],
            ..requirements()
        };

        assert!(!is_device_suitable(&driver, device, &demanding));
        assert!(is_device_suitable(&driver, device, &requirements()));
    }

    #[test]
    fn empty_formats_or_present_modes_disqualify_the_device() {
        let driver = FakeDriver::new();
        let no_formats = driver.add_device(FakeDevice {
            formats: vec![],
            ..FakeDriver::suitable_device()
        });
        let no_modes = driver.add_device(FakeDevice {
            present_modes: vec![],
            ..FakeDriver::suitable_device()
        });

        assert!(!is_device_suitable(&driver, no_formats, &requirements()));
        assert!(!is_device_suitable(&driver, no_modes, &requirements()));
        assert!(driver.surface_queries() > 0);
    }

    #[test]
    fn devices_are_described_by_name_and_type() {
        let driver = FakeDriver::new();
        let device = driver.add_device(FakeDriver::suitable_device());
        assert_eq!(describe(&driver, device), "Fake GPU 1 (DISCRETE_GPU)");
    }
}
