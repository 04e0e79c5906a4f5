mod selection;

use ash::{extensions::khr, vk};

use crate::vulkan::{render_device::RenderDevice, VulkanError, WindowSurface};

pub use self::selection::{
    choose_image_count, choose_present_mode, choose_surface_format,
    choose_swap_extent, configure, ImageSharing, PresentationChainParameters,
    ANY_EXTENT,
};

/// The swapchain and the images it owns.
#[derive(Clone)]
pub struct Swapchain {
    loader: khr::Swapchain,
    swapchain_khr: vk::SwapchainKHR,
    images: Vec<vk::Image>,
    parameters: PresentationChainParameters,
}

impl Swapchain {
    /// Create a swapchain for the window surface using previously chosen
    /// parameters.
    pub fn new(
        instance: &ash::Instance,
        render_device: &RenderDevice,
        window_surface: &WindowSurface,
        parameters: PresentationChainParameters,
    ) -> Result<Self, VulkanError> {
        let indices = parameters.sharing.queue_family_indices();
        let create_info = vk::SwapchainCreateInfoKHR {
            surface: window_surface.raw(),

            // image settings
            image_format: parameters.surface_format.format,
            image_color_space: parameters.surface_format.color_space,
            image_extent: parameters.extent,
            min_image_count: parameters.image_count,
            image_array_layers: 1,
            image_usage: vk::ImageUsageFlags::COLOR_ATTACHMENT,

            // sharing between the graphics and present queues
            image_sharing_mode: parameters.sharing.sharing_mode(),
            queue_family_index_count: indices.len() as u32,
            p_queue_family_indices: if indices.is_empty() {
                std::ptr::null()
            } else {
                indices.as_ptr()
            },

            // window system presentation settings
            present_mode: parameters.present_mode,
            composite_alpha: vk::CompositeAlphaFlagsKHR::OPAQUE,
            pre_transform: parameters.pre_transform,
            old_swapchain: vk::SwapchainKHR::null(),
            clipped: vk::TRUE,

            ..Default::default()
        };

        let loader = khr::Swapchain::new(instance, render_device.device());
        let swapchain_khr = unsafe {
            loader
                .create_swapchain(&create_info, None)
                .map_err(VulkanError::UnableToCreateSwapchain)?
        };
        let images = match unsafe { loader.get_swapchain_images(swapchain_khr) }
        {
            Ok(images) => images,
            Err(err) => {
                unsafe { loader.destroy_swapchain(swapchain_khr, None) };
                return Err(VulkanError::UnableToGetSwapchainImages(err));
            }
        };

        log::debug!("Created swapchain with {} images", images.len());

        Ok(Self {
            loader,
            swapchain_khr,
            images,
            parameters,
        })
    }

    pub fn raw(&self) -> vk::SwapchainKHR {
        self.swapchain_khr
    }

    pub fn images(&self) -> &[vk::Image] {
        &self.images
    }

    pub fn parameters(&self) -> &PresentationChainParameters {
        &self.parameters
    }

    /// Get the 2D extent used to create the swapchain images and views.
    pub fn extent(&self) -> vk::Extent2D {
        self.parameters.extent
    }

    pub fn format(&self) -> vk::Format {
        self.parameters.surface_format.format
    }

    /// Destroy the swapchain. The swapchain images go with it.
    ///
    /// # Safety
    ///
    /// Every image view of the swapchain images must already be destroyed
    /// and the swapchain must not be in use by the GPU.
    pub unsafe fn destroy(&self) {
        self.loader.destroy_swapchain(self.swapchain_khr, None);
    }
}

/// One color image view for each swapchain image.
#[derive(Clone)]
pub struct SwapchainImageViews {
    device: ash::Device,
    image_views: Vec<vk::ImageView>,
}

impl SwapchainImageViews {
    /// Create a 2D color view for every image in the swapchain.
    ///
    /// Views created before a failure are destroyed before the error is
    /// returned.
    pub fn new(
        render_device: &RenderDevice,
        swapchain: &Swapchain,
    ) -> Result<Self, VulkanError> {
        let mut views = Self {
            device: render_device.device().clone(),
            image_views: Vec::with_capacity(swapchain.images().len()),
        };
        for &image in swapchain.images() {
            let create_info = vk::ImageViewCreateInfo {
                image,
                format: swapchain.format(),
                view_type: vk::ImageViewType::TYPE_2D,
                subresource_range: vk::ImageSubresourceRange {
                    aspect_mask: vk::ImageAspectFlags::COLOR,
                    base_mip_level: 0,
                    level_count: 1,
                    base_array_layer: 0,
                    layer_count: 1,
                },
                components: vk::ComponentMapping {
                    r: vk::ComponentSwizzle::IDENTITY,
                    g: vk::ComponentSwizzle::IDENTITY,
                    b: vk::ComponentSwizzle::IDENTITY,
                    a: vk::ComponentSwizzle::IDENTITY,
                },
                ..Default::default()
            };
            let result =
                unsafe { views.device.create_image_view(&create_info, None) };
            match result {
                Ok(image_view) => views.image_views.push(image_view),
                Err(err) => {
                    unsafe { views.destroy() };
                    return Err(VulkanError::UnableToCreateImageView(err));
                }
            }
        }
        Ok(views)
    }

    pub fn raw(&self) -> &[vk::ImageView] {
        &self.image_views
    }

    /// Destroy every view.
    ///
    /// # Safety
    ///
    /// The views must not be in use by the GPU and must not be used again.
    pub unsafe fn destroy(&self) {
        for &image_view in &self.image_views {
            self.device.destroy_image_view(image_view, None);
        }
    }
}
