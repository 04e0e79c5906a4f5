//! A single GLFW window which acts as the presentation target for a
//! negotiation session.

use std::sync::mpsc::Receiver;

use ash::{vk, vk::Handle};
use thiserror::Error;

use crate::vulkan::{SessionConfig, SurfaceProvider, VulkanError};

/// Things which can go wrong while creating and driving the GLFW window.
#[derive(Error, Debug)]
pub enum WindowError {
    #[error("Failed to initialize GLFW")]
    UnableToInitGLFW(#[from] glfw::InitError),

    #[error("Vulkan is not supported on this device")]
    VulkanNotSupported,

    #[error("The GLFW Window could not be created")]
    WindowCreateFailed,

    #[error(transparent)]
    VulkanError(#[from] VulkanError),
}

/// GLFW uses a Receiver for accepting window events.
pub type EventReceiver = Receiver<(f64, glfw::WindowEvent)>;

/// The GLFW library and the one window the application presents to.
pub struct GlfwWindow {
    pub glfw: glfw::Glfw,
    pub window: glfw::Window,
    event_receiver: EventReceiver,
}

impl GlfwWindow {
    /// Initialize GLFW and open a fixed-size window with no client API.
    pub fn new(config: &SessionConfig) -> Result<Self, WindowError> {
        let mut glfw = glfw::init(glfw::FAIL_ON_ERRORS)?;

        if !glfw.vulkan_supported() {
            return Err(WindowError::VulkanNotSupported);
        }

        // Vulkan owns the surface, GLFW must not create an OpenGL context
        glfw.window_hint(glfw::WindowHint::ClientApi(
            glfw::ClientApiHint::NoApi,
        ));
        glfw.window_hint(glfw::WindowHint::Resizable(false));

        let (window, event_receiver) = glfw
            .create_window(
                config.window_extent.width,
                config.window_extent.height,
                &config.window_title,
                glfw::WindowMode::Windowed,
            )
            .ok_or(WindowError::WindowCreateFailed)?;

        log::info!(
            "Created window '{}' ({}x{})",
            config.window_title,
            config.window_extent.width,
            config.window_extent.height
        );

        Ok(Self {
            glfw,
            window,
            event_receiver,
        })
    }

    /// Poll window events once. Returns false when the window has been asked
    /// to close.
    pub fn poll(&mut self) -> bool {
        self.glfw.poll_events();
        for (_, event) in glfw::flush_messages(&self.event_receiver) {
            log::trace!("{:?}", event);
        }
        !self.window.should_close()
    }
}

impl SurfaceProvider for GlfwWindow {
    fn required_instance_extensions(&self) -> Result<Vec<String>, VulkanError> {
        self.glfw
            .get_required_instance_extensions()
            .ok_or(VulkanError::WindowExtensionsUnavailable)
    }

    fn create_surface(
        &self,
        _entry: &ash::Entry,
        instance: &ash::Instance,
    ) -> Result<vk::SurfaceKHR, VulkanError> {
        let mut surface_handle: u64 = 0;
        let result = vk::Result::from_raw(self.window.create_window_surface(
            instance.handle().as_raw() as usize,
            std::ptr::null(),
            &mut surface_handle,
        ) as i32);
        if result != vk::Result::SUCCESS {
            return Err(VulkanError::UnableToCreateSurface(result));
        }
        Ok(vk::SurfaceKHR::from_raw(surface_handle))
    }
}
