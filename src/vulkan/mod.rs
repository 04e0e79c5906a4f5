mod error;
mod ffi;
mod window_surface;

pub mod config;
pub mod instance;
pub mod probe;
pub mod render_device;
pub mod requirements;
pub mod session;
pub mod swapchain;

pub use self::{
    config::{ChainPreferences, DeviceRequirements, SessionConfig},
    error::{ErrorKind, VulkanError},
    probe::{DeviceCapabilities, InstanceCapabilities, SurfaceSupport},
    render_device::{QueueFamilies, RenderDevice},
    session::{Session, SessionStage, SurfaceProvider},
    swapchain::{PresentationChainParameters, Swapchain, SwapchainImageViews},
    window_surface::WindowSurface,
};
