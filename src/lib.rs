//! Negotiates everything needed to present images to a window with Vulkan:
//! the instance, a suitable GPU, its queues, and the swapchain.

pub mod logging;
pub mod vulkan;

#[cfg(feature = "glfw")]
pub mod glfw_window;
