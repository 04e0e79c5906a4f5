//! The negotiation session: every Vulkan object needed to present to a
//! window, acquired in order and released in reverse.

mod teardown;

use ash::vk;

use crate::vulkan::{
    config::SessionConfig,
    instance,
    probe::{AshDeviceProbe, DeviceCapabilities},
    render_device::{find_optimal_physical_device, RenderDevice},
    swapchain::{configure, Swapchain, SwapchainImageViews},
    VulkanError, WindowSurface,
};

pub use self::teardown::{Teardown, TeardownStack};

/// The stages a session passes through. Stages only ever move forward.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SessionStage {
    Uninitialized,
    InstanceCreated,
    DiagnosticsAttached,
    SurfaceBound,
    DeviceSelected,
    LogicalDeviceReady,
    ChainConfigured,
    Running,
    TornDown,
}

impl SessionStage {
    /// Move to the next stage.
    ///
    /// DiagnosticsAttached is skipped when validation is disabled, so the
    /// next stage only has to come later than the current one.
    pub fn advance(self, next: SessionStage) -> SessionStage {
        debug_assert!(next > self, "{:?} cannot follow {:?}", next, self);
        log::info!("Session stage {:?} -> {:?}", self, next);
        next
    }
}

/// The window system side of a session.
pub trait SurfaceProvider {
    /// Instance extensions the window system needs to create a surface.
    fn required_instance_extensions(&self) -> Result<Vec<String>, VulkanError>;

    /// Create a presentation surface for the window.
    ///
    /// The surface is owned by the session, which destroys it before the
    /// instance.
    fn create_surface(
        &self,
        entry: &ash::Entry,
        instance: &ash::Instance,
    ) -> Result<vk::SurfaceKHR, VulkanError>;
}

/// Every object needed to present images to a window.
///
/// Each object registers its release as soon as it is created. When startup
/// fails part way through, everything acquired so far is released before the
/// error is returned.
pub struct Session {
    stage: SessionStage,
    instance: ash::Instance,
    window_surface: WindowSurface,
    render_device: RenderDevice,
    swapchain: Swapchain,
    image_views: SwapchainImageViews,
    teardown: Teardown,
}

impl Session {
    /// Run the whole negotiation for the window.
    pub fn new(
        provider: &impl SurfaceProvider,
        config: &SessionConfig,
    ) -> Result<Self, VulkanError> {
        let mut teardown = Teardown::default();
        let mut stage = SessionStage::Uninitialized;

        let entry = instance::load_entry()?;
        let window_extensions = provider.required_instance_extensions()?;
        let instance =
            instance::create_instance(&entry, config, &window_extensions)?;
        {
            // the library must stay loaded until the instance is gone
            let entry = entry.clone();
            let instance = instance.clone();
            teardown.resources.push("instance", move || unsafe {
                instance.destroy_instance(None);
                drop(entry);
            });
        }
        stage = stage.advance(SessionStage::InstanceCreated);

        if config.enable_validation {
            let (debug_utils, messenger) =
                instance::create_debug_logger(&entry, &instance)?;
            teardown.diagnostics.push("debug messenger", move || unsafe {
                debug_utils.destroy_debug_utils_messenger(messenger, None);
            });
            stage = stage.advance(SessionStage::DiagnosticsAttached);
        }

        let surface_khr = provider.create_surface(&entry, &instance)?;
        let window_surface =
            unsafe { WindowSurface::new(&entry, &instance, surface_khr) };
        {
            let window_surface = window_surface.clone();
            teardown.resources.push("window surface", move || unsafe {
                window_surface.destroy();
            });
        }
        stage = stage.advance(SessionStage::SurfaceBound);

        let probe = AshDeviceProbe::new(&instance, &window_surface);
        let physical_device = find_optimal_physical_device(
            &probe,
            &config.device_requirements,
        )?;
        stage = stage.advance(SessionStage::DeviceSelected);

        let render_device = RenderDevice::new(
            &instance,
            &probe,
            physical_device,
            &config.device_requirements.required_extensions,
            &instance::enabled_layers(config),
        )?;
        {
            let render_device = render_device.clone();
            teardown.resources.push("logical device", move || unsafe {
                render_device.destroy();
            });
        }
        stage = stage.advance(SessionStage::LogicalDeviceReady);

        let support = probe.surface_support(physical_device)?;
        let parameters = configure(
            &support,
            &render_device.queue_families(),
            config.window_extent,
            &config.chain_preferences,
        )?;

        let swapchain =
            Swapchain::new(&instance, &render_device, &window_surface, parameters)?;
        {
            let swapchain = swapchain.clone();
            teardown.resources.push("swapchain", move || unsafe {
                swapchain.destroy();
            });
        }

        let image_views = SwapchainImageViews::new(&render_device, &swapchain)?;
        {
            let image_views = image_views.clone();
            teardown.resources.push("swapchain image views", move || unsafe {
                image_views.destroy();
            });
        }
        stage = stage.advance(SessionStage::ChainConfigured);

        Ok(Self {
            stage,
            instance,
            window_surface,
            render_device,
            swapchain,
            image_views,
            teardown,
        })
    }

    /// Enter the running stage and keep going until `keep_running` returns
    /// false.
    pub fn run_until(&mut self, mut keep_running: impl FnMut() -> bool) {
        self.stage = self.stage.advance(SessionStage::Running);
        while keep_running() {}
    }

    /// Release every object owned by the session.
    ///
    /// Dropping the session does the same thing, this just makes the point
    /// where it happens explicit.
    pub fn shutdown(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if self.stage == SessionStage::TornDown {
            return;
        }
        self.teardown.release_all();
        self.stage = self.stage.advance(SessionStage::TornDown);
    }

    pub fn stage(&self) -> SessionStage {
        self.stage
    }

    pub fn instance(&self) -> &ash::Instance {
        &self.instance
    }

    pub fn window_surface(&self) -> &WindowSurface {
        &self.window_surface
    }

    pub fn render_device(&self) -> &RenderDevice {
        &self.render_device
    }

    pub fn swapchain(&self) -> &Swapchain {
        &self.swapchain
    }

    pub fn image_views(&self) -> &SwapchainImageViews {
        &self.image_views
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("stage", &self.stage)
            .field("window_surface", &self.window_surface)
            .field("render_device", &self.render_device)
            .field("swapchain", &self.swapchain.raw())
            .field("image_views", &self.image_views.raw())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn stages_are_ordered_from_startup_to_teardown() {
        use SessionStage::*;
        let stages = [
            Uninitialized,
            InstanceCreated,
            DiagnosticsAttached,
            SurfaceBound,
            DeviceSelected,
            LogicalDeviceReady,
            ChainConfigured,
            Running,
            TornDown,
        ];
        for pair in stages.windows(2) {
            assert!(pair[0] < pair[1], "{:?} should precede {:?}", pair[0], pair[1]);
        }
    }

    #[test]
    fn diagnostics_stage_can_be_skipped() {
        let stage = SessionStage::InstanceCreated.advance(SessionStage::SurfaceBound);
        assert_eq!(stage, SessionStage::SurfaceBound);
    }

    #[test]
    #[should_panic]
    #[cfg(debug_assertions)]
    fn stages_never_move_backwards() {
        SessionStage::Running.advance(SessionStage::DeviceSelected);
    }
}
