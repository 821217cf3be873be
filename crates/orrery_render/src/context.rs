//! WGPU context: instance, surface, adapter, device and queue

use std::sync::Arc;
use winit::dpi::PhysicalSize;
use winit::window::Window;

/// Error creating the render context
#[derive(Debug)]
pub enum ContextError {
    /// The window could not be turned into a surface
    Surface(wgpu::CreateSurfaceError),
    /// No adapter can present to the surface
    NoAdapter,
    /// The adapter refused to create a device
    Device(wgpu::RequestDeviceError),
}

impl From<wgpu::CreateSurfaceError> for ContextError {
    fn from(e: wgpu::CreateSurfaceError) -> Self {
        ContextError::Surface(e)
    }
}

impl From<wgpu::RequestDeviceError> for ContextError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        ContextError::Device(e)
    }
}

impl std::fmt::Display for ContextError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContextError::Surface(e) => write!(f, "Failed to create surface: {}", e),
            ContextError::NoAdapter => write!(f, "No suitable GPU adapter found"),
            ContextError::Device(e) => write!(f, "Failed to create device: {}", e),
        }
    }
}

impl std::error::Error for ContextError {}

/// GPU state tied to one window
pub struct RenderContext {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub size: PhysicalSize<u32>,
}

impl RenderContext {
    /// Create a context with vsync enabled
    pub async fn new(window: Arc<Window>) -> Result<Self, ContextError> {
        Self::with_vsync(window, true).await
    }

    /// Create a context, choosing the present mode from `vsync`
    pub async fn with_vsync(window: Arc<Window>, vsync: bool) -> Result<Self, ContextError> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(ContextError::NoAdapter)?;

        log::info!("Using GPU adapter: {:?}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Orrery Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or(ContextError::NoAdapter)?;

        let present_mode = if vsync {
            wgpu::PresentMode::AutoVsync
        } else {
            wgpu::PresentMode::AutoNoVsync
        };

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            size,
        })
    }

    /// Reconfigure the surface for a new window size (zero sizes are ignored)
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.size = new_size;
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Reconfigure with the current size (after a lost surface)
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    /// Width over height of the surface
    pub fn aspect_ratio(&self) -> f32 {
        aspect_ratio(self.size.width, self.size.height)
    }
}

/// Width over height, treating a zero height as one pixel
pub fn aspect_ratio(width: u32, height: u32) -> f32 {
    width.max(1) as f32 / height.max(1) as f32
}
