use anyhow::Result;
use clap::Parser;
use cubeview_camera::Camera;
use cubeview_render_wgpu::{AssetPaths, CubeRenderer};
use cubeview_timing::FramePacer;
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{DeviceEvent, ElementState, KeyEvent, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

const MOVE_SPEED: f32 = 3.0;

#[derive(Parser)]
#[command(name = "cubeview-desktop", about = "Textured spinning cube viewer")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Directory holding shaders/ and textures/
    #[arg(long, default_value = "./assets")]
    assets_dir: PathBuf,

    /// Target frame rate
    #[arg(long, default_value_t = 60.0)]
    fps: f32,
}

/// Application state outside the GPU objects.
struct AppState {
    camera: Camera,
    pacer: FramePacer,
    keys_held: HashSet<KeyCode>,
    mouse_captured: bool,
    /// Accumulated look deltas for the current frame; stands in for the
    /// two analog stick axes and is drained once per frame.
    stick: (f32, f32),
    last_frame: Instant,
}

impl AppState {
    fn new(fps: f32) -> Self {
        Self {
            camera: Camera::default(),
            pacer: FramePacer::new(fps),
            keys_held: HashSet::new(),
            mouse_captured: false,
            stick: (0.0, 0.0),
            last_frame: Instant::now(),
        }
    }

    /// Apply one frame of input to the camera.
    fn update(&mut self, dt: f32) {
        // At most one horizontal and one depth move per frame; left and
        // forward win when both directions are held.
        if self.keys_held.contains(&KeyCode::KeyA) || self.keys_held.contains(&KeyCode::ArrowLeft)
        {
            self.camera.strafe_left(dt, MOVE_SPEED);
        } else if self.keys_held.contains(&KeyCode::KeyD)
            || self.keys_held.contains(&KeyCode::ArrowRight)
        {
            self.camera.strafe_right(dt, MOVE_SPEED);
        }

        if self.keys_held.contains(&KeyCode::KeyW) || self.keys_held.contains(&KeyCode::ArrowUp) {
            self.camera.walk_forward(dt, MOVE_SPEED);
        } else if self.keys_held.contains(&KeyCode::KeyS)
            || self.keys_held.contains(&KeyCode::ArrowDown)
        {
            self.camera.walk_backward(dt, MOVE_SPEED);
        }

        // The rotate call happens every frame, zero deltas included.
        let (dx, dy) = self.stick;
        self.stick = (0.0, 0.0);
        self.camera.rotate(dx / 100.0, dy / 100.0, dt);
    }

    fn handle_key(&mut self, key: KeyCode, pressed: bool) {
        if pressed {
            self.keys_held.insert(key);
        } else {
            self.keys_held.remove(&key);
        }
    }
}

struct GpuApp {
    state: AppState,
    assets: AssetPaths,
    window: Option<Arc<Window>>,
    surface: Option<wgpu::Surface<'static>>,
    device: Option<wgpu::Device>,
    queue: Option<wgpu::Queue>,
    config: Option<wgpu::SurfaceConfiguration>,
    renderer: Option<CubeRenderer>,
}

impl GpuApp {
    fn new(cli: &Cli) -> Self {
        Self {
            state: AppState::new(cli.fps),
            assets: AssetPaths::in_dir(&cli.assets_dir),
            window: None,
            surface: None,
            device: None,
            queue: None,
            config: None,
            renderer: None,
        }
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        // Window/surface/device failures are fatal: no retry, no fallback.
        let attrs = Window::default_attributes()
            .with_title("cubeview")
            .with_inner_size(PhysicalSize::new(800u32, 800));
        let window = Arc::new(event_loop.create_window(attrs).expect("create window"));

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .expect("create surface");

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .expect("find adapter");

        // BC texture support is optional; without it the renderer falls
        // back to its untextured path rather than failing device setup.
        let mut required_features = wgpu::Features::empty();
        if adapter
            .features()
            .contains(wgpu::Features::TEXTURE_COMPRESSION_BC)
        {
            required_features |= wgpu::Features::TEXTURE_COMPRESSION_BC;
        }

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("cubeview_device"),
                required_features,
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .expect("create device");

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoNoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let renderer = match CubeRenderer::new(
            &device,
            &queue,
            surface_format,
            size.width,
            size.height,
            &self.assets,
        ) {
            Ok(renderer) => renderer,
            Err(e) => {
                tracing::error!("renderer setup failed: {e}");
                std::process::exit(1);
            }
        };
        if renderer.shader_status().is_broken() {
            tracing::warn!("rendering degraded: shader program did not build cleanly");
        }

        self.window = Some(window);
        self.surface = Some(surface);
        self.device = Some(device);
        self.queue = Some(queue);
        self.config = Some(config);
        self.renderer = Some(renderer);

        tracing::info!(
            "GPU initialized with {} backend",
            adapter.get_info().backend.to_str()
        );
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                // The viewport follows the window; the camera aspect
                // stays at its fixed 4:3.
                if let (Some(surface), Some(device), Some(config)) =
                    (&self.surface, &self.device, &mut self.config)
                {
                    config.width = new_size.width.max(1);
                    config.height = new_size.height.max(1);
                    surface.configure(device, config);
                    if let Some(renderer) = &mut self.renderer {
                        renderer.resize(device, config.width, config.height);
                    }
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: key_state,
                        ..
                    },
                ..
            } => {
                if key == KeyCode::Escape {
                    event_loop.exit();
                    return;
                }
                self.state
                    .handle_key(key, key_state == ElementState::Pressed);
            }
            WindowEvent::MouseInput {
                button: MouseButton::Right,
                state: btn_state,
                ..
            } => {
                self.state.mouse_captured = btn_state == ElementState::Pressed;
                if let Some(window) = &self.window {
                    window.set_cursor_visible(!self.state.mouse_captured);
                }
            }
            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let dt = (now - self.state.last_frame).as_secs_f32().min(0.1);
                self.state.last_frame = now;
                self.state.update(dt);

                let (Some(surface), Some(device), Some(queue)) =
                    (&self.surface, &self.device, &self.queue)
                else {
                    return;
                };

                let output = match surface.get_current_texture() {
                    Ok(t) => t,
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        if let Some(config) = &self.config {
                            surface.configure(device, config);
                        }
                        return;
                    }
                    Err(e) => {
                        tracing::error!("surface error: {e}");
                        return;
                    }
                };

                let view = output
                    .texture
                    .create_view(&wgpu::TextureViewDescriptor::default());

                if let Some(renderer) = &mut self.renderer {
                    renderer.render(device, queue, &view, &self.state.camera);
                }

                output.present();

                // Pace after rendering and event processing.
                self.state.pacer.wait();
            }
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            if self.state.mouse_captured {
                self.state.stick.0 += delta.0 as f32;
                self.state.stick.1 += delta.1 as f32;
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("cubeview-desktop starting");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(&cli);
    event_loop.run_app(&mut app)?;

    Ok(())
}
