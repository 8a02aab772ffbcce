//! Core application state and lifecycle.

use std::path::PathBuf;
use std::sync::Arc;

use inkwheel_core::shapes::DEFAULT_THICKNESS;
use inkwheel_core::{
    ExportError, ExportResult, FileSettingsStore, MemorySettingsStore, RasterImage, SettingsStore,
};
use inkwheel_render::{RenderContext, RenderResult, Renderer, RendererError, VelloRenderer};
use kurbo::{Point, Size};
use peniko::Color;
use thiserror::Error;
use vello::util::RenderSurface;
use vello::wgpu::PresentMode;
use vello::{AaConfig, RenderParams, RendererOptions, Scene};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{Key, ModifiersState, NamedKey};
use winit::window::{Window, WindowId};

use crate::event_handler::map_button;
use crate::file_ops;
use crate::session::{Deferred, Session};
use crate::shortcuts::ShortcutRegistry;
use crate::ui::render_ui;

/// Application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("Window error: {0}")]
    Window(#[from] winit::error::OsError),
    #[error(transparent)]
    Render(#[from] RendererError),
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub background_color: Color,
    /// Brush thickness when no settings are saved.
    pub default_thickness: f64,
    /// Settings file. `None` uses the per-user config directory.
    pub settings_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "InkWheel".to_string(),
            width: 1280,
            height: 800,
            background_color: Color::WHITE,
            default_thickness: DEFAULT_THICKNESS,
            settings_path: None,
        }
    }
}

/// Render `scene` offscreen and read back straight RGBA8 rows.
fn render_scene_to_rgba(
    device: &vello::wgpu::Device,
    queue: &vello::wgpu::Queue,
    vello_renderer: &mut vello::Renderer,
    scene: &Scene,
    width: u32,
    height: u32,
) -> RenderResult<Vec<u8>> {
    let texture = device.create_texture(&vello::wgpu::TextureDescriptor {
        label: Some("export texture"),
        size: vello::wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: vello::wgpu::TextureDimension::D2,
        format: vello::wgpu::TextureFormat::Rgba8Unorm,
        usage: vello::wgpu::TextureUsages::STORAGE_BINDING
            | vello::wgpu::TextureUsages::COPY_SRC
            | vello::wgpu::TextureUsages::TEXTURE_BINDING,
        view_formats: &[],
    });
    let texture_view = texture.create_view(&vello::wgpu::TextureViewDescriptor::default());

    let params = RenderParams {
        base_color: Color::WHITE,
        width,
        height,
        antialiasing_method: AaConfig::Area,
    };
    vello_renderer
        .render_to_texture(device, queue, scene, &texture_view, &params)
        .map_err(|e| RendererError::RenderFailed(format!("{:?}", e)))?;

    // wgpu requires 256-byte aligned rows
    let bytes_per_row = (width * 4).next_multiple_of(256);
    let readback_buffer = device.create_buffer(&vello::wgpu::BufferDescriptor {
        label: Some("export readback buffer"),
        size: (bytes_per_row * height) as u64,
        usage: vello::wgpu::BufferUsages::COPY_DST | vello::wgpu::BufferUsages::MAP_READ,
        mapped_at_creation: false,
    });

    let mut encoder = device.create_command_encoder(&vello::wgpu::CommandEncoderDescriptor {
        label: Some("export copy encoder"),
    });
    encoder.copy_texture_to_buffer(
        vello::wgpu::TexelCopyTextureInfo {
            texture: &texture,
            mip_level: 0,
            origin: vello::wgpu::Origin3d::ZERO,
            aspect: vello::wgpu::TextureAspect::All,
        },
        vello::wgpu::TexelCopyBufferInfo {
            buffer: &readback_buffer,
            layout: vello::wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(bytes_per_row),
                rows_per_image: Some(height),
            },
        },
        vello::wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
    );
    queue.submit(std::iter::once(encoder.finish()));

    let buffer_slice = readback_buffer.slice(..);
    let (tx, rx) = std::sync::mpsc::channel();
    buffer_slice.map_async(vello::wgpu::MapMode::Read, move |result| {
        tx.send(result).ok();
    });
    device
        .poll(vello::wgpu::PollType::wait_indefinitely())
        .map_err(|e| RendererError::Readback(e.to_string()))?;
    rx.recv()
        .map_err(|e| RendererError::Readback(e.to_string()))?
        .map_err(|e| RendererError::Readback(e.to_string()))?;

    let data = buffer_slice.get_mapped_range();
    let row_len = (width * 4) as usize;
    let mut rgba = Vec::with_capacity(row_len * height as usize);
    for row in data.chunks(bytes_per_row as usize).take(height as usize) {
        rgba.extend_from_slice(&row[..row_len]);
    }
    drop(data);
    readback_buffer.unmap();
    Ok(rgba)
}

/// Open the configured settings store, falling back to memory.
fn open_settings_store(config: &AppConfig) -> Box<dyn SettingsStore> {
    let store = match &config.settings_path {
        Some(path) => Ok(FileSettingsStore::new(path.clone())),
        None => FileSettingsStore::default_location(),
    };
    match store {
        Ok(store) => Box::new(store),
        Err(e) => {
            log::warn!("Settings will not persist: {}", e);
            Box::new(MemorySettingsStore::new())
        }
    }
}

/// Runtime state for the application.
struct AppState {
    // Windowing
    window: Arc<Window>,
    surface: RenderSurface<'static>,

    // Rendering
    vello_renderer: vello::Renderer,
    shape_renderer: VelloRenderer,
    /// Converts the Rgba8Unorm render target to the surface format.
    texture_blitter: vello::wgpu::util::TextureBlitter,

    // egui
    egui_ctx: egui::Context,
    egui_state: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,

    session: Session,
    config: AppConfig,
    modifiers: ModifiersState,
}

/// Main application struct.
pub struct App {
    config: AppConfig,
    state: Option<AppState>,
    render_cx: Option<vello::util::RenderContext>,
    /// Set when initialization failed and the loop should stop.
    fatal: Option<AppError>,
}

impl App {
    /// Create a new application with default configuration.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Create a new application with custom configuration.
    pub fn with_config(config: AppConfig) -> Self {
        Self {
            config,
            state: None,
            render_cx: None,
            fatal: None,
        }
    }

    /// Run the application until the window closes.
    pub async fn run() -> Result<(), AppError> {
        let event_loop = EventLoop::new()?;
        let mut app = App::new();
        event_loop.run_app(&mut app)?;
        match app.fatal.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), AppError> {
        log::info!("Creating window...");
        let window_attrs = Window::default_attributes()
            .with_title(&self.config.title)
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height));
        let window = Arc::new(event_loop.create_window(window_attrs)?);

        let size = window.inner_size();
        let (width, height) = if size.width == 0 || size.height == 0 {
            (self.config.width, self.config.height)
        } else {
            (size.width, size.height)
        };
        log::info!("Surface size: {}x{}", width, height);

        let render_cx = self
            .render_cx
            .get_or_insert_with(vello::util::RenderContext::new);
        let surface = pollster::block_on(render_cx.create_surface(
            window.clone(),
            width,
            height,
            PresentMode::AutoVsync,
        ))
        .map_err(|e| RendererError::Surface(e.to_string()))?;

        let device = &render_cx.devices[surface.dev_id].device;
        let vello_renderer = vello::Renderer::new(device, RendererOptions::default())
            .map_err(|e| RendererError::InitFailed(e.to_string()))?;
        let texture_blitter = vello::wgpu::util::TextureBlitter::new(device, surface.config.format);

        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(
            device,
            surface.config.format,
            egui_wgpu::RendererOptions::default(),
        );

        let session = Session::new(
            open_settings_store(&self.config),
            self.config.default_thickness,
        );

        log::info!("InkWheel initialized - {}x{}", width, height);
        log::info!("Keyboard shortcuts: P=Pen, L=Line, R=Rectangle, E=Ellipse, C=Colors");

        window.request_redraw();
        self.state = Some(AppState {
            window,
            surface,
            vello_renderer,
            shape_renderer: VelloRenderer::new(),
            texture_blitter,
            egui_ctx,
            egui_state,
            egui_renderer,
            session,
            config: self.config.clone(),
            modifiers: ModifiersState::empty(),
        });
        Ok(())
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// Run the UI, apply its actions, and present one frame.
fn redraw(state: &mut AppState, render_cx: &vello::util::RenderContext) {
    let session = &mut state.session;

    let egui_input = state.egui_state.take_egui_input(&state.window);
    let mut actions = Vec::new();
    let egui_output = state.egui_ctx.run(egui_input, |ctx| {
        actions = render_ui(ctx, &mut session.ui_state, &session.canvas, &session.picker);
    });
    state
        .egui_state
        .handle_platform_output(&state.window, egui_output.platform_output);

    for action in actions {
        session.handle(action);
    }

    let width = state.surface.config.width;
    let height = state.surface.config.height;
    let scale_factor = state.window.scale_factor();

    let origin = Point::new(0.0, session.ui_state.canvas_top as f64);
    session.event_handler.set_canvas_origin(origin);
    session.canvas.set_viewport_size(
        width as f64 / scale_factor,
        height as f64 / scale_factor - origin.y,
    );

    let device_handle = &render_cx.devices[state.surface.dev_id];
    let device = &device_handle.device;
    let queue = &device_handle.queue;

    match session.take_deferred() {
        Some(Deferred::Save) => {
            if let Some(path) = file_ops::pick_save_path() {
                let shape_renderer = &mut state.shape_renderer;
                let vello_renderer = &mut state.vello_renderer;
                let canvas = &session.canvas;
                let notice = file_ops::save_drawing(&path, canvas, |w, h| {
                    rasterize(device, queue, vello_renderer, shape_renderer, canvas, w, h)
                });
                session.show_notice(notice);
            }
        }
        Some(Deferred::Open) => {
            if let Some(path) = file_ops::pick_open_path() {
                if let Some(notice) = file_ops::open_drawing(&path, &mut session.canvas) {
                    session.show_notice(notice);
                }
            }
        }
        None => {}
    }

    let ctx = RenderContext::new(&session.canvas, Size::new(width as f64, height as f64))
        .with_scale_factor(scale_factor)
        .with_origin(origin)
        .with_background(state.config.background_color);
    let base_color = ctx.background_color;
    state.shape_renderer.build_scene(&ctx);
    let scene = state.shape_renderer.take_scene();

    let egui_primitives = state
        .egui_ctx
        .tessellate(egui_output.shapes, egui_output.pixels_per_point);

    let surface_texture = match state.surface.surface.get_current_texture() {
        Ok(t) => t,
        Err(e) => {
            log::warn!("Failed to get surface texture: {:?}", e);
            return;
        }
    };

    // Vello needs a storage-bindable Rgba8Unorm target; blit to the surface after.
    let render_texture = device.create_texture(&vello::wgpu::TextureDescriptor {
        label: Some("vello render texture"),
        size: vello::wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: vello::wgpu::TextureDimension::D2,
        format: vello::wgpu::TextureFormat::Rgba8Unorm,
        usage: vello::wgpu::TextureUsages::STORAGE_BINDING
            | vello::wgpu::TextureUsages::COPY_SRC
            | vello::wgpu::TextureUsages::TEXTURE_BINDING,
        view_formats: &[],
    });
    let render_texture_view =
        render_texture.create_view(&vello::wgpu::TextureViewDescriptor::default());

    let params = RenderParams {
        base_color,
        width,
        height,
        antialiasing_method: AaConfig::Area,
    };
    if let Err(e) =
        state
            .vello_renderer
            .render_to_texture(device, queue, &scene, &render_texture_view, &params)
    {
        log::error!("Failed to render: {:?}", e);
        return;
    }

    let surface_view = surface_texture
        .texture
        .create_view(&vello::wgpu::TextureViewDescriptor::default());
    {
        let mut blit_encoder =
            device.create_command_encoder(&vello::wgpu::CommandEncoderDescriptor {
                label: Some("blit encoder"),
            });
        state
            .texture_blitter
            .copy(device, &mut blit_encoder, &render_texture_view, &surface_view);
        queue.submit(std::iter::once(blit_encoder.finish()));
    }

    for (id, image_delta) in &egui_output.textures_delta.set {
        state
            .egui_renderer
            .update_texture(device, queue, *id, image_delta);
    }

    let screen_descriptor = egui_wgpu::ScreenDescriptor {
        size_in_pixels: [width, height],
        pixels_per_point: egui_output.pixels_per_point,
    };
    {
        let mut egui_encoder =
            device.create_command_encoder(&vello::wgpu::CommandEncoderDescriptor {
                label: Some("egui encoder"),
            });
        state.egui_renderer.update_buffers(
            device,
            queue,
            &mut egui_encoder,
            &egui_primitives,
            &screen_descriptor,
        );

        let render_pass = egui_encoder.begin_render_pass(&vello::wgpu::RenderPassDescriptor {
            label: Some("egui render pass"),
            color_attachments: &[Some(vello::wgpu::RenderPassColorAttachment {
                view: &surface_view,
                resolve_target: None,
                ops: vello::wgpu::Operations {
                    load: vello::wgpu::LoadOp::Load,
                    store: vello::wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        // egui-wgpu wants a 'static pass
        let mut render_pass = render_pass.forget_lifetime();
        state
            .egui_renderer
            .render(&mut render_pass, &egui_primitives, &screen_descriptor);
        drop(render_pass);
        queue.submit(std::iter::once(egui_encoder.finish()));
    }

    for id in &egui_output.textures_delta.free {
        state.egui_renderer.free_texture(id);
    }
    surface_texture.present();
}

/// Render the drawing for a bitmap export.
fn rasterize(
    device: &vello::wgpu::Device,
    queue: &vello::wgpu::Queue,
    vello_renderer: &mut vello::Renderer,
    shape_renderer: &mut VelloRenderer,
    canvas: &inkwheel_core::Canvas,
    width: u32,
    height: u32,
) -> ExportResult<RasterImage> {
    let size = Size::new(width as f64, height as f64);
    let scene = shape_renderer.build_export_scene(&canvas.drawing, size);
    let rgba = render_scene_to_rgba(device, queue, vello_renderer, &scene, width, height)
        .map_err(|e| ExportError::Render(e.to_string()))?;
    RasterImage::new(width, height, rgba)
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }
        if let Err(e) = self.init(event_loop) {
            log::error!("Failed to initialize: {}", e);
            self.fatal = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(state) = &mut self.state else {
            return;
        };

        let egui_response = state.egui_state.on_window_event(&state.window, &event);
        let ui_wants_pointer = egui_response.consumed
            || state.egui_ctx.is_pointer_over_area()
            || state.egui_ctx.wants_pointer_input();
        let modal_open =
            state.session.ui_state.picker_open || state.session.ui_state.notice.is_some();

        match event {
            WindowEvent::CloseRequested => {
                state.session.persist();
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if size.width == 0 || size.height == 0 {
                    return;
                }
                if let Some(render_cx) = self.render_cx.as_mut() {
                    render_cx.resize_surface(&mut state.surface, size.width, size.height);
                }
                state.window.request_redraw();
            }

            WindowEvent::Focused(false) => {
                state.session.lose_capture();
            }

            WindowEvent::RedrawRequested => {
                if let Some(render_cx) = self.render_cx.as_ref() {
                    redraw(state, render_cx);
                }
                state.window.request_redraw();
            }

            WindowEvent::CursorMoved { position, .. } => {
                let logical = position.to_logical::<f64>(state.window.scale_factor());
                if state.session.cursor_moved(Point::new(logical.x, logical.y)) {
                    state.window.request_redraw();
                }
            }

            WindowEvent::MouseInput {
                state: button_state,
                button,
                ..
            } => {
                let Some(button) = map_button(button) else {
                    return;
                };
                let pressed = button_state == ElementState::Pressed;
                // Modals block the canvas
                let blocked = ui_wants_pointer || (pressed && modal_open);
                if state.session.mouse_input(button, pressed, blocked) {
                    state.window.request_redraw();
                }
            }

            WindowEvent::ModifiersChanged(modifiers) => {
                state.modifiers = modifiers.state();
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed
                    || modal_open
                    || state.egui_ctx.wants_keyboard_input()
                {
                    return;
                }
                let key = match &event.logical_key {
                    Key::Character(c) => c.to_string(),
                    Key::Named(NamedKey::Escape) => "escape".to_string(),
                    _ => return,
                };
                let ctrl = state.modifiers.control_key() || state.modifiers.super_key();
                if let Some(action) = ShortcutRegistry::action_for(&key, ctrl) {
                    log::debug!("Shortcut {} -> {:?}", key, action);
                    state.session.handle(action);
                    state.window.request_redraw();
                }
            }

            _ => {}
        }
    }
}
