//! The winit/softbuffer backend adapter

use crate::events::Translator;
use crate::raster::{self, Canvas};
use slate_core::{
    Color, CornerRadius, CursorStyle, Dimensions, FontId, ImageKey, InputEvent, Painter, Point,
    Rect, RenderCommand,
};
use slate_engine::{
    Backend, BackendError, CommandInterpreter, FontTable, FrameInfo, LayoutEngine, Result,
    ShellConfig,
};
use slotmap::SlotMap;
use softbuffer::{Context, Surface};
use std::num::NonZeroU32;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{CursorIcon, Fullscreen, Window, WindowAttributes, WindowId};

/// Window options beyond the shared shell configuration
#[derive(Clone, Copy, Debug)]
pub struct WinitOptions {
    pub resizable: bool,
    pub decorations: bool,
}

impl Default for WinitOptions {
    fn default() -> Self {
        Self {
            resizable: true,
            decorations: true,
        }
    }
}

/// Font resource: a parsed face plus its logical pixel size
struct CpuFont {
    font: fontdue::Font,
    size: f32,
}

/// Decoded RGBA image
struct CpuImage {
    pixels: Vec<u8>,
    width: u32,
    height: u32,
}

/// Presentation state, created once the window exists
struct Gfx {
    window: Arc<Window>,
    _context: Context<Arc<Window>>,
    surface: Surface<Arc<Window>, Arc<Window>>,
}

/// The winit application handler fed by `pump_app_events`
struct PumpApp {
    attrs: WindowAttributes,
    window: Option<Arc<Window>>,
    translator: Translator,
    events: Vec<InputEvent>,
}

impl ApplicationHandler for PumpApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        match event_loop.create_window(self.attrs.clone()) {
            Ok(window) => self.window = Some(Arc::new(window)),
            Err(e) => tracing::error!("window creation failed: {e}"),
        }
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let scale = self.window.as_ref().map_or(1.0, |w| w.scale_factor());
        self.translator.translate(&event, scale, &mut self.events);
    }
}

/// Backend adapter over winit windowing and a softbuffer framebuffer
pub struct WinitBackend {
    event_loop: EventLoop<()>,
    app: PumpApp,
    gfx: Option<Gfx>,
    fonts: FontTable<CpuFont>,
    images: SlotMap<ImageKey, CpuImage>,
    start: Instant,
    fallback_scale: f32,
    logical: Dimensions,
}

impl WinitBackend {
    pub fn new(config: &ShellConfig, options: WinitOptions) -> Result<Self> {
        let event_loop =
            EventLoop::new().map_err(|e| BackendError::EventPump(e.to_string()))?;
        let attrs = Window::default_attributes()
            .with_title(&config.window_title)
            .with_inner_size(LogicalSize::new(
                config.window_width as f64,
                config.window_height as f64,
            ))
            .with_resizable(options.resizable)
            .with_decorations(options.decorations);

        Ok(Self {
            event_loop,
            app: PumpApp {
                attrs,
                window: None,
                translator: Translator::default(),
                events: Vec::new(),
            },
            gfx: None,
            fonts: FontTable::new(),
            images: SlotMap::with_key(),
            start: Instant::now(),
            fallback_scale: config.effective_scale_factor(),
            logical: Dimensions::new(config.window_width, config.window_height),
        })
    }

    fn ensure_gfx(&mut self) -> Result<()> {
        if self.gfx.is_some() {
            return Ok(());
        }
        let Some(window) = self.app.window.clone() else {
            return Ok(());
        };
        let context = Context::new(window.clone())
            .map_err(|e| BackendError::RendererCreation(e.to_string()))?;
        let surface = Surface::new(&context, window.clone())
            .map_err(|e| BackendError::RendererCreation(e.to_string()))?;
        tracing::debug!("softbuffer surface created");
        self.gfx = Some(Gfx {
            window,
            _context: context,
            surface,
        });
        Ok(())
    }
}

impl Backend for WinitBackend {
    fn poll_events(&mut self, out: &mut Vec<InputEvent>) -> Result<()> {
        let status = self
            .event_loop
            .pump_app_events(Some(Duration::ZERO), &mut self.app);
        if let PumpStatus::Exit(_) = status {
            out.push(InputEvent::CloseRequested);
        }
        out.append(&mut self.app.events);
        for event in out.iter() {
            if let InputEvent::Resized { size } = event {
                self.logical = *size;
            }
        }
        Ok(())
    }

    fn render(
        &mut self,
        commands: &[RenderCommand],
        interpreter: &mut CommandInterpreter,
        layout: &dyn LayoutEngine,
        frame: &FrameInfo,
    ) -> Result<()> {
        self.ensure_gfx()?;
        let Self {
            gfx, fonts, images, ..
        } = self;
        let Some(gfx) = gfx.as_mut() else {
            // Window not delivered yet; nothing to present
            return Ok(());
        };

        let size = gfx.window.inner_size();
        let (Some(w), Some(h)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
        else {
            return Ok(());
        };
        gfx.surface
            .resize(w, h)
            .map_err(|e| BackendError::Present(e.to_string()))?;
        let mut buffer = gfx
            .surface
            .buffer_mut()
            .map_err(|e| BackendError::Present(e.to_string()))?;

        let [r, g, b, _] = frame.theme.background.to_rgba8();
        buffer.fill(u32::from_be_bytes([0, r, g, b]));

        let scale = gfx.window.scale_factor() as f32;
        {
            let canvas = Canvas {
                buf: &mut buffer[..],
                width: size.width,
                height: size.height,
            };
            let mut painter = SoftPainter {
                canvas,
                fonts,
                images,
                scale,
                clip: Vec::new(),
            };
            interpreter.execute(commands, &mut painter, layout, frame);
        }

        buffer
            .present()
            .map_err(|e| BackendError::Present(e.to_string()))?;

        let icon = match interpreter.cursor() {
            CursorStyle::Pointer => CursorIcon::Pointer,
            CursorStyle::Default => CursorIcon::Default,
        };
        gfx.window.set_cursor(icon);
        Ok(())
    }

    fn load_font(&mut self, path: &Path, size: f32, slot: u16) -> Result<FontId> {
        let bytes = std::fs::read(path)
            .map_err(|e| BackendError::FontLoad(format!("{}: {e}", path.display())))?;
        let font = fontdue::Font::from_bytes(
            bytes,
            fontdue::FontSettings {
                scale: size,
                ..Default::default()
            },
        )
        .map_err(|e| BackendError::FontLoad(e.to_string()))?;
        let id = self.fonts.load(slot, CpuFont { font, size })?;
        tracing::debug!(slot, size, path = %path.display(), "font loaded");
        Ok(id)
    }

    fn unload_font(&mut self, font: FontId) {
        self.fonts.unload(font);
    }

    fn load_image(&mut self, path: &Path) -> Result<ImageKey> {
        let decoded = image::open(path)
            .map_err(|e| BackendError::ImageLoad(format!("{}: {e}", path.display())))?
            .to_rgba8();
        let (width, height) = decoded.dimensions();
        let key = self.images.insert(CpuImage {
            pixels: decoded.into_raw(),
            width,
            height,
        });
        tracing::debug!(width, height, path = %path.display(), "image loaded");
        Ok(key)
    }

    fn load_image_bytes(&mut self, bytes: &[u8]) -> Result<ImageKey> {
        let decoded = image::load_from_memory(bytes)
            .map_err(|e| BackendError::ImageLoad(e.to_string()))?
            .to_rgba8();
        let (width, height) = decoded.dimensions();
        Ok(self.images.insert(CpuImage {
            pixels: decoded.into_raw(),
            width,
            height,
        }))
    }

    fn unload_image(&mut self, image: ImageKey) {
        self.images.remove(image);
    }

    fn image_dimensions(&self, image: ImageKey) -> Option<Dimensions> {
        self.images
            .get(image)
            .map(|img| Dimensions::new(img.width as f32, img.height as f32))
    }

    fn measure_text(&self, text: &str, font: FontId) -> Dimensions {
        let Some(f) = self.fonts.get(font) else {
            return Dimensions::default();
        };
        let width: f32 = text
            .chars()
            .map(|c| f.font.metrics(c, f.size).advance_width)
            .sum();
        let height = f
            .font
            .horizontal_line_metrics(f.size)
            .map_or(f.size, |m| m.new_line_size);
        Dimensions::new(width, height)
    }

    fn now(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }

    fn scale_factor(&self) -> f32 {
        self.app
            .window
            .as_ref()
            .map_or(self.fallback_scale, |w| w.scale_factor() as f32)
    }

    fn logical_size(&self) -> Dimensions {
        self.logical
    }

    fn set_window_size(&mut self, size: Dimensions) {
        if let Some(window) = &self.app.window {
            let _ = window.request_inner_size(LogicalSize::new(
                size.width as f64,
                size.height as f64,
            ));
        }
        self.logical = size;
    }

    fn toggle_fullscreen(&mut self) {
        if let Some(window) = &self.app.window {
            if window.fullscreen().is_some() {
                window.set_fullscreen(None);
            } else {
                window.set_fullscreen(Some(Fullscreen::Borderless(None)));
            }
        }
    }
}

/// Painter over the softbuffer framebuffer
struct SoftPainter<'a> {
    canvas: Canvas<'a>,
    fonts: &'a FontTable<CpuFont>,
    images: &'a SlotMap<ImageKey, CpuImage>,
    scale: f32,
    /// Stack of pre-intersected clip rects in physical pixels
    clip: Vec<Rect>,
}

impl SoftPainter<'_> {
    fn current_clip(&self) -> Rect {
        self.clip.last().copied().unwrap_or(Rect::new(
            0.0,
            0.0,
            self.canvas.width as f32,
            self.canvas.height as f32,
        ))
    }

    fn scaled_radius(&self, radius: CornerRadius) -> CornerRadius {
        CornerRadius {
            top_left: radius.top_left * self.scale,
            top_right: radius.top_right * self.scale,
            bottom_right: radius.bottom_right * self.scale,
            bottom_left: radius.bottom_left * self.scale,
        }
    }
}

impl Painter for SoftPainter<'_> {
    fn fill_rect(&mut self, rect: Rect, radius: CornerRadius, color: Color) {
        let clip = self.current_clip();
        let scaled_rect = rect.scaled(self.scale);
        let scaled_radius = self.scaled_radius(radius);
        raster::fill_rect(
            &mut self.canvas,
            scaled_rect,
            scaled_radius,
            color,
            clip,
        );
    }

    fn draw_text(&mut self, pos: Point, text: &str, font: FontId, color: Color) {
        let Some(f) = self.fonts.get(font) else {
            return;
        };
        let clip = self.current_clip();
        let px = f.size * self.scale;
        let ascent = f
            .font
            .horizontal_line_metrics(px)
            .map_or(px, |m| m.ascent);

        let mut pen_x = pos.x * self.scale;
        let baseline = pos.y * self.scale + ascent;
        for c in text.chars() {
            let (metrics, bitmap) = f.font.rasterize(c, px);
            if metrics.width > 0 && metrics.height > 0 {
                raster::blit_mask(
                    &mut self.canvas,
                    &bitmap,
                    metrics.width as u32,
                    metrics.height as u32,
                    pen_x + metrics.xmin as f32,
                    baseline - metrics.height as f32 - metrics.ymin as f32,
                    color,
                    clip,
                );
            }
            pen_x += metrics.advance_width;
        }
    }

    fn draw_image(&mut self, rect: Rect, image: ImageKey) {
        let Some(img) = self.images.get(image) else {
            tracing::trace!("stale image handle");
            return;
        };
        let clip = self.current_clip();
        raster::blit_rgba(
            &mut self.canvas,
            &img.pixels,
            img.width,
            img.height,
            rect.scaled(self.scale),
            clip,
        );
    }

    fn push_clip(&mut self, rect: Rect) {
        let next = rect.scaled(self.scale).intersect(self.current_clip());
        self.clip.push(next);
    }

    fn pop_clip(&mut self) {
        self.clip.pop();
    }

    fn has_font(&self, font: FontId) -> bool {
        self.fonts.contains(font)
    }
}
