//! The SDL2 backend adapter

use crate::events;
use sdl2::gfx::primitives::DrawRenderer;
use sdl2::image::{InitFlag, LoadTexture, Sdl2ImageContext};
use sdl2::mouse::{Cursor as SdlCursor, SystemCursor};
use sdl2::pixels::Color as SdlColor;
use sdl2::rect::Rect as SdlRect;
use sdl2::render::{BlendMode, Canvas, Texture, TextureCreator, TextureQuery};
use sdl2::ttf::{Font, Sdl2TtfContext};
use sdl2::video::{FullscreenType, Window, WindowContext};
use sdl2::{EventPump, Sdl, VideoSubsystem};
use slate_core::{
    Color, CornerRadius, CursorStyle, Dimensions, FontId, ImageKey, InputEvent, Painter, Point,
    Rect, RenderCommand,
};
use slate_engine::{
    Backend, BackendError, CommandInterpreter, FontTable, FrameInfo, LayoutEngine, Result,
    ShellConfig,
};
use slotmap::SlotMap;
use std::path::Path;
use std::time::Instant;

/// Window options beyond the shared shell configuration
#[derive(Clone, Copy, Debug)]
pub struct SdlOptions {
    pub vsync: bool,
    pub resizable: bool,
}

impl Default for SdlOptions {
    fn default() -> Self {
        Self {
            vsync: true,
            resizable: true,
        }
    }
}

/// Backend adapter over an SDL2 window and accelerated canvas
pub struct SdlBackend {
    _sdl: Sdl,
    video: VideoSubsystem,
    _image: Sdl2ImageContext,
    /// Leaked so fonts can be stored beside it; lives for the process
    ttf: &'static Sdl2TtfContext,
    canvas: Canvas<Window>,
    texture_creator: TextureCreator<WindowContext>,
    event_pump: EventPump,
    fonts: FontTable<Font<'static, 'static>>,
    images: SlotMap<ImageKey, Texture>,
    default_cursor: SdlCursor,
    pointer_cursor: SdlCursor,
    current_cursor: CursorStyle,
    start: Instant,
    scale: f32,
    logical: Dimensions,
}

impl SdlBackend {
    pub fn new(config: &ShellConfig, options: SdlOptions) -> Result<Self> {
        let sdl = sdl2::init().map_err(BackendError::WindowCreation)?;
        let video = sdl.video().map_err(BackendError::WindowCreation)?;
        let image_ctx = sdl2::image::init(InitFlag::PNG | InitFlag::JPG)
            .map_err(BackendError::RendererCreation)?;
        let ttf = sdl2::ttf::init().map_err(|e| BackendError::FontLoad(e.to_string()))?;
        let ttf: &'static Sdl2TtfContext = Box::leak(Box::new(ttf));

        let scale = config.effective_scale_factor();
        let mut builder = video.window(
            &config.window_title,
            (config.window_width * scale) as u32,
            (config.window_height * scale) as u32,
        );
        builder.position_centered();
        if options.resizable {
            builder.resizable();
        }
        let window = builder
            .build()
            .map_err(|e| BackendError::WindowCreation(e.to_string()))?;

        let mut canvas_builder = window.into_canvas().accelerated().target_texture();
        if options.vsync {
            canvas_builder = canvas_builder.present_vsync();
        }
        let mut canvas = canvas_builder
            .build()
            .map_err(|e| BackendError::RendererCreation(e.to_string()))?;
        canvas.set_blend_mode(BlendMode::Blend);
        let texture_creator = canvas.texture_creator();

        let event_pump = sdl.event_pump().map_err(BackendError::EventPump)?;
        let default_cursor = SdlCursor::from_system(SystemCursor::Arrow)
            .map_err(BackendError::WindowCreation)?;
        let pointer_cursor = SdlCursor::from_system(SystemCursor::Hand)
            .map_err(BackendError::WindowCreation)?;
        default_cursor.set();

        tracing::debug!(scale, "SDL backend initialized");
        Ok(Self {
            _sdl: sdl,
            video,
            _image: image_ctx,
            ttf,
            canvas,
            texture_creator,
            event_pump,
            fonts: FontTable::new(),
            images: SlotMap::with_key(),
            default_cursor,
            pointer_cursor,
            current_cursor: CursorStyle::Default,
            start: Instant::now(),
            scale,
            logical: Dimensions::new(config.window_width, config.window_height),
        })
    }
}

impl Drop for SdlBackend {
    fn drop(&mut self) {
        // unsafe_textures hands us manual texture lifetime management
        for (_, texture) in self.images.drain() {
            unsafe { texture.destroy() }
        }
    }
}

impl Backend for SdlBackend {
    fn poll_events(&mut self, out: &mut Vec<InputEvent>) -> Result<()> {
        let window_size = self.canvas.window().size();
        let mut toggle_fullscreen = false;
        for event in self.event_pump.poll_iter() {
            toggle_fullscreen |= events::translate(&event, window_size, self.scale, out);
        }
        if toggle_fullscreen {
            self.toggle_fullscreen();
        }
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
        let Self {
            canvas,
            texture_creator,
            fonts,
            images,
            scale,
            default_cursor,
            pointer_cursor,
            current_cursor,
            ..
        } = self;

        let [r, g, b, _] = frame.theme.background.to_rgba8();
        canvas.set_draw_color(SdlColor::RGBA(r, g, b, 255));
        canvas.clear();

        {
            let mut painter = SdlPainter {
                canvas,
                texture_creator,
                fonts,
                images,
                scale: *scale,
                clip: Vec::new(),
            };
            interpreter.execute(commands, &mut painter, layout, frame);
        }

        let style = interpreter.cursor();
        if style != *current_cursor {
            match style {
                CursorStyle::Pointer => pointer_cursor.set(),
                CursorStyle::Default => default_cursor.set(),
            }
            *current_cursor = style;
        }

        canvas.present();
        Ok(())
    }

    fn load_font(&mut self, path: &Path, size: f32, slot: u16) -> Result<FontId> {
        let font = self
            .ttf
            .load_font(path, (size * self.scale) as u16)
            .map_err(BackendError::FontLoad)?;
        let id = self.fonts.load(slot, font)?;
        tracing::debug!(slot, size, path = %path.display(), "font loaded");
        Ok(id)
    }

    fn unload_font(&mut self, font: FontId) {
        self.fonts.unload(font);
    }

    fn load_image(&mut self, path: &Path) -> Result<ImageKey> {
        let texture = self
            .texture_creator
            .load_texture(path)
            .map_err(BackendError::ImageLoad)?;
        let TextureQuery { width, height, .. } = texture.query();
        tracing::debug!(width, height, path = %path.display(), "image loaded");
        Ok(self.images.insert(texture))
    }

    fn load_image_bytes(&mut self, bytes: &[u8]) -> Result<ImageKey> {
        let texture = self
            .texture_creator
            .load_texture_bytes(bytes)
            .map_err(BackendError::ImageLoad)?;
        Ok(self.images.insert(texture))
    }

    fn unload_image(&mut self, image: ImageKey) {
        if let Some(texture) = self.images.remove(image) {
            unsafe { texture.destroy() }
        }
    }

    fn image_dimensions(&self, image: ImageKey) -> Option<Dimensions> {
        self.images.get(image).map(|texture| {
            let TextureQuery { width, height, .. } = texture.query();
            Dimensions::new(width as f32, height as f32)
        })
    }

    fn measure_text(&self, text: &str, font: FontId) -> Dimensions {
        let Some(f) = self.fonts.get(font) else {
            return Dimensions::default();
        };
        if text.is_empty() {
            return Dimensions::new(0.0, f.height() as f32 / self.scale);
        }
        match f.size_of(text) {
            Ok((w, h)) => Dimensions::new(w as f32 / self.scale, h as f32 / self.scale),
            Err(e) => {
                tracing::warn!("text measurement failed: {e}");
                Dimensions::default()
            }
        }
    }

    fn now(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }

    fn scale_factor(&self) -> f32 {
        self.scale
    }

    fn logical_size(&self) -> Dimensions {
        self.logical
    }

    fn set_window_size(&mut self, size: Dimensions) {
        let w = (size.width * self.scale) as u32;
        let h = (size.height * self.scale) as u32;
        if let Err(e) = self.canvas.window_mut().set_size(w, h) {
            tracing::warn!("window resize failed: {e}");
            return;
        }
        self.logical = size;
    }

    fn toggle_fullscreen(&mut self) {
        let window = self.canvas.window_mut();
        let next = match window.fullscreen_state() {
            FullscreenType::Off => FullscreenType::Desktop,
            _ => FullscreenType::Off,
        };
        if let Err(e) = window.set_fullscreen(next) {
            tracing::warn!("fullscreen toggle failed: {e}");
        }
    }

    fn start_text_input(&mut self) {
        self.video.text_input().start();
    }

    fn stop_text_input(&mut self) {
        self.video.text_input().stop();
    }
}

fn to_sdl_rect(rect: Rect) -> SdlRect {
    SdlRect::new(
        rect.x as i32,
        rect.y as i32,
        rect.width.max(0.0) as u32,
        rect.height.max(0.0) as u32,
    )
}

fn to_sdl_color(color: Color) -> SdlColor {
    let [r, g, b, a] = color.to_rgba8();
    SdlColor::RGBA(r, g, b, a)
}

/// The one nonzero corner of a radius, if exactly one is set (border caps)
fn single_corner(radius: &CornerRadius) -> Option<(u8, f32)> {
    let corners = [
        radius.top_left,
        radius.top_right,
        radius.bottom_right,
        radius.bottom_left,
    ];
    let mut found = None;
    for (index, r) in corners.into_iter().enumerate() {
        if r > 0.0 {
            if found.is_some() {
                return None;
            }
            found = Some((index as u8, r));
        }
    }
    found
}

/// Painter over the SDL canvas
struct SdlPainter<'a> {
    canvas: &'a mut Canvas<Window>,
    texture_creator: &'a TextureCreator<WindowContext>,
    fonts: &'a FontTable<Font<'static, 'static>>,
    images: &'a SlotMap<ImageKey, Texture>,
    scale: f32,
    /// Pre-intersected clip rects in physical pixels
    clip: Vec<Rect>,
}

impl SdlPainter<'_> {
    fn apply_clip(&mut self) {
        match self.clip.last() {
            Some(rect) => self.canvas.set_clip_rect(Some(to_sdl_rect(*rect))),
            None => self.canvas.set_clip_rect(None),
        }
    }
}

impl Painter for SdlPainter<'_> {
    fn fill_rect(&mut self, rect: Rect, radius: CornerRadius, color: Color) {
        let rect = rect.scaled(self.scale);
        let sdl_color = to_sdl_color(color);
        let x1 = rect.x as i16;
        let y1 = rect.y as i16;
        let x2 = (rect.x + rect.width) as i16;
        let y2 = (rect.y + rect.height) as i16;

        let result = if radius.is_zero() {
            self.canvas.set_draw_color(sdl_color);
            self.canvas.fill_rect(to_sdl_rect(rect))
        } else if let Some((corner, r)) = single_corner(&radius) {
            // Border corner caps: a quarter pie filling the arc's quadrant.
            // SDL gfx angles are degrees clockwise from east (y points down).
            let rad = (r * self.scale) as i16;
            match corner {
                0 => self.canvas.filled_pie(x2, y2, rad, 180, 270, sdl_color),
                1 => self.canvas.filled_pie(x1, y2, rad, 270, 360, sdl_color),
                2 => self.canvas.filled_pie(x1, y1, rad, 0, 90, sdl_color),
                _ => self.canvas.filled_pie(x2, y1, rad, 90, 180, sdl_color),
            }
        } else {
            let rad = (radius.top_left * self.scale) as i16;
            self.canvas.rounded_box(x1, y1, x2, y2, rad, sdl_color)
        };

        if let Err(e) = result {
            tracing::warn!("rect draw failed: {e}");
        }
    }

    fn draw_text(&mut self, pos: Point, text: &str, font: FontId, color: Color) {
        let Some(f) = self.fonts.get(font) else {
            return;
        };
        if text.is_empty() {
            return;
        }
        let surface = match f.render(text).blended(to_sdl_color(color)) {
            Ok(surface) => surface,
            Err(e) => {
                tracing::warn!("text render failed: {e}");
                return;
            }
        };
        let texture = match self.texture_creator.create_texture_from_surface(&surface) {
            Ok(texture) => texture,
            Err(e) => {
                tracing::warn!("text texture failed: {e}");
                return;
            }
        };
        let TextureQuery { width, height, .. } = texture.query();
        let dest = SdlRect::new(
            (pos.x * self.scale) as i32,
            (pos.y * self.scale) as i32,
            width,
            height,
        );
        if let Err(e) = self.canvas.copy(&texture, None, Some(dest)) {
            tracing::warn!("text blit failed: {e}");
        }
        unsafe { texture.destroy() }
    }

    fn draw_image(&mut self, rect: Rect, image: ImageKey) {
        let Some(texture) = self.images.get(image) else {
            tracing::trace!("stale image handle");
            return;
        };
        let dest = to_sdl_rect(rect.scaled(self.scale));
        if let Err(e) = self.canvas.copy(texture, None, Some(dest)) {
            tracing::warn!("image blit failed: {e}");
        }
    }

    fn push_clip(&mut self, rect: Rect) {
        let physical = rect.scaled(self.scale);
        let next = match self.clip.last() {
            Some(current) => physical.intersect(*current),
            None => physical,
        };
        self.clip.push(next);
        self.apply_clip();
    }

    fn pop_clip(&mut self) {
        self.clip.pop();
        self.apply_clip();
    }

    fn has_font(&self, font: FontId) -> bool {
        self.fonts.contains(font)
    }
}
