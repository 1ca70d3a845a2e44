//! Frame driver
//!
//! [`Shell`] owns every interaction singleton and runs the synchronous
//! frame loop with strict phase ordering:
//!
//! 1. pump and translate native events
//! 2. feed the scroll-interaction engine (hit-testing against the previous
//!    frame's registry)
//! 3. integrate momentum
//! 4. let the application rebuild the layout and collect the command list
//! 5. interpret and present (which rebuilds the registry for the next frame)
//!
//! No locks: the phases never overlap, and every piece of state has exactly
//! one writing phase.

use crate::arena::FrameArena;
use crate::backend::Backend;
use crate::error::{EngineError, Result};
use crate::interpreter::{CommandInterpreter, FrameInfo};
use crate::layout::LayoutEngine;
use crate::scroll::{ScrollInteraction, ScrollTuning};
use crate::session::Session;
use serde::Deserialize;
use slate_core::{Dimensions, InputEvent, InputState, Point, Theme, Vec2};

const DEFAULT_ARENA_CAPACITY: usize = 8 * 1024 * 1024;

/// Process configuration, deserializable from TOML
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    pub window_title: String,
    /// Logical window width
    pub window_width: f32,
    /// Logical window height
    pub window_height: f32,
    /// Display scale factor; non-positive values fall back to 1.0
    pub scale_factor: f32,
    /// Capacity of the per-frame bump arena in bytes
    pub arena_capacity: usize,
    pub theme: Theme,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            window_title: "slate".to_string(),
            window_width: 800.0,
            window_height: 600.0,
            scale_factor: 1.0,
            arena_capacity: DEFAULT_ARENA_CAPACITY,
            theme: Theme::default(),
        }
    }
}

impl ShellConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| EngineError::Config(e.to_string()))
    }

    /// Scale factor with the non-positive fallback applied
    pub fn effective_scale_factor(&self) -> f32 {
        if self.scale_factor > 0.0 {
            self.scale_factor
        } else {
            1.0
        }
    }
}

/// The application shell: one backend, one layout engine, one of each
/// interaction singleton
pub struct Shell<B: Backend, L: LayoutEngine> {
    config: ShellConfig,
    backend: B,
    layout: L,
    input: InputState,
    scroll: ScrollInteraction,
    interpreter: CommandInterpreter,
    session: Session,
    arena: FrameArena,
    theme: Theme,
    events: Vec<InputEvent>,
    /// Pointer position at the most recent press (click-vs-drag check)
    press_origin: Option<Point>,
    running: bool,
    last_frame: f64,
}

impl<B: Backend, L: LayoutEngine> Shell<B, L> {
    pub fn new(config: ShellConfig, backend: B, mut layout: L) -> Result<Self> {
        let arena = FrameArena::with_capacity(config.arena_capacity)?;
        layout.set_layout_dimensions(Dimensions::new(config.window_width, config.window_height));
        let theme = config.theme;
        let last_frame = backend.now();
        tracing::debug!(
            title = %config.window_title,
            width = config.window_width,
            height = config.window_height,
            "shell initialized"
        );
        Ok(Self {
            config,
            backend,
            layout,
            input: InputState::default(),
            scroll: ScrollInteraction::new(ScrollTuning::default()),
            interpreter: CommandInterpreter::new(),
            session: Session::new(),
            arena,
            theme,
            events: Vec::new(),
            press_origin: None,
            running: true,
            last_frame,
        })
    }

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Swap the palette for subsequent frames
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn layout_mut(&mut self) -> &mut L {
        &mut self.layout
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn arena_mut(&mut self) -> &mut FrameArena {
        &mut self.arena
    }

    pub fn scroll(&self) -> &ScrollInteraction {
        &self.scroll
    }

    pub fn interpreter(&self) -> &CommandInterpreter {
        &self.interpreter
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn request_close(&mut self) {
        self.running = false;
    }

    /// Run frames until a close is requested
    pub fn run<F>(&mut self, mut build: F) -> Result<()>
    where
        F: FnMut(&mut L, &mut Session, &InputState),
    {
        while self.running {
            self.frame(&mut build)?;
        }
        Ok(())
    }

    /// One frame loop iteration
    pub fn frame<F>(&mut self, mut build: F) -> Result<()>
    where
        F: FnMut(&mut L, &mut Session, &InputState),
    {
        let now = self.backend.now();
        let dt = ((now - self.last_frame).max(0.0)) as f32;
        self.last_frame = now;

        self.arena.reset();
        self.input.begin_frame(dt);

        // Phase 1: pump and route events
        self.events.clear();
        self.backend.poll_events(&mut self.events)?;
        let events = std::mem::take(&mut self.events);
        for event in &events {
            self.input.apply(event);
            self.route_event(event, now, dt);
        }
        self.events = events;

        // Phase 2: momentum against the previous frame's registry
        self.scroll
            .step(dt, &mut self.layout, self.interpreter.registry());

        // Phase 3: layout pass
        self.layout
            .set_pointer_state(self.input.pointer, self.input.primary_down());
        self.layout.begin_layout();
        build(&mut self.layout, &mut self.session, &self.input);
        let commands = self.layout.end_layout();
        self.layout.update_scroll_containers(false, Vec2::ZERO, dt);

        // Widget hover notifications against the fresh geometry
        self.session.dispatch_hover(self.input.pointer, &self.layout);

        // Phase 4: interpret and present; rebuilds the registry
        let frame = FrameInfo {
            pointer: self.input.pointer,
            theme: &self.theme,
            now,
            dt,
        };
        self.backend
            .render(&commands, &mut self.interpreter, &self.layout, &frame)?;

        if self.input.close_requested {
            self.running = false;
        }
        Ok(())
    }

    fn route_event(&mut self, event: &InputEvent, now: f64, dt: f32) {
        match event {
            InputEvent::Resized { size } => {
                tracing::debug!(width = size.width, height = size.height, "window resized");
                self.config.window_width = size.width;
                self.config.window_height = size.height;
                self.layout.set_layout_dimensions(*size);
            }
            InputEvent::CloseRequested => {
                self.running = false;
            }
            InputEvent::PointerPressed { pos } => {
                self.press_origin = Some(*pos);
                self.interpreter.note_activity(now);
                self.scroll
                    .on_press(*pos, &mut self.layout, self.interpreter.registry());
            }
            InputEvent::PointerReleased { pos } => {
                let clicked = self
                    .press_origin
                    .take()
                    .is_some_and(|origin| pos.distance_to(origin) <= self.scroll.tuning.tap_distance);
                self.scroll.on_release();
                if clicked {
                    self.layout.set_pointer_state(*pos, true);
                    self.session.dispatch_click(*pos, &self.layout);
                }
            }
            InputEvent::PointerMoved { pos } => {
                self.interpreter.note_activity(now);
                self.scroll.on_pointer_move(*pos, &mut self.layout, dt);
            }
            InputEvent::Wheel { delta, pos } => {
                self.interpreter.note_activity(now);
                self.scroll.on_wheel(
                    *delta,
                    *pos,
                    &mut self.layout,
                    self.interpreter.registry(),
                    now,
                );
            }
            InputEvent::TouchDown { finger, pos } => {
                self.interpreter.note_activity(now);
                self.scroll.on_touch_down(*finger, *pos, now);
            }
            InputEvent::TouchMoved { finger, pos } => {
                self.interpreter.note_activity(now);
                self.scroll.on_touch_move(
                    *finger,
                    *pos,
                    &mut self.layout,
                    self.interpreter.registry(),
                    dt,
                );
            }
            InputEvent::TouchUp { finger, pos } => {
                if let Some(click_pos) = self.scroll.on_touch_up(*finger, *pos, now) {
                    self.layout.set_pointer_state(click_pos, true);
                    self.session.dispatch_click(click_pos, &self.layout);
                }
            }
            // Characters and edit keys are consumed by widgets from the
            // folded InputState
            InputEvent::Character(_) | InputEvent::Edit(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = ShellConfig::default();
        assert_eq!(config.window_width, 800.0);
        assert_eq!(config.arena_capacity, DEFAULT_ARENA_CAPACITY);
        assert_eq!(config.effective_scale_factor(), 1.0);
    }

    #[test]
    fn test_config_from_toml() {
        let config = ShellConfig::from_toml_str(
            r##"
            window_title = "demo"
            window_width = 1280.0
            window_height = 720.0

            [theme]
            primary = "#FF8800"
            "##,
        )
        .unwrap();
        assert_eq!(config.window_title, "demo");
        assert_eq!(config.window_width, 1280.0);
        assert_eq!(config.theme.primary.to_rgba8(), [0xFF, 0x88, 0x00, 0xFF]);
    }

    #[test]
    fn test_config_rejects_malformed_toml() {
        assert!(ShellConfig::from_toml_str("window_width = \"wide\"").is_err());
    }

    #[test]
    fn test_nonpositive_scale_factor_falls_back() {
        let config = ShellConfig {
            scale_factor: 0.0,
            ..Default::default()
        };
        assert_eq!(config.effective_scale_factor(), 1.0);
    }
}
