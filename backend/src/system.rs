use std::fmt;

use sdl2::event::Event;
use sdl2::messagebox::{show_simple_message_box, MessageBoxFlag};
use sdl2::video::GLProfile;

use crate::error::GlError;
use crate::native::NativeGl;

/// Which OpenGL flavour to ask SDL for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GlProfile {
    /// Desktop core profile 3.3; needs a vertex array object.
    #[default]
    Core33,
    /// OpenGL ES 2.0, the WebGL 1 feature level.
    Gles20,
}

impl GlProfile {
    pub fn version(&self) -> (u8, u8) {
        match self {
            GlProfile::Core33 => (3, 3),
            GlProfile::Gles20 => (2, 0),
        }
    }

    pub fn needs_vertex_array(&self) -> bool {
        matches!(self, GlProfile::Core33)
    }

    fn sdl_profile(&self) -> GLProfile {
        match self {
            GlProfile::Core33 => GLProfile::Core,
            GlProfile::Gles20 => GLProfile::GLES,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SystemConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub profile: GlProfile,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            title: "Quad".to_string(),
            width: 800,
            height: 600,
            profile: GlProfile::default(),
        }
    }
}

/// User-facing notification raised when no context can be obtained.
pub trait Alert {
    fn alert(&mut self, message: &str);
}

/// Shows an SDL error message box.
pub struct MessageBoxAlert;

impl Alert for MessageBoxAlert {
    fn alert(&mut self, message: &str) {
        let no_parent: Option<&sdl2::video::Window> = None;
        if let Err(e) = show_simple_message_box(MessageBoxFlag::ERROR, "Error", message, no_parent) {
            log::error!("cannot show message box: {e}");
        }
    }
}

pub const CONTEXT_FAILURE_MESSAGE: &str = "Unable to initialise OpenGL";

/// Runs `attempt`; on failure logs the error and raises `alert` once.
pub fn notify_on_failure<T, E, F, A>(attempt: F, alert: &mut A) -> Option<T>
where
    E: fmt::Display,
    F: FnOnce() -> Result<T, E>,
    A: Alert + ?Sized,
{
    match attempt() {
        Ok(value) => Some(value),
        Err(e) => {
            log::error!("error: {e}");
            alert.alert(CONTEXT_FAILURE_MESSAGE);
            None
        }
    }
}

pub struct System {
    pub w: u32,
    pub h: u32,
    pub profile: GlProfile,
    pub sdl_context: sdl2::Sdl,
    pub video_subsystem: sdl2::VideoSubsystem,
    pub window: sdl2::video::Window,
    pub gl_ctx: sdl2::video::GLContext,
}

impl System {
    pub fn new(config: &SystemConfig) -> Result<System, GlError> {
        let sdl_context = sdl2::init().map_err(GlError::ContextUnavailable)?;
        let video_subsystem = sdl_context.video().map_err(GlError::ContextUnavailable)?;

        let (major, minor) = config.profile.version();
        let gl_attr = video_subsystem.gl_attr();
        gl_attr.set_context_profile(config.profile.sdl_profile());
        gl_attr.set_context_version(major, minor);
        gl_attr.set_double_buffer(true);

        let window = match video_subsystem
            .window(&config.title, config.width, config.height)
            .opengl()
            .build()
        {
            Ok(w) => w,
            Err(e) => {
                return Err(GlError::ContextUnavailable(format!(
                    "Error while building OpenGL window: {e}"
                )))
            }
        };

        let gl_ctx = window
            .gl_create_context()
            .map_err(GlError::ContextUnavailable)?;
        gl::load_with(|name| video_subsystem.gl_get_proc_address(name) as *const _);

        debug_assert_eq!(gl_attr.context_profile(), config.profile.sdl_profile());
        debug_assert_eq!(gl_attr.context_version(), (major, minor));
        log::info!(
            "{}x{} window with OpenGL {:?} {}.{} context",
            config.width,
            config.height,
            config.profile,
            major,
            minor
        );

        Ok(System {
            w: config.width,
            h: config.height,
            profile: config.profile,
            sdl_context,
            window,
            video_subsystem,
            gl_ctx,
        })
    }

    /// Like [`System::new`], but reports a failure to the log and `alert`
    /// instead of returning it.
    pub fn open<A: Alert + ?Sized>(config: &SystemConfig, alert: &mut A) -> Option<System> {
        notify_on_failure(|| System::new(config), alert)
    }

    /// GL entry points bound to this system's context.
    pub fn gl(&self) -> NativeGl<'_> {
        NativeGl::new(&self.gl_ctx)
    }

    pub fn present(&self) {
        self.window.gl_swap_window();
    }

    /// Blocks until the window is closed. Nothing is redrawn meanwhile.
    pub fn wait_for_close(&self) -> Result<(), GlError> {
        let mut event_pump = self
            .sdl_context
            .event_pump()
            .map_err(GlError::ContextUnavailable)?;

        loop {
            if let Event::Quit { .. } = event_pump.wait_event() {
                log::debug!("quit requested");
                return Ok(());
            }
        }
    }
}
