use serde::{Deserialize, Serialize};

/// Fixed drawing-buffer resolution of `#game-canvas`.
pub const BUFFER_WIDTH: u32 = 800;
pub const BUFFER_HEIGHT: u32 = 600;

/// Total padding subtracted from the container on each axis.
pub const DEFAULT_PADDING: i32 = 40;

/// Displayed (CSS) size of the canvas in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasDimensions {
    pub width: u32,
    pub height: u32,
}

impl CanvasDimensions {
    /// Displayed pixels per buffer pixel on each axis. Games drawing in buffer
    /// coordinates see their output stretched by this factor.
    pub fn display_scale(&self) -> (f64, f64) {
        (
            f64::from(self.width) / f64::from(BUFFER_WIDTH),
            f64::from(self.height) / f64::from(BUFFER_HEIGHT),
        )
    }
}

/// Inner size of the element hosting the canvas, as reported by the DOM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerSize {
    pub width: i32,
    pub height: i32,
}

impl ContainerSize {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// Inclusive display-size bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeBounds {
    pub min_width: u32,
    pub min_height: u32,
    pub max_width: u32,
    pub max_height: u32,
}

impl Default for SizeBounds {
    fn default() -> Self {
        Self {
            min_width: 320,
            min_height: 240,
            max_width: 1200,
            max_height: 800,
        }
    }
}

/// Anything that can take a displayed size (the canvas style in the browser).
pub trait CanvasStyle {
    fn set_display_size(&mut self, dims: CanvasDimensions);
}

/// Computes the canvas display size from its container. Stateless; calling it
/// repeatedly with the same container yields the same result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasSizer {
    bounds: SizeBounds,
    padding: i32,
}

impl Default for CanvasSizer {
    fn default() -> Self {
        Self::new(SizeBounds::default(), DEFAULT_PADDING)
    }
}

impl CanvasSizer {
    pub fn new(bounds: SizeBounds, padding: i32) -> Self {
        Self { bounds, padding }
    }

    pub fn bounds(&self) -> SizeBounds {
        self.bounds
    }

    pub fn resize(&self, container: ContainerSize) -> CanvasDimensions {
        CanvasDimensions {
            width: clamp_axis(
                container.width.saturating_sub(self.padding),
                self.bounds.min_width,
                self.bounds.max_width,
            ),
            height: clamp_axis(
                container.height.saturating_sub(self.padding),
                self.bounds.min_height,
                self.bounds.max_height,
            ),
        }
    }

    /// Compute and write the display size to `target`. Only the displayed
    /// size changes; the drawing buffer stays at 800x600.
    pub fn apply<T: CanvasStyle + ?Sized>(
        &self,
        target: &mut T,
        container: ContainerSize,
    ) -> CanvasDimensions {
        let dims = self.resize(container);
        target.set_display_size(dims);
        dims
    }
}

// max-then-min so inverted bounds resolve to `max` instead of panicking.
fn clamp_axis(available: i32, min: u32, max: u32) -> u32 {
    let available = u32::try_from(available).unwrap_or(0);
    available.max(min).min(max)
}
