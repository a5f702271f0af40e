//! Crop handle drag state machine.
//!
//! Interactive crop editing boils down to a tiny state machine: `Idle`
//! until a pointer goes down on one of the four crop handles, `Dragging`
//! that handle until the pointer lifts. Every move while dragging converts
//! the pointer's position, expressed as a fraction of the displayed image
//! along the handle's axis, into a natural-pixel offset and clamps it
//! against the opposite handle.
//!
//! The machine knows nothing about any UI framework; the host layer feeds
//! it pointer events and reads the crop rectangle back out.

use crate::plan::CropRect;

/// Minimum gap, in natural pixels, kept between opposing handles.
pub const MIN_HANDLE_GAP: u32 = 10;

// =============================================================================
// Handles and State
// =============================================================================

/// One of the four crop handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handle {
    /// Top edge of the crop (vertical axis)
    Top,

    /// Bottom edge of the crop (vertical axis)
    Bottom,

    /// Left edge of the crop (horizontal axis)
    Left,

    /// Right edge of the crop (horizontal axis)
    Right,
}

/// Drag interaction state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragState {
    /// No handle is being dragged
    Idle,

    /// The given handle follows pointer moves
    Dragging(Handle),
}

// =============================================================================
// DragController
// =============================================================================

/// Owns the crop rectangle and the drag interaction state.
pub struct DragController {
    state: DragState,
    crop: CropRect,
    natural_width: u32,
    natural_height: u32,
}

impl DragController {
    /// Create a controller with the crop covering the full image.
    pub fn new(natural_width: u32, natural_height: u32) -> Self {
        Self {
            state: DragState::Idle,
            crop: CropRect::full(natural_width, natural_height),
            natural_width,
            natural_height,
        }
    }

    /// Current interaction state.
    pub fn state(&self) -> DragState {
        self.state
    }

    /// Current crop rectangle.
    pub fn crop(&self) -> CropRect {
        self.crop
    }

    /// Pointer pressed on a handle: start dragging it.
    pub fn pointer_down(&mut self, handle: Handle) {
        self.state = DragState::Dragging(handle);
    }

    /// Pointer moved to `fraction` of the image extent along the dragged
    /// handle's axis (0.0 = top/left edge, 1.0 = bottom/right edge).
    ///
    /// Fractions outside `[0, 1]` clamp to the image edge. The handle stops
    /// [`MIN_HANDLE_GAP`] pixels short of its opposite. Ignored while
    /// `Idle`.
    pub fn pointer_move(&mut self, fraction: f64) {
        let DragState::Dragging(handle) = self.state else {
            return;
        };

        let fraction = fraction.clamp(0.0, 1.0);
        match handle {
            Handle::Top => {
                let pixel = to_pixel(fraction, self.natural_height);
                self.crop.top = pixel.min(self.crop.bottom.saturating_sub(MIN_HANDLE_GAP));
            }
            Handle::Bottom => {
                let pixel = to_pixel(fraction, self.natural_height);
                self.crop.bottom = pixel.max(self.crop.top + MIN_HANDLE_GAP);
            }
            Handle::Left => {
                let pixel = to_pixel(fraction, self.natural_width);
                self.crop.left = pixel.min(self.crop.right.saturating_sub(MIN_HANDLE_GAP));
            }
            Handle::Right => {
                let pixel = to_pixel(fraction, self.natural_width);
                self.crop.right = pixel.max(self.crop.left + MIN_HANDLE_GAP);
            }
        }
    }

    /// Pointer lifted: back to idle. The crop keeps its last position.
    pub fn pointer_up(&mut self) {
        self.state = DragState::Idle;
    }
}

/// Convert a `[0, 1]` fraction to a natural-pixel offset.
fn to_pixel(fraction: f64, extent: u32) -> u32 {
    (fraction * extent as f64).round() as u32
}

// =============================================================================
// Tests
// =============================================================================
