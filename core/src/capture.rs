use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::*;

/// A captured frame and the region of interest the grid is drawn into, both in image pixel space.
#[derive(Clone, Debug, PartialEq)]
pub struct Capture<I> {
    pub image: I,
    pub roi: Rect,
}

/// Supplies one capture per challenge instance.
pub trait CaptureSource {
    type Image;
    type Error;

    fn capture(&mut self) -> core::result::Result<Capture<Self::Image>, Self::Error>;
}

/// Square frame shown over the live preview, in display space. It roams so the subject has to time
/// the capture.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrameBox {
    pub x: f64,
    pub y: f64,
    pub side: f64,
}

impl FrameBox {
    pub const SIDE: f64 = 150.0;
    pub const X_RANGE: core::ops::Range<f64> = 50.0..250.0;
    pub const Y_RANGE: core::ops::Range<f64> = 50.0..150.0;

    pub const fn new(x: f64, y: f64, side: f64) -> Self {
        Self { x, y, side }
    }

    /// Next position of the frame, drawn uniformly from the roaming ranges.
    pub fn roam<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::new(
            rng.random_range(Self::X_RANGE),
            rng.random_range(Self::Y_RANGE),
            Self::SIDE,
        )
    }

    pub const fn display_rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.side, self.side)
    }

    /// Maps the frame from the displayed preview into the captured image.
    ///
    /// The preview shows the video with `object-fit: cover`: one uniform scale that fills the
    /// display, with the overflowing axis cropped evenly on both sides.
    pub fn to_image_space(&self, display: Size, image: Size) -> Option<Rect> {
        if display.is_degenerate() || image.is_degenerate() {
            return None;
        }
        let scale = f64::max(display.width / image.width, display.height / image.height);
        let crop_x = (image.width * scale - display.width) / 2.0;
        let crop_y = (image.height * scale - display.height) / 2.0;
        Some(Rect::new(
            (self.x + crop_x) / scale,
            (self.y + crop_y) / scale,
            self.side / scale,
            self.side / scale,
        ))
    }
}

impl Default for FrameBox {
    fn default() -> Self {
        Self::new(100.0, 100.0, Self::SIDE)
    }
}
