use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Zero, negative, and NaN extents are all degenerate.
    pub fn is_degenerate(self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// Axis-aligned rectangle, origin at the top-left corner.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(self) -> f64 {
        self.y + self.height
    }

    pub const fn size(self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn is_degenerate(self) -> bool {
        self.size().is_degenerate()
    }

    /// Closed bounds check, edges count as inside.
    pub fn contains(self, point: Point) -> bool {
        point.x >= self.x && point.x <= self.right() && point.y >= self.y && point.y <= self.bottom()
    }
}

/// Where a drawing surface sits on screen and how many pixels it really has.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Surface {
    /// Displayed bounding box, in the same space as pointer events.
    pub bounds: Rect,
    /// Intrinsic pixel size the image and grid are drawn at.
    pub pixel_size: Size,
}

impl Surface {
    pub const fn new(bounds: Rect, pixel_size: Size) -> Self {
        Self { bounds, pixel_size }
    }

    /// Scales a pointer position into intrinsic pixel space.
    pub fn to_pixel_space(&self, pointer: Point) -> Option<Point> {
        if self.bounds.is_degenerate() {
            return None;
        }
        let scale_x = self.pixel_size.width / self.bounds.width;
        let scale_y = self.pixel_size.height / self.bounds.height;
        Some(Point::new(
            (pointer.x - self.bounds.x) * scale_x,
            (pointer.y - self.bounds.y) * scale_y,
        ))
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PointerTarget {
    Cell(CellIndex),
    OutOfBounds,
}

impl PointerTarget {
    pub const fn cell(self) -> Option<CellIndex> {
        match self {
            Self::Cell(index) => Some(index),
            Self::OutOfBounds => None,
        }
    }
}

/// Maps a pointer event in display space to the grid cell drawn under it.
pub fn map_point_to_cell(
    pointer: Point,
    surface: &Surface,
    roi: Rect,
    size: GridSize,
) -> PointerTarget {
    let Some(point) = surface.to_pixel_space(pointer) else {
        return PointerTarget::OutOfBounds;
    };
    let target = locate_in_roi(point, roi, size);
    log::trace!("pointer {:?} -> pixel {:?} -> {:?}", pointer, point, target);
    target
}

/// Maps a point already in pixel space. Boundaries between cells belong to the cell that starts there,
/// the far edges of `roi` belong to the last row/column.
pub fn locate_in_roi(point: Point, roi: Rect, size: GridSize) -> PointerTarget {
    if size.is_empty() || roi.is_degenerate() || !roi.contains(point) {
        return PointerTarget::OutOfBounds;
    }

    let cell_width = roi.width / f64::from(size.cols);
    let cell_height = roi.height / f64::from(size.rows);
    let col = axis_index(point.x - roi.x, cell_width, size.cols);
    let row = axis_index(point.y - roi.y, cell_height, size.rows);

    size.index_of((row, col))
        .map_or(PointerTarget::OutOfBounds, PointerTarget::Cell)
}

/// `offset` is non-negative after the bounds check, so truncation is the floor.
fn axis_index(offset: f64, cell_extent: f64, count: Coord) -> Coord {
    let index = (offset / cell_extent) as u32;
    // `count` is non-zero here
    index.min(u32::from(count) - 1) as Coord
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROI: Rect = Rect::new(100.0, 50.0, 200.0, 100.0);
    const SIZE: GridSize = GridSize::new(4, 4);

    fn identity_surface() -> Surface {
        Surface::new(Rect::new(0.0, 0.0, 640.0, 480.0), Size::new(640.0, 480.0))
    }

    fn map(x: f64, y: f64) -> PointerTarget {
        map_point_to_cell(Point::new(x, y), &identity_surface(), ROI, SIZE)
    }

    #[test]
    fn points_outside_roi_are_rejected() {
        assert_eq!(map(99.0, 60.0), PointerTarget::OutOfBounds);
        assert_eq!(map(301.0, 60.0), PointerTarget::OutOfBounds);
        assert_eq!(map(150.0, 49.5), PointerTarget::OutOfBounds);
        assert_eq!(map(150.0, 150.5), PointerTarget::OutOfBounds);
        assert_eq!(map(f64::NAN, 60.0), PointerTarget::OutOfBounds);
    }

    #[test]
    fn interior_points_map_to_row_major_index() {
        assert_eq!(map(101.0, 51.0), PointerTarget::Cell(0));
        assert_eq!(map(299.0, 51.0), PointerTarget::Cell(3));
        assert_eq!(map(160.0, 90.0), PointerTarget::Cell(5));
        assert_eq!(map(299.0, 149.0), PointerTarget::Cell(15));
    }

    #[test]
    fn every_interior_point_lands_in_range() {
        for step_y in 0..=40 {
            for step_x in 0..=40 {
                let x = ROI.x + ROI.width * f64::from(step_x) / 40.0;
                let y = ROI.y + ROI.height * f64::from(step_y) / 40.0;
                let index = map(x, y).cell().unwrap();
                assert!(SIZE.contains(index));
            }
        }
    }

    #[test]
    fn shared_boundary_goes_to_cell_starting_there() {
        // cells are 50 x 25 pixels
        assert_eq!(map(150.0, 51.0), PointerTarget::Cell(1));
        assert_eq!(map(101.0, 75.0), PointerTarget::Cell(4));
        assert_eq!(map(150.0, 75.0), PointerTarget::Cell(5));
    }

    #[test]
    fn far_edges_clamp_to_last_cell() {
        assert_eq!(map(300.0, 51.0), PointerTarget::Cell(3));
        assert_eq!(map(101.0, 150.0), PointerTarget::Cell(12));
        assert_eq!(map(300.0, 150.0), PointerTarget::Cell(15));
        assert_eq!(map(100.0, 50.0), PointerTarget::Cell(0));
    }

    #[test]
    fn pointer_is_scaled_from_display_to_pixel_space() {
        // shown at half size, offset on the page
        let surface = Surface::new(Rect::new(20.0, 10.0, 320.0, 240.0), Size::new(640.0, 480.0));

        let target = map_point_to_cell(Point::new(20.0 + 80.0, 10.0 + 45.0), &surface, ROI, SIZE);
        assert_eq!(target, PointerTarget::Cell(5));

        let outside = map_point_to_cell(Point::new(20.0 + 40.0, 10.0 + 45.0), &surface, ROI, SIZE);
        assert_eq!(outside, PointerTarget::OutOfBounds);
    }

    #[test]
    fn degenerate_inputs_are_out_of_bounds() {
        let collapsed = Surface::new(Rect::new(0.0, 0.0, 0.0, 480.0), Size::new(640.0, 480.0));
        assert_eq!(
            map_point_to_cell(Point::new(150.0, 60.0), &collapsed, ROI, SIZE),
            PointerTarget::OutOfBounds
        );
        assert_eq!(
            locate_in_roi(Point::new(100.0, 50.0), Rect::new(100.0, 50.0, 0.0, 0.0), SIZE),
            PointerTarget::OutOfBounds
        );
        assert_eq!(
            locate_in_roi(Point::new(150.0, 60.0), ROI, GridSize::new(0, 4)),
            PointerTarget::OutOfBounds
        );
    }

    #[test]
    fn non_square_grid_uses_cols_for_stride() {
        let size = GridSize::new(2, 5);
        // cells are 40 x 50 pixels
        assert_eq!(
            locate_in_roi(Point::new(100.0 + 125.0, 50.0 + 60.0), ROI, size),
            PointerTarget::Cell(8)
        );
    }
}
