use crate::*;

/// Straight segment of the grid overlay.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Line {
    pub from: Point,
    pub to: Point,
}

/// Geometry of a grid drawn into a region of interest, in image pixel space.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GridLayout {
    roi: Rect,
    size: GridSize,
}

impl GridLayout {
    pub const fn new(roi: Rect, size: GridSize) -> Self {
        Self { roi, size }
    }

    pub const fn roi(&self) -> Rect {
        self.roi
    }

    pub const fn size(&self) -> GridSize {
        self.size
    }

    pub fn cell_width(&self) -> f64 {
        self.roi.width / f64::from(self.size.cols)
    }

    pub fn cell_height(&self) -> f64 {
        self.roi.height / f64::from(self.size.rows)
    }

    pub fn cell_rect(&self, index: CellIndex) -> Option<Rect> {
        let (row, col) = self.size.coords_of(index)?;
        let width = self.cell_width();
        let height = self.cell_height();
        Some(Rect::new(
            self.roi.x + f64::from(col) * width,
            self.roi.y + f64::from(row) * height,
            width,
            height,
        ))
    }

    pub fn cell_center(&self, index: CellIndex) -> Option<Point> {
        let rect = self.cell_rect(index)?;
        Some(Point::new(
            rect.x + rect.width / 2.0,
            rect.y + rect.height / 2.0,
        ))
    }

    /// Half-extent of a glyph drawn centred in a cell.
    pub fn glyph_radius(&self) -> f64 {
        self.cell_width().min(self.cell_height()) / 3.0
    }

    /// Horizontal lines top to bottom, then vertical lines left to right, outer border included.
    pub fn lines(&self) -> impl Iterator<Item = Line> + '_ {
        let roi = self.roi;
        let horizontal = (0..=self.size.rows).map(move |row| {
            let y = roi.y + f64::from(row) * self.cell_height();
            Line {
                from: Point::new(roi.x, y),
                to: Point::new(roi.right(), y),
            }
        });
        let vertical = (0..=self.size.cols).map(move |col| {
            let x = roi.x + f64::from(col) * self.cell_width();
            Line {
                from: Point::new(x, roi.y),
                to: Point::new(x, roi.bottom()),
            }
        });
        horizontal.chain(vertical)
    }

    pub fn cell_at(&self, point: Point) -> PointerTarget {
        locate_in_roi(point, self.roi, self.size)
    }
}

/// Read-only snapshot of everything a renderer draws.
#[derive(Copy, Clone, Debug)]
pub struct ChallengeView<'a> {
    pub grid: &'a Grid,
    pub target: TargetCriterion,
    pub selection: &'a Selection,
    pub state: SessionState,
    pub attempts_left: CellCount,
}

/// Draws a challenge over a captured image.
pub trait ChallengeRenderer {
    type Error;

    fn render(&mut self, layout: &GridLayout, view: ChallengeView<'_>) -> core::result::Result<(), Self::Error>;
}
