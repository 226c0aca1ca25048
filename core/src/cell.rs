use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Shape {
    Triangle,
    Square,
    Circle,
}

impl Shape {
    pub const ALL: [Self; 3] = [Self::Triangle, Self::Square, Self::Circle];

    pub const fn name(self) -> &'static str {
        use Shape::*;
        match self {
            Triangle => "triangle",
            Square => "square",
            Circle => "circle",
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tint {
    Red,
    Green,
    Blue,
}

impl Tint {
    pub const ALL: [Self; 3] = [Self::Red, Self::Green, Self::Blue];

    pub const fn name(self) -> &'static str {
        use Tint::*;
        match self {
            Red => "red",
            Green => "green",
            Blue => "blue",
        }
    }
}

impl fmt::Display for Tint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A drawn mark: both parts are always present together.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Glyph {
    pub shape: Shape,
    pub tint: Tint,
}

impl Glyph {
    pub const fn new(shape: Shape, tint: Tint) -> Self {
        Self { shape, tint }
    }
}

/// Content of one grid cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    Marked(Glyph),
}

impl Cell {
    pub const fn marked(shape: Shape, tint: Tint) -> Self {
        Self::Marked(Glyph::new(shape, tint))
    }

    pub const fn has_shape(self) -> bool {
        matches!(self, Self::Marked(_))
    }

    pub const fn glyph(self) -> Option<Glyph> {
        match self {
            Self::Empty => None,
            Self::Marked(glyph) => Some(glyph),
        }
    }

    pub const fn shape(self) -> Option<Shape> {
        match self {
            Self::Empty => None,
            Self::Marked(glyph) => Some(glyph.shape),
        }
    }

    pub const fn tint(self) -> Option<Tint> {
        match self {
            Self::Empty => None,
            Self::Marked(glyph) => Some(glyph.tint),
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::Empty
    }
}

/// What the subject is asked to select. Without a tint only the shape is compared.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetCriterion {
    pub shape: Shape,
    pub tint: Option<Tint>,
}

impl TargetCriterion {
    pub const fn shape_only(shape: Shape) -> Self {
        Self { shape, tint: None }
    }

    pub const fn shape_and_tint(shape: Shape, tint: Tint) -> Self {
        Self {
            shape,
            tint: Some(tint),
        }
    }

    pub fn matches(&self, cell: Cell) -> bool {
        match cell {
            Cell::Empty => false,
            Cell::Marked(glyph) => {
                glyph.shape == self.shape && self.tint.is_none_or(|tint| tint == glyph.tint)
            }
        }
    }
}

/// Plural form used in prompts, e.g. "red squares".
impl fmt::Display for TargetCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.tint {
            Some(tint) => write!(f, "{} {}s", tint, self.shape),
            None => write!(f, "{}s", self.shape),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn empty_cell_has_neither_shape_nor_tint() {
        let cell = Cell::default();

        assert!(!cell.has_shape());
        assert_eq!(cell.shape(), None);
        assert_eq!(cell.tint(), None);
    }

    #[test]
    fn shape_only_criterion_ignores_tint() {
        let target = TargetCriterion::shape_only(Shape::Circle);

        assert!(target.matches(Cell::marked(Shape::Circle, Tint::Red)));
        assert!(target.matches(Cell::marked(Shape::Circle, Tint::Blue)));
        assert!(!target.matches(Cell::marked(Shape::Square, Tint::Red)));
        assert!(!target.matches(Cell::Empty));
    }

    #[test]
    fn tinted_criterion_requires_both() {
        let target = TargetCriterion::shape_and_tint(Shape::Square, Tint::Red);

        assert!(target.matches(Cell::marked(Shape::Square, Tint::Red)));
        assert!(!target.matches(Cell::marked(Shape::Square, Tint::Green)));
        assert!(!target.matches(Cell::marked(Shape::Triangle, Tint::Red)));
    }

    #[test]
    fn criterion_renders_plural_prompt_text() {
        assert_eq!(
            TargetCriterion::shape_and_tint(Shape::Square, Tint::Red).to_string(),
            "red squares"
        );
        assert_eq!(
            TargetCriterion::shape_only(Shape::Triangle).to_string(),
            "triangles"
        );
    }
}
