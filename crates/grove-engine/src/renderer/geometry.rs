//! Figure templates for trees and creatures.
//!
//! Each figure is a small vector drawing in its own view box, split into
//! named parts. Posable parts (wings, tail) rotate about their own pivot;
//! everything else moves with the figure as a whole.

use glam::Vec2;

use crate::api::types::CreatureKind;

/// RGB color, components in 0.0..=1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    /// Build from a `0xRRGGBB` literal.
    pub fn hex(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xff) as f32 / 255.0,
            g: ((rgb >> 8) & 0xff) as f32 / 255.0,
            b: (rgb & 0xff) as f32 / 255.0,
        }
    }
}

/// How a primitive is painted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Paint {
    Fill(Color),
    Stroke { color: Color, width: f32 },
}

impl Paint {
    pub fn color(&self) -> Color {
        match *self {
            Paint::Fill(color) | Paint::Stroke { color, .. } => color,
        }
    }

    /// Stroke width, zero for fills.
    pub fn stroke_width(&self) -> f32 {
        match *self {
            Paint::Fill(_) => 0.0,
            Paint::Stroke { width, .. } => width,
        }
    }
}

/// Geometric primitive in figure-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    Ellipse { center: Vec2, radii: Vec2 },
    Circle { center: Vec2, radius: f32 },
    Rect { origin: Vec2, size: Vec2 },
    Line { from: Vec2, to: Vec2 },
    Triangle { points: [Vec2; 3] },
}

impl Primitive {
    /// Wire code used in the render buffer.
    pub fn code(&self) -> u8 {
        match self {
            Primitive::Ellipse { .. } => 0,
            Primitive::Circle { .. } => 1,
            Primitive::Rect { .. } => 2,
            Primitive::Line { .. } => 3,
            Primitive::Triangle { .. } => 4,
        }
    }

    /// Up to six geometry parameters, packed for the render buffer.
    pub fn params(&self) -> [f32; 6] {
        match *self {
            Primitive::Ellipse { center, radii } => [center.x, center.y, radii.x, radii.y, 0.0, 0.0],
            Primitive::Circle { center, radius } => [center.x, center.y, radius, 0.0, 0.0, 0.0],
            Primitive::Rect { origin, size } => [origin.x, origin.y, size.x, size.y, 0.0, 0.0],
            Primitive::Line { from, to } => [from.x, from.y, to.x, to.y, 0.0, 0.0],
            Primitive::Triangle { points: [a, b, c] } => [a.x, a.y, b.x, b.y, c.x, c.y],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shape {
    pub primitive: Primitive,
    pub paint: Paint,
}

impl Shape {
    fn ellipse(cx: f32, cy: f32, rx: f32, ry: f32, fill: u32) -> Self {
        Self {
            primitive: Primitive::Ellipse {
                center: Vec2::new(cx, cy),
                radii: Vec2::new(rx, ry),
            },
            paint: Paint::Fill(Color::hex(fill)),
        }
    }

    fn circle(cx: f32, cy: f32, r: f32, fill: u32) -> Self {
        Self {
            primitive: Primitive::Circle {
                center: Vec2::new(cx, cy),
                radius: r,
            },
            paint: Paint::Fill(Color::hex(fill)),
        }
    }

    fn rect(x: f32, y: f32, w: f32, h: f32, fill: u32) -> Self {
        Self {
            primitive: Primitive::Rect {
                origin: Vec2::new(x, y),
                size: Vec2::new(w, h),
            },
            paint: Paint::Fill(Color::hex(fill)),
        }
    }

    fn line(from: Vec2, to: Vec2, stroke: u32, width: f32) -> Self {
        Self {
            primitive: Primitive::Line { from, to },
            paint: Paint::Stroke {
                color: Color::hex(stroke),
                width,
            },
        }
    }

    fn triangle(a: Vec2, b: Vec2, c: Vec2, fill: u32) -> Self {
        Self {
            primitive: Primitive::Triangle { points: [a, b, c] },
            paint: Paint::Fill(Color::hex(fill)),
        }
    }
}

/// Names of figure parts. Only wings and tail are ever rotated; `Detail`
/// holds small features painted over everything else (eyes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartName {
    Body,
    WingLeft,
    WingRight,
    Tail,
    Detail,
}

impl PartName {
    pub fn as_str(self) -> &'static str {
        match self {
            PartName::Body => "body",
            PartName::WingLeft => "wing-left",
            PartName::WingRight => "wing-right",
            PartName::Tail => "tail",
            PartName::Detail => "detail",
        }
    }

    pub fn is_posable(self) -> bool {
        matches!(self, PartName::WingLeft | PartName::WingRight | PartName::Tail)
    }
}

/// A named group of shapes rotating about a shared pivot.
#[derive(Debug, Clone, PartialEq)]
pub struct Part {
    pub name: PartName,
    pub pivot: Vec2,
    pub shapes: Vec<Shape>,
}

impl Part {
    fn body(shapes: Vec<Shape>) -> Self {
        Self {
            name: PartName::Body,
            pivot: Vec2::ZERO,
            shapes,
        }
    }

    fn detail(shapes: Vec<Shape>) -> Self {
        Self {
            name: PartName::Detail,
            pivot: Vec2::ZERO,
            shapes,
        }
    }

    fn posable(name: PartName, pivot: Vec2, shapes: Vec<Shape>) -> Self {
        Self { name, pivot, shapes }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FigureKind {
    Tree,
    Creature(CreatureKind),
}

/// A complete drawing: view box plus parts in paint order.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub kind: FigureKind,
    pub view_box: Vec2,
    pub parts: Vec<Part>,
}

const BARK: u32 = 0x5d4037;

impl Figure {
    /// 100×200 tree: trunk, crown, hole, and two perching branches.
    pub fn tree() -> Self {
        Self {
            kind: FigureKind::Tree,
            view_box: Vec2::new(100.0, 200.0),
            parts: vec![Part::body(vec![
                Shape::rect(40.0, 120.0, 20.0, 80.0, BARK),
                Shape::ellipse(50.0, 80.0, 35.0, 50.0, 0x2e7d32),
                Shape::ellipse(50.0, 100.0, 8.0, 10.0, 0x3e2723),
                Shape::line(Vec2::new(20.0, 90.0), Vec2::new(30.0, 95.0), BARK, 3.0),
                Shape::line(Vec2::new(80.0, 85.0), Vec2::new(70.0, 90.0), BARK, 3.0),
            ])],
        }
    }

    /// Fresh figure for a creature. Never shared between creatures.
    pub fn creature(kind: CreatureKind) -> Self {
        match kind {
            CreatureKind::Bird => Self::bird(),
            CreatureKind::Squirrel => Self::squirrel(),
            CreatureKind::Hedgehog => Self::hedgehog(),
        }
    }

    fn bird() -> Self {
        Self {
            kind: FigureKind::Creature(CreatureKind::Bird),
            view_box: Vec2::new(30.0, 20.0),
            parts: vec![
                Part::body(vec![
                    Shape::ellipse(15.0, 12.0, 6.0, 4.0, 0x4a5568),
                    Shape::circle(15.0, 6.0, 4.0, 0x4a5568),
                    Shape::triangle(
                        Vec2::new(15.0, 6.0),
                        Vec2::new(20.0, 8.0),
                        Vec2::new(15.0, 10.0),
                        0xf59e0b,
                    ),
                ]),
                Part::posable(
                    PartName::WingLeft,
                    Vec2::new(10.0, 12.0),
                    vec![Shape::ellipse(10.0, 12.0, 5.0, 6.0, 0x718096)],
                ),
                Part::posable(
                    PartName::WingRight,
                    Vec2::new(20.0, 12.0),
                    vec![Shape::ellipse(20.0, 12.0, 5.0, 6.0, 0x718096)],
                ),
                Part::detail(vec![Shape::circle(17.0, 5.0, 1.0, 0xffffff)]),
            ],
        }
    }

    fn squirrel() -> Self {
        Self {
            kind: FigureKind::Creature(CreatureKind::Squirrel),
            view_box: Vec2::new(25.0, 20.0),
            parts: vec![
                Part::body(vec![
                    Shape::ellipse(12.0, 12.0, 5.0, 4.0, 0x92400e),
                    Shape::circle(12.0, 6.0, 4.0, 0x92400e),
                ]),
                Part::posable(
                    PartName::Tail,
                    Vec2::new(5.0, 10.0),
                    vec![Shape::ellipse(5.0, 10.0, 4.0, 6.0, 0x78350f)],
                ),
                Part::detail(vec![Shape::circle(13.0, 6.0, 1.0, 0x000000)]),
            ],
        }
    }

    fn hedgehog() -> Self {
        let mut shapes = vec![Shape::ellipse(15.0, 12.0, 8.0, 6.0, 0x6b7280)];
        shapes.extend((0..6).map(|i| {
            let x = 8.0 + i as f32 * 2.5;
            Shape::line(Vec2::new(x, 10.0), Vec2::new(x, 6.0), 0x4b5563, 1.0)
        }));
        shapes.push(Shape::ellipse(15.0, 15.0, 4.0, 3.0, 0x9ca3af));
        shapes.push(Shape::circle(15.0, 16.0, 1.0, 0x000000));

        Self {
            kind: FigureKind::Creature(CreatureKind::Hedgehog),
            view_box: Vec2::new(30.0, 20.0),
            parts: vec![Part::body(shapes)],
        }
    }

    pub fn part(&self, name: PartName) -> Option<&Part> {
        self.parts.iter().find(|p| p.name == name)
    }

}
