// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Closed shape family with exhaustive pairwise dispatch.

use crate::predicates::{
    convex_contains_disk, convex_polygons_intersect, disk_intersects_convex,
    segment_intersects_convex,
};
use crate::scalar::EPS;
use crate::{Circle, FigArray, GeomError, Line, Path, Point, Rectangle, Triangle};

/// Any shape the kernel knows about.
///
/// `has_intersect` is symmetric: each mixed pair is handled by a single
/// or-pattern arm covering both argument orders. Composite shapes (`Path`,
/// `FigArray`) are resolved first by decomposing into their members, so the
/// primitive table below them only has to cover the five primitive
/// variants.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Figure {
    /// A single point.
    Point(Point),
    /// A line segment.
    Line(Line),
    /// A solid disk.
    Circle(Circle),
    /// A filled triangle.
    Triangle(Triangle),
    /// A filled axis-aligned rectangle.
    Rectangle(Rectangle),
    /// An open polyline.
    Path(Path),
    /// A union of shapes.
    FigArray(FigArray),
}

macro_rules! figure_from {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for Figure {
                fn from(shape: $variant) -> Self {
                    Self::$variant(shape)
                }
            }
        )*
    };
}

figure_from!(Point, Line, Circle, Triangle, Rectangle, Path, FigArray);

impl Figure {
    /// Lowercase variant name, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Point(_) => "point",
            Self::Line(_) => "line",
            Self::Circle(_) => "circle",
            Self::Triangle(_) => "triangle",
            Self::Rectangle(_) => "rectangle",
            Self::Path(_) => "path",
            Self::FigArray(_) => "fig_array",
        }
    }

    /// Boundary sample points.
    ///
    /// Only circles use `quality` (number of samples); every other shape
    /// returns its defining points.
    pub fn vertexes(&self, quality: usize) -> Vec<Point> {
        match self {
            Self::Point(p) => vec![*p],
            Self::Line(l) => l.points().to_vec(),
            Self::Circle(c) => c.vertexes(quality),
            Self::Triangle(t) => t.points().to_vec(),
            Self::Rectangle(r) => r.corners().to_vec(),
            Self::Path(p) => p.points().to_vec(),
            Self::FigArray(a) => a.iter().flat_map(|f| f.vertexes(quality)).collect(),
        }
    }

    /// Mean of `vertexes(4)`, or `None` for an empty shape.
    pub fn mass_center(&self) -> Option<Point> {
        Point::mean(self.vertexes(4))
    }

    /// Smallest axis-aligned rectangle covering the shape.
    pub fn bounding_rect(&self) -> Option<Rectangle> {
        match self {
            Self::Circle(c) => {
                let r = Point::new(c.radius(), c.radius());
                Rectangle::from_corners(c.center() - r, c.center() + r).ok()
            }
            Self::Rectangle(r) => Some(*r),
            Self::FigArray(a) => a
                .iter()
                .filter_map(Self::bounding_rect)
                .reduce(|acc, r| acc.union(&r)),
            _ => {
                let pts = self.vertexes(0);
                let first = *pts.first()?;
                let (lo, hi) = pts.iter().fold((first, first), |(lo, hi), p| {
                    (
                        Point::new(lo.x.min(p.x), lo.y.min(p.y)),
                        Point::new(hi.x.max(p.x), hi.y.max(p.y)),
                    )
                });
                Rectangle::new(lo, hi).ok()
            }
        }
    }

    /// Shifts the shape by `delta`.
    pub fn translate(&mut self, delta: Point) {
        match self {
            Self::Point(p) => *p += delta,
            Self::Line(l) => l.translate(delta),
            Self::Circle(c) => c.translate(delta),
            Self::Triangle(t) => t.translate(delta),
            Self::Rectangle(r) => r.translate(delta),
            Self::Path(p) => p.translate(delta),
            Self::FigArray(a) => a.iter_mut().for_each(|f| f.translate(delta)),
        }
    }

    /// Rotates the shape about `center` by `angle` radians (clockwise
    /// positive in a y-up frame; see [`Point::rotated`]).
    ///
    /// # Errors
    /// [`GeomError::Unsupported`] for rectangles, including rectangles
    /// nested in a `FigArray`. Nothing is mutated on error.
    pub fn rotate(&mut self, center: Point, angle: f64) -> Result<(), GeomError> {
        self.check_rotatable()?;
        self.rotate_unchecked(center, angle);
        Ok(())
    }

    fn check_rotatable(&self) -> Result<(), GeomError> {
        match self {
            Self::Rectangle(_) => Err(GeomError::Unsupported {
                op: "rotate",
                shape: "rectangle",
            }),
            Self::FigArray(a) => a.iter().try_for_each(Self::check_rotatable),
            _ => Ok(()),
        }
    }

    fn rotate_unchecked(&mut self, center: Point, angle: f64) {
        match self {
            Self::Point(p) => *p = p.rotated(center, angle),
            Self::Line(l) => l.rotate(center, angle),
            Self::Circle(c) => c.rotate(center, angle),
            Self::Triangle(t) => t.rotate(center, angle),
            // Rejected by `check_rotatable`.
            Self::Rectangle(_) => {}
            Self::Path(p) => p.rotate(center, angle),
            Self::FigArray(a) => a
                .iter_mut()
                .for_each(|f| f.rotate_unchecked(center, angle)),
        }
    }

    /// Replaces defining point `index`.
    ///
    /// # Errors
    /// [`GeomError::Unsupported`] for circles, rectangles and fig arrays;
    /// [`GeomError::IndexOutOfRange`] for a bad index;
    /// [`GeomError::DegenerateLine`] if a line would collapse.
    pub fn set_vertex(&mut self, index: usize, point: Point) -> Result<(), GeomError> {
        match self {
            Self::Point(p) if index == 0 => {
                *p = point;
                Ok(())
            }
            Self::Point(_) => Err(GeomError::IndexOutOfRange { index, len: 1 }),
            Self::Line(l) => l.set_point(index, point),
            Self::Triangle(t) => t.set_point(index, point),
            Self::Path(p) => p.update_point(index, point),
            Self::Circle(_) | Self::Rectangle(_) | Self::FigArray(_) => {
                Err(GeomError::Unsupported {
                    op: "set_vertex",
                    shape: self.kind(),
                })
            }
        }
    }

    /// `true` if the two shapes share at least one point (EPS-inclusive).
    pub fn has_intersect(&self, other: &Self) -> bool {
        use Figure as F;
        match (self, other) {
            (F::FigArray(a), _) => a.iter().any(|f| f.has_intersect(other)),
            (_, F::FigArray(b)) => b.iter().any(|f| self.has_intersect(f)),
            (F::Path(p), _) => path_pieces(p).iter().any(|f| f.has_intersect(other)),
            (_, F::Path(q)) => path_pieces(q).iter().any(|f| self.has_intersect(f)),

            (F::Point(a), F::Point(b)) => a.approx_eq(*b),
            (F::Point(p), F::Line(l)) | (F::Line(l), F::Point(p)) => {
                l.segment_distance(*p) <= EPS
            }
            (F::Point(p), F::Circle(c)) | (F::Circle(c), F::Point(p)) => {
                p.distance(c.center()) <= c.radius() + EPS
            }
            (F::Point(p), F::Triangle(t)) | (F::Triangle(t), F::Point(p)) => t.contains_point(*p),
            (F::Point(p), F::Rectangle(r)) | (F::Rectangle(r), F::Point(p)) => {
                r.contains_point(*p)
            }

            (F::Line(a), F::Line(b)) => a.has_intersect(b),
            (F::Line(l), F::Circle(c)) | (F::Circle(c), F::Line(l)) => {
                l.segment_distance(c.center()) <= c.radius() + EPS
            }
            (F::Line(l), F::Triangle(t)) | (F::Triangle(t), F::Line(l)) => {
                segment_intersects_convex(l.p1(), l.p2(), &t.points())
            }
            (F::Line(l), F::Rectangle(r)) | (F::Rectangle(r), F::Line(l)) => {
                segment_intersects_convex(l.p1(), l.p2(), &r.corners())
            }

            (F::Circle(a), F::Circle(b)) => {
                a.center().distance(b.center()) <= a.radius() + b.radius() + EPS
            }
            (F::Circle(c), F::Triangle(t)) | (F::Triangle(t), F::Circle(c)) => {
                disk_intersects_convex(c.center(), c.radius(), &t.points())
            }
            (F::Circle(c), F::Rectangle(r)) | (F::Rectangle(r), F::Circle(c)) => {
                disk_intersects_convex(c.center(), c.radius(), &r.corners())
            }

            (F::Triangle(a), F::Triangle(b)) => convex_polygons_intersect(&a.points(), &b.points()),
            (F::Triangle(t), F::Rectangle(r)) | (F::Rectangle(r), F::Triangle(t)) => {
                convex_polygons_intersect(&t.points(), &r.corners())
            }

            (F::Rectangle(a), F::Rectangle(b)) => a.overlaps(b),
        }
    }

    /// `true` if `other` lies entirely inside `self` (EPS-widened).
    ///
    /// Primitive containers are convex, so containing a polygonal shape
    /// reduces to containing its defining points. A `Path` or `FigArray`
    /// container holds `other` when a single member holds it (or, for a
    /// composite `other`, when every piece of it is held that way). Empty
    /// shapes are contained by everything.
    pub fn contains(&self, other: &Self) -> bool {
        use Figure as F;
        match (self, other) {
            (_, F::FigArray(b)) => b.iter().all(|f| self.contains(f)),
            (F::FigArray(_) | F::Path(_), F::Path(q)) => {
                path_pieces(q).iter().all(|f| self.contains(f))
            }
            (F::FigArray(a), _) => a.iter().any(|f| f.contains(other)),
            (F::Path(p), _) => path_pieces(p).iter().any(|f| f.contains(other)),
            (_, F::Circle(c)) => self.contains_disk(c.center(), c.radius()),
            _ => other
                .vertexes(0)
                .into_iter()
                .all(|p| self.contains_point(p)),
        }
    }

    /// Closed point containment (EPS-widened).
    pub fn contains_point(&self, p: Point) -> bool {
        match self {
            Self::Point(q) => q.approx_eq(p),
            Self::Line(l) => l.segment_distance(p) <= EPS,
            Self::Circle(c) => p.distance(c.center()) <= c.radius() + EPS,
            Self::Triangle(t) => t.contains_point(p),
            Self::Rectangle(r) => r.contains_point(p),
            Self::Path(path) => path_pieces(path).iter().any(|f| f.contains_point(p)),
            Self::FigArray(a) => a.iter().any(|f| f.contains_point(p)),
        }
    }

    fn contains_disk(&self, center: Point, radius: f64) -> bool {
        match self {
            Self::Point(q) => radius <= EPS && q.approx_eq(center),
            Self::Line(l) => radius <= EPS && l.segment_distance(center) <= EPS,
            Self::Circle(c) => center.distance(c.center()) + radius <= c.radius() + EPS,
            Self::Triangle(t) => convex_contains_disk(&t.points(), center, radius),
            Self::Rectangle(r) => r.contains_disk(center, radius),
            Self::Path(path) => path_pieces(path)
                .iter()
                .any(|f| f.contains_disk(center, radius)),
            Self::FigArray(a) => a.iter().any(|f| f.contains_disk(center, radius)),
        }
    }
}

/// Splits a path into primitive pieces: one `Line` per segment, with
/// zero-length segments and single-point paths reported as `Point`s.
fn path_pieces(path: &Path) -> Vec<Figure> {
    match path.points() {
        [] => Vec::new(),
        [p] => vec![Figure::Point(*p)],
        _ => path
            .segments()
            .map(|(a, b)| Line::new(a, b).map_or(Figure::Point(a), Figure::Line))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn circle(x: f64, y: f64, r: f64) -> Figure {
        Circle::new(Point::new(x, y), r).unwrap().into()
    }

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Figure {
        Rectangle::new(Point::new(x0, y0), Point::new(x1, y1))
            .unwrap()
            .into()
    }

    fn line(x0: f64, y0: f64, x1: f64, y1: f64) -> Figure {
        Line::new(Point::new(x0, y0), Point::new(x1, y1))
            .unwrap()
            .into()
    }

    #[test]
    fn disks_are_solid() {
        // A short segment entirely inside the disk never touches the rim.
        let c = circle(0.0, 0.0, 5.0);
        let l = line(-1.0, 0.0, 1.0, 0.0);
        assert!(c.has_intersect(&l));
        assert!(c.contains(&l));
        // Concentric smaller disk.
        assert!(c.has_intersect(&circle(0.0, 0.0, 1.0)));
        assert!(c.contains(&circle(1.0, 0.0, 1.0)));
        assert!(!c.contains(&circle(4.5, 0.0, 1.0)));
    }

    #[test]
    fn rectangle_rotation_is_rejected_without_side_effects() {
        let mut arr: Figure = [circle(1.0, 0.0, 1.0), rect(0.0, 0.0, 1.0, 1.0)]
            .into_iter()
            .collect::<FigArray>()
            .into();
        let before = arr.clone();
        let err = arr.rotate(Point::ORIGIN, 1.0).unwrap_err();
        assert_eq!(
            err,
            GeomError::Unsupported {
                op: "rotate",
                shape: "rectangle"
            }
        );
        assert_eq!(arr, before);
    }

    #[test]
    fn circle_vertices_cannot_be_set() {
        let mut c = circle(0.0, 0.0, 1.0);
        assert!(matches!(
            c.set_vertex(0, Point::ORIGIN),
            Err(GeomError::Unsupported { op: "set_vertex", .. })
        ));
        let mut t: Figure = Triangle::new(Point::ORIGIN, Point::new(1.0, 0.0), Point::new(0.0, 1.0)).into();
        t.set_vertex(2, Point::new(0.0, 2.0)).unwrap();
        assert_eq!(t.vertexes(0)[2], Point::new(0.0, 2.0));
    }

    #[test]
    fn path_intersects_through_its_segments() {
        let path: Figure = Path::new(vec![
            Point::new(-5.0, 0.0),
            Point::new(-5.0, 10.0),
            Point::new(5.0, 10.0),
        ])
        .into();
        assert!(!path.has_intersect(&circle(0.0, 0.0, 2.0)));
        assert!(path.has_intersect(&circle(0.0, 8.5, 2.0)));
        assert!(circle(0.0, 8.5, 2.0).has_intersect(&path));
        assert!(rect(-6.0, -1.0, 6.0, 11.0).contains(&path));
    }

    #[test]
    fn mass_center_and_bounds() {
        let t: Figure = Triangle::new(Point::ORIGIN, Point::new(3.0, 0.0), Point::new(0.0, 3.0)).into();
        assert!(t.mass_center().unwrap().approx_eq(Point::new(1.0, 1.0)));
        let b = circle(2.0, 3.0, 1.0).bounding_rect().unwrap();
        assert_eq!(b.bottom_left(), Point::new(1.0, 2.0));
        assert_eq!(b.top_right(), Point::new(3.0, 4.0));
        assert!(Figure::Path(Path::default()).mass_center().is_none());
    }
}
