// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs)]
#![allow(clippy::unwrap_used, clippy::expect_used)]
//! End-to-end routing through `QuadPathfinder`.

use quadnav_geom::predicates::point_segment_distance;
use quadnav_geom::{Circle, Figure, GeomError, Point, Rectangle, EPS};
use quadnav_nav::{polyline_length, Algorithm, BuildOptions, PathError, QuadPathfinder};
use quadnav_space::{QuadTreeConfig, Sprite, World};

fn world(size: f64, obstacles: Vec<Figure>) -> World {
    let bounds = Rectangle::square(Point::ORIGIN, size).unwrap();
    let mut world = World::new(bounds, QuadTreeConfig::default()).unwrap();
    for shape in obstacles {
        world.add_sprite(Sprite::obstacle(shape)).unwrap();
    }
    world
}

fn disk(x: f64, y: f64, r: f64) -> Figure {
    Circle::new(Point::new(x, y), r).unwrap().into()
}

fn assert_endpoints(route: &[Point], start: Point, goal: Point) {
    assert!(route.len() >= 2, "route too short: {route:?}");
    assert!(route[0].approx_eq(start));
    assert!(route[route.len() - 1].approx_eq(goal));
}

#[test]
fn open_field_routes_are_nearly_straight() {
    let w = world(100.0, Vec::new());
    let (start, goal) = (Point::new(0.0, 0.0), Point::new(50.0, 50.0));
    let direct = start.distance(goal);

    let mut finder =
        QuadPathfinder::new(w.tree(), w.store(), Algorithm::Dijkstra, &BuildOptions::default())
            .unwrap();
    let dijkstra = finder.find_path(start, goal).unwrap();
    assert_endpoints(&dijkstra, start, goal);
    assert!(polyline_length(&dijkstra) <= 1.05 * direct);

    finder.set_algorithm(Algorithm::ThetaStar);
    let theta = finder.find_path(start, goal).unwrap();
    assert_endpoints(&theta, start, goal);
    assert!(polyline_length(&theta) <= 1.01 * direct);

    finder.set_algorithm(Algorithm::AStar);
    let astar = finder.find_path(start, goal).unwrap();
    assert!(polyline_length(&theta) <= polyline_length(&astar) + 1e-9);
}

#[test]
fn circle_forces_a_detour() {
    let w = world(10.0, vec![disk(5.0, 5.0, 2.0)]);
    let (start, goal) = (Point::new(0.0, 5.0), Point::new(10.0, 5.0));
    let center = Point::new(5.0, 5.0);
    let mut lengths = Vec::new();

    for algorithm in Algorithm::ALL {
        let mut finder =
            QuadPathfinder::new(w.tree(), w.store(), algorithm, &BuildOptions::default()).unwrap();
        let route = finder.find_path(start, goal).unwrap();
        assert_endpoints(&route, start, goal);
        for seg in route.windows(2) {
            let d = point_segment_distance(center, seg[0], seg[1]);
            assert!(d >= 2.0 - EPS, "{algorithm}: segment {seg:?} passes at {d}");
        }
        let len = polyline_length(&route);
        assert!(len > start.distance(goal), "{algorithm}: no detour");
        lengths.push((algorithm, len));
    }

    // The three exact engines agree on the optimum; Theta* only needs to be
    // a clear route.
    let exact: Vec<f64> = lengths
        .iter()
        .filter(|(a, _)| *a != Algorithm::ThetaStar)
        .map(|(_, l)| *l)
        .collect();
    for l in &exact {
        assert!((l - exact[0]).abs() < 1e-6, "{lengths:?}");
    }
    let length_of = |wanted: Algorithm| {
        lengths
            .iter()
            .find(|(a, _)| *a == wanted)
            .map(|(_, l)| *l)
            .unwrap()
    };
    assert!(
        length_of(Algorithm::ThetaStar) <= length_of(Algorithm::AStar) + 1e-6,
        "{lengths:?}"
    );
}

#[test]
fn blocked_or_off_map_endpoints_have_no_route() {
    let w = world(10.0, vec![disk(5.0, 5.0, 2.0)]);
    let mut finder =
        QuadPathfinder::new(w.tree(), w.store(), Algorithm::Dijkstra, &BuildOptions::default())
            .unwrap();
    let free = Point::new(1.0, 1.0);
    assert!(finder.find_path(Point::new(5.0, 5.0), free).unwrap().is_empty());
    assert!(finder.find_path(free, Point::new(6.0, 5.0)).unwrap().is_empty());
    assert!(finder.find_path(free, Point::new(11.0, 5.0)).unwrap().is_empty());
    assert!(finder.find_path(Point::new(-1.0, 0.0), free).unwrap().is_empty());
}

#[test]
fn non_finite_endpoints_are_errors() {
    let w = world(10.0, Vec::new());
    let mut finder =
        QuadPathfinder::new(w.tree(), w.store(), Algorithm::Dijkstra, &BuildOptions::default())
            .unwrap();
    let free = Point::new(1.0, 1.0);
    let (vertices, edges) = (finder.graph().vertex_count(), finder.graph().edge_count());
    for bad in [Point::new(f64::NAN, 1.0), Point::new(1.0, f64::INFINITY)] {
        let expected = PathError::Geometry(GeomError::NonFinite("route endpoint"));
        assert_eq!(finder.find_path(bad, free), Err(expected.clone()));
        assert_eq!(finder.find_path(free, bad), Err(expected));
    }
    assert_eq!(finder.graph().vertex_count(), vertices);
    assert_eq!(finder.graph().edge_count(), edges);
}

#[test]
fn queries_leave_the_graph_untouched() {
    let w = world(
        32.0,
        vec![
            disk(8.0, 8.0, 2.0),
            Rectangle::new(Point::new(18.0, 4.0), Point::new(20.0, 28.0))
                .unwrap()
                .into(),
        ],
    );
    for algorithm in Algorithm::ALL {
        let mut finder =
            QuadPathfinder::new(w.tree(), w.store(), algorithm, &BuildOptions::default()).unwrap();
        let (vertices, edges) = (finder.graph().vertex_count(), finder.graph().edge_count());
        let start = Point::new(2.0, 16.0);
        let goal = Point::new(30.0, 16.0);

        let first = finder.find_path(start, goal).unwrap();
        let second = finder.find_path(start, goal).unwrap();
        assert_eq!(first, second, "{algorithm}");
        assert_endpoints(&first, start, goal);
        assert_eq!(finder.graph().vertex_count(), vertices, "{algorithm}");
        assert_eq!(finder.graph().edge_count(), edges, "{algorithm}");
    }
}

#[test]
fn coincident_start_and_goal() {
    let w = world(10.0, Vec::new());
    let mut finder =
        QuadPathfinder::new(w.tree(), w.store(), Algorithm::AStar, &BuildOptions::default())
            .unwrap();
    let p = Point::new(3.0, 3.0);
    let route = finder.find_path(p, p).unwrap();
    assert_endpoints(&route, p, p);
    assert!(polyline_length(&route) < 1e-9);
}
