#![allow(dead_code)]
use planar_voronoi::prelude::*;

pub fn pt(x: f64, y: f64) -> Site {
    Site::point(x, y).unwrap()
}

pub fn seg(x0: f64, y0: f64, x1: f64, y1: f64) -> Site {
    Site::line(Point::new(x0, y0), Point::new(x1, y1)).unwrap()
}

/// Quarter arc of radius `r` around `(cx, cy)`.
pub fn arc(cx: f64, cy: f64, r: f64) -> Site {
    let c = Point::new(cx, cy);
    Site::arc(c + Point::new(r, 0.0), c + Point::new(0.0, r), c, false).unwrap()
}

/// Assert two points agree to within `tol`.
pub fn assert_near(got: Point, want: Point, tol: f64) {
    assert!(
        got.dist(want) <= tol,
        "points differ\n got={got}\nwant={want}"
    );
}

/// Assert `twin(twin(e)) == e` for every half-edge and that every face
/// boundary closes.
pub fn assert_closed(graph: &HalfEdgeGraph<'_>) {
    for (e, edge) in graph.edges() {
        assert_eq!(graph.twin(edge.twin()).unwrap(), e, "twin of twin of {e}");
    }
    for f in graph.sorted_faces() {
        graph
            .face_edges(f)
            .unwrap_or_else(|err| panic!("boundary of {f} is open: {err}"));
    }
    graph.validate_invariants().unwrap();
}

/// Face status must be `Incident` exactly when a boundary vertex is `In`.
pub fn assert_face_status_consistent(graph: &HalfEdgeGraph<'_>) {
    for f in graph.sorted_faces() {
        let any_in = graph
            .face_vertices(f)
            .unwrap()
            .into_iter()
            .any(|v| graph.vertex(v).unwrap().status == VertexStatus::In);
        let expected = if any_in {
            FaceStatus::Incident
        } else {
            FaceStatus::Nonincident
        };
        assert_eq!(graph.face_status(f).unwrap(), expected, "status of {f}");
    }
}
