
use crate::geometry::bisector::Bisector;
use crate::geometry::point::Point;
use crate::geometry::site::Sign;
use crate::topology::edge::HalfEdgeSide;
use crate::topology::graph::HalfEdgeGraph;
use crate::topology::ids::{EdgeId, FaceId, VertexId};
use crate::topology::vertex::VertexKind;

/// Triangle `v0 v1 v2` bounding `inner` counter-clockwise; the twins bound
/// `outer`. `ccw[i]` runs `v[i] → v[i+1]`, `cw[i]` is its twin.
pub(super) struct Triangle {
    pub graph: HalfEdgeGraph<'static>,
    pub v: [VertexId; 3],
    pub inner: FaceId,
    pub outer: FaceId,
    pub ccw: [EdgeId; 3],
    pub cw: [EdgeId; 3],
}

pub(super) fn triangle() -> Triangle {
    let mut graph = HalfEdgeGraph::new();
    let inner = graph.add_face(None);
    let outer = graph.add_face(None);
    let v = [
        graph.add_vertex(Point::new(0.0, 0.0), VertexKind::Outer),
        graph.add_vertex(Point::new(4.0, 0.0), VertexKind::Outer),
        graph.add_vertex(Point::new(0.0, 4.0), VertexKind::Outer),
    ];
    let mut ccw = [EdgeId::new(0); 3];
    let mut cw = [EdgeId::new(0); 3];
    for i in 0..3 {
        let (e, t) = graph
            .add_edge_pair(
                v[i],
                v[(i + 1) % 3],
                HalfEdgeSide::new(inner, Sign::Plus),
                HalfEdgeSide::new(outer, Sign::Plus),
                Bisector::default(),
            )
            .unwrap();
        ccw[i] = e;
        cw[i] = t;
    }
    for i in 0..3 {
        graph.set_next(ccw[i], ccw[(i + 1) % 3]).unwrap();
        graph.set_next(cw[i], cw[(i + 2) % 3]).unwrap();
    }
    graph.set_face_edge(inner, ccw[0]).unwrap();
    graph.set_face_edge(outer, cw[0]).unwrap();
    Triangle {
        graph,
        v,
        inner,
        outer,
        ccw,
        cw,
    }
}
