//! A minimal incremental builder driving the graph through one point
//! insertion: mark IN vertices, split IN-OUT edges at solver positions,
//! connect the new vertices into the new face, remove the IN vertex.

use planar_voronoi::prelude::*;

mod util;
use util::{assert_closed, assert_face_status_consistent, pt};

const OUTER_RADIUS: f64 = 30.0;

struct Initial<'s> {
    graph: HalfEdgeGraph<'s>,
    faces: [FaceId; 3],
    outside: FaceId,
    center: VertexId,
    /// Half-edge leaving the center along the ray between faces `i` and `i + 1`.
    rays: [EdgeId; 3],
}

/// Voronoi diagram of three points on a circle of radius 10 around the
/// origin: one vertex at the origin and three rays, cut off by an outer
/// triangle whose exterior is an auxiliary face.
fn three_site_diagram(sites: &[Site]) -> Initial<'_> {
    let mut graph = HalfEdgeGraph::new();
    let faces = [
        graph.add_face(Some(&sites[0])),
        graph.add_face(Some(&sites[1])),
        graph.add_face(Some(&sites[2])),
    ];
    let outside = graph.add_face(None);

    let center = graph.add_vertex(Point::ORIGIN, VertexKind::Normal);
    graph.set_vertex_clearance(center, 10.0).unwrap();
    // ray i separates sites i and i + 1 and points away from site i + 2
    let outer: Vec<VertexId> = (0..3)
        .map(|i| {
            let away = sites[(i + 2) % 3].center().unwrap() * (-OUTER_RADIUS / 10.0);
            graph.add_vertex(away, VertexKind::Outer)
        })
        .collect();

    let plus = Sign::Plus;
    let side = |f: FaceId| HalfEdgeSide::new(f, plus);
    let mut rays = [EdgeId::new(0); 3];
    let mut ray_twins = [EdgeId::new(0); 3];
    for i in 0..3 {
        // the ray from the center bounds face i + 1 on its left
        let (e, t) = graph
            .add_edge_pair(
                center,
                outer[i],
                side(faces[(i + 1) % 3]),
                side(faces[i]),
                Bisector::default(),
            )
            .unwrap();
        graph.set_parameters(e).unwrap();
        rays[i] = e;
        ray_twins[i] = t;
    }
    // hull edge of face i runs from the ray of (i-1, i) to the ray of (i, i+1)
    let mut hull = [EdgeId::new(0); 3];
    let mut hull_twins = [EdgeId::new(0); 3];
    for i in 0..3 {
        let (e, t) = graph
            .add_edge_pair(
                outer[(i + 2) % 3],
                outer[i],
                side(faces[i]),
                side(outside),
                Bisector::default(),
            )
            .unwrap();
        hull[i] = e;
        hull_twins[i] = t;
    }
    for i in 0..3 {
        let prev = (i + 2) % 3;
        // face i: center -> outer[prev] -> outer[i] -> center
        graph.set_next(rays[prev], hull[i]).unwrap();
        graph.set_next(hull[i], ray_twins[i]).unwrap();
        graph.set_next(ray_twins[i], rays[prev]).unwrap();
        graph.set_face_edge(faces[i], hull[i]).unwrap();
        // outside runs clockwise around the hull
        graph.set_next(hull_twins[i], hull_twins[prev]).unwrap();
    }
    graph.set_face_edge(outside, hull_twins[0]).unwrap();

    Initial {
        graph,
        faces,
        outside,
        center,
        rays,
    }
}

fn equilateral_sites(new_site: Point) -> Vec<Site> {
    let h = 5.0 * 3f64.sqrt();
    vec![
        pt(0.0, 10.0),
        pt(-h, -5.0),
        pt(h, -5.0),
        pt(new_site.x, new_site.y),
    ]
}

#[test]
fn initial_diagram_is_consistent() {
    let sites = equilateral_sites(Point::new(1.0, 1.0));
    let init = three_site_diagram(&sites);
    assert_closed(&init.graph);
    validate_graph(&init.graph, GraphValidationOptions::all()).unwrap();
    assert_eq!(init.graph.vertex_count(), 4);
    assert_eq!(init.graph.edge_count(), 12);
    for f in init.faces {
        assert_eq!(init.graph.face_edges(f).unwrap().len(), 3);
    }
    assert_eq!(init.graph.adjacent_faces(init.center).unwrap().len(), 3);
}

#[test]
fn insert_point_near_center() {
    let sites = equilateral_sites(Point::new(1.0, 1.0));
    let new_site = &sites[3];
    let Initial {
        mut graph,
        faces,
        outside,
        center,
        rays,
    } = three_site_diagram(&sites);
    assert_closed(&graph);

    // 1. mark vertices closer to the new site than to their own generators
    let old_sites = &sites[..3];
    let vertex_ids: Vec<VertexId> = graph.vertices().map(|(v, _)| v).collect();
    for v in vertex_ids {
        let p = graph.vertex(v).unwrap().position;
        let own = old_sites
            .iter()
            .map(|s| s.distance(p))
            .fold(f64::INFINITY, f64::min);
        let status = if new_site.distance(p) < own {
            VertexStatus::In
        } else {
            VertexStatus::Out
        };
        graph.set_vertex_status(v, status).unwrap();
    }
    assert_eq!(graph.vertices_with_status(VertexStatus::In), vec![center]);

    // 2. the faces around the IN vertex take part in the insertion
    assert_eq!(graph.incident_faces().unwrap(), faces.to_vec());
    assert_eq!(graph.face_status(outside).unwrap(), FaceStatus::Nonincident);
    assert_face_status_consistent(&graph);

    // 3. split every IN-OUT edge where it is equidistant from its two faces'
    //    generators and the new one
    let mut new_vertices = [center; 3];
    let mut outer_parts = [(rays[0], rays[0]); 3];
    for (i, &ray) in rays.iter().enumerate() {
        let edge = graph.edge(ray).unwrap();
        let twin = graph.edge(edge.twin()).unwrap();
        let left = graph.site(edge.face()).unwrap().unwrap();
        let right = graph.site(twin.face()).unwrap().unwrap();
        let solver = Solver::for_sites(left, right, new_site);
        let mut solutions = Vec::new();
        assert_eq!(
            solver.solve_unsigned(left, right, new_site, &mut solutions),
            Ok(1)
        );
        let sol = solutions[0];

        // the solution lies strictly inside the ray segment
        let from = graph.vertex(edge.source()).unwrap().position;
        let to = graph.vertex(edge.target()).unwrap().position;
        let along = (sol.p - from).dot(to - from) / (to - from).norm_sq();
        assert!(along > 0.0 && along < 1.0, "split parameter {along}");
        let on_curve = [edge.bisector().point(sol.t), edge.bisector().flipped().point(sol.t)]
            .into_iter()
            .flatten()
            .any(|q| q.dist(sol.p) < 1e-9);
        assert!(on_curve, "{} is off the ray", sol.p);

        let v = graph.add_vertex(sol.p, VertexKind::Normal);
        graph.set_vertex_clearance(v, sol.t).unwrap();
        graph.set_vertex_status(v, VertexStatus::New).unwrap();
        outer_parts[i] = graph.split_edge(ray, v).unwrap();
        new_vertices[i] = v;
    }
    assert_closed(&graph);
    assert_face_status_consistent(&graph);
    planar_voronoi::debug_invariants!(graph.validate_invariants(), "after splitting");

    // 4. connect the new vertices: in face i the new edge runs from the split
    //    vertex on ray (i, i+1) to the one on ray (i-1, i); its twin bounds
    //    the new face
    let new_face = graph.add_face(Some(new_site));
    let mut inner = [rays[0]; 3];
    let mut new_face_edges = [rays[0]; 3];
    for i in 0..3 {
        let prev = (i + 2) % 3;
        let (e, t) = graph
            .add_edge_pair(
                new_vertices[i],
                new_vertices[prev],
                HalfEdgeSide::new(faces[i], Sign::Plus),
                HalfEdgeSide::new(new_face, Sign::Plus),
                Bisector::default(),
            )
            .unwrap();
        graph.set_parameters(e).unwrap();
        inner[i] = e;
        new_face_edges[i] = t;
    }
    for i in 0..3 {
        let prev = (i + 2) % 3;
        let (_, back) = outer_parts[i];
        let (forward, _) = outer_parts[prev];
        // face i: ... -> outer[i] -> new[i] -> new[prev] -> outer[prev] -> ...
        graph.set_next(back, inner[i]).unwrap();
        graph.set_next(inner[i], forward).unwrap();
        graph.set_face_edge(faces[i], inner[i]).unwrap();
        // new face runs new[prev] -> new[i] -> new[i+1]
        graph
            .set_next(new_face_edges[i], new_face_edges[(i + 1) % 3])
            .unwrap();
    }
    graph.set_face_edge(new_face, new_face_edges[0]).unwrap();

    // 5. remove the IN vertex with everything attached to it
    assert_eq!(graph.clear_vertex(center).unwrap(), 3);
    graph.remove_vertex(center).unwrap();
    assert!(graph.vertex(center).is_err());

    // 6. the result is a closed diagram with a triangular new face
    assert_closed(&graph);
    assert_face_status_consistent(&graph);
    validate_graph(&graph, GraphValidationOptions::all()).unwrap();
    graph.reset_vertex_status();
    assert!(graph.incident_faces().unwrap().is_empty());

    assert_eq!(graph.vertex_count(), 6);
    assert_eq!(graph.edge_count(), 18);
    assert_eq!(graph.face_count(), 5);
    let mut around_new = graph.face_vertices(new_face).unwrap();
    around_new.sort();
    let mut expected = new_vertices.to_vec();
    expected.sort();
    assert_eq!(around_new, expected);
    for f in faces {
        assert_eq!(graph.face_edges(f).unwrap().len(), 4);
    }
    for v in new_vertices {
        assert_eq!(graph.adjacent_faces(v).unwrap().len(), 3);
        let p = graph.vertex(v).unwrap().position;
        let t = graph.vertex(v).unwrap().clearance;
        assert!((new_site.distance(p) - t).abs() < 1e-9);
    }
}
