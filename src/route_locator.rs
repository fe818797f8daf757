//nearest route lookup for an arbitrary geographic point
use crate::route_network::RoutableRoute;
use geo::{Distance, Haversine, Point};
use std::collections::HashMap;

/// Closest route to a target point: the owning route id, the closest
/// waypoint on its polyline, and the haversine distance in meters.
///
/// The empty-corpus sentinel is `{None, None, INFINITY}`; callers treat it
/// as "nothing to plan against".
#[derive(Debug, Clone, PartialEq)]
pub struct NearestRoute {
    pub route_id: Option<String>,
    pub point: Option<Point>,
    pub distance: f64,
}

impl NearestRoute {
    fn none() -> Self {
        Self {
            route_id: None,
            point: None,
            distance: f64::INFINITY,
        }
    }
}

/// Scan every waypoint of every route for the global minimum distance to
/// `target`.
///
/// Exhaustive on purpose: the corpus is a few hundred points, so a spatial
/// index buys nothing here. Routes are visited in id order so equidistant
/// candidates resolve the same way on every call.
pub fn nearest_route(routes: &HashMap<String, RoutableRoute>, target: Point) -> NearestRoute {
    let mut found = NearestRoute::none();

    let mut ids: Vec<&String> = routes.keys().collect();
    ids.sort();

    for id in ids {
        for waypoint in &routes[id].points {
            let distance = Haversine.distance(target, *waypoint);
            if distance < found.distance {
                found = NearestRoute {
                    route_id: Some(id.clone()),
                    point: Some(*waypoint),
                    distance,
                };
            }
        }
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::point;

    fn routable(id: &str, points: Vec<Point>) -> RoutableRoute {
        RoutableRoute {
            id: id.to_string(),
            name: format!("route {id}"),
            price: 12.0,
            travel_method: "local".to_string(),
            route_type: "taxi".to_string(),
            start_rank_id: "1".to_string(),
            end_rank_id: "2".to_string(),
            points,
            directions: Vec::new(),
        }
    }

    #[test]
    fn empty_corpus_returns_sentinel() {
        let routes = HashMap::new();
        let found = nearest_route(&routes, point!(x: 28.0, y: -26.0));
        assert_eq!(found.route_id, None);
        assert_eq!(found.point, None);
        assert!(found.distance.is_infinite());
    }

    #[test]
    fn picks_the_geometrically_closer_waypoint() {
        let mut routes = HashMap::new();
        routes.insert(
            "r1".to_string(),
            routable(
                "r1",
                vec![point!(x: 28.0, y: -26.0), point!(x: 28.1, y: -26.1)],
            ),
        );
        let found = nearest_route(&routes, point!(x: 28.01, y: -26.01));
        assert_eq!(found.route_id.as_deref(), Some("r1"));
        assert_eq!(found.point, Some(point!(x: 28.0, y: -26.0)));
        assert!(found.distance >= 0.0);
    }

    #[test]
    fn picks_the_closer_of_two_routes() {
        let mut routes = HashMap::new();
        routes.insert(
            "far".to_string(),
            routable("far", vec![point!(x: 30.0, y: -28.0)]),
        );
        routes.insert(
            "near".to_string(),
            routable("near", vec![point!(x: 28.05, y: -26.05)]),
        );
        let found = nearest_route(&routes, point!(x: 28.0, y: -26.0));
        assert_eq!(found.route_id.as_deref(), Some("near"));
    }

    #[test]
    fn repeated_lookups_agree() {
        let mut routes = HashMap::new();
        for id in ["a", "b", "c"] {
            routes.insert(
                id.to_string(),
                routable(id, vec![point!(x: 28.0, y: -26.0)]),
            );
        }
        //three equidistant candidates, the winner must not depend on map order
        let first = nearest_route(&routes, point!(x: 28.2, y: -26.2));
        for _ in 0..10 {
            assert_eq!(first, nearest_route(&routes, point!(x: 28.2, y: -26.2)));
        }
        assert_eq!(first.route_id.as_deref(), Some("a"));
    }
}
