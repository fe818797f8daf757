//raw route corpus records and their conversion into routable structures
use geo::{point, Point};
use log::warn;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{HashMap, HashSet};

//upstream stores ids as numbers, route payloads as strings; everything is a
//string from here on so graph keys never mix the two
fn string_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Num(i64),
        Text(String),
    }
    Ok(match RawId::deserialize(deserializer)? {
        RawId::Num(n) => n.to_string(),
        RawId::Text(s) => s,
    })
}

/// A fare-bearing route between two taxi ranks, as stored upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteRecord {
    #[serde(deserialize_with = "string_id")]
    pub id: String,
    pub name: String,
    pub price: f64,
    pub travel_method: String,
    pub route_type: String,
    #[serde(deserialize_with = "string_id")]
    pub start_rank_id: String,
    #[serde(deserialize_with = "string_id")]
    pub end_rank_id: String,
}

/// One point of a route polyline, ordered by `route_index`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaypointRecord {
    #[serde(deserialize_with = "string_id")]
    pub route_id: String,
    pub lat: f64,
    pub lng: f64,
    pub route_index: u32,
}

/// One point of a route's direction segments, ordered by `direction_index`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectionRecord {
    #[serde(deserialize_with = "string_id")]
    pub route_id: String,
    pub lat: f64,
    pub lng: f64,
    pub direction_index: u32,
}

/// A taxi rank record, read-only to the planner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxiRank {
    #[serde(deserialize_with = "string_id")]
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub province: String,
    pub address: String,
    pub route_count: u32,
}

/// Everything the planner needs for one request, as read from upstream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteCorpus {
    pub routes: Vec<RouteRecord>,
    pub waypoints: Vec<WaypointRecord>,
    pub directions: Vec<DirectionRecord>,
    pub taxi_ranks: Vec<TaxiRank>,
}

impl RouteCorpus {
    /// Keep only routes with an endpoint rank in either province.
    ///
    /// This is the upstream scope-reduction step: it shrinks the corpus
    /// before formatting, it never changes what the planner does with the
    /// routes that survive. Rank records are kept whole so itinerary
    /// labelling still resolves ranks across province lines.
    pub fn filter_provinces(&self, source_province: &str, destination_province: &str) -> Self {
        let rank_provinces: HashMap<&str, &str> = self
            .taxi_ranks
            .iter()
            .map(|rank| (rank.id.as_str(), rank.province.as_str()))
            .collect();

        let in_scope = |rank_id: &str| {
            rank_provinces
                .get(rank_id)
                .map(|p| *p == source_province || *p == destination_province)
                .unwrap_or(false)
        };

        let routes: Vec<RouteRecord> = self
            .routes
            .iter()
            .filter(|r| in_scope(&r.start_rank_id) || in_scope(&r.end_rank_id))
            .cloned()
            .collect();
        let kept: HashSet<&str> = routes.iter().map(|r| r.id.as_str()).collect();

        Self {
            waypoints: self
                .waypoints
                .iter()
                .filter(|w| kept.contains(w.route_id.as_str()))
                .cloned()
                .collect(),
            directions: self
                .directions
                .iter()
                .filter(|d| kept.contains(d.route_id.as_str()))
                .cloned()
                .collect(),
            taxi_ranks: self.taxi_ranks.clone(),
            routes,
        }
    }
}

/// A route in planner form: endpoints, fare and ordered geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutableRoute {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub travel_method: String,
    pub route_type: String,
    pub start_rank_id: String,
    pub end_rank_id: String,
    pub points: Vec<Point>,
    pub directions: Vec<Point>,
}

/// Convert raw records into routable structures keyed by route id.
///
/// Waypoints and directions are sorted by their sequence index before being
/// attached. A route left with no waypoints cannot take part in the nearest
/// point search and is dropped (logged, not silent). A waypoint or direction
/// referencing an unknown route id means the corpus is inconsistent and the
/// whole conversion is refused with `None`.
pub fn format_routes(
    routes: &[RouteRecord],
    waypoints: &[WaypointRecord],
    directions: &[DirectionRecord],
) -> Option<HashMap<String, RoutableRoute>> {
    let mut formatted: HashMap<String, RoutableRoute> = routes
        .iter()
        .map(|record| {
            (
                record.id.clone(),
                RoutableRoute {
                    id: record.id.clone(),
                    name: record.name.clone(),
                    price: record.price,
                    travel_method: record.travel_method.clone(),
                    route_type: record.route_type.clone(),
                    start_rank_id: record.start_rank_id.clone(),
                    end_rank_id: record.end_rank_id.clone(),
                    points: Vec::new(),
                    directions: Vec::new(),
                },
            )
        })
        .collect();

    let mut waypoints: Vec<&WaypointRecord> = waypoints.iter().collect();
    waypoints.sort_by_key(|w| w.route_index);
    for waypoint in waypoints {
        match formatted.get_mut(&waypoint.route_id) {
            Some(route) => route.points.push(point!(x: waypoint.lng, y: waypoint.lat)),
            None => {
                warn!("waypoint references unknown route {}", waypoint.route_id);
                return None;
            }
        }
    }

    let mut directions: Vec<&DirectionRecord> = directions.iter().collect();
    directions.sort_by_key(|d| d.direction_index);
    for direction in directions {
        match formatted.get_mut(&direction.route_id) {
            Some(route) => route
                .directions
                .push(point!(x: direction.lng, y: direction.lat)),
            None => {
                warn!("direction references unknown route {}", direction.route_id);
                return None;
            }
        }
    }

    formatted.retain(|id, route| {
        if route.points.is_empty() {
            warn!("route {id} has no waypoints, dropped from routable set");
            false
        } else {
            true
        }
    });

    Some(formatted)
}
