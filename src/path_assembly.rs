//assembles the final itinerary out of the located routes
use crate::connectivity;
use crate::rank_dijkstras::shortest_path;
use crate::rank_graph::RankGraph;
use crate::route_locator::nearest_route;
use crate::route_network::{format_routes, RoutableRoute, RouteCorpus, TaxiRank};
use crate::{PlanError, PlanRequest, Result};
use geo::Point;
use log::{debug, info};
use serde::Serialize;
use std::collections::HashMap;

/// One leg of the itinerary, trimmed to what the caller displays.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegRoute {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub travel_method: String,
    pub route_type: String,
    pub start_rank_id: String,
    pub end_rank_id: String,
}

impl From<&RoutableRoute> for LegRoute {
    fn from(route: &RoutableRoute) -> Self {
        Self {
            id: route.id.clone(),
            name: route.name.clone(),
            price: route.price,
            travel_method: route.travel_method.clone(),
            route_type: route.route_type.clone(),
            start_rank_id: route.start_rank_id.clone(),
            end_rank_id: route.end_rank_id.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceBreakdown {
    pub per_leg: Vec<f64>,
    pub total: f64,
}

/// The planner's answer: ordered legs, fares, per-leg direction coordinates
/// and the ranks the rider passes through, plus the polyline anchors for the
/// requested coordinates. Built per request, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathResult {
    pub source: Point,
    pub point_close_to_source: Point,
    pub destination: Point,
    pub point_close_to_dest: Point,
    pub routes: Vec<LegRoute>,
    pub prices: PriceBreakdown,
    pub directions: Vec<Vec<Point>>,
    pub chosen_taxi_ranks: Vec<TaxiRank>,
}

/// Plan an itinerary from `request.source` to `request.destination` over
/// the given corpus snapshot.
///
/// The corpus is read-only and the graph for the transfer case is built
/// fresh inside this call, so concurrent invocations over the same snapshot
/// are safe. Each failure mode maps to its own [`PlanError`] variant; the
/// components below this function only ever hand back sentinels.
pub fn plan(corpus: &RouteCorpus, request: &PlanRequest) -> Result<PathResult> {
    if !request.source.x().is_finite() || !request.source.y().is_finite() {
        return Err(PlanError::InputMissing("source"));
    }
    if !request.destination.x().is_finite() || !request.destination.y().is_finite() {
        return Err(PlanError::InputMissing("destination"));
    }

    let routable = format_routes(&corpus.routes, &corpus.waypoints, &corpus.directions)
        .ok_or(PlanError::CorpusFormattingFailure)?;
    debug!("{} routable routes after formatting", routable.len());

    let near_source = nearest_route(&routable, request.source);
    let (source_route_id, point_close_to_source) = match (near_source.route_id, near_source.point)
    {
        (Some(id), Some(point)) => (id, point),
        _ => return Err(PlanError::NoNearestRouteFound("source")),
    };

    let near_dest = nearest_route(&routable, request.destination);
    let (dest_route_id, point_close_to_dest) = match (near_dest.route_id, near_dest.point) {
        (Some(id), Some(point)) => (id, point),
        _ => return Err(PlanError::NoNearestRouteFound("destination")),
    };

    let source_route = routable
        .get(&source_route_id)
        .ok_or(PlanError::CorpusFormattingFailure)?;
    let dest_route = routable
        .get(&dest_route_id)
        .ok_or(PlanError::CorpusFormattingFailure)?;

    let meeting = connectivity::resolve(source_route, dest_route);
    let legs: Vec<&RoutableRoute> = if meeting.connected {
        //the two routes already meet at a rank, no graph search
        info!(
            "routes {source_route_id} and {dest_route_id} share rank {:?}",
            meeting.shared_rank_id
        );
        if source_route_id == dest_route_id {
            vec![source_route]
        } else {
            vec![source_route, dest_route]
        }
    } else {
        transfer_legs(&routable, source_route, dest_route, request)?
    };

    let per_leg: Vec<f64> = legs.iter().map(|leg| leg.price).collect();
    let total = per_leg.iter().sum();
    let directions: Vec<Vec<Point>> = legs.iter().map(|leg| leg.directions.clone()).collect();
    let chosen_taxi_ranks = resolve_ranks(&legs, &corpus.taxi_ranks)?;

    Ok(PathResult {
        source: request.source,
        point_close_to_source,
        destination: request.destination,
        point_close_to_dest,
        routes: legs.iter().map(|leg| LegRoute::from(*leg)).collect(),
        prices: PriceBreakdown { per_leg, total },
        directions,
        chosen_taxi_ranks,
    })
}

/// Transfer case: search the rank graph between the endpoint ranks chosen
/// by the longitude heuristic, then map the rank path back onto routes.
fn transfer_legs<'a>(
    routable: &'a HashMap<String, RoutableRoute>,
    source_route: &RoutableRoute,
    dest_route: &RoutableRoute,
    request: &PlanRequest,
) -> Result<Vec<&'a RoutableRoute>> {
    let mut graph = RankGraph::new();
    let mut route_by_edge: HashMap<(&str, &str), &str> = HashMap::new();

    //sorted so a rank pair served by several routes resolves the same way
    //every request, for both the weight and the leg mapping
    let mut ids: Vec<&String> = routable.keys().collect();
    ids.sort();
    for id in ids {
        let route = &routable[id];
        graph.add_edge(&route.start_rank_id, &route.end_rank_id, route.price);
        route_by_edge.insert(
            edge_key(&route.start_rank_id, &route.end_rank_id),
            route.id.as_str(),
        );
    }

    let (from, to) = search_ranks(source_route, dest_route, request);
    debug!("transfer search from rank {from} to rank {to}");

    let found = shortest_path(&graph, from, to);
    if found.path.is_empty() {
        return Err(PlanError::NoPathFound {
            from: from.to_owned(),
            to: to.to_owned(),
        });
    }

    let mut legs = Vec::with_capacity(found.path.len().saturating_sub(1));
    for pair in found.path.windows(2) {
        let leg = route_by_edge
            .get(&edge_key(&pair[0], &pair[1]))
            .and_then(|id| routable.get(*id))
            .ok_or_else(|| PlanError::NoPathFound {
                from: pair[0].clone(),
                to: pair[1].clone(),
            })?;
        legs.push(leg);
    }
    Ok(legs)
}

//undirected pair key, smaller id first
fn edge_key<'a>(a: &'a str, b: &'a str) -> (&'a str, &'a str) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Pick which endpoint ranks to search between.
///
/// Travelling "down" in longitude starts from the source route's start rank
/// toward the destination route's end rank; travelling "up" uses the
/// mirrored pair. Equal longitudes fall back to the same comparison on
/// latitude; a fully coincident pair takes the first branch.
fn search_ranks<'a>(
    source_route: &'a RoutableRoute,
    dest_route: &'a RoutableRoute,
    request: &PlanRequest,
) -> (&'a str, &'a str) {
    let source = request.source;
    let destination = request.destination;
    let source_side_first = if source.x() != destination.x() {
        source.x() > destination.x()
    } else if source.y() != destination.y() {
        source.y() > destination.y()
    } else {
        true
    };

    if source_side_first {
        (&source_route.start_rank_id, &dest_route.end_rank_id)
    } else {
        (&source_route.end_rank_id, &dest_route.start_rank_id)
    }
}

/// Distinct ranks touched along the itinerary, in travel order, resolved to
/// their full records for display.
fn resolve_ranks(legs: &[&RoutableRoute], ranks: &[TaxiRank]) -> Result<Vec<TaxiRank>> {
    let by_id: HashMap<&str, &TaxiRank> =
        ranks.iter().map(|rank| (rank.id.as_str(), rank)).collect();

    let mut chosen: Vec<TaxiRank> = Vec::new();
    let mut seen: Vec<&str> = Vec::new();
    for leg in legs {
        for rank_id in [leg.start_rank_id.as_str(), leg.end_rank_id.as_str()] {
            if seen.contains(&rank_id) {
                continue;
            }
            seen.push(rank_id);
            let rank = by_id
                .get(rank_id)
                .ok_or_else(|| PlanError::RanksUnresolvable(rank_id.to_owned()))?;
            chosen.push((*rank).clone());
        }
    }
    Ok(chosen)
}
