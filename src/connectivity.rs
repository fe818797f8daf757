//checks whether two located routes already meet at a taxi rank
use crate::route_network::RoutableRoute;

/// Whether two routes share an endpoint rank, and which one.
///
/// A shared rank means the rider can transfer on foot at that rank, so no
/// graph search is needed.
#[derive(Debug, Clone, PartialEq)]
pub struct Connectivity {
    pub connected: bool,
    pub shared_rank_id: Option<String>,
}

/// Compare the endpoint rank pairs of the two routes; any match across the
/// pairs connects them. The first match in (start, end) order is reported.
pub fn resolve(source_route: &RoutableRoute, dest_route: &RoutableRoute) -> Connectivity {
    let source_ends = [&source_route.start_rank_id, &source_route.end_rank_id];
    let dest_ends = [&dest_route.start_rank_id, &dest_route.end_rank_id];

    for source_end in source_ends {
        for dest_end in dest_ends {
            if source_end == dest_end {
                return Connectivity {
                    connected: true,
                    shared_rank_id: Some(source_end.clone()),
                };
            }
        }
    }

    Connectivity {
        connected: false,
        shared_rank_id: None,
    }
}
