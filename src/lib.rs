#![deny(
    clippy::mutable_key_type,
    clippy::map_entry,
    clippy::boxed_local,
    clippy::let_unit_value,
    clippy::redundant_allocation,
    clippy::bool_comparison,
    clippy::bind_instead_of_map,
    clippy::vec_box,
    clippy::while_let_loop,
    clippy::useless_asref,
    clippy::repeat_once,
    clippy::deref_addrof,
    clippy::suspicious_map,
    clippy::arc_with_non_send_sync,
    clippy::single_char_pattern,
    clippy::for_kv_map,
    clippy::let_and_return,
    clippy::iter_nth,
    clippy::iter_cloned_collect,
    clippy::bytes_nth,
    clippy::deprecated_clippy_cfg_attr,
    clippy::match_result_ok,
    clippy::cmp_owned,
    clippy::cmp_null,
    clippy::op_ref,
    clippy::useless_vec,
    clippy::module_inception
)]
pub mod connectivity;
pub mod path_assembly;
pub mod priority_queue;
pub mod rank_dijkstras;
pub mod rank_graph;
pub mod route_locator;
pub mod route_network;

pub use crate::path_assembly::{plan, PathResult};
pub use crate::rank_graph::RankGraph;
pub use crate::route_network::RouteCorpus;

use geo::Point;
use serde::Deserialize;

/// A single trip-planning request, already parsed by the caller.
///
/// Provinces are only used to pre-filter the corpus before the core runs
/// (see [`RouteCorpus::filter_provinces`]); the planner itself works on
/// coordinates alone. Points are (x = longitude, y = latitude).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlanRequest {
    pub source: Point,
    pub source_province: String,
    pub destination: Point,
    pub destination_province: String,
}

/// Every way a plan can fail, named so callers can tell "no route exists"
/// apart from "the data was unusable".
///
/// Components below the assembler signal "not found" with sentinel returns;
/// only [`plan`] turns those into one of these variants.
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    #[error("request has no usable {0} coordinate")]
    InputMissing(&'static str),

    #[error("route corpus could not be formatted into routable structures")]
    CorpusFormattingFailure,

    #[error("no route close to the {0} point")]
    NoNearestRouteFound(&'static str),

    #[error("taxi rank {0} on the itinerary has no rank record")]
    RanksUnresolvable(String),

    #[error("no taxi route connects rank {from} to rank {to}")]
    NoPathFound { from: String, to: String },
}

pub type Result<T> = std::result::Result<T, PlanError>;
