//! `RouteFacade` — `spec.md` §4.10's Route Facade, wiring address
//! resolution, the coordinate cache, budgets, and the planner into one
//! entry point. Construction follows the teacher's fluent-builder
//! discipline (`dt_sim::builder::SimBuilder`): required inputs in `new`,
//! optional inputs as chained setters, validated once in `build`.

use tracing::debug;

use taro_cost::CostEngine;
use taro_model::ModelStore;
use taro_overlay::LiveOverlay;
use taro_queue::{SearchQueue, VisitedSet};
use taro_search::{
    matrix, point_to_point, EuclideanHeuristic, Heuristic, LandmarkHeuristic, MatrixError, NoneHeuristic,
    PlannerError, PlannerScratch, SearchBudget,
};
use taro_spatial::{Capability, SpatialRuntime};
use taro_strategy::{Address, AddressingStrategy};

use crate::cache::{CacheKey, CoordCache};
use crate::config::FacadeConfig;
use crate::error::{InvalidInputError, RouteResult};
use crate::request::{Algorithm, HeuristicKind, MatrixRequest, RouteRequest};
use crate::result::{MatrixRecord, RouteOutcome};

enum AnyHeuristic<'a> {
    None(NoneHeuristic),
    Euclidean(EuclideanHeuristic<'a>),
    Landmark(LandmarkHeuristic<'a>),
}

impl Heuristic for AnyHeuristic<'_> {
    fn estimate(&self, from_node: u32, target_node: u32) -> f64 {
        match self {
            AnyHeuristic::None(h) => h.estimate(from_node, target_node),
            AnyHeuristic::Euclidean(h) => h.estimate(from_node, target_node),
            AnyHeuristic::Landmark(h) => h.estimate(from_node, target_node),
        }
    }
}

/// Fluent builder for [`RouteFacade`]. Required: the loaded model, the live
/// overlay, and the cost engine's bucket size. Optional: spatial-query
/// capability (defaults enabled whenever the model carries an index) and
/// [`FacadeConfig`] (defaults to [`FacadeConfig::default`]).
pub struct RouteFacadeBuilder<'a> {
    model: &'a ModelStore,
    overlay: &'a LiveOverlay,
    bucket_size_sec: i64,
    spatial_capability: Option<Capability>,
    config: Option<FacadeConfig>,
}

impl<'a> RouteFacadeBuilder<'a> {
    pub fn new(model: &'a ModelStore, overlay: &'a LiveOverlay, bucket_size_sec: i64) -> Self {
        Self { model, overlay, bucket_size_sec, spatial_capability: None, config: None }
    }

    pub fn spatial_capability(mut self, capability: Capability) -> Self {
        self.spatial_capability = Some(capability);
        self
    }

    pub fn config(mut self, config: FacadeConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn build(self) -> RouteResult<RouteFacade<'a>> {
        let config = self.config.unwrap_or_default();
        let capability = self.spatial_capability.unwrap_or(if self.model.spatial_index.is_some() {
            Capability::Enabled
        } else {
            Capability::Disabled
        });
        let cost = CostEngine::new(self.model, self.overlay, self.bucket_size_sec)?;
        let spatial = SpatialRuntime::new(&self.model.topology.coordinates, self.model.spatial_index.as_ref(), capability);
        let cache = CoordCache::new(config.coord_cache_segments, config.coord_cache_capacity_per_segment);
        Ok(RouteFacade { model: self.model, spatial, cost, cache, config })
    }
}

/// The assembled facade: immutable and safely shared across threads
/// (`spec.md` §5) — every `route`/`matrix` call takes its own caller-owned
/// [`SearchQueue`]/[`VisitedSet`]/[`PlannerScratch`], exactly as the planner
/// itself requires.
pub struct RouteFacade<'a> {
    model: &'a ModelStore,
    spatial: SpatialRuntime<'a>,
    cost: CostEngine<'a>,
    cache: CoordCache,
    config: FacadeConfig,
}

impl<'a> RouteFacade<'a> {
    fn resolve(&self, addressing: &dyn AddressingStrategy, address: Address, max_snap_distance: f64) -> RouteResult<u32> {
        if let Address::Coordinate { x, y } = address {
            if !x.is_finite() || !y.is_finite() {
                return Err(InvalidInputError::NonFiniteCoordinate { x, y }.into());
            }
            let key = CacheKey::new(addressing.id(), x, y);
            if let Some(node) = self.cache.get(&key) {
                return Ok(node);
            }
            let node = addressing.resolve(self.model, &self.spatial, address, max_snap_distance)?;
            self.cache.insert(key, node);
            return Ok(node);
        }
        Ok(addressing.resolve(self.model, &self.spatial, address, max_snap_distance)?)
    }

    fn build_heuristic(&self, algorithm: Algorithm) -> RouteResult<AnyHeuristic<'a>> {
        let kind = match algorithm {
            Algorithm::Dijkstra => HeuristicKind::None,
            Algorithm::AStar(kind) => kind,
        };
        Ok(match kind {
            HeuristicKind::None => AnyHeuristic::None(NoneHeuristic),
            HeuristicKind::Euclidean { fastest_speed } => {
                AnyHeuristic::Euclidean(EuclideanHeuristic::new(&self.model.topology.coordinates, fastest_speed)?)
            }
            HeuristicKind::Landmark => AnyHeuristic::Landmark(LandmarkHeuristic::new(&self.model.landmarks)?),
        })
    }

    fn snap_distance(&self, requested: Option<f64>) -> RouteResult<f64> {
        let distance = requested.unwrap_or(self.config.max_snap_distance_default);
        if !(distance > 0.0) {
            return Err(InvalidInputError::NonPositiveSnapDistance(distance).into());
        }
        Ok(distance)
    }

    /// Resolve addresses, dispatch to the planner, and assemble a
    /// `spec.md` §6 Route payload. Planner-level unreachability and budget
    /// overflow both surface as `RouteOutcome::Unreachable` with the
    /// matching reason code rather than an `Err` — they are categorized
    /// results, not facade failures.
    pub fn route(
        &self,
        queue: &mut SearchQueue,
        visited: &mut VisitedSet,
        scratch: &mut PlannerScratch,
        budget: SearchBudget,
        request: &RouteRequest<'_>,
    ) -> RouteResult<RouteOutcome> {
        let max_snap_distance = self.snap_distance(request.max_snap_distance)?;
        let source_node = self.resolve(request.addressing, request.source, max_snap_distance)?;
        let target_node = self.resolve(request.addressing, request.target, max_snap_distance)?;
        let heuristic = self.build_heuristic(request.algorithm)?;

        match point_to_point(
            self.model,
            &self.cost,
            queue,
            visited,
            scratch,
            budget,
            source_node,
            target_node,
            request.departure_tick,
            &heuristic,
        ) {
            Ok(path) => Ok(RouteOutcome::Route {
                total_cost: path.total_seconds as f32,
                total_ticks: path.arrival_tick - request.departure_tick,
                edge_path: path.edges,
                arrival_ticks: path.arrival_ticks.into_iter().map(|t| t.0).collect(),
            }),
            Err(PlannerError::Unreachable(_)) => {
                debug!(source_node, target_node, "route_unreachable");
                Ok(RouteOutcome::Unreachable { reason_code: "UNREACHABLE".to_string() })
            }
            Err(PlannerError::Budget(e)) => {
                debug!(source_node, target_node, reason_code = e.reason_code(), "route_budget_exceeded");
                Ok(RouteOutcome::Unreachable { reason_code: e.reason_code().to_string() })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Resolve addresses, run one matrix search, and assemble a `spec.md`
    /// §6 Matrix payload: one record per requested target, in request
    /// order, each independently `Route` or `Unreachable`.
    pub fn matrix(
        &self,
        queue: &mut SearchQueue,
        visited: &mut VisitedSet,
        scratch: &mut PlannerScratch,
        budget: SearchBudget,
        settled_limit: usize,
        request: &MatrixRequest<'_>,
    ) -> RouteResult<Vec<MatrixRecord>> {
        if request.targets.is_empty() {
            return Err(InvalidInputError::NoTargets.into());
        }
        let max_snap_distance = self.snap_distance(request.max_snap_distance)?;
        let source_node = self.resolve(request.addressing, request.source, max_snap_distance)?;
        let mut target_nodes = Vec::with_capacity(request.targets.len());
        for &address in request.targets {
            target_nodes.push(self.resolve(request.addressing, address, max_snap_distance)?);
        }
        let heuristic = self.build_heuristic(request.algorithm)?;

        let entries = match matrix(
            self.model,
            &self.cost,
            queue,
            visited,
            scratch,
            budget,
            settled_limit,
            source_node,
            &target_nodes,
            request.departure_tick,
            &heuristic,
        ) {
            Ok(entries) => entries,
            Err(MatrixError::Budget(e)) => {
                let reason_code = e.reason_code().to_string();
                return Ok(request
                    .targets
                    .iter()
                    .map(|&target| MatrixRecord { target, outcome: RouteOutcome::Unreachable { reason_code: reason_code.clone() } })
                    .collect());
            }
            Err(e) => return Err(e.into()),
        };

        Ok(request
            .targets
            .iter()
            .zip(target_nodes.iter())
            .map(|(&target, &node)| {
                let outcome = match entries.iter().find(|e| e.target_node == node) {
                    Some(entry) => RouteOutcome::Route {
                        total_cost: entry.total_seconds as f32,
                        total_ticks: entry.arrival_tick - request.departure_tick,
                        edge_path: entry.edges.clone(),
                        arrival_ticks: entry.arrival_ticks.iter().map(|t| t.0).collect(),
                    },
                    None => RouteOutcome::Unreachable { reason_code: "UNREACHABLE".to_string() },
                };
                MatrixRecord { target, outcome }
            })
            .collect())
    }
}
