use std::cmp::max;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

use rand::seq::IteratorRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, trace};

use crate::config::constant::{SOLVER_MAX_ITERATIONS, SOLVER_SEED, SOLVER_TABU_LEN};
use crate::solver::route_search::construction::cheapest_extension_tour;
use crate::solver::route_search::fitness::{is_feasible, tour_fitness, tour_travel_m};
use crate::solver::route_search::neighborhood::score_swaps;
use crate::solver::route_search::tabu::{choose_candidate, push_tabu};
use crate::solver::route_search::{Tour, Visit};
use crate::solver::{RouteSolver, RoutingProblem, SolvedRoutes};

/// Native routing solver: cheapest-path construction followed by a
/// tabu-guided swap search over the giant tour, with a seeded perturbation
/// kick on stagnation. Bounded by both a wall-clock budget and an iteration
/// cap; with the fixed seed, runs that never hit the clock are reproducible.
#[derive(Debug, Clone)]
pub struct LocalSearchSolver {
    pub seed: u64,
    pub max_iterations: usize,
    pub tabu_len: usize,
}

impl Default for LocalSearchSolver {
    fn default() -> Self {
        LocalSearchSolver {
            seed: SOLVER_SEED,
            max_iterations: SOLVER_MAX_ITERATIONS,
            tabu_len: SOLVER_TABU_LEN,
        }
    }
}

impl RouteSolver for LocalSearchSolver {
    fn solve(&self, problem: &RoutingProblem, budget: Duration) -> Option<SolvedRoutes> {
        if problem.customers() == 0 {
            return Some(SolvedRoutes {
                routes: vec![],
                travel_m: 0,
            });
        }

        let deadline = Instant::now() + budget;
        let visits = cheapest_extension_tour(problem);
        let mut current = Tour {
            fitness: tour_fitness(&visits, problem),
            visits,
        };
        let mut best = current.clone();

        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let mut tabu_list: VecDeque<(usize, usize)> = VecDeque::new();
        let mut stagnation = 0usize;
        let stagnation_limit = max(40, current.visits.len() * 4);

        for iteration in 1..=self.max_iterations {
            if Instant::now() >= deadline {
                debug!("routing budget exhausted at iteration {}", iteration);
                break;
            }

            let candidates = score_swaps(&current, problem);
            let Some((fitness, swap_move)) =
                choose_candidate(&candidates, &tabu_list, best.fitness)
            else {
                break;
            };

            current.visits.swap(swap_move.0, swap_move.1);
            current.fitness = fitness;
            push_tabu(&mut tabu_list, swap_move, self.tabu_len);

            if current.fitness < best.fitness {
                trace!(
                    "new best at iteration {}: fitness = {:.0}",
                    iteration,
                    current.fitness
                );
                best = current.clone();
                stagnation = 0;
            } else {
                stagnation += 1;
                if stagnation >= stagnation_limit {
                    perturb(&mut current.visits, &mut rng);
                    current.fitness = tour_fitness(&current.visits, problem);
                    stagnation = 0;
                }
            }
        }

        if !is_feasible(&best.visits, problem) {
            debug!("best tour is infeasible, handing over to fallback");
            return None;
        }

        Some(SolvedRoutes {
            travel_m: tour_travel_m(&best.visits, &problem.distance_m),
            routes: split_routes(&best.visits),
        })
    }
}

/// Reverse a random slice of the tour to escape a local optimum.
fn perturb(visits: &mut [Visit], rng: &mut ChaCha8Rng) {
    let n = visits.len();
    if n < 2 {
        return;
    }

    let mut pair: Vec<usize> = (0..n).choose_multiple(rng, 2);
    pair.sort_unstable();
    visits[pair[0]..=pair[1]].reverse();
}

fn split_routes(visits: &[Visit]) -> Vec<Vec<usize>> {
    let mut routes = vec![];
    let mut nodes = vec![];

    for visit in visits {
        if visit.is_separator {
            routes.push(std::mem::take(&mut nodes));
        } else {
            nodes.push(visit.node);
        }
    }
    routes.push(nodes);

    routes.retain(|route| !route.is_empty());
    routes
}
