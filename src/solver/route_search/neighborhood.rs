use rayon::prelude::*;

use crate::solver::route_search::fitness::tour_fitness;
use crate::solver::route_search::Tour;
use crate::solver::RoutingProblem;

/// Generate and score neighbour tours by swapping two positions, best first.
pub(crate) fn score_swaps(current: &Tour, problem: &RoutingProblem) -> Vec<(f64, (usize, usize))> {
    let n = current.visits.len();

    let pairs: Vec<(usize, usize)> = (0..n)
        .flat_map(|i| ((i + 1)..n).map(move |j| (i, j)))
        .collect();

    let mut candidates: Vec<(f64, (usize, usize))> = pairs
        .par_iter()
        .map(|&(i, j)| {
            let mut visits = current.visits.clone();
            visits.swap(i, j);
            (tour_fitness(&visits, problem), (i, j))
        })
        .collect();

    candidates.par_sort_by(|a, b| a.0.total_cmp(&b.0));
    candidates
}
