//! Selection operators.
//!
//! Both operators work on any population slice, given a fitness function
//! and an [`Objective`]. They return clones of the selected members and
//! never modify the input.
//!
//! # References
//!
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"

use super::types::Objective;
use rand::Rng;
use std::collections::HashSet;

/// Number of contenders drawn per tournament.
pub const TOURNAMENT_SIZE: usize = 3;

/// Selection strategy used by the runner to pick survivors.
///
/// # Examples
///
/// ```
/// use u_siting::ga::SelectionMethod;
///
/// let sel = SelectionMethod::Roulette { with_replacement: false };
/// assert_ne!(sel, SelectionMethod::default());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SelectionMethod {
    /// Fitness-proportionate sampling, see [`select_roulette`].
    Roulette {
        /// Whether one member may be drawn more than once.
        with_replacement: bool,
    },

    /// Best of three random draws, see [`select_tournament`].
    #[default]
    Tournament,
}

impl SelectionMethod {
    /// Selects from `population` with this strategy.
    pub fn select<C, F, R>(
        &self,
        population: &[C],
        fitness: F,
        count: usize,
        objective: Objective,
        rng: &mut R,
    ) -> Vec<C>
    where
        C: Clone,
        F: Fn(&C) -> f64,
        R: Rng,
    {
        match *self {
            SelectionMethod::Roulette { with_replacement } => {
                select_roulette(population, fitness, count, objective, with_replacement, rng)
            }
            SelectionMethod::Tournament => {
                select_tournament(population, fitness, count, objective, rng)
            }
        }
    }
}

/// Roulette-wheel selection.
///
/// Each member owns a band of the wheel as wide as its fitness; bands are
/// laid out cumulatively in population order and the last band is widened
/// by the last member's own fitness. A uniform sample in
/// `[0, total fitness)` picks the first member whose cumulative bound is at
/// least the sample.
///
/// - [`Objective::Maximize`]: `count` draws are made and the drawn members
///   are returned, in draw order.
/// - [`Objective::Minimize`]: the same weighted draw picks the members to
///   *remove* (`len - count` draws, so poor members dominate), and the
///   remaining members are returned in population order.
///
/// Without replacement, members already drawn are skipped during the band
/// scan. With replacement under `Minimize`, one member can be drawn for
/// removal several times, so **more than `count` members may survive**.
///
/// Fitness values are expected to be non-negative; negative or NaN values
/// get a zero-width band. When every remaining band has zero width the
/// draw falls back to a uniform pick.
///
/// # Complexity
/// O(n) per draw.
pub fn select_roulette<C, F, R>(
    population: &[C],
    fitness: F,
    count: usize,
    objective: Objective,
    with_replacement: bool,
    rng: &mut R,
) -> Vec<C>
where
    C: Clone,
    F: Fn(&C) -> f64,
    R: Rng,
{
    let n = population.len();
    if n == 0 {
        return Vec::new();
    }

    let (bands, total) = cumulative_bands(population.iter().map(|c| fitness(c).max(0.0)));

    match objective {
        Objective::Maximize => {
            let draws = if with_replacement { count } else { count.min(n) };
            draw_indices(&bands, total, draws, with_replacement, rng)
                .into_iter()
                .map(|i| population[i].clone())
                .collect()
        }
        Objective::Minimize => {
            let removals = n.saturating_sub(count);
            let removed: HashSet<usize> = draw_indices(&bands, total, removals, with_replacement, rng)
                .into_iter()
                .collect();
            population
                .iter()
                .enumerate()
                .filter(|(i, _)| !removed.contains(i))
                .map(|(_, c)| c.clone())
                .collect()
        }
    }
}

/// Tournament selection.
///
/// Repeats `count` times: draw [`TOURNAMENT_SIZE`] members uniformly with
/// replacement, keep the best under `objective`. The same member can win
/// several tournaments. Each member is evaluated at most once.
///
/// # Complexity
/// O(count) draws, O(n) evaluations at most.
pub fn select_tournament<C, F, R>(
    population: &[C],
    fitness: F,
    count: usize,
    objective: Objective,
    rng: &mut R,
) -> Vec<C>
where
    C: Clone,
    F: Fn(&C) -> f64,
    R: Rng,
{
    let n = population.len();
    if n == 0 {
        return Vec::new();
    }

    let mut cache: Vec<Option<f64>> = vec![None; n];
    let mut score = |i: usize| *cache[i].get_or_insert_with(|| fitness(&population[i]));

    let mut selected = Vec::with_capacity(count);
    for _ in 0..count {
        let mut contenders: Vec<(usize, f64)> = (0..TOURNAMENT_SIZE)
            .map(|_| {
                let idx = rng.random_range(0..n);
                (idx, score(idx))
            })
            .collect();
        contenders.sort_by(|a, b| objective.compare(a.1, b.1));
        selected.push(population[contenders[0].0].clone());
    }
    selected
}

/// Cumulative upper bounds (last band widened by its own width) and the
/// plain fitness total.
fn cumulative_bands<I: Iterator<Item = f64>>(scores: I) -> (Vec<f64>, f64) {
    let mut total = 0.0;
    let mut last = 0.0;
    let mut bands: Vec<f64> = scores
        .map(|s| {
            total += s;
            last = s;
            total
        })
        .collect();
    if let Some(end) = bands.last_mut() {
        *end += last;
    }
    (bands, total)
}

/// Spins the wheel `draws` times and returns the drawn indices.
fn draw_indices<R: Rng>(
    bands: &[f64],
    total: f64,
    draws: usize,
    with_replacement: bool,
    rng: &mut R,
) -> Vec<usize> {
    let mut taken = vec![false; bands.len()];
    let mut picked = Vec::with_capacity(draws);
    while picked.len() < draws {
        let idx = spin(bands, total, &taken, rng);
        if !with_replacement {
            taken[idx] = true;
        }
        picked.push(idx);
    }
    picked
}

/// One draw over the bands not yet taken.
///
/// Samples above the highest free band would only be redrawn, so the
/// sample range is capped there directly.
fn spin<R: Rng>(bands: &[f64], total: f64, taken: &[bool], rng: &mut R) -> usize {
    let free: Vec<usize> = (0..bands.len()).filter(|&i| !taken[i]).collect();
    let limit = free
        .last()
        .map(|&i| bands[i].min(total))
        .unwrap_or(0.0);

    if !(limit > 0.0) {
        return free[rng.random_range(0..free.len())];
    }

    let sample = rng.random_range(0.0..limit);
    free.iter()
        .copied()
        .find(|&i| bands[i] >= sample)
        .unwrap_or(free[free.len() - 1])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use proptest::prelude::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Ind {
        id: usize,
        fit: f64,
    }

    fn make_population(fitnesses: &[f64]) -> Vec<Ind> {
        fitnesses
            .iter()
            .enumerate()
            .map(|(id, &fit)| Ind { id, fit })
            .collect()
    }

    fn fit(i: &Ind) -> f64 {
        i.fit
    }

    // ---- bands ----

    #[test]
    fn test_cumulative_bands_widen_last() {
        let (bands, total) = cumulative_bands([1.0, 2.0, 3.0].into_iter());
        assert_eq!(bands, vec![1.0, 3.0, 9.0]);
        assert_eq!(total, 6.0);
    }

    // ---- roulette ----

    #[test]
    fn test_roulette_maximize_without_replacement_distinct() {
        let pop = make_population(&[4.0, 1.0, 7.0, 2.0, 9.0]);
        let mut rng = create_rng(42);
        for q in 0..=pop.len() {
            let sel = select_roulette(&pop, fit, q, Objective::Maximize, false, &mut rng);
            assert_eq!(sel.len(), q);
            let ids: HashSet<usize> = sel.iter().map(|i| i.id).collect();
            assert_eq!(ids.len(), q);
        }
    }

    #[test]
    fn test_roulette_count_above_population_clamped() {
        let pop = make_population(&[1.0, 2.0, 3.0]);
        let mut rng = create_rng(1);
        let sel = select_roulette(&pop, fit, 10, Objective::Maximize, false, &mut rng);
        assert_eq!(sel.len(), 3);
        let sel = select_roulette(&pop, fit, 10, Objective::Maximize, true, &mut rng);
        assert_eq!(sel.len(), 10);
    }

    #[test]
    fn test_roulette_maximize_favors_high_fitness() {
        let pop = make_population(&[1.0, 1.0, 50.0, 1.0]);
        let mut rng = create_rng(42);
        let mut counts = [0u32; 4];
        for _ in 0..5000 {
            let sel = select_roulette(&pop, fit, 1, Objective::Maximize, true, &mut rng);
            counts[sel[0].id] += 1;
        }
        assert!(
            counts[2] > counts[0] + counts[1] + counts[3],
            "high fitness should dominate: {counts:?}"
        );
    }

    #[test]
    fn test_roulette_minimize_without_replacement_exact_count() {
        let pop = make_population(&[4.0, 1.0, 7.0, 2.0, 9.0, 3.0]);
        let mut rng = create_rng(7);
        for q in 0..=pop.len() {
            let sel = select_roulette(&pop, fit, q, Objective::Minimize, false, &mut rng);
            assert_eq!(sel.len(), q);
        }
    }

    #[test]
    fn test_roulette_minimize_keeps_population_order() {
        let pop = make_population(&[4.0, 1.0, 7.0, 2.0, 9.0]);
        let mut rng = create_rng(11);
        let sel = select_roulette(&pop, fit, 3, Objective::Minimize, false, &mut rng);
        let ids: Vec<usize> = sel.iter().map(|i| i.id).collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        assert_eq!(ids, sorted);
    }

    #[test]
    fn test_roulette_minimize_favors_low_fitness() {
        // Skipped bands hand their width to the next free band, so the
        // cheap member goes first where no spill-over can reach it.
        let pop = make_population(&[1.0, 100.0, 100.0, 100.0]);
        let mut rng = create_rng(42);
        let mut survived = [0u32; 4];
        for _ in 0..2000 {
            for ind in select_roulette(&pop, fit, 1, Objective::Minimize, false, &mut rng) {
                survived[ind.id] += 1;
            }
        }
        assert!(
            survived[0] > 1800,
            "low fitness should usually survive: {survived:?}"
        );
    }

    #[test]
    fn test_roulette_without_replacement_spills_to_next_free_band() {
        // Once member 2 is drawn, its band falls through to member 3.
        let pop = make_population(&[100.0, 100.0, 100.0, 1.0]);
        let mut rng = create_rng(42);
        let mut removed_last = 0u32;
        for _ in 0..2000 {
            let survivors = select_roulette(&pop, fit, 1, Objective::Minimize, false, &mut rng);
            assert_eq!(survivors.len(), 1);
            if survivors[0].id != 3 {
                removed_last += 1;
            }
        }
        // a plain proportional wheel would remove it about 1% of the time
        assert!(
            removed_last > 200,
            "expected spill-over onto the last member, removed {removed_last} times"
        );
    }

    #[test]
    fn test_roulette_minimize_with_replacement_can_overshoot() {
        // Removal draws may repeat, so fewer members are removed than
        // requested and more than `count` survive.
        let pop = make_population(&[1.0, 1.0, 1000.0, 1.0, 1.0, 1.0]);
        let mut rng = create_rng(5);
        let mut overshoot = false;
        for _ in 0..200 {
            let sel = select_roulette(&pop, fit, 2, Objective::Minimize, true, &mut rng);
            assert!(sel.len() >= 2);
            assert!(sel.len() <= pop.len());
            if sel.len() > 2 {
                overshoot = true;
            }
        }
        assert!(overshoot, "expected at least one run with more than 2 survivors");
    }

    #[test]
    fn test_roulette_zero_fitness_uniform() {
        let pop = make_population(&[0.0, 0.0, 0.0]);
        let mut rng = create_rng(2);
        let sel = select_roulette(&pop, fit, 3, Objective::Maximize, false, &mut rng);
        let ids: HashSet<usize> = sel.iter().map(|i| i.id).collect();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn test_roulette_zero_tail_without_replacement_terminates() {
        let pop = make_population(&[0.0, 0.0, 5.0]);
        let mut rng = create_rng(8);
        let sel = select_roulette(&pop, fit, 3, Objective::Maximize, false, &mut rng);
        assert_eq!(sel.len(), 3);
    }

    #[test]
    fn test_roulette_empty_population() {
        let pop: Vec<Ind> = vec![];
        let mut rng = create_rng(0);
        assert!(select_roulette(&pop, fit, 3, Objective::Maximize, true, &mut rng).is_empty());
        assert!(select_roulette(&pop, fit, 3, Objective::Minimize, false, &mut rng).is_empty());
    }

    // ---- tournament ----

    #[test]
    fn test_tournament_count_and_membership() {
        let pop = make_population(&[5.0, 3.0, 8.0, 1.0]);
        let mut rng = create_rng(42);
        let sel = select_tournament(&pop, fit, 10, Objective::Minimize, &mut rng);
        assert_eq!(sel.len(), 10);
        assert!(sel.iter().all(|s| pop.contains(s)));
    }

    #[test]
    fn test_tournament_minimize_favors_best() {
        let pop = make_population(&[10.0, 5.0, 1.0, 8.0]);
        let mut rng = create_rng(42);
        let sel = select_tournament(&pop, fit, 10_000, Objective::Minimize, &mut rng);
        let best = sel.iter().filter(|s| s.id == 2).count();
        // P(index 2 among 3 draws) = 1 - (3/4)^3 ~ 0.58
        assert!(best > 5000, "expected best to win often, got {best}");
    }

    #[test]
    fn test_tournament_maximize_favors_highest() {
        let pop = make_population(&[10.0, 5.0, 1.0, 8.0]);
        let mut rng = create_rng(42);
        let sel = select_tournament(&pop, fit, 10_000, Objective::Maximize, &mut rng);
        let top = sel.iter().filter(|s| s.id == 0).count();
        assert!(top > 5000, "expected highest to win often, got {top}");
    }

    #[test]
    fn test_tournament_evaluates_each_member_once() {
        use std::cell::Cell;
        let pop = make_population(&[1.0, 2.0, 3.0]);
        let calls = Cell::new(0);
        let mut rng = create_rng(3);
        select_tournament(
            &pop,
            |i: &Ind| {
                calls.set(calls.get() + 1);
                i.fit
            },
            100,
            Objective::Minimize,
            &mut rng,
        );
        assert!(calls.get() <= 3);
    }

    #[test]
    fn test_selection_method_dispatch() {
        let pop = make_population(&[1.0, 2.0, 3.0, 4.0]);
        let mut rng = create_rng(4);
        let sel = SelectionMethod::Roulette {
            with_replacement: false,
        }
        .select(&pop, fit, 2, Objective::Maximize, &mut rng);
        assert_eq!(sel.len(), 2);
        let sel = SelectionMethod::Tournament.select(&pop, fit, 5, Objective::Minimize, &mut rng);
        assert_eq!(sel.len(), 5);
    }

    proptest! {
        #[test]
        fn prop_roulette_maximize_distinct(
            fits in prop::collection::vec(0.0f64..100.0, 1..20),
            seed in any::<u64>(),
            frac in 0.0f64..=1.0,
        ) {
            let pop = make_population(&fits);
            let q = (frac * pop.len() as f64).floor() as usize;
            let mut rng = create_rng(seed);
            let sel = select_roulette(&pop, fit, q, Objective::Maximize, false, &mut rng);
            prop_assert_eq!(sel.len(), q);
            let ids: HashSet<usize> = sel.iter().map(|i| i.id).collect();
            prop_assert_eq!(ids.len(), q);
        }

        #[test]
        fn prop_tournament_members_come_from_pool(
            fits in prop::collection::vec(-50.0f64..50.0, 3..20),
            seed in any::<u64>(),
            count in 0usize..30,
        ) {
            let pop = make_population(&fits);
            let mut rng = create_rng(seed);
            let sel = select_tournament(&pop, fit, count, Objective::Minimize, &mut rng);
            prop_assert_eq!(sel.len(), count);
            for s in &sel {
                prop_assert!(pop.contains(s));
            }
        }
    }
}
