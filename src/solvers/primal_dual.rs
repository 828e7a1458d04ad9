//! Primal-dual knapsack search.
//!
//! The greedy solution gives the primal (lower) bound and the better of the
//! Dantzig and surrogate relaxations the dual (upper) bound. If they already
//! meet, the greedy solution is optimal. Otherwise items are added in efficiency order to a
//! list of Pareto-optimal `(weight, profit)` states, sorted by weight with
//! strictly increasing profit. A state survives a round only if its profit
//! plus the relaxation bound of the remaining items beats the incumbent.
//! After each round the upper bound drops to the best surviving completion
//! bound, and the search stops once the gap is closed or no state survives.


use crate::bound::{clamp_bound, Bound, BoundEngine};
use crate::error::SolveError;
use crate::instance::{Instance, ItemId, Profit, Weight};
use crate::options::SolveOptions;
use crate::solution::{Solution, SolveStatus};
use crate::solvers::all_fit_solution;
use crate::traits::Solver;
use crate::utils::add_profit;

const NAME: &str = "primal-dual";

#[derive(Debug, Clone, Copy, Default)]
pub struct PrimalDualSolver;

impl Solver for PrimalDualSolver {
    fn name(&self) -> &'static str {
        NAME
    }

    fn solve(&self, instance: &Instance, options: &SolveOptions) -> Result<Solution, SolveError> {
        if instance.all_items_fit() {
            return all_fit_solution(instance, NAME);
        }
        Search::new(instance, options).run()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Initialized,
    Bounding,
    Exploring,
    Solved,
}

#[cfg(feature = "tracing")]
impl Phase {
    fn as_str(self) -> &'static str {
        match self {
            Phase::Initialized => "initialized",
            Phase::Bounding => "bounding",
            Phase::Exploring => "exploring",
            Phase::Solved => "solved",
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct State {
    weight: Weight,
    profit: Profit,
    /// Last taken item, as an index into the trace arena.
    trace: Option<usize>,
}

/// Append-only record of take decisions; states share prefixes.
#[derive(Debug, Clone, Copy)]
struct TraceNode {
    item: ItemId,
    parent: Option<usize>,
}

/// A merge candidate before it is admitted to the next state list.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    weight: Weight,
    profit: Profit,
    parent: Option<usize>,
    /// `Some(id)` if the candidate takes item `id` on top of `parent`.
    taken: Option<ItemId>,
}

enum Incumbent {
    Greedy(Vec<ItemId>),
    Trace(Option<usize>),
}

struct Search<'a> {
    instance: &'a Instance,
    options: &'a SolveOptions,
    bounds: BoundEngine<'a>,
    lower: Bound,
    upper: Bound,
    incumbent: Incumbent,
    arena: Vec<TraceNode>,
    nodes: u64,
}

impl<'a> Search<'a> {
    fn new(instance: &'a Instance, options: &'a SolveOptions) -> Self {
        Self {
            instance,
            options,
            bounds: BoundEngine::new(instance),
            lower: 0,
            upper: 0,
            incumbent: Incumbent::Greedy(Vec::new()),
            arena: Vec::new(),
            nodes: 0,
        }
    }

    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    fn enter(&self, phase: Phase) {
        #[cfg(feature = "tracing")]
        if self.options.logs_summary() {
            tracing::debug!(
                algorithm = NAME,
                phase = phase.as_str(),
                lower = clamp_bound(self.lower),
                upper = clamp_bound(self.upper),
                "phase"
            );
        }
    }

    fn run(mut self) -> Result<Solution, SolveError> {
        self.enter(Phase::Initialized);
        let greedy = self.bounds.greedy();
        self.lower = greedy.profit;
        self.upper = self.bounds.dantzig_upper_bound();
        self.incumbent = Incumbent::Greedy(greedy.items);
        if self.lower < self.upper {
            let surrogate = self.bounds.surrogate_upper_bound(self.lower);
            if surrogate < self.upper {
                #[cfg(feature = "tracing")]
                if self.options.logs_progress() {
                    tracing::debug!(
                        algorithm = NAME,
                        dantzig = clamp_bound(self.upper),
                        surrogate = clamp_bound(surrogate),
                        "surrogate bound"
                    );
                }
                self.upper = surrogate;
            }
        }
        self.enter(Phase::Bounding);
        if self.lower >= self.upper {
            return self.finish(SolveStatus::Optimal);
        }

        self.enter(Phase::Exploring);
        let mut budget = self.options.budget();
        let capacity = self.instance.capacity();
        let mut states = vec![State {
            weight: 0,
            profit: 0,
            trace: None,
        }];

        for pos in 0..self.bounds.order().len() {
            if budget.exhausted() {
                return self.finish(SolveStatus::Timeout);
            }
            let id = self.bounds.order()[pos];
            let item = *self.instance.item(id);

            let mut takes = Vec::new();
            for s in &states {
                if item.weight > capacity - s.weight {
                    break;
                }
                takes.push(Candidate {
                    weight: s.weight + item.weight,
                    profit: add_profit(s.profit, item.profit, NAME)?,
                    parent: s.trace,
                    taken: Some(id),
                });
            }
            let skips = states.iter().map(|s| Candidate {
                weight: s.weight,
                profit: s.profit,
                parent: s.trace,
                taken: None,
            });

            let mut next = Vec::with_capacity(states.len() + takes.len());
            let mut round_upper = self.lower;
            let mut best_seen: Option<Profit> = None;
            for cand in merge_by_weight(skips, takes.into_iter()) {
                if best_seen.map_or(false, |best| cand.profit <= best) {
                    continue;
                }
                best_seen = Some(cand.profit);
                self.nodes += 1;

                let improves = cand.profit as Bound > self.lower;
                let lower = if improves { cand.profit as Bound } else { self.lower };
                let completion =
                    cand.profit as Bound + self.bounds.upper_bound(pos + 1, capacity - cand.weight);
                let survives = completion > lower;
                if !improves && !survives {
                    continue;
                }

                let trace = match cand.taken {
                    Some(item) => {
                        self.arena.push(TraceNode {
                            item,
                            parent: cand.parent,
                        });
                        Some(self.arena.len() - 1)
                    }
                    None => cand.parent,
                };
                if improves {
                    self.lower = lower;
                    self.incumbent = Incumbent::Trace(trace);
                }
                if survives {
                    round_upper = round_upper.max(completion);
                    next.push(State {
                        weight: cand.weight,
                        profit: cand.profit,
                        trace,
                    });
                }
            }

            states = next;
            self.upper = self.upper.min(round_upper.max(self.lower));
            #[cfg(feature = "tracing")]
            if self.options.logs_progress() {
                tracing::debug!(
                    algorithm = NAME,
                    item = id,
                    states = states.len(),
                    lower = clamp_bound(self.lower),
                    upper = clamp_bound(self.upper),
                    "it"
                );
            }
            if self.lower >= self.upper || states.is_empty() {
                break;
            }
        }

        self.finish(SolveStatus::Optimal)
    }

    fn finish(mut self, status: SolveStatus) -> Result<Solution, SolveError> {
        if status.is_optimal() {
            self.upper = self.lower;
            self.enter(Phase::Solved);
        }
        let selected = match std::mem::replace(&mut self.incumbent, Incumbent::Trace(None)) {
            Incumbent::Greedy(items) => items,
            Incumbent::Trace(mut cursor) => {
                let mut items = Vec::new();
                while let Some(idx) = cursor {
                    let node = self.arena[idx];
                    items.push(node.item);
                    cursor = node.parent;
                }
                items
            }
        };
        Solution::from_items(
            self.instance,
            status,
            selected,
            Some(clamp_bound(self.upper)),
            self.nodes,
            NAME,
        )
    }
}

/// Merge two weight-sorted candidate streams; on equal weight the higher
/// profit comes first, and the skip stream wins full ties.
fn merge_by_weight<A, B>(skips: A, takes: B) -> impl Iterator<Item = Candidate>
where
    A: Iterator<Item = Candidate>,
    B: Iterator<Item = Candidate>,
{
    let mut skips = skips.peekable();
    let mut takes = takes.peekable();
    std::iter::from_fn(move || match (skips.peek().copied(), takes.peek().copied()) {
        (Some(s), Some(t)) => {
            if (t.weight, std::cmp::Reverse(t.profit)) < (s.weight, std::cmp::Reverse(s.profit)) {
                takes.next()
            } else {
                skips.next()
            }
        }
        (Some(_), None) => skips.next(),
        (None, _) => takes.next(),
    })
}
