use {
    num::Zero,
    std::{cmp::Ordering, collections::BinaryHeap, hash::Hash, ops::Add},
};

/// A neighboring vertex paired with the cost of the edge leading to it.
pub struct OpenSetElement<V, C>(pub V, pub C);

/// Deterministic rule applied between frontier entries with equal priority. The minimum cost
/// returned by a search cannot depend on which rule is active, only which of several optimal-cost
/// paths is found first can.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum TieBreak {
    /// Among equal priorities, the entry pushed earliest pops first.
    #[default]
    EarliestFirst,

    /// Among equal priorities, the entry pushed latest pops first.
    LatestFirst,
}

impl TieBreak {
    fn next_sequence(self, count: &mut u64) -> u64 {
        let sequence: u64 = match self {
            Self::EarliestFirst => *count,
            Self::LatestFirst => u64::MAX - *count,
        };

        *count += 1_u64;

        sequence
    }
}

struct FrontierElement<V, C> {
    vertex: V,
    cost_from_start: C,
    priority: C,
    sequence: u64,
}

impl<V, C: Ord> PartialEq for FrontierElement<V, C> {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority && self.sequence == other.sequence
    }
}

impl<V, C: Ord> Eq for FrontierElement<V, C> {}

impl<V, C: Ord> PartialOrd for FrontierElement<V, C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<V, C: Ord> Ord for FrontierElement<V, C> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse the order so that priority is minimized when popping from the heap
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

pub struct WeightedGraphSearchState<V, C> {
    frontier: BinaryHeap<FrontierElement<V, C>>,
    neighbors: Vec<OpenSetElement<V, C>>,
    sequence_count: u64,
}

impl<V, C> WeightedGraphSearchState<V, C> {
    fn clear(&mut self) {
        self.frontier.clear();
        self.neighbors.clear();
        self.sequence_count = 0_u64;
    }
}

impl<V, C: Ord> Default for WeightedGraphSearchState<V, C> {
    fn default() -> Self {
        Self {
            frontier: Default::default(),
            neighbors: Default::default(),
            sequence_count: 0_u64,
        }
    }
}

pub fn zero_heuristic<W: WeightedGraphSearch + ?Sized>(
    _search: &W,
    _vertex: &W::Vertex,
) -> W::Cost {
    W::Cost::zero()
}

/// An implementation of https://en.wikipedia.org/wiki/A*_search_algorithm and
/// https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm
///
/// The frontier carries no decrease-key operation: when a cheaper path to a vertex is found, a new
/// entry is pushed, and the superseded entry is discarded lazily when popped by comparing its
/// recorded cost against `cost_from_start`.
pub trait WeightedGraphSearch {
    type Vertex: Clone + Eq + Hash;
    type Cost: Add<Self::Cost, Output = Self::Cost> + Copy + Ord + Zero;

    fn start(&self) -> &Self::Vertex;
    fn is_end(&self, vertex: &Self::Vertex) -> bool;
    fn path_to(&self, vertex: &Self::Vertex) -> Vec<Self::Vertex>;

    /// The cheapest cost from the start to `vertex` found so far. Implementations return an
    /// unreachable upper bound for vertices with no best-cost entry yet.
    fn cost_from_start(&self, vertex: &Self::Vertex) -> Self::Cost;
    fn heuristic(&self, vertex: &Self::Vertex) -> Self::Cost;

    /// The cost is from `vertex` to the neighbor.
    fn neighbors(
        &self,
        vertex: &Self::Vertex,
        neighbors: &mut Vec<OpenSetElement<Self::Vertex, Self::Cost>>,
    );

    /// `heuristic` may be zero if this is called by Dijkstra.
    fn update_vertex(
        &mut self,
        from: &Self::Vertex,
        to: &Self::Vertex,
        cost: Self::Cost,
        heuristic: Self::Cost,
    );
    fn reset(&mut self);

    fn run_internal<F: Fn(&Self, &Self::Vertex) -> Self::Cost>(
        &mut self,
        state: &mut WeightedGraphSearchState<Self::Vertex, Self::Cost>,
        heuristic: F,
        tie_break: TieBreak,
    ) -> Option<Vec<Self::Vertex>> {
        self.reset();
        state.clear();

        let WeightedGraphSearchState {
            frontier,
            neighbors,
            sequence_count,
        } = state;
        let start: Self::Vertex = self.start().clone();
        let start_cost: Self::Cost = self.cost_from_start(&start);
        let start_priority: Self::Cost = start_cost + heuristic(self, &start);

        frontier.push(FrontierElement {
            vertex: start,
            cost_from_start: start_cost,
            priority: start_priority,
            sequence: tie_break.next_sequence(sequence_count),
        });

        while let Some(FrontierElement {
            vertex: current,
            cost_from_start: start_to_current,
            ..
        }) = frontier.pop()
        {
            // Stale entry: a cheaper path to this vertex was recorded after it was pushed.
            if start_to_current > self.cost_from_start(&current) {
                continue;
            }

            if self.is_end(&current) {
                return Some(self.path_to(&current));
            }

            self.neighbors(&current, neighbors);

            for OpenSetElement(neighbor, edge_cost) in neighbors.drain(..) {
                let start_to_neighbor: Self::Cost = start_to_current + edge_cost;

                if start_to_neighbor < self.cost_from_start(&neighbor) {
                    let neighbor_heuristic: Self::Cost = heuristic(self, &neighbor);

                    self.update_vertex(&current, &neighbor, start_to_neighbor, neighbor_heuristic);
                    frontier.push(FrontierElement {
                        priority: start_to_neighbor + neighbor_heuristic,
                        cost_from_start: start_to_neighbor,
                        sequence: tie_break.next_sequence(sequence_count),
                        vertex: neighbor,
                    });
                }
            }
        }

        None
    }

    fn run_a_star_internal(
        &mut self,
        state: &mut WeightedGraphSearchState<Self::Vertex, Self::Cost>,
        tie_break: TieBreak,
    ) -> Option<Vec<Self::Vertex>> {
        self.run_internal(state, Self::heuristic, tie_break)
    }

    fn run_a_star(&mut self) -> Option<Vec<Self::Vertex>> {
        self.run_a_star_internal(&mut WeightedGraphSearchState::default(), TieBreak::default())
    }

    fn run_a_star_with_tie_break(&mut self, tie_break: TieBreak) -> Option<Vec<Self::Vertex>> {
        self.run_a_star_internal(&mut WeightedGraphSearchState::default(), tie_break)
    }

    fn run_dijkstra_internal(
        &mut self,
        state: &mut WeightedGraphSearchState<Self::Vertex, Self::Cost>,
    ) -> Option<Vec<Self::Vertex>> {
        self.run_internal(state, zero_heuristic::<Self>, TieBreak::default())
    }

    fn run_dijkstra(&mut self) -> Option<Vec<Self::Vertex>> {
        self.run_dijkstra_internal(&mut WeightedGraphSearchState::default())
    }
}
