//! Louvain community detection
//!
//! Greedy multilevel modularity maximization: repeated local node moves
//! followed by community contraction, until a full level no longer improves
//! modularity by more than `min_gain`.

use super::common::GraphView;
use std::collections::BTreeMap;

/// Comparison slack for modularity-gain floating point arithmetic
const GAIN_EPSILON: f64 = 1e-12;

/// Louvain configuration
#[derive(Debug, Clone)]
pub struct LouvainConfig {
    /// Minimum modularity improvement required to start another level
    pub min_gain: f64,
    /// Safety bound on contraction depth
    pub max_levels: usize,
}

impl Default for LouvainConfig {
    fn default() -> Self {
        Self {
            min_gain: 1e-7,
            max_levels: 32,
        }
    }
}

/// Result of the Louvain algorithm
#[derive(Debug, Clone)]
pub struct LouvainResult {
    /// Map of dense node index -> community id (dense, `0..community_count`)
    pub communities: Vec<usize>,
    /// Number of communities in the final partition
    pub community_count: usize,
    /// Modularity of the final partition on the input graph
    pub modularity: f64,
    /// Number of contraction levels performed
    pub levels: usize,
}

/// Working graph for one contraction level.
///
/// `adj` holds inter-node edges in both orientations and never self-entries;
/// `self_loops` holds intra-node weight, which contributes twice to degree.
struct LevelGraph {
    adj: Vec<Vec<(usize, f64)>>,
    self_loops: Vec<f64>,
    /// Total edge weight m (inter-node edges once, self-loops once)
    total_weight: f64,
}

impl LevelGraph {
    fn from_view(view: &GraphView) -> Self {
        let n = view.node_count;
        let mut adj = vec![Vec::new(); n];
        for u in 0..n {
            let weights = view.neighbor_weights(u);
            for (pos, &v) in view.neighbors(u).iter().enumerate() {
                if v != u {
                    let w = weights.map(|ws| ws[pos]).unwrap_or(1.0);
                    adj[u].push((v, w));
                }
            }
        }
        LevelGraph {
            adj,
            self_loops: vec![0.0; n],
            total_weight: view.total_weight(),
        }
    }

    fn node_count(&self) -> usize {
        self.adj.len()
    }

    /// Weighted degree; self-loops count twice
    fn degree(&self, u: usize) -> f64 {
        self.adj[u].iter().map(|&(_, w)| w).sum::<f64>() + 2.0 * self.self_loops[u]
    }
}

/// Run Louvain community detection over the view.
///
/// Every node receives exactly one community id. A graph with no edges
/// yields the all-singleton partition. Ties in modularity gain are broken
/// toward the lowest community id, which at the first level is the lowest
/// dense node index.
pub fn louvain(view: &GraphView, config: &LouvainConfig) -> LouvainResult {
    let n = view.node_count;
    if n == 0 {
        return LouvainResult {
            communities: Vec::new(),
            community_count: 0,
            modularity: 0.0,
            levels: 0,
        };
    }

    let mut level_graph = LevelGraph::from_view(view);
    if level_graph.total_weight <= 0.0 {
        return LouvainResult {
            communities: (0..n).collect(),
            community_count: n,
            modularity: 0.0,
            levels: 0,
        };
    }

    let mut assignment: Vec<usize> = (0..n).collect();
    let singleton: Vec<usize> = (0..level_graph.node_count()).collect();
    let mut current_q = level_modularity(&level_graph, &singleton);
    let mut levels = 0;

    loop {
        let (community, community_count, moved) = one_level(&level_graph);
        if !moved {
            break;
        }

        let new_q = level_modularity(&level_graph, &community);
        for slot in assignment.iter_mut() {
            *slot = community[*slot];
        }
        levels += 1;

        if new_q - current_q <= config.min_gain || levels >= config.max_levels {
            break;
        }
        current_q = new_q;
        level_graph = aggregate(&level_graph, &community, community_count);
    }

    let community_count = renumber(&mut assignment);
    let modularity = modularity(view, &assignment);

    LouvainResult {
        communities: assignment,
        community_count,
        modularity,
        levels,
    }
}

/// Local move phase: sweep nodes in index order, moving each to the
/// neighboring community with the largest positive modularity gain, until a
/// full sweep makes no move. Returns the densely renumbered assignment.
fn one_level(graph: &LevelGraph) -> (Vec<usize>, usize, bool) {
    let n = graph.node_count();
    let two_m = 2.0 * graph.total_weight;
    let degrees: Vec<f64> = (0..n).map(|u| graph.degree(u)).collect();

    let mut community: Vec<usize> = (0..n).collect();
    let mut sum_tot: Vec<f64> = degrees.clone();

    let mut moved_any = false;
    let mut sweep_moved = true;
    while sweep_moved {
        sweep_moved = false;
        for node in 0..n {
            let node_comm = community[node];
            let k_i = degrees[node];

            // Weight from this node to each adjacent community. BTreeMap
            // iteration is ascending, so exact ties resolve to the lowest
            // community id.
            let mut neighbor_weights: BTreeMap<usize, f64> = BTreeMap::new();
            neighbor_weights.insert(node_comm, 0.0);
            for &(neighbor, weight) in &graph.adj[node] {
                *neighbor_weights.entry(community[neighbor]).or_insert(0.0) += weight;
            }

            sum_tot[node_comm] -= k_i;
            let stay_gain =
                neighbor_weights[&node_comm] - sum_tot[node_comm] * k_i / two_m;

            let mut best_comm = node_comm;
            let mut best_gain = 0.0;
            for (&candidate, &weight_to) in &neighbor_weights {
                if candidate == node_comm {
                    continue;
                }
                let gain = (weight_to - sum_tot[candidate] * k_i / two_m) - stay_gain;
                if gain > best_gain + GAIN_EPSILON {
                    best_comm = candidate;
                    best_gain = gain;
                }
            }

            sum_tot[best_comm] += k_i;
            if best_comm != node_comm {
                community[node] = best_comm;
                sweep_moved = true;
                moved_any = true;
            }
        }
    }

    let count = renumber(&mut community);
    (community, count, moved_any)
}

/// Contract each community into a super-node, summing inter-community edge
/// weights and folding intra-community weight into self-loops.
fn aggregate(graph: &LevelGraph, community: &[usize], community_count: usize) -> LevelGraph {
    let mut self_loops = vec![0.0; community_count];
    let mut rows: Vec<BTreeMap<usize, f64>> = vec![BTreeMap::new(); community_count];

    for u in 0..graph.node_count() {
        let cu = community[u];
        self_loops[cu] += graph.self_loops[u];
        for &(v, w) in &graph.adj[u] {
            let cv = community[v];
            if cu == cv {
                // Both orientations are visited; count the edge once
                if u < v {
                    self_loops[cu] += w;
                }
            } else {
                *rows[cu].entry(cv).or_insert(0.0) += w;
            }
        }
    }

    let inter_twice: f64 = rows
        .iter()
        .map(|row| row.values().sum::<f64>())
        .sum();
    let total_weight = self_loops.iter().sum::<f64>() + inter_twice / 2.0;

    LevelGraph {
        adj: rows
            .into_iter()
            .map(|row| row.into_iter().collect())
            .collect(),
        self_loops,
        total_weight,
    }
}

/// Renumber community ids densely by first appearance in node index order
fn renumber(community: &mut [usize]) -> usize {
    let mut remap: BTreeMap<usize, usize> = BTreeMap::new();
    for slot in community.iter_mut() {
        let next = remap.len();
        let id = *remap.entry(*slot).or_insert(next);
        *slot = id;
    }
    remap.len()
}

/// Modularity of a partition on a level graph
fn level_modularity(graph: &LevelGraph, community: &[usize]) -> f64 {
    let two_m: f64 = (0..graph.node_count()).map(|u| graph.degree(u)).sum();
    if two_m <= 0.0 {
        return 0.0;
    }
    let count = community.iter().copied().max().map_or(0, |c| c + 1);
    let mut sum_in = vec![0.0; count];
    let mut sum_tot = vec![0.0; count];

    for u in 0..graph.node_count() {
        let c = community[u];
        sum_tot[c] += graph.degree(u);
        sum_in[c] += 2.0 * graph.self_loops[u];
        for &(v, w) in &graph.adj[u] {
            if community[v] == c {
                sum_in[c] += w;
            }
        }
    }

    (0..count)
        .map(|c| sum_in[c] / two_m - (sum_tot[c] / two_m).powi(2))
        .sum()
}

/// Modularity of a partition on the input view.
///
/// `Q = Σ_c [ Σ_in(c) / 2m − (Σ_tot(c) / 2m)² ]` with unit weights when the
/// view is unweighted. Returns 0.0 for an edgeless graph.
pub fn modularity(view: &GraphView, communities: &[usize]) -> f64 {
    let m = view.total_weight();
    if m <= 0.0 {
        return 0.0;
    }
    let count = communities.iter().copied().max().map_or(0, |c| c + 1);
    let mut sum_in = vec![0.0; count];
    let mut sum_tot = vec![0.0; count];

    for u in 0..view.node_count {
        let c = communities[u];
        sum_tot[c] += view.weighted_degree(u);
        let weights = view.neighbor_weights(u);
        for (pos, &v) in view.neighbors(u).iter().enumerate() {
            if communities[v] == c {
                sum_in[c] += weights.map(|ws| ws[pos]).unwrap_or(1.0);
            }
        }
    }

    let two_m = 2.0 * m;
    (0..count)
        .map(|c| sum_in[c] / two_m - (sum_tot[c] / two_m).powi(2))
        .sum()
}
