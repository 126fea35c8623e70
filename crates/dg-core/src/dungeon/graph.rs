//! Adjacency-list graph used for room connectivity
//!
//! Storage is directed: `add_edge(a, b)` only records `b` in `a`'s list.
//! Reachability (`dfs`) ignores direction, see [`Graph::dfs`].

use core::fmt::Debug;
use core::hash::Hash;

use hashbrown::{HashMap, HashSet};

/// Directed adjacency list with insertion-ordered keys
#[derive(Debug, Clone)]
pub struct Graph<N> {
    /// Nodes in insertion order
    keys: Vec<N>,
    /// Outgoing neighbour lists, duplicates allowed
    adjacency: HashMap<N, Vec<N>>,
}

impl<N> Default for Graph<N> {
    fn default() -> Self {
        Self {
            keys: Vec::new(),
            adjacency: HashMap::new(),
        }
    }
}

impl<N: Copy + Eq + Hash + Debug> Graph<N> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node. No-op if it is already present.
    pub fn add_node(&mut self, node: N) {
        if !self.adjacency.contains_key(&node) {
            self.adjacency.insert(node, Vec::new());
            self.keys.push(node);
        }
    }

    /// Append `to` to the neighbour list of `from`.
    ///
    /// Both nodes must already exist. A missing endpoint is logged and the
    /// graph is left untouched; the return value tells whether the edge was
    /// recorded.
    pub fn add_edge(&mut self, from: N, to: N) -> bool {
        if !self.adjacency.contains_key(&to) {
            log::warn!("add_edge: node {:?} does not exist in the graph", to);
            return false;
        }
        match self.adjacency.get_mut(&from) {
            Some(list) => {
                list.push(to);
                true
            }
            None => {
                log::warn!("add_edge: node {:?} does not exist in the graph", from);
                false
            }
        }
    }

    /// Outgoing neighbours of `node`, empty if the node is absent
    pub fn neighbors(&self, node: N) -> &[N] {
        self.adjacency.get(&node).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains_node(&self, node: N) -> bool {
        self.adjacency.contains_key(&node)
    }

    /// Check for a directed edge `from -> to`
    pub fn has_edge(&self, from: N, to: N) -> bool {
        self.neighbors(from).contains(&to)
    }

    /// All nodes, insertion order
    pub fn keys(&self) -> &[N] {
        &self.keys
    }

    pub fn node_count(&self) -> usize {
        self.keys.len()
    }

    /// Number of directed edges, duplicates included
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }

    /// Directed edges in key order
    pub fn edges(&self) -> impl Iterator<Item = (N, N)> + '_ {
        self.keys
            .iter()
            .flat_map(move |&from| self.neighbors(from).iter().map(move |&to| (from, to)))
    }

    pub fn clear(&mut self) {
        self.keys.clear();
        self.adjacency.clear();
    }

    /// Log the neighbours of a node at debug level
    pub fn log_neighbors(&self, node: N) {
        if !self.contains_node(node) {
            log::debug!("node {:?} does not exist in the graph", node);
            return;
        }
        for neighbor in self.neighbors(node) {
            log::debug!("{:?} -> {:?}", node, neighbor);
        }
    }

    /// Depth-first reachability from `start`, using an explicit stack.
    ///
    /// Edges are walked in both directions: from a node the traversal follows
    /// its own neighbour list and every edge that points at it. Storage may be
    /// directed, connectivity is always judged undirected.
    ///
    /// Returns true iff every node of the graph was visited. An absent
    /// `start` returns false.
    ///
    /// With `copy_in_place` the graph is replaced by the walk itself: nodes in
    /// visit order, and each edge that discovered a node stored in both
    /// directions. Nodes the walk never reached are dropped. Without it the
    /// graph is not modified.
    pub fn dfs(&mut self, start: N, copy_in_place: bool) -> bool {
        if !self.contains_node(start) {
            log::warn!("dfs: start node {:?} does not exist in the graph", start);
            return false;
        }

        let mut incoming: HashMap<N, Vec<N>> = HashMap::with_capacity(self.keys.len());
        for (from, to) in self.edges() {
            incoming.entry(to).or_default().push(from);
        }

        let mut visited: HashSet<N> = HashSet::with_capacity(self.keys.len());
        let mut order = Vec::with_capacity(self.keys.len());
        let mut discovered = Vec::new();
        let mut stack: Vec<(N, Option<N>)> = vec![(start, None)];

        while let Some((node, parent)) = stack.pop() {
            if !visited.insert(node) {
                continue;
            }
            order.push(node);
            if let Some(parent) = parent {
                discovered.push((parent, node));
            }

            let reverse = incoming.get(&node).map(Vec::as_slice).unwrap_or(&[]);
            // Reversed so the first listed neighbour is popped first
            for &next in self.neighbors(node).iter().chain(reverse).rev() {
                if !visited.contains(&next) {
                    stack.push((next, Some(node)));
                }
            }
        }

        let reachable = visited.len() == self.keys.len();

        if copy_in_place {
            let mut rebuilt = Graph::new();
            for &node in &order {
                rebuilt.add_node(node);
            }
            for &(a, b) in &discovered {
                rebuilt.add_edge(a, b);
                rebuilt.add_edge(b, a);
            }
            *self = rebuilt;
        }

        reachable
    }
}
