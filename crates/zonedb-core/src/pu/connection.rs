use serde::Serialize;

///
/// Neighbour
///

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Neighbour {
    pub index: usize,
    pub cost: f64,
}

///
/// Connection
///
/// Adjacency record for one planning unit. Every unit owns one, even
/// with no neighbours.
///

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Connection {
    neighbours: Vec<Neighbour>,
    fixed_cost: Option<f64>,
}

impl Connection {
    /// Count of distinct neighbouring units, self excluded.
    #[must_use]
    pub fn nbrno(&self) -> usize {
        self.neighbours.len()
    }

    #[must_use]
    pub fn neighbours(&self) -> &[Neighbour] {
        &self.neighbours
    }

    /// Self/boundary cost, present only if a self row was read.
    #[must_use]
    pub const fn fixed_cost(&self) -> Option<f64> {
        self.fixed_cost
    }

    fn has_neighbour(&self, index: usize) -> bool {
        self.neighbours.iter().any(|n| n.index == index)
    }
}

///
/// ConnectivityGraph
///
/// Symmetric adjacency lists keyed by internal index.
///

#[derive(Clone, Debug, Default)]
pub struct ConnectivityGraph {
    connections: Vec<Connection>,
    entered: bool,
}

impl ConnectivityGraph {
    #[must_use]
    pub fn new(puno: usize) -> Self {
        Self {
            connections: vec![Connection::default(); puno],
            entered: false,
        }
    }

    /// Add an undirected edge. Returns `false` and leaves the graph
    /// unchanged when the pair is already connected.
    pub(crate) fn add_edge(&mut self, a: usize, b: usize, cost: f64) -> bool {
        debug_assert_ne!(a, b, "self rows go through add_fixed_cost");
        if self.connections[a].has_neighbour(b) {
            return false;
        }

        self.connections[a].neighbours.push(Neighbour { index: b, cost });
        self.connections[b].neighbours.push(Neighbour { index: a, cost });
        self.entered = true;

        true
    }

    /// Accumulate a self/boundary cost onto one unit.
    pub(crate) fn add_fixed_cost(&mut self, index: usize, cost: f64) {
        let fixed = self.connections[index].fixed_cost.get_or_insert(0.0);
        *fixed += cost;
        self.entered = true;
    }

    /// True once any connectivity row has been accepted.
    #[must_use]
    pub const fn connections_entered(&self) -> bool {
        self.entered
    }

    #[must_use]
    pub fn connection(&self, index: usize) -> Option<&Connection> {
        self.connections.get(index)
    }

    #[must_use]
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// Number of connection records; equals `puno`.
    #[must_use]
    pub fn len(&self) -> usize {
        self.connections.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }

    /// Aggregated boundary cost of one unit.
    ///
    /// `sum(edge costs) + 2 * fixed cost`: a shared edge is charged once per
    /// side, an edge against nothing is charged to its owner on both sides.
    /// Always `0.0` when no connectivity data was entered.
    #[must_use]
    pub fn connection_cost1(&self, index: usize) -> f64 {
        if !self.entered {
            return 0.0;
        }
        let Some(connection) = self.connections.get(index) else {
            return 0.0;
        };

        let shared: f64 = connection.neighbours.iter().map(|n| n.cost).sum();

        shared + 2.0 * connection.fixed_cost.unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn empty_graph_costs_nothing() {
        let graph = ConnectivityGraph::new(3);

        assert!(!graph.connections_entered());
        assert_eq!(graph.len(), 3);
        assert_eq!(graph.connection_cost1(0), 0.0);
        assert_eq!(graph.connection(2).map(Connection::nbrno), Some(0));
    }

    #[test]
    fn edges_are_symmetric_and_deduplicated() {
        let mut graph = ConnectivityGraph::new(3);

        assert!(graph.add_edge(0, 1, 4.0));
        assert!(!graph.add_edge(1, 0, 9.0));

        assert_eq!(graph.connections()[0].neighbours(), [Neighbour { index: 1, cost: 4.0 }]);
        assert_eq!(graph.connections()[1].neighbours(), [Neighbour { index: 0, cost: 4.0 }]);
        assert_eq!(graph.connection_cost1(1), 4.0);
    }

    #[test]
    fn isolated_unit_pays_twice_its_boundary() {
        let mut graph = ConnectivityGraph::new(2);
        graph.add_fixed_cost(1, 1.0);

        assert_eq!(graph.connection(1).unwrap().nbrno(), 0);
        assert_eq!(graph.connection_cost1(1), 2.0);
        assert_eq!(graph.connection_cost1(0), 0.0);
    }

    #[test]
    fn self_rows_accumulate() {
        let mut graph = ConnectivityGraph::new(1);
        graph.add_fixed_cost(0, 1.5);
        graph.add_fixed_cost(0, 0.5);

        assert_eq!(graph.connection(0).unwrap().fixed_cost(), Some(2.0));
        assert_eq!(graph.connection_cost1(0), 4.0);
    }

    proptest! {
        #[test]
        fn connection_cost1_matches_closed_form(
            edges in prop::collection::vec((0usize..6, 0usize..6, 0.0f64..100.0), 0..20),
            fixed in prop::collection::vec((0usize..6, 0.0f64..10.0), 0..6),
        ) {
            let mut graph = ConnectivityGraph::new(6);
            for (a, b, cost) in edges {
                if a != b {
                    graph.add_edge(a, b, cost);
                }
            }
            for (index, cost) in fixed {
                graph.add_fixed_cost(index, cost);
            }

            for (index, connection) in graph.connections().iter().enumerate() {
                let expected = connection.neighbours().iter().map(|n| n.cost).sum::<f64>()
                    + 2.0 * connection.fixed_cost().unwrap_or(0.0);
                let actual = graph.connection_cost1(index);

                if graph.connections_entered() {
                    prop_assert!((actual - expected).abs() < 1e-9);
                } else {
                    prop_assert_eq!(actual, 0.0);
                }

                let mut seen: Vec<usize> = connection.neighbours().iter().map(|n| n.index).collect();
                seen.sort_unstable();
                seen.dedup();
                prop_assert_eq!(seen.len(), connection.nbrno());
                prop_assert!(!seen.contains(&index));
            }
        }
    }
}
