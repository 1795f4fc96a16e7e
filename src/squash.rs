//! Reduction of a maze to a weighted graph of junctions and dead ends.
//!
//! Nodes are the cells whose open-direction count is not 2, together with the start and goal
//! cells. Every maximal corridor of open-count-2 cells between two nodes becomes one edge whose
//! weight is the number of moves from one endpoint to the other. Self-loops and parallel edges
//! are kept.

use crate::maze::{Cell, Dimensions, Direction, Grid, Maze};

/// One corridor between two nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SquashedEdge {
    /// Indices of the two end nodes, in the order the corridor was walked.
    pub endpoints: (usize, usize),
    /// The direction the corridor leaves each end node by.
    pub exits: (Direction, Direction),
    pub weight: usize,
    /// The corridor cells strictly between the endpoints, in walking order.
    pub corridor: Vec<Cell>,
}

impl SquashedEdge {
    pub fn is_self_loop(&self) -> bool {
        self.endpoints.0 == self.endpoints.1
    }

    /// The node at the other end of this edge from `node`.
    pub fn other(&self, node: usize) -> usize {
        if self.endpoints.0 == node {
            self.endpoints.1
        } else {
            self.endpoints.0
        }
    }
}

#[derive(Debug, Clone)]
pub struct SquashedMaze {
    dims: Dimensions,
    nodes: Vec<Cell>,
    edges: Vec<SquashedEdge>,
    node_at: Grid<Option<usize>>,
    edge_at: Grid<Option<usize>>,
}

impl SquashedMaze {
    pub fn new(maze: &Maze) -> Self {
        let dims = maze.dimensions();
        let open = Grid::from_fn(dims, |c| maze.open_directions(c).count());

        let mut squashed = SquashedMaze {
            dims,
            nodes: Vec::new(),
            edges: Vec::new(),
            node_at: Grid::new(dims, None),
            edge_at: Grid::new(dims, None),
        };
        for cell in dims.cells() {
            if open[cell] != 2 || maze.is_special_cell(cell) {
                squashed.add_node(cell);
            }
        }

        let mut next = 0;
        let mut scan = dims.cells();
        loop {
            while next < squashed.nodes.len() {
                squashed.walk_corridors(maze, next);
                next += 1;
            }
            // Anything left over lies on a closed loop with no node on it.
            match scan.find(|&c| squashed.node_at[c].is_none() && squashed.edge_at[c].is_none()) {
                Some(cell) => {
                    tracing::trace!("[squash] anchoring node-less loop at {:?}", cell);
                    squashed.add_node(cell);
                }
                None => break,
            }
        }

        tracing::debug!(
            "[squash] {} maze reduced to {} nodes and {} edges",
            dims,
            squashed.nodes.len(),
            squashed.edges.len()
        );
        squashed
    }

    fn add_node(&mut self, cell: Cell) {
        self.node_at[cell] = Some(self.nodes.len());
        self.nodes.push(cell);
    }

    /// Walks every open direction leaving `node`, recording each corridor once.
    fn walk_corridors(&mut self, maze: &Maze, node: usize) {
        let start = self.nodes[node];
        for exit in maze.open_directions(start).collect::<Vec<_>>() {
            let mut cell = start;
            let mut dir = exit;
            let mut corridor = Vec::new();
            let other = loop {
                let Some(next) = dir.step(cell, self.dims) else {
                    unreachable!("open direction {} leads out of the maze from {:?}", dir, cell);
                };
                if let Some(other) = self.node_at[next] {
                    break other;
                }
                corridor.push(next);
                let back = dir.flip();
                dir = maze
                    .open_directions(next)
                    .find(|&d| d != back)
                    .unwrap_or_else(|| unreachable!("corridor cell {:?} has one exit", next));
                cell = next;
            };
            let arrival = dir.flip();

            // Each corridor is found from both ends; keep the walk from the smaller end.
            if (node, exit) > (other, arrival) {
                continue;
            }
            let id = self.edges.len();
            for &c in &corridor {
                self.edge_at[c] = Some(id);
            }
            self.edges.push(SquashedEdge {
                endpoints: (node, other),
                exits: (exit, arrival),
                weight: corridor.len() + 1,
                corridor,
            });
        }
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    pub fn nodes(&self) -> &[Cell] {
        &self.nodes
    }

    pub fn edges(&self) -> &[SquashedEdge] {
        &self.edges
    }

    pub fn node_index(&self, cell: Cell) -> Option<usize> {
        self.node_at.get(cell).copied().flatten()
    }

    /// The edge whose corridor passes through `cell`, if `cell` is not a node.
    pub fn edge_for_cell(&self, cell: Cell) -> Option<&SquashedEdge> {
        self.edge_at
            .get(cell)
            .copied()
            .flatten()
            .map(|id| &self.edges[id])
    }

    /// Number of edge ends at `node`. A self-loop counts twice.
    pub fn degree(&self, node: usize) -> usize {
        self.edges
            .iter()
            .map(|e| (e.endpoints.0 == node) as usize + (e.endpoints.1 == node) as usize)
            .sum()
    }

    /// Edges incident to `node`, each paired with the node at its other end.
    pub fn neighbours(&self, node: usize) -> impl Iterator<Item = (usize, &SquashedEdge)> + '_ {
        self.edges
            .iter()
            .filter(move |e| e.endpoints.0 == node || e.endpoints.1 == node)
            .map(move |e| (e.other(node), e))
    }

    pub fn total_weight(&self) -> usize {
        self.edges.iter().map(|e| e.weight).sum()
    }
}

impl From<&Maze> for SquashedMaze {
    fn from(maze: &Maze) -> Self {
        SquashedMaze::new(maze)
    }
}
