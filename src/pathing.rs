//! Distances and routes over the passages of a maze, plus the checks that make a maze perfect.

use bit_set::BitSet;
use fnv::FnvHashMap;
use itertools::Itertools;
use petgraph::algo::{connected_components, dijkstra};
use petgraph::graph::NodeIndex;

use crate::cells::Cartesian2DCoordinate;
use crate::grid::Grid;


/// Number of steps from a start cell to every cell reachable from it.
#[derive(Debug, Clone)]
pub struct Distances {
    start_coordinate: Cartesian2DCoordinate,
    distances: FnvHashMap<Cartesian2DCoordinate, u32>,
    max_distance: u32,
}

impl Distances {
    /// Returns None if the start coordinate is not on the grid.
    pub fn new(grid: &Grid, start_coordinate: Cartesian2DCoordinate) -> Option<Distances> {

        let start_index = grid.grid_coordinate_to_index(start_coordinate)?;
        let graph = grid.to_graph();

        // Every passage is one step long.
        let steps = dijkstra(&graph, NodeIndex::new(start_index), None, |_| 1u32);

        let mut distances = FnvHashMap::with_capacity_and_hasher(steps.len(), Default::default());
        let mut max_distance = 0;
        for (node, distance) in steps {
            distances.insert(graph[node], distance);
            max_distance = max_distance.max(distance);
        }

        Some(Distances {
            start_coordinate,
            distances,
            max_distance,
        })
    }

    #[inline(always)]
    pub fn start(&self) -> Cartesian2DCoordinate {
        self.start_coordinate
    }

    #[inline(always)]
    pub fn max(&self) -> u32 {
        self.max_distance
    }

    #[inline(always)]
    pub fn distance_from_start_to(&self, coord: Cartesian2DCoordinate) -> Option<u32> {
        self.distances.get(&coord).cloned()
    }

    /// The cells furthest from the start, in row-major order.
    pub fn furthest_points_on_grid(&self) -> Vec<Cartesian2DCoordinate> {
        self.distances
            .iter()
            .filter(|(_, distance)| **distance == self.max_distance)
            .map(|(coord, _)| (coord.y, coord.x, *coord))
            .sorted()
            .map(|(_, _, coord)| coord)
            .collect()
    }
}

/// Walk back from the end point to the start, always stepping to a linked neighbour one step
/// closer to the start. Returns the path start first, or None if the end point is unreachable.
pub fn shortest_path(grid: &Grid,
                     distances_from_start: &Distances,
                     end_point: Cartesian2DCoordinate)
                     -> Option<Vec<Cartesian2DCoordinate>> {

    let mut current_distance = distances_from_start.distance_from_start_to(end_point)?;
    let mut path = vec![end_point];
    let mut current_coord = end_point;

    while current_distance > 0 {
        let closer = grid.links(current_coord)?
            .iter()
            .cloned()
            .find(|linked| {
                distances_from_start.distance_from_start_to(*linked) == Some(current_distance - 1)
            })?;

        current_coord = closer;
        current_distance -= 1;
        path.push(current_coord);
    }

    path.reverse();
    Some(path)
}

/// The longest route through a perfect maze: the cell furthest from an arbitrary cell starts it,
/// the cell furthest from that one ends it.
pub fn dijkstra_longest_path(grid: &Grid) -> Option<Vec<Cartesian2DCoordinate>> {
    let first_distances = Distances::new(grid, grid.first_coordinate())?;
    let long_path_start = *first_distances.furthest_points_on_grid().first()?;

    let distances_from_start = Distances::new(grid, long_path_start)?;
    let end_point = *distances_from_start.furthest_points_on_grid().first()?;

    shortest_path(grid, &distances_from_start, end_point)
}

/// Row-major indices of every cell reachable from the start cell through open passages.
pub fn reachable_cells(grid: &Grid, start: Cartesian2DCoordinate) -> BitSet {
    let mut reached = BitSet::with_capacity(grid.size());
    let mut frontier = Vec::new();

    if let Some(start_index) = grid.grid_coordinate_to_index(start) {
        reached.insert(start_index);
        frontier.push(start);
    }

    while let Some(coord) = frontier.pop() {
        for linked in grid.links(coord).unwrap_or_default().iter() {
            if let Some(index) = grid.grid_coordinate_to_index(*linked) {
                if reached.insert(index) {
                    frontier.push(*linked);
                }
            }
        }
    }
    reached
}

/// A perfect maze is a spanning tree over its cells: all connected with no loops.
pub fn is_perfect_maze(grid: &Grid) -> bool {
    let graph = grid.to_graph();
    graph.edge_count() + 1 == graph.node_count() && connected_components(&graph) == 1
}


#[cfg(test)]
mod tests {

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::generators;
    use crate::units::{ColumnsCount, RowsCount};

    static OUT_OF_GRID_COORDINATE: Cartesian2DCoordinate = Cartesian2DCoordinate {
        x: u32::MAX,
        y: u32::MAX,
    };

    fn small_grid(w: usize, h: usize) -> Grid {
        Grid::new(RowsCount(h), ColumnsCount(w)).unwrap()
    }

    fn gc(x: u32, y: u32) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(x, y)
    }

    fn open_2x2() -> Grid {
        let mut g = small_grid(2, 2);
        g.link(gc(0, 0), gc(1, 0)).expect("Link Failed");
        g.link(gc(0, 0), gc(0, 1)).expect("Link Failed");
        g.link(gc(1, 0), gc(1, 1)).expect("Link Failed");
        g.link(gc(0, 1), gc(1, 1)).expect("Link Failed");
        g
    }

    #[test]
    fn distances_construction_requires_valid_start_coordinate() {
        let g = small_grid(3, 3);
        assert!(Distances::new(&g, OUT_OF_GRID_COORDINATE).is_none());
    }

    #[test]
    fn distances_to_unreachable_cells_is_none() {
        let g = small_grid(3, 3);
        let start_coordinate = gc(0, 0);
        let distances = Distances::new(&g, start_coordinate).unwrap();
        assert_eq!(distances.start(), start_coordinate);
        for coord in g.iter() {
            let d = distances.distance_from_start_to(coord);
            if coord != start_coordinate {
                assert!(d.is_none());
            } else {
                assert_eq!(d, Some(0));
            }
        }
        assert_eq!(distances.distance_from_start_to(OUT_OF_GRID_COORDINATE), None);
    }

    #[test]
    fn distances_on_open_grid() {
        let g = open_2x2();
        let distances = Distances::new(&g, gc(0, 0)).unwrap();

        assert_eq!(distances.distance_from_start_to(gc(0, 0)), Some(0));
        assert_eq!(distances.distance_from_start_to(gc(1, 0)), Some(1));
        assert_eq!(distances.distance_from_start_to(gc(0, 1)), Some(1));
        assert_eq!(distances.distance_from_start_to(gc(1, 1)), Some(2));
        assert_eq!(distances.max(), 2);
        assert_eq!(distances.furthest_points_on_grid(), vec![gc(1, 1)]);
    }

    #[test]
    fn shortest_path_along_a_corridor() {
        let mut g = small_grid(3, 1);
        g.link(gc(0, 0), gc(1, 0)).unwrap();
        g.link(gc(1, 0), gc(2, 0)).unwrap();
        let distances = Distances::new(&g, gc(0, 0)).unwrap();
        assert_eq!(shortest_path(&g, &distances, gc(2, 0)),
                   Some(vec![gc(0, 0), gc(1, 0), gc(2, 0)]));
        assert_eq!(shortest_path(&g, &distances, gc(0, 0)), Some(vec![gc(0, 0)]));
    }

    #[test]
    fn no_path_to_walled_off_cells() {
        let mut g = small_grid(3, 1);
        g.link(gc(0, 0), gc(1, 0)).unwrap();
        let distances = Distances::new(&g, gc(0, 0)).unwrap();
        assert_eq!(shortest_path(&g, &distances, gc(2, 0)), None);
    }

    #[test]
    fn longest_path_on_a_corridor_spans_it() {
        let mut g = small_grid(1, 4);
        for y in 0..3 {
            g.link(gc(0, y), gc(0, y + 1)).unwrap();
        }
        let path = dijkstra_longest_path(&g).unwrap();
        assert_eq!(path, vec![gc(0, 3), gc(0, 2), gc(0, 1), gc(0, 0)]);
    }

    #[test]
    fn reachability() {
        let mut g = small_grid(3, 2);
        g.link(gc(0, 0), gc(1, 0)).unwrap();
        g.link(gc(1, 0), gc(1, 1)).unwrap();
        let reached = reachable_cells(&g, gc(0, 0));
        assert_eq!(reached.iter().collect::<Vec<usize>>(), vec![0, 1, 4]);
        assert!(reachable_cells(&g, OUT_OF_GRID_COORDINATE).is_empty());
    }

    #[test]
    fn perfect_maze_checks() {
        assert!(!is_perfect_maze(&small_grid(2, 2)));
        // all four walls between the four cells removed is a loop
        assert!(!is_perfect_maze(&open_2x2()));
        assert!(is_perfect_maze(&small_grid(1, 1)));

        let mut g = small_grid(9, 7);
        generators::recursive_backtracker(&mut g, StdRng::seed_from_u64(3));
        assert!(is_perfect_maze(&g));
        assert_eq!(reachable_cells(&g, gc(4, 4)).len(), g.size());
    }
}
