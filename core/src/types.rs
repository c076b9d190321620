use ndarray::Array2;

/// Single coordinate axis used for board rows, columns, and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Board size of a grid, as `(rows, cols)`.
pub fn grid_size<T>(grid: &Array2<T>) -> Coord2 {
    let (rows, cols) = grid.dim();
    (
        Coord::try_from(rows).unwrap_or(Coord::MAX),
        Coord::try_from(cols).unwrap_or(Coord::MAX),
    )
}

pub trait NeighborIterExt {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter {
        NeighborIter::new(index, grid_size(self))
    }
}

const DISPLACEMENTS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
fn apply_delta(coords: Coord2, delta: (isize, isize), bounds: Coord2) -> Option<Coord2> {
    let (row, col) = coords;
    let (d_row, d_col) = delta;
    let (rows, cols) = bounds;

    let next_row = row.checked_add_signed(d_row.try_into().ok()?)?;
    if next_row >= rows {
        return None;
    }

    let next_col = col.checked_add_signed(d_col.try_into().ok()?)?;
    if next_col >= cols {
        return None;
    }

    Some((next_row, next_col))
}

/// Iterates the in-bounds 8-neighbours of a cell, never wrapping around edges.
#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    index: u8,
}

impl NeighborIter {
    pub fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if usize::from(self.index) >= DISPLACEMENTS.len() {
                return None;
            }

            let next_item =
                apply_delta(self.center, DISPLACEMENTS[self.index as usize], self.bounds);
            self.index += 1;

            if next_item.is_some() {
                return next_item;
            }
        }
    }
}

/// The cell itself followed by its in-bounds neighbours.
pub fn safe_zone(center: Coord2, bounds: Coord2) -> impl Iterator<Item = Coord2> {
    core::iter::once(center).chain(NeighborIter::new(center, bounds))
}

/// Whether `other` lies within one step (including diagonals) of `center`.
pub const fn is_adjacent_or_same(center: Coord2, other: Coord2) -> bool {
    center.0.abs_diff(other.0) <= 1 && center.1.abs_diff(other.1) <= 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interior_cell_has_eight_neighbors() {
        let neighbors: Vec<_> = NeighborIter::new((1, 1), (3, 3)).collect();

        assert_eq!(neighbors.len(), 8);
        assert!(!neighbors.contains(&(1, 1)));
        assert!(neighbors.contains(&(0, 0)));
        assert!(neighbors.contains(&(2, 2)));
    }

    #[test]
    fn corner_and_edge_cells_do_not_wrap() {
        assert_eq!(NeighborIter::new((0, 0), (9, 9)).count(), 3);
        assert_eq!(NeighborIter::new((8, 8), (9, 9)).count(), 3);
        assert_eq!(NeighborIter::new((0, 4), (9, 9)).count(), 5);
        assert_eq!(NeighborIter::new((4, 0), (9, 9)).count(), 5);
        assert!(NeighborIter::new((0, 8), (9, 9)).all(|(r, c)| r <= 1 && c >= 7));
    }

    #[test]
    fn single_cell_board_has_no_neighbors() {
        assert_eq!(NeighborIter::new((0, 0), (1, 1)).count(), 0);
    }

    #[test]
    fn safe_zone_includes_center() {
        let zone: Vec<_> = safe_zone((0, 0), (9, 9)).collect();
        assert_eq!(zone, vec![(0, 0), (0, 1), (1, 0), (1, 1)]);
        assert_eq!(safe_zone((4, 4), (9, 9)).count(), 9);
    }

    #[test]
    fn adjacency_check_matches_neighbor_iteration() {
        for row in 0..5 {
            for col in 0..5 {
                let expected = (row, col) == (2, 2)
                    || NeighborIter::new((2, 2), (5, 5)).any(|pos| pos == (row, col));
                assert_eq!(is_adjacent_or_same((2, 2), (row, col)), expected);
            }
        }
    }

    #[test]
    fn mult_saturates() {
        assert_eq!(mult(16, 30), 480);
        assert_eq!(mult(255, 255), 65025);
    }
}
