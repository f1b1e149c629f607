//! Local safety checks used before leaving the cycle
//!
//! None of these prove long-term reachability. The guarantee the planner relies
//! on is that the body stays ordered along the cycle, so the cycle successor of
//! the head is always free or the vacating tail.

use std::collections::VecDeque;

use super::cycle::Tour;
use super::occupancy::OccupancyGrid;
use crate::game::Cell;

/// Apply one move to a body: push the new head, drop the tail unless it grows
pub fn advance_body(body: &mut VecDeque<Cell>, next: Cell, target: Cell) {
    body.push_front(next);
    if next != target {
        body.pop_back();
    }
}

/// Forward cycle steps from head to tail; the whole cycle for a one-cell body.
///
/// Cells strictly inside this arc are free while the body is cycle-ordered.
pub fn free_arc(tour: &Tour, body: &VecDeque<Cell>) -> usize {
    match (body.front(), body.back()) {
        (Some(&head), Some(&tail)) if head != tail => tour.cyclic_distance(head, tail),
        _ => tour.len(),
    }
}

/// Whether the head still has somewhere to go one move after `candidate`
pub fn has_free_neighbor_after(
    tour: &Tour,
    body: &VecDeque<Cell>,
    candidate: Cell,
    target: Cell,
) -> bool {
    let mut simulated = body.clone();
    advance_body(&mut simulated, candidate, target);

    let occupancy = OccupancyGrid::from_body(tour.side(), &simulated, true);
    candidate
        .neighbors()
        .into_iter()
        .any(|neighbor| occupancy.is_free(neighbor))
}

/// Whether the head of `simulated_body` can step straight back onto the cycle
pub fn can_rejoin_cycle(tour: &Tour, simulated_body: &VecDeque<Cell>) -> bool {
    let Some(&head) = simulated_body.front() else {
        return false;
    };
    let successor = tour.successor(head);
    !simulated_body.contains(&successor)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(raw: &[(i32, i32)]) -> VecDeque<Cell> {
        raw.iter().map(|&(x, y)| Cell::new(x, y)).collect()
    }

    #[test]
    fn test_advance_body_slides_and_grows() {
        let mut snake = body(&[(1, 0), (0, 0)]);
        advance_body(&mut snake, Cell::new(2, 0), Cell::new(3, 3));
        assert_eq!(snake, body(&[(2, 0), (1, 0)]));

        advance_body(&mut snake, Cell::new(3, 0), Cell::new(3, 0));
        assert_eq!(snake, body(&[(3, 0), (2, 0), (1, 0)]));
    }

    #[test]
    fn test_free_arc() {
        let tour = Tour::new(4).unwrap();
        assert_eq!(free_arc(&tour, &body(&[(0, 0)])), 16);
        // head (2,0) at index 2, tail (0,0) at index 0
        assert_eq!(free_arc(&tour, &body(&[(2, 0), (1, 0), (0, 0)])), 14);
    }

    #[test]
    fn test_free_neighbor_in_open_grid() {
        let tour = Tour::new(4).unwrap();
        let snake = body(&[(1, 1), (1, 0)]);
        assert!(has_free_neighbor_after(
            &tour,
            &snake,
            Cell::new(2, 1),
            Cell::new(3, 3)
        ));
    }

    #[test]
    fn test_corner_pocket_has_no_free_neighbor() {
        let tour = Tour::new(4).unwrap();
        // Moving into (0,0) surrounded by the body, which then keeps (0,1)
        // and (1,0) occupied because the tail is elsewhere.
        let snake = body(&[(0, 1), (1, 1), (1, 0), (2, 0), (3, 0)]);
        assert!(!has_free_neighbor_after(
            &tour,
            &snake,
            Cell::ORIGIN,
            Cell::new(3, 3)
        ));
    }

    #[test]
    fn test_growth_keeps_second_to_last_segment() {
        let tour = Tour::new(4).unwrap();
        let snake = body(&[(0, 1), (1, 1), (1, 0), (2, 0)]);
        // Sliding into the corner turns (1,0) into the vacating tail.
        assert!(has_free_neighbor_after(
            &tour,
            &snake,
            Cell::ORIGIN,
            Cell::new(3, 3)
        ));
        // Eating there keeps (1,0) in the body and walls the head in.
        assert!(!has_free_neighbor_after(
            &tour,
            &snake,
            Cell::ORIGIN,
            Cell::ORIGIN
        ));
    }

    #[test]
    fn test_can_rejoin_cycle() {
        let tour = Tour::new(4).unwrap();
        assert!(can_rejoin_cycle(&tour, &body(&[(2, 0), (1, 0)])));
        // successor of (1,1) is (1,2), which the body covers
        assert!(!can_rejoin_cycle(&tour, &body(&[(1, 1), (1, 2), (2, 2)])));
        assert!(!can_rejoin_cycle(&tour, &VecDeque::new()));
    }
}
