//! Property tests for the expanding ring search

use ahash::AHashSet;
use keeper_ai::core::types::TilePos;
use keeper_ai::spatial::RingSearch;
use proptest::prelude::*;

proptest! {
    /// Cells come out by non-decreasing Chebyshev distance from the center
    #[test]
    fn rings_never_go_back_inward(
        width in 1i32..24,
        height in 1i32..24,
        cx in 0i32..24,
        cy in 0i32..24,
    ) {
        let center = TilePos::new(cx % width, cy % height);
        let search = RingSearch::new(center, width, height);

        let distances: Vec<i32> = search.cells().map(|p| p.chebyshev(&center)).collect();
        prop_assert!(distances.windows(2).all(|w| w[0] <= w[1]));
    }

    /// Every in-map cell other than the center is visited exactly once
    #[test]
    fn rings_cover_the_map_once(
        width in 1i32..20,
        height in 1i32..20,
        cx in 0i32..20,
        cy in 0i32..20,
    ) {
        let center = TilePos::new(cx % width, cy % height);
        let search = RingSearch::new(center, width, height);

        let cells: Vec<TilePos> = search.cells().collect();
        let unique: AHashSet<TilePos> = cells.iter().copied().collect();
        prop_assert_eq!(unique.len(), cells.len());
        prop_assert!(!unique.contains(&center));
        prop_assert_eq!(cells.len() as i32, width * height - 1);
    }

    /// The shuffled search lands on the same ring and step as the ordered one
    #[test]
    fn shuffled_find_stays_in_nearest_step(
        seed in any::<u64>(),
        gx in 0i32..16,
        gy in 0i32..16,
    ) {
        use rand::SeedableRng;
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(seed);

        let center = TilePos::new(8, 8);
        let search = RingSearch::new(center, 16, 16);
        let goal = TilePos::new(gx, gy);
        let is_goal_row = |p: TilePos| p.y == goal.y && p != center;

        let ordered = search.find(is_goal_row);
        let shuffled = search.find_shuffled(&mut rng, is_goal_row);
        // A ring cell's step is its smaller axis offset
        let ring_and_step = |p: TilePos| {
            let (dx, dy) = ((p.x - center.x).abs(), (p.y - center.y).abs());
            (dx.max(dy), dx.min(dy))
        };
        prop_assert_eq!(ordered.map(ring_and_step), shuffled.map(ring_and_step));
    }
}
