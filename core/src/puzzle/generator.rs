use rand::Rng;

use super::*;

/// Shuffles the solved arrangement until it lands on a solvable, unsolved board.
///
/// Half of all permutations are unsolvable, so this takes two shuffles on average.
pub fn generate_solvable_board<R: Rng + ?Sized>(rng: &mut R) -> Tiles {
    let mut rejected = 0u32;
    loop {
        let mut values = *Tiles::SOLVED.as_array();
        fisher_yates(&mut values, rng);

        let tiles = Tiles::new_unchecked(values);
        if tiles.is_solvable() && !tiles.is_solved() {
            log::debug!("generated puzzle after {} rejected shuffles", rejected);
            return tiles;
        }
        rejected += 1;
    }
}

/// Unbiased in-place shuffle, walking from the back and swapping with `[0, i]`.
fn fisher_yates<T, R: Rng + ?Sized>(slice: &mut [T], rng: &mut R) {
    for i in (1..slice.len()).rev() {
        let j = rng.random_range(0..=i);
        slice.swap(i, j);
    }
}
