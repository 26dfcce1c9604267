use ndarray::Array2;

use crate::types::unflatten;

use super::*;

/// Purely random generation strategy: uniform bomb placement followed by an independent rarity roll per diamond.
///
/// Sparse boards place bombs by rejection sampling on random coordinates. Once bombs would cover more than half the
/// board, a partial Fisher-Yates shuffle over cell indices is used instead so the number of draws stays bounded.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomBoardGenerator<R> {
    rng: R,
}

impl<R: RandomSource> RandomBoardGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn into_inner(self) -> R {
        self.rng
    }

    fn place_by_rejection(&mut self, kinds: &mut Array2<CellKind>, config: &BoardConfig) {
        let size = CellCount::from(config.size);
        let mut bombs_placed = 0;
        let mut draws: u32 = 0;
        while bombs_placed < config.bombs {
            let row = self.rng.next_index(size) as usize;
            let col = self.rng.next_index(size) as usize;
            draws += 1;
            let cell = &mut kinds[[row, col]];
            if !cell.is_bomb() {
                *cell = CellKind::Bomb;
                bombs_placed += 1;
            }
        }
        log::trace!("Placed {} bombs in {} draws", bombs_placed, draws);
    }

    fn place_by_shuffle(&mut self, kinds: &mut Array2<CellKind>, config: &BoardConfig) {
        let total_cells = config.total_cells();
        let mut indices: Vec<CellCount> = (0..total_cells).collect();
        for i in 0..config.bombs {
            let pick = i + self.rng.next_index(total_cells - i);
            indices.swap(i.into(), pick.into());
            let (row, col) = unflatten(indices[usize::from(i)], config.size);
            kinds[(row, col).to_nd_index()] = CellKind::Bomb;
        }
    }
}

impl<R: RandomSource> BoardGenerator for RandomBoardGenerator<R> {
    fn generate(mut self, config: BoardConfig) -> Result<Board> {
        let config = config.validate()?;
        let size = usize::from(config.size);
        let mut kinds = Array2::from_elem((size, size), CellKind::Diamond);

        if u32::from(config.bombs) * 2 <= u32::from(config.total_cells()) {
            self.place_by_rejection(&mut kinds, &config);
        } else {
            log::debug!(
                "Dense board ({} bombs on {} cells), placing bombs by shuffle",
                config.bombs,
                config.total_cells()
            );
            self.place_by_shuffle(&mut kinds, &config);
        }

        // rarity rolls only ever touch cells that are still plain diamonds
        let odds = RarityOdds::for_board(config.is_boss);
        for kind in kinds.iter_mut() {
            if *kind == CellKind::Diamond {
                *kind = odds.roll(self.rng.next_unit());
            }
        }

        let board = Board::from_kinds(&kinds, self.rng.next_nonce())?;

        // double check bomb count
        if board.bomb_count() != config.bombs {
            log::warn!(
                "Generated board bomb count mismatch, actual: {}, requested: {}",
                board.bomb_count(),
                config.bombs
            );
        }
        log::debug!(
            "Generated {0}x{0} board, boss: {1}, {2:?}",
            config.size,
            config.is_boss,
            board.kind_counts()
        );
        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generate(size: Coord, bombs: CellCount, is_boss: bool, rng: impl RandomSource) -> Board {
        generate_board(size, bombs, is_boss, rng).unwrap()
    }

    #[test]
    fn places_bombs_and_rolls_rarity_in_order() {
        // bomb at (1, 0), then rolls for (0, 0), (0, 1), (1, 1), then the nonce
        let rng = FixedSequence::new([0.6, 0.1, 0.005, 0.03, 0.5, 0.0]);
        let board = generate(2, 1, false, rng);

        assert_eq!(board[(1, 0)].kind, CellKind::Bomb);
        assert_eq!(board[(0, 0)].kind, CellKind::SuperDiamond);
        assert_eq!(board[(0, 1)].kind, CellKind::RareDiamond);
        assert_eq!(board[(1, 1)].kind, CellKind::Diamond);
        assert!(board.iter().all(|(_, cell)| !cell.revealed));
    }

    #[test]
    fn rejection_sampling_skips_occupied_cells() {
        // second draw hits (0, 0) again and must be retried
        let rng = FixedSequence::new([0.0, 0.0, 0.0, 0.0, 0.9, 0.9, 0.99, 0.99, 0.0]);
        let board = generate(2, 2, false, rng);

        assert_eq!(board.bomb_count(), 2);
        assert!(board[(0, 0)].kind.is_bomb());
        assert!(board[(1, 1)].kind.is_bomb());
        assert_eq!(board[(0, 1)].kind, CellKind::Diamond);
        assert_eq!(board[(1, 0)].kind, CellKind::Diamond);
    }

    #[test]
    fn bomb_count_is_exact_for_every_valid_input() {
        let mut rng = SeededRandom::new(0xd1a);
        for size in 1..=12 {
            for bombs in 0..area(size) {
                for is_boss in [false, true] {
                    let board = generate(size, bombs, is_boss, &mut rng);
                    assert_eq!(board.size(), size);
                    assert_eq!(board.bomb_count(), bombs, "size {size}");
                    assert_eq!(board.kind_counts().bombs, bombs);
                    assert_eq!(board.kind_counts().all_diamonds(), area(size) - bombs);
                }
            }
        }
    }

    #[test]
    fn dense_boards_terminate_with_a_single_diamond() {
        let mut rng = SeededRandom::new(99);
        let board = generate(12, 143, false, &mut rng);
        assert_eq!(board.bomb_count(), 143);
        assert_eq!(board.diamond_count(), 1);
    }

    #[test]
    fn same_seed_same_board() {
        let a = generate(9, 20, true, SeededRandom::new(5));
        let b = generate(9, 20, true, SeededRandom::new(5));
        assert_eq!(a, b);
    }

    fn rarity_rates(is_boss: bool, boards: usize, seed: u64) -> (f64, f64) {
        let mut rng = SeededRandom::new(seed);
        let mut counts = KindCounts::default();
        for _ in 0..boards {
            let board = generate(12, 0, is_boss, &mut rng);
            let board_counts = board.kind_counts();
            counts.super_diamonds += board_counts.super_diamonds;
            counts.rare_diamonds += board_counts.rare_diamonds;
            counts.diamonds += board_counts.diamonds;
        }
        let total = f64::from(counts.all_diamonds());
        (
            f64::from(counts.super_diamonds) / total,
            f64::from(counts.rare_diamonds) / total,
        )
    }

    #[test]
    fn standard_rarity_rates_are_close_to_odds() {
        // 100 boards of 144 cells
        let (super_rate, rare_rate) = rarity_rates(false, 100, 2024);
        assert!((super_rate - 0.01).abs() < 0.01, "super rate {super_rate}");
        assert!((rare_rate - 0.05).abs() < 0.01, "rare rate {rare_rate}");
    }

    #[test]
    fn boss_rarity_rates_are_close_to_odds() {
        let (super_rate, rare_rate) = rarity_rates(true, 200, 4048);
        assert!((super_rate - 0.05).abs() < 0.01, "super rate {super_rate}");
        assert!((rare_rate - 0.15).abs() < 0.01, "rare rate {rare_rate}");
    }
}
