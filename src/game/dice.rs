use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::VecDeque;

use super::globals::DiceRoll;

/// The dice of one game, which double as the game's only source of randomness.
///
/// Every game owns its own generator seeded from the game's seed, so
/// games are reproducible no matter how many run in parallel.
pub struct Dice {
    /// The number of dice thrown at once.
    count: u8,
    /// The number of sides of each die.
    sides: u8,
    rng: ChaCha8Rng,
    /// Casts to return before drawing from `rng` again.
    forced: VecDeque<Vec<u8>>,
}

impl Dice {
    /*********        INITIALISATION INTERFACES        *********/

    /// Return new dice seeded with `seed`.
    pub fn new(seed: u64, count: u8, sides: u8) -> Dice {
        Dice {
            count,
            sides,
            rng: ChaCha8Rng::seed_from_u64(seed),
            forced: VecDeque::new(),
        }
    }

    /*********        PUBLIC INTERFACES        *********/

    /// Throw the dice.
    pub fn roll(&mut self) -> DiceRoll {
        if let Some(dice) = self.forced.pop_front() {
            return DiceRoll::from_dice(dice);
        }

        let sides = self.sides;
        let dice = (0..self.count)
            .map(|_| self.rng.random_range(1..=sides))
            .collect();

        DiceRoll::from_dice(dice)
    }

    /// Make the next throws return the specified dice, in order.
    /// Used to replay a known sequence of events.
    pub fn force_rolls<I>(&mut self, rolls: I)
    where
        I: IntoIterator<Item = Vec<u8>>,
    {
        self.forced.extend(rolls);
    }

    /// Shuffle `items` in place with this game's generator.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_gives_same_rolls() {
        let mut a = Dice::new(42, 2, 6);
        let mut b = Dice::new(42, 2, 6);

        for _ in 0..100 {
            assert_eq!(a.roll(), b.roll());
        }
    }

    #[test]
    fn rolls_stay_within_the_dice_shape() {
        let mut dice = Dice::new(7, 3, 4);

        for _ in 0..500 {
            let roll = dice.roll();
            assert_eq!(roll.dice.len(), 3);
            assert!(roll.dice.iter().all(|&d| (1..=4).contains(&d)));
            assert!((3..=12).contains(&roll.sum));
        }
    }

    #[test]
    fn forced_rolls_come_first() {
        let mut dice = Dice::new(1, 2, 6);
        dice.force_rolls(vec![vec![3, 3], vec![1, 2]]);

        let first = dice.roll();
        assert_eq!(first.sum, 6);
        assert!(first.is_double);

        let second = dice.roll();
        assert_eq!(second.sum, 3);
        assert!(!second.is_double);
    }
}
