use super::globals::Card;

/// A deck of Chance or Community Chest cards.
///
/// Cards are shuffled once when the game starts. After that the deck is
/// never reordered: drawing only moves the cursor, which puts the drawn
/// card at the bottom of the deck.
#[derive(Clone, Debug)]
pub struct Deck {
    /// The cards currently in the deck.
    cards: Vec<Card>,
    /// Index of the next card to draw.
    cursor: usize,
}

impl Deck {
    /// Return a new deck with the cards in the given order.
    pub fn new(cards: Vec<Card>) -> Deck {
        Deck { cards, cursor: 0 }
    }

    /// The cards in the deck, in their current order.
    pub fn cards_mut(&mut self) -> &mut Vec<Card> {
        &mut self.cards
    }

    /// The number of cards currently in the deck.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Draw the top card, which then goes to the bottom of the deck.
    pub fn draw(&mut self) -> Card {
        if self.cards.is_empty() {
            panic!("Deck::draw() called on an empty deck");
        }

        let card = self.cards[self.cursor];
        self.cursor = (self.cursor + 1) % self.cards.len();

        card
    }

    /// Take a card out of circulation (a "Get Out of Jail Free" card
    /// that a player keeps). Return whether the card was in the deck.
    pub fn remove(&mut self, card: &Card) -> bool {
        let index = match self.cards.iter().position(|c| c == card) {
            Some(i) => i,
            None => return false,
        };

        self.cards.remove(index);

        // Keep the cursor on the same upcoming card
        if index < self.cursor {
            self.cursor -= 1;
        }
        if self.cursor >= self.cards.len() {
            self.cursor = 0;
        }

        true
    }

    /// Put a card back into circulation, at the bottom of the deck
    /// (it will be the last card drawn before the cycle restarts).
    pub fn add(&mut self, card: Card) {
        self.cards.insert(self.cursor, card);
        self.cursor = (self.cursor + 1) % self.cards.len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::globals::{CardEffect, CHANCE_CARDS, COMMUNITY_CHEST_CARDS};
    use proptest::prelude::*;

    fn jail_free() -> Card {
        Card::new("Get Out of Jail Free", CardEffect::GetOutOfJailFree)
    }

    #[test]
    fn draw_cycles_through_the_deck() {
        let mut deck = Deck::new(CHANCE_CARDS.clone());
        let drawn: Vec<Card> = (0..deck.len()).map(|_| deck.draw()).collect();

        assert_eq!(drawn, *CHANCE_CARDS);
        assert_eq!(deck.draw(), CHANCE_CARDS[0]);
    }

    #[test]
    fn withdrawn_card_is_not_drawn_until_added_back() {
        let mut deck = Deck::new(COMMUNITY_CHEST_CARDS.clone());
        let total = deck.len();

        // Draw up to and including the jail-free card
        loop {
            if deck.draw().is_jail_free() {
                break;
            }
        }
        assert!(deck.remove(&jail_free()));
        assert_eq!(deck.len(), total - 1);

        for _ in 0..(total * 2) {
            assert!(!deck.draw().is_jail_free());
        }

        deck.add(jail_free());
        assert_eq!(deck.len(), total);

        // The returned card is the last one of the cycle
        let cycle: Vec<Card> = (0..total).map(|_| deck.draw()).collect();
        assert!(cycle[total - 1].is_jail_free());
        assert!(cycle[..total - 1].iter().all(|c| !c.is_jail_free()));
    }

    #[test]
    fn removing_a_missing_card_does_nothing() {
        let mut deck = Deck::new(vec![Card::new("Pay $5", CardEffect::Pay(5))]);

        assert!(!deck.remove(&jail_free()));
        assert_eq!(deck.len(), 1);
    }

    #[test]
    #[should_panic]
    fn drawing_from_an_empty_deck_panics() {
        let mut deck = Deck::new(vec![]);
        deck.draw();
    }

    proptest! {
        #[test]
        fn drawing_len_times_returns_to_the_first_card(start in 0usize..16, cycles in 1usize..4) {
            let mut deck = Deck::new(CHANCE_CARDS.clone());
            for _ in 0..start {
                deck.draw();
            }

            let first = deck.draw();
            for _ in 0..(deck.len() * cycles - 1) {
                deck.draw();
            }

            prop_assert_eq!(deck.draw(), first);
        }
    }
}
