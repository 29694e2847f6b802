use std::cmp::Reverse;
use std::collections::HashSet;

use super::globals::Group;
use super::state::State;

/// Which side of a deal gives away too much.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Overpay {
    Neither,
    /// The player proposing the trade.
    Proposer,
    /// The player accepting it.
    Counterpart,
}

impl State {
    /*********        TRADE LISTS        *********/

    /// Recompute which properties a player wants to give away and
    /// which ones they want to get in a trade.
    ///
    /// Only groups with every property owned count. A player wants to
    /// sell their only property of a group that one other player
    /// holds the rest of, and wants to buy the only property of a group
    /// they don't hold when they hold all the others.
    pub fn update_trade_lists(&mut self, index: usize) {
        let mut wants_to_sell = HashSet::new();
        let mut wants_to_buy = HashSet::new();

        let player = &self.players[index];
        if player.settings.participates_in_trades && !player.is_bankrupt {
            for members in self.board.groups.values() {
                let owners: Vec<Option<usize>> = members
                    .iter()
                    .map(|&position| self.board.property(position).owner)
                    .collect();

                // There are properties to buy, no trades
                if owners.contains(&None) {
                    continue;
                }

                let mine: Vec<usize> = members
                    .iter()
                    .zip(&owners)
                    .filter(|(_, &owner)| owner == Some(index))
                    .map(|(&position, _)| position)
                    .collect();
                let theirs: Vec<usize> = members
                    .iter()
                    .zip(&owners)
                    .filter(|(_, &owner)| owner != Some(index))
                    .map(|(&position, _)| position)
                    .collect();

                // I own only one and someone else owns all the rest
                if mine.len() == 1 {
                    let other_owner = self.board.property(theirs[0]).owner;
                    if theirs
                        .iter()
                        .all(|&position| self.board.property(position).owner == other_owner)
                    {
                        wants_to_sell.insert(mine[0]);
                    }
                }

                // Someone else owns one and I own the rest
                if theirs.len() == 1 {
                    wants_to_buy.insert(theirs[0]);
                }
            }
        }

        let player = &mut self.players[index];
        player.wants_to_sell = wants_to_sell;
        player.wants_to_buy = wants_to_buy;
    }

    /// Recompute the trade lists of every player. Runs whenever a property changes hands.
    pub fn update_all_trade_lists(&mut self) {
        for index in 0..self.players.len() {
            self.update_trade_lists(index);
        }
    }

    /*********        TRADING        *********/

    /// Look for another player to swap properties with, and make the trade.
    /// Return whether a trade took place (so that trading is tried again).
    pub fn do_a_two_way_trade(&mut self, me: usize) -> bool {
        for other in self.other_players(me) {
            let receives: Vec<usize> = self.players[me]
                .wants_to_buy
                .intersection(&self.players[other].wants_to_sell)
                .copied()
                .collect();
            let gives: Vec<usize> = self.players[me]
                .wants_to_sell
                .intersection(&self.players[other].wants_to_buy)
                .copied()
                .collect();

            if receives.is_empty() || gives.is_empty() {
                continue;
            }

            // Work out a fair deal
            let (give, receive) = match self.fair_deal(me, other, gives, receives) {
                Some(deal) => deal,
                None => continue,
            };

            // Positive when this player gives away the more expensive property
            let price_difference =
                self.board.property(give).cost_base - self.board.property(receive).cost_base;

            // Whoever gets the more expensive property pays the difference
            let (payer, payee) = if price_difference > 0 {
                (other, me)
            } else {
                (me, other)
            };
            let compensation = price_difference.abs();
            if compensation > 0 {
                let payer_margin = self.players[payer].settings.unspendable_cash;
                if self.players[payer].money - compensation < payer_margin {
                    return false;
                }
                self.players[payer].money -= compensation;
                self.players[payee].money += compensation;
            }

            // Properties change hands
            self.transfer_property(give, Some(other));
            self.transfer_property(receive, Some(me));

            self.log.add(
                2,
                format!(
                    "Trade: {} gives {}, receives {} from {}",
                    self.players[me],
                    self.board.name(give),
                    self.board.name(receive),
                    self.players[other]
                ),
            );
            if compensation > 0 {
                self.log.add(
                    2,
                    format!(
                        "{} received price difference compensation ${} from {}",
                        self.players[payee], compensation, self.players[payer]
                    ),
                );
            }

            // Ownership changed for everyone
            self.update_all_trade_lists();

            return true;
        }

        false
    }

    /// Narrow down the candidates of a trade to one property on each side,
    /// as `(gives, receives)`. Return `None` if no fair deal can be made.
    ///
    /// Both players want the properties of two-property groups, so when
    /// such a group shows up on both sides it is dropped from the longer
    /// side (from both if they are the same length). Then the most valuable
    /// candidates are compared, and the side that would give away too much
    /// offers its next most valuable candidate instead.
    fn fair_deal(
        &self,
        me: usize,
        other: usize,
        mut gives: Vec<usize>,
        mut receives: Vec<usize>,
    ) -> Option<(usize, usize)> {
        let group_of = |position: usize| self.board.property(position).group;
        let is_pair = |position: usize| self.board.group_members(group_of(position)).len() == 2;

        // Only properties from two-property groups, no trade
        if gives.iter().chain(&receives).all(|&p| is_pair(p)) {
            return None;
        }

        let on_both_sides: Vec<Group> = [Group::Utilities, Group::Indigo, Group::Brown]
            .into_iter()
            .filter(|&group| {
                gives.iter().any(|&p| group_of(p) == group)
                    && receives.iter().any(|&p| group_of(p) == group)
            })
            .collect();

        for group in on_both_sides {
            let (n_gives, n_receives) = (gives.len(), receives.len());
            if n_receives >= n_gives {
                receives.retain(|&p| group_of(p) != group);
            }
            if n_gives >= n_receives {
                gives.retain(|&p| group_of(p) != group);
            }
        }

        // Most expensive first (board order breaks ties)
        let by_price = |&p: &usize| (Reverse(self.board.property(p).cost_base), p);
        gives.sort_by_key(by_price);
        receives.sort_by_key(by_price);

        let (mut g, mut r) = (0, 0);
        while g < gives.len() && r < receives.len() {
            match self.overpay(me, other, gives[g], receives[r]) {
                Overpay::Neither => return Some((gives[g], receives[r])),
                Overpay::Proposer => g += 1,
                Overpay::Counterpart => r += 1,
            }
        }

        None
    }

    /// Check a swap against both players' tolerance for giving away
    /// more than they get, in absolute and relative terms.
    fn overpay(&self, me: usize, other: usize, give: usize, receive: usize) -> Overpay {
        let cost_gives = self.board.property(give).cost_base;
        let cost_receives = self.board.property(receive).cost_base;
        let difference = cost_gives - cost_receives;

        let my_settings = &self.players[me].settings;
        if difference > my_settings.trade_max_diff_absolute
            || cost_gives as f64 / cost_receives as f64 > my_settings.trade_max_diff_relative
        {
            return Overpay::Proposer;
        }

        let other_settings = &self.players[other].settings;
        if -difference > other_settings.trade_max_diff_absolute
            || cost_receives as f64 / cost_gives as f64 > other_settings.trade_max_diff_relative
        {
            return Overpay::Counterpart;
        }

        Overpay::Neither
    }
}
