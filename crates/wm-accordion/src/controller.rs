//! Single-open disclosure controller
//!
//! The controller is the source of truth for every item's state. A
//! [`DisclosureHost`] mirrors the open flag onto the page, measures bodies
//! and runs the transitions it is handed. Hosts report completion back
//! through [`AccordionController::finish`] with the token they were given;
//! tokens of superseded transitions are ignored.

use std::collections::HashMap;

use crate::config::AccordionOptions;
use crate::transition::{BodyTransition, TransitionDirection};

/// Index of a disclosure item in document order
pub type ItemId = usize;

/// Per-item animation state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ItemState {
    #[default]
    Closed,
    Opening,
    Open,
    Closing,
}

impl ItemState {
    /// Whether the element's open flag is set in this state
    ///
    /// Closing items keep the flag until their transition finishes.
    pub fn is_open(self) -> bool {
        !matches!(self, ItemState::Closed)
    }

    /// Whether the item is headed towards (or at) the open state
    fn is_expanding(self) -> bool {
        matches!(self, ItemState::Opening | ItemState::Open)
    }
}

/// Identifies one started transition
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TransitionToken(u64);

impl TransitionToken {
    /// Raw value, for hosts that need to stash it in a callback
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Page-side operations the controller drives
pub trait DisclosureHost {
    /// Cancellable handle of a running transition
    type Transition;

    /// Number of items in the group
    fn item_count(&self) -> usize;

    /// Open flag as currently present on the page
    fn is_open(&self, item: ItemId) -> bool;

    /// Whether the item has a collapsible body
    fn has_body(&self, item: ItemId) -> bool;

    /// Whether the user asked the system for reduced motion
    fn prefers_reduced_motion(&self) -> bool;

    /// Set or clear the element's open flag
    fn set_open(&mut self, item: ItemId, open: bool);

    /// Current on-screen body height in CSS pixels
    fn rendered_height(&self, item: ItemId) -> f64;

    /// Full content height of an open body in CSS pixels
    fn natural_height(&self, item: ItemId) -> f64;

    /// Start animating the body; `None` if the page cannot animate it
    fn start_transition(
        &mut self,
        item: ItemId,
        transition: &BodyTransition,
        token: TransitionToken,
    ) -> Option<Self::Transition>;

    /// Stop a running transition without completing it
    fn cancel_transition(&mut self, item: ItemId, transition: Self::Transition);

    /// Drop inline transition styles so the body reverts to natural sizing
    fn clear_transition_styles(&mut self, item: ItemId);
}

struct ActiveTransition<T> {
    token: TransitionToken,
    direction: TransitionDirection,
    handle: T,
}

/// Coordinates open/close animations across a disclosure group
pub struct AccordionController<H: DisclosureHost> {
    host: H,
    options: AccordionOptions,
    states: Vec<ItemState>,
    /// At most one running transition per item
    active: HashMap<ItemId, ActiveTransition<H::Transition>>,
    next_token: u64,
}

impl<H: DisclosureHost> AccordionController<H> {
    /// Create a controller, seeding item states from the page
    pub fn new(host: H, options: AccordionOptions) -> Self {
        let states = (0..host.item_count())
            .map(|item| {
                if host.is_open(item) {
                    ItemState::Open
                } else {
                    ItemState::Closed
                }
            })
            .collect();

        Self {
            host,
            options,
            states,
            active: HashMap::new(),
            next_token: 1,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn options(&self) -> &AccordionOptions {
        &self.options
    }

    /// Number of items in the group
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// State of an item, `None` for unknown ids
    pub fn state(&self, item: ItemId) -> Option<ItemState> {
        self.states.get(item).copied()
    }

    /// Whether the item's open flag is set
    pub fn is_open(&self, item: ItemId) -> bool {
        self.state(item).is_some_and(ItemState::is_open)
    }

    /// Items whose open flag is set, in document order
    pub fn open_items(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.states
            .iter()
            .enumerate()
            .filter(|(_, state)| state.is_open())
            .map(|(item, _)| item)
    }

    /// Token of the item's running transition
    pub fn active_token(&self, item: ItemId) -> Option<TransitionToken> {
        self.active.get(&item).map(|active| active.token)
    }

    /// Number of running transitions across the group
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Header activation: open a closed (or closing) item, close an open one
    pub fn toggle(&mut self, item: ItemId) {
        let Some(state) = self.state(item) else {
            return;
        };

        if state.is_expanding() {
            self.animate_close(item);
        } else {
            if self.options.single_open {
                self.close_others(item);
            }
            self.animate_open(item);
        }
    }

    /// Begin closing every other open or opening item
    pub fn close_others(&mut self, keep: ItemId) {
        for item in 0..self.states.len() {
            if item != keep && self.states[item].is_expanding() {
                self.animate_close(item);
            }
        }
    }

    /// Mark the item open now and grow its body to full height
    pub fn animate_open(&mut self, item: ItemId) {
        let Some(state) = self.state(item) else {
            return;
        };
        if state == ItemState::Open {
            return;
        }

        if !self.host.has_body(item) {
            self.cancel_active(item);
            self.states[item] = ItemState::Open;
            self.host.set_open(item, true);
            return;
        }

        let resume_from = self.cancel_active(item);
        self.states[item] = ItemState::Opening;
        self.host.set_open(item, true);

        if self.host.prefers_reduced_motion() {
            self.complete(item, TransitionDirection::Open);
            return;
        }

        let natural = self.host.natural_height(item);
        let transition =
            BodyTransition::opening(resume_from.unwrap_or(0.0), natural, self.options.duration_ms);
        self.begin(item, transition);
    }

    /// Shrink the body to nothing; the item is marked closed once that finishes
    pub fn animate_close(&mut self, item: ItemId) {
        let Some(state) = self.state(item) else {
            return;
        };
        if state == ItemState::Closed {
            return;
        }

        if !self.host.has_body(item) {
            self.cancel_active(item);
            self.states[item] = ItemState::Closed;
            self.host.set_open(item, false);
            return;
        }

        let height = self.host.rendered_height(item);
        self.cancel_active(item);

        if self.host.prefers_reduced_motion() {
            self.complete(item, TransitionDirection::Close);
            return;
        }

        self.states[item] = ItemState::Closing;
        let transition = BodyTransition::closing(height, self.options.duration_ms);
        self.begin(item, transition);
    }

    /// Completion callback from the host
    ///
    /// Returns `false` when the token no longer matches the item's running
    /// transition.
    pub fn finish(&mut self, item: ItemId, token: TransitionToken) -> bool {
        match self.active.get(&item) {
            Some(active) if active.token == token => {}
            _ => return false,
        }

        if let Some(active) = self.active.remove(&item) {
            self.complete(item, active.direction);
        }
        true
    }

    /// Settle every running transition at its end state
    ///
    /// Hosts are told to cancel each one first, so no completion callback
    /// fires after teardown.
    pub fn finish_all(&mut self) {
        let mut items: Vec<ItemId> = self.active.keys().copied().collect();
        items.sort_unstable();

        for item in items {
            if let Some(active) = self.active.remove(&item) {
                self.host.cancel_transition(item, active.handle);
                self.complete(item, active.direction);
            }
        }
    }

    /// Cancel the item's running transition, returning the body height it had reached
    fn cancel_active(&mut self, item: ItemId) -> Option<f64> {
        if !self.active.contains_key(&item) {
            return None;
        }
        let height = self.host.rendered_height(item);
        let active = self.active.remove(&item)?;
        self.host.cancel_transition(item, active.handle);
        Some(height)
    }

    fn begin(&mut self, item: ItemId, transition: BodyTransition) {
        let token = TransitionToken(self.next_token);
        self.next_token += 1;

        match self.host.start_transition(item, &transition, token) {
            Some(handle) => {
                self.states[item] = match transition.direction {
                    TransitionDirection::Open => ItemState::Opening,
                    TransitionDirection::Close => ItemState::Closing,
                };
                self.active.insert(
                    item,
                    ActiveTransition {
                        token,
                        direction: transition.direction,
                        handle,
                    },
                );
            }
            None => self.complete(item, transition.direction),
        }
    }

    fn complete(&mut self, item: ItemId, direction: TransitionDirection) {
        self.host.clear_transition_styles(item);
        match direction {
            TransitionDirection::Open => {
                self.states[item] = ItemState::Open;
            }
            TransitionDirection::Close => {
                self.states[item] = ItemState::Closed;
                self.host.set_open(item, false);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Host with bodies but no animation support
    struct StaticHost {
        open: Vec<bool>,
    }

    impl DisclosureHost for StaticHost {
        type Transition = ();

        fn item_count(&self) -> usize {
            self.open.len()
        }
        fn is_open(&self, item: ItemId) -> bool {
            self.open[item]
        }
        fn has_body(&self, _item: ItemId) -> bool {
            true
        }
        fn prefers_reduced_motion(&self) -> bool {
            false
        }
        fn set_open(&mut self, item: ItemId, open: bool) {
            self.open[item] = open;
        }
        fn rendered_height(&self, item: ItemId) -> f64 {
            if self.open[item] { 100.0 } else { 0.0 }
        }
        fn natural_height(&self, _item: ItemId) -> f64 {
            100.0
        }
        fn start_transition(&mut self, _: ItemId, _: &BodyTransition, _: TransitionToken) -> Option<()> {
            None
        }
        fn cancel_transition(&mut self, _: ItemId, _: ()) {}
        fn clear_transition_styles(&mut self, _: ItemId) {}
    }

    #[test]
    fn test_initial_state_from_page() {
        let controller = AccordionController::new(
            StaticHost { open: vec![false, true, false] },
            AccordionOptions::default(),
        );
        assert_eq!(controller.len(), 3);
        assert_eq!(controller.state(1), Some(ItemState::Open));
        assert_eq!(controller.open_items().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn test_toggle_without_animation_support_is_synchronous() {
        let mut controller = AccordionController::new(
            StaticHost { open: vec![true, false] },
            AccordionOptions::default(),
        );

        controller.toggle(0);
        assert!(!controller.is_open(0));
        assert!(!controller.host().open[0]);
        assert_eq!(controller.active_count(), 0);

        controller.toggle(1);
        assert_eq!(controller.state(1), Some(ItemState::Open));
        assert!(controller.host().open[1]);
    }

    #[test]
    fn test_unknown_item_is_ignored() {
        let mut controller = AccordionController::new(
            StaticHost { open: vec![false] },
            AccordionOptions::default(),
        );
        controller.toggle(7);
        controller.animate_close(7);
        assert_eq!(controller.state(7), None);
        assert!(!controller.finish(7, TransitionToken(1)));
    }

    #[test]
    fn test_item_state_flags() {
        assert!(!ItemState::Closed.is_open());
        assert!(ItemState::Closing.is_open());
        assert!(ItemState::Opening.is_open());
        assert!(ItemState::Open.is_open());
    }
}
