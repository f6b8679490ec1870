//! In-memory page used by the accordion tests

#![allow(dead_code)]

use wm_accordion::{BodyTransition, DisclosureHost, ItemId, TransitionToken};

/// Records everything the controller asks of the page
pub struct FakePage {
    pub open: Vec<bool>,
    pub bodies: Vec<bool>,
    pub natural: Vec<f64>,
    pub rendered: Vec<f64>,
    pub reduced_motion: bool,
    pub animations: bool,
    pub started: Vec<(ItemId, BodyTransition, TransitionToken)>,
    pub cancelled: Vec<(ItemId, TransitionToken)>,
    pub cleared: Vec<ItemId>,
}

impl FakePage {
    /// `count` closed items, each with a 120px body
    pub fn new(count: usize) -> Self {
        Self {
            open: vec![false; count],
            bodies: vec![true; count],
            natural: vec![120.0; count],
            rendered: vec![0.0; count],
            reduced_motion: false,
            animations: true,
            started: Vec::new(),
            cancelled: Vec::new(),
            cleared: Vec::new(),
        }
    }

    /// Most recent transition started for an item
    pub fn last_started(&self, item: ItemId) -> Option<&BodyTransition> {
        self.started
            .iter()
            .rev()
            .find(|(i, _, _)| *i == item)
            .map(|(_, transition, _)| transition)
    }
}

impl DisclosureHost for FakePage {
    type Transition = TransitionToken;

    fn item_count(&self) -> usize {
        self.open.len()
    }

    fn is_open(&self, item: ItemId) -> bool {
        self.open[item]
    }

    fn has_body(&self, item: ItemId) -> bool {
        self.bodies[item]
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    fn set_open(&mut self, item: ItemId, open: bool) {
        self.open[item] = open;
    }

    fn rendered_height(&self, item: ItemId) -> f64 {
        self.rendered[item]
    }

    fn natural_height(&self, item: ItemId) -> f64 {
        self.natural[item]
    }

    fn start_transition(
        &mut self,
        item: ItemId,
        transition: &BodyTransition,
        token: TransitionToken,
    ) -> Option<TransitionToken> {
        if !self.animations {
            return None;
        }
        self.started.push((item, transition.clone(), token));
        Some(token)
    }

    fn cancel_transition(&mut self, item: ItemId, transition: TransitionToken) {
        self.cancelled.push((item, transition));
    }

    fn clear_transition_styles(&mut self, item: ItemId) {
        self.cleared.push(item);
    }
}
