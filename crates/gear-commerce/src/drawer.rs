//! Cart drawer visibility state machine.
//!
//! Two states, no intermediate transitions: the drawer opens on an add or a
//! badge click and closes on dismissal, checkout handoff, or a backdrop
//! click.

use serde::{Deserialize, Serialize};

/// Drawer visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DrawerState {
    #[default]
    Closed,
    Open,
}

/// Events that open the drawer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenTrigger {
    /// An item was added to the cart.
    ItemAdded,
    /// The header cart badge was clicked.
    BadgeClicked,
}

/// Events that close the drawer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseTrigger {
    /// Explicit close button.
    Dismissed,
    /// Checkout handoff started.
    CheckoutStarted,
    /// Click outside the drawer.
    BackdropClicked,
}

/// The cart drawer.
#[derive(Debug, Clone, Copy, Default)]
pub struct CartDrawer {
    state: DrawerState,
}

impl CartDrawer {
    /// Create a closed drawer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> DrawerState {
        self.state
    }

    /// Check if the drawer is open.
    pub fn is_open(&self) -> bool {
        self.state == DrawerState::Open
    }

    /// Open on a trigger. Opening an open drawer is a no-op.
    pub fn open_on(&mut self, _trigger: OpenTrigger) {
        self.state = DrawerState::Open;
    }

    /// Close on a trigger. Closing a closed drawer is a no-op.
    pub fn close_on(&mut self, _trigger: CloseTrigger) {
        self.state = DrawerState::Closed;
    }
}
