//! # Relay
//!
//! Stand-in for the protocol collaborator. It runs on its own tokio task,
//! receives our outgoing messages, and reports inbound events (occupants
//! joining, delivery receipts) back to the event loop as `Action`s.
//!
//! The relay never touches screen state. Everything it produces goes through
//! the action channel and is applied by `update()` on the UI thread.
//!
//! Whether an outgoing message asks for a delivery receipt is decided by the
//! `ReceiptPolicy` given at construction.

use log::{debug, info, warn};
use std::sync::mpsc;
use tokio::sync::mpsc as async_mpsc;

use crate::core::action::Action;
use crate::core::room::{Affiliation, Role};

/// Decides which outgoing messages carry a receipt request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReceiptPolicy {
    Never,
    /// Request receipts, except for messages without a body.
    #[default]
    SkipBodyless,
}

impl ReceiptPolicy {
    pub fn from_config(request_receipts: bool) -> Self {
        if request_receipts {
            ReceiptPolicy::SkipBodyless
        } else {
            ReceiptPolicy::Never
        }
    }

    pub fn wants_receipt(self, body: &str) -> bool {
        match self {
            ReceiptPolicy::Never => false,
            ReceiptPolicy::SkipBodyless => !body.trim().is_empty(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Outgoing {
    pub room: String,
    pub id: u64,
    pub body: String,
}

/// Something that happened on the other side of the connection.
#[derive(Debug, Clone, PartialEq)]
pub enum InboundEvent {
    Joined {
        room: String,
        nick: String,
        role: Role,
        affiliation: Affiliation,
    },
    Left {
        room: String,
        nick: String,
    },
    Message {
        room: String,
        nick: String,
        body: String,
    },
    Topic {
        room: String,
        topic: String,
    },
    Receipt {
        room: String,
        id: u64,
    },
}

/// A room the relay pretends to be connected to.
#[derive(Debug, Clone)]
pub struct RelayRoom {
    pub name: String,
    pub own_nick: String,
    pub occupants: Vec<String>,
}

pub struct Relay {
    policy: ReceiptPolicy,
    rooms: Vec<RelayRoom>,
}

impl Relay {
    pub fn new(policy: ReceiptPolicy, rooms: Vec<RelayRoom>) -> Self {
        Self { policy, rooms }
    }

    /// Announce every room's occupants, then acknowledge outgoing messages
    /// until either channel closes.
    pub async fn run(
        self,
        mut outgoing: async_mpsc::UnboundedReceiver<Outgoing>,
        tx: mpsc::Sender<Action>,
    ) {
        info!("Relay started with {} rooms ({:?})", self.rooms.len(), self.policy);

        for room in &self.rooms {
            for event in join_events(room) {
                if tx.send(Action::Inbound(event)).is_err() {
                    warn!("Failed to send join event: receiver dropped");
                    return;
                }
            }
        }

        while let Some(message) = outgoing.recv().await {
            debug!("Relay got message {} for {}", message.id, message.room);
            if !self.policy.wants_receipt(&message.body) {
                continue;
            }
            let receipt = InboundEvent::Receipt {
                room: message.room,
                id: message.id,
            };
            if tx.send(Action::Inbound(receipt)).is_err() {
                warn!("Failed to send receipt: receiver dropped");
                return;
            }
        }

        info!("Relay outgoing channel closed");
    }
}

/// Our own join first (as moderator), then the configured occupants.
fn join_events(room: &RelayRoom) -> Vec<InboundEvent> {
    let own = InboundEvent::Joined {
        room: room.name.clone(),
        nick: room.own_nick.clone(),
        role: Role::Moderator,
        affiliation: Affiliation::Owner,
    };
    let others = room
        .occupants
        .iter()
        .filter(|nick| **nick != room.own_nick)
        .map(|nick| InboundEvent::Joined {
            room: room.name.clone(),
            nick: nick.clone(),
            role: Role::Participant,
            affiliation: Affiliation::None,
        });
    std::iter::once(own).chain(others).collect()
}
