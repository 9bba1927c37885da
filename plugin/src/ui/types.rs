use std::collections::VecDeque;
use std::ops::Deref;
use std::time::Duration;

use bevy::prelude::*;

use crate::board::Board;
use crate::dispatch::ColumnTarget;
use crate::net::GameSocket;
use crate::session::{PageLocation, ShareLinks};

/// Marker component for the board container
#[derive(Component)]
pub struct BoardRoot;

/// Grid coordinates of a board cell
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellPosition {
    pub column: usize,
    pub row: usize,
}

/// What a click on this node targets
#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClickTarget(pub ColumnTarget);

/// Text node showing one of the shareable links
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShareLink {
    Join,
    Watch,
}

impl ShareLink {
    pub fn label(self) -> &'static str {
        match self {
            ShareLink::Join => "Join",
            ShareLink::Watch => "Watch",
        }
    }
}

/// Marker component for the notice banner text
#[derive(Component)]
pub struct NoticeBanner;

/// The launch session: where we are and who we say we are.
#[derive(Resource, Clone, Debug)]
pub struct Session {
    pub page: PageLocation,
    pub nickname: Option<String>,
}

/// Bevy Resource wrapper for the game connection.
#[derive(Resource)]
pub struct SocketResource(pub GameSocket);

impl Deref for SocketResource {
    type Target = GameSocket;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Board as last reported by the server
#[derive(Resource, Default, Debug)]
pub struct BoardState(pub Board);

/// Link targets from the server's `init`, if any arrived yet
#[derive(Resource, Default, Debug)]
pub struct ShareLinkState(pub Option<ShareLinks>);

#[derive(Clone, Debug, PartialEq, Eq)]
struct PendingNotice {
    text: String,
    due: Duration,
}

/// Delayed user-facing messages. Each one shows `delay` after it was raised.
#[derive(Resource, Debug)]
pub struct Notices {
    delay: Duration,
    pending: VecDeque<PendingNotice>,
    current: Option<String>,
}

impl Notices {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: VecDeque::new(),
            current: None,
        }
    }

    pub fn push(&mut self, text: String, now: Duration) {
        self.pending.push_back(PendingNotice {
            text,
            due: now + self.delay,
        });
    }

    /// Promote every notice that is due; returns true if the visible one changed.
    pub fn advance(&mut self, now: Duration) -> bool {
        let mut changed = false;
        while self.pending.front().is_some_and(|n| n.due <= now) {
            if let Some(notice) = self.pending.pop_front() {
                log::info!("Notice: {}", notice.text);
                self.current = Some(notice.text);
                changed = true;
            }
        }
        changed
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}
