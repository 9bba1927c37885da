//! Event Dispatch
//!
//! Turns socket traffic and board clicks into UI updates and outgoing events.
//! Everything here goes through `EventSink` and `GameView`, so it runs
//! without a live socket or a Bevy world.

use crate::protocol::{self, ClientEvent, Player, ServerEvent};
use crate::session::{PageLocation, ShareLinks};

/// Normal closure.
pub const CLOSE_NORMAL: u16 = 1000;

/// Where outgoing events go.
pub trait EventSink {
    fn send(&self, event: ClientEvent);
    fn close(&self, code: u16, reason: &str);
}

/// What the server is allowed to change on screen.
pub trait GameView {
    fn place_piece(&mut self, player: Player, column: usize, row: usize);
    fn notify(&mut self, text: String);
    fn set_share_links(&mut self, links: ShareLinks);
}

/// Click target on the board. Cells carry their column; the board frame carries none.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ColumnTarget(pub Option<usize>);

pub fn win_text(player: Player) -> String {
    format!("{} wins!", player)
}

/// Connection opened: introduce ourselves.
pub fn on_open(page: &PageLocation, nickname: Option<&str>, sink: &impl EventSink) {
    let event = page.init_event(nickname);
    log::info!("Connection open as {:?}, sending {:?}", page.role(), event);
    sink.send(event);
}

pub fn on_click(page: &PageLocation, target: ColumnTarget, sink: &impl EventSink) {
    let Some(column) = target.0 else {
        return;
    };

    if !page.role().can_play() {
        log::debug!("Ignoring click on column {} while spectating", column);
        return;
    }

    sink.send(ClientEvent::Play { column });
}

pub fn on_message(
    text: &str,
    page: &PageLocation,
    view: &mut impl GameView,
    sink: &impl EventSink,
) {
    let event = match protocol::decode(text) {
        Ok(event) => event,
        Err(e) => {
            log::warn!("Dropping server event {}: {}", preview(text), e);
            view.notify(e.to_string());
            return;
        }
    };

    log::debug!("Server event: {:?}", event);

    match event {
        ServerEvent::Init { join, watch } => {
            view.set_share_links(page.share_links(&join, &watch));
        }
        ServerEvent::Play {
            player,
            column,
            row,
        } => {
            view.place_piece(player, column, row);
        }
        ServerEvent::Win { player } => {
            view.notify(win_text(player));
            sink.close(CLOSE_NORMAL, "");
        }
        ServerEvent::Error { message } => {
            view.notify(message);
        }
    }
}

fn preview(text: &str) -> String {
    text.chars().take(100).collect()
}

/// The session is over either way; only unexpected endings are worth a notice.
pub fn on_closed(code: u16, reason: &str, view: &mut impl GameView) {
    if code == CLOSE_NORMAL {
        log::info!("Connection closed normally");
        return;
    }

    log::warn!("Connection closed: {} {}", code, reason);
    if reason.is_empty() {
        view.notify(format!("Connection closed ({})", code));
    } else {
        view.notify(format!("Connection closed ({}): {}", code, reason));
    }
}

pub fn on_transport_error(message: &str, view: &mut impl GameView) {
    log::error!("Connection error: {}", message);
    view.notify(format!("Connection error: {}", message));
}
