use bevy::prelude::*;

use crate::dispatch;
use crate::net::SocketEvent;
use crate::ui::types::*;
use crate::ui::view::UiView;

/// Forward pressed board nodes to the server as moves
pub fn handle_board_clicks(
    query: Query<(&Interaction, &ClickTarget), Changed<Interaction>>,
    session: Res<Session>,
    socket: Option<Res<SocketResource>>,
) {
    let Some(socket) = socket else {
        return;
    };

    for (interaction, target) in &query {
        if *interaction != Interaction::Pressed {
            continue;
        }

        log::debug!("Board clicked: {:?}", target.0);
        dispatch::on_click(&session.page, target.0, &socket.0);
    }
}

/// Drain socket events and apply them to the board, links and notices
pub fn process_socket_events(
    socket: Option<Res<SocketResource>>,
    session: Res<Session>,
    time: Res<Time>,
    mut board: ResMut<BoardState>,
    mut notices: ResMut<Notices>,
    mut links: ResMut<ShareLinkState>,
) {
    let Some(socket) = socket else {
        return;
    };

    let events: Vec<SocketEvent> = std::iter::from_fn(|| socket.try_recv()).collect();
    if events.is_empty() {
        return;
    }

    // Only borrow the resources mutably when something arrived, so change detection stays quiet.
    let mut view = UiView {
        board: &mut board.0,
        notices: &mut notices,
        links: &mut links.0,
        now: time.elapsed(),
    };

    for event in events {
        match event {
            SocketEvent::Open => {
                dispatch::on_open(&session.page, session.nickname.as_deref(), &socket.0);
            }
            SocketEvent::Message(text) => {
                dispatch::on_message(&text, &session.page, &mut view, &socket.0);
            }
            SocketEvent::Error(message) => {
                dispatch::on_transport_error(&message, &mut view);
            }
            SocketEvent::Closed { code, reason } => {
                dispatch::on_closed(code, &reason, &mut view);
            }
        }
    }
}
