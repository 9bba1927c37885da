use bevy::prelude::*;

use crate::board::{COLUMNS, ROWS};
use crate::dispatch::ColumnTarget;
use crate::session::SessionRole;
use crate::ui::style::Palette;
use crate::ui::types::*;

const CELL_SIZE: f32 = 64.0;
const CELL_GAP: f32 = 8.0;

/// Build the page: status line, board grid, share links and notice banner.
pub fn spawn_board(mut commands: Commands, palette: Res<Palette>, session: Res<Session>) {
    let status = match session.page.role() {
        SessionRole::Creator => "Waiting for an opponent".to_string(),
        SessionRole::Player => format!("Joining game {}", session.page.join().unwrap_or_default()),
        SessionRole::Spectator => format!("Watching game {}", session.page.watch().unwrap_or_default()),
    };

    commands
        .spawn(Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            flex_direction: FlexDirection::Column,
            align_items: AlignItems::Center,
            justify_content: JustifyContent::Center,
            row_gap: Val::Px(16.0),
            ..default()
        })
        .with_children(|page| {
            page.spawn((
                Text::new(status),
                TextFont::from_font_size(20.0),
                TextColor(palette.text),
            ));

            page.spawn((
                Node {
                    flex_direction: FlexDirection::Row,
                    column_gap: Val::Px(CELL_GAP),
                    padding: UiRect::all(Val::Px(CELL_GAP)),
                    ..default()
                },
                BackgroundColor(palette.board),
                BoardRoot,
                ClickTarget(ColumnTarget(None)),
                Interaction::default(),
            ))
            .with_children(|board| {
                for column in 0..COLUMNS {
                    // Row 0 sits at the bottom of its column.
                    board
                        .spawn(Node {
                            flex_direction: FlexDirection::ColumnReverse,
                            row_gap: Val::Px(CELL_GAP),
                            ..default()
                        })
                        .with_children(|cells| {
                            for row in 0..ROWS {
                                cells.spawn((
                                    Button,
                                    Node {
                                        width: Val::Px(CELL_SIZE),
                                        height: Val::Px(CELL_SIZE),
                                        ..default()
                                    },
                                    BackgroundColor(palette.empty_cell),
                                    CellPosition { column, row },
                                    ClickTarget(ColumnTarget(Some(column))),
                                ));
                            }
                        });
                }
            });

            for link in [ShareLink::Join, ShareLink::Watch] {
                page.spawn((
                    Text::new(String::new()),
                    TextFont::from_font_size(16.0),
                    TextColor(palette.text),
                    link,
                ));
            }

            page.spawn((
                Text::new(String::new()),
                TextFont::from_font_size(24.0),
                TextColor(palette.text),
                NoticeBanner,
            ));
        });

    log::info!("Spawned {}x{} board", COLUMNS, ROWS);
}

/// Repaint cells from the board resource
pub fn paint_board(
    board: Res<BoardState>,
    palette: Res<Palette>,
    mut cells: Query<(&CellPosition, &mut BackgroundColor)>,
) {
    if !board.is_changed() {
        return;
    }

    log::debug!("Repainting board ({} pieces)", board.0.occupied());
    for (position, mut color) in &mut cells {
        let wanted = palette.cell(board.0.get(position.column, position.row));
        if color.0 != wanted {
            color.0 = wanted;
        }
    }
}

pub fn update_share_links(links: Res<ShareLinkState>, mut texts: Query<(&ShareLink, &mut Text)>) {
    if !links.is_changed() {
        return;
    }

    let Some(ref links) = links.0 else {
        return;
    };

    for (kind, mut text) in &mut texts {
        let target = match kind {
            ShareLink::Join => &links.join,
            ShareLink::Watch => &links.watch,
        };
        text.0 = format!("{}: {}", kind.label(), target);
    }
}

pub fn show_notices(
    time: Res<Time>,
    mut notices: ResMut<Notices>,
    mut banner: Query<&mut Text, With<NoticeBanner>>,
) {
    if notices.pending() == 0 {
        return;
    }

    if !notices.advance(time.elapsed()) {
        return;
    }

    let current = notices.current().unwrap_or_default().to_string();
    for mut text in &mut banner {
        text.0 = current.clone();
    }
}
