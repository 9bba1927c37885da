use std::time::Duration;

use crate::board::Board;
use crate::dispatch::GameView;
use crate::protocol::Player;
use crate::session::ShareLinks;
use crate::ui::types::Notices;

/// `GameView` over the plugin's resources, borrowed for one frame.
pub struct UiView<'a> {
    pub board: &'a mut Board,
    pub notices: &'a mut Notices,
    pub links: &'a mut Option<ShareLinks>,
    pub now: Duration,
}

impl GameView for UiView<'_> {
    fn place_piece(&mut self, player: Player, column: usize, row: usize) {
        match self.board.place(player, column, row) {
            Ok(()) => log::debug!("{} played column {} row {}", player, column, row),
            Err(e) => log::warn!("Ignoring move from server: {}", e),
        }
    }

    fn notify(&mut self, text: String) {
        self.notices.push(text, self.now);
    }

    fn set_share_links(&mut self, links: ShareLinks) {
        log::info!("Join link: {}", links.join);
        log::info!("Watch link: {}", links.watch);
        *self.links = Some(links);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::PageLocation;

    #[test]
    fn test_view_updates_resources() {
        let mut board = Board::new();
        let mut notices = Notices::new(Duration::ZERO);
        let mut links = None;

        let mut view = UiView {
            board: &mut board,
            notices: &mut notices,
            links: &mut links,
            now: Duration::from_secs(1),
        };

        view.place_piece(Player::One, 2, 0);
        view.place_piece(Player::Two, 9, 9);
        view.notify("Player 1 wins!".to_string());

        let page = PageLocation::parse("http://localhost:8000/").unwrap();
        view.set_share_links(page.share_links("abc", "xyz"));

        assert_eq!(board.get(2, 0), Some(Player::One));
        assert_eq!(board.occupied(), 1);
        assert!(notices.advance(Duration::from_secs(1)));
        assert_eq!(notices.current(), Some("Player 1 wins!"));
        assert!(links.is_some());
    }
}
