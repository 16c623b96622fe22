use std::fmt;

use minefield_core::{Coord2, Field, MarkOutcome, RevealOutcome};

use crate::{Command, SharedField, Target};

pub const HELP_MESSAGE: &str = "Commands: look | dig X Y | flag X Y | deflag X Y | help | bye \
     (X is the column and Y the row, both counted from 0)";

pub const BOOM_MESSAGE: &str = "BOOM!";

pub const BYE_MESSAGE: &str = "bye";

/// What a session sends back for one command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reply {
    Board(String),
    Boom,
    Help,
    Bye,
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Board(render) => f.write_str(render),
            Reply::Boom => f.write_str(BOOM_MESSAGE),
            Reply::Help => f.write_str(HELP_MESSAGE),
            Reply::Bye => f.write_str(BYE_MESSAGE),
        }
    }
}

/// One player's view of a shared board. Leaves the board when dropped.
///
/// Outside debug mode a detonation ends the session.
#[derive(Debug)]
pub struct Session {
    board: SharedField,
    debug: bool,
}

impl Session {
    pub(crate) fn new(board: SharedField, debug: bool) -> Self {
        Self { board, debug }
    }

    pub fn is_debug(&self) -> bool {
        self.debug
    }

    pub fn greeting(&self) -> String {
        let (columns, rows) = self.board.size();
        format!(
            "Welcome to Minesweeper. Board: {} columns by {} rows. Players: {} including you. \
             Type 'help' for help.",
            columns,
            rows,
            self.board.players()
        )
    }

    /// Parses and runs one command line. Lines that are not commands get the help text.
    pub fn handle_line(&self, line: &str) -> Reply {
        match line.parse::<Command>() {
            Ok(command) => self.handle(command),
            Err(err) => {
                log::debug!("Rejected {:?}: {}", line, err);
                Reply::Help
            }
        }
    }

    pub fn handle(&self, command: Command) -> Reply {
        log::debug!("Handling `{}`", command);
        match command {
            Command::Look => Reply::Board(self.board.render()),
            Command::Help => Reply::Help,
            Command::Bye => Reply::Bye,
            Command::Dig(target) => self.board.write(|field| {
                let outcome = target
                    .coords()
                    .map_or(RevealOutcome::NoChange, |coords| field.reveal(coords));
                if !outcome.has_update() {
                    log::debug!("`{}` left the board unchanged", command);
                }
                if outcome.is_detonation() {
                    Reply::Boom
                } else {
                    Reply::Board(field.render())
                }
            }),
            Command::Flag(target) => self.mark_with(command, target, Field::mark),
            Command::Deflag(target) => self.mark_with(command, target, Field::unmark),
        }
    }

    /// Runs a mark-type operation and renders the result under the same lock.
    fn mark_with(
        &self,
        command: Command,
        target: Target,
        op: fn(&mut Field, Coord2) -> MarkOutcome,
    ) -> Reply {
        self.board.write(|field| {
            let outcome = target
                .coords()
                .map_or(MarkOutcome::NoChange, |coords| op(field, coords));
            if !outcome.has_update() {
                log::debug!("`{}` left the board unchanged", command);
            }
            Reply::Board(field.render())
        })
    }

    /// Whether the connection should close after sending `reply`.
    pub fn should_close(&self, reply: &Reply) -> bool {
        match reply {
            Reply::Bye => true,
            Reply::Boom => !self.debug,
            _ => false,
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.board.leave();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minefield_core::MineLayout;

    fn board(size: Coord2, mines: &[Coord2]) -> SharedField {
        let mut field = Field::new(size).unwrap();
        field
            .place_mines(&MineLayout::from_mine_coords(size, mines).unwrap())
            .unwrap();
        SharedField::new(field)
    }

    #[test]
    fn greeting_reports_size_and_players() {
        let board = board((10, 4), &[]);
        let _other = board.join(false);
        let session = board.join(false);

        assert_eq!(
            session.greeting(),
            "Welcome to Minesweeper. Board: 10 columns by 4 rows. Players: 2 including you. \
             Type 'help' for help."
        );
    }

    #[test]
    fn look_renders_the_board() {
        let session = board((3, 2), &[]).join(false);
        assert_eq!(
            session.handle_line("look"),
            Reply::Board("- - -\r\n- - -".to_string())
        );
    }

    #[test]
    fn dig_flag_and_deflag() {
        let session = board((3, 1), &[(2, 0)]).join(false);

        assert_eq!(
            session.handle_line("flag 2 0"),
            Reply::Board("- - F".to_string())
        );
        assert_eq!(
            session.handle_line("deflag 2 0"),
            Reply::Board("- - -".to_string())
        );
        assert_eq!(
            session.handle_line("dig 0 0"),
            Reply::Board("  1 -".to_string())
        );
    }

    #[test]
    fn digging_a_mine_booms_once() {
        let session = board((2, 1), &[(1, 0)]).join(false);

        let reply = session.handle_line("dig 1 0");
        assert_eq!(reply, Reply::Boom);
        assert_eq!(reply.to_string(), BOOM_MESSAGE);
        assert!(session.should_close(&reply));

        assert_eq!(session.handle_line("dig 1 0"), Reply::Board("-  ".to_string()));
    }

    #[test]
    fn repeated_marks_still_render() {
        let session = board((2, 1), &[]).join(false);

        assert_eq!(session.handle_line("deflag 0 0"), Reply::Board("- -".to_string()));
        assert_eq!(session.handle_line("flag 0 0"), Reply::Board("F -".to_string()));
        assert_eq!(session.handle_line("flag 0 0"), Reply::Board("F -".to_string()));
    }

    #[test]
    fn debug_sessions_survive_a_boom() {
        let session = board((2, 1), &[(1, 0)]).join(true);
        assert!(session.is_debug());

        let reply = session.handle_line("dig 1 0");
        assert_eq!(reply, Reply::Boom);
        assert!(!session.should_close(&reply));
    }

    #[test]
    fn out_of_range_coordinates_are_no_ops() {
        let shared = board((2, 2), &[(0, 0)]);
        let session = shared.join(false);
        let before = shared.read(Field::clone);

        for line in [
            "dig -1 0",
            "dig 2 0",
            "flag 0 99",
            "deflag 300 1",
            "dig 99999999999 1",
            "dig 99999999999999999999 0",
            "flag 0 -99999999999999999999",
        ] {
            assert_eq!(
                session.handle_line(line),
                Reply::Board("- -\r\n- -".to_string()),
                "{}",
                line
            );
        }
        assert_eq!(shared.read(Field::clone), before);
    }

    #[test]
    fn malformed_lines_get_help() {
        let session = board((2, 2), &[]).join(false);

        for line in ["", "dance", "dig 1", "dig x y", "look 1 2"] {
            let reply = session.handle_line(line);
            assert_eq!(reply, Reply::Help, "{:?}", line);
            assert_eq!(reply.to_string(), HELP_MESSAGE);
            assert!(!session.should_close(&reply));
        }
    }

    #[test]
    fn bye_closes() {
        let session = board((1, 1), &[]).join(false);
        let reply = session.handle_line("bye");

        assert_eq!(reply, Reply::Bye);
        assert_eq!(reply.to_string(), BYE_MESSAGE);
        assert!(session.should_close(&reply));
    }

    #[test]
    fn sessions_see_each_others_moves() {
        let shared = board((3, 1), &[(2, 0)]);
        let alice = shared.join(false);
        let bob = shared.join(false);

        alice.handle_line("flag 1 0");

        assert_eq!(bob.handle_line("look"), Reply::Board("- F -".to_string()));
    }
}
