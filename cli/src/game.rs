use std::io::{self, BufRead, Write};
use std::str::FromStr;
use tilemerge_core::{Direction, GameError, GameSession, MoveOutcome, TileSource};

const HELP: &str = "\
Slide all tiles with w/a/s/d, h/j/k/l or up/down/left/right.
Two touching tiles with the same number merge into one.
Reach the target tile to win, the game ends when nothing can move.
r restarts, ? shows this help, q quits.";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Command {
    Move(Direction),
    Restart,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "r" | "restart" | "new" => Ok(Self::Restart),
            "?" | "help" => Ok(Self::Help),
            "q" | "quit" | "exit" => Ok(Self::Quit),
            other => other.parse().map(Self::Move),
        }
    }
}

/// Line-based front end driving a session.
pub(crate) struct Game<S, W> {
    session: GameSession<S>,
    out: W,
}

impl<S: TileSource, W: Write> Game<S, W> {
    pub(crate) fn new(session: GameSession<S>, out: W) -> Self {
        Self { session, out }
    }

    pub(crate) fn session(&self) -> &GameSession<S> {
        &self.session
    }

    /// Plays until `quit` or the end of the input.
    pub(crate) fn run(&mut self, input: impl BufRead) -> io::Result<()> {
        self.render()?;
        for line in input.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match line.parse::<Command>() {
                Ok(Command::Quit) => break,
                Ok(command) => self.handle(command)?,
                Err(err) => {
                    log::debug!("bad command {:?}: {}", line, err);
                    writeln!(self.out, "{err}, type ? for help")?;
                }
            }
        }
        self.out.flush()
    }

    fn handle(&mut self, command: Command) -> io::Result<()> {
        match command {
            Command::Move(direction) => self.play(direction),
            Command::Restart => {
                self.session.restart();
                self.render()
            }
            Command::Help => self.print_help(),
            Command::Quit => Ok(()),
        }
    }

    fn play(&mut self, direction: Direction) -> io::Result<()> {
        let outcome = match self.session.apply_move(direction) {
            Ok(outcome) => outcome,
            Err(GameError::AlreadyEnded) => {
                return writeln!(self.out, "The game is over, type r to play again.");
            }
            Err(err) => return writeln!(self.out, "{err}"),
        };
        if !outcome.has_update() {
            return writeln!(self.out, "Nothing moves {direction}");
        }

        self.render()?;
        match outcome {
            MoveOutcome::Won => writeln!(
                self.out,
                "You made {}! Keep going for a bigger tile.",
                self.session.config().target
            ),
            MoveOutcome::GameOver => writeln!(self.out, "Game over! Type r to play again."),
            _ => Ok(()),
        }
    }

    fn render(&mut self) -> io::Result<()> {
        let session = &self.session;
        let state = session.state();
        let status = if state.is_finished() {
            "  (game over)"
        } else if state.has_won() {
            "  (won)"
        } else {
            ""
        };
        writeln!(
            self.out,
            "Score: {}  Best: {}{}",
            session.score(),
            session.high_score(),
            status
        )?;
        writeln!(self.out, "{}", session.board())?;
        writeln!(self.out)
    }

    pub(crate) fn print_help(&mut self) -> io::Result<()> {
        writeln!(self.out, "{HELP}")?;
        writeln!(self.out)
    }
}
