// SPDX-License-Identifier: MIT OR Apache-2.0

//! Goban CLI - hot-seat Go on the terminal
//!
//! Both players share one terminal. Moves are entered as labels such as
//! `D4`; once both players pass, stones are marked dead or alive until both
//! agree to the score.

mod render;

use anyhow::{anyhow, bail, Result};
use clap::Parser;
use goban_core::sgf::SgfWriter;
use goban_core::wire::{Failure, MoveResponse, PassResponse, ResignResponse, ScoringResponse};
use goban_core::{
    apply_move, finish_scoring, mark_dead, pass_turn, resign, BoardSize, Color, Coord, Game,
    GameConfig, GameError, GameId, GameStore, MemoryStore, Notification, Notifier,
    PlacementRules, StoreError, Transition,
};
use std::io::{self, BufRead, Write};
use tracing_subscriber::EnvFilter;

/// Command-line arguments
#[derive(Parser, Debug)]
#[clap(name = "goban", about = "Hot-seat Go on the terminal", version)]
struct Args {
    /// Board size (19, 13 or 9)
    #[clap(short, long, default_value = "19")]
    size: u8,

    /// Handicap stones for Black (0 or 2-9)
    #[clap(long, default_value = "0")]
    handicap: u8,

    /// Komi for White (6.5, 5.5, 0.5, -4.5 or -5.5)
    #[clap(short, long, default_value = "6.5", allow_hyphen_values = true)]
    komi: f32,

    /// Place 6 and 8 stone handicaps the old way, including the centre
    #[clap(long)]
    legacy_handicap: bool,

    /// Black player's name
    #[clap(long, default_value = "Black")]
    black: String,

    /// White player's name
    #[clap(long, default_value = "White")]
    white: String,

    /// Enable debug logging
    #[clap(long)]
    debug: bool,
}

impl Args {
    /// Translate the values given on the command line into menu indices
    fn config(&self) -> Result<GameConfig> {
        let size = BoardSize::from_edge(self.size)
            .ok_or_else(|| anyhow!("Invalid board size. Must be 9, 13, or 19."))?;
        let handicap = goban_core::Handicap::MENU
            .iter()
            .position(|&stones| stones == self.handicap)
            .ok_or_else(|| anyhow!("Invalid handicap. Must be 0 or between 2 and 9."))?;
        let komi = goban_core::Komi::MENU
            .iter()
            .position(|&value| value == self.komi)
            .ok_or_else(|| anyhow!("Invalid komi. Must be one of 6.5, 5.5, 0.5, -4.5, -5.5."))?;
        let rules = if self.legacy_handicap {
            PlacementRules::Legacy
        } else {
            PlacementRules::CenterSkip
        };

        Ok(GameConfig::from_indices(size.index(), handicap, komi, rules)?)
    }

    fn name(&self, color: Color) -> &str {
        match color {
            Color::White => &self.white,
            _ => &self.black,
        }
    }
}

/// A line typed at the prompt
#[derive(Debug, Clone, Copy, PartialEq)]
enum Command {
    Place(Coord),
    Pass,
    Resign,
    Dead(Coord),
    Alive(Coord),
    Done,
    Switch,
    Sgf,
    Json,
    Help,
    Quit,
}

const HELP: &str = "\
Commands:
  D4            place a stone
  pass          pass the turn
  resign        resign the game
  dead D4       mark the group at D4 dead (scoring)
  alive D4      mark the group at D4 alive (scoring)
  done          agree to the current score (scoring)
  switch        score as the other player (scoring)
  sgf           print the game record
  json          print the last response payload
  quit          leave";

/// Parse a command
fn parse_command(input: &str, size: BoardSize) -> Result<Command> {
    let input = input.trim().to_lowercase();
    let mut words = input.split_whitespace();
    let first = words.next().ok_or_else(|| anyhow!("Empty command"))?;
    let argument = words.next();

    let command = match (first, argument) {
        ("pass", None) => Command::Pass,
        ("resign", None) => Command::Resign,
        ("done", None) => Command::Done,
        ("switch", None) => Command::Switch,
        ("sgf", None) => Command::Sgf,
        ("json", None) => Command::Json,
        ("help", None) | ("?", None) => Command::Help,
        ("quit", None) | ("exit", None) => Command::Quit,
        ("dead", Some(label)) => Command::Dead(Coord::parse_label(label, size)?),
        ("alive", Some(label)) => Command::Alive(Coord::parse_label(label, size)?),
        (label, None) => Command::Place(Coord::parse_label(label, size)?),
        _ => bail!("Unknown command '{}'. Type 'help' for a list.", input),
    };
    if words.next().is_some() {
        bail!("Too many words in '{}'", input);
    }
    Ok(command)
}

/// Prints notifications for the player who is about to take the keyboard
struct ConsoleNotifier<'a> {
    args: &'a Args,
}

impl Notifier for ConsoleNotifier<'_> {
    fn notify(&self, notification: &Notification) {
        let opponent = self.args.name(notification.recipient.opposite());
        println!(
            "\n[to {}] {}\n  {}",
            self.args.name(notification.recipient),
            notification.subject(opponent),
            notification.body(opponent)
        );
    }
}

/// Interactive session state
struct Session<'a> {
    args: &'a Args,
    store: MemoryStore,
    id: GameId,
    /// Player marking stones while scoring
    scorer: Color,
    /// Last wire payload, as JSON
    last_response: String,
}

impl<'a> Session<'a> {
    fn new(args: &'a Args, config: GameConfig) -> Result<Self> {
        let game = Game::new(config);
        let id = game.id();
        let store = MemoryStore::new();
        store.create(game)?;
        Ok(Self {
            args,
            store,
            id,
            scorer: Color::Black,
            last_response: String::from("{}"),
        })
    }

    fn game(&self) -> Result<Game> {
        Ok(self.store.load(self.id)?)
    }

    /// Run one command; returns false when the session should end
    fn execute(&mut self, command: Command) -> Result<bool> {
        let game = self.game()?;
        let number = game.move_number();
        // While scoring the keyboard belongs to the scorer, not the mover
        let actor = if game.is_scoring() {
            self.scorer
        } else {
            game.state().whose_move()
        };

        let result = match command {
            Command::Place(at) => self.store.apply(self.id, |g| apply_move(g, at, actor, number)),
            Command::Pass => self.store.apply(self.id, |g| pass_turn(g, actor, number)),
            Command::Resign => self
                .store
                .apply(self.id, |g| resign(g, actor, g.move_number())),
            Command::Dead(at) => {
                let owner = game.state().board().get(at).opposite();
                self.store.apply(self.id, |g| mark_dead(g, at, owner, actor))
            }
            Command::Alive(at) => self
                .store
                .apply(self.id, |g| mark_dead(g, at, Color::None, actor)),
            Command::Done => {
                let scoring_number = game.state().scoring_number().unwrap_or_default();
                self.store
                    .apply(self.id, |g| finish_scoring(g, actor, scoring_number))
            }
            Command::Switch => {
                self.scorer = self.scorer.opposite();
                return Ok(true);
            }
            Command::Sgf => {
                let sgf = SgfWriter::new(&game)
                    .black_name(&self.args.black)
                    .white_name(&self.args.white)
                    .date(chrono::Local::now().date_naive())
                    .write()?;
                println!("{}", sgf);
                return Ok(true);
            }
            Command::Json => {
                println!("{}", self.last_response);
                return Ok(true);
            }
            Command::Help => {
                println!("{}", HELP);
                return Ok(true);
            }
            Command::Quit => return Ok(false),
        };

        match result {
            Ok(transition) => self.accepted(command, actor, &transition)?,
            Err(StoreError::Rejected(err)) => self.rejected(&err)?,
            Err(err) => return Err(err.into()),
        }
        Ok(true)
    }

    fn accepted(&mut self, command: Command, actor: Color, transition: &Transition) -> Result<()> {
        let game = &transition.game;
        tracing::debug!(?command, %actor, events = transition.events.len(), "Accepted");

        self.last_response = match command {
            Command::Place(_) => serde_json::to_string_pretty(&MoveResponse::from_game(game))?,
            Command::Pass => serde_json::to_string_pretty(&PassResponse::from_game(game))?,
            Command::Resign => serde_json::to_string_pretty(&ResignResponse::from_game(game))?,
            _ => serde_json::to_string_pretty(&ScoringResponse::for_player(game, actor, "OK"))?,
        };

        if let Some(notification) = Notification::for_transition(transition, actor) {
            ConsoleNotifier { args: self.args }.notify(&notification);
        }

        // Hand the scoring keyboard to whoever has not agreed yet
        if game.is_scoring() {
            if command == Command::Pass {
                self.scorer = game.state().whose_move();
            } else if command == Command::Done {
                self.scorer = actor.opposite();
            }
        }
        Ok(())
    }

    fn rejected(&mut self, err: &GameError) -> Result<()> {
        tracing::debug!(%err, "Rejected");
        eprintln!("{}", err);
        self.last_response = serde_json::to_string_pretty(&Failure::from(err))?;
        Ok(())
    }

    fn print(&self) -> Result<()> {
        let game = self.game()?;
        let state = game.state();
        println!("\n{}", render::render_board(state.board()));
        println!("{}", render::render_status(state));

        if game.is_finished() {
            let winner = state.winner();
            println!("Game over: {} ({}) wins.", self.args.name(winner), winner);
        } else if game.is_scoring() {
            print!("{} scoring> ", self.args.name(self.scorer));
        } else {
            let mover = state.whose_move();
            print!("{} ({}) to move> ", self.args.name(mover), mover);
        }
        io::stdout().flush()?;
        Ok(())
    }
}

fn init_logging(debug: bool) {
    let default = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Main entry point
fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.debug);

    let config = args.config()?;
    tracing::info!(size = args.size, handicap = args.handicap, komi = args.komi, "Starting game");

    let mut session = Session::new(&args, config)?;
    println!(
        "{} (black) {} against {} (white). Type 'help' for commands.",
        args.black,
        config.handicap.description(),
        args.white
    );
    session.print()?;

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            session.print()?;
            continue;
        }

        match parse_command(&line, config.size) {
            Ok(command) => {
                if !session.execute(command)? {
                    break;
                }
            }
            Err(e) => eprintln!("{}", e),
        }
        session.print()?;
    }

    Ok(())
}
