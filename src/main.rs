use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use std::io::{stdin, stdout, Write};
use std::path::Path;
use std::thread;
use std::time::Duration;

use connect4_ai::{
    config::{GameConfig, Mode, CONFIG_PATH},
    controller::AiController,
    game::{GameState, Status},
    save::{new_game_id, SavedGame},
};

mod display;

/// Polling interval while the computer is thinking
const FRAME: Duration = Duration::from_millis(16);

/// Pause before each move when the computer plays both sides
const SPECTATOR_DELAY: Duration = Duration::from_millis(500);

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    println!("Welcome to Connect 4\n");

    let mut config = match GameConfig::load_or_create(CONFIG_PATH) {
        Ok(config) => config,
        Err(err) => {
            warn!("{:#}", err);
            println!("Error reading {}, using the default settings", CONFIG_PATH);
            GameConfig::default()
        }
    };

    // choose the number of human players
    loop {
        let input = prompt("How many human players? 0/1/2: ")?;
        match input.parse::<usize>().ok().and_then(Mode::from_humans) {
            Some(mode) => {
                config.mode = mode;
                break;
            }
            None => println!("Unknown answer given"),
        }
    }

    Session::new(config)?.run()
}

fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    stdout().flush().expect("failed to flush to stdout!");
    let mut buffer = String::new();
    stdin().read_line(&mut buffer)?;
    Ok(buffer.trim().to_lowercase())
}

struct Session {
    config: GameConfig,
    controller: AiController,
    game: GameState,
    game_id: String,
}

impl Session {
    fn new(config: GameConfig) -> Result<Self> {
        let shape = config.shape()?;
        Ok(Self {
            config,
            controller: AiController::new(config.mode, config.strategy(), shape.columns()),
            game: GameState::new(shape, config.starting_player),
            game_id: new_game_id(),
        })
    }

    fn run(&mut self) -> Result<()> {
        // game loop
        loop {
            display::draw_board(&self.game)?;

            let status = self.game.status().clone();
            match status {
                Status::Won { player, .. } => println!("{} wins!", player),
                Status::Draw => println!("Draw!"),
                Status::Playing if self.controller.is_computer_turn(&self.game) => {
                    self.computer_turn()?;
                    continue;
                }
                Status::Playing => {}
            }

            let input = prompt(&format!(
                "Move input 1-{} (u undo, r redo, s save, l load, n new, d difficulty, p settings, q quit) > ",
                self.game.board().cols()
            ))?;
            match input.as_str() {
                "q" => return Ok(()),
                "u" => self.undo(),
                "r" => {
                    if self.game.redo().is_none() {
                        println!("Nothing to redo");
                    }
                }
                "s" => {
                    let save = SavedGame::capture(&self.game_id, &self.config, &self.game);
                    match save.write_to(".") {
                        Ok(path) => println!("Game saved to {}", path.display()),
                        Err(err) => println!("Error saving: {:#}", err),
                    }
                }
                "l" => self.load_latest(),
                "n" => self.new_game()?,
                "d" => {
                    self.config.difficulty = self.config.difficulty.next();
                    self.controller.set_strategy(self.config.strategy());
                    self.save_config();
                    println!("Difficulty: {}", self.config.difficulty);
                }
                "p" => {
                    self.settings()?;
                    self.new_game()?;
                }
                _ => match input.parse::<usize>() {
                    Ok(column) if column >= 1 => {
                        if let Err(err) = self.game.apply_move(column - 1) {
                            println!("{}", err);
                        }
                    }
                    _ => println!("Invalid input: {}", input),
                },
            }
        }
    }

    fn computer_turn(&mut self) -> Result<()> {
        if self.config.mode == Mode::ComputerOnly {
            thread::sleep(SPECTATOR_DELAY);
        }
        println!("{} ({}) is thinking...", self.game.turn(), self.config.difficulty);

        let progress_bar = ProgressBar::new(100);
        progress_bar.set_style(
            ProgressStyle::default_bar()
                .template("{bar:40.cyan/blue} {pos:>3}% {msg}")
                .progress_chars("█▓▒░  "),
        );

        let played = loop {
            if let Some(played) = self.controller.update(&mut self.game) {
                break Some(played);
            }
            if !self.controller.is_computing() {
                break None;
            }
            let progress = self.controller.progress();
            progress_bar.set_position(progress.percent as u64);
            if let Some(column) = progress.current_column {
                progress_bar.set_message(&format!("column {}", column + 1));
            }
            thread::sleep(FRAME);
        };
        progress_bar.finish_and_clear();

        display::draw_scores(&self.controller.progress())?;
        match played {
            Some(played) => println!("Best move: {}", played.column + 1),
            None => {
                // hand the turn to a human rather than retrying forever
                println!("The computer could not move, switching to two players");
                self.config.mode = Mode::TwoPlayers;
                self.controller = AiController::new(
                    self.config.mode,
                    self.config.strategy(),
                    self.game.board().cols(),
                );
            }
        }
        Ok(())
    }

    fn undo(&mut self) {
        if self.game.undo().is_none() {
            println!("Nothing to undo");
            return;
        }
        // take back the computer's reply as well so a human is to move
        while self.config.mode == Mode::VersusComputer
            && self.controller.is_computer_turn(&self.game)
            && self.game.undo().is_some()
        {}
    }

    fn new_game(&mut self) -> Result<()> {
        self.game = self.controller.reset_game(
            self.config.shape()?,
            self.config.mode,
            self.config.strategy(),
            self.config.starting_player,
        );
        self.game_id = new_game_id();
        Ok(())
    }

    fn load_latest(&mut self) {
        let loaded = SavedGame::latest_in(".").and_then(|latest| match latest {
            Some(path) => Ok(Some(SavedGame::read(&path)?)),
            None => Ok(None),
        });
        let save = match loaded {
            Ok(Some(save)) => save,
            Ok(None) => {
                println!("No saved game found");
                return;
            }
            Err(err) => {
                println!("Error loading: {:#}", err);
                return;
            }
        };

        match save.restore() {
            Ok(game) => {
                self.controller.discard_search(game.board().cols());
                self.controller = AiController::new(
                    save.config.mode,
                    save.config.strategy(),
                    game.board().cols(),
                );
                self.config = save.config;
                self.game = game;
                self.game_id = save.id;
                println!("Game loaded");
            }
            // the current game is kept
            Err(err) => println!("Error loading: {}", err),
        }
    }

    fn settings(&mut self) -> Result<()> {
        loop {
            println!(
                "Rows: {}  Columns: {}  Starting player: {}  Difficulty: {}  Parallel search: {}",
                self.config.rows,
                self.config.columns,
                self.config.starting_player.number(),
                self.config.difficulty,
                self.config.parallel_search
            );
            let input = prompt(
                "w/s more/fewer rows, d/a more/fewer columns, j switch starting player, k difficulty, m parallel, enter to return > ",
            )?;
            match input.as_str() {
                "w" => self.config.adjust_rows(1),
                "s" => self.config.adjust_rows(-1),
                "d" => self.config.adjust_columns(1),
                "a" => self.config.adjust_columns(-1),
                "j" => self.config.toggle_starting_player(),
                "k" => self.config.difficulty = self.config.difficulty.next(),
                "m" => self.config.parallel_search = !self.config.parallel_search,
                "" => break,
                _ => println!("Unknown answer given"),
            }
        }
        self.save_config();
        Ok(())
    }

    fn save_config(&self) {
        if let Err(err) = self.config.save(Path::new(CONFIG_PATH)) {
            println!("Error saving settings: {:#}", err);
        }
    }
}
