use std::{
    fmt,
    io::{self, BufRead, Write},
};

use clap::{App, Arg};
use log::debug;
use once_cell::sync::Lazy;
use rand::Rng;
use regex::Regex;

use seabattle::{
    board::{CannotPlaceReason, Cell, Coordinate, ShotOutcome},
    game::{Game, PlaceShipError, Player, ShootError},
    ships::ShipClass,
};

/// Matcher for a placement command: two whitespace-separated coordinate
/// tokens, start and end.
static PLACEMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\S+)\s+(\S+)$").unwrap());

fn main() -> io::Result<()> {
    init_logging();
    let matches = App::new("Battleship")
        .version("1.0")
        .about("The classic game of Battleship for two players at one console.")
        .arg(
            Arg::with_name("no_gate")
                .short("n")
                .long("no-gate")
                .help("skip the pass-device prompt between players"),
        )
        .get_matches();
    let gate = !matches.is_present("no_gate");
    debug!("starting hotseat session, gate prompts {}", gate);

    let stdin = io::stdin();
    let mut input = InputReader::new(stdin.lock());
    let mut rng = rand::thread_rng();
    let mut game = Game::new();

    place_fleet(&mut game, Player::P1, &mut input, &mut rng)?;
    pass_device(gate, &mut input)?;
    place_fleet(&mut game, Player::P2, &mut input, &mut rng)?;

    while game.winner().is_none() {
        pass_device(gate, &mut input)?;
        take_turn(&mut game, &mut input)?;
    }
    Ok(())
}

/// Initialize the `log` facade from the `BATTLESHIP_LOG` environment
/// variable. Defaults to warnings only so the game transcript stays clean.
fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().filter_or("BATTLESHIP_LOG", "warn"))
        .init();
}

/// A parsed placement-phase command.
enum PlaceCmd {
    /// Place the pending ship on the run between the two coordinates.
    Run(Coordinate, Coordinate),
    /// Place the pending ship somewhere random.
    Random,
}

/// Drive one player through placing the whole fleet in order. Each ship is
/// re-prompted until its placement is accepted.
fn place_fleet(
    game: &mut Game,
    player: Player,
    input: &mut InputReader<impl BufRead>,
    rng: &mut impl Rng,
) -> io::Result<()> {
    println!("{}, place your ships on the game field", PlayerName(player));
    println!();
    show_board(game.board(player).iter_rows());
    while let Some(ship) = game.pending_ship(player) {
        println!(
            "Enter the coordinates of the {} ({} cells):",
            ship,
            ship.len()
        );
        loop {
            let cmd = input.read_input("", |line| {
                if line.eq_ignore_ascii_case("random") {
                    return Some(PlaceCmd::Random);
                }
                if let Some(caps) = PLACEMENT.captures(line) {
                    match (
                        caps[1].parse::<Coordinate>(),
                        caps[2].parse::<Coordinate>(),
                    ) {
                        (Ok(start), Ok(end)) => return Some(PlaceCmd::Run(start, end)),
                        _ => {}
                    }
                }
                println!("Error! You entered the wrong coordinates! Try again:");
                None
            })?;
            let placed = match cmd {
                PlaceCmd::Run(start, end) => game.place_ship(player, start, end),
                PlaceCmd::Random => match game.board(player).random_placement(ship, rng) {
                    Some((start, end)) => game.place_ship(player, start, end),
                    None => {
                        println!("Error! Couldn't find room for the {}. Try again:", ship);
                        continue;
                    }
                },
            };
            match placed {
                Ok(_) => break,
                Err(err) => println!("Error! {} Try again:", placement_message(ship, err)),
            }
        }
        println!();
        show_board(game.board(player).iter_rows());
    }
    Ok(())
}

/// Map a placement failure to the console message for it.
fn placement_message(ship: ShipClass, err: PlaceShipError) -> String {
    match err {
        PlaceShipError::Invalid(CannotPlaceReason::Misaligned) => "Wrong ship location!".into(),
        PlaceShipError::Invalid(CannotPlaceReason::WrongLength { .. }) => {
            format!("Wrong length of the {}!", ship)
        }
        PlaceShipError::Invalid(CannotPlaceReason::TooClose) => {
            "You placed it too close to another one.".into()
        }
        PlaceShipError::Invalid(CannotPlaceReason::OutOfBounds) => {
            "You entered the wrong coordinates!".into()
        }
        // The placement loop only runs while a ship is pending.
        PlaceShipError::FleetComplete => unreachable!(),
    }
}

/// One full shooting turn: show both views, prompt for a target, resolve the
/// shot. Invalid coordinates re-prompt without passing the turn.
fn take_turn(game: &mut Game, input: &mut InputReader<impl BufRead>) -> io::Result<()> {
    let shooter = game.current();
    show_board(
        game.board(shooter.opponent())
            .iter_rows()
            .map(|row| row.map(Cell::masked)),
    );
    println!("---------------------");
    show_board(game.board(shooter).iter_rows());
    println!("{}, it's your turn:", PlayerName(shooter));
    loop {
        let target = input.read_input("", |line| match line.parse::<Coordinate>() {
            Ok(coord) => Some(coord),
            Err(_) => {
                println!("Error! You entered the wrong coordinates! Try again:");
                None
            }
        })?;
        match game.shoot(target) {
            Ok(outcome) => {
                announce(outcome);
                return Ok(());
            }
            Err(ShootError::Invalid(_)) => {
                println!("Error! You entered the wrong coordinates! Try again:");
            }
            // The main loop only reaches here between placement and victory.
            Err(ShootError::PlacementIncomplete) | Err(ShootError::AlreadyOver) => unreachable!(),
        }
    }
}

/// Print the outcome line for a resolved shot.
fn announce(outcome: ShotOutcome) {
    match outcome {
        ShotOutcome::Miss => println!("You missed!"),
        ShotOutcome::Hit => println!("You hit a ship!"),
        ShotOutcome::Sunk => println!("You sank a ship!"),
        ShotOutcome::Victory => {
            println!("You sank the last ship. You won. Congratulations!")
        }
    }
}

/// Blocking gate so the device can change hands without leaking the view.
fn pass_device(gate: bool, input: &mut InputReader<impl BufRead>) -> io::Result<()> {
    if gate {
        println!("Press Enter and pass the move to another player");
        input.read_input("", |_| Some(()))?;
    }
    Ok(())
}

/// Print a board with the 1-10 column header and A-J row labels.
fn show_board(rows: impl Iterator<Item = impl Iterator<Item = Cell>>) {
    println!("  1 2 3 4 5 6 7 8 9 10");
    for (i, row) in rows.enumerate() {
        print!("{}", (b'A' + i as u8) as char);
        for cell in row {
            print!(" {}", CellGlyph(cell));
        }
        println!();
    }
}

/// Display helper mapping a cell to its board glyph.
struct CellGlyph(Cell);

impl fmt::Display for CellGlyph {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(match self.0 {
            Cell::Empty => "~",
            Cell::Ship => "O",
            Cell::Hit => "X",
            Cell::Miss => "M",
        })
    }
}

/// Display helper that prints the player's seat name.
struct PlayerName(Player);

impl fmt::Display for PlayerName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(match self.0 {
            Player::P1 => "Player 1",
            Player::P2 => "Player 2",
        })
    }
}

/// Helper to read input from the players.
struct InputReader<B> {
    read: B,
    buf: String,
}

impl<B> InputReader<B> {
    fn new(read: B) -> Self {
        Self {
            read,
            buf: String::new(),
        }
    }
}

impl<B: BufRead> InputReader<B> {
    /// Repeatedly tries to read input until the input checker returns `Some`.
    fn read_input<F, T>(&mut self, prompt: &str, mut checker: F) -> io::Result<T>
    where
        F: FnMut(&str) -> Option<T>,
    {
        loop {
            self.read_input_inner(prompt)?;
            if let Some(val) = checker(self.buf.trim()) {
                return Ok(val);
            }
        }
    }

    /// Helper to print the prompt, clear the string buffer and read a line.
    fn read_input_inner(&mut self, prompt: &str) -> io::Result<()> {
        if !prompt.is_empty() {
            print!("{} ", prompt);
        }
        io::stdout().flush()?;
        self.buf.clear();
        if self.read.read_line(&mut self.buf)? == 0 {
            println!();
            std::process::exit(0);
        }
        Ok(())
    }
}
