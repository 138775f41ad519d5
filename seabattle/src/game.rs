//! The coordinator that drives two boards through a full game.
//!
//! The game owns both boards; players reach the opposing board only through
//! it. All input parsing and prompting belongs to the caller, which feeds
//! parsed coordinates in and retries the same action whenever an error comes
//! back.

use log::info;
use thiserror::Error;

use crate::{
    board::{Board, CannotPlaceReason, CannotShootReason, Coordinate, ShotOutcome},
    ships::ShipClass,
};

/// Player ID. Either `P1` or `P2`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Player {
    P1,
    P2,
}

impl Player {
    /// Get the opponent of this player.
    pub fn opponent(self) -> Self {
        match self {
            Player::P1 => Player::P2,
            Player::P2 => Player::P1,
        }
    }

    /// Index of this player's board in the game-owned pair.
    fn index(self) -> usize {
        match self {
            Player::P1 => 0,
            Player::P2 => 1,
        }
    }
}

/// Phase of the game's lifecycle.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Phase {
    /// One or both players are still placing ships.
    Placement,
    /// Both fleets are placed; players alternate shots.
    Shooting,
    /// One fleet has been destroyed.
    Over,
}

/// Reason why a ship could not be placed through the game.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum PlaceShipError {
    /// The player has already placed every ship in the fleet.
    #[error("every ship in the fleet is already placed")]
    FleetComplete,
    /// The board rejected the placement.
    #[error(transparent)]
    Invalid(#[from] CannotPlaceReason),
}

/// Reason why a shot could not be delivered.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum ShootError {
    /// One or both players are still placing ships.
    #[error("both fleets must be placed before shooting")]
    PlacementIncomplete,
    /// The game has already been won.
    #[error("the game is already over")]
    AlreadyOver,
    /// The board rejected the shot.
    #[error(transparent)]
    Invalid(#[from] CannotShootReason),
}

/// A game of Battleship between two players.
///
/// Drives the phase sequence: each player places the fleet in order, then
/// shots alternate until one fleet is destroyed. Every operation either
/// succeeds and advances the game or fails and leaves it untouched, so the
/// caller can always re-prompt for the same action.
pub struct Game {
    /// The two boards, indexed by player.
    boards: [Board; 2],
    /// Per-player count of placed ships, indexing into [`ShipClass::ALL`].
    placed: [usize; 2],
    /// The player who shoots next.
    current: Player,
    /// Set once a shot destroys the last ship of a fleet.
    winner: Option<Player>,
}

impl Game {
    /// Create a game with two empty boards, ready for ship placement.
    pub fn new() -> Self {
        Self {
            boards: [Board::new(), Board::new()],
            placed: [0; 2],
            current: Player::P1,
            winner: None,
        }
    }

    /// Get the current phase.
    pub fn phase(&self) -> Phase {
        if self.winner.is_some() {
            Phase::Over
        } else if self.placed.iter().all(|&n| n == ShipClass::ALL.len()) {
            Phase::Shooting
        } else {
            Phase::Placement
        }
    }

    /// The player who shoots next.
    pub fn current(&self) -> Player {
        self.current
    }

    /// The winner, once a fleet has been destroyed.
    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    /// Get the given player's own board.
    pub fn board(&self, player: Player) -> &Board {
        &self.boards[player.index()]
    }

    /// The next ship `player` has to place, if any remain.
    pub fn pending_ship(&self, player: Player) -> Option<ShipClass> {
        ShipClass::ALL.get(self.placed[player.index()]).copied()
    }

    /// Place the player's next pending ship on the run from `start` to
    /// `end`, returning the class that was placed. Nothing changes on error;
    /// the caller retries the same ship.
    pub fn place_ship(
        &mut self,
        player: Player,
        start: Coordinate,
        end: Coordinate,
    ) -> Result<ShipClass, PlaceShipError> {
        let ship = self
            .pending_ship(player)
            .ok_or(PlaceShipError::FleetComplete)?;
        self.boards[player.index()].place_ship(ship, start, end)?;
        self.placed[player.index()] += 1;
        if self.phase() == Phase::Shooting {
            info!("both fleets placed, shooting begins");
        }
        Ok(ship)
    }

    /// Deliver the current player's shot to the opponent's board, then pass
    /// the turn. A [`ShotOutcome::Victory`] records the shooter as the
    /// winner. Errors leave the turn with the same player.
    pub fn shoot(&mut self, target: Coordinate) -> Result<ShotOutcome, ShootError> {
        match self.phase() {
            Phase::Placement => return Err(ShootError::PlacementIncomplete),
            Phase::Over => return Err(ShootError::AlreadyOver),
            Phase::Shooting => {}
        }
        let shooter = self.current;
        let outcome = self.boards[shooter.opponent().index()].receive_shot(target)?;
        if outcome == ShotOutcome::Victory {
            self.winner = Some(shooter);
            info!("{:?} destroyed the last enemy ship", shooter);
        }
        self.current = shooter.opponent();
        Ok(outcome)
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
