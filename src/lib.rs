/* lib.rs
 *
 * Copyright 2026 emviolet
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see <https://www.gnu.org/licenses/>.
 *
 * SPDX-License-Identifier: GPL-3.0-or-later
 */

//! Rules engine for Klondike, FreeCell and Spider solitaire: card and pile
//! model, move legality, seeded deals, move history, win detection and
//! JSON snapshots for undo/redo.

pub mod config;
pub mod deck;
pub mod engine;
pub mod game;

pub use config::{ConfigError, EngineConfig};
pub use deck::Deck;
pub use engine::commands::EngineCommand;
pub use engine::game_mode::VariantRuntime;
pub use engine::session::Session;
pub use game::{
    Card, CardGame, DrawMode, FreecellGame, GameMode, KlondikeGame, SnapshotError, SpiderGame,
    SpiderSuitMode, Suit,
};
