pub mod commands;
pub mod foundation_safety;
pub mod game_mode;
pub mod session;
