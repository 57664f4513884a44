pub mod api;
pub mod commentary;
pub mod elo;
pub mod error;
pub mod match_sim;
pub mod model;
pub mod predict;
pub mod projection;
pub mod season_sim;
pub mod standings;
