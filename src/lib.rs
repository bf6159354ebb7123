pub mod bootstrap_fetch;
pub mod csv_export;
pub mod error;
pub mod http_client;
pub mod player_table;
pub mod position_views;
pub mod scaling;
pub mod snapshot;
pub mod state;
pub mod team_stats;
pub mod watchlists;
