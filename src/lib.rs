//! A simulator of many games of Monopoly between players with
//! configurable strategies, with statistics on who survives.

pub mod analysis;
pub mod config;
pub mod game;
