//! different utility modules used throughout the project
/// TOML configuration of the engine (calculus defaults, graphing window, angle mode, logging)
pub mod config;
/// tiny module to initialise terminal and file logging
pub mod logger;
/// translate calculator keypad text (×, ÷, π, √, degrees) into parser syntax
pub mod normalize;
/// colour cycle for plotted equations
pub mod palette;
