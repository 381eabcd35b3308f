pub mod cli;
pub mod commands;
pub mod driver;
pub mod injector;
pub mod logging;
pub mod table;
