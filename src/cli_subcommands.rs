mod config;

pub(crate) use self::config::ConfigCommands;
