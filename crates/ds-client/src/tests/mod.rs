mod commands;
mod conventions;
