mod compact;
mod create_show;
mod help;
mod list;
mod prune;
