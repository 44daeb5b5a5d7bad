use args::ColorsArgs;
use clap::Parser;
use log::LevelFilter;
use simplelog::{Config, WriteLogger};
use std::fs::File;

mod action;
mod args;
mod audio;
mod color;
mod config;
mod game;
mod input_state;
mod phrases;
mod question;
mod round;
mod screen;
mod settings;
mod speech;
mod ui;
mod util;
mod widgets;

fn main() -> color_eyre::Result<()> {
    let args = ColorsArgs::parse().clamped();
    // the terminal belongs to the ui, so logs go to a file
    WriteLogger::init(
        LevelFilter::Info,
        Config::default(),
        File::create(&args.log_file)?,
    )?;
    log::info!("starting with {args:?}");
    ui::main(args)
}
