/*
 *  main.rs
 *
 *  dispswitch - sunxi display mode switcher
 *	(c) 2026 dispswitch authors
 *
 *	This program is free software: you can redistribute it and/or modify
 *	it under the terms of the GNU General Public License as published by
 *	the Free Software Foundation, either version 3 of the License, or
 *	(at your option) any later version.
 *
 *	This program is distributed in the hope that it will be useful,
 *	but WITHOUT ANY WARRANTY; without even the implied warranty of
 *	MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *	GNU General Public License for more details.
 *
 *	See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *	Public License.
 *
 */

use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{CommandFactory, FromArgMatches};
use env_logger::Env;
use log::debug;

use dispswitch::config::{self, Cli};
use dispswitch::dispatch;
use dispswitch::display::{DisplayContext, DisplayError};

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

fn main() -> ExitCode {
    let matches = Cli::command().long_version(LONG_VERSION).get_matches();
    let cli = match Cli::from_arg_matches(&matches) {
        Ok(cli) => cli,
        Err(e) => e.exit(),
    };

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            match e.downcast_ref::<DisplayError>() {
                Some(display) => {
                    if let Some(hint) = display.hint() {
                        eprintln!("{}", hint);
                    }
                    ExitCode::from(display.exit_code())
                }
                None => ExitCode::FAILURE,
            }
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let cfg = config::load(&cli).context("loading configuration")?;
    if cli.dump_config {
        print!("{}", config::dump(&cfg)?);
        return Ok(());
    }

    let level = cfg.log_level.clone().unwrap_or_else(|| "info".to_string());
    env_logger::Builder::from_env(Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
    debug!("{} v.{} built {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"), BUILD_DATE);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if !cli.command.needs_hardware() {
        return dispatch::print_modes(&mut out);
    }

    let settings = cfg.settings();
    debug!("effective settings: {:?}", settings);
    let mut ctx = DisplayContext::open(settings)?;
    dispatch::run(&mut ctx, cli.command, &mut out)?;
    out.flush().context("flushing stdout")?;
    Ok(())
}
