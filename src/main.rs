// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use std::path::PathBuf;

use purse::{cli, commands, dataset::Dataset, db};

fn main() -> Result<()> {
    env_logger::init();

    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let path = match matches.get_one::<PathBuf>("db") {
        Some(p) => p.clone(),
        None => db::db_path()?,
    };
    let mut conn = db::open_at(&path)?;
    log::debug!("Using storage at {}", path.display());

    let dataset = Dataset::bundled()?;
    let mut app = db::load_app(&conn, &dataset)?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Storage initialized at {}", path.display());
        }
        Some(("account", sub)) => commands::accounts::handle(&mut app, sub)?,
        Some(("tx", sub)) => commands::transactions::handle(&mut app, sub)?,
        Some(("total", sub)) => commands::reports::handle(&app, sub)?,
        Some(("fx", sub)) => commands::fx::handle(&mut app, sub)?,
        Some(("doctor", _)) => commands::doctor::handle(&app)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }

    db::save_app(&mut conn, &mut app)?;
    Ok(())
}
