// Copyright (C) 2026 Michael Wilson <mike@mdwn.dev>
//
// This program is free software: you can redistribute it and/or modify it under
// the terms of the GNU General Public License as published by the Free Software
// Foundation, version 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//
use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use clap::{crate_version, Parser, Subcommand};
use loopswitch::config::{self, Pedal};
use loopswitch::midi;
use loopswitch::presets::PresetTable;
use tracing::info;

const SYSTEMD_SERVICE: &str = r#"
[Unit]
Description=loop switcher

[Service]
Type=simple
Restart=on-failure
EnvironmentFile=-/etc/default/loopswitch
ExecStart=/usr/local/bin/loopswitch start "$LOOPSWITCH_CONFIG"

[Install]
WantedBy=multi-user.target
Alias=loopswitch.service
"#;

#[derive(Parser)]
#[clap(
    author = "Michael Wilson",
    version = crate_version!(),
    about = "A foot controller for effects loops."
)]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start will run the pedal until interrupted.
    Start {
        /// The path to the pedal config.
        config_path: String,
    },
    /// Prints the stored preset table as YAML.
    Presets {
        /// The path to the pedal config.
        config_path: String,
    },
    /// Replaces the stored preset table with one read from a YAML file.
    ImportPresets {
        /// The path to the pedal config.
        config_path: String,
        /// The YAML file holding the preset table.
        file: String,
    },
    /// Turns every loop off in every stored preset.
    ClearPresets {
        /// The path to the pedal config.
        config_path: String,
    },
    /// Lists the available MIDI output devices.
    MidiDevices {},
    /// Prints a systemd service definition to stdout.
    Systemd {},
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Start { config_path } => {
            let config = Pedal::deserialize(&PathBuf::from(config_path))?;
            let poll_interval = config.timing().poll_interval()?;
            let mut pedal = config::init_pedal(&config)?;

            let shutdown = Arc::new(AtomicBool::new(false));
            let run_shutdown = Arc::clone(&shutdown);
            let run = tokio::task::spawn_blocking(move || pedal.run(poll_interval, run_shutdown));

            tokio::signal::ctrl_c().await?;
            info!("Interrupted, stopping the pedal.");
            shutdown.store(true, Ordering::Relaxed);
            run.await?;
        }
        Commands::Presets { config_path } => {
            let config = Pedal::deserialize(&PathBuf::from(config_path))?;
            let table = config::load_presets(&config)?;

            print!("{}", serde_yml::to_string(&table)?);
        }
        Commands::ImportPresets { config_path, file } => {
            let config = Pedal::deserialize(&PathBuf::from(config_path))?;
            let table: PresetTable = serde_yml::from_str(&fs::read_to_string(&file)?)?;

            config::save_presets(&config, &table)?;
            println!("{}", table);
        }
        Commands::ClearPresets { config_path } => {
            let config = Pedal::deserialize(&PathBuf::from(config_path))?;

            config::save_presets(&config, &PresetTable::default())?;
            println!("Presets cleared.");
        }
        Commands::MidiDevices {} => {
            let devices = midi::list_devices()?;

            if devices.is_empty() {
                println!("No devices found.");
                return Ok(());
            }

            println!("Devices:");
            for device in devices {
                println!("- {}", device);
            }
        }
        Commands::Systemd {} => {
            println!("{}", SYSTEMD_SERVICE)
        }
    }

    Ok(())
}
