use std::error::Error;

use clap::{Parser, Subcommand};

use crate::drivers::dualsense_edge::{
    driver::Driver,
    hid_report::LABEL_MAX_CHARS,
    profile::{Profile, SLIDER_NEUTRAL},
    ProfileSlot,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the controller hidraw device. Discovered by vendor and
    /// product id when omitted.
    #[arg(long, global = true)]
    pub device: Option<String>,
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Create a profile, overriding the slot if it is already in use
    Create {
        /// Profile slot: 0 = FN + Square, 1 = FN + Cross, 2 = FN + Circle
        #[arg(value_parser = clap::value_parser!(u8).range(0..=2))]
        slot: u8,
        /// Profile name, at most 40 characters
        name: String,
    },
    /// Delete the profile stored in a slot
    Delete {
        /// Profile slot: 0 = FN + Square, 1 = FN + Cross, 2 = FN + Circle
        #[arg(value_parser = clap::value_parser!(u8).range(0..=2))]
        slot: u8,
    },
}

pub fn main_cli(args: Args) -> Result<(), Box<dyn Error + Send + Sync>> {
    let driver = match args.device {
        Some(path) => Driver::open_path(path)?,
        None => Driver::new()?,
    };

    match args.cmd {
        Commands::Create { slot, name } => handle_create(&driver, slot, name),
        Commands::Delete { slot } => handle_delete(&driver, slot),
    }
}

fn handle_create(
    driver: &Driver,
    slot: u8,
    name: String,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    let slot = ProfileSlot::from_index(slot)?;
    if name.chars().count() > LABEL_MAX_CHARS {
        log::warn!("Profile name exceeds {LABEL_MAX_CHARS} characters and will be truncated");
    }

    // Factory curve, dead-zone and button-map defaults from the report
    // templates; only the label is customized here.
    let profile = Profile::new(name, Vec::new());
    driver.write_profile(&profile, slot, SLIDER_NEUTRAL)
}

fn handle_delete(driver: &Driver, slot: u8) -> Result<(), Box<dyn Error + Send + Sync>> {
    let slot = ProfileSlot::from_index(slot)?;
    driver.delete_profile(slot)
}
