//! Command-line interface for okoablood.
//!
//! This module provides the CLI structure and command handlers for the
//! `okoa` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    BloodGroupArg, ConfigCommand, CreateRequestArgs, DonorsCommand, MapCommand, OutputFormat,
    ProfileCommand, RequestsCommand, StatsCommand, UrgencyArg,
};

/// okoa - Coordinate blood donations
///
/// Browse blood requests and donors, check donation eligibility, and place
/// hospital demand on a map.
#[derive(Debug, Parser)]
#[command(name = "okoa")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Browse and register donors
    #[command(subcommand)]
    Donors(DonorsCommand),

    /// Browse and manage blood requests
    #[command(subcommand)]
    Requests(RequestsCommand),

    /// View profiles and donation eligibility
    #[command(subcommand)]
    Profile(ProfileCommand),

    /// Show hospitals with open requests on a map
    Map(MapCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Show document counts
    Stats(StatsCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}
