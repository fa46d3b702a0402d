//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueHint};

/// Render and check Valuto lesson trees
#[derive(Parser, Debug)]
#[command(name = "valuto")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Turn debugging information on (multiple -d for more)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub debug: u8,

    /// Registry manifest (JSON); built-in primitives and icons when omitted
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub manifest: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render a tree to HTML
    Render {
        /// Tree or document file (JSON)
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,

        /// JSON pointer to the tree inside a larger document, e.g. /content
        #[arg(short, long)]
        pointer: Option<String>,

        /// Indent the output
        #[arg(long)]
        pretty: bool,

        /// Write to a file instead of stdout
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        output: Option<PathBuf>,
    },

    /// Validate trees and report unregistered type names
    Check {
        /// Tree or document files (JSON)
        #[arg(required = true, value_hint = ValueHint::FilePath)]
        files: Vec<PathBuf>,

        /// JSON pointer to the tree inside each document
        #[arg(short, long)]
        pointer: Option<String>,

        /// Treat unregistered type names as failures
        #[arg(long)]
        strict: bool,
    },

    /// List registered component names
    Components,
}
