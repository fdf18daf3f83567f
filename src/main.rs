use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;

use knoblink::diagnostics::ErrorLog;
use knoblink::document::{load_document, DocumentRestorer};
use knoblink::expression::PermissiveEngine;
use knoblink::legacy::normalize_choice_label;
use knoblink::serialization::{DocumentSerialization, KnobSerialization};
use knoblink::types::{MasterLink, NameMap};

/// Inspects and validates knob linkage in node-graph documents.
#[derive(Parser)]
#[command(
    name = "knoblink",
    about = "Inspects and validates knob linkage in node-graph documents"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize the knobs, links and expressions stored in a document
    Inspect {
        /// Document file to inspect
        file: PathBuf,
        /// Dump the raw document as JSON
        #[arg(short, long)]
        json: bool,
    },
    /// Restore a document and report what resolved and what did not
    Validate {
        /// Document file to validate
        file: PathBuf,
        /// Apply a node rename before resolving, as OLD=NEW (repeatable)
        #[arg(short, long, value_name = "OLD=NEW", value_parser = parse_rename)]
        rename: Vec<(String, String)>,
    },
    /// Print the canonical form of a legacy choice label
    Normalize {
        /// Label to normalize
        label: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> knoblink::errors::Result<()> {
    match cli.command {
        Commands::Inspect { file, json } => {
            let document = load_document(&file)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&document)?);
            } else {
                print_document(&document);
            }
        }
        Commands::Validate { file, rename } => {
            let document = load_document(&file)?;
            let name_map: NameMap = rename.into_iter().collect();

            let log = ErrorLog::new();
            let engine = PermissiveEngine;
            let restored = DocumentRestorer::new(&engine, &log).restore(document, &name_map);

            let report = &restored.report;
            println!(
                "Restored {} nodes, {} knobs in {}ms",
                report.nodes_restored, report.knobs_restored, report.duration_ms
            );
            println!(
                "  Links:       {} restored, {} failed",
                report.links_restored, report.links_failed
            );
            println!(
                "  Expressions: {} restored, {} failed",
                report.expressions_restored, report.expressions_failed
            );
            if report.unknown_types > 0 {
                println!("  Unknown knob types: {}", report.unknown_types);
            }

            let entries = log.entries();
            if !entries.is_empty() {
                println!("\nDiagnostics:");
                for entry in &entries {
                    println!("  [{}] {}", entry.context, entry.message);
                }
            }
        }
        Commands::Normalize { label } => {
            println!("{}", normalize_choice_label(&label));
        }
    }
    Ok(())
}

/// Parses an `OLD=NEW` rename argument.
fn parse_rename(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((old, new)) if !old.is_empty() && !new.is_empty() => {
            Ok((old.to_string(), new.to_string()))
        }
        _ => Err(format!("expected OLD=NEW, got '{s}'")),
    }
}

fn print_document(document: &DocumentSerialization) {
    println!(
        "Document version {} ({} nodes)",
        document.version,
        document.nodes.len()
    );
    for node in &document.nodes {
        println!("\n{}", node.script_name);
        for knob in &node.knobs {
            print_knob(knob, "  ");
        }
        for marker in &node.markers {
            println!("  track {}", marker.script_name);
            for knob in &marker.knobs {
                print_knob(knob, "    ");
            }
        }
    }
}

fn print_knob(knob: &KnobSerialization, indent: &str) {
    println!(
        "{}{} ({} x{})",
        indent, knob.script_name, knob.type_tag, knob.dimension
    );
    if let Some(label) = &knob.choice_label {
        println!("{}  label: {}", indent, label);
    }
    if knob.master_is_alias {
        if let Some(first) = knob.values.first() {
            if first.master.is_linked() {
                println!("{}  alias -> {}", indent, format_link_target(&first.master));
            }
        }
    } else {
        for snapshot in &knob.values {
            if snapshot.master.is_linked() {
                println!(
                    "{}  [{}] -> {}[{}]",
                    indent,
                    snapshot.dimension,
                    format_link_target(&snapshot.master),
                    snapshot.master.master_dimension
                );
            }
        }
    }
    for snapshot in &knob.values {
        if !snapshot.expression.is_empty() {
            println!(
                "{}  [{}] expr: {}",
                indent, snapshot.dimension, snapshot.expression
            );
        }
    }
}

/// Renders a link target as `node.knob`, or `node.track.knob` for a
/// track-scoped target.
fn format_link_target(link: &MasterLink) -> String {
    if link.master_track_name.is_empty() {
        format!("{}.{}", link.master_node_name, link.master_knob_name)
    } else {
        format!(
            "{}.{}.{}",
            link.master_node_name, link.master_track_name, link.master_knob_name
        )
    }
}
