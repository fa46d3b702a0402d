//! Command execution.

use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::rc::Rc;

use anyhow::{bail, Context, Result};
use serde_json::Value;
use tracing::{debug, info, instrument, warn};
use valuto_core::{Action, Child, Node, Tree};
use valuto_registry::{ComponentRegistry, RegistryManifest};
use valuto_render::audit::unresolved;
use valuto_render::{render_tree, to_html, ActionDispatcher, HtmlOptions};

use crate::args::{Cli, Commands};

pub fn execute_command(cli: &Cli) -> Result<()> {
    let registry = load_registry(cli.manifest.as_deref())?;

    match &cli.command {
        Commands::Render {
            file,
            pointer,
            pretty,
            output,
        } => {
            let html = render_file(file, pointer.as_deref(), *pretty, &registry)?;
            match output {
                Some(path) => fs::write(path, html)
                    .with_context(|| format!("Failed to write {}", path.display()))?,
                None => io::stdout().write_all(html.as_bytes())?,
            }
            Ok(())
        }
        Commands::Check {
            files,
            pointer,
            strict,
        } => {
            let mut failed = 0;
            for file in files {
                match check_file(file, pointer.as_deref(), &registry) {
                    Ok(report) => {
                        for (path, type_name) in &report.unresolved {
                            println!(
                                "{}: unregistered type `{}` at {}",
                                file.display(),
                                type_name,
                                path
                            );
                        }
                        if *strict && !report.unresolved.is_empty() {
                            failed += 1;
                        } else {
                            println!("{}: ok ({} nodes)", file.display(), report.nodes);
                        }
                    }
                    Err(e) => {
                        println!("{}: {:#}", file.display(), e);
                        failed += 1;
                    }
                }
            }
            if failed > 0 {
                bail!("{} of {} files failed", failed, files.len());
            }
            Ok(())
        }
        Commands::Components => {
            for (name, implementation) in registry.iter() {
                println!("{:<16} {}", name, implementation.kind());
            }
            Ok(())
        }
    }
}

/// Built-in registry, or the one described by a manifest file.
pub fn load_registry(manifest: Option<&Path>) -> Result<ComponentRegistry> {
    let Some(path) = manifest else {
        return Ok(ComponentRegistry::builtin());
    };
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read manifest {}", path.display()))?;
    let registry = RegistryManifest::from_json_str(&json)
        .and_then(RegistryManifest::into_registry)
        .with_context(|| format!("Invalid manifest {}", path.display()))?;
    debug!(manifest = %path.display(), entries = registry.len(), "registry loaded");
    Ok(registry)
}

/// Parse a tree out of a JSON document, optionally at a JSON pointer.
pub fn load_tree(source: &str, pointer: Option<&str>) -> Result<Tree> {
    let document: Value = serde_json::from_str(source).context("Document is not valid JSON")?;
    let tree = match pointer {
        Some(pointer) => Tree::from_document(&document, pointer)?,
        None => Tree::from_value(&document)?,
    };
    Ok(tree)
}

fn read_tree(file: &Path, pointer: Option<&str>) -> Result<Tree> {
    let source =
        fs::read_to_string(file).with_context(|| format!("Failed to read {}", file.display()))?;
    load_tree(&source, pointer)
}

/// Render a file to HTML. Actions are logged rather than performed, which keeps their
/// payloads in the output as `data-action` attributes.
#[instrument(level = "debug", skip(registry))]
pub fn render_file(
    file: &Path,
    pointer: Option<&str>,
    pretty: bool,
    registry: &ComponentRegistry,
) -> Result<String> {
    let tree = read_tree(file, pointer)?;
    render_to_html(&tree, pretty, registry)
}

pub fn render_to_html(tree: &Tree, pretty: bool, registry: &ComponentRegistry) -> Result<String> {
    let dispatcher: Rc<dyn ActionDispatcher> =
        Rc::new(|action: &Action| info!(action = %action.value(), "action"));
    let rendered = render_tree(tree, registry, Some(dispatcher))?;
    let options = HtmlOptions {
        pretty,
        ..HtmlOptions::default()
    };
    Ok(to_html(&rendered, &options))
}

/// Outcome of checking one tree.
#[derive(Debug, Default)]
pub struct CheckReport {
    pub nodes: usize,
    /// Path and type name of every node that resolves to passthrough.
    pub unresolved: Vec<(String, String)>,
}

fn check_file(
    file: &Path,
    pointer: Option<&str>,
    registry: &ComponentRegistry,
) -> Result<CheckReport> {
    let tree = read_tree(file, pointer)?;
    check_tree(&tree, registry)
}

/// Render without a dispatcher so prop errors surface, then audit unresolved names.
pub fn check_tree(tree: &Tree, registry: &ComponentRegistry) -> Result<CheckReport> {
    render_tree(tree, registry, None)?;

    let unresolved: Vec<_> = unresolved(tree, registry)
        .into_iter()
        .map(|u| (u.path.to_string(), u.type_name))
        .collect();
    if !unresolved.is_empty() {
        warn!(count = unresolved.len(), "unregistered type names");
    }

    Ok(CheckReport {
        nodes: count_nodes(tree),
        unresolved,
    })
}

fn count_nodes(tree: &Tree) -> usize {
    fn count(node: &Node) -> usize {
        1 + node
            .children
            .iter()
            .map(|child| match child {
                Child::Node(node) => count(node),
                Child::Text(_) => 0,
            })
            .sum::<usize>()
    }
    tree.nodes().iter().map(count).sum()
}
