//! Inspection commands (resources, check, order, categories)

use anyhow::Result;

use super::output::Output;
use super::pipeline::{build_graph, report_diagnostics, InputArgs};
use crate::storage::Config;

/// List the resources that made it into the graph
pub fn resources(output: &Output, config: &Config, input: &InputArgs) -> Result<()> {
    let graph = build_graph(output, config, input)?;
    report_diagnostics(output, &graph.diagnostics);

    if output.is_json() {
        let items: Vec<_> = graph
            .resources
            .iter()
            .map(|r| {
                serde_json::json!({
                    "id": r.id,
                    "type": r.resource_type,
                    "name": r.name,
                    "category": r.category,
                    "depends_on": graph.dependencies(&r.id).unwrap_or_default(),
                })
            })
            .collect();
        output.data(&items);
    } else if graph.is_empty() {
        println!("No resources found.");
    } else {
        println!("Resources ({}):", graph.len());
        println!("{:<40} {:<18} DEPENDS ON", "ID", "CATEGORY");
        println!("{}", "-".repeat(80));
        for record in &graph.resources {
            let deps = graph.dependencies(&record.id).unwrap_or_default();
            println!("{:<40} {:<18} {}", record.id, record.category, deps.join(", "));
        }
    }

    Ok(())
}

/// Report diagnostics; with `strict`, any diagnostic is a failure
pub fn check(output: &Output, config: &Config, input: &InputArgs, strict: bool) -> Result<()> {
    let graph = build_graph(output, config, input)?;
    let file = input.file.display().to_string();

    if output.is_json() {
        output.data(&serde_json::json!({
            "file": file,
            "resources": graph.len(),
            "clusters": graph.clusters.len(),
            "edges": graph.edges.len(),
            "diagnostics": graph.diagnostics,
        }));
    } else if graph.diagnostics.is_empty() {
        println!(
            "No problems found in {} ({} resources, {} edges)",
            file,
            graph.len(),
            graph.edges.len()
        );
    } else {
        println!("Diagnostics for {} ({}):", file, graph.diagnostics.len());
        println!("{:<20} MESSAGE", "KIND");
        println!("{}", "-".repeat(80));
        for diagnostic in &graph.diagnostics {
            println!("{:<20} {}", diagnostic.kind.label(), diagnostic.message);
        }
    }

    if strict && !graph.diagnostics.is_empty() {
        anyhow::bail!(
            "{} diagnostic(s) reported for {}",
            graph.diagnostics.len(),
            file
        );
    }

    Ok(())
}

/// Show a provisioning order (dependencies first)
pub fn order(output: &Output, config: &Config, input: &InputArgs) -> Result<()> {
    let graph = build_graph(output, config, input)?;
    report_diagnostics(output, &graph.diagnostics);

    let order = graph.provisioning_order()?;
    output.verbose_ctx("order", &format!("Ordered {} resources", order.len()));

    if output.is_json() {
        output.data(&order);
    } else if order.is_empty() {
        println!("No resources found.");
    } else {
        println!("Provisioning order ({}):", order.len());
        for (i, id) in order.iter().enumerate() {
            println!("{:>4}. {}", i + 1, id);
        }
    }

    Ok(())
}

/// List the effective category table
pub fn categories(output: &Output, config: &Config) -> Result<()> {
    let registry = config.registry();

    if output.is_json() {
        let items: Vec<_> = registry
            .entries()
            .map(|(resource_type, category)| {
                serde_json::json!({
                    "type": resource_type,
                    "category": category,
                })
            })
            .collect();
        output.data(&items);
    } else {
        println!("{:<36} CATEGORY", "TYPE");
        println!("{}", "-".repeat(60));
        for (resource_type, category) in registry.entries() {
            println!("{:<36} {}", resource_type, category);
        }
    }

    Ok(())
}
