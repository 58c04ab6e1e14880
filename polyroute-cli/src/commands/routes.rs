//! Route listing command
//!
//! Lists the routes of a manifest in matching order, grouped by language.

use crate::error::CliResult;
use colored::Colorize;
use polyroute_core::{RouteDefinition, Router};
use serde_json::json;
use std::collections::HashSet;
use std::sync::Arc;

/// List routes, optionally only those of one language
pub fn execute(router: &Router, lang: Option<&str>, as_json: bool) -> CliResult<()> {
    let lang = lang.map(str::to_lowercase);
    let routes: Vec<&Arc<RouteDefinition>> = router
        .table()
        .iter()
        .filter(|def| lang.as_deref().is_none_or(|l| def.language() == l))
        .collect();

    if as_json {
        let list: Vec<_> = routes.iter().map(|def| route_json(def)).collect();
        println!("{}", serde_json::to_string_pretty(&list)?);
        return Ok(());
    }

    if routes.is_empty() {
        println!("No routes found.");
        return Ok(());
    }

    print_routes_table(&routes);

    println!();
    println!("{}", "Statistics:".bright_white().bold());
    println!("  Total routes: {}", routes.len());

    let languages: HashSet<&str> = routes.iter().map(|def| def.language()).collect();
    println!("  Languages: {}", languages.len());

    let named = routes.iter().filter(|def| def.name().is_some()).count();
    println!("  Named routes: {}", named);

    let with_middleware = routes.iter().filter(|def| !def.middleware().is_empty()).count();
    println!("  Routes with middleware: {}", with_middleware);

    Ok(())
}

fn route_json(def: &RouteDefinition) -> serde_json::Value {
    json!({
        "language": def.language(),
        "methods": def.methods(),
        "pattern": def.pattern().body(),
        "regex": def.pattern().as_str(),
        "name": def.name(),
        "controller": def.controller().to_string(),
        "middleware": def.middleware(),
        "sensitive": def.is_sensitive(),
    })
}

fn print_routes_table(routes: &[&Arc<RouteDefinition>]) {
    let rows: Vec<[String; 5]> = routes
        .iter()
        .map(|def| {
            [
                def.language().to_string(),
                def.methods().join(",").to_uppercase(),
                def.pattern().body().to_string(),
                def.name().unwrap_or("-").to_string(),
                def.controller().to_string(),
            ]
        })
        .collect();

    let headers = ["LANG", "METHODS", "PATTERN", "NAME", "CONTROLLER"];
    let mut widths = headers.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    let header = headers
        .iter()
        .zip(widths)
        .map(|(h, w)| format!("{:w$}", h, w = w))
        .collect::<Vec<_>>()
        .join("  ");
    println!("{}", header.trim_end().bright_cyan().bold());
    println!("{}", "-".repeat(widths.iter().sum::<usize>() + 2 * (widths.len() - 1)));

    for row in rows {
        let line = row
            .iter()
            .zip(widths)
            .map(|(cell, w)| format!("{:w$}", cell, w = w))
            .collect::<Vec<_>>()
            .join("  ");
        println!("{}", line.trim_end());
    }
}
