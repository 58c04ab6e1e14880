//! Request resolution command
//!
//! Resolves one request against the manifest and prints the outcome.

use crate::error::CliResult;
use colored::Colorize;
use polyroute_core::{MatchResult, MatchStatus, Redirect, RequestContext, Resolution, Router};
use serde_json::json;

pub fn execute(router: &Router, request: &RequestContext, as_json: bool) -> CliResult<()> {
    let resolution = router.resolve(request)?;

    match (&resolution, as_json) {
        (Resolution::Redirect(redirect), true) => {
            println!("{}", serde_json::to_string_pretty(&redirect_json(redirect))?)
        }
        (Resolution::Matched(result), true) => {
            println!("{}", serde_json::to_string_pretty(&match_json(result))?)
        }
        (Resolution::Redirect(redirect), false) => print_redirect(redirect),
        (Resolution::Matched(result), false) => print_match(result),
    }

    Ok(())
}

fn redirect_json(redirect: &Redirect) -> serde_json::Value {
    json!({
        "status": redirect.status(),
        "redirect": redirect.location(),
    })
}

fn match_json(result: &MatchResult) -> serde_json::Value {
    let parameters: serde_json::Map<String, serde_json::Value> = result
        .parameters()
        .iter()
        .map(|(key, value)| (key.to_string(), json!(value)))
        .collect();
    let patterns: serde_json::Map<String, serde_json::Value> = result
        .patterns_by_language()
        .iter()
        .map(|(lang, pattern)| (lang.clone(), json!(pattern.body())))
        .collect();

    json!({
        "status": result.status().as_u16(),
        "language": result.language(),
        "route": result.definition().and_then(|def| def.name()),
        "controller": result.controller().map(|c| c.to_string()),
        "middleware": result.middleware(),
        "parameters": parameters,
        "patterns": patterns,
    })
}

fn print_redirect(redirect: &Redirect) {
    println!(
        "{} {} {}",
        "Redirect:".bright_white().bold(),
        redirect.status().to_string().yellow(),
        redirect.location()
    );
}

fn print_match(result: &MatchResult) {
    let status = result.status().to_string();
    let status = match result.status() {
        MatchStatus::Ok => status.green(),
        MatchStatus::NotFound | MatchStatus::MethodNotAllowed => status.red(),
    };
    println!("{} {}", "Status:".bright_white().bold(), status);
    println!("{} {}", "Language:".bright_white().bold(), result.language());

    let Some(definition) = result.definition() else {
        return;
    };

    if let Some(name) = definition.name() {
        println!("{} {}", "Route:".bright_white().bold(), name.cyan());
    }
    println!("{} {}", "Pattern:".bright_white().bold(), definition.pattern().body());
    println!("{} {}", "Controller:".bright_white().bold(), definition.controller());
    if !definition.middleware().is_empty() {
        println!(
            "{} {}",
            "Middleware:".bright_white().bold(),
            definition.middleware().join(", ")
        );
    }

    if !result.parameters().is_empty() {
        println!("{}", "Parameters:".bright_white().bold());
        for (key, value) in result.parameters().iter() {
            println!("  {} = {}", key.to_string().cyan(), value);
        }
    }

    if result.patterns_by_language().len() > 1 {
        println!("{}", "Translations:".bright_white().bold());
        for lang in result.patterns_by_language().keys() {
            if let Some(uri) = result.uri(None, Some(lang.as_str())).filter(|g| g.is_complete()) {
                println!("  {} {}", lang.cyan(), uri.path());
            }
        }
    }
}
