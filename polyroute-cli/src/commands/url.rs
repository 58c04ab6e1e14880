//! Reverse generation command
//!
//! Builds the path (or absolute URL) of a named route from `key=value`
//! parameters. Numeric keys are positions, anything else is a group name.

use crate::error::{CliError, CliResult};
use polyroute_core::{Origin, ParamKey, Parameters, Router};

pub fn execute(
    router: &Router,
    name: &str,
    lang: Option<&str>,
    params: &[String],
    origin: Option<&Origin>,
) -> CliResult<()> {
    let params = parse_params(params)?;

    let generated = match origin {
        Some(origin) => router.url(name, lang, &params, origin),
        None => router.uri(name, lang, &params),
    }
    .ok_or_else(|| CliError::UnknownRoute(name.to_string()))?;

    let path = generated
        .into_result()
        .map_err(|missing| CliError::MissingParameters {
            route: name.to_string(),
            missing,
        })?;

    println!("{}", path);
    Ok(())
}

/// Parse `key=value` pairs into parameters
pub fn parse_params(raw: &[String]) -> CliResult<Parameters> {
    let mut params = Parameters::new();
    for pair in raw {
        let (key, value) = pair.split_once('=').ok_or_else(|| {
            CliError::InvalidArgument(format!("expected key=value, got '{}'", pair))
        })?;
        let key = key.trim();
        if key.is_empty() {
            return Err(CliError::InvalidArgument(format!(
                "empty parameter name in '{}'",
                pair
            )));
        }
        let key = match key.parse::<usize>() {
            Ok(position) => ParamKey::Position(position),
            Err(_) => ParamKey::from(key),
        };
        params.insert(key, value);
    }
    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_params() {
        let raw = vec!["name=dolly".to_string(), "1=hi".to_string(), "q=a=b".to_string()];
        let params = parse_params(&raw).unwrap();
        assert_eq!(params.named("name"), Some("dolly"));
        assert_eq!(params.positional(1), Some("hi"));
        assert_eq!(params.named("q"), Some("a=b"));
    }

    #[test]
    fn test_parse_params_rejects_malformed() {
        assert!(parse_params(&["novalue".to_string()]).is_err());
        assert!(parse_params(&["=x".to_string()]).is_err());
    }
}
