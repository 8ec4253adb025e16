use crate::{
    cli::actions::{Action, Request, RootsSource},
    net::Destination,
    tls::CipherSettings,
};
use anyhow::{Context, Result, anyhow};
use clap::ArgMatches;
use std::path::PathBuf;

fn extract_request(matches: &ArgMatches) -> Result<Request> {
    let destination = matches
        .get_one::<String>("destination")
        .context("destination is required (--destination <host>:<port>)")?
        .parse::<Destination>()
        .map_err(|e| anyhow!(e))?;

    let alpn = matches
        .get_many::<String>("alpn")
        .map(|values| values.filter(|v| !v.is_empty()).cloned().collect())
        .unwrap_or_default();

    let settings = CipherSettings::new(
        matches
            .get_one::<String>("cipher-suites")
            .cloned()
            .unwrap_or_default(),
        matches.get_flag("prefer-server-ciphers"),
    );

    let roots = if matches.get_flag("bundled-roots") {
        RootsSource::Bundled
    } else if let Some(path) = matches.get_one::<PathBuf>("ca-file") {
        RootsSource::File(path.clone())
    } else {
        RootsSource::System
    };

    Ok(Request {
        destination,
        alpn,
        settings,
        roots,
    })
}

/// Convert `ArgMatches` into typed Action enum with validation
///
/// # Errors
///
/// Returns an error if the destination is missing or invalid
pub fn dispatch(matches: &ArgMatches) -> Result<Action> {
    match matches.subcommand() {
        Some(("show", sub)) => Ok(Action::Show(extract_request(sub)?)),
        Some(("probe", sub)) => Ok(Action::Probe(extract_request(sub)?)),
        Some(("ciphers", _)) => Ok(Action::Ciphers),
        Some((name, _)) => Err(anyhow!("unknown command: {name}")),
        None => Err(anyhow!("a command is required")),
    }
}
