use clap::{
    Arg, ArgAction, ColorChoice, Command,
    builder::styling::{AnsiColor, Effects, Styles},
};
use std::path::PathBuf;

/// Pure clap command definitions with zero business logic
#[must_use]
#[allow(clippy::too_many_lines)]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    Command::new(env!("CARGO_PKG_NAME"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("destination")
                .env("TLSKIT_DESTINATION")
                .global(true)
                .help("Destination to secure, <host>:<port> (port defaults to 443)")
                .long("destination")
                .short('d')
                .value_name("HOST:PORT"),
        )
        .arg(
            Arg::new("alpn")
                .action(ArgAction::Append)
                .env("TLSKIT_ALPN")
                .global(true)
                .help("ALPN protocols in preference order (default: h2,http/1.1)")
                .long("alpn")
                .short('a')
                .value_delimiter(',')
                .value_name("PROTOCOL"),
        )
        .arg(
            Arg::new("cipher-suites")
                .env("TLSKIT_CIPHER_SUITES")
                .global(true)
                .help("Colon-separated cipher suite names to restrict the handshake to")
                .long("cipher-suites")
                .long_help(
                    "Colon-separated cipher suite names, in preference order.\n\
                    Both rustls and IANA spellings are accepted for TLS 1.3 suites.\n\
                    Names the host does not support are skipped silently.\n\n\
                    Example: TLS_AES_128_GCM_SHA256:TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256\n\n\
                    Run `tlskit ciphers` to list the supported names."
                )
                .short('c')
                .value_name("LIST"),
        )
        .arg(
            Arg::new("prefer-server-ciphers")
                .action(ArgAction::SetTrue)
                .env("TLSKIT_PREFER_SERVER_CIPHERS")
                .global(true)
                .help("Record a preference for the server's cipher suite order")
                .long("prefer-server-ciphers"),
        )
        .arg(
            Arg::new("ca-file")
                .conflicts_with("bundled-roots")
                .env("TLSKIT_CA_FILE")
                .global(true)
                .help("PEM bundle to use as trust store instead of the system one")
                .long("ca-file")
                .value_name("PATH")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("bundled-roots")
                .action(ArgAction::SetTrue)
                .env("TLSKIT_BUNDLED_ROOTS")
                .global(true)
                .help("Use the compiled-in Mozilla root certificates as trust store")
                .long("bundled-roots"),
        )
        .arg(
            Arg::new("verbose")
                .action(ArgAction::Count)
                .global(true)
                .help("Increase log verbosity (-v info, -vv debug, -vvv trace)")
                .long("verbose")
                .short('v'),
        )
        .subcommand(Command::new("show").about("Print the resolved TLS configuration as JSON"))
        .subcommand(
            Command::new("probe")
                .about("Perform a TLS handshake and print the negotiated parameters as JSON"),
        )
        .subcommand(Command::new("ciphers").about("List the cipher suite names supported by the host"))
}
