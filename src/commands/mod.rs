use clap::{Arg, ArgMatches, Command};
use color_eyre::eyre::Result;
use timebridge::config::Config;

/// Register all application commands
pub fn register_commands(app: Command) -> Command {
    app.subcommand(Command::new("start").about("Start the conversion service"))
        .subcommand(
            Command::new("convert")
                .about("Convert one input and print the result as JSON")
                .arg(
                    Arg::new("input")
                        .required(true)
                        .help("Numeric timestamp or date in YYYY-MM-DD [HH[:MM[:SS]]] format"),
                )
                .arg(
                    Arg::new("timezone")
                        .long("timezone")
                        .short('t')
                        .help("IANA timezone id (defaults to the configured default)"),
                ),
        )
}

/// Handle all application commands
pub async fn handle_commands(matches: ArgMatches, config: &Config) -> Result<()> {
    match matches.subcommand() {
        Some(("start", _)) => crate::service::run_service(config).await,
        Some(("convert", convert_matches)) => convert_once(convert_matches, config),
        _ => {
            println!("Please specify a subcommand. Use --help for more information.");
            Ok(())
        },
    }
}

/// One-shot conversion for operators; runs the same core path as the HTTP
/// handler, without the rate limiter.
fn convert_once(matches: &ArgMatches, config: &Config) -> Result<()> {
    use std::sync::Arc;
    use timebridge::{
        convert::{Converter, ConverterOptions},
        timezone::TzdbProvider,
    };

    let input = matches.get_one::<String>("input").expect("input is required");
    let timezone = matches
        .get_one::<String>("timezone")
        .cloned()
        .unwrap_or_else(|| config.convert.default_timezone.clone());

    let converter = Converter::new(
        Arc::new(TzdbProvider::new()),
        ConverterOptions {
            max_input_length: config.convert.max_input_length,
            numeric_uses_caller_tz: config.convert.numeric_uses_caller_tz,
        },
    );

    let conversion = converter
        .convert(input.trim(), &timezone)
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;
    println!("{}", serde_json::to_string_pretty(&conversion)?);
    Ok(())
}
