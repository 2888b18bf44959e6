use clap::{Arg, Command};
use gtranslate::GoogleTranslateClient;
use icu_locale::Locale;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let matches = Command::new("gtranslate")
        .version("0.1.0")
        .about("Translate text via the public Google Translate web endpoint")
        .arg(
            Arg::new("text")
                .help("Text to translate")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("target")
                .long("to")
                .short('t')
                .help("Target language code (e.g. fr, de, fa)")
                .required(true),
        )
        .arg(
            Arg::new("source")
                .long("from")
                .short('f')
                .help("Source language code (default: auto-detect)"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print the full result as JSON instead of just the translation")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    let text = matches.get_one::<String>("text").unwrap();
    let target: Locale = matches
        .get_one::<String>("target")
        .unwrap()
        .parse()
        .map_err(|e| format!("invalid target language: {}", e))?;
    let source = match matches.get_one::<String>("source") {
        Some(code) => Some(
            code.parse::<Locale>()
                .map_err(|e| format!("invalid source language: {}", e))?,
        ),
        None => None,
    };

    let client = GoogleTranslateClient::new()?;
    let result = client.translate(text, source.as_ref(), &target).await?;

    if matches.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", result.translation);
        if !result.pronunciation.is_empty() {
            println!("({})", result.pronunciation);
        }
        eprintln!("detected source language: {}", result.source_language);
    }

    Ok(())
}
