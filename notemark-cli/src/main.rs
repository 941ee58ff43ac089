// Command-line interface for notemark
//
// This binary provides commands for formatting, checking, inspecting and converting Markdown notes.
//
// The core capabilities use the notemark crate: every command parses the note into a styled
// document (what the editor would load) and writes it back out through one of the registered
// formats. Formatting is therefore the same operation as saving a note from the editor.
//
// Usage:
//  notemark <input> --to <format> [--from <format>] [--output <file>]  - Convert between formats (default)
//  notemark convert <input> --to <format> [--from <format>] [--output <file>]  - Same as above (explicit)
//  notemark format <input> [--output <file> | --in-place]  - Rewrite a note as canonical Markdown
//  notemark check <input>                - Exit 1 unless the note is already canonical
//  notemark inspect <input> [<view>]     - Show the parsed document (defaults to "treeviz")
//  notemark --list-formats               - List available formats and views
//
// Extra Parameters:
//
// Parameters can be passed using --extra-<parameter-name> <value>.
// The CLI layer strips the "extra-" prefix. Configuration keys (notes-root, image-max-width) are
// applied as config overrides; everything else is passed on to the format or view.
// Example:
//  notemark inspect note.md --extra-show-previews --extra-image-max-width 320

mod transforms;

use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use log::{Level, LevelFilter, Log, Metadata, Record};
use notemark::{FormatRegistry, FsImageLoader, ParseOptions, StyledDocument, Theme};
use notemark_config::{Loader, NotemarkConfig};
use std::collections::HashMap;
use std::fs;

/// Writes records to stderr. Filtering happens through `log::set_max_level`.
struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let level = match record.level() {
                Level::Error => "error",
                Level::Warn => "warning",
                Level::Info => "info",
                Level::Debug => "debug",
                Level::Trace => "trace",
            };
            eprintln!("{level}: {}", record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn init_logging(verbose: bool) {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(if verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        });
    }
}

/// Split `--extra-<key> [value]` pairs (or the `--extras-` spelling) out of the raw arguments.
///
/// A key followed by another flag, or by nothing, is a boolean set to `"true"`.
fn parse_extra_args(args: &[String]) -> (Vec<String>, HashMap<String, String>) {
    let mut cleaned = Vec::with_capacity(args.len());
    let mut extras = HashMap::new();
    let mut args = args.iter().peekable();

    while let Some(arg) = args.next() {
        let key = arg
            .strip_prefix("--extra-")
            .or_else(|| arg.strip_prefix("--extras-"));
        let Some(key) = key else {
            cleaned.push(arg.clone());
            continue;
        };
        let value = args
            .next_if(|next| !next.starts_with('-'))
            .cloned()
            .unwrap_or_else(|| "true".to_string());
        extras.insert(key.to_string(), value);
    }

    (cleaned, extras)
}

fn input_arg() -> Arg {
    Arg::new("input")
        .help("Input file path")
        .required(true)
        .index(1)
        .value_hint(ValueHint::FilePath)
}

fn output_arg() -> Arg {
    Arg::new("output")
        .long("output")
        .short('o')
        .help("Output file path (defaults to stdout)")
        .value_hint(ValueHint::FilePath)
}

fn build_cli() -> Command {
    Command::new("notemark")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for formatting, inspecting and converting Markdown notes")
        .long_about(
            "notemark works with notes written in a small Markdown dialect: headings,\n\
            bold, italic, underline, links, lists, rules, pipe tables and images.\n\n\
            Commands:\n  \
            - format:  Rewrite a note as canonical Markdown\n  \
            - check:   Report whether a note is already canonical\n  \
            - inspect: View the parsed styled document\n  \
            - convert: Transform between formats (default)\n\n\
            Extra Parameters:\n  \
            Use --extra-<name> [value] to pass options.\n  \
            Boolean flags can omit the value (defaults to 'true').\n\n\
            Examples:\n  \
            notemark inspect note.md                    # Tree of blocks and runs\n  \
            notemark format note.md --in-place          # Canonicalize a note\n  \
            notemark note.md --to json                  # Dump the document model",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available formats and inspect views")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a notemark.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log debug details (image loading, table detection) to stderr")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("format")
                .about("Rewrite a note as canonical Markdown")
                .long_about(
                    "Parse the note and serialize it again, exactly as the editor would\n\
                    when saving it. Output goes to stdout unless -o or --in-place is given.\n\n\
                    Examples:\n  \
                    notemark format note.md                  # Canonical form to stdout\n  \
                    notemark format note.md --in-place       # Rewrite the file",
                )
                .arg(input_arg())
                .arg(output_arg().conflicts_with("in-place"))
                .arg(
                    Arg::new("in-place")
                        .long("in-place")
                        .short('i')
                        .help("Write the result back to the input file")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("check")
                .about("Check that a note is already canonical")
                .long_about(
                    "Exits with status 1 when formatting would change the note.\n\
                    Also reports when a second formatting pass would not be stable.",
                )
                .arg(input_arg()),
        )
        .subcommand(
            Command::new("inspect")
                .about("Inspect the styled document a note parses to")
                .arg(
                    Arg::new("path")
                        .help("Path to the note")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("transform")
                        .help("View to render. Defaults to 'treeviz'")
                        .required(false)
                        .value_parser(clap::builder::PossibleValuesParser::new(
                            transforms::AVAILABLE_TRANSFORMS,
                        ))
                        .index(2)
                        .value_hint(ValueHint::Other),
                ),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert between document formats (default command)")
                .long_about(
                    "Convert a note through the format registry.\n\n\
                    The source format follows the file extension unless --from is given.\n\
                    The result is printed unless -o names a file.\n\n\
                    Examples:\n  \
                    notemark convert note.md --to treeviz       # Tree view (stdout)\n  \
                    notemark note.md --to json -o note.json     # 'convert' is optional",
                )
                .arg(input_arg())
                .arg(
                    Arg::new("from")
                        .long("from")
                        .help("Source format, guessed from the extension when omitted")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Target format")
                        .required(true)
                        .value_hint(ValueHint::Other),
                )
                .arg(output_arg()),
        )
}

const SUBCOMMANDS: &[&str] = &["format", "check", "inspect", "convert", "help"];

/// Match `args`, treating `notemark <file> ...` as `notemark convert <file> ...`.
fn matches_with_default_subcommand(cli: Command, args: &[String]) -> ArgMatches {
    let error = match cli.clone().try_get_matches_from(args) {
        Ok(matches) => return matches,
        Err(error) => error,
    };
    let names_a_file = args
        .get(1)
        .is_some_and(|first| !first.starts_with('-') && !SUBCOMMANDS.contains(&first.as_str()));
    if !names_a_file {
        error.exit();
    }
    let mut rerouted = args.to_vec();
    rerouted.insert(1, "convert".to_string());
    cli.try_get_matches_from(&rerouted)
        .unwrap_or_else(|error| error.exit())
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let (cleaned_args, mut extra_params) = parse_extra_args(&args);

    let matches = matches_with_default_subcommand(build_cli(), &cleaned_args);

    init_logging(matches.get_flag("verbose"));

    let config = load_cli_config(
        matches.get_one::<String>("config").map(|s| s.as_str()),
        &mut extra_params,
    );
    let registry = FormatRegistry::with_parse_options(parse_options_from_config(&config));

    if matches.get_flag("list-formats") {
        handle_list_formats_command(&registry);
        return;
    }

    match matches.subcommand() {
        Some(("format", sub_matches)) => {
            let input = required(sub_matches, "input");
            let output = if sub_matches.get_flag("in-place") {
                Some(input)
            } else {
                sub_matches.get_one::<String>("output").map(|s| s.as_str())
            };
            handle_format_command(&registry, input, output);
        }
        Some(("check", sub_matches)) => {
            let input = required(sub_matches, "input");
            handle_check_command(&registry, input);
        }
        Some(("inspect", sub_matches)) => {
            let path = required(sub_matches, "path");
            let transform = sub_matches
                .get_one::<String>("transform")
                .map(|s| s.as_str())
                .unwrap_or("treeviz");
            handle_inspect_command(&registry, path, transform, &extra_params);
        }
        Some(("convert", sub_matches)) => {
            let input = required(sub_matches, "input");
            let to = required(sub_matches, "to");
            let from = sub_matches
                .get_one::<String>("from")
                .cloned()
                .or_else(|| registry.detect_format_from_filename(input))
                .unwrap_or_else(|| {
                    eprintln!("Error: no format handles '{input}', pass --from");
                    std::process::exit(1);
                });
            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            handle_convert_command(&registry, input, &from, to, output, &extra_params);
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

fn required<'a>(matches: &'a ArgMatches, name: &str) -> &'a str {
    match matches.get_one::<String>(name) {
        Some(value) => value.as_str(),
        None => {
            eprintln!("Error: missing required argument '{name}'");
            std::process::exit(1);
        }
    }
}

fn read_input(path: &str) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{path}': {e}");
        std::process::exit(1);
    })
}

fn write_output(path: Option<&str>, text: &str) {
    match path {
        Some(path) => fs::write(path, text).unwrap_or_else(|e| {
            eprintln!("Error writing file '{path}': {e}");
            std::process::exit(1);
        }),
        None => print!("{text}"),
    }
}

/// Canonical file contents for a document: the serialized Markdown ending in a newline.
fn canonical_text(registry: &FormatRegistry, doc: &StyledDocument) -> String {
    let mut text = registry.serialize(doc, "markdown").unwrap_or_else(|e| {
        eprintln!("Serialization error: {e}");
        std::process::exit(1);
    });
    if !text.is_empty() {
        text.push('\n');
    }
    text
}

fn parse_markdown(registry: &FormatRegistry, source: &str) -> StyledDocument {
    registry.parse(source, "markdown").unwrap_or_else(|e| {
        eprintln!("Parse error: {e}");
        std::process::exit(1);
    })
}

fn handle_format_command(registry: &FormatRegistry, input: &str, output: Option<&str>) {
    let source = read_input(input);
    let doc = parse_markdown(registry, &source);
    write_output(output, &canonical_text(registry, &doc));
}

/// Outcome of checking one note.
#[derive(Debug, PartialEq, Eq)]
struct CheckReport {
    canonical: bool,
    stable: bool,
}

fn check_source(registry: &FormatRegistry, source: &str) -> CheckReport {
    let first = canonical_text(registry, &parse_markdown(registry, source));
    let second = canonical_text(registry, &parse_markdown(registry, &first));
    CheckReport {
        canonical: first == source,
        stable: first == second,
    }
}

fn handle_check_command(registry: &FormatRegistry, input: &str) {
    let source = read_input(input);
    let report = check_source(registry, &source);
    if !report.stable {
        eprintln!("{input}: formatting is not stable, a second pass changes the output");
    }
    if report.canonical {
        println!("{input}: canonical");
    } else {
        println!("{input}: would be reformatted");
        std::process::exit(1);
    }
}

fn handle_inspect_command(
    registry: &FormatRegistry,
    path: &str,
    transform: &str,
    extra_params: &HashMap<String, String>,
) {
    let source = read_input(path);
    let output = transforms::execute_transform(registry, &source, transform, extra_params)
        .unwrap_or_else(|e| {
            eprintln!("Execution error: {e}");
            std::process::exit(1);
        });
    print!("{output}");
}

fn handle_convert_command(
    registry: &FormatRegistry,
    input: &str,
    from: &str,
    to: &str,
    output: Option<&str>,
    extra_params: &HashMap<String, String>,
) {
    if let Err(e) = registry.get(from) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
    if let Err(e) = registry.get(to) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    let source = read_input(input);
    let doc = registry.parse(&source, from).unwrap_or_else(|e| {
        eprintln!("Parse error: {e}");
        std::process::exit(1);
    });

    let mut text = registry
        .serialize_with_options(&doc, to, extra_params)
        .unwrap_or_else(|e| {
            eprintln!("Serialization error: {e}");
            std::process::exit(1);
        });
    if !text.is_empty() && !text.ends_with('\n') {
        text.push('\n');
    }
    write_output(output, &text);
}

fn handle_list_formats_command(registry: &FormatRegistry) {
    println!("Available formats:\n");
    for name in registry.list_formats() {
        if let Ok(format) = registry.get(&name) {
            let mut modes = Vec::new();
            if format.supports_parsing() {
                modes.push("parse");
            }
            if format.supports_serialization() {
                modes.push("serialize");
            }
            println!(
                "  {name:<10} {} ({})",
                format.description(),
                modes.join(", ")
            );
        }
    }

    println!("\nInspect views:");
    for transform_name in transforms::AVAILABLE_TRANSFORMS {
        println!("  {transform_name}");
    }
}

/// Extra parameters that map onto configuration keys.
const CONFIG_OVERRIDES: &[(&str, &str)] = &[
    ("notes-root", "notes.root"),
    ("image-max-width", "images.max_width"),
];

fn load_cli_config(
    explicit_path: Option<&str>,
    extra_params: &mut HashMap<String, String>,
) -> NotemarkConfig {
    let loader = Loader::new().with_optional_file("notemark.toml");
    let mut loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    for (extra, key) in CONFIG_OVERRIDES {
        let Some(raw) = extra_params.remove(*extra) else {
            continue;
        };
        let applied = if *key == "images.max_width" {
            let width = parse_width_arg(extra, &raw);
            loader.set_override(key, width)
        } else {
            loader.set_override(key, raw)
        };
        loader = applied.unwrap_or_else(|err| {
            eprintln!("Invalid value for --extra-{extra}: {err}");
            std::process::exit(1);
        });
    }

    loader.build().unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}

fn parse_width_arg(flag: &str, raw: &str) -> f64 {
    match raw.parse::<f64>() {
        Ok(width) if width > 0.0 => width,
        _ => {
            eprintln!("Invalid width '{raw}' for --extra-{flag}");
            std::process::exit(1);
        }
    }
}

fn parse_options_from_config(config: &NotemarkConfig) -> ParseOptions {
    ParseOptions {
        theme: Theme::from(config),
        notes_root: config.notes_root(),
        home_dir: config.home_dir(),
        image_loader: Box::new(FsImageLoader),
    }
}
