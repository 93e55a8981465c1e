//! typedxml — convert JSON documents to type-annotated XML and back.

use std::fs;
use std::io::Read;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing::info;
use typedxml::{Json2Xml, Json2XmlSettings, ParentKeyPolicy, Xml2Json, from_json_str};

#[derive(Parser)]
#[command(name = "typedxml", version, about = "JSON <-> XML structural converter")]
struct Cli {
    /// Log level filter (error, warn, info, debug, trace)
    #[arg(long, default_value = "info", env = "TYPEDXML_LOG", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert a JSON document to XML
    ToXml(ToXmlArgs),
    /// Convert an XML document back to JSON
    ToJson(ToJsonArgs),
}

#[derive(Args)]
struct ToXmlArgs {
    /// Input JSON file; stdin if omitted
    input: Option<PathBuf>,

    /// Output file; stdout if omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// JSON file with a full settings bundle; flags below override it
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Root element name
    #[arg(long)]
    root: Option<String>,

    /// Array item element name
    #[arg(long)]
    item: Option<String>,

    /// Default namespace of the output document
    #[arg(long)]
    namespace: Option<String>,

    /// Prefix for the empty-array root
    #[arg(long)]
    array_prefix: Option<String>,

    /// Prefix for integral values
    #[arg(long)]
    int_prefix: Option<String>,

    /// Prefix for floating point values
    #[arg(long)]
    real_prefix: Option<String>,

    /// Prefix for boolean values
    #[arg(long)]
    bool_prefix: Option<String>,

    /// Prefix for null values
    #[arg(long)]
    null_prefix: Option<String>,

    /// Prefix for binary values
    #[arg(long)]
    binary_prefix: Option<String>,

    /// Prefix for text values
    #[arg(long)]
    text_prefix: Option<String>,

    /// Object field name mapped to element text content
    #[arg(long)]
    text_key: Option<String>,

    /// Drop all type annotations from the output
    #[arg(long)]
    omit_type_info: bool,

    /// Name array elements after their originating field key
    #[arg(long)]
    keep_parent_key: bool,

    /// Indent the XML output
    #[arg(long)]
    pretty: bool,
}

#[derive(Args)]
struct ToJsonArgs {
    /// Input XML file; stdin if omitted
    input: Option<PathBuf>,

    /// Output file; stdout if omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Object field name that receives element text content
    #[arg(long)]
    text_key: Option<String>,

    /// Translate XML comments into comment-key fields
    #[arg(long)]
    translate_comments: bool,

    /// Mark attribute-derived fields with a leading '@'
    #[arg(long)]
    prefixed_attributes: bool,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("typedxml={}", level)));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn read_input(path: &Option<PathBuf>) -> anyhow::Result<String> {
    match path {
        Some(path) => Ok(fs::read_to_string(path)?),
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

fn write_output(path: &Option<PathBuf>, content: &str) -> anyhow::Result<()> {
    match path {
        Some(path) => fs::write(path, content)?,
        None => println!("{}", content),
    }
    Ok(())
}

fn build_settings(args: &ToXmlArgs) -> anyhow::Result<Json2XmlSettings> {
    let mut settings = match &args.settings {
        Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
        None => Json2XmlSettings::default(),
    };
    macro_rules! apply {
        ($field:ident, $flag:expr) => {
            if let Some(value) = &$flag {
                settings.$field = value.clone();
            }
        };
    }
    apply!(root_name, args.root);
    apply!(primitive_array_item, args.item);
    apply!(array_prefix, args.array_prefix);
    apply!(int_prefix, args.int_prefix);
    apply!(real_prefix, args.real_prefix);
    apply!(bool_prefix, args.bool_prefix);
    apply!(null_prefix, args.null_prefix);
    apply!(binary_prefix, args.binary_prefix);
    apply!(text_prefix, args.text_prefix);
    apply!(text_key, args.text_key);
    if args.namespace.is_some() {
        settings.namespace = args.namespace.clone();
    }
    Ok(settings)
}

fn to_xml(args: &ToXmlArgs) -> anyhow::Result<()> {
    let input = read_input(&args.input)?;
    info!(bytes = input.len(), "Read JSON input");

    let node = from_json_str(&input)?;
    let policy = if args.keep_parent_key {
        ParentKeyPolicy::PreserveParentKey
    } else {
        ParentKeyPolicy::ItemElements
    };
    let converter = Json2Xml::new(build_settings(args)?)
        .with_loose_type_info(args.omit_type_info)
        .with_parent_key_policy(policy);

    let doc = converter.to_xml(&node)?;
    let xml = if args.pretty {
        doc.to_xml_pretty()?
    } else {
        doc.to_xml()?
    };

    info!(
        declared_prefixes = doc.bindings.len(),
        "Converted JSON to XML"
    );
    write_output(&args.output, &xml)
}

fn to_json(args: &ToJsonArgs) -> anyhow::Result<()> {
    let input = read_input(&args.input)?;
    info!(bytes = input.len(), "Read XML input");

    let mut converter = Xml2Json::default()
        .with_translate_comments(args.translate_comments)
        .with_simple_attributes(!args.prefixed_attributes);
    if let Some(text_key) = &args.text_key {
        let mut settings = converter.settings().clone();
        settings.text_key = text_key.clone();
        converter = Xml2Json::new(settings);
    }

    let node = converter.to_json_str(&input)?;
    let json = if args.pretty {
        typedxml::to_json_string_pretty(&node)?
    } else {
        typedxml::to_json_string(&node)?
    };

    info!("Converted XML to JSON");
    write_output(&args.output, &json)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    match &cli.command {
        Command::ToXml(args) => to_xml(args),
        Command::ToJson(args) => to_json(args),
    }
}
