use std::io::{self, Read, Write};
use std::process;

use ssml_fragments::{
    nodes, AttributeEscaping, Attributes, Error, FragmentBuilder, FragmentConfig, Parsed,
};
use tracing::{info, Level};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "\
usage: ssml-fragments [-t] [--prefix P] [--escape] [--attr NAME=VALUE]... <kind> [text]
       ssml-fragments [-t] --parse [--multiple] [html]

kinds: p, text, br, empty, action, pause, img
--parse reads html from stdin when it is not given as an argument";

#[derive(Default)]
struct Args {
    pub parse: bool,
    pub multiple: bool,
    pub prefix: Option<String>,
    pub escape: bool,
    pub attributes: Vec<(String, String)>,
    pub trace: bool,
    pub input: Option<String>,
    pub text: Option<String>,
}

fn main() {
    let args = match parse_args() {
        Ok(Some(args)) => args,
        Ok(None) => {
            println!("{}", USAGE);
            return;
        }
        Err(e) => {
            eprintln!("error: {}\n\n{}", e, USAGE);
            process::exit(2);
        }
    };
    if args.trace {
        tracing_subscriber::fmt::fmt()
            .with_span_events(FmtSpan::ACTIVE)
            .with_max_level(Level::TRACE)
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .finish()
            .init();
        info!("Logger initialized");
    }

    if let Err(e) = run(args, &mut io::stdout().lock()) {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

fn parse_attribute(s: &str) -> Result<(String, String), Error> {
    match s.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(Error::InvalidAttribute(s.to_string())),
    }
}

fn parse_args() -> Result<Option<Args>, Error> {
    let mut pargs = pico_args::Arguments::from_env();
    if pargs.contains(["-h", "--help"]) {
        return Ok(None);
    }
    let args = Args {
        parse: pargs.contains("--parse"),
        multiple: pargs.contains("--multiple"),
        prefix: pargs.opt_value_from_str("--prefix")?,
        escape: pargs.contains("--escape"),
        attributes: pargs.values_from_fn("--attr", parse_attribute)?,
        trace: pargs.contains(["-t", "--trace"]),
        input: pargs.opt_free_from_str()?,
        text: pargs.opt_free_from_str()?,
    };
    let rest = pargs.finish();
    if !rest.is_empty() {
        eprintln!("warning: unused arguments: {:?}", rest);
    }
    Ok(Some(args))
}

fn run(args: Args, out: &mut impl Write) -> Result<(), Error> {
    if args.parse {
        let html = match args.input {
            Some(html) => html,
            None => {
                let mut html = String::new();
                io::stdin().read_to_string(&mut html)?;
                html
            }
        };
        match nodes::parse(&html, args.multiple) {
            Parsed::Node(Some(node)) => writeln!(out, "{}", node)?,
            Parsed::Node(None) => {}
            Parsed::Document(doc) => {
                if !doc.is_empty() {
                    writeln!(out, "{}", doc)?;
                }
            }
        }
        return Ok(());
    }

    let mut config = FragmentConfig::default();
    if let Some(prefix) = args.prefix {
        config.prefix = prefix;
    }
    if args.escape {
        config.escaping = AttributeEscaping::Html;
    }
    let builder = FragmentBuilder::new(config);
    let kind = args.input.ok_or(Error::MissingTagKind)?;
    let attributes: Attributes = args.attributes.into_iter().collect();
    let fragment = builder.build_named(
        &kind,
        args.text.as_deref().unwrap_or(""),
        Some(&attributes),
    )?;
    writeln!(out, "{}", fragment)?;
    Ok(())
}

#[cfg(test)]
#[test]
fn test_parse_attribute() {
    assert_eq!(
        parse_attribute("id=1").unwrap(),
        ("id".to_string(), "1".to_string())
    );
    assert_eq!(
        parse_attribute("data-x=a=b").unwrap(),
        ("data-x".to_string(), "a=b".to_string())
    );
    assert!(matches!(parse_attribute("novalue"), Err(Error::InvalidAttribute(_))));
    assert!(parse_attribute("=1").is_err());
}

#[cfg(test)]
fn run_to_string(args: Args) -> Result<String, Error> {
    let mut out = Vec::new();
    run(args, &mut out)?;
    Ok(String::from_utf8(out).unwrap())
}

#[cfg(test)]
#[test]
fn test_render_fragment() {
    let args = Args {
        input: Some("p".to_string()),
        text: Some("hi".to_string()),
        ..Default::default()
    };
    assert_eq!(
        run_to_string(args).unwrap(),
        "<xiaoi-p ><xiaoi-text>hi</xiaoi-text><xiaoi-br ><br /></xiaoi-br></xiaoi-p>\n"
    );
}

#[cfg(test)]
#[test]
fn test_render_with_prefix_escape_and_attributes() {
    let args = Args {
        prefix: Some("ssml".to_string()),
        escape: true,
        attributes: vec![
            ("id".to_string(), "1".to_string()),
            ("title".to_string(), "a\"b".to_string()),
        ],
        input: Some("br".to_string()),
        ..Default::default()
    };
    assert_eq!(
        run_to_string(args).unwrap(),
        "<ssml-br id=\"1\" title=\"a&quot;b\" ><br /></ssml-br>\n"
    );
}

#[cfg(test)]
#[test]
fn test_render_errors() {
    assert!(matches!(
        run_to_string(Args::default()),
        Err(Error::MissingTagKind)
    ));
    let args = Args {
        input: Some("bold".to_string()),
        ..Default::default()
    };
    assert!(matches!(run_to_string(args), Err(Error::UnknownTagKind(_))));
}

#[cfg(test)]
#[test]
fn test_parse_first_node_and_document() {
    let html = "<p>a</p><p>b</p>";
    let args = Args {
        parse: true,
        input: Some(html.to_string()),
        ..Default::default()
    };
    assert_eq!(run_to_string(args).unwrap(), "<p>a</p>\n");

    let args = Args {
        parse: true,
        multiple: true,
        input: Some(html.to_string()),
        ..Default::default()
    };
    assert_eq!(run_to_string(args).unwrap(), "<p>a</p><p>b</p>\n");
}

#[cfg(test)]
#[test]
fn test_parse_empty_input_prints_nothing() {
    for multiple in [false, true] {
        let args = Args {
            parse: true,
            multiple,
            input: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(run_to_string(args).unwrap(), "");
    }
}
