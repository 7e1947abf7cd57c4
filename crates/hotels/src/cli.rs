//! Command-line front end for the three rendering pipelines.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use hotel_render::template::DEFAULT_BINDING;
use hotel_render::{
    render_file, substitute, Catalog, Hotel, MiniJinjaEngine, Placeholders, RecordView,
    TemplateLocator, TeraEngine,
};

/// Template sets compiled into the binary, used when no template root is given.
mod shipped {
    pub const SUBSTITUTION: &str = include_str!("../templates/substitution/template.html");

    pub const MINIJINJA: &[(&str, &str)] = &[(
        "template.html",
        include_str!("../templates/minijinja/template.html"),
    )];

    pub const TERA: &[(&str, &str)] = &[
        ("base.html", include_str!("../templates/tera/base.html")),
        (
            "partials/hotel.html",
            include_str!("../templates/tera/partials/hotel.html"),
        ),
        ("template.html", include_str!("../templates/tera/template.html")),
    ];
}

const SUBSTITUTION_TEMPLATE: &str = "substitution/template.html";
const MINIJINJA_TEMPLATE: &str = "minijinja/template.html";
const TERA_DIR: &str = "tera";
const TERA_TEMPLATE: &str = "template.html";

#[derive(Debug, Parser)]
#[command(name = "hotels", version, about = "Render the hotel listing through different template pipelines")]
pub struct Cli {
    /// Catalog file (.json, .yaml, .yml or .csv); the built-in sample is used when omitted
    #[arg(long, global = true, value_name = "FILE")]
    catalog: Option<PathBuf>,

    /// Root holding substitution/, minijinja/ and tera/ template sets; the built-in templates are used when omitted
    #[arg(long, global = true, value_name = "DIR")]
    templates: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Replace ###HOTELNAME### and ###STARS### markers in a plain template
    Substitute {
        /// Template document [default: <templates>/substitution/template.html]
        #[arg(long, value_name = "FILE")]
        template: Option<PathBuf>,
    },
    /// Render a single template file with MiniJinja
    Minijinja {
        /// Template file [default: <templates>/minijinja/template.html]
        #[arg(long, value_name = "FILE")]
        template: Option<PathBuf>,

        /// Variable the hotel list is bound to
        #[arg(long, default_value = DEFAULT_BINDING)]
        binding: String,
    },
    /// Render a template from a template directory with Tera
    Tera {
        /// Template directory [default: <templates>/tera]
        #[arg(long, value_name = "DIR")]
        dir: Option<PathBuf>,

        /// Template to render, relative to the directory
        #[arg(long, default_value = TERA_TEMPLATE)]
        name: String,

        /// Variable the hotel list is bound to
        #[arg(long, default_value = DEFAULT_BINDING)]
        binding: String,
    },
    /// Run all three pipelines in order
    All,
}

/// Runs `cli` against `out` and flushes it.
///
/// A reader that closes the pipe early (`hotels | head`) ends the run
/// without an error.
pub fn execute(cli: Cli, out: &mut impl Write) -> anyhow::Result<()> {
    match run(cli, out).and_then(|()| Ok(out.flush()?)) {
        Err(err) if is_broken_pipe(&err) => {
            log::debug!("output closed before the document was written");
            Ok(())
        }
        result => result,
    }
}

/// Runs the selected pipeline and writes the rendered document to `out`.
pub fn run(cli: Cli, out: &mut impl Write) -> anyhow::Result<()> {
    let catalog = match &cli.catalog {
        Some(path) => Catalog::from_path(path)?,
        None => Catalog::sample(),
    };
    let hotels = catalog.hotels();
    let root = cli.templates.as_deref();

    match cli.command.unwrap_or(Command::All) {
        Command::Substitute { template } => {
            let path = template.or_else(|| root.map(|r| r.join(SUBSTITUTION_TEMPLATE)));
            write_document(out, &substitution(path.as_deref(), hotels)?)
        }
        Command::Minijinja { template, binding } => {
            let locator = minijinja_locator(template, root);
            write_document(out, &minijinja(locator, &binding, hotels)?)
        }
        Command::Tera { dir, name, binding } => {
            let locator = tera_locator(dir, root, name);
            write_document(out, &tera(locator, &binding, hotels)?)
        }
        Command::All => {
            let substitution_path = root.map(|r| r.join(SUBSTITUTION_TEMPLATE));
            let documents = [
                substitution(substitution_path.as_deref(), hotels)?,
                minijinja(minijinja_locator(None, root), DEFAULT_BINDING, hotels)?,
                tera(
                    tera_locator(None, root, TERA_TEMPLATE.to_string()),
                    DEFAULT_BINDING,
                    hotels,
                )?,
            ];
            for document in &documents {
                write_document(out, document)?;
            }
            Ok(())
        }
    }
}

/// True if `err` was caused by writing to a closed pipe.
pub fn is_broken_pipe(err: &anyhow::Error) -> bool {
    err.chain()
        .filter_map(|cause| cause.downcast_ref::<io::Error>())
        .any(|e| e.kind() == io::ErrorKind::BrokenPipe)
}

fn minijinja_locator(template: Option<PathBuf>, root: Option<&Path>) -> TemplateLocator {
    match (template, root) {
        (Some(path), _) => TemplateLocator::file(path),
        (None, Some(root)) => TemplateLocator::file(root.join(MINIJINJA_TEMPLATE)),
        (None, None) => TemplateLocator::embedded(shipped::MINIJINJA, "template.html"),
    }
}

fn tera_locator(dir: Option<PathBuf>, root: Option<&Path>, name: String) -> TemplateLocator {
    match (dir, root) {
        (Some(dir), _) => TemplateLocator::directory(dir, name),
        (None, Some(root)) => TemplateLocator::directory(root.join(TERA_DIR), name),
        (None, None) => TemplateLocator::embedded(shipped::TERA, name),
    }
}

fn substitution(path: Option<&Path>, hotels: &[Hotel]) -> anyhow::Result<String> {
    let rendered = match path {
        Some(path) => render_file(path, hotels, &Placeholders::default())
            .with_context(|| format!("substitution pipeline failed for {}", path.display()))?,
        None => substitute(shipped::SUBSTITUTION, hotels, &Placeholders::default()),
    };
    Ok(rendered.text)
}

fn minijinja(locator: TemplateLocator, binding: &str, hotels: &[Hotel]) -> anyhow::Result<String> {
    let failed = format!("minijinja pipeline failed for {locator}");
    RecordView::new(Box::new(MiniJinjaEngine::new()), locator)
        .with_binding(binding)
        .render(hotels)
        .context(failed)
}

fn tera(locator: TemplateLocator, binding: &str, hotels: &[Hotel]) -> anyhow::Result<String> {
    let failed = format!("tera pipeline failed for {locator}");
    RecordView::new(Box::new(TeraEngine::new()), locator)
        .with_binding(binding)
        .render(hotels)
        .context(failed)
}

fn write_document(out: &mut impl Write, document: &str) -> anyhow::Result<()> {
    out.write_all(document.as_bytes())?;
    if !document.ends_with('\n') {
        out.write_all(b"\n")?;
    }
    Ok(())
}
