use std::fs::File;
use std::io::BufWriter;
use std::process;

use clap::Parser;
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};

use hierarchy::{ReportJson, build_hierarchy};
use report::{Heading, LineCursor, ParseError, Table};

const DEFAULT_SECTION: &str = "1. Utilization by Hierarchy";

#[derive(Parser)]
#[command(
    name = "rpt2json",
    version,
    about = "Convert hierarchical utilization reports to JSON"
)]
struct Cli {
    /// Utilization report file
    input: String,

    /// Output JSON file
    #[arg(short, long, default_value = "out.json")]
    output: String,

    /// Section heading containing the hierarchy table (exact match)
    #[arg(long, default_value = DEFAULT_SECTION)]
    section: String,

    /// List every section heading found in the report and exit
    #[arg(long)]
    list_headings: bool,

    /// Print the hierarchy as an indented tree instead of writing JSON
    #[arg(long)]
    tree: bool,

    /// Disable colored error output
    #[arg(long)]
    no_color: bool,
}

fn main() {
    let cli = Cli::parse();
    let color_choice = if cli.no_color {
        ColorChoice::Never
    } else {
        ColorChoice::Auto
    };

    // Read the whole report; the heading positions recorded during the
    // scan are byte offsets into this one string.
    let source = match std::fs::read_to_string(&cli.input) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: cannot read '{}': {}", cli.input, e);
            process::exit(1);
        }
    };

    let mut files = SimpleFiles::new();
    let file_id = files.add(cli.input.clone(), source.clone());

    // Collect all of the report's headings up front
    let mut cursor = LineCursor::new(&source);
    let headings = Heading::scan_all(&mut cursor);

    if cli.list_headings {
        for heading in &headings {
            println!("{}", heading.title);
        }
        return;
    }

    // Seek to the requested section
    let Some(section) = headings.iter().find(|h| h.title == cli.section) else {
        eprintln!("error: heading '{}' not found in '{}'", cli.section, cli.input);
        process::exit(1);
    };
    cursor.seek(section.pos);

    // Parse the hierarchical utilization table, rooted at "/"
    let table = match Table::parse_next(&mut cursor, "/", file_id) {
        Ok(Some(table)) => table,
        Ok(None) => {
            let error = ParseError::error(
                format!("no table found after heading '{}'", section.title),
                section.pos..section.pos,
                file_id,
            );
            emit_parse_error(color_choice, &files, &error);
        }
        Err(error) => emit_parse_error(color_choice, &files, &error),
    };

    let values = match table.value_columns() {
        Ok(columns) => columns,
        Err(error) => emit_parse_error(color_choice, &files, &error),
    };
    let root = build_hierarchy(&table, &table.name);

    if cli.tree {
        print!("{}", root.render_tree());
        return;
    }

    let output = ReportJson {
        values,
        hierarchy: &root,
    };
    let file = match File::create(&cli.output) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("error: cannot write '{}': {}", cli.output, e);
            process::exit(1);
        }
    };
    if let Err(e) = serde_json::to_writer_pretty(BufWriter::new(file), &output) {
        eprintln!("error: cannot write '{}': {}", cli.output, e);
        process::exit(1);
    }
}

fn emit_parse_error(
    color_choice: ColorChoice,
    files: &SimpleFiles<String, String>,
    error: &ParseError,
) -> ! {
    let writer = StandardStream::stderr(color_choice);
    let config = term::Config::default();
    let _ = term::emit_to_write_style(&mut writer.lock(), &config, files, &error.to_diagnostic());
    process::exit(1);
}
