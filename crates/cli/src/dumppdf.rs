//! dumppdf - Dump PDF file structure
//!
//! Prints the trailer, the cross-reference chain and individual objects of
//! PDF files. Objects are printed as XML; `--json` prints a summary instead.

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use memmap2::Mmap;
use pdfp_core::atoms::{Atom, AtomTable};
use pdfp_core::document::PDFDocument;
use pdfp_core::model::{PDFDict, PDFObjRef, PDFObject};
use serde_json::json;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Escape special characters for XML output.
fn escape(s: &[u8]) -> String {
    let mut result = String::new();
    for &byte in s {
        match byte {
            b'&' => result.push_str("&amp;"),
            b'<' => result.push_str("&lt;"),
            b'>' => result.push_str("&gt;"),
            b'"' => result.push_str("&quot;"),
            b'\'' => result.push_str("&#39;"),
            b'\\' => result.push_str("&#92;"),
            0..=31 | 127..=255 => {
                result.push_str(&format!("&#{byte};"));
            }
            _ => result.push(byte as char),
        }
    }
    result
}

/// Printable content of an atom.
fn atom_text(atoms: &AtomTable<'_>, atom: Atom) -> String {
    match atoms.resolve(atom) {
        Some(bytes) => escape(bytes),
        None => atom.to_string(),
    }
}

fn dumpxml<W: Write>(out: &mut W, atoms: &AtomTable<'_>, obj: &PDFObject<'_>) -> Result<()> {
    match obj {
        PDFObject::Nothing => {
            write!(out, "<nothing />")?;
        }
        PDFObject::Null => {
            write!(out, "<null />")?;
        }
        PDFObject::Bool(b) => {
            write!(
                out,
                "<boolean>{}</boolean>",
                if *b { "true" } else { "false" }
            )?;
        }
        PDFObject::Int(n) => {
            write!(out, "<number>{n}</number>")?;
        }
        PDFObject::Real(n) => {
            write!(out, "<number>{n}</number>")?;
        }
        PDFObject::String(s) => {
            write!(out, r#"<string size="{}">{}</string>"#, s.len(), escape(s))?;
        }
        PDFObject::HexString(s) => {
            write!(out, r#"<hexstring size="{}">{}</hexstring>"#, s.len(), escape(s))?;
        }
        PDFObject::Name(name) => {
            write!(out, "<literal>{}</literal>", atom_text(atoms, *name))?;
        }
        PDFObject::Keyword(kw) => {
            write!(out, "<keyword>{}</keyword>", atom_text(atoms, *kw))?;
        }
        PDFObject::Array(arr) => {
            writeln!(out, r#"<list size="{}">"#, arr.len())?;
            for item in arr {
                dumpxml(out, atoms, item)?;
                writeln!(out)?;
            }
            write!(out, "</list>")?;
        }
        PDFObject::Dict(dict) => {
            dumpdict(out, atoms, dict)?;
        }
        PDFObject::Ref(objref) => {
            write!(out, r#"<ref id="{}" gen="{}" />"#, objref.objid, objref.genno)?;
        }
    }
    Ok(())
}

fn dumpdict<W: Write>(out: &mut W, atoms: &AtomTable<'_>, dict: &PDFDict<'_>) -> Result<()> {
    writeln!(out, r#"<dict size="{}">"#, dict.len())?;
    for (k, v) in dict {
        writeln!(out, "<key>{}</key>", atom_text(atoms, *k))?;
        write!(out, "<value>")?;
        dumpxml(out, atoms, v)?;
        writeln!(out, "</value>")?;
    }
    write!(out, "</dict>")?;
    Ok(())
}

/// Dump the newest trailer.
fn dumptrailer<W: Write>(out: &mut W, doc: &PDFDocument<'_>) -> Result<()> {
    writeln!(out, "<trailer>")?;
    dumpdict(out, doc.atoms(), doc.trailer_dict())?;
    writeln!(out)?;
    writeln!(out, "</trailer>")?;
    Ok(())
}

/// Dump the xref chain and every live object.
fn dumpallobjs<W: Write>(out: &mut W, doc: &mut PDFDocument<'_>) -> Result<()> {
    writeln!(out, "<pdf>")?;

    for section in doc.sections() {
        writeln!(out, r#"<xref offset="{}">"#, section.offset)?;
        for header in &section.headers {
            writeln!(
                out,
                r#"<subsection first="{}" count="{}" />"#,
                header.first, header.count
            )?;
        }
        writeln!(out, "</xref>")?;
    }

    let objids: Vec<u32> = doc.xref().in_use().map(|(id, _)| id).collect();
    for objid in objids {
        match doc.get_object(objid) {
            Ok(obj) => {
                writeln!(out, r#"<object id="{objid}">"#)?;
                dumpxml(out, doc.atoms(), &obj)?;
                writeln!(out)?;
                writeln!(out, "</object>")?;
                writeln!(out)?;
            }
            Err(e) => {
                tracing::warn!(objid, error = %e, "object not readable");
            }
        }
    }

    dumptrailer(out, doc)?;
    writeln!(out, "</pdf>")?;
    Ok(())
}

/// Dump the selected objects.
fn dumpobjs<W: Write>(out: &mut W, doc: &mut PDFDocument<'_>, objids: &[u32]) -> Result<()> {
    for &objid in objids {
        match doc.get_object(objid) {
            Ok(obj) => {
                dumpxml(out, doc.atoms(), &obj)?;
                writeln!(out)?;
            }
            Err(e) => {
                tracing::warn!(objid, error = %e, "object not readable");
            }
        }
    }
    Ok(())
}

fn fmt_ref(r: Option<PDFObjRef>) -> String {
    r.map_or_else(|| "-".to_string(), |r| r.to_string())
}

fn dumpsummary<W: Write>(out: &mut W, path: &Path, doc: &PDFDocument<'_>) -> Result<()> {
    writeln!(out, "{}: {} bytes", path.display(), doc.data().len())?;
    writeln!(out, "version: {}", String::from_utf8_lossy(doc.version()))?;
    writeln!(out, "startxref: {}", doc.startxref())?;
    writeln!(out, "size: {}", doc.size())?;
    writeln!(out, "root: {}", fmt_ref(doc.root()))?;
    writeln!(out, "info: {}", fmt_ref(doc.info()))?;
    writeln!(out, "objects in use: {}", doc.xref().in_use().count())?;
    writeln!(out, "xref sections: {}", doc.sections().len())?;
    Ok(())
}

fn dumpjson<W: Write>(out: &mut W, path: &Path, doc: &PDFDocument<'_>) -> Result<()> {
    let sections: Vec<_> = doc
        .sections()
        .iter()
        .map(|s| {
            json!({
                "offset": s.offset,
                "prev": s.prev,
                "subsections": s.headers.iter().map(|h| [h.first, h.count]).collect::<Vec<_>>(),
            })
        })
        .collect();
    let summary = json!({
        "file": path.display().to_string(),
        "bytes": doc.data().len(),
        "version": String::from_utf8_lossy(doc.version()),
        "startxref": doc.startxref(),
        "size": doc.size(),
        "root": doc.root().map(|r| r.to_string()),
        "info": doc.info().map(|r| r.to_string()),
        "in_use": doc.xref().in_use().count(),
        "sections": sections,
    });
    writeln!(out, "{}", serde_json::to_string_pretty(&summary)?)?;
    Ok(())
}

/// A command line tool for dumping PDF file structure.
#[derive(Parser, Debug)]
#[command(name = "dumppdf")]
#[command(author, version, about = "Dump PDF trailer, xref chain and objects", long_about = None)]
struct Args {
    /// One or more paths to PDF files
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Use debug logging level
    #[arg(short = 'd', long, action = ArgAction::SetTrue)]
    debug: bool,

    /// Comma-separated list of object IDs to dump
    #[arg(short = 'i', long = "objid", value_delimiter = ',')]
    objids: Vec<u32>,

    /// Dump the xref chain and all live objects
    #[arg(short = 'a', long = "all", action = ArgAction::SetTrue, conflicts_with = "objids")]
    all: bool,

    /// Print a JSON summary instead of text
    #[arg(long, action = ArgAction::SetTrue)]
    json: bool,

    /// Path to file where output is written, or "-" for stdout
    #[arg(short = 'o', long, default_value = "-")]
    outfile: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.debug { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let mut output: Box<dyn Write> = if args.outfile == "-" {
        Box::new(BufWriter::new(io::stdout()))
    } else {
        let file = File::create(&args.outfile)
            .with_context(|| format!("cannot create {}", args.outfile))?;
        Box::new(BufWriter::new(file))
    };

    for path in &args.files {
        let file = File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
        let mmap = unsafe { Mmap::map(&file) }
            .with_context(|| format!("cannot map {}", path.display()))?;
        let mut doc = PDFDocument::new(&mmap)
            .with_context(|| format!("{}: not a readable PDF", path.display()))?;

        if args.json {
            dumpjson(&mut output, path, &doc)?;
        } else {
            dumpsummary(&mut output, path, &doc)?;
        }

        if args.all {
            dumpallobjs(&mut output, &mut doc)?;
        } else if !args.objids.is_empty() {
            dumpobjs(&mut output, &mut doc, &args.objids)?;
        } else if !args.json {
            dumptrailer(&mut output, &doc)?;
        }
    }

    output.flush()?;
    Ok(())
}
