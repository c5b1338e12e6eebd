use anyhow::{anyhow, bail, Context, Result};
use log::{debug, info, warn};
use rdfprint_api::print::{print_statements, PrintMode, PrintSummary};
use rdfprint_api::store::Model;
use rdfprint_xml::RdfXmlParser;
use reqwest::header::ACCEPT;
use std::env::current_dir;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use url::Url;

/// How a document is printed.
#[derive(Debug, Clone, Copy)]
pub struct PrintOptions {
    pub mode: PrintMode,
    /// Skip the invalid elements instead of failing.
    pub robust: bool,
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self {
            mode: PrintMode::default(),
            robust: true,
        }
    }
}

/// Turns the command line argument into a URL.
///
/// An argument without `:` is a file name, relative to the current directory.
pub fn source_url(argument: &str) -> Result<Url> {
    if argument.contains(':') {
        return Url::parse(argument).with_context(|| format!("Invalid URI {}", argument));
    }
    let path = current_dir()?.join(argument);
    Url::from_file_path(&path)
        .map_err(|()| anyhow!("Failed to build a file URI for {}", path.display()))
}

/// Opens the document behind a `file:`, `http:` or `https:` URL.
pub fn open_source(url: &Url) -> Result<Box<dyn BufRead>> {
    match url.scheme() {
        "file" => {
            let path = url
                .to_file_path()
                .map_err(|()| anyhow!("Failed to open URL {} - not a local file", url))?;
            let file = File::open(&path).with_context(|| format!("Failed to open URL {}", url))?;
            Ok(Box::new(BufReader::new(file)))
        }
        "http" | "https" => {
            debug!("Fetching {}", url);
            let response = reqwest::blocking::Client::new()
                .get(url.clone())
                .header(ACCEPT, "application/rdf+xml")
                .send()
                .with_context(|| format!("Failed to open URL {}", url))?;
            if !response.status().is_success() {
                bail!("Failed to open URL {} - HTTP status {}", url, response.status());
            }
            Ok(Box::new(BufReader::new(response)))
        }
        _ => bail!(
            "Failed to open URL {} - only file:, http: and https: URLs can be read",
            url
        ),
    }
}

/// Parses the RDF/XML document named by `source` and writes its statements to `output`.
///
/// The source is resolved and opened before anything is parsed: nothing is written if it can not be read.
pub fn run(source: &str, options: PrintOptions, output: impl Write) -> Result<PrintSummary> {
    let url = source_url(source)?;
    let reader = open_source(&url)?;
    info!("Parsing {}", url);

    let mut model = Model::new();
    model.set_source_iri(url.as_str());
    let mut parser = RdfXmlParser::new(reader, url.as_str())?.with_robust_mode(options.robust);
    let summary = print_statements(&mut parser, &mut model, options.mode, output)
        .map_err(|error| anyhow!("{}", error))?;
    if parser.recovered_errors() > 0 {
        warn!(
            "{} invalid elements of {} have been skipped",
            parser.recovered_errors(),
            url
        );
    }
    info!(
        "Printed {} statements from {} with {} warnings",
        summary.printed, url, summary.warnings
    );
    Ok(summary)
}

#[cfg(test)]
mod test {
    use super::*;
    use std::fs;

    const DOCUMENT: &str = "<rdf:RDF xmlns:rdf=\"http://www.w3.org/1999/02/22-rdf-syntax-ns#\">
  <rdf:Description rdf:about=\"urn:a\"><rdf:type rdf:resource=\"urn:b\"/></rdf:Description>
</rdf:RDF>";

    #[test]
    fn file_names_become_file_urls() -> Result<()> {
        let url = source_url("doc.rdf")?;
        assert_eq!("file", url.scheme());
        assert_eq!(current_dir()?.join("doc.rdf"), url.to_file_path().unwrap());
        Ok(())
    }

    #[test]
    fn urls_are_kept() -> Result<()> {
        assert_eq!("file:///tmp/doc.rdf", source_url("file:///tmp/doc.rdf")?.as_str());
        assert_eq!("http://example.com/doc", source_url("http://example.com/doc")?.as_str());
        Ok(())
    }

    fn open_error(url: &Url) -> anyhow::Error {
        match open_source(url) {
            Ok(_) => panic!("{} should not be readable", url),
            Err(error) => error,
        }
    }

    #[test]
    fn unknown_schemes_are_refused() {
        let error = open_error(&Url::parse("ftp://example.com/doc").unwrap());
        assert!(error.to_string().starts_with("Failed to open URL ftp://example.com/doc"));
    }

    #[test]
    fn failing_remote_fetch_is_reported() {
        // nothing listens on port 1
        let url = Url::parse("http://127.0.0.1:1/doc.rdf").unwrap();
        let error = open_error(&url);
        assert!(error
            .to_string()
            .starts_with("Failed to open URL http://127.0.0.1:1/doc.rdf"));
    }

    #[test]
    fn missing_files_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        let url = Url::from_file_path(dir.path().join("missing.rdf")).unwrap();
        let error = open_error(&url);
        assert!(error.to_string().starts_with("Failed to open URL file://"));
        assert_eq!(2, error.chain().count());
    }

    #[test]
    fn run_in_both_modes() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("doc.rdf");
        fs::write(&path, DOCUMENT)?;
        let source = Url::from_file_path(&path).unwrap();
        for mode in [PrintMode::Streaming, PrintMode::Buffered] {
            let mut output = Vec::default();
            let summary = run(
                source.as_str(),
                PrintOptions {
                    mode,
                    robust: true,
                },
                &mut output,
            )?;
            assert_eq!(1, summary.printed);
            assert_eq!(
                "Statement <urn:a> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <urn:b>\n",
                String::from_utf8(output)?
            );
        }
        Ok(())
    }
}
