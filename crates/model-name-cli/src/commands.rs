//! Subcommand implementations
//!
//! Each command writes its report to the given writer and returns whether
//! the input was accepted, which `main` turns into the exit code.

use anyhow::{Context, Result};
use model_name_core::{
    parse_digest, parse_name_no_defaults, parse_name_with, Digest, Name, NameDefaults,
};
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;
use tracing::{debug, info};

/// Everything known about a parsed name
#[derive(Debug, Serialize)]
pub struct NameReport {
    pub host: String,
    pub namespace: String,
    pub model: String,
    pub tag: String,
    pub raw_digest: String,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digest: Option<Digest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl NameReport {
    pub fn new(name: &Name) -> Self {
        let validation = name.validate();
        let digest = name.digest();
        Self {
            host: name.host().to_string(),
            namespace: name.namespace().to_string(),
            model: name.model().to_string(),
            tag: name.tag().to_string(),
            raw_digest: name.raw_digest().to_string(),
            valid: validation.is_ok(),
            name: validation.is_ok().then(|| name.to_string()),
            digest: digest.is_valid().then_some(digest),
            error: validation.err().map(|e| e.to_string()),
        }
    }

    fn write_text(&self, out: &mut impl Write) -> Result<()> {
        writeln!(out, "host:       {}", self.host)?;
        writeln!(out, "namespace:  {}", self.namespace)?;
        writeln!(out, "model:      {}", self.model)?;
        writeln!(out, "tag:        {}", self.tag)?;
        writeln!(out, "raw digest: {}", self.raw_digest)?;
        if let Some(digest) = &self.digest {
            writeln!(out, "digest:     {}", digest)?;
        }
        writeln!(out, "valid:      {}", self.valid)?;
        if let Some(name) = &self.name {
            writeln!(out, "name:       {}", name)?;
        }
        if let Some(error) = &self.error {
            writeln!(out, "error:      {}", error)?;
        }
        Ok(())
    }
}

fn resolve(input: &str, defaults: Option<&NameDefaults>) -> Name {
    match defaults {
        Some(defaults) => parse_name_with(input, defaults),
        None => parse_name_no_defaults(input),
    }
}

/// Parse a name and print its parts
pub fn parse(
    input: &str,
    defaults: Option<&NameDefaults>,
    json: bool,
    out: &mut impl Write,
) -> Result<bool> {
    let name = resolve(input, defaults);
    let report = NameReport::new(&name);
    debug!(input, valid = report.valid, "Parsed model name");

    if json {
        serde_json::to_writer_pretty(&mut *out, &report).context("Failed to encode report")?;
        writeln!(out)?;
    } else {
        report.write_text(out)?;
    }
    Ok(report.valid)
}

/// Parse a digest and print its normalized form
pub fn digest(input: &str, out: &mut impl Write) -> Result<bool> {
    let digest = parse_digest(input);
    debug!(input, valid = digest.is_valid(), "Parsed digest");

    writeln!(out, "{}", digest)?;
    Ok(digest.is_valid())
}

/// Print the sha256 digest of a file
pub fn hash(path: &Path, out: &mut impl Write) -> Result<Digest> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let digest = Digest::sha256_reader(BufReader::new(file))
        .with_context(|| format!("Failed to read {}", path.display()))?;
    info!(path = %path.display(), digest = %digest, "Hashed file");

    writeln!(out, "{}", digest)?;
    Ok(digest)
}

/// Compare two names case-insensitively
pub fn equal(
    a: &str,
    b: &str,
    defaults: Option<&NameDefaults>,
    out: &mut impl Write,
) -> Result<bool> {
    let a = resolve(a, defaults);
    let b = resolve(b, defaults);
    let equal = a.equal(&b);

    writeln!(out, "{}", if equal { "equal" } else { "not equal" })?;
    Ok(equal)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run<F>(f: F) -> (bool, String)
    where
        F: FnOnce(&mut Vec<u8>) -> Result<bool>,
    {
        let mut buf = Vec::new();
        let ok = f(&mut buf).unwrap();
        (ok, String::from_utf8(buf).unwrap())
    }

    #[test]
    fn test_parse_with_defaults() {
        let defaults = NameDefaults::default();
        let (ok, output) = run(|out| parse("llama", Some(&defaults), false, out));
        assert!(ok);
        assert!(output.contains("host:       registry.ollama.ai"));
        assert!(output.contains("name:       registry.ollama.ai/library/llama:latest"));
    }

    #[test]
    fn test_parse_invalid_reports_error() {
        let (ok, output) = run(|out| parse("n/mm:", None, false, out));
        assert!(!ok);
        assert!(output.contains("valid:      false"));
        assert!(output.contains("error:"));
        assert!(!output.contains("name:"));
    }

    #[test]
    fn test_parse_json() {
        let (ok, output) = run(|out| parse("h/nn/mm:t", None, true, out));
        assert!(ok);
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["host"], "h");
        assert_eq!(value["model"], "mm");
        assert_eq!(value["name"], "h/nn/mm:t");
        assert!(value.get("error").is_none());
    }

    #[test]
    fn test_parse_json_shows_decoded_digest() {
        let hex = "abcdef0123456789abcdef0123456789abcdef0123456789abcdef0123456789";
        let (ok, output) = run(|out| parse(&format!("mm@sha256-{hex}"), None, true, out));
        assert!(ok);
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["digest"], format!("sha256-{hex}"));
    }

    #[test]
    fn test_digest_command() {
        let hex = "abcdef0123456789abcdef0123456789abcdef0123456789abcdef0123456789";
        let (ok, output) = run(|out| digest(&format!("sha256:{hex}"), out));
        assert!(ok);
        assert_eq!(output.trim(), format!("sha256-{hex}"));

        let (ok, output) = run(|out| digest("sha256-x", out));
        assert!(!ok);
        assert!(output.starts_with("unknown-"));
    }

    #[test]
    fn test_hash_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"model weights").unwrap();

        let mut buf = Vec::new();
        let digest = hash(file.path(), &mut buf).unwrap();
        assert_eq!(digest, Digest::sha256(b"model weights"));
        assert_eq!(String::from_utf8(buf).unwrap().trim(), digest.to_string());
    }

    #[test]
    fn test_hash_missing_file() {
        let mut buf = Vec::new();
        assert!(hash(Path::new("/nonexistent/model.bin"), &mut buf).is_err());
    }

    #[test]
    fn test_equal_command() {
        let defaults = NameDefaults::default();
        let (ok, output) = run(|out| {
            equal("Llama:7B", "registry.ollama.ai/library/llama:7b", Some(&defaults), out)
        });
        assert!(ok);
        assert_eq!(output.trim(), "equal");

        let (ok, output) = run(|out| equal("llama", "llama:7b", None, out));
        assert!(!ok);
        assert_eq!(output.trim(), "not equal");
    }
}
