//! Corpus document reading and label export.
//!
//! A corpus document is one JSON object mapping scene tokens to
//! `{"labels": [...], "description": "..."}`. Key order is kept, so the
//! corpus iterates in the order the document lists its scenes.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use serde_json::{Map, Value};
use tracing::info;

use crate::corpus::SceneCorpus;
use crate::error::{CorpusError, Result};
use crate::record::SceneRecord;

/// Opens `path` for reading, mapping a missing file to
/// [`CorpusError::NotFound`].
fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            CorpusError::not_found(path)
        } else {
            CorpusError::from(e)
        }
    })
}

fn records_from_map(map: Map<String, Value>) -> Result<Vec<(String, SceneRecord)>> {
    map.into_iter()
        .map(|(token, value)| -> Result<(String, SceneRecord)> {
            let record: SceneRecord = serde_json::from_value(value).map_err(|e| {
                CorpusError::serialization(format!("scene {token}: {e}"))
            })?;
            Ok((token, record))
        })
        .collect()
}

/// Reads `(token, record)` pairs from a corpus document on disk.
///
/// # Errors
///
/// Returns [`CorpusError::NotFound`] if the file does not exist, and an IO
/// or serialization error otherwise.
pub fn read_records<P: AsRef<Path>>(path: P) -> Result<Vec<(String, SceneRecord)>> {
    let file = open(path.as_ref())?;
    records_from_reader(BufReader::new(file))
}

/// Reads `(token, record)` pairs from any reader.
///
/// # Errors
///
/// Returns an error if the input is not a JSON object of scene records.
pub fn records_from_reader<R: Read>(reader: R) -> Result<Vec<(String, SceneRecord)>> {
    let map: Map<String, Value> = serde_json::from_reader(reader)?;
    records_from_map(map)
}

/// Parses `(token, record)` pairs from a JSON string.
///
/// # Errors
///
/// Returns an error if `json` is not a JSON object of scene records.
pub fn parse_records(json: &str) -> Result<Vec<(String, SceneRecord)>> {
    let map: Map<String, Value> = serde_json::from_str(json)?;
    records_from_map(map)
}

/// Writes a JSON document with two-space indentation.
///
/// Non-ASCII text is written verbatim.
///
/// # Errors
///
/// Returns an IO or serialization error if the file cannot be written.
pub fn write_document<P: AsRef<Path>>(path: P, document: &Map<String, Value>) -> Result<()> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, document)?;
    writer.flush()?;
    Ok(())
}

/// Reads a token -> labels document, such as one written by
/// [`SceneCorpus::export_labels_only`].
///
/// # Errors
///
/// Returns [`CorpusError::NotFound`] if the file does not exist, and an IO
/// or serialization error otherwise.
pub fn read_labels<P: AsRef<Path>>(path: P) -> Result<Vec<(String, Vec<String>)>> {
    let file = open(path.as_ref())?;
    let map: Map<String, Value> = serde_json::from_reader(BufReader::new(file))?;
    map.into_iter()
        .map(|(token, value)| -> Result<(String, Vec<String>)> {
            Ok((token, serde_json::from_value(value)?))
        })
        .collect()
}

impl SceneCorpus {
    /// Projects the corpus onto token -> labels.
    ///
    /// `tokens` selects scenes in the given order; `None` selects every
    /// scene in document order. Tokens not in the corpus are skipped.
    #[must_use]
    pub fn labels_only<S: AsRef<str>>(&self, tokens: Option<&[S]>) -> Map<String, Value> {
        let mut document = Map::new();
        let mut add = |token: &str| {
            if let Some(record) = self.get(token) {
                let labels = record.labels.iter().cloned().map(Value::String).collect();
                document.insert(token.to_owned(), Value::Array(labels));
            }
        };

        match tokens {
            Some(tokens) => tokens.iter().for_each(|t| add(t.as_ref())),
            None => self.tokens().iter().for_each(|t| add(t)),
        }

        document
    }

    /// Writes the labels of the selected scenes to `path`.
    ///
    /// See [`SceneCorpus::labels_only`] for how `tokens` is applied.
    /// Returns the number of scenes written.
    ///
    /// # Errors
    ///
    /// Returns an IO or serialization error if the file cannot be written.
    pub fn export_labels_only<P, S>(&self, path: P, tokens: Option<&[S]>) -> Result<usize>
    where
        P: AsRef<Path>,
        S: AsRef<str>,
    {
        let path = path.as_ref();
        let document = self.labels_only(tokens);
        write_document(path, &document)?;
        info!("Exported labels for {} scenes to {}", document.len(), path.display());
        Ok(document.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"{
        "b-token": {"labels": ["INTERSECTION", "TRAFFIC_LIGHT"], "description": "路口"},
        "a-token": {"labels": ["PED_CROSSING"], "description": "x"}
    }"#;

    #[test]
    fn parse_records_keeps_order() {
        let records = parse_records(DOC).unwrap_or_default();
        let tokens: Vec<&str> = records.iter().map(|(t, _)| t.as_str()).collect();
        assert_eq!(tokens, ["b-token", "a-token"]);
        assert_eq!(records[0].1.description, "路口");
    }

    #[test]
    fn parse_records_rejects_non_object() {
        assert!(matches!(
            parse_records("[1, 2, 3]"),
            Err(CorpusError::Serialization(_))
        ));
    }

    #[test]
    fn parse_records_names_bad_scene() {
        let err = parse_records(r#"{"bad": {"labels": "PED_CROSSING"}}"#);
        match err {
            Err(CorpusError::Serialization(msg)) => assert!(msg.contains("bad")),
            other => panic!("expected serialization error, got {other:?}"),
        }
    }

    #[test]
    fn read_records_missing_file() {
        let result = read_records("nonexistent_scenes_12345.json");
        if let Err(CorpusError::NotFound { path }) = result {
            assert!(path.to_string_lossy().contains("nonexistent"));
        } else {
            panic!("expected NotFound");
        }
    }

    #[test]
    fn labels_only_all_scenes() {
        let corpus = SceneCorpus::from_json_str(DOC).unwrap_or_default();
        let document = corpus.labels_only::<&str>(None);
        let keys: Vec<&String> = document.keys().collect();
        assert_eq!(keys, ["b-token", "a-token"]);
        assert_eq!(
            document.get("b-token"),
            Some(&serde_json::json!(["INTERSECTION", "TRAFFIC_LIGHT"]))
        );
    }

    #[test]
    fn labels_only_skips_unknown_tokens() {
        let corpus = SceneCorpus::from_json_str(DOC).unwrap_or_default();
        let document = corpus.labels_only(Some(&["a-token", "missing"][..]));
        assert_eq!(document.len(), 1);
        assert!(document.contains_key("a-token"));
    }

    #[test]
    fn labels_only_follows_requested_order() {
        let corpus = SceneCorpus::from_json_str(DOC).unwrap_or_default();
        let document = corpus.labels_only(Some(&["a-token", "b-token"][..]));
        let keys: Vec<&String> = document.keys().collect();
        assert_eq!(keys, ["a-token", "b-token"]);
    }
}
