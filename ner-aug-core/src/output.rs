//! # Escrita dos Corpora Aumentados
//!
//! Dois formatos de saída para as amostras aceitas:
//!
//! - **TSV**: uma linha por token com as colunas separadas por `\t` e uma
//!   linha vazia após cada sentença (mesmo formato da entrada).
//! - **JSON lines**: um objeto por amostra, com chaves posicionais
//!   (`"0"`, `"1"`...) ou nomes de coluna fornecidos.
//!
//! Antes de escrever qualquer coisa, todas as amostras são validadas: colunas
//! de tamanhos diferentes geram [`AugError::ColumnLengthMismatch`] em vez de
//! uma saída parcialmente desalinhada.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde_json::{Map, Value};

use crate::corpus::Sentence;
use crate::error::{AugError, Result};
use crate::stats::{AugmentationStats, STATS_HEADER};

/// Nome do arquivo de estatísticas dentro da pasta de saída.
pub const STATS_FILE_NAME: &str = "augmentation_stats.tsv";

/// Confere que todas as colunas de cada amostra têm o mesmo comprimento.
pub fn validate_samples(samples: &[Sentence]) -> Result<()> {
    for (index, sample) in samples.iter().enumerate() {
        let expected = sample.len();
        for (column, values) in sample.columns().iter().enumerate() {
            if values.len() != expected {
                return Err(AugError::ColumnLengthMismatch {
                    sample: index,
                    column,
                    expected,
                    found: values.len(),
                });
            }
        }
    }
    Ok(())
}

/// Escreve as amostras em TSV.
pub fn write_tsv<W: Write>(mut writer: W, samples: &[Sentence]) -> Result<()> {
    validate_samples(samples)?;
    let io = |e| AugError::io("<saída>", e);

    for sample in samples {
        for row in 0..sample.len() {
            let fields: Vec<&str> = sample
                .columns()
                .iter()
                .map(|column| column[row].as_str())
                .collect();
            writeln!(writer, "{}", fields.join("\t")).map_err(io)?;
        }
        writeln!(writer).map_err(io)?;
    }
    writer.flush().map_err(io)
}

/// Escreve as amostras em JSON lines.
///
/// Com `column_names`, o número de nomes precisa ser igual ao de colunas de cada amostra.
pub fn write_jsonl<W: Write>(
    mut writer: W,
    samples: &[Sentence],
    column_names: Option<&[String]>,
) -> Result<()> {
    validate_samples(samples)?;
    let io = |e| AugError::io("<saída>", e);

    for (index, sample) in samples.iter().enumerate() {
        if let Some(names) = column_names {
            if names.len() != sample.n_columns() {
                return Err(AugError::ColumnNamesMismatch {
                    sample: index,
                    names: names.len(),
                    columns: sample.n_columns(),
                });
            }
        }

        let mut record = Map::new();
        for (i, column) in sample.columns().iter().enumerate() {
            let key = column_names.map_or_else(|| i.to_string(), |names| names[i].clone());
            record.insert(key, Value::from(column.clone()));
        }
        serde_json::to_writer(&mut writer, &Value::Object(record))?;
        writeln!(writer).map_err(io)?;
    }
    writer.flush().map_err(io)
}

pub fn write_tsv_path(path: impl AsRef<Path>, samples: &[Sentence]) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| AugError::io(path, e))?;
    write_tsv(BufWriter::new(file), samples).map_err(|e| with_path(e, path))
}

pub fn write_jsonl_path(
    path: impl AsRef<Path>,
    samples: &[Sentence],
    column_names: Option<&[String]>,
) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| AugError::io(path, e))?;
    write_jsonl(BufWriter::new(file), samples, column_names).map_err(|e| with_path(e, path))
}

fn with_path(err: AugError, path: &Path) -> AugError {
    match err {
        AugError::Io { source, .. } => AugError::io(path, source),
        other => other,
    }
}

/// Escritor incremental do arquivo de estatísticas (cabeçalho + uma linha por execução).
pub struct StatsWriter<W: Write> {
    writer: W,
}

impl StatsWriter<BufWriter<File>> {
    /// Cria `augmentation_stats.tsv` dentro de `dir`.
    pub fn create_in(dir: impl AsRef<Path>) -> Result<Self> {
        let path = dir.as_ref().join(STATS_FILE_NAME);
        let file = File::create(&path).map_err(|e| AugError::io(&path, e))?;
        Self::new(BufWriter::new(file))
    }
}

impl<W: Write> StatsWriter<W> {
    pub fn new(mut writer: W) -> Result<Self> {
        writeln!(writer, "{}", STATS_HEADER).map_err(|e| AugError::io("<estatísticas>", e))?;
        Ok(Self { writer })
    }

    pub fn append(&mut self, stats: &AugmentationStats) -> Result<()> {
        writeln!(self.writer, "{}", stats.tsv_row())
            .and_then(|_| self.writer.flush())
            .map_err(|e| AugError::io("<estatísticas>", e))
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::Strategy;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn samples() -> Vec<Sentence> {
        vec![
            Sentence::new(vec![
                strings(&["Bob", "is", "here"]),
                strings(&["B-name", "O", "O"]),
            ]),
            Sentence::new(vec![strings(&["Lula"]), strings(&["B-PER"])]),
        ]
    }

    #[test]
    fn test_write_tsv() {
        let mut buf = Vec::new();
        write_tsv(&mut buf, &samples()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "Bob\tB-name\nis\tO\nhere\tO\n\nLula\tB-PER\n\n");
    }

    #[test]
    fn test_write_jsonl_positional_keys() {
        let mut buf = Vec::new();
        write_jsonl(&mut buf, &samples(), None).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], r#"{"0":["Lula"],"1":["B-PER"]}"#);
    }

    #[test]
    fn test_write_jsonl_named_keys() {
        let names = strings(&["tokens", "ner_tags"]);
        let mut buf = Vec::new();
        write_jsonl(&mut buf, &samples(), Some(names.as_slice())).unwrap();
        let first: Value = serde_json::from_str(String::from_utf8(buf).unwrap().lines().next().unwrap()).unwrap();
        assert_eq!(first["tokens"][0], "Bob");
        assert_eq!(first["ner_tags"][0], "B-name");
    }

    #[test]
    fn test_named_keys_count_mismatch() {
        let names = strings(&["tokens"]);
        let err = write_jsonl(Vec::new(), &samples(), Some(names.as_slice())).unwrap_err();
        assert!(matches!(err, AugError::ColumnNamesMismatch { names: 1, columns: 2, .. }));
    }

    #[test]
    fn test_column_length_mismatch() {
        let bad = vec![Sentence::new(vec![strings(&["Bob", "is"]), strings(&["B-name"])])];
        let mut buf = Vec::new();
        let err = write_tsv(&mut buf, &bad).unwrap_err();
        assert!(matches!(
            err,
            AugError::ColumnLengthMismatch { sample: 0, column: 1, expected: 2, found: 1 }
        ));
        // Nada foi escrito
        assert!(buf.is_empty());
    }

    #[test]
    fn test_stats_writer() {
        let mut writer = StatsWriter::new(Vec::new()).unwrap();
        writer
            .append(&AugmentationStats {
                strategy: Strategy::RemoveLeftNeighbor,
                n_sentences: 10,
                n_entity_sentences: 5,
                n_samples: 1,
                n_iteration: 1,
                n_augmented: 1,
                sample_ratio: 0.2,
            })
            .unwrap();
        let text = String::from_utf8(writer.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], STATS_HEADER);
        assert_eq!(lines[1], "remove_left_neighbor\t10\t5\t1\t1\t1\t0.2\t0.2\t0.1");
    }

    #[test]
    fn test_write_paths() {
        let dir = tempfile::tempdir().unwrap();
        let tsv = dir.path().join("out.tsv");
        let json = dir.path().join("out.json");
        write_tsv_path(&tsv, &samples()).unwrap();
        write_jsonl_path(&json, &samples(), None).unwrap();
        assert!(std::fs::read_to_string(&tsv).unwrap().starts_with("Bob\tB-name\n"));
        assert_eq!(std::fs::read_to_string(&json).unwrap().lines().count(), 2);

        let stats = StatsWriter::create_in(dir.path());
        assert!(stats.is_ok());
        assert!(dir.path().join(STATS_FILE_NAME).exists());
    }
}
