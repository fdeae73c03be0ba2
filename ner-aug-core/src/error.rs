//! Tipos de erro do `ner-aug-core`.

use std::path::PathBuf;

use thiserror::Error;

/// Resultado padrão das operações do crate.
pub type Result<T> = std::result::Result<T, AugError>;

/// Erros possíveis durante leitura, aumento e escrita de corpora.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum AugError {
    /// Linha do corpus com menos colunas do que os índices configurados exigem.
    #[error("linha {line} malformada: esperadas ao menos {expected} colunas, encontradas {found}")]
    MalformedRecord {
        /// Número da linha (1-based) no arquivo de entrada.
        line: usize,
        expected: usize,
        found: usize,
    },

    /// Amostra com colunas de tamanhos diferentes (tokens vs. tags).
    #[error("amostra {sample}: coluna {column} tem {found} elementos, esperados {expected}")]
    ColumnLengthMismatch {
        sample: usize,
        column: usize,
        expected: usize,
        found: usize,
    },

    /// Quantidade de nomes de colunas JSON diferente do número de colunas da amostra.
    #[error("amostra {sample}: {names} nomes de coluna para {columns} colunas")]
    ColumnNamesMismatch {
        sample: usize,
        names: usize,
        columns: usize,
    },

    /// Configuração inválida (probabilidade fora de [0, 1], colunas ausentes...).
    #[error("configuração inválida: {0}")]
    InvalidConfig(String),

    /// Nome de estratégia desconhecido.
    #[error("estratégia desconhecida: {0}")]
    UnknownStrategy(String),

    /// Padrão de comentário que não compila como regex.
    #[error("padrão de comentário inválido: {0}")]
    CommentPattern(#[from] regex::Error),

    /// Erro de E/S com o caminho envolvido.
    #[error("erro de E/S em {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Erro de serialização JSON.
    #[error("erro de JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl AugError {
    /// Cria um erro de configuração inválida.
    #[must_use]
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Associa um `std::io::Error` ao caminho que o causou.
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
