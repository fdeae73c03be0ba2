//! # Configuração de uma Execução de Aumento
//!
//! Reúne todos os parâmetros consumidos pelo orquestrador. Pode ser montada
//! em código, lida de um arquivo JSON ou ajustada pela linha de comando.
//!
//! ```json
//! {
//!   "word_column": 0,
//!   "tag_columns": [1, 2],
//!   "main_entity_column": 1,
//!   "sample_ratio": 0.3,
//!   "p_augmentation": 0.5,
//!   "n_iteration": 1,
//!   "seed": 42,
//!   "strategy": "shuffle_in_entity"
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::corpus::{ColumnLayout, DEFAULT_COMMENT_MARKERS};
use crate::error::{AugError, Result};
use crate::strategy::{Family, Strategy};

/// Parâmetros de uma execução.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AugmentationConfig {
    /// Índice da coluna de palavras no arquivo de entrada.
    pub word_column: usize,
    /// Índices das colunas de tags no arquivo de entrada.
    pub tag_columns: Vec<usize>,
    /// Coluna de entidade principal no layout da amostra (0 = palavras, 1 = primeira coluna de tags).
    pub main_entity_column: usize,
    /// Fração das sentenças com entidade a sortear.
    pub sample_ratio: f64,
    /// Probabilidade `p` das decisões de Bernoulli.
    pub p_augmentation: f64,
    /// Rodadas de aumento por sentença sorteada.
    pub n_iteration: usize,
    /// Semente da amostragem de sentenças.
    pub seed: u64,
    pub strategy: Strategy,
    /// Marcadores (regex) de linhas de comentário no corpus.
    pub comment_markers: Vec<String>,
    /// Processa as sentenças sorteadas em paralelo (rayon).
    pub parallel: bool,
}

impl Default for AugmentationConfig {
    fn default() -> Self {
        Self {
            word_column: 0,
            tag_columns: vec![1],
            main_entity_column: 1,
            sample_ratio: 0.1,
            p_augmentation: 0.5,
            n_iteration: 1,
            seed: 42,
            strategy: Strategy::ShuffleInEntity,
            comment_markers: DEFAULT_COMMENT_MARKERS.iter().map(|m| m.to_string()).collect(),
            parallel: true,
        }
    }
}

impl AugmentationConfig {
    /// Carrega a configuração de um arquivo JSON (campos ausentes usam o padrão).
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| AugError::io(path, e))?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn family(&self) -> Family {
        self.strategy.family()
    }

    pub fn layout(&self) -> ColumnLayout {
        ColumnLayout::new(self.word_column, self.tag_columns.clone())
    }

    /// Número de colunas de cada amostra (palavras + tags).
    pub fn sample_columns(&self) -> usize {
        self.tag_columns.len() + 1
    }

    /// Verifica limites: probabilidades em [0, 1], colunas coerentes.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.p_augmentation) {
            return Err(AugError::invalid_config(format!(
                "p_augmentation deve estar em [0, 1], recebido {}",
                self.p_augmentation
            )));
        }
        if !(0.0..=1.0).contains(&self.sample_ratio) {
            return Err(AugError::invalid_config(format!(
                "sample_ratio deve estar em [0, 1], recebido {}",
                self.sample_ratio
            )));
        }
        if self.tag_columns.is_empty() {
            return Err(AugError::invalid_config("ao menos uma coluna de tags é necessária"));
        }
        if self.main_entity_column == 0 || self.main_entity_column >= self.sample_columns() {
            return Err(AugError::invalid_config(format!(
                "main_entity_column {} fora do layout da amostra (1..={})",
                self.main_entity_column,
                self.tag_columns.len()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(AugmentationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_probability() {
        let config = AugmentationConfig {
            p_augmentation: 1.5,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(AugError::InvalidConfig(_))));

        let config = AugmentationConfig {
            sample_ratio: -0.1,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_main_entity_column_bounds() {
        let config = AugmentationConfig {
            tag_columns: vec![1, 2],
            main_entity_column: 2,
            ..Default::default()
        };
        assert!(config.validate().is_ok());

        let config = AugmentationConfig {
            main_entity_column: 2,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = AugmentationConfig {
            main_entity_column: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"strategy": "remove_left_neighbor", "seed": 7}"#).unwrap();

        let config = AugmentationConfig::from_json_file(&path).unwrap();
        assert_eq!(config.strategy, Strategy::RemoveLeftNeighbor);
        assert_eq!(config.seed, 7);
        assert_eq!(config.tag_columns, vec![1]);
        assert_eq!(config.family(), Family::Segment);
    }

    #[test]
    fn test_invalid_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"p_augmentation": 2.0}"#).unwrap();
        assert!(AugmentationConfig::from_json_file(&path).is_err());
    }
}
