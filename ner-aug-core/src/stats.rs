//! Estatísticas de uma execução (arquivo `augmentation_stats.tsv`).

use serde::{Deserialize, Serialize};

use crate::strategy::Strategy;

/// Cabeçalho do arquivo de estatísticas.
pub const STATS_HEADER: &str = "strategy\tn_sentences_total\tn_entity_sentences\tn_samples\t\
n_iteration\tn_augmentation\tsample_ratio\taugmentation_ratio\ttotal_ratio";

/// Contagens de uma execução (estratégia × razão de amostragem).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AugmentationStats {
    pub strategy: Strategy,
    /// Sentenças no corpus.
    pub n_sentences: usize,
    /// Sentenças com ao menos uma entidade.
    pub n_entity_sentences: usize,
    /// Sentenças sorteadas.
    pub n_samples: usize,
    pub n_iteration: usize,
    /// Amostras aumentadas aceitas.
    pub n_augmented: usize,
    pub sample_ratio: f64,
}

impl AugmentationStats {
    /// Amostras produzidas / sentenças com entidade (0 se não houver nenhuma).
    pub fn augmentation_ratio(&self) -> f64 {
        ratio(self.n_augmented, self.n_entity_sentences)
    }

    /// Amostras produzidas / total de sentenças (0 se o corpus for vazio).
    pub fn total_ratio(&self) -> f64 {
        ratio(self.n_augmented, self.n_sentences)
    }

    /// Linha TSV correspondente a [`STATS_HEADER`].
    pub fn tsv_row(&self) -> String {
        format!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            self.strategy,
            self.n_sentences,
            self.n_entity_sentences,
            self.n_samples,
            self.n_iteration,
            self.n_augmented,
            self.sample_ratio,
            self.augmentation_ratio(),
            self.total_ratio(),
        )
    }
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}
