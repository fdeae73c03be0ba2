//! # Estratégias de Aumento
//!
//! Catálogo fechado das estratégias disponíveis, agrupadas em duas famílias:
//!
//! | Família    | Estratégia                    | Altera tags? |
//! |------------|-------------------------------|--------------|
//! | Segmento   | `swap_first_last`             | não          |
//! | Segmento   | `remove_left_neighbor`        | sim (remove) |
//! | Segmento   | `remove_right_neighbor`       | sim (remove) |
//! | Segmento   | `remove_surrounding_neighbors`| sim (remove) |
//! | Segmento   | `label_wise_replacement`      | não          |
//! | Segmento   | `shuffle_in_entity`           | não          |
//! | Segmento   | `shuffle_in_segments`         | não          |
//! | Caractere  | `reverse_letter_case`         | não          |
//! | Caractere  | `delete_character`            | não          |
//! | Caractere  | `shuffle_characters_in_token` | não          |

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AugError;

/// Família de uma estratégia: nível de segmento ou de caractere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Family {
    Segment,
    Character,
}

/// Estratégia de aumento aplicada a uma sentença.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Troca o primeiro e o último token de spans de entidade.
    SwapFirstLast,
    /// Remove o vizinho à esquerda de spans de entidade.
    RemoveLeftNeighbor,
    /// Remove o vizinho à direita de spans de entidade.
    RemoveRightNeighbor,
    /// Remove ambos os vizinhos de todos os spans (sem sorteio).
    RemoveSurroundingNeighbors,
    /// Substitui tokens de entidade por outros vistos sob a mesma tag.
    LabelWiseReplacement,
    /// Embaralha tokens dentro de cada span de entidade.
    ShuffleInEntity,
    /// Embaralha tokens dentro de cada segmento (entidade ou não).
    ShuffleInSegments,
    /// Inverte a caixa de uma letra do token.
    ReverseLetterCase,
    /// Apaga um caractere do token.
    #[serde(alias = "random_delete_character")]
    DeleteCharacter,
    /// Embaralha os caracteres do token.
    ShuffleCharactersInToken,
}

impl Strategy {
    /// Todas as estratégias, na ordem do catálogo.
    pub const ALL: [Strategy; 10] = [
        Strategy::SwapFirstLast,
        Strategy::RemoveLeftNeighbor,
        Strategy::RemoveRightNeighbor,
        Strategy::RemoveSurroundingNeighbors,
        Strategy::LabelWiseReplacement,
        Strategy::ShuffleInEntity,
        Strategy::ShuffleInSegments,
        Strategy::ReverseLetterCase,
        Strategy::DeleteCharacter,
        Strategy::ShuffleCharactersInToken,
    ];

    /// Nome estável (usado em arquivos de saída e estatísticas).
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::SwapFirstLast => "swap_first_last",
            Strategy::RemoveLeftNeighbor => "remove_left_neighbor",
            Strategy::RemoveRightNeighbor => "remove_right_neighbor",
            Strategy::RemoveSurroundingNeighbors => "remove_surrounding_neighbors",
            Strategy::LabelWiseReplacement => "label_wise_replacement",
            Strategy::ShuffleInEntity => "shuffle_in_entity",
            Strategy::ShuffleInSegments => "shuffle_in_segments",
            Strategy::ReverseLetterCase => "reverse_letter_case",
            Strategy::DeleteCharacter => "delete_character",
            Strategy::ShuffleCharactersInToken => "shuffle_characters_in_token",
        }
    }

    pub fn family(&self) -> Family {
        match self {
            Strategy::ReverseLetterCase
            | Strategy::DeleteCharacter
            | Strategy::ShuffleCharactersInToken => Family::Character,
            _ => Family::Segment,
        }
    }

    /// A estratégia remove posições (e portanto tags) da sentença?
    pub fn removes_positions(&self) -> bool {
        matches!(
            self,
            Strategy::RemoveLeftNeighbor
                | Strategy::RemoveRightNeighbor
                | Strategy::RemoveSurroundingNeighbors
        )
    }

    /// Estratégias varridas por padrão para uma família.
    ///
    /// `swap_first_last` fica fora da varredura de segmento, mas pode ser pedida explicitamente.
    pub fn sweep(family: Family) -> Vec<Strategy> {
        Self::ALL
            .iter()
            .copied()
            .filter(|s| s.family() == family && *s != Strategy::SwapFirstLast)
            .collect()
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = AugError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "random_delete_character" {
            return Ok(Strategy::DeleteCharacter);
        }
        Self::ALL
            .iter()
            .copied()
            .find(|strategy| strategy.name() == s)
            .ok_or_else(|| AugError::UnknownStrategy(s.to_string()))
    }
}
