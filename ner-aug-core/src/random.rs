//! # Aleatoriedade Reprodutível
//!
//! Toda decisão aleatória das estratégias usa um gerador novo, semeado por
//! [`derive_seed`] a partir do comprimento que governa aquela decisão
//! (tamanho do span, do segmento, do token...) e da probabilidade `p`.
//! Nenhum gerador global é usado: a mesma entrada com o mesmo `p` sempre
//! produz a mesma saída.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Semente determinística: `floor(governing_length * p)`.
pub fn derive_seed(governing_length: usize, p: f64) -> u64 {
    (governing_length as f64 * p).floor().max(0.0) as u64
}

/// Gerador semeado para uma decisão governada por `governing_length`.
pub fn seeded_rng(governing_length: usize, p: f64) -> StdRng {
    StdRng::seed_from_u64(derive_seed(governing_length, p))
}

/// Sorteio de Bernoulli(p). `p` fora de [0, 1] é saturado.
pub fn bernoulli<R: Rng + ?Sized>(rng: &mut R, p: f64) -> bool {
    rng.gen_bool(p.clamp(0.0, 1.0))
}

/// Índice determinístico `floor(p * (len - 1))` usado pelas estratégias de caractere.
pub fn position_for(len: usize, p: f64) -> usize {
    if len == 0 {
        return 0;
    }
    let idx = (p * (len - 1) as f64).floor().max(0.0) as usize;
    idx.min(len - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_seed_floor() {
        assert_eq!(derive_seed(3, 0.5), 1);
        assert_eq!(derive_seed(4, 0.5), 2);
        assert_eq!(derive_seed(0, 0.9), 0);
        assert_eq!(derive_seed(10, 1.0), 10);
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let a: Vec<bool> = {
            let mut rng = seeded_rng(7, 0.3);
            (0..16).map(|_| bernoulli(&mut rng, 0.3)).collect()
        };
        let b: Vec<bool> = {
            let mut rng = seeded_rng(7, 0.3);
            (0..16).map(|_| bernoulli(&mut rng, 0.3)).collect()
        };
        assert_eq!(a, b);
    }

    #[test]
    fn test_bernoulli_extremes() {
        let mut rng = seeded_rng(5, 0.5);
        assert!(!bernoulli(&mut rng, 0.0));
        assert!(bernoulli(&mut rng, 1.0));
    }

    #[test]
    fn test_position_for() {
        assert_eq!(position_for(5, 0.5), 2);
        assert_eq!(position_for(4, 0.5), 1);
        assert_eq!(position_for(3, 1.0), 2);
        assert_eq!(position_for(1, 0.7), 0);
    }
}
