//! Linha de comando para gerar corpora BIO aumentados.
//!
//! ```text
//! ner-aug augment --input-path train.tsv --output-path aug/ --family segment
//! ner-aug join --in-file train.tsv --path-to-aug aug/
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::mpsc;

use clap::{Args, Parser, Subcommand, ValueEnum};
use ner_aug_core::joiner::join_augmented;
use ner_aug_core::output::{write_jsonl_path, write_tsv_path, StatsWriter};
use ner_aug_core::{
    AugError, AugmentationConfig, AugmentationEvent, AugmentationPipeline, CorpusReader, Family,
    Strategy,
};
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ner-aug")]
#[command(about = "Aumento de dados para corpora NER no formato BIO", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Gera amostras aumentadas para cada estratégia × razão de amostragem
    Augment(AugmentArgs),
    /// Junta o corpus original a cada arquivo aumentado de uma pasta
    Join(JoinArgs),
}

#[derive(Clone, Copy, ValueEnum)]
enum FamilyArg {
    Segment,
    Character,
}

impl From<FamilyArg> for Family {
    fn from(arg: FamilyArg) -> Self {
        match arg {
            FamilyArg::Segment => Family::Segment,
            FamilyArg::Character => Family::Character,
        }
    }
}

#[derive(Args)]
struct AugmentArgs {
    /// Corpus de entrada em colunas
    #[arg(long, value_name = "PATH")]
    input_path: PathBuf,

    /// Pasta de saída (criada se não existir)
    #[arg(long, value_name = "PATH")]
    output_path: PathBuf,

    /// Configuração base em JSON; as opções abaixo a sobrescrevem
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    #[arg(long)]
    word_column: Option<usize>,

    /// Colunas de tags no arquivo de entrada (ex: 1,2)
    #[arg(long, value_delimiter = ',')]
    tag_columns: Option<Vec<usize>>,

    /// Coluna de entidade principal no layout da amostra (1 = primeira coluna de tags)
    #[arg(long)]
    main_entity_column: Option<usize>,

    /// Família cujas estratégias são varridas
    #[arg(long, value_enum, default_value = "segment")]
    family: FamilyArg,

    /// Lista explícita de estratégias (substitui a varredura da família)
    #[arg(long, value_delimiter = ',')]
    strategies: Option<Vec<Strategy>>,

    #[arg(long)]
    p_augmentation: Option<f64>,

    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    n_iteration: Option<usize>,

    #[arg(
        long,
        value_delimiter = ',',
        default_value = "0.1,0.2,0.3,0.4,0.5,0.6,0.7,1"
    )]
    sample_ratios: Vec<f64>,

    /// Escreve TSV (padrão quando nenhum formato é pedido)
    #[arg(long)]
    to_tsv: bool,

    /// Escreve JSON lines
    #[arg(long)]
    to_json: bool,

    /// Nomes das chaves JSON, uma por coluna da amostra
    #[arg(long, value_delimiter = ',')]
    json_columns: Option<Vec<String>>,

    /// Regex de linhas de comentário (substitui os marcadores padrão)
    #[arg(long = "comment-marker", value_name = "REGEX")]
    comment_markers: Vec<String>,

    /// Processa as sentenças em uma única thread
    #[arg(long)]
    no_parallel: bool,
}

#[derive(Args)]
struct JoinArgs {
    /// Corpus original
    #[arg(long, value_name = "PATH")]
    in_file: PathBuf,

    /// Pasta com os arquivos aumentados
    #[arg(long, value_name = "PATH")]
    path_to_aug: PathBuf,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Augment(args) => augment(args),
        Command::Join(args) => join_augmented(&args.in_file, &args.path_to_aug).map(|_| ()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// Monta a configuração: padrão ou arquivo JSON, depois as opções da linha de comando.
fn build_config(args: &AugmentArgs) -> Result<AugmentationConfig, AugError> {
    let mut config = match &args.config {
        Some(path) => AugmentationConfig::from_json_file(path)?,
        None => AugmentationConfig::default(),
    };
    if let Some(word_column) = args.word_column {
        config.word_column = word_column;
    }
    if let Some(tag_columns) = &args.tag_columns {
        config.tag_columns = tag_columns.clone();
    }
    if let Some(main) = args.main_entity_column {
        config.main_entity_column = main;
    }
    if let Some(p) = args.p_augmentation {
        config.p_augmentation = p;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(n_iteration) = args.n_iteration {
        config.n_iteration = n_iteration;
    }
    if !args.comment_markers.is_empty() {
        config.comment_markers = args.comment_markers.clone();
    }
    if args.no_parallel {
        config.parallel = false;
    }
    config.validate()?;
    Ok(config)
}

fn augment(args: AugmentArgs) -> Result<(), AugError> {
    let config = build_config(&args)?;
    let strategies = args
        .strategies
        .clone()
        .unwrap_or_else(|| Strategy::sweep(args.family.into()));
    let to_tsv = args.to_tsv || !args.to_json;

    let reader = CorpusReader::new(config.layout(), config.comment_markers.as_slice())?;
    let corpus = reader.read_path(&args.input_path)?;
    info!(
        path = %args.input_path.display(),
        sentences = corpus.len(),
        "corpus carregado"
    );
    if corpus.is_empty() {
        warn!("corpus vazio, nenhuma amostra será gerada");
    }

    std::fs::create_dir_all(&args.output_path).map_err(|e| AugError::io(&args.output_path, e))?;
    let mut stats_writer = StatsWriter::create_in(&args.output_path)?;

    let n_iteration = config.n_iteration;
    let mut pipeline = AugmentationPipeline::new(&corpus, config)?;
    for &strategy in &strategies {
        for &ratio in &args.sample_ratios {
            pipeline.reconfigure(strategy, ratio)?;

            let (tx, rx) = mpsc::channel();
            let outcome = std::thread::scope(|s| {
                s.spawn(move || {
                    for event in rx {
                        log_event(&event);
                    }
                });
                let outcome = pipeline.run_streaming(&tx);
                drop(tx);
                outcome
            });

            let stem = format!("{strategy}-{ratio}-{n_iteration}");
            if to_tsv {
                write_tsv_path(args.output_path.join(format!("{stem}.tsv")), &outcome.samples)?;
            }
            if args.to_json {
                write_jsonl_path(
                    args.output_path.join(format!("{stem}.json")),
                    &outcome.samples,
                    args.json_columns.as_deref(),
                )?;
            }
            stats_writer.append(&outcome.stats)?;
            info!(
                stem = %stem,
                n_augmented = outcome.stats.n_augmented,
                "amostras gravadas"
            );
        }
    }
    Ok(())
}

fn log_event(event: &AugmentationEvent) {
    match event {
        AugmentationEvent::Sampled {
            n_entity_sentences,
            n_samples,
            ..
        } => info!(n_entity_sentences, n_samples, "sentenças sorteadas"),
        other => match serde_json::to_string(other) {
            Ok(json) => debug!(event = %json),
            Err(e) => warn!("evento não serializável: {e}"),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_augment_defaults() {
        let cli = Cli::try_parse_from([
            "ner-aug",
            "augment",
            "--input-path",
            "train.tsv",
            "--output-path",
            "out",
        ])
        .unwrap();
        let Command::Augment(args) = cli.command else {
            panic!("esperado augment");
        };
        assert_eq!(args.sample_ratios, vec![0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 1.0]);
        assert!(args.strategies.is_none());
        assert!(!args.to_json);

        let config = build_config(&args).unwrap();
        assert_eq!(config, AugmentationConfig::default());
    }

    #[test]
    fn test_parse_explicit_strategies_and_overrides() {
        let cli = Cli::try_parse_from([
            "ner-aug",
            "augment",
            "--input-path",
            "train.tsv",
            "--output-path",
            "out",
            "--strategies",
            "swap_first_last,random_delete_character",
            "--tag-columns",
            "1,2",
            "--main-entity-column",
            "2",
            "--p-augmentation",
            "0.3",
            "--no-parallel",
        ])
        .unwrap();
        let Command::Augment(args) = cli.command else {
            panic!("esperado augment");
        };
        assert_eq!(
            args.strategies,
            Some(vec![Strategy::SwapFirstLast, Strategy::DeleteCharacter])
        );
        let config = build_config(&args).unwrap();
        assert_eq!(config.tag_columns, vec![1, 2]);
        assert_eq!(config.main_entity_column, 2);
        assert_eq!(config.p_augmentation, 0.3);
        assert!(!config.parallel);
    }

    #[test]
    fn test_unknown_strategy_is_rejected() {
        let parsed = Cli::try_parse_from([
            "ner-aug",
            "augment",
            "--input-path",
            "a",
            "--output-path",
            "b",
            "--strategies",
            "teleport",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_invalid_override_fails_validation() {
        let cli = Cli::try_parse_from([
            "ner-aug",
            "augment",
            "--input-path",
            "a",
            "--output-path",
            "b",
            "--p-augmentation",
            "1.5",
        ])
        .unwrap();
        let Command::Augment(args) = cli.command else {
            panic!("esperado augment");
        };
        assert!(matches!(build_config(&args), Err(AugError::InvalidConfig(_))));
    }

    #[test]
    fn test_augment_writes_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("train.tsv");
        std::fs::write(
            &input,
            "O\tO\nmédico\tO\nDrauzio\tB-PER\nVarella\tI-PER\nvisitou\tO\no\tO\nBrasil\tB-LOC\n.\tO\n\n",
        )
        .unwrap();
        let out = dir.path().join("aug");

        let cli = Cli::try_parse_from([
            "ner-aug",
            "augment",
            "--input-path",
            input.to_str().unwrap(),
            "--output-path",
            out.to_str().unwrap(),
            "--strategies",
            "remove_surrounding_neighbors",
            "--sample-ratios",
            "1",
            "--to-tsv",
            "--to-json",
        ])
        .unwrap();
        let Command::Augment(args) = cli.command else {
            panic!("esperado augment");
        };
        augment(args).unwrap();

        assert!(out.join("remove_surrounding_neighbors-1-1.tsv").exists());
        assert!(out.join("remove_surrounding_neighbors-1-1.json").exists());
        let stats = std::fs::read_to_string(out.join("augmentation_stats.tsv")).unwrap();
        assert_eq!(stats.lines().count(), 2);
    }
}
