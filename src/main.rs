use anyhow::Result;
use clap::{Arg, ArgAction, Command};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use roteiro_biblico::llm::create_llm;
use roteiro_biblico::{
    lookup_tool_from_config, Config, JsonArchive, ScriptGenerator, ScriptStore, TipoRoteiro,
    VideoDetailGenerator,
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::load().unwrap_or_else(|e| {
        eprintln!("Failed to load config, using defaults: {}", e);
        let mut config = Config::default();
        config.apply_env();
        config
    });

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("roteiro_biblico={}", config.logging.level)));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let matches = Command::new("Roteiro Bíblico")
        .version("0.1.0")
        .about("Biblical verse lookup and YouTube script generation")
        .subcommand_required(true)
        .subcommand(
            Command::new("gerar")
                .about("Generate a script and its YouTube details")
                .arg(
                    Arg::new("tema")
                        .help("Theme of the script")
                        .required(true)
                )
                .arg(
                    Arg::new("tipo")
                        .short('t')
                        .long("tipo")
                        .value_name("TIPO")
                        .help("Script type: video or short")
                        .default_value("video")
                )
                .arg(
                    Arg::new("referencia")
                        .short('r')
                        .long("referencia")
                        .value_name("REF")
                        .help("Suggested reference, e.g. 'fp 4:6-7' (repeatable)")
                        .action(ArgAction::Append)
                )
        )
        .subcommand(
            Command::new("versiculo")
                .about("Look up a reference and print the JSON result")
                .arg(
                    Arg::new("referencia")
                        .help("Reference such as 'rm 5:3-5'")
                        .required(true)
                )
                .arg(
                    Arg::new("traducao")
                        .long("traducao")
                        .value_name("CODE")
                        .help("Translation code")
                )
        )
        .get_matches();

    match matches.subcommand() {
        Some(("versiculo", args)) => {
            let referencia = args.get_one::<String>("referencia").map(String::as_str).unwrap_or_default();
            let traducao = args.get_one::<String>("traducao").map(String::as_str);
            run_lookup(&config, referencia, traducao).await
        }
        Some(("gerar", args)) => {
            let tema = args.get_one::<String>("tema").map(String::as_str).unwrap_or_default();
            let tipo: TipoRoteiro = args
                .get_one::<String>("tipo")
                .map(String::as_str)
                .unwrap_or("video")
                .parse()?;
            let referencias: Vec<String> = args
                .get_many::<String>("referencia")
                .map(|values| values.cloned().collect())
                .unwrap_or_default();
            run_generation(&config, tema, tipo, &referencias).await
        }
        _ => Ok(()),
    }
}

async fn run_lookup(config: &Config, referencia: &str, traducao: Option<&str>) -> Result<()> {
    config.validate_bible()?;
    let tool = lookup_tool_from_config(config)?;

    let response = tool.lookup_verse(referencia, traducao).await;
    if response.is_error() {
        warn!("Lookup returned an error for '{}'", referencia);
    }
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

async fn run_generation(config: &Config, tema: &str, tipo: TipoRoteiro, referencias: &[String]) -> Result<()> {
    config.validate()?;
    info!("{}", config.summary());

    let lookup = Arc::new(lookup_tool_from_config(config)?);
    let store = ScriptStore::connect(&config.storage.database_path).await?;
    let archive = JsonArchive::new(config.storage.json_dir.clone());

    let script_generator = ScriptGenerator::new(
        create_llm(&config.llm.script_llm())?,
        lookup,
        archive,
        store.clone(),
    );
    let video_generator = VideoDetailGenerator::new(create_llm(&config.llm.video_llm())?, store);

    let start_time = std::time::Instant::now();
    let (roteiro, roteiro_id) = script_generator.gerar_roteiro(tema, tipo, referencias).await?;
    let info_video = video_generator
        .gerar_detail_video_youtube(&roteiro, Some(roteiro_id))
        .await?;
    info!("🎉 Generation completed in {:.2}s", start_time.elapsed().as_secs_f64());

    println!("\n=== ROTEIRO GERADO ===");
    println!("ID: {}", roteiro_id);
    println!("Tema: {}", roteiro.tema);
    println!("Tipo: {}", roteiro.tipo);
    println!("Duração: {}", roteiro.duracao_estimada);

    println!("\n=== INFORMAÇÕES DO VÍDEO ===");
    println!("Título: {}", info_video.titulo);
    println!("Tags: {}", info_video.tags.join(", "));
    println!("Hashtags: {}", info_video.hashtags.join(", "));
    println!("Thumbnail Prompt: {}", info_video.thumbnail_prompt);
    println!("\nDescrição:\n{}", info_video.descricao);

    Ok(())
}
