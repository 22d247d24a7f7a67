use anyhow::Context;
use clap::Parser;
use fake_file::config::{CliConfig, Command, GenerateArgs, TomlConfig};
use fake_file::core::registry::generator_paths;
use fake_file::utils::{logger, validation::Validate};
use fake_file::{
    provider_names, resolve_provider, BatchEngine, Fake, FakeFileError, FileProviderExt,
    FileSystemStorage, Naming,
};
use std::io::Write;

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    let result = match &cli.command {
        Command::List => {
            list();
            Ok(())
        }
        Command::Generate(args) => generate(args),
        Command::Run { config } => run(config),
    };

    if let Err(e) = result {
        match e.downcast_ref::<FakeFileError>() {
            Some(err) => exit_with(err),
            None => return Err(e),
        }
    }
    Ok(())
}

fn exit_with(e: &FakeFileError) -> ! {
    tracing::error!(
        "❌ Generation failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    std::process::exit(e.severity().exit_code())
}

fn list() {
    println!("Providers:");
    for name in provider_names() {
        println!("  {}", name);
    }
    println!("Generators:");
    for (alias, path) in generator_paths() {
        println!("  {:<12} {}", alias, path);
    }
}

fn fake_for(seed: Option<u64>) -> Fake {
    match seed {
        Some(seed) => Fake::seeded(seed),
        None => Fake::new(),
    }
}

fn generate(args: &GenerateArgs) -> anyhow::Result<()> {
    let options: serde_json::Value =
        serde_json::from_str(&args.options).context("--options is not valid JSON")?;
    let provider = resolve_provider(&args.provider, &options)?;
    let mut fake = fake_for(args.seed);

    if args.raw {
        let value = provider.raw(&mut fake)?;
        std::io::stdout().write_all(&value)?;
        return Ok(());
    }

    let storage = FileSystemStorage::new(&args.root_path, args.rel_path.clone());
    let naming = Naming {
        prefix: args.prefix.clone(),
        basename: args.basename.clone(),
    };
    tracing::info!("🚀 Generating {} x {}", args.count, args.provider);
    for _ in 0..args.count {
        let value = provider.save(&mut fake, &storage, &naming)?;
        println!("{}", value.data.filename.as_deref().unwrap_or(value.as_str()));
    }
    tracing::info!("✅ Done");
    Ok(())
}

fn run(path: &std::path::Path) -> anyhow::Result<()> {
    tracing::info!("📁 Loading configuration from: {}", path.display());
    let config = TomlConfig::from_file(path)?;
    config.validate()?;
    tracing::info!("✅ Configuration loaded and validated successfully");

    let storage = config.storage.build()?;
    let mut engine = BatchEngine::new(storage, fake_for(config.seed));
    let saved = engine.run(&config.files)?;
    for value in &saved {
        println!("{}", engine.storage().abspath(value.as_str()));
    }
    tracing::info!("✅ {} file(s) generated", saved.len());
    Ok(())
}
