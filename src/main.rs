use clap::Parser;
use tracing_subscriber::EnvFilter;

use logweave::build::{self, BuildContext};
use logweave::cancel::CancelToken;
use logweave::cli::{Cli, Commands, RunArgs};
use logweave::config::{
    DataExport, FileConfig, FileConfigLoader, OutputTarget, RunConfig, SamplesConfig,
};
use logweave::module::ModuleRegistry;
use logweave::report::{self, DataFormat, ModuleProgress};
use logweave::scanner;
use logweave::template::{HtmlRenderer, ReportRenderer, TemplateRegistry};
use logweave::{
    EXIT_ERROR, EXIT_INTERRUPTED, EXIT_MODULE_FAILURE, EXIT_NO_RESULTS, EXIT_SUCCESS,
    LogweaveError,
};

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli);

    let cancel = CancelToken::new();
    install_interrupt_handler(&cancel);

    let exit_code = match &cli.command {
        Commands::Run(args) => run_report(args, &cli, &cancel),
        Commands::Modules => run_modules_list(),
        Commands::Templates => run_templates_list(),
    };

    std::process::exit(exit_code);
}

fn init_tracing(cli: &Cli) {
    let default_level = if cli.quiet {
        "error"
    } else {
        match cli.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("logweave={default_level}")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn install_interrupt_handler(cancel: &CancelToken) {
    let token = cancel.clone();
    if let Err(e) = ctrlc::set_handler(move || token.cancel()) {
        tracing::warn!(error = %e, "could not install interrupt handler");
    }
}

fn run_report(args: &RunArgs, cli: &Cli, cancel: &CancelToken) -> i32 {
    match run_report_impl(args, cli, cancel) {
        Ok(exit_code) => exit_code,
        Err(LogweaveError::Cancelled) => {
            eprintln!("Interrupted, temporary state removed");
            EXIT_INTERRUPTED
        }
        Err(e) => {
            eprintln!("Error: {e}");
            EXIT_ERROR
        }
    }
}

fn run_report_impl(args: &RunArgs, cli: &Cli, cancel: &CancelToken) -> logweave::Result<i32> {
    // 1. Load configuration and freeze the run config
    let file_config = load_file_config(args)?;
    let config = build_run_config(args, file_config)?;

    // 2. Resolve the module run-set
    let registry = ModuleRegistry::builtin();
    let run_set = registry.resolve(&config.include_modules, &config.exclude_modules)?;

    // 3. Discover candidate files
    let files = scanner::discover(&config)?;
    tracing::info!(candidates = files.len(), "discovery finished");

    // 4. Stage the build context and assemble the template
    let ctx = BuildContext::create(config.data.is_some())?;
    let template_registry = TemplateRegistry::builtin();
    let template = template_registry.assemble(&config.template, &ctx)?;

    // 5. Run every module inside the isolation boundary
    let progress = ModuleProgress::new(run_set.len() as u64, cli.quiet);
    let aggregated = report::run_modules(
        &registry, &run_set, &files, &config, &ctx, cancel, &progress,
    )?;

    // 6. Nothing to report: release staging and stop
    if !aggregated.has_results() {
        eprintln!("No analysis results found.");
        ctx.close()?;
        return Ok(if aggregated.any_failed() {
            EXIT_MODULE_FAILURE
        } else {
            EXIT_NO_RESULTS
        });
    }

    // 7. Pre-flight destination check, then render
    build::preflight(&config)?;
    let rendered = HtmlRenderer.render(&ctx.template_dir(), template.base_file, &aggregated, &config)?;

    // 8. Write the staged data export
    if let (Some(data), Some(staged)) = (&config.data, ctx.data_dir()) {
        report::write_export(&staged, &aggregated, data.format)?;
    }

    // 9. Promote the report, then the data directory
    build::promote_report(&config, &rendered)?;
    if let (Some(data), Some(staged)) = (&config.data, ctx.data_dir()) {
        build::promote_data(&staged, &data.dir, config.force)?;
        if data.zip {
            build::compress_dir(&data.dir)?;
        }
    }
    if let OutputTarget::File(path) = &config.output {
        build::copy_alongside(&ctx.template_dir(), template.copy_files, path)?;
        if !cli.quiet {
            eprintln!("Report written to {}", path.display());
        }
    }

    // 10. Teardown
    ctx.close()?;

    Ok(if aggregated.any_failed() {
        EXIT_MODULE_FAILURE
    } else {
        EXIT_SUCCESS
    })
}

fn load_file_config(args: &RunArgs) -> logweave::Result<FileConfig> {
    if args.no_config {
        return Ok(FileConfig::default());
    }

    let loader = FileConfigLoader::new();
    if let Some(path) = &args.config {
        return loader.load_from_path(path);
    }
    let root = args
        .paths
        .first()
        .cloned()
        .unwrap_or_else(|| std::path::PathBuf::from("."));
    loader.load_from_root(&root)
}

/// Merge CLI overrides into the file config and freeze the result.
fn build_run_config(args: &RunArgs, file: FileConfig) -> logweave::Result<RunConfig> {
    let output = if args.stdout {
        OutputTarget::Stdout
    } else {
        OutputTarget::File(args.output.clone().unwrap_or(file.report.output))
    };

    // Stdout mode has no sibling location for a data directory.
    let data_enabled = match (&output, args.data_dir, args.no_data_dir) {
        (OutputTarget::Stdout, _, _) | (_, _, true) => false,
        (_, true, _) => true,
        _ => file.data.enabled,
    };
    let data = if let (true, OutputTarget::File(path)) = (data_enabled, &output) {
        let format = match (&args.data_format, &file.data.format) {
            (Some(format), _) => *format,
            (None, Some(name)) => name
                .parse::<DataFormat>()
                .map_err(LogweaveError::Config)?,
            (None, None) => DataFormat::default(),
        };
        Some(DataExport {
            format,
            zip: args.zip_data || file.data.zip,
            dir: RunConfig::data_dir_for(path),
        })
    } else {
        None
    };

    let mut ignore = file.discovery.ignore;
    ignore.extend(args.ignore.clone());

    let mut samples = SamplesConfig {
        strip_suffixes: file.samples.strip_suffixes,
        replace: file.samples.replace,
    };
    samples.strip_suffixes.extend(args.strip_suffixes.clone());

    let include_modules = if args.modules.is_empty() {
        file.modules.include
    } else {
        args.modules.clone()
    };
    let mut exclude_modules = file.modules.exclude;
    exclude_modules.extend(args.exclude_modules.clone());

    Ok(RunConfig {
        roots: args.paths.clone(),
        file_list: args.file_list.clone(),
        ignore,
        max_filesize: args.max_filesize.unwrap_or(file.discovery.max_filesize),
        include_modules,
        exclude_modules,
        output,
        force: args.force,
        data,
        template: args.template.clone().unwrap_or(file.report.template),
        title: args
            .title
            .clone()
            .or(file.report.title)
            .unwrap_or_else(|| "Analysis Report".to_string()),
        samples,
        run_id: RunConfig::new_run_id(),
    })
}

fn run_modules_list() -> i32 {
    let registry = ModuleRegistry::builtin();
    for id in registry.ids() {
        let name = registry
            .instantiate(id)
            .map_or_else(String::new, |m| m.name().to_string());
        println!("{id:<16} {name}");
    }
    EXIT_SUCCESS
}

fn run_templates_list() -> i32 {
    let registry = TemplateRegistry::builtin();
    for key in registry.keys() {
        println!("{key}");
    }
    EXIT_SUCCESS
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
