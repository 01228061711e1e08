use clap::Parser;
use std::process;
use trialscout::{
    build_query_term, extract, fetcher, taxonomy, Cli, OutputFormatter, OutputMode,
    Prospector, ProspectorError, UserFriendlyError,
};

#[tokio::main]
async fn main() {
    let exit_code = run().await;
    process::exit(exit_code);
}

async fn run() -> i32 {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Handle special commands first
    if cli.generate_config {
        return handle_generate_config(&cli);
    }
    if cli.list_categories {
        return handle_list_categories();
    }
    if cli.list_extractors {
        return handle_list_extractors();
    }

    // Create Prospector instance
    let prospector = match Prospector::from_cli(&cli) {
        Ok(prospector) => prospector,
        Err(e) => {
            print_startup_error(&e);
            return 1;
        }
    };

    // Handle dry run mode
    if cli.dry_run {
        return handle_dry_run(&prospector);
    }

    // Execute main prospecting workflow
    match prospector.run().await {
        Ok(report) => {
            if report.transport_error.is_some() {
                2 // Partial results
            } else {
                0 // Success
            }
        }
        Err(e) => {
            prospector.handle_error(&e);

            // Map error types to appropriate exit codes
            match e {
                ProspectorError::Cancelled => 130, // Interrupted (SIGINT)
                ProspectorError::InvalidQuery { .. } => 3,
                ProspectorError::UnknownExtractor { .. } => 4,
                ProspectorError::UnknownCategory { .. } => 4,
                ProspectorError::Http { .. } => 5,
                ProspectorError::Api { .. } => 5,
                ProspectorError::NothingToExport => 6,
                ProspectorError::Export { .. } => 7,
                _ => 1, // General error
            }
        }
    }
}

fn handle_generate_config(cli: &Cli) -> i32 {
    let config_path = cli
        .config
        .as_ref()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|| "trialscout.toml".to_string());

    match Prospector::generate_sample_config(&config_path) {
        Ok(()) => {
            println!("Generated sample configuration file: {}", config_path);
            println!("\nTo use this configuration:");
            println!("  trialscout <keywords> --config {}", config_path);
            println!("\nEdit the file to customize settings for your needs.");
            0
        }
        Err(e) => {
            eprintln!("Failed to generate configuration file: {}", e.user_message());
            if let Some(suggestion) = e.suggestion() {
                eprintln!("Suggestion: {}", suggestion);
            }
            1
        }
    }
}

fn handle_list_categories() -> i32 {
    println!("Organization categories (classification order):\n");
    for entry in taxonomy::entries() {
        let keywords = if entry.keywords.is_empty() {
            "fallback when nothing else matches".to_string()
        } else {
            entry.keywords.join(", ")
        };
        println!("  {:<12} {}", entry.category.key(), entry.label);
        println!("  {:<12} matches: {}\n", "", keywords);
    }
    println!("Use with --include or --exclude, e.g. --exclude university,hospital");
    0
}

fn handle_list_extractors() -> i32 {
    println!("Available extraction options:\n");
    for option in extract::options() {
        let marker = if option.is_default { " (default)" } else { "" };
        println!("  {:<15} {}{}", option.key, option.label, marker);
        println!("  {:<15} {}\n", "", option.description);
    }
    println!("Use with --extract, e.g. --extract sponsors,locations,contacts");
    0
}

fn handle_dry_run(prospector: &Prospector) -> i32 {
    let formatter = prospector.output_formatter();
    let config = prospector.config();

    formatter.info("DRY RUN MODE - The registry will not be contacted");
    formatter.print_separator();

    let query_term = build_query_term(&config.search.keywords, &config.search.phases);
    formatter.info("Search that would be run:");
    println!("  Endpoint: {}", config.search.endpoint);
    println!("  Query term: {}", query_term);
    if !config.search.statuses.is_empty() {
        println!("  Statuses: {}", config.search.statuses.join(", "));
    }
    println!(
        "  Max results: {}",
        fetcher::effective_max_results(config.search.max_results)
    );

    formatter.info("Extraction that would be applied:");
    println!("  Options: {}", config.extraction.options.join(", "));
    println!("  Include categories: {}", format_categories(&config.filters.include));
    println!("  Exclude categories: {}", format_categories(&config.filters.exclude));

    formatter.info("Export settings:");
    println!("  Output directory: {}", config.export.output_dir.display());
    println!("  Delimiter: {:?}", config.export.delimiter);
    println!("  Spreadsheet: {}", config.export.spreadsheet);
    println!("  Target role: {}", config.export.target_role);

    formatter.print_separator();
    formatter.success("Dry run completed successfully");
    formatter.info("Run without --dry-run to query the registry");

    0
}

fn format_categories(categories: &[taxonomy::OrgCategory]) -> String {
    if categories.is_empty() {
        "(none)".to_string()
    } else {
        categories
            .iter()
            .map(|c| c.key())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn print_startup_error(error: &ProspectorError) {
    // Create a basic formatter for startup errors
    let formatter = OutputFormatter::new(OutputMode::Human, 0, false);
    formatter.print_user_friendly_error(error);
}
