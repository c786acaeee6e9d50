use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod config;
mod context;
mod format;
mod logging;

/// Nexus CLI - Manage Docker Private Registry on Nexus
#[derive(Parser, Debug)]
#[command(name = "nexus-cli")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Verbose output (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Control colored output: auto, always, never
    #[arg(long, global = true, default_value = "auto")]
    color: String,

    /// Credentials file (default: $NEXUS_CREDENTIALS or ./.credentials)
    #[arg(long, global = true)]
    credentials: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Configure Nexus Credentials
    Configure,
    /// Manage Docker Images
    Image {
        #[command(subcommand)]
        command: ImageCommands,
    },
    /// Display version information
    Version,
    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completion for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
enum ImageCommands {
    /// List all images in repository
    #[command(name = "ls", visible_alias = "list")]
    List {
        /// Output format: pretty, json, yaml
        #[arg(short, long, default_value = "pretty")]
        format: String,
    },
    /// Display all image tags, oldest first
    Tags {
        /// Image name
        #[arg(short, long)]
        name: String,
        /// Output format: pretty, json, yaml
        #[arg(short, long, default_value = "pretty")]
        format: String,
    },
    /// Show image details
    Info {
        /// Image name
        #[arg(short, long)]
        name: String,
        /// Image tag
        #[arg(short, long)]
        tag: String,
        /// Output format: pretty, json, yaml
        #[arg(short, long, default_value = "pretty")]
        format: String,
    },
    /// Delete an image tag, or all but the newest tags
    Delete {
        /// Image name
        #[arg(short, long)]
        name: String,
        /// Tag to delete
        #[arg(short, long)]
        tag: Option<String>,
        /// Number of newest tags to keep
        #[arg(short, long)]
        keep: Option<usize>,
        /// Show what would be deleted without deleting
        #[arg(long)]
        dry_run: bool,
    },
    /// Show total size of image including all tags
    Size {
        /// Image name
        #[arg(short, long)]
        name: String,
        /// Output format: pretty, json, yaml
        #[arg(short, long, default_value = "pretty")]
        format: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let verbosity = context::VerbosityLevel::from_count(cli.verbose);
    let ctx = context::AppContext::build(
        format::ColorChoice::from(cli.color.as_str()),
        verbosity,
        cli.credentials,
    );

    if let Err(e) = logging::init(verbosity) {
        format::warning(&ctx, &e);
    }

    match cli.command {
        Commands::Configure => commands::configure::handle_configure(&ctx),
        Commands::Image { command } => match command {
            ImageCommands::List { format } => {
                let fmt = format::OutputFormat::from(format.as_str());
                commands::image::handlers::handle_image_list(&ctx, fmt);
            }
            ImageCommands::Tags { name, format } => {
                let fmt = format::OutputFormat::from(format.as_str());
                commands::image::handlers::handle_image_tags(&ctx, &name, fmt);
            }
            ImageCommands::Info { name, tag, format } => {
                let fmt = format::OutputFormat::from(format.as_str());
                commands::image::handlers::handle_image_info(&ctx, &name, &tag, fmt);
            }
            ImageCommands::Delete {
                name,
                tag,
                keep,
                dry_run,
            } => {
                commands::image::handlers::handle_image_delete(
                    &ctx,
                    &name,
                    tag.as_deref(),
                    keep,
                    dry_run,
                );
            }
            ImageCommands::Size { name, format } => {
                let fmt = format::OutputFormat::from(format.as_str());
                commands::image::handlers::handle_image_size(&ctx, &name, fmt);
            }
        },
        Commands::Version => commands::version::print_version(),
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            let bin_name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, bin_name, &mut std::io::stdout());
        }
    }
}
