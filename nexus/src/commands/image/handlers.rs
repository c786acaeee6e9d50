use super::*;
use crate::config;
use crate::context::{AppContext, VerbosityLevel};
use crate::format::{self, OutputFormat};

fn open_registry_or_exit(ctx: &AppContext) -> Registry {
    format::print(
        ctx,
        VerbosityLevel::VeryVerbose,
        &format!("Reading credentials from {}", ctx.credentials_path.display()),
    );

    match config::open_registry(&ctx.credentials_path) {
        Ok(registry) => {
            format::print(
                ctx,
                VerbosityLevel::VeryVerbose,
                &format!("Using registry API at {}", registry.base_url()),
            );
            registry
        }
        Err(e) => {
            format::error(ctx, &e);
            std::process::exit(1);
        }
    }
}

fn print_output<T: Formattable>(ctx: &AppContext, item: &T, format: OutputFormat) {
    match format::format_output(item, format) {
        Ok(output) => println!("{}", output.trim_end()),
        Err(e) => {
            format::error(ctx, &e);
            std::process::exit(1);
        }
    }
}

/// Handle the image ls command
pub fn handle_image_list(ctx: &AppContext, format: OutputFormat) {
    format::print(ctx, VerbosityLevel::Verbose, "Listing images from registry...");

    let registry = open_registry_or_exit(ctx);
    match list_images(&registry) {
        Ok(images) => print_output(ctx, &images, format),
        Err(e) => {
            format::error(ctx, &e);
            std::process::exit(1);
        }
    }
}

/// Handle the image tags command
pub fn handle_image_tags(ctx: &AppContext, image: &str, format: OutputFormat) {
    format::print(
        ctx,
        VerbosityLevel::Verbose,
        &format!("Listing tags for image: {}", image),
    );

    let registry = open_registry_or_exit(ctx);
    let spinner = format::spinner(ctx, &format!("Fetching tag dates for {}...", image));
    let result = list_tags(&registry, image);
    spinner.finish_and_clear();

    match result {
        Ok(tags) => print_output(ctx, &tags, format),
        Err(e) => {
            format::error(ctx, &e);
            std::process::exit(1);
        }
    }
}

/// Handle the image info command
pub fn handle_image_info(ctx: &AppContext, image: &str, tag: &str, format: OutputFormat) {
    format::print(
        ctx,
        VerbosityLevel::Verbose,
        &format!("Fetching manifest for {}:{}", image, tag),
    );

    let registry = open_registry_or_exit(ctx);
    match image_info(&registry, image, tag) {
        Ok(info) => print_output(ctx, &info, format),
        Err(e) => {
            format::error(ctx, &e);
            std::process::exit(1);
        }
    }
}

/// Handle the image delete command
pub fn handle_image_delete(
    ctx: &AppContext,
    image: &str,
    tag: Option<&str>,
    keep: Option<usize>,
    dry_run: bool,
) {
    let mode = match delete_mode(tag, keep) {
        Ok(mode) => mode,
        Err(e) => {
            format::error(ctx, &e);
            std::process::exit(1);
        }
    };

    let registry = open_registry_or_exit(ctx);

    match mode {
        DeleteMode::Tag(tag) if dry_run => match delete_tag(&registry, image, &tag, true) {
            Ok(digest) => {
                println!("{}", deletion_notice(image, &tag, true));
                format::warning(
                    ctx,
                    &format!("Dry run: {}:{} ({}) was not deleted", image, tag, digest),
                );
            }
            Err(e) => {
                format::error(ctx, &e);
                std::process::exit(1);
            }
        },
        DeleteMode::Tag(tag) => {
            println!("{}", deletion_notice(image, &tag, false));
            match delete_tag(&registry, image, &tag, false) {
                Ok(digest) => {
                    format::print(ctx, VerbosityLevel::Verbose, &format!("Deleted {}", digest));
                    format::success(ctx, &format!("{}:{} has been successful deleted", image, tag));
                }
                Err(e) => {
                    format::error(ctx, &e);
                    std::process::exit(1);
                }
            }
        }
        DeleteMode::Keep(keep) => {
            let spinner = format::spinner(ctx, &format!("Fetching tag dates for {}...", image));
            let result = delete_keeping(&registry, image, keep, dry_run, |progress| {
                spinner.finish_and_clear();
                match progress {
                    DeleteProgress::Deleting { tag } => {
                        println!("{}", deletion_notice(image, tag, false));
                    }
                    DeleteProgress::Deleted { tag, digest } => {
                        format::print(ctx, VerbosityLevel::Verbose, &format!("Deleted {}", digest));
                        format::success(
                            ctx,
                            &format!("{}:{} has been successful deleted", image, tag),
                        );
                    }
                }
            });
            spinner.finish_and_clear();

            match result {
                Ok(RetentionOutcome::NotEnoughTags { available }) => {
                    println!("Only {} images are available", available);
                }
                Ok(RetentionOutcome::Planned { tags }) => {
                    for tag in &tags {
                        println!("{}", deletion_notice(image, tag, true));
                    }
                    format::warning(
                        ctx,
                        &format!("Dry run: {} tags of {} were not deleted", tags.len(), image),
                    );
                }
                Ok(RetentionOutcome::Deleted { deleted }) => {
                    format::print(
                        ctx,
                        VerbosityLevel::Verbose,
                        &format!("Deleted {} tags of {}", deleted.len(), image),
                    );
                }
                Err(e) => {
                    format::error(ctx, &e);
                    std::process::exit(1);
                }
            }
        }
    }
}

/// Handle the image size command
pub fn handle_image_size(ctx: &AppContext, image: &str, format: OutputFormat) {
    format::print(
        ctx,
        VerbosityLevel::Verbose,
        &format!("Computing total size of {}", image),
    );

    let registry = open_registry_or_exit(ctx);
    let spinner = format::spinner(ctx, &format!("Fetching manifests for {}...", image));
    let result = total_size(&registry, image);
    spinner.finish_and_clear();

    match result {
        Ok(report) => print_output(ctx, &report, format),
        Err(e) => {
            format::error(ctx, &e);
            std::process::exit(1);
        }
    }
}
