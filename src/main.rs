use clap::{crate_authors, crate_description, crate_name, crate_version, Arg, ArgAction, Command};
use sprout::{BootstrapRequest, Outcome, Settings};
use std::path::PathBuf;

// The CLI layer should only parse inputs and forward them to library code.
fn main() -> miette::Result<()> {
    let matches = Command::new(crate_name!())
        .about(crate_description!())
        .author(crate_authors!())
        .version(crate_version!())
        .disable_version_flag(true)
        .arg(
            Arg::new("tool-version")
                .short('V')
                .long("tool-version")
                .help("Print version")
                .action(ArgAction::Version),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("name")
                .short('n')
                .long("name")
                .help("Package name"),
        )
        .arg(
            Arg::new("scope")
                .short('s')
                .long("scope")
                .help("Package scope, producing @<scope>/<name>"),
        )
        .arg(
            Arg::new("version")
                .short('v')
                .long("version")
                .help("Initial package version [default: 0.0.1]"),
        )
        .arg(
            Arg::new("description")
                .short('d')
                .long("description")
                .help("Package description [default: <name> package]"),
        )
        .arg(
            Arg::new("shared-root")
                .long("shared-root")
                .help("Directory holding the shared tsconfig.json and tsconfig/ to link"),
        )
        .arg(
            Arg::new("dry-run")
                .long("dry-run")
                .help("Preview the package without writing anything")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("out-dir")
                .help("The directory where the package will be created, must not exist"),
        )
        .get_matches();

    init_logger(matches.get_flag("verbose"));

    let mut settings = Settings::default();
    if let Some(shared_root) = matches.get_one::<String>("shared-root") {
        settings = settings.with_shared_root(shared_root);
    }

    let request = BootstrapRequest {
        name: matches.get_one::<String>("name").cloned(),
        scope: matches.get_one::<String>("scope").cloned(),
        version: matches.get_one::<String>("version").cloned(),
        description: matches.get_one::<String>("description").cloned(),
        out_dir: matches.get_one::<String>("out-dir").map(PathBuf::from),
        dry_run: matches.get_flag("dry-run"),
    };

    match sprout::bootstrap(&request, &settings)? {
        Outcome::Created(descriptor) => {
            log::info!("created {}", descriptor.name())
        }
        Outcome::Previewed(descriptor) => log::info!("previewed {}", descriptor.name()),
    }

    Ok(())
}

fn init_logger(is_verbose: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));

    if is_verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }

    builder.init();
}
