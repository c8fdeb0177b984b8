use clap::Parser;
use change_tracker::cli::commands::{cmd_inspect, cmd_replay};
use change_tracker::cli::config::{Cli, Commands, load_config, resolve_settings};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref());

    match cli.command {
        Commands::Inspect { form, root } => {
            let settings = resolve_settings(&config, root.as_deref(), None, None, cli.trace.as_deref());
            cmd_inspect(&form, &settings, cli.verbose)?;
        }
        Commands::Replay {
            form,
            script,
            format,
            output,
        } => {
            let settings = resolve_settings(
                &config,
                None,
                format.as_deref(),
                output.as_deref(),
                cli.trace.as_deref(),
            );
            let all_passed = cmd_replay(&form, &script, &settings, cli.verbose)?;
            if !all_passed {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
