use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};
use std::fs;

/// `pieceout config`: view or verify the configuration file.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Config {
        print_config,
        check,
    } = cmd
    else {
        unreachable!("config handler called with wrong command");
    };

    if *print_config {
        let path = Config::config_file();
        match fs::read_to_string(&path) {
            Ok(content) => {
                info(format!("Configuration file: {}", path.display()));
                println!("{}", content);
            }
            Err(_) => warning(format!(
                "No configuration file at {} (defaults in effect).",
                path.display()
            )),
        }
    }

    if *check {
        // Effective configuration after defaults are applied.
        println!("database:     {}", cfg.database);
        println!("images_dir:   {}", cfg.images_dir);
        println!("timer_state:  {}", cfg.timer_state);
        println!("default_sort: {:?}", cfg.default_sort);
        success("Configuration loads cleanly.");
    }

    if !*print_config && !*check {
        info("Nothing to do (use --print or --check).");
    }
    Ok(())
}
