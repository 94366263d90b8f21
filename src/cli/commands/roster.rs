use crate::cli::commands::load_roster;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};
use crate::utils::mask_pin;
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Roster { list, check_pin } = cmd {
        let roster = load_roster(cfg)?;

        if *list {
            if roster.is_empty() {
                warning("Roster is empty.");
            } else {
                let mut table = Table::with_headers(&["ID", "NAME", "ROLE", "PIN"]);
                for w in roster.workers() {
                    table.add_row(vec![
                        w.id.to_string(),
                        w.name.clone(),
                        w.role.as_str().to_string(),
                        mask_pin(&w.pin),
                    ]);
                }
                print!("{}", table.render(&cfg.separator_char));
                println!("\n{} worker(s)", roster.len());
            }
        }

        if let Some(pin) = check_pin {
            let w = roster.authenticate(pin)?;
            success(format!("PIN belongs to {} (#{}, {})", w.name, w.id, w.role.as_str()));
        }
    }

    Ok(())
}
