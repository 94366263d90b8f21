use crate::cli::commands::{load_roster, open_pool};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::edit::EditLogic;
use crate::errors::AppResult;
use crate::models::status::CheckStatus;
use crate::ui::messages::{info, success};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Edit {
        pin,
        id,
        torque,
        checklist,
        notes,
    } = cmd
    {
        let roster = load_roster(cfg)?;
        let editor = roster.require_supervisor(pin, "edit records")?;

        let torque = torque.as_deref().map(CheckStatus::parse).transpose()?;
        let checklist = checklist.as_deref().map(CheckStatus::parse).transpose()?;

        let mut pool = open_pool(cfg)?;
        let (record, changes) =
            EditLogic::apply(&mut pool, editor, *id, torque, checklist, notes.clone())?;

        if changes.is_empty() {
            info(format!("Nothing to change on {}", record.key().label()));
            return Ok(());
        }

        for c in &changes {
            println!("  {}: {} -> {}", c.field, c.before, c.after);
        }
        success(format!("Updated {} (#{})", record.key().label(), record.id));
    }

    Ok(())
}
