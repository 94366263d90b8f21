use crate::cli::commands::{load_roster, open_pool};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::register::RegisterLogic;
use crate::errors::AppResult;
use crate::models::structure::StructureForm;
use crate::ui::messages::success;
use crate::utils::date;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Register {
        pin,
        ct,
        field,
        table_no,
        torque,
        checklist,
        start,
        end,
        notes,
        policy,
    } = cmd
    {
        let roster = load_roster(cfg)?;
        let worker = roster.authenticate(pin)?;

        let form = StructureForm {
            ct: ct.clone(),
            field: field.clone(),
            table_no: table_no.clone(),
            torque_status: torque.clone(),
            checklist_status: checklist.clone(),
            start_time: start.clone(),
            end_time: end.clone(),
            notes: notes.clone(),
        };

        let policy = policy.unwrap_or(cfg.duplicate_policy);

        let mut pool = open_pool(cfg)?;
        let record = RegisterLogic::apply(&mut pool, worker, &form, policy, date::today())?;

        success(format!(
            "Registered {} (#{}) for {} on {}",
            record.key().label(),
            record.id,
            record.worker_name,
            record.date_str()
        ));
    }

    Ok(())
}
