//! Then steps for sample lifecycle BDD scenarios.

use super::world::{BACKUP_FILE, SampleLifecycleWorld, TABLE_FILE, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::then;
use sample_tracker::sample::{
    domain::{RejectionKind, SampleRecord, SampleStatus},
    ports::SampleStore,
    services::SampleLifecycleError,
};

fn stored_record(
    world: &SampleLifecycleWorld,
    serial: &str,
) -> Result<SampleRecord, eyre::Report> {
    let table = run_async(world.store.load()).wrap_err("load stored table")?;
    table
        .find(serial)
        .cloned()
        .ok_or_else(|| eyre::eyre!("sample {serial} is not in the stored table"))
}

#[then("the last operation succeeds")]
fn last_operation_succeeds(world: &SampleLifecycleWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing operation result"))?;
    if let Err(err) = result {
        return Err(eyre::eyre!("expected success, got {err}"));
    }
    Ok(())
}

#[then(r#"the last operation is rejected as "{kind}""#)]
fn last_operation_rejected(
    world: &SampleLifecycleWorld,
    kind: String,
) -> Result<(), eyre::Report> {
    let expected = match kind.as_str() {
        "not found" => RejectionKind::NotFound,
        "conflict" => RejectionKind::Conflict,
        "confirmation required" => RejectionKind::ConfirmationRequired,
        other => return Err(eyre::eyre!("unknown rejection kind in scenario: {other}")),
    };
    let result = world
        .last_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing operation result"))?;

    match result {
        Err(err) if err.rejection_kind() == Some(expected) => Ok(()),
        other => Err(eyre::eyre!("expected {expected:?} rejection, got {other:?}")),
    }
}

#[then("the last operation fails with a store error")]
fn last_operation_store_error(world: &SampleLifecycleWorld) -> Result<(), eyre::Report> {
    match &world.last_result {
        Some(Err(SampleLifecycleError::Store(_))) => Ok(()),
        other => Err(eyre::eyre!("expected a store error, got {other:?}")),
    }
}

#[then(r#"sample "{serial}" has model "{model}""#)]
fn sample_has_model(
    world: &SampleLifecycleWorld,
    serial: String,
    model: String,
) -> Result<(), eyre::Report> {
    let record = stored_record(world, &serial)?;
    if record.model() != model {
        return Err(eyre::eyre!("expected model {model}, found {}", record.model()));
    }
    Ok(())
}

#[then(r#"sample "{serial}" has status "{status}""#)]
fn sample_has_status(
    world: &SampleLifecycleWorld,
    serial: String,
    status: String,
) -> Result<(), eyre::Report> {
    let expected = SampleStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let record = stored_record(world, &serial)?;
    if record.status() != expected {
        return Err(eyre::eyre!(
            "expected status {}, found {}",
            expected.as_str(),
            record.status().as_str()
        ));
    }
    Ok(())
}

#[then(r#"sample "{serial}" was last sent to client "{client}""#)]
fn sample_last_sent_to(
    world: &SampleLifecycleWorld,
    serial: String,
    client: String,
) -> Result<(), eyre::Report> {
    let record = stored_record(world, &serial)?;
    if record.sent_to_client() != client {
        return Err(eyre::eyre!(
            "expected client {client}, found {}",
            record.sent_to_client()
        ));
    }
    Ok(())
}

#[then("the stored table holds {count:usize} samples")]
fn stored_table_holds(world: &SampleLifecycleWorld, count: usize) -> Result<(), eyre::Report> {
    let table = run_async(world.store.load()).wrap_err("load stored table")?;
    if table.len() != count {
        return Err(eyre::eyre!("expected {count} samples, found {}", table.len()));
    }
    Ok(())
}

#[then("the view holds {count:usize} samples")]
fn view_holds(world: &SampleLifecycleWorld, count: usize) -> Result<(), eyre::Report> {
    let view = world
        .last_view
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing viewed table"))?;
    if view.len() != count {
        return Err(eyre::eyre!("expected {count} samples, found {}", view.len()));
    }
    Ok(())
}

#[then("the backup file matches the table file")]
fn backup_matches_table(world: &SampleLifecycleWorld) -> Result<(), eyre::Report> {
    let table = std::fs::read_to_string(world.file_path(TABLE_FILE))
        .wrap_err("read table file")?;
    let backup = std::fs::read_to_string(world.file_path(BACKUP_FILE))
        .wrap_err("read backup file")?;
    if table != backup {
        return Err(eyre::eyre!("backup file differs from table file"));
    }
    Ok(())
}

fn file_unchanged(
    world: &SampleLifecycleWorld,
    file_name: &str,
    seeded: Option<&String>,
) -> Result<(), eyre::Report> {
    let expected = seeded.ok_or_else(|| eyre::eyre!("{file_name} was not seeded"))?;
    let actual = std::fs::read_to_string(world.file_path(file_name))
        .wrap_err_with(|| format!("read {file_name}"))?;
    if &actual != expected {
        return Err(eyre::eyre!("{file_name} was rewritten"));
    }
    Ok(())
}

#[then("the table file is unchanged")]
fn table_file_unchanged(world: &SampleLifecycleWorld) -> Result<(), eyre::Report> {
    file_unchanged(world, TABLE_FILE, world.seeded_table.as_ref())
}

#[then("the backup file is unchanged")]
fn backup_file_unchanged(world: &SampleLifecycleWorld) -> Result<(), eyre::Report> {
    file_unchanged(world, BACKUP_FILE, world.seeded_backup.as_ref())
}
