//! Given steps for sample lifecycle BDD scenarios.

use super::world::{EDITED_SHEET, SampleLifecycleWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use sample_tracker::sample::services::{RegisterSampleRequest, SendSampleRequest};

#[given("an empty sample table")]
fn empty_sample_table(world: &mut SampleLifecycleWorld) -> Result<(), eyre::Report> {
    let table = run_async(world.service.list()).wrap_err("list samples in setup")?;
    if !table.is_empty() {
        return Err(eyre::eyre!("expected a fresh table, found {} rows", table.len()));
    }
    Ok(())
}

#[given(r#"sample "{serial}" has been registered"#)]
fn sample_registered(
    world: &mut SampleLifecycleWorld,
    serial: String,
) -> Result<(), eyre::Report> {
    run_async(world.service.register(RegisterSampleRequest::new(serial)))
        .wrap_err("register sample in scenario setup")?;
    Ok(())
}

#[given(r#"sample "{serial}" has been sent to client "{client}""#)]
fn sample_sent(
    world: &mut SampleLifecycleWorld,
    serial: String,
    client: String,
) -> Result<(), eyre::Report> {
    run_async(world.service.send(SendSampleRequest::new(serial, client)))
        .wrap_err("send sample in scenario setup")?;
    Ok(())
}

#[given("a stored table edited in a spreadsheet")]
fn stored_table_edited(world: &mut SampleLifecycleWorld) -> Result<(), eyre::Report> {
    world
        .seed_files(EDITED_SHEET.to_owned(), EDITED_SHEET.to_owned())
        .wrap_err("write edited table files")
}

#[given(r#"a stored table where sample "{serial}" has status "{status}""#)]
fn stored_table_with_status(
    world: &mut SampleLifecycleWorld,
    serial: String,
    status: String,
) -> Result<(), eyre::Report> {
    let mut damaged = String::new();
    for line in EDITED_SHEET.lines() {
        let mut cells: Vec<&str> = line.split(',').collect();
        if cells.get(1) == Some(&serial.as_str()) {
            if let Some(cell) = cells.get_mut(4) {
                *cell = status.as_str();
            }
        }
        damaged.push_str(&cells.join(","));
        damaged.push('\n');
    }
    world
        .seed_files(damaged, EDITED_SHEET.to_owned())
        .wrap_err("write damaged table files")
}

#[given(r#"a stored table where sample "{serial}" appears twice"#)]
fn stored_table_with_duplicate(
    world: &mut SampleLifecycleWorld,
    serial: String,
) -> Result<(), eyre::Report> {
    let table = format!(
        "Model,SerialNumber,Status\nfirst,{serial},InStock\nsecond,{serial},InStock\nX2,SN-2,InStock\n"
    );
    world
        .seed_files(table.clone(), table)
        .wrap_err("write duplicated table files")
}
