//! When steps for sample lifecycle BDD scenarios.

use super::world::{SampleLifecycleWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;
use sample_tracker::sample::services::{
    DeleteSampleRequest, RegisterSampleRequest, ReturnSampleRequest, SendSampleRequest,
};

#[when(r#"sample "{serial}" is registered with model "{model}""#)]
fn register_sample(world: &mut SampleLifecycleWorld, serial: String, model: String) {
    let request = RegisterSampleRequest::new(serial).with_model(model);
    world.last_result = Some(run_async(world.service.register(request)));
}

#[when(r#"sample "{serial}" is sent to client "{client}""#)]
fn send_sample(world: &mut SampleLifecycleWorld, serial: String, client: String) {
    let request = SendSampleRequest::new(serial, client);
    world.last_result = Some(run_async(world.service.send(request)));
}

#[when(r#"sample "{serial}" is returned with courier "{courier_id}""#)]
fn return_sample(world: &mut SampleLifecycleWorld, serial: String, courier_id: String) {
    let request = ReturnSampleRequest::new(serial).with_courier_id(courier_id);
    world.last_result = Some(run_async(world.service.return_sample(request)));
}

#[when(r#"sample "{serial}" is deleted without confirmation"#)]
fn delete_unconfirmed(world: &mut SampleLifecycleWorld, serial: String) {
    let request = DeleteSampleRequest::new(serial);
    world.last_result = Some(run_async(world.service.delete(request)));
}

#[when(r#"sample "{serial}" is deleted with confirmation"#)]
fn delete_confirmed(world: &mut SampleLifecycleWorld, serial: String) {
    let request = DeleteSampleRequest::new(serial).confirmed(true);
    world.last_result = Some(run_async(world.service.delete(request)));
}

#[when("the sample table is viewed")]
fn view_table(world: &mut SampleLifecycleWorld) -> Result<(), eyre::Report> {
    let table = run_async(world.service.list()).wrap_err("view sample table")?;
    world.last_view = Some(table);
    Ok(())
}
