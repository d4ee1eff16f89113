use std::io::Write;

use log::info;
use nimbus_core::ApiClient;
use nimbus_core::wait::ensure_deleted;

use crate::cli::{ResourceCommand, WaitFlags};
use crate::output::Printer;
use crate::wait::wait_task_and_show_result;

pub async fn run<W: Write>(
    client: &ApiClient,
    flags: &WaitFlags,
    cmd: ResourceCommand,
    printer: &mut Printer<W>,
) -> anyhow::Result<()> {
    match cmd {
        ResourceCommand::Show { path, id } => {
            let resource = client.get_resource(&path, &id).await?;
            printer.show(&resource)
        }
        ResourceCommand::Delete {
            path,
            id,
            stop_on_error,
        } => {
            let results = client.delete_resource(&path, &id).await?;
            info!("delete of {path} {id} spawned {} task(s)", results.len());

            let label = format!("{path} {id}");
            let (path, id, label) = (&path, &id, label.as_str());
            wait_task_and_show_result(
                flags,
                client,
                &results,
                stop_on_error,
                false,
                move |_| async move { ensure_deleted(label, client.get_resource(path, id).await) },
                printer,
            )
            .await
        }
    }
}
