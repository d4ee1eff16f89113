use std::io::Write;

use nimbus_core::wait::wait_for_status;
use nimbus_core::{ApiClient, TaskFetcher, TaskState, WaitOptions};

use crate::cli::{TaskCommand, WaitFlags};
use crate::output::Printer;

pub async fn run<W: Write>(
    client: &ApiClient,
    flags: &WaitFlags,
    cmd: TaskCommand,
    printer: &mut Printer<W>,
) -> anyhow::Result<()> {
    match cmd {
        TaskCommand::Show { task_id } => {
            let task = client.get_task(&task_id).await?;
            printer.show(&task)
        }
        // `--wait` は無視: このコマンドは待つこと自体が目的
        TaskCommand::Wait {
            task_id,
            stop_on_error,
        } => {
            let options = WaitOptions::new(flags.wait_seconds, stop_on_error);
            let task = wait_for_status(client, &task_id, TaskState::Finished, &options).await?;
            printer.show(&task)
        }
    }
}
