//! Bridge between a mutating command's `TaskResults` and the terminal.

use std::future::Future;
use std::io::Write;

use anyhow::bail;
use log::info;
use nimbus_core::wait::wait_task_and_return_result;
use nimbus_core::{TaskFetcher, TaskId, TaskResults};
use serde::Serialize;

use crate::cli::WaitFlags;
use crate::output::Printer;

/// Finish a mutating command.
///
/// - `--wait false`: print the task ids and return.
/// - otherwise wait for every task in turn. With `expect_single_resource`
///   the processor's value is printed (e.g. the created resource), else a
///   one-line confirmation per task.
///
/// The first failing task stops the loop.
pub async fn wait_task_and_show_result<F, P, Fut, T, E, W>(
    flags: &WaitFlags,
    fetcher: &F,
    results: &TaskResults,
    stop_on_task_error: bool,
    expect_single_resource: bool,
    processor: P,
    printer: &mut Printer<W>,
) -> anyhow::Result<()>
where
    F: TaskFetcher + ?Sized,
    P: Fn(TaskId) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    T: Serialize,
    E: std::error::Error + Send + Sync + 'static,
    W: Write,
{
    if !flags.wait {
        return printer.show(results);
    }
    if results.is_empty() {
        bail!("no tasks in response");
    }

    for task_id in results {
        info!("waiting for task {task_id} (up to {}s)", flags.wait_seconds);
        let value = wait_task_and_return_result(
            fetcher,
            task_id,
            stop_on_task_error,
            flags.wait_seconds,
            &processor,
        )
        .await?;

        if expect_single_resource {
            printer.show(&value)?;
        } else {
            printer.task_finished(task_id)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;
    use nimbus_core::impls::ScriptedTaskFetcher;
    use nimbus_core::wait::{DeleteCheckError, ensure_deleted};
    use nimbus_core::{ApiError, TaskResultError, TaskState, WaitError};
    use std::convert::Infallible;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn flags(wait: bool) -> WaitFlags {
        WaitFlags {
            wait,
            wait_seconds: 30,
        }
    }

    fn text_printer() -> Printer<Vec<u8>> {
        Printer::new(OutputFormat::Text, Vec::new())
    }

    fn output(printer: Printer<Vec<u8>>) -> String {
        String::from_utf8(printer.into_inner()).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn no_wait_prints_task_ids() {
        let fetcher = ScriptedTaskFetcher::new();
        let results = TaskResults::new(vec!["t-1".into()]);
        let mut printer = text_printer();

        wait_task_and_show_result(
            &flags(false),
            &fetcher,
            &results,
            true,
            true,
            |_| async { Ok::<_, Infallible>(()) },
            &mut printer,
        )
        .await
        .unwrap();

        assert_eq!(output(printer), "tasks: t-1\n");
        assert_eq!(fetcher.total_fetches(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn empty_results_fail_in_wait_mode() {
        let fetcher = ScriptedTaskFetcher::new();
        let mut printer = text_printer();

        let err = wait_task_and_show_result(
            &flags(true),
            &fetcher,
            &TaskResults::default(),
            true,
            true,
            |_| async { Ok::<_, Infallible>(()) },
            &mut printer,
        )
        .await
        .unwrap_err();

        assert_eq!(err.to_string(), "no tasks in response");
        assert!(output(printer).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn single_resource_prints_processor_value() {
        let fetcher =
            ScriptedTaskFetcher::from_states("t-1", &[TaskState::Running, TaskState::Finished]);
        let results = TaskResults::new(vec!["t-1".into()]);
        let mut printer = text_printer();

        wait_task_and_show_result(
            &flags(true),
            &fetcher,
            &results,
            true,
            true,
            |task_id| async move {
                Ok::<_, Infallible>(serde_json::json!({ "id": "c-1", "task": task_id }))
            },
            &mut printer,
        )
        .await
        .unwrap();

        assert_eq!(output(printer), "id: c-1\ntask: t-1\n");
    }

    #[tokio::test(start_paused = true)]
    async fn every_task_is_waited_and_confirmed() {
        let fetcher = ScriptedTaskFetcher::from_states("t-1", &[TaskState::Finished]).script(
            "t-2",
            vec![
                Ok(nimbus_core::Task::new("t-2", TaskState::Running)),
                Ok(nimbus_core::Task::new("t-2", TaskState::Finished)),
            ],
        );
        let results = TaskResults::new(vec!["t-1".into(), "t-2".into()]);
        let calls = AtomicU32::new(0);
        let mut printer = text_printer();

        wait_task_and_show_result(
            &flags(true),
            &fetcher,
            &results,
            true,
            false,
            |_| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { ensure_deleted("router r-1", Err::<(), _>(ApiError::not_found("gone"))) }
            },
            &mut printer,
        )
        .await
        .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(output(printer), "Task t-1 finished\nTask t-2 finished\n");
    }

    #[tokio::test(start_paused = true)]
    async fn first_failure_stops_the_loop() {
        let fetcher = ScriptedTaskFetcher::from_states("t-1", &[TaskState::Error])
            .script("t-2", vec![Ok(nimbus_core::Task::new("t-2", TaskState::Finished))]);
        let results = TaskResults::new(vec!["t-1".into(), "t-2".into()]);
        let mut printer = text_printer();

        let err = wait_task_and_show_result(
            &flags(true),
            &fetcher,
            &results,
            false,
            false,
            |_| async { Ok::<_, Infallible>(()) },
            &mut printer,
        )
        .await
        .unwrap_err();

        let wait_err = err
            .downcast_ref::<TaskResultError<Infallible>>()
            .expect("wait error");
        assert!(matches!(wait_err, TaskResultError::Wait(WaitError::TaskFailed { .. })));
        assert_eq!(fetcher.fetch_count(&"t-2".into()), 0);
        assert!(output(printer).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn resource_still_present_is_an_error() {
        let fetcher = ScriptedTaskFetcher::from_states("t-1", &[TaskState::Finished]);
        let results = TaskResults::new(vec!["t-1".into()]);
        let mut printer = text_printer();

        let err = wait_task_and_show_result(
            &flags(true),
            &fetcher,
            &results,
            true,
            false,
            |_| async { ensure_deleted("router r-1", Ok(serde_json::json!({ "id": "r-1" }))) },
            &mut printer,
        )
        .await
        .unwrap_err();

        let process_err = err
            .downcast_ref::<TaskResultError<DeleteCheckError>>()
            .expect("process error");
        assert!(process_err.is_process());
        assert!(format!("{err:#}").contains("router r-1 still exists"));
    }
}
