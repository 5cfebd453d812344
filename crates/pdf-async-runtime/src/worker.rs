use pdf_quadrant::{
    PrintOutcome, PrintSpooler, compose, plan_composition, render_for_download, render_for_print,
};
use std::collections::VecDeque;
use tokio::sync::mpsc;

use crate::{ComposeCommand, ComposeUpdate};

/// Async worker task that processes composition commands and sends updates.
///
/// Commands run one at a time, so at most one composition is in flight.
/// Repeated print or download requests that queue up while one is running
/// collapse into the newest.
pub async fn worker_task<S: PrintSpooler>(
    mut command_rx: mpsc::UnboundedReceiver<ComposeCommand>,
    update_tx: mpsc::UnboundedSender<ComposeUpdate>,
    spooler: S,
) {
    let mut backlog = VecDeque::new();

    loop {
        let cmd = match backlog.pop_front() {
            Some(cmd) => cmd,
            None => match command_rx.recv().await {
                Some(cmd) => cmd,
                None => break,
            },
        };

        let cmd = collapse_repeats(cmd, &mut command_rx, &mut backlog);
        process_command(cmd, &spooler, &update_tx).await;
    }

    log::debug!("Composition worker stopped");
}

/// Drain queued commands, keeping only the most recent repeat of `cmd`.
fn collapse_repeats(
    mut cmd: ComposeCommand,
    command_rx: &mut mpsc::UnboundedReceiver<ComposeCommand>,
    backlog: &mut VecDeque<ComposeCommand>,
) -> ComposeCommand {
    if matches!(cmd, ComposeCommand::Plan { .. }) {
        return cmd;
    }

    while let Ok(next_cmd) = command_rx.try_recv() {
        if cmd.same_action(&next_cmd) {
            log::debug!("Discarding queued request, using newer one");
            cmd = next_cmd;
        } else {
            // Other commands run after this one, in arrival order
            push_backlog(backlog, next_cmd);
        }
    }

    cmd
}

/// Queue `cmd`, replacing a waiting repeat of the same action in place.
fn push_backlog(backlog: &mut VecDeque<ComposeCommand>, cmd: ComposeCommand) {
    match backlog.iter_mut().find(|queued| queued.same_action(&cmd)) {
        Some(queued) => {
            log::debug!("Discarding queued request, using newer one");
            *queued = cmd;
        }
        None => backlog.push_back(cmd),
    }
}

async fn process_command<S: PrintSpooler>(
    cmd: ComposeCommand,
    spooler: &S,
    update_tx: &mpsc::UnboundedSender<ComposeUpdate>,
) {
    let update = match cmd {
        ComposeCommand::Print { request, options } => {
            if request.is_empty() {
                nothing_assigned()
            } else {
                match compose(&request).await {
                    Ok(result) => match render_for_print(&result, &options, spooler).await {
                        Ok(PrintOutcome::Submitted) => ComposeUpdate::PrintSubmitted,
                        Ok(PrintOutcome::Fallback { path }) => {
                            ComposeUpdate::PrintFallback { path }
                        }
                        Err(e) => error_update("print", e),
                    },
                    Err(e) => error_update("compose", e),
                }
            }
        }
        ComposeCommand::Download { request, options } => {
            if request.is_empty() {
                nothing_assigned()
            } else {
                match compose(&request).await {
                    Ok(result) => match render_for_download(&result, &options).await {
                        Ok(path) => ComposeUpdate::Downloaded { path },
                        Err(e) => error_update("save", e),
                    },
                    Err(e) => error_update("compose", e),
                }
            }
        }
        ComposeCommand::Plan { request } => match plan_composition(&request).await {
            Ok(plan) => ComposeUpdate::Planned { plan },
            Err(e) => error_update("plan", e),
        },
    };

    let _ = update_tx.send(update);
}

fn nothing_assigned() -> ComposeUpdate {
    ComposeUpdate::Error {
        message: "No documents assigned to any quadrant".to_string(),
    }
}

fn error_update(action: &str, err: pdf_quadrant::QuadrantError) -> ComposeUpdate {
    log::error!("Failed to {}: {}", action, err);
    ComposeUpdate::Error {
        message: format!("Failed to {}: {}", action, err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::{Dictionary, Document, Object, Stream};
    use pdf_quadrant::{CompositionRequest, DispatchOptions, PaperSize, Quadrant, SlotAssignment};
    use std::io;
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    #[derive(Default)]
    struct CountingSpooler {
        submissions: AtomicUsize,
    }

    impl PrintSpooler for &CountingSpooler {
        async fn submit(&self, _path: &Path) -> io::Result<()> {
            self.submissions.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    struct OfflineSpooler;

    impl PrintSpooler for OfflineSpooler {
        async fn submit(&self, _path: &Path) -> io::Result<()> {
            Err(io::Error::other("printer offline"))
        }
    }

    fn one_page_pdf(width: i64, height: i64) -> Vec<u8> {
        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();
        let content_id = doc.add_object(Stream::new(Dictionary::new(), b"q Q".to_vec()));
        let page_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            (
                "MediaBox",
                Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(width),
                    Object::Integer(height),
                ]),
            ),
            ("Contents", Object::Reference(content_id)),
        ]));
        doc.objects.insert(
            pages_id,
            Object::Dictionary(Dictionary::from_iter(vec![
                ("Type", Object::Name(b"Pages".to_vec())),
                ("Kids", Object::Array(vec![Object::Reference(page_id)])),
                ("Count", Object::Integer(1)),
            ])),
        );
        let catalog_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Catalog".to_vec())),
            ("Pages", Object::Reference(pages_id)),
        ]));
        doc.trailer.set("Root", catalog_id);

        let mut writer = Vec::new();
        doc.save_to(&mut writer).unwrap();
        writer
    }

    fn assigned_request() -> CompositionRequest {
        CompositionRequest::new(PaperSize::A4).with_slot(
            Quadrant::TopLeft,
            SlotAssignment::new(one_page_pdf(200, 300), "label.pdf"),
        )
    }

    fn options_in(dir: &TempDir) -> DispatchOptions {
        DispatchOptions {
            output_dir: dir.path().to_path_buf(),
            ..Default::default()
        }
    }

    /// Queue `commands`, run the worker until the queue is drained, collect updates
    async fn run<S: PrintSpooler>(
        commands: Vec<ComposeCommand>,
        spooler: S,
    ) -> Vec<ComposeUpdate> {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (update_tx, mut update_rx) = mpsc::unbounded_channel();
        for cmd in commands {
            command_tx.send(cmd).unwrap();
        }
        drop(command_tx);

        worker_task(command_rx, update_tx, spooler).await;

        let mut updates = Vec::new();
        while let Ok(update) = update_rx.try_recv() {
            updates.push(update);
        }
        updates
    }

    #[tokio::test]
    async fn test_empty_print_is_rejected_but_plan_runs() {
        let dir = TempDir::new().unwrap();
        let request = CompositionRequest::new(PaperSize::Letter);
        let updates = run(
            vec![
                ComposeCommand::Print {
                    request: request.clone(),
                    options: options_in(&dir),
                },
                ComposeCommand::Plan { request },
            ],
            OfflineSpooler,
        )
        .await;

        assert_eq!(updates.len(), 2);
        assert!(matches!(
            &updates[0],
            ComposeUpdate::Error { message } if message.contains("No documents")
        ));
        match &updates[1] {
            ComposeUpdate::Planned { plan } => {
                assert_eq!(plan.quadrants.len(), 4);
                assert_eq!(plan.assigned_count(), 0);
            }
            other => panic!("Expected Planned, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_download_saves_file() {
        let dir = TempDir::new().unwrap();
        let updates = run(
            vec![ComposeCommand::Download {
                request: assigned_request(),
                options: options_in(&dir),
            }],
            OfflineSpooler,
        )
        .await;

        match &updates[..] {
            [ComposeUpdate::Downloaded { path }] => {
                assert!(path.exists());
                assert!(path.starts_with(dir.path()));
            }
            other => panic!("Expected Downloaded, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_print_fallback_is_reported() {
        let dir = TempDir::new().unwrap();
        let updates = run(
            vec![ComposeCommand::Print {
                request: assigned_request(),
                options: options_in(&dir),
            }],
            OfflineSpooler,
        )
        .await;

        match &updates[..] {
            [ComposeUpdate::PrintFallback { path }] => assert!(path.exists()),
            other => panic!("Expected PrintFallback, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_repeated_prints_collapse() {
        let dir = TempDir::new().unwrap();
        let spooler = CountingSpooler::default();
        let print = || ComposeCommand::Print {
            request: assigned_request(),
            options: options_in(&dir),
        };

        let updates = run(
            vec![
                print(),
                print(),
                ComposeCommand::Plan {
                    request: assigned_request(),
                },
                print(),
            ],
            &spooler,
        )
        .await;

        assert_eq!(spooler.submissions.load(Ordering::SeqCst), 1);
        assert_eq!(updates.len(), 2);
        assert!(matches!(updates[0], ComposeUpdate::PrintSubmitted));
        assert!(matches!(updates[1], ComposeUpdate::Planned { .. }));
    }

    #[tokio::test]
    async fn test_repeated_downloads_behind_other_commands_collapse() {
        let dir = TempDir::new().unwrap();
        let download = || ComposeCommand::Download {
            request: assigned_request(),
            options: options_in(&dir),
        };

        let updates = run(
            vec![
                ComposeCommand::Print {
                    request: assigned_request(),
                    options: options_in(&dir),
                },
                ComposeCommand::Plan {
                    request: assigned_request(),
                },
                download(),
                download(),
            ],
            OfflineSpooler,
        )
        .await;

        assert_eq!(updates.len(), 3);
        assert!(matches!(updates[0], ComposeUpdate::PrintFallback { .. }));
        assert!(matches!(updates[1], ComposeUpdate::Planned { .. }));
        assert!(matches!(updates[2], ComposeUpdate::Downloaded { .. }));
        let downloads = updates
            .iter()
            .filter(|u| matches!(u, ComposeUpdate::Downloaded { .. }))
            .count();
        assert_eq!(downloads, 1);
    }

    #[tokio::test]
    async fn test_malformed_source_reports_quadrant() {
        let dir = TempDir::new().unwrap();
        let request = assigned_request().with_slot(
            Quadrant::BottomRight,
            SlotAssignment::new(b"garbage".to_vec(), "broken.pdf"),
        );
        let updates = run(
            vec![ComposeCommand::Download {
                request,
                options: options_in(&dir),
            }],
            OfflineSpooler,
        )
        .await;

        match &updates[..] {
            [ComposeUpdate::Error { message }] => {
                assert!(message.contains("bottom-right"));
                assert!(message.contains("broken.pdf"));
            }
            other => panic!("Expected Error, got {:?}", other),
        }
        assert!(std::fs::read_dir(dir.path()).unwrap().next().is_none());
    }
}
