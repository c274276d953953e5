use super::command::ConsoleCommand;
use crate::{info, warn};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Reads operator commands line by line and forwards them to the mission loop.
///
/// The reader task stops when the input ends, the receiver is dropped or the
/// endpoint is dropped. Dropping the sender closes the command channel, which
/// the mission loop treats as a shutdown request.
pub(crate) struct ConsoleEndpoint {
    close_token: CancellationToken,
}

impl ConsoleEndpoint {
    const CHANNEL_CAPACITY: usize = 16;

    /// Starts reading commands from the process' standard input.
    pub(crate) fn start_stdin(
        shutdown: &CancellationToken,
    ) -> (Self, mpsc::Receiver<ConsoleCommand>) {
        Self::start(BufReader::new(tokio::io::stdin()), shutdown)
    }

    /// Starts reading commands from an arbitrary buffered reader.
    pub(crate) fn start<R>(
        reader: R,
        shutdown: &CancellationToken,
    ) -> (Self, mpsc::Receiver<ConsoleCommand>)
    where
        R: AsyncBufRead + Unpin + Send + 'static,
    {
        let (tx, rx) = mpsc::channel(Self::CHANNEL_CAPACITY);
        let close_token = shutdown.child_token();
        let task_token = close_token.clone();

        tokio::spawn(async move {
            let mut lines = reader.lines();
            loop {
                let line = tokio::select! {
                    () = task_token.cancelled() => break,
                    line = lines.next_line() => line,
                };
                match line {
                    Ok(Some(text)) => {
                        if text.trim().is_empty() {
                            continue;
                        }
                        match text.parse::<ConsoleCommand>() {
                            Ok(command) => {
                                if tx.send(command).await.is_err() {
                                    break;
                                }
                            }
                            Err(e) => warn!("{e}"),
                        }
                    }
                    Ok(None) => {
                        info!("Console input closed.");
                        break;
                    }
                    Err(e) => {
                        warn!("Closing console input due to {e}");
                        break;
                    }
                }
            }
        });

        (Self { close_token }, rx)
    }
}

impl Drop for ConsoleEndpoint {
    fn drop(&mut self) { self.close_token.cancel(); }
}
