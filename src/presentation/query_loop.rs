use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use super::AppState;

const ANSWER_FRAME: &str = "========";

/// How a session came to an end. Every variant terminates the process
/// with status 0; generation failure ends the session rather than the
/// iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    UserExit,
    EndOfInput,
    Interrupted,
    GenerationFailed,
}

/// The interactive question/answer loop.
///
/// Blocking request/response: each question fully resolves (retrieval and
/// generation) before the next prompt is shown. Blank input re-prompts
/// without touching the chain; "exit" in any letter case, end-of-input,
/// or an interrupt ends the session.
pub async fn run_query_loop<R, W>(
    state: &AppState,
    input: R,
    output: &mut W,
) -> std::io::Result<SessionEnd>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();

    let end = loop {
        write!(output, "\nYour question: ")?;
        output.flush()?;

        let line = tokio::select! {
            line = lines.next_line() => match line? {
                Some(line) => line,
                None => break SessionEnd::EndOfInput,
            },
            _ = tokio::signal::ctrl_c() => break SessionEnd::Interrupted,
        };

        if line.to_lowercase() == "exit" {
            break SessionEnd::UserExit;
        }
        if line.trim().is_empty() {
            continue;
        }

        writeln!(output, "\nThinking...")?;

        let response = tokio::select! {
            response = state.retrieval_service.answer(&line) => response,
            _ = tokio::signal::ctrl_c() => break SessionEnd::Interrupted,
        };

        match response {
            Ok(response) => {
                writeln!(output, "\nAnswer:\n{ANSWER_FRAME}")?;
                writeln!(output, "{}", response.answer)?;
                writeln!(output, "{ANSWER_FRAME}")?;
            }
            Err(e) => {
                writeln!(output, "An error occurred: {e}")?;
                break SessionEnd::GenerationFailed;
            }
        }
    };

    writeln!(output, "\n--- Session Ended ---")?;
    tracing::info!(?end, "session ended");
    Ok(end)
}
