//! Diagram generation via the local renderer or a remote server.
//!
//! [`PlantUmlGenerator`] dispatches on the presence of a server URL:
//! - no server configured: the diagram source is piped through the local
//!   `plantuml` executable,
//! - server configured: the source is compressed, encoded into the URL
//!   path, and fetched with a blocking GET.
//!
//! There are no retries; the HTTP timeout is the agent's global default.

use std::io::Write;
use std::process::{Command, Stdio};
use std::time::Duration;

use ureq::Agent;

use crate::consts::{DEFAULT_COMMAND, DEFAULT_TIMEOUT};
use crate::format::DiagramFormat;
use crate::transcoder::{TranscodeError, Transcoder};

/// Diagram generation failure.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// The local renderer could not be started (missing executable).
    #[error("failed to run [{command}]: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
    /// The local renderer exited with a failure (bad diagram syntax,
    /// missing graph-layout tool for certain diagram types).
    #[error("[{command}] failed with {status}: {stderr}")]
    Renderer {
        command: String,
        status: std::process::ExitStatus,
        stderr: String,
    },
    /// The remote server answered outside the 2xx range.
    #[error("unexpected response status for [{url}]: [{status}]")]
    Status { url: String, status: u16 },
    /// The remote call failed before a status was received.
    #[error("HTTP error for [{url}]: {message}")]
    Http { url: String, message: String },
    #[error(transparent)]
    Transcode(#[from] TranscodeError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Diagram generator seam.
///
/// Writes the rendered diagram for `source` into `output`. A configured
/// `server_url` selects remote rendering; `None` or an empty string selects
/// the local renderer.
pub trait DiagramGenerator: Send + Sync {
    fn output_diagram(
        &self,
        source: &str,
        output: &mut dyn Write,
        server_url: Option<&str>,
        format: DiagramFormat,
    ) -> Result<(), GenerateError>;
}

/// Create an HTTP agent with the specified timeout.
///
/// Status errors are disabled so non-2xx responses can be handled
/// explicitly with the offending URL in the message.
pub fn create_agent(timeout: Duration) -> Agent {
    Agent::config_builder()
        .timeout_global(Some(timeout))
        .http_status_as_error(false)
        .build()
        .into()
}

/// PlantUML generator with local and remote rendering paths.
pub struct PlantUmlGenerator {
    /// HTTP agent, reused across render calls for connection pooling.
    agent: Agent,
    /// Local renderer executable.
    command: String,
    /// Payload encoding for the remote path.
    transcoder: Transcoder,
}

impl Default for PlantUmlGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl PlantUmlGenerator {
    /// Create a generator with the default transcoder and executable.
    #[must_use]
    pub fn new() -> Self {
        Self::with_transcoder(Transcoder::default())
    }

    /// Create a generator with an explicit remote payload encoding.
    #[must_use]
    pub fn with_transcoder(transcoder: Transcoder) -> Self {
        Self {
            agent: create_agent(DEFAULT_TIMEOUT),
            command: DEFAULT_COMMAND.to_owned(),
            transcoder,
        }
    }

    /// Set the local renderer executable.
    #[must_use]
    pub fn command(mut self, command: impl Into<String>) -> Self {
        self.command = command.into();
        self
    }

    /// Render by piping the source through the local executable.
    fn render_local(
        &self,
        source: &str,
        output: &mut dyn Write,
        format: DiagramFormat,
    ) -> Result<(), GenerateError> {
        tracing::debug!(command = %self.command, format = format.path_segment(), "rendering diagram locally");

        let mut child = Command::new(&self.command)
            .arg("-pipe")
            .arg(format.local_flag())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| GenerateError::Spawn {
                command: self.command.clone(),
                source: e,
            })?;

        // The renderer may emit output before consuming all input, so the
        // source is written from a separate thread while stdout and stderr
        // are drained; writing inline can fill both pipes and block.
        let stdin = child.stdin.take();
        let source_bytes = source.as_bytes().to_vec();
        let writer = std::thread::spawn(move || -> std::io::Result<()> {
            if let Some(mut stdin) = stdin {
                // A child that stops reading reports its own failure via
                // the exit status; a broken pipe here is not an error.
                match stdin.write_all(&source_bytes) {
                    Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => {}
                    result => result?,
                }
            }
            Ok(())
        });

        let rendered = child.wait_with_output()?;
        let written = writer
            .join()
            .map_err(|_| std::io::Error::other("diagram source writer panicked"))?;

        if !rendered.status.success() {
            return Err(GenerateError::Renderer {
                command: self.command.clone(),
                status: rendered.status,
                stderr: String::from_utf8_lossy(&rendered.stderr).trim().to_owned(),
            });
        }

        written?;
        output.write_all(&rendered.stdout)?;
        Ok(())
    }

    /// Render by fetching the encoded payload from the remote server.
    fn render_remote(
        &self,
        source: &str,
        output: &mut dyn Write,
        server_url: &str,
        format: DiagramFormat,
    ) -> Result<(), GenerateError> {
        let payload = self.transcoder.encode(source)?;
        let url = build_remote_url(server_url, format, &payload);
        tracing::debug!(url = %url, "requesting diagram from remote server");

        let response = self
            .agent
            .get(&url)
            .call()
            .map_err(|e| GenerateError::Http {
                url: url.clone(),
                message: e.to_string(),
            })?;

        let status = response.status().as_u16();
        if !(200..300).contains(&status) {
            return Err(GenerateError::Status { url, status });
        }

        let bytes = response
            .into_body()
            .read_to_vec()
            .map_err(|e| GenerateError::Http {
                url: url.clone(),
                message: e.to_string(),
            })?;
        output.write_all(&bytes)?;
        Ok(())
    }
}

impl DiagramGenerator for PlantUmlGenerator {
    fn output_diagram(
        &self,
        source: &str,
        output: &mut dyn Write,
        server_url: Option<&str>,
        format: DiagramFormat,
    ) -> Result<(), GenerateError> {
        match server_url {
            Some(url) if !url.is_empty() => self.render_remote(source, output, url, format),
            _ => self.render_local(source, output, format),
        }
    }
}

/// Build the remote request URL: `{base}/{format}/{payload}`.
fn build_remote_url(server_url: &str, format: DiagramFormat, payload: &str) -> String {
    let base = server_url.trim_end_matches('/');
    let segment = format.path_segment();
    format!("{base}/{segment}/{payload}")
}

#[cfg(test)]
mod tests {
    use std::io::Read;
    use std::net::{SocketAddr, TcpListener};
    use std::thread::JoinHandle;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_build_remote_url() {
        let url = build_remote_url(
            "https://www.plantuml.com/plantuml",
            DiagramFormat::Svg,
            "SoWkIImgAStDuN98pKi1IW80",
        );
        assert_eq!(
            url,
            "https://www.plantuml.com/plantuml/svg/SoWkIImgAStDuN98pKi1IW80"
        );
    }

    #[test]
    fn test_build_remote_url_trims_trailing_slash() {
        let url = build_remote_url("http://localhost:8080/", DiagramFormat::Png, "abcd");
        assert_eq!(url, "http://localhost:8080/png/abcd");
    }

    #[test]
    fn test_local_missing_executable_is_spawn_error() {
        let generator = PlantUmlGenerator::new().command("plantuml-executable-that-is-missing");
        let mut sink = Vec::new();
        let result =
            generator.output_diagram("@startuml\nA -> B\n@enduml", &mut sink, None, DiagramFormat::Png);
        assert!(matches!(result, Err(GenerateError::Spawn { .. })));
        assert!(sink.is_empty());
    }

    #[test]
    fn test_empty_server_url_selects_local_path() {
        // An empty configured URL behaves like no URL: local rendering.
        let generator = PlantUmlGenerator::new().command("plantuml-executable-that-is-missing");
        let mut sink = Vec::new();
        let result =
            generator.output_diagram("A -> B", &mut sink, Some(""), DiagramFormat::Png);
        assert!(matches!(result, Err(GenerateError::Spawn { .. })));
    }

    #[test]
    fn test_local_renderer_failure_reports_status() {
        // `false` accepts any arguments and exits non-zero.
        let generator = PlantUmlGenerator::new().command("false");
        let mut sink = Vec::new();
        let result = generator.output_diagram("A -> B", &mut sink, None, DiagramFormat::Png);
        assert!(matches!(result, Err(GenerateError::Renderer { .. })));
        assert!(sink.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_local_render_survives_early_child_output() {
        use std::os::unix::fs::PermissionsExt;
        use std::sync::mpsc;

        // Stand-in renderer that fills its stdout pipe before draining
        // stdin, the way a multi-diagram input streams out images early.
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("emit-then-drain");
        std::fs::write(
            &script,
            "#!/bin/sh\nhead -c 131072 /dev/zero\ncat > /dev/null\n",
        )
        .unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let generator = PlantUmlGenerator::new().command(script.to_str().unwrap());
        // Well past the OS pipe buffers on both sides.
        let source = "A -> B\n".repeat(150_000);

        let (sender, receiver) = mpsc::channel();
        std::thread::spawn(move || {
            let mut sink = Vec::new();
            let result = generator.output_diagram(&source, &mut sink, None, DiagramFormat::Png);
            sender.send(result.map(|()| sink.len())).unwrap();
        });

        let rendered = receiver
            .recv_timeout(Duration::from_secs(10))
            .expect("local rendering blocked with both pipes full");
        assert_eq!(rendered.unwrap(), 131_072);
    }

    #[test]
    fn test_huffman_encoding_fails_before_any_request() {
        // The port is never contacted; encoding fails first.
        let generator = PlantUmlGenerator::with_transcoder(Transcoder::Huffman);
        let mut sink = Vec::new();
        let result = generator.output_diagram(
            "@startuml\nA -> B\n@enduml",
            &mut sink,
            Some("http://localhost:1"),
            DiagramFormat::Png,
        );
        assert!(matches!(result, Err(GenerateError::Transcode(_))));
        assert!(sink.is_empty());
    }

    /// Serve a single canned HTTP response on a loopback socket.
    fn spawn_server(response: &'static str) -> (SocketAddr, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut buffer = [0u8; 1024];
            loop {
                let read = stream.read(&mut buffer).unwrap();
                request.extend_from_slice(&buffer[..read]);
                if read == 0 || request.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }
            stream.write_all(response.as_bytes()).unwrap();
            String::from_utf8_lossy(&request).into_owned()
        });
        (addr, handle)
    }

    #[test]
    fn test_remote_success_copies_body_to_sink() {
        let (addr, handle) = spawn_server(
            "HTTP/1.1 200 OK\r\nContent-Type: image/png\r\nContent-Length: 9\r\nConnection: close\r\n\r\nimagedata",
        );
        let server_url = format!("http://{addr}");

        let generator = PlantUmlGenerator::new();
        let mut sink = Vec::new();
        generator
            .output_diagram(
                "@startuml\nA -> B\n@enduml",
                &mut sink,
                Some(&server_url),
                DiagramFormat::Png,
            )
            .unwrap();

        assert_eq!(sink, b"imagedata");

        let request = handle.join().unwrap();
        let request_line = request.lines().next().unwrap();
        assert!(
            request_line.starts_with("GET /png/"),
            "unexpected request line: {request_line}"
        );
    }

    #[test]
    fn test_remote_error_status_names_url_and_status() {
        let (addr, handle) = spawn_server(
            "HTTP/1.1 500 Internal Server Error\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        );
        let server_url = format!("http://{addr}");

        let generator = PlantUmlGenerator::new();
        let mut sink = Vec::new();
        let result = generator.output_diagram(
            "@startuml\nA -> B\n@enduml",
            &mut sink,
            Some(&server_url),
            DiagramFormat::Svg,
        );

        match result {
            Err(GenerateError::Status { url, status }) => {
                assert_eq!(status, 500);
                assert!(url.starts_with(&format!("{server_url}/svg/")));
            }
            other => panic!("expected status error, got {other:?}"),
        }
        // No partial output reaches the sink on failure.
        assert!(sink.is_empty());
        handle.join().unwrap();
    }
}
