//! Console report
//!
//! Human-readable progress and summary output. This is the only reporting
//! surface of a run; diagnostics go through `tracing` instead.

use crate::checker::RunSummary;
use chrono::{SecondsFormat, Utc};
use std::io::{self, Write};

const RULE: &str = "===========================";

/// Severity of a timestamped console log line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warn,
    Error,
    Success,
}

impl LogLevel {
    fn prefix(&self) -> &'static str {
        match self {
            Self::Info => "📋",
            Self::Warn => "⚠️",
            Self::Error => "❌",
            Self::Success => "✅",
        }
    }
}

/// Writes the report to any [`Write`] sink (stdout in the binary, a buffer in tests)
pub struct Console<W: Write> {
    out: W,
}

impl Console<io::Stdout> {
    /// Console writing to the process stdout
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Console<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Consume the console and return the underlying sink.
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Opening banner
    pub fn banner(&mut self) -> io::Result<()> {
        writeln!(self.out, "🧪 Testing All Integrations")?;
        writeln!(self.out, "{}", RULE)
    }

    /// Blank line followed by a section heading
    pub fn section(&mut self, title: &str) -> io::Result<()> {
        writeln!(self.out, "\n🔍 {}", title)
    }

    pub fn success(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.out, "✅ {}", message)
    }

    pub fn failure(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.out, "❌ {}", message)
    }

    pub fn warning(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.out, "⚠️ {}", message)
    }

    /// Indented detail line under the previous marker
    pub fn detail(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.out, "   {}", message)
    }

    /// `<prefix> [<RFC 3339 timestamp>] <message>`
    pub fn log(&mut self, level: LogLevel, message: &str) -> io::Result<()> {
        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        writeln!(self.out, "{} [{}] {}", level.prefix(), timestamp, message)
    }

    /// Summary section: one line per integration, then the dashboard URL hint
    pub fn summary(&mut self, summary: &RunSummary) -> io::Result<()> {
        writeln!(self.out, "\n📋 Integration Test Summary")?;
        writeln!(self.out, "{}", RULE)?;
        for result in &summary.results {
            let status = if result.ok {
                "✅ Connected"
            } else {
                "❌ Failed"
            };
            writeln!(
                self.out,
                "{}: {}",
                result.integration.summary_label(),
                status
            )?;
        }

        writeln!(self.out, "\n🌐 Dashboard URL: {}", summary.dashboard_url)?;
        writeln!(self.out, "Open this URL in your browser to see the dashboard")?;
        self.out.flush()
    }
}
