use std::io::IsTerminal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Green,
    Yellow,
    Red,
}

impl Color {
    fn sgr(self) -> &'static str {
        match self {
            Color::Green => "32",
            Color::Yellow => "33",
            Color::Red => "31",
        }
    }
}

/// Status markers and ANSI colour, decided once per stream.
///
/// Reports go to stdout and the error block to stderr, so either one can be
/// piped while the other is still a terminal.
#[derive(Debug, Clone, Copy)]
pub struct Style {
    color_stdout: bool,
    color_stderr: bool,
}

impl Style {
    pub fn detect() -> Self {
        Self::for_streams(
            std::env::var_os("NO_COLOR").is_some(),
            std::io::stdout().is_terminal(),
            std::io::stderr().is_terminal(),
        )
    }

    pub fn for_streams(no_color: bool, stdout_tty: bool, stderr_tty: bool) -> Self {
        Self {
            color_stdout: !no_color && stdout_tty,
            color_stderr: !no_color && stderr_tty,
        }
    }

    pub fn plain() -> Self {
        Self::for_streams(true, false, false)
    }

    /// Statement or file applied.
    pub fn ok(&self) -> String {
        self.paint_stdout(Color::Green, "✔")
    }

    /// Fatal statement; the run stopped here.
    pub fn fail(&self) -> String {
        self.paint_stdout(Color::Red, "✖")
    }

    pub fn bullet(&self) -> String {
        "•".to_string()
    }

    /// Informational: already-existing objects, planned statements.
    pub fn arrow(&self) -> String {
        self.paint_stdout(Color::Yellow, "→")
    }

    pub fn paint_stdout(&self, color: Color, text: &str) -> String {
        paint(self.color_stdout, color, text)
    }

    pub fn paint_stderr(&self, color: Color, text: &str) -> String {
        paint(self.color_stderr, color, text)
    }
}

fn paint(enabled: bool, color: Color, text: &str) -> String {
    if !enabled {
        return text.to_string();
    }
    format!("\u{1b}[{}m{text}\u{1b}[0m", color.sgr())
}
