use crate::error::CliError;
use crate::output;
use crate::style::{Color, Style};
use crate::ui::Ui;

pub fn print(err: &CliError) {
    let style = Style::detect();
    for line in render(&Ui::new(style), style, err) {
        output::error(line);
    }
}

/// The ruled block written to stderr when a command fails: failure class and
/// exit status first, then whichever explanations the error carries.
pub fn render(ui: &Ui, style: Style, err: &CliError) -> Vec<String> {
    let code = err.code();
    let mut out = ui.header(&format!("Plank {}", code.class()));

    out.push(style.paint_stderr(Color::Red, err.title()));
    out.push(ui.kv("exit status", &code.as_i32().to_string()));

    let sections = [
        ("Reason", err.reason()),
        ("What this means", err.meaning()),
        ("Suggested action", err.action()),
    ];
    for (label, text) in sections {
        if let Some(text) = text {
            out.push(String::new());
            out.push(format!("{label}:"));
            out.push(text.to_string());
        }
    }

    out.push(ui.rule());
    out
}
