//! ANSI terminal renderer.

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};

use crate::compute::{Grid, Renderer};
use crate::schema::{ColorScheme, StepMode};

const ALIVE_GLYPH: char = 'X';
// Raw mode disables output post-processing, so newlines carry their own `\r`.
const LINE_END: &str = "\r\n";

/// Glyph used for a cell under `scheme`.
#[inline]
pub fn cell_glyph(alive: bool, scheme: ColorScheme) -> char {
    match (alive, scheme) {
        (true, _) => ALIVE_GLYPH,
        (false, ColorScheme::Default) => '.',
        (false, ColorScheme::Hacker) => ' ',
    }
}

/// Grid as plain text, one line per row, without escape sequences.
pub fn render_plain(grid: &Grid, scheme: ColorScheme) -> String {
    let mut text = String::with_capacity(grid.rows() * (grid.cols() + 1));
    for (_, col, alive) in grid.cells() {
        text.push(cell_glyph(alive, scheme));
        if col + 1 == grid.cols() {
            text.push('\n');
        }
    }
    text
}

/// Key hint printed above the grid.
pub fn hint_for(mode: StepMode) -> &'static str {
    match mode {
        StepMode::Automatic => "Press Q to exit.",
        StepMode::Manual => "Press Space to step through. Press Q to exit.",
    }
}

/// Redraws the whole screen for every published frame.
///
/// Rows end in `\r\n` so grids taller than the screen scroll instead of
/// piling up on the bottom line.
pub struct TerminalRenderer<W: Write> {
    out: W,
    scheme: ColorScheme,
    hint: &'static str,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, scheme: ColorScheme, mode: StepMode) -> Self {
        Self {
            out,
            scheme,
            hint: hint_for(mode),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn render(&mut self, grid: &Grid, generation: u64) -> io::Result<()> {
        queue!(
            self.out,
            MoveTo(0, 0),
            Clear(ClearType::All),
            Print(format!("Generation {} | {}", generation, self.hint)),
            Print(LINE_END),
            Print(LINE_END),
        )?;

        if self.scheme == ColorScheme::Hacker {
            queue!(
                self.out,
                SetBackgroundColor(Color::AnsiValue(0)),
                SetForegroundColor(Color::AnsiValue(46)),
            )?;
        }

        let mut line = String::with_capacity(grid.cols());
        for (_, col, alive) in grid.cells() {
            line.push(cell_glyph(alive, self.scheme));
            if col + 1 == grid.cols() {
                queue!(self.out, Print(&line), Print(LINE_END))?;
                line.clear();
            }
        }

        queue!(self.out, ResetColor)?;
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Grid {
        let mut grid = Grid::new(2, 4).unwrap();
        grid.set(0, 1, true).unwrap();
        grid.set(1, 3, true).unwrap();
        grid
    }

    #[test]
    fn test_plain_default_scheme() {
        assert_eq!(render_plain(&sample(), ColorScheme::Default), ".X..\n...X\n");
    }

    #[test]
    fn test_plain_hacker_scheme() {
        assert_eq!(render_plain(&sample(), ColorScheme::Hacker), " X  \n   X\n");
    }

    #[test]
    fn test_terminal_frame_contents() {
        let mut renderer =
            TerminalRenderer::new(Vec::new(), ColorScheme::Default, StepMode::Manual);
        renderer.render(&sample(), 7).unwrap();
        let out = String::from_utf8(renderer.into_inner()).unwrap();

        assert!(out.starts_with("\x1b[1;1H"), "{:?}", out);
        assert!(out.contains("\x1b[2J"));
        assert!(out.contains("Generation 7 | Press Space to step through."));
        assert!(out.contains("step through. Press Q to exit.\r\n\r\n.X..\r\n...X\r\n"));
        assert!(!out.contains("\x1b[1E"), "{:?}", out);
        assert!(out.ends_with("\x1b[0m"));
    }

    #[test]
    fn test_hacker_colors() {
        let mut renderer =
            TerminalRenderer::new(Vec::new(), ColorScheme::Hacker, StepMode::Automatic);
        renderer.render(&sample(), 0).unwrap();
        let out = String::from_utf8(renderer.into_inner()).unwrap();

        assert!(out.contains("\x1b[48;5;0m"));
        assert!(out.contains("\x1b[38;5;46m"));
        assert!(out.contains(" X  "));
    }
}
